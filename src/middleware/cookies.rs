//! Cookie helpers for the session and role cookies

use axum::http::{header, HeaderMap};

use crate::constants::cookies::{SESSION, USER_ROLE};

/// Value of cookie `name`, looking through every `Cookie` header
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// `Set-Cookie` values establishing a session: the HttpOnly token and the
/// script-visible role indicator
pub fn session_cookies(token: &str, role: &str, max_age_secs: i64, secure: bool) -> [String; 2] {
    [
        build(SESSION, token, max_age_secs, true, secure),
        build(USER_ROLE, role, max_age_secs, false, secure),
    ]
}

/// `Set-Cookie` values expiring both cookies
pub fn cleared_cookies(secure: bool) -> [String; 2] {
    [
        build(SESSION, "", 0, true, secure),
        build(USER_ROLE, "", 0, false, secure),
    ]
}

fn build(name: &str, value: &str, max_age_secs: i64, http_only: bool, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Lax");
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("a=1; userRole=student; session=tok"));
        assert_eq!(read_cookie(&headers, "userRole"), Some("student"));
        assert_eq!(read_cookie(&headers, "session"), Some("tok"));
        assert_eq!(read_cookie(&headers, "role"), None);
    }

    #[test]
    fn test_read_cookie_across_headers_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("userRole="));
        assert_eq!(read_cookie(&headers, "userRole"), Some(""));
        assert_eq!(read_cookie(&HeaderMap::new(), "userRole"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let [session, role] = session_cookies("tok", "admin", 604_800, false);
        assert_eq!(session, "session=tok; Path=/; Max-Age=604800; SameSite=Lax; HttpOnly");
        assert_eq!(role, "userRole=admin; Path=/; Max-Age=604800; SameSite=Lax");

        let [session, role] = cleared_cookies(true);
        assert!(session.starts_with("session=; Path=/; Max-Age=0"));
        assert!(session.ends_with("HttpOnly; Secure"));
        assert!(!role.contains("HttpOnly"));
    }
}
