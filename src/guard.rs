//! Route access table
//!
//! Decides, per request path and role indicator, whether a page may be
//! served or the caller is sent back to the landing page. The role indicator
//! is whatever the `userRole` cookie claims; it is never verified, so this is
//! a navigation aid and not an authorization boundary. Handlers that touch
//! data check the signed session on their own.
//!
//! Rules are evaluated in order and the first matching pattern wins. Paths
//! matched by no rule are allowed.

use crate::{constants::paths, models::Role};

/// How a path is matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path exactly
    Exact(&'static str),
    /// Matches the path itself and every path below it (`/admin`, `/admin/...`)
    Prefix(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => path == *p,
            Self::Prefix(p) => match path.strip_prefix(p) {
                Some(rest) => rest.is_empty() || rest.starts_with('/') || p.ends_with('/'),
                None => false,
            },
        }
    }
}

/// What a matched path requires from the role indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including callers without a role cookie
    Public,
    /// Exactly this role
    Role(Role),
    /// Any non-empty role indicator
    Authenticated,
}

impl Access {
    /// Evaluate the requirement against the raw indicator. No normalization:
    /// `"ADMIN"` is not `"admin"`.
    pub fn permits(&self, role: Option<&str>) -> bool {
        match self {
            Self::Public => true,
            Self::Role(required) => role == Some(required.as_str()),
            Self::Authenticated => role.is_some_and(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub pattern: PathPattern,
    pub access: Access,
}

/// Guard outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(&'static str),
}

/// Ordered path-to-access table
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    fallback: &'static str,
}

impl RouteTable {
    /// Empty table redirecting denials to `fallback`
    pub fn new(fallback: &'static str) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule; earlier rules take precedence
    pub fn rule(mut self, pattern: PathPattern, access: Access) -> Self {
        self.rules.push(RouteRule { pattern, access });
        self
    }

    /// The application's route table. Public pages are listed first so they
    /// are never shadowed by a restricted prefix.
    pub fn canonical() -> Self {
        use PathPattern::{Exact, Prefix};

        Self::new(paths::GUARD_FALLBACK)
            .rule(Exact(paths::HOME), Access::Public)
            .rule(Exact(paths::LOGIN), Access::Public)
            .rule(Exact(paths::SIGNUP), Access::Public)
            .rule(Prefix(paths::ADMIN), Access::Role(Role::Admin))
            .rule(Prefix(paths::PROFILE), Access::Role(Role::Admin))
            .rule(Exact(paths::MAIN), Access::Role(Role::Student))
            .rule(Prefix(paths::INTERESTED), Access::Role(Role::Student))
            .rule(Prefix(paths::BOOKMARKED), Access::Role(Role::Student))
            .rule(Prefix(paths::DETAILS), Access::Authenticated)
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// First rule whose pattern matches `path`
    pub fn classify(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize(path);
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    /// Decide whether `path` may be served to a caller claiming `role`
    pub fn evaluate(&self, path: &str, role: Option<&str>) -> Decision {
        match self.classify(path) {
            Some(rule) if !rule.access.permits(role) => Decision::Redirect(self.fallback),
            _ => Decision::Proceed,
        }
    }
}

/// Drop trailing slashes so `/main/` is classified like `/main`
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
