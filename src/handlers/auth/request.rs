//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    /// `admin` or `student`, matched exactly
    pub role: String,

    pub admin_code: Option<String>,
}

impl SignupRequest {
    pub fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
            ..self
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,
}

impl ResetPasswordRequest {
    pub fn trimmed(self) -> Self {
        Self {
            token: self.token.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.into(),
            password: password.into(),
            role: "student".into(),
            admin_code: None,
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup(" ada@example.com ", " secret ").trimmed().validate().is_ok());
        assert!(signup("", "secret").trimmed().validate().is_err());
        assert!(signup("not-an-email", "secret").trimmed().validate().is_err());
        assert!(signup("ada@example.com", "  12345  ").trimmed().validate().is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let blank = LoginRequest {
            email: "   ".into(),
            password: "x".into(),
        };
        assert!(blank.trimmed().validate().is_err());
    }

    #[test]
    fn test_reset_password_length_checked_after_trim() {
        let padded = ResetPasswordRequest {
            token: "tok".into(),
            password: "   a    ".into(),
        };
        assert!(padded.trimmed().validate().is_err());

        let ok = ResetPasswordRequest {
            token: " tok ".into(),
            password: " secret ".into(),
        };
        let ok = ok.trimmed();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.password, "secret");
    }
}
