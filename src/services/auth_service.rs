//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::{AuthConfig, Config},
    constants::RESET_TOKEN_LENGTH,
    db::{PasswordReset, Store},
    error::{AppError, AppResult},
    models::{NewUser, Role, User},
    utils::{crypto::secrets_match, generate_secure_token, hash_string, normalize_email},
};

use super::Mailer;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Validated sign-up input
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub admin_code: Option<String>,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a user and issue a session token
    pub async fn signup(
        store: &dyn Store,
        config: &AuthConfig,
        input: SignupInput,
    ) -> AppResult<(User, String)> {
        if input.role == Role::Admin {
            let granted = match (&config.admin_signup_code, &input.admin_code) {
                (Some(expected), Some(given)) => secrets_match(given.trim(), expected),
                _ => false,
            };
            if !granted {
                return Err(AppError::Forbidden("Invalid admin code".to_string()));
            }
        }

        let email = normalize_email(&input.email);
        if store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let user = store
            .create_user(NewUser {
                email,
                role: input.role,
                password_hash: Self::hash_password(&input.password)?,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User signed up");

        let token = Self::issue_token(&user, config)?;
        Ok((user, token))
    }

    /// Check credentials and issue a session token
    pub async fn login(
        store: &dyn Store,
        config: &AuthConfig,
        email: &str,
        password: &str,
    ) -> AppResult<(User, String)> {
        let user = store
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = Self::issue_token(&user, config)?;
        Ok((user, token))
    }

    /// Re-check the password of an already signed-in user
    pub async fn reauthenticate(store: &dyn Store, user_id: &Uuid, password: &str) -> AppResult<User> {
        let user = store
            .find_user_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Start a password reset. Unknown emails are silently ignored.
    pub async fn forgot_password(
        store: &dyn Store,
        mailer: &dyn Mailer,
        config: &Config,
        email: &str,
    ) -> AppResult<()> {
        let Some(user) = store.find_user_by_email(&normalize_email(email)).await? else {
            return Ok(());
        };

        let token = generate_secure_token(RESET_TOKEN_LENGTH);
        store
            .save_password_reset(PasswordReset {
                token_hash: hash_string(&token),
                user_id: user.id,
                expires_at: Utc::now() + Duration::minutes(config.auth.reset_token_ttl_minutes),
            })
            .await?;

        let link = format!(
            "{}/reset-password?token={}",
            config.server.public_base_url.trim_end_matches('/'),
            token
        );
        if let Err(e) = mailer.send_reset_link(&user.email, &link).await {
            warn!(user_id = %user.id, error = %e, "Failed to deliver reset link");
        }

        Ok(())
    }

    /// Consume a reset token and set a new password
    pub async fn reset_password(store: &dyn Store, token: &str, password: &str) -> AppResult<()> {
        let invalid = || AppError::InvalidInput("Invalid or expired reset token".to_string());

        let reset = store
            .take_password_reset(&hash_string(token.trim()))
            .await?
            .ok_or_else(invalid)?;

        if reset.expires_at <= Utc::now() {
            return Err(invalid());
        }

        store
            .update_password(&reset.user_id, &Self::hash_password(password)?)
            .await?;

        info!(user_id = %reset.user_id, "Password reset");
        Ok(())
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign a session token for `user`
    pub fn issue_token(user: &User, config: &AuthConfig) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: (now + Duration::days(config.session_ttl_days)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    /// Hash password using Argon2
    pub(crate) fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        config::{LogFormat, ServerConfig, StoreBackend, StoreConfig},
        db::MemoryStore,
        services::mailer::MockMailer,
    };

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            session_ttl_days: 7,
            admin_signup_code: Some("letmein".into()),
            problem_edit_code: None,
            reset_token_ttl_minutes: 30,
        }
    }

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                rust_log: "info".into(),
                log_format: LogFormat::Pretty,
                request_timeout_secs: 30,
                public_base_url: "http://prorep.test/".into(),
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: None,
                max_connections: 1,
            },
            auth: auth_config(),
        }
    }

    fn signup(email: &str, role: Role, code: Option<&str>) -> SignupInput {
        SignupInput {
            email: email.into(),
            password: "hunter22".into(),
            role,
            admin_code: code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = MemoryStore::new();
        let cfg = auth_config();

        let (user, token) = AuthService::signup(&store, &cfg, signup(" Ada@Example.com", Role::Student, None))
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(user.bookmarks.is_empty() && user.interested.is_empty());

        let claims = AuthService::verify_token(&token, &cfg.jwt_secret).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Student);

        let (again, _) = AuthService::login(&store, &cfg, "ada@example.com", "hunter22")
            .await
            .unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_login_failures_look_identical() {
        let store = MemoryStore::new();
        let cfg = auth_config();
        AuthService::signup(&store, &cfg, signup("ada@example.com", Role::Student, None))
            .await
            .unwrap();

        let wrong_pw = AuthService::login(&store, &cfg, "ada@example.com", "nope")
            .await
            .unwrap_err();
        let no_user = AuthService::login(&store, &cfg, "bob@example.com", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(wrong_pw.to_string(), no_user.to_string());
        assert!(matches!(no_user, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_admin_signup_needs_code() {
        let store = MemoryStore::new();
        let cfg = auth_config();

        for code in [None, Some("wrong")] {
            let err = AuthService::signup(&store, &cfg, signup("root@example.com", Role::Admin, code))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }

        let (admin, _) = AuthService::signup(&store, &cfg, signup("root@example.com", Role::Admin, Some("letmein")))
            .await
            .unwrap();
        assert!(admin.is_admin());

        let closed = AuthConfig {
            admin_signup_code: None,
            ..auth_config()
        };
        let err = AuthService::signup(&store, &closed, signup("x@example.com", Role::Admin, Some("")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let cfg = auth_config();
        AuthService::signup(&store, &cfg, signup("ada@example.com", Role::Student, None))
            .await
            .unwrap();
        let err = AuthService::signup(&store, &cfg, signup("ADA@example.com", Role::Student, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let err = AuthService::verify_token("not.a.jwt", "secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let store = MemoryStore::new();
        let cfg = config();
        let (user, _) = AuthService::signup(&store, &cfg.auth, signup("ada@example.com", Role::Student, None))
            .await
            .unwrap();

        let sent = Arc::new(Mutex::new(String::new()));
        let captured = Arc::clone(&sent);
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_reset_link()
            .withf(|email, _| email == "ada@example.com")
            .times(1)
            .returning(move |_, link| {
                *captured.lock().unwrap() = link.to_string();
                Ok(())
            });

        AuthService::forgot_password(&store, &mailer, &cfg, "ada@example.com")
            .await
            .unwrap();

        let link = sent.lock().unwrap().clone();
        assert!(link.starts_with("http://prorep.test/reset-password?token="));
        let token = link.rsplit('=').next().unwrap().to_string();

        AuthService::reset_password(&store, &token, "brand-new").await.unwrap();
        AuthService::login(&store, &cfg.auth, "ada@example.com", "brand-new")
            .await
            .unwrap();
        assert!(AuthService::login(&store, &cfg.auth, "ada@example.com", "hunter22")
            .await
            .is_err());

        let reused = AuthService::reset_password(&store, &token, "again!").await.unwrap_err();
        assert!(matches!(reused, AppError::InvalidInput(_)));
        assert!(store.find_user_by_id(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email_sends_nothing() {
        let store = MemoryStore::new();
        let mut mailer = MockMailer::new();
        mailer.expect_send_reset_link().times(0);

        AuthService::forgot_password(&store, &mailer, &config(), "ghost@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_expired_reset_token_rejected() {
        let store = MemoryStore::new();
        let cfg = auth_config();
        let (user, _) = AuthService::signup(&store, &cfg, signup("ada@example.com", Role::Student, None))
            .await
            .unwrap();
        store
            .save_password_reset(PasswordReset {
                token_hash: hash_string("stale"),
                user_id: user.id,
                expires_at: Utc::now() - Duration::minutes(1),
            })
            .await
            .unwrap();

        let err = AuthService::reset_password(&store, "stale", "brand-new").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
