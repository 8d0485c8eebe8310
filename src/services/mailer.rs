//! Outbound mail port

use async_trait::async_trait;
use tracing::info;

use crate::error::AppResult;

/// Delivers password reset links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_reset_link(&self, email: &str, link: &str) -> AppResult<()>;
}

/// Writes reset links to the log instead of sending mail
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_reset_link(&self, email: &str, link: &str) -> AppResult<()> {
        info!(%email, %link, "Password reset link issued");
        Ok(())
    }
}
