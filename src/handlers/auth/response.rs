//! Authentication response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Role, User};

/// Public user information
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Sign-up / login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub token_type: String,
    /// Landing page for the user's role
    pub redirect_to: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub redirect_to: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Signed-in user with their lists
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub bookmarks: Vec<Uuid>,
    pub interested: Vec<Uuid>,
}

impl From<User> for CurrentUserResponse {
    fn from(mut user: User) -> Self {
        let bookmarks = std::mem::take(&mut user.bookmarks);
        let interested = std::mem::take(&mut user.interested);
        Self {
            user: user.into(),
            bookmarks,
            interested,
        }
    }
}
