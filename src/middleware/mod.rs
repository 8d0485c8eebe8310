//! HTTP middleware

pub mod auth;
pub mod cookies;
pub mod route_guard;

pub use auth::{session_middleware, AuthenticatedUser, OptionalAuth};
pub use route_guard::route_guard;
