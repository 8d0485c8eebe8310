//! Business logic services

pub mod auth_service;
pub mod filter;
pub mod mailer;
pub mod membership_service;
pub mod problem_service;

pub use auth_service::{AuthService, Claims, SignupInput};
pub use filter::ProblemFilter;
pub use mailer::{LogMailer, Mailer};
pub use membership_service::MembershipService;
pub use problem_service::ProblemService;
