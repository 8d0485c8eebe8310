//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod membership_repo;
pub mod problem_repo;
pub mod reset_repo;
pub mod user_repo;

pub use membership_repo::MembershipRepository;
pub use problem_repo::ProblemRepository;
pub use reset_repo::ResetRepository;
pub use user_repo::UserRepository;
