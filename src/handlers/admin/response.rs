//! Admin response DTOs

use serde::Serialize;

use crate::handlers::problems::ProblemResponse;

/// Data backing the submission form
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub email: String,
    pub departments: &'static [&'static str],
}

/// The admin's own submissions
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub email: String,
    pub problems: Vec<ProblemResponse>,
    pub total: usize,
}
