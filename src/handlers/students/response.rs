//! Student response DTOs

use serde::Serialize;

use crate::{handlers::problems::ProblemResponse, services::membership_service::FlaggedProblem};

/// A problem with the viewer's list memberships
#[derive(Debug, Serialize)]
pub struct FlaggedProblemResponse {
    #[serde(flatten)]
    pub problem: ProblemResponse,
    pub bookmarked: bool,
    pub interested: bool,
}

impl From<FlaggedProblem> for FlaggedProblemResponse {
    fn from(f: FlaggedProblem) -> Self {
        Self {
            problem: f.problem.into(),
            bookmarked: f.bookmarked,
            interested: f.interested,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MainResponse {
    pub email: String,
    pub department: Option<String>,
    pub problems: Vec<FlaggedProblemResponse>,
    pub total: usize,
}
