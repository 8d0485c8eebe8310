//! Problem request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_PROBLEM_STATEMENT_LENGTH, MAX_PROBLEM_TITLE_LENGTH},
    error::{AppError, AppResult},
    models::{NewProblem, ProblemPatch},
    utils::{clean_list, validate_departments},
};

/// Create problem request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH, message = "Title is required"))]
    pub title: String,

    pub domain: Option<String>,

    #[validate(length(min = 1, max = MAX_PROBLEM_STATEMENT_LENGTH, message = "Statement is required"))]
    pub statement: String,

    #[serde(default)]
    pub departments: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    pub source: Option<String>,
    pub source_link: Option<String>,
    pub organisation: Option<String>,
    pub notes: Option<String>,
}

impl CreateProblemRequest {
    /// Trim, validate and convert into store input
    pub fn into_new_problem(mut self) -> AppResult<NewProblem> {
        self.title = self.title.trim().to_string();
        self.statement = self.statement.trim().to_string();
        self.validate()?;

        let departments = clean_list(self.departments);
        validate_departments(&departments)?;

        Ok(NewProblem {
            title: self.title,
            domain: optional(self.domain),
            statement: self.statement,
            departments,
            keywords: clean_list(self.keywords),
            source: optional(self.source),
            source_link: optional(self.source_link),
            organisation: optional(self.organisation),
            notes: optional(self.notes),
        })
    }
}

/// Update problem request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH, message = "Title cannot be empty"))]
    pub title: Option<String>,

    pub domain: Option<String>,

    #[validate(length(min = 1, max = MAX_PROBLEM_STATEMENT_LENGTH, message = "Statement cannot be empty"))]
    pub statement: Option<String>,

    pub departments: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub source: Option<String>,
    pub source_link: Option<String>,
    pub organisation: Option<String>,
    pub notes: Option<String>,
}

impl UpdateProblemRequest {
    /// Trim, validate and convert into a patch
    pub fn into_patch(mut self) -> AppResult<ProblemPatch> {
        self.title = self.title.map(|t| t.trim().to_string());
        self.statement = self.statement.map(|s| s.trim().to_string());
        self.validate()?;

        let departments = self.departments.map(clean_list);
        if let Some(departments) = &departments {
            validate_departments(departments)?;
        }

        Ok(ProblemPatch {
            title: self.title,
            domain: optional(self.domain),
            statement: self.statement,
            departments,
            keywords: self.keywords.map(clean_list),
            source: optional(self.source),
            source_link: optional(self.source_link),
            organisation: optional(self.organisation),
            notes: optional(self.notes),
        })
    }
}

/// Blank optional text is treated as absent
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a problem id taken from the path
pub fn parse_problem_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidInput(format!("Invalid problem id: {raw}")))
}
