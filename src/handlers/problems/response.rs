//! Problem response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CreatedBy, Problem};

/// Problem as returned to clients. Member uid lists are reduced to counts.
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub id: Uuid,
    pub title: String,
    pub domain: Option<String>,
    pub statement: String,
    pub departments: Vec<String>,
    pub keywords: Vec<String>,
    pub source: Option<String>,
    pub source_link: Option<String>,
    pub organisation: Option<String>,
    pub notes: Option<String>,
    pub created_by: CreatedBy,
    pub bookmark_count: usize,
    pub interest_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Problem> for ProblemResponse {
    fn from(p: Problem) -> Self {
        Self {
            bookmark_count: p.bookmarks.len(),
            interest_count: p.interested.len(),
            id: p.id,
            title: p.title,
            domain: p.domain,
            statement: p.statement,
            departments: p.departments,
            keywords: p.keywords,
            source: p.source,
            source_link: p.source_link,
            organisation: p.organisation,
            notes: p.notes,
            created_by: p.created_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsListResponse {
    pub problems: Vec<ProblemResponse>,
    pub total: usize,
}

impl From<Vec<Problem>> for ProblemsListResponse {
    fn from(problems: Vec<Problem>) -> Self {
        Self {
            total: problems.len(),
            problems: problems.into_iter().map(ProblemResponse::from).collect(),
        }
    }
}
