//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ListField;

/// Who submitted a problem
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CreatedBy {
    #[sqlx(rename = "created_by_uid")]
    pub uid: Uuid,
    #[sqlx(rename = "created_by_email")]
    pub email: String,
}

/// Problem statement record
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
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
    #[sqlx(flatten)]
    pub created_by: CreatedBy,
    /// Ids of users who bookmarked this problem
    pub bookmarks: Vec<Uuid>,
    /// Ids of users interested in this problem
    pub interested: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// The uid list behind `field`
    pub fn list(&self, field: ListField) -> &[Uuid] {
        match field {
            ListField::Bookmarks => &self.bookmarks,
            ListField::Interested => &self.interested,
        }
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.created_by.uid == *user_id
    }
}

/// Input for creating a problem
#[derive(Debug, Clone, Default)]
pub struct NewProblem {
    pub title: String,
    pub domain: Option<String>,
    pub statement: String,
    pub departments: Vec<String>,
    pub keywords: Vec<String>,
    pub source: Option<String>,
    pub source_link: Option<String>,
    pub organisation: Option<String>,
    pub notes: Option<String>,
}

/// Partial update of a problem; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemPatch {
    pub title: Option<String>,
    pub domain: Option<String>,
    pub statement: Option<String>,
    pub departments: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub source: Option<String>,
    pub source_link: Option<String>,
    pub organisation: Option<String>,
    pub notes: Option<String>,
}

impl ProblemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.domain.is_none()
            && self.statement.is_none()
            && self.departments.is_none()
            && self.keywords.is_none()
            && self.source.is_none()
            && self.source_link.is_none()
            && self.organisation.is_none()
            && self.notes.is_none()
    }

    /// Apply the patch in place
    pub fn apply(self, problem: &mut Problem) {
        if let Some(title) = self.title {
            problem.title = title;
        }
        if let Some(statement) = self.statement {
            problem.statement = statement;
        }
        if let Some(departments) = self.departments {
            problem.departments = departments;
        }
        if let Some(keywords) = self.keywords {
            problem.keywords = keywords;
        }
        if self.domain.is_some() {
            problem.domain = self.domain;
        }
        if self.source.is_some() {
            problem.source = self.source;
        }
        if self.source_link.is_some() {
            problem.source_link = self.source_link;
        }
        if self.organisation.is_some() {
            problem.organisation = self.organisation;
        }
        if self.notes.is_some() {
            problem.notes = self.notes;
        }
    }
}

/// Outcome of a membership toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub problem_id: Uuid,
    pub list: ListField,
    /// Whether the problem is in the list after the toggle
    pub member: bool,
}
