//! Problem list filtering
//!
//! Filters run over an already-fetched collection. Every non-empty filter
//! must match; blank filters match everything.

use serde::Deserialize;

use crate::models::Problem;

/// Keyword / department / organisation filter for problem listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemFilter {
    /// Case-insensitive substring of any keyword
    pub keyword: Option<String>,
    /// Exact member of `departments`
    pub department: Option<String>,
    /// Case-insensitive substring of `organisation`
    pub organisation: Option<String>,
}

impl ProblemFilter {
    pub fn by_department(department: Option<String>) -> Self {
        Self {
            department,
            ..Self::default()
        }
    }

    pub fn matches(&self, problem: &Problem) -> bool {
        let keyword_ok = active(&self.keyword).is_none_or(|needle| {
            let needle = needle.to_lowercase();
            problem
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&needle))
        });

        let department_ok = active(&self.department)
            .is_none_or(|dept| problem.departments.iter().any(|d| d == dept));

        let organisation_ok = active(&self.organisation).is_none_or(|needle| {
            problem
                .organisation
                .as_deref()
                .is_some_and(|org| org.to_lowercase().contains(&needle.to_lowercase()))
        });

        keyword_ok && department_ok && organisation_ok
    }

    /// Keep the matching problems, preserving order
    pub fn apply(&self, problems: Vec<Problem>) -> Vec<Problem> {
        problems.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// A filter value that actually constrains the result
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
