//! Input normalization and validation helpers

use crate::{constants::DEPARTMENTS, error::AppError};

/// Canonical form of an email address: trimmed, lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Every department must come from the fixed catalogue
pub fn validate_departments(departments: &[String]) -> Result<(), AppError> {
    match departments.iter().find(|d| !DEPARTMENTS.contains(&d.as_str())) {
        Some(unknown) => Err(AppError::Validation(format!("Unknown department: {unknown}"))),
        None => Ok(()),
    }
}

/// Trim entries, drop blanks and duplicates, keep first-seen order
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}
