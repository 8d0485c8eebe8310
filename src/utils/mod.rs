//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::{generate_secure_token, hash_string};
pub use validation::{clean_list, normalize_email, validate_departments};
