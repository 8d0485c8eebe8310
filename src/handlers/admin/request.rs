//! Admin request DTOs

use serde::Deserialize;

use crate::handlers::problems::UpdateProblemRequest;

/// Owner edit from the profile page; the password is re-checked
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub password: String,

    #[serde(flatten)]
    pub changes: UpdateProblemRequest,
}
