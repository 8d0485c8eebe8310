//! Student request DTOs

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct MainQuery {
    pub department: Option<String>,
}

/// `/details?pid=...`
#[derive(Debug, Default, Deserialize)]
pub struct DetailsQuery {
    pub pid: Option<String>,
}
