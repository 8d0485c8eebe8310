//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default public base URL, used when building links sent to users
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

// =============================================================================
// STORE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default lifetime of the session and role cookies, in days
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;
pub const MAX_SESSION_TTL_DAYS: i64 = 365;

/// Default lifetime of a password reset token, in minutes
pub const DEFAULT_RESET_TOKEN_TTL_MINUTES: i64 = 30;
pub const MAX_RESET_TOKEN_TTL_MINUTES: i64 = 24 * 60;

/// Length of the random part of a password reset token
pub const RESET_TOKEN_LENGTH: usize = 48;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Header carrying the shared edit code for the all-problems view
pub const EDIT_CODE_HEADER: &str = "x-edit-code";

// =============================================================================
// COOKIES
// =============================================================================

/// Cookie names
pub mod cookies {
    /// Client-visible role indicator read by the route guard
    pub const USER_ROLE: &str = "userRole";

    /// HttpOnly cookie carrying the signed session token
    pub const SESSION: &str = "session";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const STUDENT: &str = "student";
}

// =============================================================================
// PAGES
// =============================================================================

/// Well-known page paths
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const MAIN: &str = "/main";
    pub const ADMIN: &str = "/admin";
    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
    pub const PROFILE: &str = "/profile";
    pub const DETAILS: &str = "/details";
    pub const BOOKMARKED: &str = "/bookmarked";
    pub const INTERESTED: &str = "/interested";

    /// Where the route guard sends every denied request
    pub const GUARD_FALLBACK: &str = HOME;
}

// =============================================================================
// PROBLEM CATALOGUE
// =============================================================================

/// Departments offered by the submission form
pub const DEPARTMENTS: &[&str] = &[
    "Applied Chemistry",
    "Applied Mathematics",
    "Applied Physics",
    "Biotechnology",
    "Civil Engineering",
    "Computer Engineering",
    "Design",
    "Electrical Engineering",
    "Electronics & Communication",
    "Environmental Engineering",
    "Information Technology",
    "Mechanical Engineering",
    "Polymer Science",
    "Production & Industrial",
    "Software Engineering",
    "Management",
    "Economics",
];

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem statement length
pub const MAX_PROBLEM_STATEMENT_LENGTH: u64 = 65535;

// =============================================================================
// BRANDING
// =============================================================================

/// Application name shown on the landing page
pub const APP_NAME: &str = "ProRep";

/// Landing page tagline
pub const APP_TAGLINE: &str = "Solve what matters. Empower real change with ProRep.";
