//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL for the student records store
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the configured base URL
pub const BASE_URL_ENV: &str = "GRADEBOOK_BASE_URL";

/// Placeholder shown for students with no enrolled courses
pub const NO_COURSES_SENTINEL: &str = "No courses enrolled";

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Gradebook TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
