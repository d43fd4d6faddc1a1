//! # Gradebook TUI
//!
//! A terminal client for a remote student records service.
//!
//! ## Features
//! - Student roster with store-computed GPA and enrolled courses
//! - Grade lookup by student and course
//! - Course enrollment submission
//! - Student registration
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)
//!
//! The client owns no persistent record state: the store is authoritative
//! for identifiers, GPA computation, and validation. Every component
//! renders purely from its own transient state record.

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use messages::{RenderState, StoreCommand, StoreError, StoreResponse, UiEvent};
pub use models::{CourseSummary, EntityRef, GradeLevel, NewEnrollment, NewStudent, Student};
pub use network::{StoreActor, StoreClient};
