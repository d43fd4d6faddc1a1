//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{
    EnrollmentField, InputMode, LookupField, Panel, RegistrationField,
};
use crate::models::Student;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Roster View
    pub students: Vec<Student>,
    pub roster_loading: bool,
    pub roster_scroll: u16,
    /// Local wall-clock time of the last successful roster load, preformatted
    pub last_refreshed: Option<String>,

    // Grade Lookup
    pub lookup_student_id: String,
    pub lookup_course_name: String,
    pub lookup_field: LookupField,
    pub lookup_grade: Option<f64>,
    pub lookup_error: Option<String>,
    pub lookup_loading: bool,

    // Course Enrollment Form
    pub enrollment_course_name: String,
    pub enrollment_student_id: String,
    pub enrollment_grade_id: String,
    pub enrollment_field: EnrollmentField,
    pub enrollment_loading: bool,

    // Student Registration Form
    pub registration_name: String,
    pub registration_email: String,
    pub registration_field: RegistrationField,
    pub registration_success: Option<String>,
    pub registration_error: Option<String>,
    pub registration_loading: bool,

    // Popups
    pub show_help: bool,
    pub notice: Option<String>,
}
