//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::messages::ui_events::{
    EnrollmentField, InputMode, LookupField, Panel, RegistrationField,
};
use crate::messages::RenderState;
use crate::models::Student;

/// Roster View state.
///
/// The roster is replaced wholesale by each successful load; a failed load
/// leaves it untouched. Overlapping refreshes are allowed and the response
/// that resolves last wins.
#[derive(Clone, Debug, Default)]
pub struct RosterState {
    pub students: Vec<Student>,
    pub last_refreshed: Option<DateTime<Local>>,
    pub in_flight: u32,
    pub scroll: u16,
}

/// Grade Lookup state.
///
/// `grade` and `error` are mutually exclusive: every transition that sets
/// one clears the other.
#[derive(Clone, Debug, Default)]
pub struct LookupState {
    pub student_id: String,
    pub course_name: String,
    pub field: LookupField,
    pub grade: Option<f64>,
    pub error: Option<String>,
    pub in_flight: u32,
}

/// Course Enrollment Form state
#[derive(Clone, Debug, Default)]
pub struct EnrollmentState {
    pub course_name: String,
    pub student_id: String,
    pub grade_id: String,
    pub field: EnrollmentField,
    pub in_flight: u32,
}

/// Student Registration Form state.
///
/// Same exclusivity invariant as the lookup: success and error messages
/// never coexist.
#[derive(Clone, Debug, Default)]
pub struct RegistrationState {
    pub name: String,
    pub email: String,
    pub field: RegistrationField,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub in_flight: u32,
}

/// Main application state - pure data, no I/O.
///
/// The four components own their state records exclusively; nothing is
/// shared between them and nothing here is persisted.
pub struct AppState {
    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Per-component state records
    pub roster: RosterState,
    pub lookup: LookupState,
    pub enrollment: EnrollmentState,
    pub registration: RegistrationState,

    pub next_request_id: u64,

    // Popups
    pub show_help: bool,
    pub notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            active_panel: Panel::Roster,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            roster: RosterState::default(),
            lookup: LookupState::default(),
            enrollment: EnrollmentState::default(),
            registration: RegistrationState::default(),
            next_request_id: 1,
            show_help: false,
            notice: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Roster => "",
            Panel::Lookup => match self.lookup.field {
                LookupField::StudentId => &self.lookup.student_id,
                LookupField::CourseName => &self.lookup.course_name,
            },
            Panel::Enrollment => match self.enrollment.field {
                EnrollmentField::CourseName => &self.enrollment.course_name,
                EnrollmentField::StudentId => &self.enrollment.student_id,
                EnrollmentField::GradeId => &self.enrollment.grade_id,
            },
            Panel::Registration => match self.registration.field {
                RegistrationField::Name => &self.registration.name,
                RegistrationField::Email => &self.registration.email,
            },
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Roster => None,
            Panel::Lookup => Some(match self.lookup.field {
                LookupField::StudentId => &mut self.lookup.student_id,
                LookupField::CourseName => &mut self.lookup.course_name,
            }),
            Panel::Enrollment => Some(match self.enrollment.field {
                EnrollmentField::CourseName => &mut self.enrollment.course_name,
                EnrollmentField::StudentId => &mut self.enrollment.student_id,
                EnrollmentField::GradeId => &mut self.enrollment.grade_id,
            }),
            Panel::Registration => Some(match self.registration.field {
                RegistrationField::Name => &mut self.registration.name,
                RegistrationField::Email => &mut self.registration.email,
            }),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            students: self.roster.students.clone(),
            roster_loading: self.roster.in_flight > 0,
            roster_scroll: self.roster.scroll,
            last_refreshed: self
                .roster
                .last_refreshed
                .map(|t| t.format("%H:%M:%S").to_string()),
            lookup_student_id: self.lookup.student_id.clone(),
            lookup_course_name: self.lookup.course_name.clone(),
            lookup_field: self.lookup.field,
            lookup_grade: self.lookup.grade,
            lookup_error: self.lookup.error.clone(),
            lookup_loading: self.lookup.in_flight > 0,
            enrollment_course_name: self.enrollment.course_name.clone(),
            enrollment_student_id: self.enrollment.student_id.clone(),
            enrollment_grade_id: self.enrollment.grade_id.clone(),
            enrollment_field: self.enrollment.field,
            enrollment_loading: self.enrollment.in_flight > 0,
            registration_name: self.registration.name.clone(),
            registration_email: self.registration.email.clone(),
            registration_field: self.registration.field,
            registration_success: self.registration.success_message.clone(),
            registration_error: self.registration.error_message.clone(),
            registration_loading: self.registration.in_flight > 0,
            show_help: self.show_help,
            notice: self.notice.clone(),
        }
    }
}
