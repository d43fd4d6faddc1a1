//! Command handlers - state transitions for UI events and store responses

use chrono::Local;

use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{StoreCommand, StoreError, StoreResponse};
use crate::models::{EntityRef, NewEnrollment, NewStudent};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.active_panel == Panel::Roster {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        match self.active_panel {
            Panel::Roster => {}
            Panel::Lookup => self.lookup.field = self.lookup.field.next(),
            Panel::Enrollment => self.enrollment.field = self.enrollment.field.next(),
            Panel::Registration => self.registration.field = self.registration.field.next(),
        }
        self.cursor_position = self.current_input().len();
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Roster scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        if self.active_panel == Panel::Roster {
            self.roster.scroll = self.roster.scroll.saturating_sub(1);
        }
    }

    pub fn scroll_down(&mut self) {
        if self.active_panel == Panel::Roster {
            self.roster.scroll = self.roster.scroll.saturating_add(1);
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ========================
    // Store operations
    // ========================

    /// Issue a roster load. Overlapping refreshes are permitted; no
    /// de-duplication and no cancellation of the older request.
    pub fn refresh_roster(&mut self) -> StoreCommand {
        self.roster.in_flight = self.roster.in_flight.saturating_add(1);
        StoreCommand::FetchRoster { id: self.next_id() }
    }

    /// Submit whatever the active panel holds. Roster has nothing to submit.
    pub fn submit(&mut self) -> Option<StoreCommand> {
        match self.active_panel {
            Panel::Roster => None,
            Panel::Lookup => self.submit_lookup(),
            Panel::Enrollment => Some(self.submit_enrollment()),
            Panel::Registration => Some(self.submit_registration()),
        }
    }

    /// Grade lookup. Both inputs must be non-empty after trimming; a
    /// violation is a local validation error and no command is issued.
    pub fn submit_lookup(&mut self) -> Option<StoreCommand> {
        let student_id = self.lookup.student_id.trim().to_string();
        let course_name = self.lookup.course_name.trim().to_string();

        if student_id.is_empty() || course_name.is_empty() {
            self.lookup.error =
                Some(String::from("Please provide both Student ID and Course Name."));
            self.lookup.grade = None;
            return None;
        }

        self.lookup.in_flight = self.lookup.in_flight.saturating_add(1);
        Some(StoreCommand::FetchGrade {
            id: self.next_id(),
            student_id,
            course_name,
        })
    }

    /// Course enrollment. Ids go through a fallible parse; non-numeric
    /// input is forwarded as a null reference for the store to reject.
    pub fn submit_enrollment(&mut self) -> StoreCommand {
        self.enrollment.in_flight = self.enrollment.in_flight.saturating_add(1);
        StoreCommand::AddEnrollment {
            id: self.next_id(),
            enrollment: NewEnrollment {
                name: self.enrollment.course_name.clone(),
                student: EntityRef::parse(&self.enrollment.student_id),
                grade: EntityRef::parse(&self.enrollment.grade_id),
            },
        }
    }

    /// Student registration.
    pub fn submit_registration(&mut self) -> StoreCommand {
        self.registration.in_flight = self.registration.in_flight.saturating_add(1);
        StoreCommand::AddStudent {
            id: self.next_id(),
            student: NewStudent {
                name: self.registration.name.clone(),
                email: self.registration.email.clone(),
            },
        }
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a store response to the owning component's state.
    ///
    /// Responses are applied in arrival order: with overlapping requests the
    /// one that resolves last determines the final state, regardless of
    /// issue order. Request ids are carried for log correlation only.
    pub fn handle_response(&mut self, response: StoreResponse) {
        match response {
            StoreResponse::Roster { id, result } => {
                self.roster.in_flight = self.roster.in_flight.saturating_sub(1);
                match result {
                    Ok(students) => {
                        self.roster.students = students;
                        self.roster.last_refreshed = Some(Local::now());
                    }
                    Err(e) => {
                        // Soft failure: keep the prior roster, log only
                        tracing::error!(id, error = %e, "Error fetching student data");
                    }
                }
            }
            StoreResponse::Grade { result, .. } => {
                self.lookup.in_flight = self.lookup.in_flight.saturating_sub(1);
                match result {
                    Ok(grade) => {
                        self.lookup.grade = Some(grade);
                        self.lookup.error = None;
                    }
                    Err(e) => {
                        // Not-found and unreachable are deliberately merged here
                        self.lookup.grade = None;
                        self.lookup.error = Some(match e {
                            StoreError::Rejection { .. } => {
                                String::from("Unable to fetch grade. Please check the inputs.")
                            }
                            StoreError::Transport(msg) => msg,
                        });
                    }
                }
            }
            StoreResponse::EnrollmentAdded { result, .. } => {
                self.enrollment.in_flight = self.enrollment.in_flight.saturating_sub(1);
                match result {
                    Ok(()) => {
                        self.notice = Some(String::from("Course added successfully!"));
                        self.enrollment.course_name.clear();
                        self.enrollment.student_id.clear();
                        self.enrollment.grade_id.clear();
                        self.cursor_position = 0;
                    }
                    Err(StoreError::Rejection { .. }) => {
                        self.notice = Some(String::from("Error adding course. Please try again."));
                    }
                    Err(StoreError::Transport(_)) => {
                        self.notice = Some(String::from("Failed to add course."));
                    }
                }
            }
            StoreResponse::StudentAdded { result, .. } => {
                self.registration.in_flight = self.registration.in_flight.saturating_sub(1);
                match result {
                    Ok(()) => {
                        self.registration.success_message =
                            Some(String::from("Student added successfully!"));
                        self.registration.error_message = None;
                        self.registration.name.clear();
                        self.registration.email.clear();
                        self.cursor_position = 0;
                    }
                    Err(StoreError::Rejection { body, .. }) => {
                        // The store's rejection text passes through verbatim
                        self.registration.error_message = Some(body);
                        self.registration.success_message = None;
                    }
                    Err(StoreError::Transport(msg)) => {
                        self.registration.error_message =
                            Some(format!("Error adding student: {}", msg));
                        self.registration.success_message = None;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Student;

    fn student(id: i64, name: &str, gpa: f64) -> Student {
        Student {
            id,
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            gpa,
            courses: Vec::new(),
        }
    }

    fn roster_ok(id: u64, students: Vec<Student>) -> StoreResponse {
        StoreResponse::Roster {
            id,
            result: Ok(students),
        }
    }

    #[test]
    fn test_lookup_with_blank_input_never_issues_command() {
        let mut state = AppState::new();
        state.lookup.student_id = String::from("   ");
        state.lookup.course_name = String::from("Algorithms");

        assert!(state.submit_lookup().is_none());
        assert!(state.lookup.error.is_some());
        assert_eq!(state.lookup.grade, None);
        assert_eq!(state.lookup.in_flight, 0);
    }

    #[test]
    fn test_lookup_trims_inputs_before_sending() {
        let mut state = AppState::new();
        state.lookup.student_id = String::from(" 42 ");
        state.lookup.course_name = String::from("Algorithms");

        match state.submit_lookup() {
            Some(StoreCommand::FetchGrade {
                student_id,
                course_name,
                ..
            }) => {
                assert_eq!(student_id, "42");
                assert_eq!(course_name, "Algorithms");
            }
            other => panic!("expected FetchGrade, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_success_sets_grade_and_clears_error() {
        let mut state = AppState::new();
        state.lookup.error = Some(String::from("old error"));

        state.handle_response(StoreResponse::Grade {
            id: 1,
            result: Ok(3.5),
        });

        assert_eq!(state.lookup.grade, Some(3.5));
        assert_eq!(state.lookup.error, None);
    }

    #[test]
    fn test_lookup_failure_clears_prior_grade() {
        let mut state = AppState::new();
        state.lookup.grade = Some(4.0);

        state.handle_response(StoreResponse::Grade {
            id: 1,
            result: Err(StoreError::Rejection {
                status: 500,
                body: String::new(),
            }),
        });

        assert_eq!(state.lookup.grade, None);
        assert_eq!(
            state.lookup.error.as_deref(),
            Some("Unable to fetch grade. Please check the inputs.")
        );
    }

    #[test]
    fn test_lookup_transport_failure_shows_transport_reason() {
        let mut state = AppState::new();

        state.handle_response(StoreResponse::Grade {
            id: 1,
            result: Err(StoreError::Transport(String::from("Connection refused"))),
        });

        assert_eq!(state.lookup.error.as_deref(), Some("Connection refused"));
        assert_eq!(state.lookup.grade, None);
    }

    #[test]
    fn test_registration_success_clears_fields_and_error() {
        let mut state = AppState::new();
        state.registration.name = String::from("Ada");
        state.registration.email = String::from("ada@x.com");
        state.registration.error_message = Some(String::from("old"));

        state.handle_response(StoreResponse::StudentAdded {
            id: 1,
            result: Ok(()),
        });

        assert!(state.registration.name.is_empty());
        assert!(state.registration.email.is_empty());
        assert!(state.registration.success_message.is_some());
        assert_eq!(state.registration.error_message, None);
    }

    #[test]
    fn test_registration_rejection_body_passes_through_verbatim() {
        let mut state = AppState::new();
        state.registration.success_message = Some(String::from("old"));

        state.handle_response(StoreResponse::StudentAdded {
            id: 1,
            result: Err(StoreError::Rejection {
                status: 400,
                body: String::from("email already exists"),
            }),
        });

        assert_eq!(
            state.registration.error_message.as_deref(),
            Some("email already exists")
        );
        assert_eq!(state.registration.success_message, None);
    }

    #[test]
    fn test_registration_transport_failure_gets_generic_prefix() {
        let mut state = AppState::new();

        state.handle_response(StoreResponse::StudentAdded {
            id: 1,
            result: Err(StoreError::Transport(String::from("connection reset"))),
        });

        assert_eq!(
            state.registration.error_message.as_deref(),
            Some("Error adding student: connection reset")
        );
    }

    #[test]
    fn test_registration_fields_retained_on_failure() {
        let mut state = AppState::new();
        state.registration.name = String::from("Ada");
        state.registration.email = String::from("ada@x.com");

        state.handle_response(StoreResponse::StudentAdded {
            id: 1,
            result: Err(StoreError::Rejection {
                status: 400,
                body: String::from("email already exists"),
            }),
        });

        assert_eq!(state.registration.name, "Ada");
        assert_eq!(state.registration.email, "ada@x.com");
    }

    #[test]
    fn test_enrollment_success_clears_all_three_fields() {
        let mut state = AppState::new();
        state.enrollment.course_name = String::from("CS101");
        state.enrollment.student_id = String::from("7");
        state.enrollment.grade_id = String::from("2");

        state.handle_response(StoreResponse::EnrollmentAdded {
            id: 1,
            result: Ok(()),
        });

        assert!(state.enrollment.course_name.is_empty());
        assert!(state.enrollment.student_id.is_empty());
        assert!(state.enrollment.grade_id.is_empty());
        assert_eq!(state.notice.as_deref(), Some("Course added successfully!"));
    }

    #[test]
    fn test_enrollment_failure_retains_submitted_values() {
        let mut state = AppState::new();
        state.enrollment.course_name = String::from("CS101");
        state.enrollment.student_id = String::from("7");
        state.enrollment.grade_id = String::from("2");

        state.handle_response(StoreResponse::EnrollmentAdded {
            id: 1,
            result: Err(StoreError::Rejection {
                status: 500,
                body: String::new(),
            }),
        });

        assert_eq!(state.enrollment.course_name, "CS101");
        assert_eq!(state.enrollment.student_id, "7");
        assert_eq!(state.enrollment.grade_id, "2");
        assert_eq!(
            state.notice.as_deref(),
            Some("Error adding course. Please try again.")
        );
    }

    #[test]
    fn test_enrollment_submits_unparseable_ids_as_null_refs() {
        let mut state = AppState::new();
        state.active_panel = Panel::Enrollment;
        state.enrollment.course_name = String::from("CS101");
        state.enrollment.student_id = String::from("seven");
        state.enrollment.grade_id = String::from("2");

        match state.submit() {
            Some(StoreCommand::AddEnrollment { enrollment, .. }) => {
                assert_eq!(enrollment.student.id, None);
                assert_eq!(enrollment.grade.id, Some(2));
            }
            other => panic!("expected AddEnrollment, got {:?}", other),
        }
    }

    #[test]
    fn test_roster_last_resolved_response_wins() {
        let mut state = AppState::new();
        let first = state.refresh_roster();
        let second = state.refresh_roster();
        let (first_id, second_id) = match (first, second) {
            (StoreCommand::FetchRoster { id: a }, StoreCommand::FetchRoster { id: b }) => (a, b),
            _ => unreachable!(),
        };

        // The second-issued request resolves first; the first-issued one
        // resolves later and wins.
        state.handle_response(roster_ok(second_id, vec![student(2, "Bob", 3.0)]));
        state.handle_response(roster_ok(first_id, vec![student(1, "Ada", 4.0)]));

        assert_eq!(state.roster.students.len(), 1);
        assert_eq!(state.roster.students[0].name, "Ada");
        assert_eq!(state.roster.in_flight, 0);
    }

    #[test]
    fn test_roster_failure_leaves_prior_roster_untouched() {
        let mut state = AppState::new();
        state.roster.students = vec![student(1, "Ada", 4.0)];

        state.handle_response(StoreResponse::Roster {
            id: 1,
            result: Err(StoreError::Transport(String::from("connection refused"))),
        });

        assert_eq!(state.roster.students.len(), 1);
        assert_eq!(state.roster.last_refreshed, None);
    }

    #[test]
    fn test_submit_in_roster_panel_is_a_no_op() {
        let mut state = AppState::new();
        assert!(state.submit().is_none());
    }

    #[test]
    fn test_editing_targets_the_active_field() {
        let mut state = AppState::new();
        state.active_panel = Panel::Lookup;
        state.start_editing();
        state.enter_char('4');
        state.enter_char('2');
        state.next_field();
        state.enter_char('C');

        assert_eq!(state.lookup.student_id, "42");
        assert_eq!(state.lookup.course_name, "C");
    }
}
