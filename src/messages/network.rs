//! Store messages - communication between App and Network layers

use thiserror::Error;

use crate::models::{NewEnrollment, NewStudent, Student};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum StoreCommand {
    /// Fetch the complete student roster
    FetchRoster { id: u64 },
    /// Point query for one student's grade in one course
    FetchGrade {
        id: u64,
        student_id: String,
        course_name: String,
    },
    /// Submit a new student record
    AddStudent { id: u64, student: NewStudent },
    /// Submit a new course enrollment
    AddEnrollment { id: u64, enrollment: NewEnrollment },
    /// Shutdown the store actor
    Shutdown,
}

/// A failed store operation.
///
/// Two classes only: the store answered with a failure status, or the call
/// never completed. Most components merge them when rendering; the
/// registration form is the one place that keeps them apart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The call completed but the status indicates failure. The body is
    /// kept because the store writes its rejection reason there as plain
    /// text.
    #[error("store rejected the request (status {status})")]
    Rejection { status: u16, body: String },
    /// The call itself failed: connection, DNS, or an unreadable body.
    #[error("{0}")]
    Transport(String),
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum StoreResponse {
    /// Result of a roster fetch
    Roster {
        id: u64,
        result: Result<Vec<Student>, StoreError>,
    },
    /// Result of a grade point query
    Grade {
        id: u64,
        result: Result<f64, StoreError>,
    },
    /// Result of a student registration
    StudentAdded {
        id: u64,
        result: Result<(), StoreError>,
    },
    /// Result of an enrollment submission
    EnrollmentAdded {
        id: u64,
        result: Result<(), StoreError>,
    },
}

impl StoreResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            StoreResponse::Roster { id, .. } => *id,
            StoreResponse::Grade { id, .. } => *id,
            StoreResponse::StudentAdded { id, .. } => *id,
            StoreResponse::EnrollmentAdded { id, .. } => *id,
        }
    }
}
