//! HTTP client wrapper - typed operations against the student records store

use std::time::Duration;

use crate::messages::StoreError;
use crate::models::{NewEnrollment, NewStudent, Student};

/// Classify a reqwest failure as a transport error with a readable message
fn transport_error(e: reqwest::Error) -> StoreError {
    let msg = if e.is_timeout() {
        "Request timed out (30s)".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    StoreError::Transport(msg)
}

/// Turn a completed non-success response into a rejection, capturing the
/// body since the store writes its reason there as plain text
async fn rejection(resp: reqwest::Response) -> StoreError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    StoreError::Rejection { status, body }
}

/// Client for the remote student records store.
///
/// Stateless besides the connection pool; one instance is shared by all
/// in-flight operations.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        StoreClient {
            http,
            base_url: base_url.into(),
        }
    }

    /// GET /api/students - the complete current roster
    pub async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let url = format!("{}/api/students", self.base_url);
        let resp = self.http.get(&url).send().await.map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| StoreError::Transport(format!("Error reading body: {}", e)))
    }

    /// GET /api/students/{sid}/courses/{course}/grade - point query for a
    /// single numeric grade. Path segments are the literal user strings.
    pub async fn grade_for_course(
        &self,
        student_id: &str,
        course_name: &str,
    ) -> Result<f64, StoreError> {
        let url = format!(
            "{}/api/students/{}/courses/{}/grade",
            self.base_url, student_id, course_name
        );
        let resp = self.http.get(&url).send().await.map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| StoreError::Transport(format!("Error reading body: {}", e)))
    }

    /// POST /api/students - register a new student
    pub async fn add_student(&self, student: &NewStudent) -> Result<(), StoreError> {
        let url = format!("{}/api/students", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(student)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        Ok(())
    }

    /// POST /api/courses - submit a course enrollment
    pub async fn add_enrollment(&self, enrollment: &NewEnrollment) -> Result<(), StoreError> {
        let url = format!("{}/api/courses", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(enrollment)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        Ok(())
    }
}
