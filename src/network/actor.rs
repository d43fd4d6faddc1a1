//! Store actor - executes store operations in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{StoreCommand, StoreResponse};
use crate::network::client::StoreClient;

/// Network actor that processes store commands.
///
/// Each command is executed on its own spawned task so a slow response
/// never blocks the command loop; responses are sent back to the app layer
/// as they resolve, in completion order. Nothing is cancelled: a
/// superseded request simply resolves later (or never).
pub struct StoreActor {
    client: StoreClient,
    response_tx: mpsc::UnboundedSender<StoreResponse>,
    active_requests: JoinSet<()>,
}

impl StoreActor {
    pub fn new(client: StoreClient, response_tx: mpsc::UnboundedSender<StoreResponse>) -> Self {
        StoreActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the store actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<StoreCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(StoreCommand::FetchRoster { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Fetching student roster");
                                let result = client.list_students().await;
                                tracing::info!(id, ok = result.is_ok(), "Roster fetch completed");
                                let _ = response_tx.send(StoreResponse::Roster { id, result });
                            });
                        }

                        Some(StoreCommand::FetchGrade { id, student_id, course_name }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, %student_id, %course_name, "Fetching grade");
                                let result = client
                                    .grade_for_course(&student_id, &course_name)
                                    .await;
                                tracing::info!(id, ok = result.is_ok(), "Grade fetch completed");
                                let _ = response_tx.send(StoreResponse::Grade { id, result });
                            });
                        }

                        Some(StoreCommand::AddStudent { id, student }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, name = %student.name, "Adding student");
                                let result = client.add_student(&student).await;
                                tracing::info!(id, ok = result.is_ok(), "Add student completed");
                                let _ = response_tx.send(StoreResponse::StudentAdded { id, result });
                            });
                        }

                        Some(StoreCommand::AddEnrollment { id, enrollment }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, course = %enrollment.name, "Adding enrollment");
                                let result = client.add_enrollment(&enrollment).await;
                                tracing::info!(id, ok = result.is_ok(), "Add enrollment completed");
                                let _ = response_tx.send(StoreResponse::EnrollmentAdded { id, result });
                            });
                        }

                        Some(StoreCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
