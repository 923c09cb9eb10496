use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{NewSubmission, Submission};

use super::client::{ApiClient, ClientError};
use super::session::SessionContext;
use super::state::{ListView, Notification, Tone, ViewState};

pub const SUBMISSIONS_ERROR: &str = "Error al obtener entregas";
pub const SUBMISSIONS_EMPTY: &str = "No has realizado ninguna entrega todavía.";
pub const INVALID_ASSIGNMENT_ID: &str = "Por favor introduce un ID de tarea válido";
pub const SUBMIT_SUCCESS: &str = "Tarea entregada con éxito";
pub const SUBMIT_ERROR: &str = "Error al entregar tarea";
pub const UNGRADED: &str = "Sin calificar";

pub fn grade_display(submission: &Submission) -> String {
    match submission.grade {
        Some(grade) => grade.to_string(),
        None => UNGRADED.to_string(),
    }
}

pub fn status_label(submission: &Submission) -> (&'static str, Tone) {
    match submission.grade {
        Some(_) => ("Calificado", Tone::Success),
        None => ("Pendiente", Tone::Warning),
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionsList {
    pub list: ListView<Submission>,
    /// Raw text of the assignment id input.
    pub assignment_id: String,
    pub notification: Option<Notification>,
    pub submitting: bool,
}

impl Default for SubmissionsList {
    fn default() -> Self {
        Self {
            list: ListView::new(SUBMISSIONS_ERROR, SUBMISSIONS_EMPTY),
            assignment_id: String::new(),
            notification: None,
            submitting: false,
        }
    }
}

impl SubmissionsList {
    pub async fn load(&mut self, client: &ApiClient, session: &SessionContext) {
        self.list.load(client, session, "submissions").await;
    }

    pub fn state(&self) -> ViewState<'_, Submission> {
        self.list.state()
    }

    pub fn count_label(&self) -> String {
        format!("{} entregas", self.list.len())
    }

    /// Checks the form before anything is sent.
    pub fn prepare(&self, now: DateTime<Utc>) -> Result<NewSubmission, &'static str> {
        match self.assignment_id.trim().parse::<i64>() {
            Ok(assignment_id) if assignment_id > 0 => Ok(NewSubmission {
                assignment_id,
                submitted_at: Some(now),
            }),
            _ => Err(INVALID_ASSIGNMENT_ID),
        }
    }

    pub fn apply(&mut self, result: Result<Submission, ClientError>) {
        self.submitting = false;
        match result {
            Ok(submission) => {
                self.list.append(submission);
                self.assignment_id.clear();
                self.notification = Some(Notification::success(SUBMIT_SUCCESS));
            }
            Err(err) => {
                warn!(error = %err, "Submission failed");
                self.notification = Some(Notification::error(SUBMIT_ERROR));
            }
        }
    }

    pub async fn submit(&mut self, client: &ApiClient, session: &SessionContext, now: DateTime<Utc>) {
        self.notification = None;

        let new = match self.prepare(now) {
            Ok(new) => new,
            Err(message) => {
                self.notification = Some(Notification::error(message));
                return;
            }
        };

        self.submitting = true;
        let result = client
            .post::<_, Submission>(session, "submissions", &new)
            .await;
        self.apply(result);
    }
}
