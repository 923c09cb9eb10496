use chrono::{DateTime, Utc};

use crate::models::Assignment;

use super::client::ApiClient;
use super::deadline::{DeadlineStatus, classify};
use super::session::SessionContext;
use super::state::{ListView, Tone, ViewState};

pub const ASSIGNMENTS_ERROR: &str = "Error al obtener las tareas";
pub const ASSIGNMENTS_EMPTY: &str = "No hay tareas asignadas en este momento.";

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow<'a> {
    pub assignment: &'a Assignment,
    pub status: DeadlineStatus,
}

impl AssignmentRow<'_> {
    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    pub fn tone(&self) -> Tone {
        self.status.tone()
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentsList {
    pub list: ListView<Assignment>,
}

impl Default for AssignmentsList {
    fn default() -> Self {
        Self {
            list: ListView::new(ASSIGNMENTS_ERROR, ASSIGNMENTS_EMPTY),
        }
    }
}

impl AssignmentsList {
    pub async fn load(&mut self, client: &ApiClient, session: &SessionContext) {
        self.list.load(client, session, "assignments").await;
    }

    pub fn state(&self) -> ViewState<'_, Assignment> {
        self.list.state()
    }

    /// Rows classified against `now`; empty unless the list is ready.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<AssignmentRow<'_>> {
        match self.list.state() {
            ViewState::Ready(items) => items
                .iter()
                .map(|assignment| AssignmentRow {
                    assignment,
                    status: classify(assignment.due_date, now),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
