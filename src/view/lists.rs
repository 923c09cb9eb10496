use crate::models::{Course, Subject};

use super::client::ApiClient;
use super::session::SessionContext;
use super::state::{ListView, ViewState};

pub const COURSES_ERROR: &str = "Failed to fetch courses";
pub const COURSES_EMPTY: &str = "No hay cursos disponibles en este momento.";
pub const SUBJECTS_ERROR: &str = "Error al obtener las asignaturas";
pub const SUBJECTS_EMPTY: &str = "No hay asignaturas disponibles en este momento.";

#[derive(Debug, Clone)]
pub struct CoursesList {
    pub list: ListView<Course>,
}

impl Default for CoursesList {
    fn default() -> Self {
        Self {
            list: ListView::new(COURSES_ERROR, COURSES_EMPTY),
        }
    }
}

impl CoursesList {
    pub async fn load(&mut self, client: &ApiClient, session: &SessionContext) {
        self.list.load(client, session, "courses").await;
    }

    pub fn state(&self) -> ViewState<'_, Course> {
        self.list.state()
    }

    pub fn count_label(&self) -> String {
        format!("{} cursos", self.list.len())
    }
}

#[derive(Debug, Clone)]
pub struct SubjectsList {
    pub list: ListView<Subject>,
}

impl Default for SubjectsList {
    fn default() -> Self {
        Self {
            list: ListView::new(SUBJECTS_ERROR, SUBJECTS_EMPTY),
        }
    }
}

impl SubjectsList {
    pub async fn load(&mut self, client: &ApiClient, session: &SessionContext) {
        self.list.load(client, session, "subjects").await;
    }

    pub fn state(&self) -> ViewState<'_, Subject> {
        self.list.state()
    }

    pub fn count_label(&self) -> String {
        format!("{} asignaturas", self.list.len())
    }
}
