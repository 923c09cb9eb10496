use tracing::warn;

use super::client::{ApiClient, ClientError};
use super::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { path: "/", label: "Inicio" },
    NavItem { path: "/courses", label: "Cursos" },
    NavItem { path: "/subjects", label: "Asignaturas" },
    NavItem { path: "/assignments", label: "Tareas" },
    NavItem { path: "/submissions", label: "Entregas" },
    NavItem { path: "/messages", label: "Mensajes" },
];

pub const LOGOUT_LABEL: &str = "Cerrar Sesión";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCard {
    pub title: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const DASHBOARD_TITLE: &str = "Bienvenido a Laredu CRM";

pub const DASHBOARD_CARDS: [DashboardCard; 5] = [
    DashboardCard {
        title: "Cursos",
        path: "/courses",
        icon: "📚",
        description: "Gestión de cursos académicos",
    },
    DashboardCard {
        title: "Asignaturas",
        path: "/subjects",
        icon: "📖",
        description: "Todas las materias por curso",
    },
    DashboardCard {
        title: "Tareas",
        path: "/assignments",
        icon: "✏️",
        description: "Actividades pendientes",
    },
    DashboardCard {
        title: "Entregas",
        path: "/submissions",
        icon: "📝",
        description: "Control de entregas realizadas",
    },
    DashboardCard {
        title: "Mensajes",
        path: "/messages",
        icon: "💬",
        description: "Comunicación interna",
    },
];

/// Navigation bar bound to the current location.
#[derive(Debug, Clone)]
pub struct Navbar {
    current_path: String,
}

impl Navbar {
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
        }
    }

    pub fn items(&self) -> &'static [NavItem] {
        &NAV_ITEMS
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }

    pub fn navigate(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }

    /// Consumes the session. A failed request is logged and the local session
    /// ends anyway.
    pub async fn logout(
        &mut self,
        client: &ApiClient,
        session: SessionContext,
    ) -> Result<(), ClientError> {
        let result = client.logout(&session).await;
        if let Err(err) = &result {
            warn!(error = %err, user_id = session.user_id(), "Logout request failed");
        }
        self.current_path = "/".to_string();
        result
    }
}
