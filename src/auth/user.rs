use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Role;

use super::{KnownRole, Permission};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbUser {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl DbUser {
    pub fn with_roles(self, roles: Vec<Role>) -> User {
        User {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            roles,
        }
    }
}

impl User {
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.name.eq_ignore_ascii_case(name))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.roles
            .iter()
            .filter_map(|role| KnownRole::from_name(&role.name))
            .any(|role| role.has_permission(permission))
    }

    pub fn require_permission(&self, permission: Permission) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %self.id,
                roles = ?self.roles.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
                permission = ?permission,
                "Permission denied"
            );
            Err(AppError::Authorization(format!(
                "Missing permission {:?}",
                permission
            )))
        }
    }
}
