use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GradeSubmissions,
    ViewAllSubmissions,

    ManageRoles,
}

/// Role names with built-in permissions. Roles created at runtime under any
/// other name are plain labels and grant nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownRole {
    Student,
    Teacher,
    Admin,
}

static STUDENT_PERMISSIONS: Lazy<HashSet<Permission>> = Lazy::new(HashSet::new);

static TEACHER_PERMISSIONS: Lazy<HashSet<Permission>> = Lazy::new(|| {
    let mut permissions = HashSet::new();

    permissions.extend(STUDENT_PERMISSIONS.iter().copied());

    permissions.insert(Permission::GradeSubmissions);
    permissions.insert(Permission::ViewAllSubmissions);

    permissions
});

static ADMIN_PERMISSIONS: Lazy<HashSet<Permission>> = Lazy::new(|| {
    let mut permissions = HashSet::new();

    permissions.extend(TEACHER_PERMISSIONS.iter().copied());

    permissions.insert(Permission::ManageRoles);

    permissions
});

impl KnownRole {
    pub fn permissions(&self) -> &'static HashSet<Permission> {
        match self {
            KnownRole::Student => &STUDENT_PERMISSIONS,
            KnownRole::Teacher => &TEACHER_PERMISSIONS,
            KnownRole::Admin => &ADMIN_PERMISSIONS,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownRole::Student => "student",
            KnownRole::Teacher => "teacher",
            KnownRole::Admin => "admin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "student" => Some(KnownRole::Student),
            "teacher" => Some(KnownRole::Teacher),
            "admin" => Some(KnownRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for KnownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
