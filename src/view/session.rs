use crate::api::auth::{AuthResponse, UserData};

/// Credential and identity of the signed-in user, handed to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    token: String,
    user: UserData,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, user: UserData) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserData {
        &self.user
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl From<AuthResponse> for SessionContext {
    fn from(response: AuthResponse) -> Self {
        Self::new(response.token, response.user)
    }
}
