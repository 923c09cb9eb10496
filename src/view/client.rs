use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::auth::AuthResponse;
use crate::validation::ValidationResponse;

use super::session::SessionContext;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            ClientError::Status { status, .. } => Some(*status),
        }
    }
}

/// Thin JSON client for the `/api` surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        Err(Self::failure(status, response).await)
    }

    async fn failure(status: StatusCode, response: reqwest::Response) -> ClientError {
        let message = match response.json::<ValidationResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };

        ClientError::Status {
            status: status.as_u16(),
            message,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext, ClientError> {
        let response = self
            .http
            .post(self.url("login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = Self::decode(response).await?;
        Ok(SessionContext::from(auth))
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id()))]
    pub async fn logout(&self, session: &SessionContext) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("logout"))
            .header(reqwest::header::AUTHORIZATION, session.authorization_header())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::failure(status, response).await)
        }
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id()))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
    ) -> Result<T, ClientError> {
        debug!("GET {}", path);
        let response = self
            .http
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, session.authorization_header())
            .send()
            .await?;

        Self::decode(response).await
    }

    #[instrument(skip(self, session, body), fields(user_id = session.user_id()))]
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!("POST {}", path);
        let response = self
            .http
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, session.authorization_header())
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }
}
