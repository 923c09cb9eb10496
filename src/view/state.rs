use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::client::{ApiClient, ClientError};
use super::session::SessionContext;

/// What a list component should currently render.
#[derive(Debug, PartialEq)]
pub enum ViewState<'a, T> {
    Loading,
    Error(&'a str),
    Empty(&'static str),
    Ready(&'a [T]),
}

/// Loading flag, error banner and items behind every list component.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    loading: bool,
    error: Option<String>,
    items: Vec<T>,
    error_message: &'static str,
    empty_message: &'static str,
}

impl<T> ListView<T> {
    pub fn new(error_message: &'static str, empty_message: &'static str) -> Self {
        Self {
            loading: true,
            error: None,
            items: Vec::new(),
            error_message,
            empty_message,
        }
    }

    /// Settles the pending fetch. Failures keep any previous items.
    pub fn resolve(&mut self, result: Result<Vec<T>, ClientError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "{}", self.error_message);
                self.error = Some(self.error_message.to_string());
            }
        }
    }

    pub fn state(&self) -> ViewState<'_, T> {
        if self.loading {
            ViewState::Loading
        } else if let Some(error) = &self.error {
            ViewState::Error(error)
        } else if self.items.is_empty() {
            ViewState::Empty(self.empty_message)
        } else {
            ViewState::Ready(&self.items)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }
}

impl<T: DeserializeOwned> ListView<T> {
    /// Issues the single GET backing the component and settles it.
    pub async fn load(&mut self, client: &ApiClient, session: &SessionContext, path: &str) {
        self.loading = true;
        let result = client.get::<Vec<T>>(session, path).await;
        self.resolve(result);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A banner shown above a form. `expires_at` of `None` stays until replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn expiring_after(mut self, now: DateTime<Utc>, duration: Duration) -> Self {
        self.expires_at = Some(now + duration);
        self
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }

    pub fn tone(&self) -> Tone {
        match self.kind {
            NotificationKind::Success => Tone::Success,
            NotificationKind::Error => Tone::Danger,
        }
    }
}
