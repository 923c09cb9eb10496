use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::models::{Message, NewMessage};

use super::client::{ApiClient, ClientError};
use super::session::SessionContext;
use super::state::{ListView, Notification, ViewState};

pub const MESSAGES_ERROR: &str = "Error al obtener mensajes";
pub const MESSAGES_EMPTY: &str = "No hay mensajes para mostrar";
pub const MISSING_FIELDS: &str = "Por favor complete todos los campos";
pub const SEND_SUCCESS: &str = "Mensaje enviado con éxito";
pub const SEND_ERROR: &str = "Error al enviar mensaje";
pub const NEW_BADGE: &str = "Nuevo";

pub const SUCCESS_NOTIFICATION_SECS: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow<'a> {
    pub message: &'a Message,
    pub is_from_me: bool,
}

impl MessageRow<'_> {
    pub fn sender_label(&self) -> String {
        if self.is_from_me {
            "Yo".to_string()
        } else {
            format!("Usuario {}", self.message.sender_id)
        }
    }

    pub fn avatar(&self) -> String {
        if self.is_from_me {
            "Yo".to_string()
        } else {
            self.message
                .sender_id
                .to_string()
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default()
        }
    }

    /// Unread messages addressed to the viewer carry the "Nuevo" badge.
    pub fn badge(&self) -> Option<&'static str> {
        if !self.message.is_read && !self.is_from_me {
            Some(NEW_BADGE)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageList {
    pub list: ListView<Message>,
    pub receiver_id: String,
    pub content: String,
    pub notification: Option<Notification>,
}

impl Default for MessageList {
    fn default() -> Self {
        Self {
            list: ListView::new(MESSAGES_ERROR, MESSAGES_EMPTY),
            receiver_id: String::new(),
            content: String::new(),
            notification: None,
        }
    }
}

impl MessageList {
    pub async fn load(&mut self, client: &ApiClient, session: &SessionContext) {
        self.list.load(client, session, "messages").await;
    }

    pub fn state(&self) -> ViewState<'_, Message> {
        self.list.state()
    }

    pub fn count_label(&self) -> String {
        format!("{} mensajes", self.list.len())
    }

    pub fn rows<'a>(&'a self, session: &SessionContext) -> Vec<MessageRow<'a>> {
        let me = session.user_id();
        self.list
            .items()
            .iter()
            .map(|message| MessageRow {
                message,
                is_from_me: message.sender_id == me,
            })
            .collect()
    }

    /// Notification still on screen at `now`, if any.
    pub fn visible_notification(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|notification| notification.is_visible(now))
    }

    pub fn prepare(&self) -> Result<NewMessage, &'static str> {
        let content = self.content.trim();
        let receiver_id = self.receiver_id.trim().parse::<i64>().ok();

        match receiver_id {
            Some(receiver_id) if receiver_id > 0 && !content.is_empty() => Ok(NewMessage {
                receiver_id,
                content: content.to_string(),
            }),
            _ => Err(MISSING_FIELDS),
        }
    }

    pub fn apply(&mut self, result: Result<Message, ClientError>, now: DateTime<Utc>) {
        match result {
            Ok(message) => {
                self.list.prepend(message);
                self.content.clear();
                self.notification = Some(
                    Notification::success(SEND_SUCCESS)
                        .expiring_after(now, Duration::seconds(SUCCESS_NOTIFICATION_SECS)),
                );
            }
            Err(err) => {
                warn!(error = %err, "Sending message failed");
                self.notification = Some(Notification::error(SEND_ERROR));
            }
        }
    }

    pub async fn send(&mut self, client: &ApiClient, session: &SessionContext, now: DateTime<Utc>) {
        let new = match self.prepare() {
            Ok(new) => new,
            Err(message) => {
                self.notification = Some(Notification::error(message));
                return;
            }
        };

        self.notification = None;
        let result = client.post::<_, Message>(session, "messages", &new).await;
        self.apply(result, now);
    }
}
