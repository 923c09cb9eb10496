pub mod assignment;
pub mod calendar_event;
pub mod course;
pub mod message;
pub mod role;
pub mod subject;
pub mod submission;

pub use assignment::*;
pub use calendar_event::*;
pub use course::*;
pub use message::*;
pub use role::*;
pub use subject::*;
pub use submission::*;

use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Pulls a value that validation already required out of its `Option`.
pub(crate) fn required<T: Clone>(value: &Option<T>, field: &str) -> Result<T, AppError> {
    value
        .clone()
        .ok_or_else(|| AppError::invalid_field(field, format!("{} is required", field)))
}

/// Keeps an explicit JSON `null` apart from a missing field: the outer `Option`
/// is `None` when the field was absent, `Some(None)` when it was `null`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
