use chrono::{DateTime, Duration, Utc};

use super::state::Tone;

/// Due dates within this window of now count as approaching.
pub const APPROACHING_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Overdue,
    Approaching,
    OnTrack,
}

impl DeadlineStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeadlineStatus::Overdue => "Vencida",
            DeadlineStatus::Approaching => "Próxima a vencer",
            DeadlineStatus::OnTrack => "En plazo",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            DeadlineStatus::Overdue => Tone::Danger,
            DeadlineStatus::Approaching => Tone::Warning,
            DeadlineStatus::OnTrack => Tone::Success,
        }
    }
}

pub fn classify(due: DateTime<Utc>, now: DateTime<Utc>) -> DeadlineStatus {
    let remaining = due - now;

    if remaining < Duration::zero() {
        DeadlineStatus::Overdue
    } else if remaining <= Duration::days(APPROACHING_WINDOW_DAYS) {
        DeadlineStatus::Approaching
    } else {
        DeadlineStatus::OnTrack
    }
}
