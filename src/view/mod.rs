//! View-models for the single-page frontend.
//!
//! Each component loads its data through [`client::ApiClient`] with an
//! explicit [`session::SessionContext`] and exposes what should be rendered.
//! Nothing here keeps ambient global state: the caller owns the session.

pub mod assignments;
pub mod client;
pub mod deadline;
pub mod lists;
pub mod messages;
pub mod navigation;
pub mod session;
pub mod state;
pub mod submissions;

pub use assignments::AssignmentsList;
pub use client::{ApiClient, ClientError};
pub use deadline::{DeadlineStatus, classify};
pub use lists::{CoursesList, SubjectsList};
pub use messages::MessageList;
pub use navigation::{DASHBOARD_CARDS, Navbar};
pub use session::SessionContext;
pub use state::{ListView, Notification, NotificationKind, Tone, ViewState};
pub use submissions::SubmissionsList;
