pub mod messages;
pub mod resource;
pub mod users;

pub use messages::*;
pub use users::*;
