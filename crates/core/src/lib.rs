pub mod db;

pub mod auth;
pub mod constants;
pub mod errors;
pub mod events;
pub mod lending;
pub mod notifications;
pub mod preferences;
pub mod purchases;
pub mod schema;
pub mod urgency;
pub mod utils;

pub use errors::{Error, Result};
