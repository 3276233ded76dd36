//! Domain records and error taxonomy.

pub mod error;
pub mod user;

pub use error::{AppError, FetchError};
pub use user::{SearchPage, UserDetail, UserSummary};
