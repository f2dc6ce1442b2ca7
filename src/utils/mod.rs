pub mod errors;
pub mod page;

pub use errors::{extract_provider_message, AppError};
