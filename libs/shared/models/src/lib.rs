pub mod error;
pub mod response;

pub use error::AppError;
pub use response::{EmptyJson, JsonUtf8, JSON_UTF8};
