pub mod classification;
pub mod types;

pub use types::{BodyReadError, CacheError, Result};

// Type alias for callers that name the error after the crate
pub type Error = CacheError;
