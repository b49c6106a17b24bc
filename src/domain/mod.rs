/// Domain module containing the completion and streak engine
///
/// Everything in here is synchronous and pure: day-keys, completion sets,
/// the streak calculator and the toggle coordinator. Persistence lives in
/// `storage` and only ever receives values produced by this module.

pub mod day_key;
pub mod completion;
pub mod streak;
pub mod toggle;
pub mod habit;
pub mod types;

// Re-export public types for easy access
pub use day_key::*;
pub use completion::*;
pub use streak::*;
pub use toggle::*;
pub use habit::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before it reaches persistence (e.g. a blank habit name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A day-key that is not a canonical `YYYY-MM-DD` calendar date
    #[error("Malformed day key '{key}': expected a YYYY-MM-DD calendar date")]
    MalformedDayKey { key: String },
}
