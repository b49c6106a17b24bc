/// MCP tools for habit management
///
/// Each tool validates its parameters, runs the domain operation and talks
/// to storage through `HabitStorage`. Tools never render UI; they return a
/// response struct with a human-readable `message`.

pub mod create;
pub mod list;
pub mod update;
pub mod toggle;
pub mod delete;
pub mod status;

// Re-export tool functions for easy access
pub use create::*;
pub use list::*;
pub use update::*;
pub use toggle::*;
pub use delete::*;
pub use status::*;

use thiserror::Error;
use crate::domain::{DomainError, HabitId};
use crate::storage::StorageError;

/// Errors a tool call can fail with
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid habit ID '{0}'")]
    InvalidHabitId(String),
}

/// Parse a habit ID supplied by a client
fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    HabitId::from_string(raw).map_err(|_| ToolError::InvalidHabitId(raw.to_string()))
}

fn plural_days(n: u32) -> &'static str {
    if n == 1 { "day" } else { "days" }
}
