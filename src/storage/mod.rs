/// Storage layer for persisting habit data
///
/// The domain never talks to a database directly; it hands finished values
/// to an implementation of `HabitStorage`. SQLite is the bundled backend.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{DomainError, Habit, HabitId, HabitName, ToggleOutcome};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Corrupt habit record {habit_id}: {source}")]
    CorruptRecord {
        habit_id: String,
        #[source]
        source: DomainError,
    },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Persistence contract the habit engine relies on
///
/// Concurrent toggles of the same habit are not coordinated here: a caller
/// that reads a habit, toggles it and applies the result can overwrite a
/// toggle applied in between. Callers that need stronger guarantees must
/// re-fetch before retrying.
pub trait HabitStorage {
    /// Fetch every habit, in no particular order
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Persist a new habit with no completions and streak 0, returning its
    /// store-assigned ID
    fn create_habit(&self, name: &HabitName) -> Result<HabitId, StorageError>;

    /// Rename a habit without touching its completions or streak
    fn rename_habit(&self, habit_id: &HabitId, name: &HabitName) -> Result<(), StorageError>;

    /// Persist a toggle outcome; completions and streak are written together
    fn apply_toggle(&self, habit_id: &HabitId, outcome: &ToggleOutcome) -> Result<(), StorageError>;

    /// Permanently remove a habit
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;
}
