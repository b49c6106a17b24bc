/// Public library interface for the Habit Streak MCP server
///
/// The domain module is the completion and streak engine; storage persists
/// its results; tools and the MCP server expose them to clients.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{SqliteStorage, StorageError, HabitStorage};
pub use tools::{
    create_habit, delete_habit, get_habit_status, list_habits, rename_habit, toggle_habit,
    CreateHabitParams, CreateHabitResponse, DeleteHabitParams, DeleteHabitResponse,
    HabitListSummary, HabitStatus, HabitSummary, ListHabitsParams, ListHabitsResponse,
    RenameHabitParams, RenameHabitResponse, StatusParams, StatusResponse, ToggleHabitParams,
    ToggleHabitResponse, ToolError,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit streak server: a store plus the clock that decides what "today" is
pub struct HabitTrackerServer {
    storage: SqliteStorage,
    clock: DayClock,
}

impl HabitTrackerServer {
    /// Open the database at `db_path`, creating the schema if needed
    pub async fn new(db_path: PathBuf, clock: DayClock) -> Result<Self, ServerError> {
        tracing::info!(
            "Initializing habit streak server with database {:?} (UTC offset {})",
            db_path,
            clock.offset()
        );

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self::with_storage(storage, clock))
    }

    /// Build a server around an already opened store
    pub fn with_storage(storage: SqliteStorage, clock: DayClock) -> Self {
        Self { storage, clock }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Blocks until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Test database connectivity
        let habits = self.storage.list_habits()?;
        tracing::info!(
            "Server started successfully, found {} existing habits (today is {})",
            habits.len(),
            self.clock.today()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }
}
