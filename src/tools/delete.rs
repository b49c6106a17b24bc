/// Tool for permanently deleting habits
///
/// This module implements the habit_delete MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID of the habit to delete
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a habit and all of its history
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = storage.get_habit(&habit_id)?;

    storage.delete_habit(&habit_id)?;
    tracing::info!("Deleted habit '{}' ({})", habit.name, habit_id);

    Ok(DeleteHabitResponse {
        success: true,
        message: format!("🗑️ Deleted habit '{}'", habit.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitName;
    use crate::storage::{SqliteStorage, StorageError};

    #[test]
    fn test_delete_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage.create_habit(&HabitName::parse("Gone soon").unwrap()).unwrap();

        let response = delete_habit(&storage, DeleteHabitParams { habit_id: id.to_string() }).unwrap();
        assert!(response.message.contains("Gone soon"));
        assert!(storage.list_habits().unwrap().is_empty());

        let again = delete_habit(&storage, DeleteHabitParams { habit_id: id.to_string() });
        assert!(matches!(again, Err(ToolError::Storage(StorageError::HabitNotFound { .. }))));
    }
}
