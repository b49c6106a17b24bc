/// Tool for renaming existing habits
///
/// This module implements the habit_rename MCP tool. Only the name can
/// change; completions and streak are left exactly as they were.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::HabitName;
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for renaming a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameHabitParams {
    /// ID of the habit to rename
    pub habit_id: String,
    /// New name (must not be blank)
    pub name: String,
}

/// Response from renaming a habit
#[derive(Debug, Serialize)]
pub struct RenameHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Rename an existing habit using the provided storage
pub fn rename_habit<S: HabitStorage>(
    storage: &S,
    params: RenameHabitParams,
) -> Result<RenameHabitResponse, ToolError> {
    // Validate both inputs before touching storage
    let habit_id = parse_habit_id(&params.habit_id)?;
    let name = HabitName::parse(&params.name)?;

    storage.rename_habit(&habit_id, &name)?;

    Ok(RenameHabitResponse {
        success: true,
        message: format!("✅ Renamed habit to '{}'", name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{toggle, DayKey, DomainError};
    use crate::storage::{SqliteStorage, StorageError};

    #[test]
    fn test_rename_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let habit_id = storage.create_habit(&HabitName::parse("Old Name").unwrap()).unwrap();
        let habit = storage.get_habit(&habit_id).unwrap();
        storage.apply_toggle(&habit_id, &toggle(&habit, DayKey::parse("2024-01-10").unwrap())).unwrap();

        let params = RenameHabitParams {
            habit_id: habit_id.to_string(),
            name: "New Name".to_string(),
        };
        let result = rename_habit(&storage, params);
        assert!(result.is_ok());

        let updated = storage.get_habit(&habit_id).unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.completed_dates.len(), 1);
    }

    #[test]
    fn test_rename_to_blank_rejected() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let habit_id = storage.create_habit(&HabitName::parse("Keep Me").unwrap()).unwrap();

        let params = RenameHabitParams {
            habit_id: habit_id.to_string(),
            name: " \t".to_string(),
        };
        let result = rename_habit(&storage, params);

        assert!(matches!(result, Err(ToolError::Domain(DomainError::InvalidInput(_)))));
        assert_eq!(storage.get_habit(&habit_id).unwrap().name, "Keep Me");
    }

    #[test]
    fn test_rename_nonexistent_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        let bad_id = rename_habit(&storage, RenameHabitParams {
            habit_id: "nonexistent_id".to_string(),
            name: "New Name".to_string(),
        });
        assert!(matches!(bad_id, Err(ToolError::InvalidHabitId(_))));

        let missing = rename_habit(&storage, RenameHabitParams {
            habit_id: crate::domain::HabitId::new().to_string(),
            name: "New Name".to_string(),
        });
        assert!(matches!(missing, Err(ToolError::Storage(StorageError::HabitNotFound { .. }))));
    }
}
