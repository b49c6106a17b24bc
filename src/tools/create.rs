/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::HabitName;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit (must not be blank)
    pub name: String,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub message: String,
}

/// Create a new habit using the provided storage
///
/// Blank names are rejected before the store is touched.
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let name = HabitName::parse(&params.name)?;
    let habit_id = storage.create_habit(&name)?;

    tracing::info!("Created habit '{}' ({})", name, habit_id);

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit_id.to_string(),
        message: format!("✅ Created habit '{}'", name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, HabitId};
    use crate::storage::SqliteStorage;

    #[test]
    fn test_create_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        let response = create_habit(&storage, CreateHabitParams { name: "  Read 10 pages ".to_string() }).unwrap();

        assert!(response.success);
        let habit = storage.get_habit(&HabitId::from_string(&response.habit_id).unwrap()).unwrap();
        assert_eq!(habit.name, "Read 10 pages");
        assert_eq!(habit.streak, 0);
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn test_blank_name_never_reaches_storage() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        let result = create_habit(&storage, CreateHabitParams { name: "   ".to_string() });

        assert!(matches!(result, Err(ToolError::Domain(DomainError::InvalidInput(_)))));
        assert!(storage.list_habits().unwrap().is_empty());
    }
}
