/// Tool for marking or unmarking a habit complete for today
///
/// This module implements the habit_toggle MCP tool: read the habit, run
/// the toggle coordinator, write the resulting pair back in one call.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::{self, DayKey};
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, plural_days, ToolError};

/// Parameters for toggling today's completion
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID of the habit to toggle
    pub habit_id: String,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub success: bool,
    pub completed_today: bool,
    pub current_streak: u32,
    pub message: String,
}

/// Toggle today's completion for a habit
///
/// The outcome is computed from the snapshot read here; a concurrent toggle
/// applied between the read and the write is overwritten.
pub fn toggle_habit<S: HabitStorage>(
    storage: &S,
    params: ToggleHabitParams,
    today: DayKey,
) -> Result<ToggleHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = storage.get_habit(&habit_id)?;

    let outcome = domain::toggle(&habit, today);
    storage.apply_toggle(&habit_id, &outcome)?;

    tracing::info!(
        "Toggled habit {} for {}: completed={}, streak={}",
        habit_id, today, outcome.completed_today, outcome.streak
    );

    let message = if outcome.completed_today {
        format!("🔥 Marked '{}' done for {}! Current streak: {} {}",
            habit.name, today, outcome.streak, plural_days(outcome.streak))
    } else {
        format!("↩️ Unmarked '{}' for {}. Current streak: {} {}",
            habit.name, today, outcome.streak, plural_days(outcome.streak))
    };

    Ok(ToggleHabitResponse {
        success: true,
        completed_today: outcome.completed_today,
        current_streak: outcome.streak,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitName;
    use crate::storage::{SqliteStorage, StorageError};

    fn key(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn params(id: &crate::domain::HabitId) -> ToggleHabitParams {
        ToggleHabitParams { habit_id: id.to_string() }
    }

    #[test]
    fn test_toggle_scenario() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage.create_habit(&HabitName::parse("Floss").unwrap()).unwrap();

        let r = toggle_habit(&storage, params(&id), key("2024-01-10")).unwrap();
        assert!(r.completed_today);
        assert_eq!(r.current_streak, 1);

        let r = toggle_habit(&storage, params(&id), key("2024-01-11")).unwrap();
        assert_eq!(r.current_streak, 2);
        assert!(r.message.contains("2 days"));

        let r = toggle_habit(&storage, params(&id), key("2024-01-11")).unwrap();
        assert!(!r.completed_today);
        assert_eq!(r.current_streak, 1);

        let stored = storage.get_habit(&id).unwrap();
        assert_eq!(stored.completed_dates.to_keys(), vec!["2024-01-10"]);
        assert_eq!(stored.streak, 1);
    }

    #[test]
    fn test_toggle_unknown_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = crate::domain::HabitId::new();

        let result = toggle_habit(&storage, params(&id), key("2024-01-10"));
        assert!(matches!(result, Err(ToolError::Storage(StorageError::HabitNotFound { .. }))));

        let result = toggle_habit(&storage, ToggleHabitParams { habit_id: "".to_string() }, key("2024-01-10"));
        assert!(matches!(result, Err(ToolError::InvalidHabitId(_))));
    }
}
