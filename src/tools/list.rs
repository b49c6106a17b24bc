/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool. Streaks shown here are
/// derived from each habit's completion history at read time, so a habit
/// nobody toggled for a week shows 0 even though its cached value is older.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::{DayKey, DomainError};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Sort by: 'name', 'streak' or 'created_at' (default: created_at)
    pub sort_by: Option<String>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub created_at: String,
    pub current_streak: u32,
    pub completed_today: bool,
    pub total_completions: u32,
}

/// Summary statistics for all habits
#[derive(Debug, Serialize)]
pub struct HabitListSummary {
    pub total_habits: u32,
    pub completed_today: u32,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub summary: HabitListSummary,
}

impl ListHabitsResponse {
    /// Render the list for display
    pub fn to_message(&self) -> String {
        if self.habits.is_empty() {
            return "No habits found. Create your first habit to get started!".to_string();
        }

        let header = format!("📋 **Habits** ({} total, {} done today)\n\n",
            self.summary.total_habits, self.summary.completed_today);

        let lines = self.habits.iter()
            .map(|h| format!("{} **{}**\n   🔥 Streak: {} | ✅ Total: {} | ID: {}",
                if h.completed_today { "☑️" } else { "⬜" },
                h.name,
                h.current_streak,
                h.total_completions,
                h.habit_id))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{}{}", header, lines)
    }
}

/// List habits using the provided storage
pub fn list_habits<S: HabitStorage>(
    storage: &S,
    params: ListHabitsParams,
    today: DayKey,
) -> Result<ListHabitsResponse, ToolError> {
    let mut habits = storage.list_habits()?;

    match params.sort_by.as_deref().map(str::trim) {
        Some("name") => habits.sort_by_key(|h| h.name.to_lowercase()),
        Some("streak") => habits.sort_by_key(|h| std::cmp::Reverse(h.current_streak(today))),
        None | Some("created_at") => habits.sort_by_key(|h| h.created_at),
        Some(other) => {
            return Err(DomainError::InvalidInput(format!(
                "Unknown sort_by '{}': expected 'name', 'streak' or 'created_at'",
                other
            ))
            .into());
        }
    }

    let summaries: Vec<HabitSummary> = habits.into_iter().map(|habit| {
        HabitSummary {
            habit_id: habit.id.to_string(),
            current_streak: habit.current_streak(today),
            completed_today: habit.is_completed_on(today),
            total_completions: habit.completed_dates.len() as u32,
            created_at: habit.created_at.to_rfc3339(),
            name: habit.name,
        }
    }).collect();

    let summary = HabitListSummary {
        total_habits: summaries.len() as u32,
        completed_today: summaries.iter().filter(|h| h.completed_today).count() as u32,
    };

    Ok(ListHabitsResponse {
        habits: summaries,
        summary,
    })
}
