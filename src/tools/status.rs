/// Tool for checking habit status and streaks
///
/// This module implements the habit_status MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::domain::{DayKey, Habit};
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, plural_days, ToolError};

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// ID of a specific habit (optional - shows all if omitted)
    pub habit_id: Option<String>,
}

/// Information about a single habit's status
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub habit_id: String,
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
    pub last_completed: Option<String>,
    pub completed_today: bool,
    pub encouragement: String,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStatus>,
    pub summary: String,
    pub message: String,
}

fn habit_status(habit: Habit, today: DayKey) -> HabitStatus {
    let stats = habit.stats(today);
    HabitStatus {
        habit_id: habit.id.to_string(),
        name: habit.name,
        current_streak: stats.current_streak,
        longest_streak: stats.longest_streak,
        total_completions: stats.total_completions,
        last_completed: stats.last_completed.map(|d| d.to_string()),
        completed_today: stats.completed_today,
        encouragement: stats.motivational_message(),
    }
}

/// Get status for one habit, or all of them
pub fn get_habit_status<S: HabitStorage>(
    storage: &S,
    params: StatusParams,
    today: DayKey,
) -> Result<StatusResponse, ToolError> {
    let habits: Vec<HabitStatus> = match params.habit_id {
        Some(raw_id) => {
            let habit_id = parse_habit_id(&raw_id)?;
            vec![habit_status(storage.get_habit(&habit_id)?, today)]
        }
        None => storage.list_habits()?
            .into_iter()
            .map(|h| habit_status(h, today))
            .collect(),
    };

    let summary = if habits.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let active_count = habits.iter().filter(|h| h.current_streak > 0).count();
        format!("📊 Status for {}: {} of {} habits on a streak",
            today, active_count, habits.len())
    };

    let details = habits.iter()
        .map(|h| format!("🎯 {}\n   Current streak: {} {} | Best: {} {} | Total: {}{}\n   {}",
            h.name,
            h.current_streak, plural_days(h.current_streak),
            h.longest_streak, plural_days(h.longest_streak),
            h.total_completions,
            match &h.last_completed {
                Some(last) => format!("\n   Last completed: {}", last),
                None => String::new(),
            },
            h.encouragement))
        .collect::<Vec<_>>()
        .join("\n\n");

    let message = if details.is_empty() {
        summary.clone()
    } else {
        format!("{}\n\n{}", summary, details)
    };

    Ok(StatusResponse {
        habits,
        summary,
        message,
    })
}
