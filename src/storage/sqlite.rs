/// SQLite implementation of the habit storage interface
///
/// Each habit is a single row. The completion set lives in a JSON array
/// column next to the cached streak, so a toggle is one `UPDATE` of one row.

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Row, params};
use chrono::{DateTime, Utc};

use crate::domain::{CompletionSet, Habit, HabitId, HabitName, ToggleOutcome};
use crate::storage::{StorageError, HabitStorage, migrations};

const HABIT_COLUMNS: &str = "id, name, created_at, completed_dates, streak";

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

/// Raw column values of a habit row, before domain validation
struct HabitRow {
    id: String,
    name: String,
    created_at: String,
    completed_dates: String,
    streak: u32,
}

impl HabitRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            completed_dates: row.get(3)?,
            streak: row.get(4)?,
        })
    }

    fn into_habit(self) -> Result<Habit, StorageError> {
        let id = HabitId::from_string(&self.id).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(2, "Invalid datetime".to_string(), rusqlite::types::Type::Text)
            })?
            .with_timezone(&Utc);

        let keys: Vec<String> = serde_json::from_str(&self.completed_dates)?;
        let completed_dates = CompletionSet::from_keys(&keys).map_err(|source| {
            StorageError::CorruptRecord { habit_id: self.id.clone(), source }
        })?;

        Ok(Habit::from_existing(id, self.name, created_at, completed_dates, self.streak))
    }
}

impl SqliteStorage {
    /// Open (or create) the database and bring its schema up to date
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// In-memory database, mostly useful for tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn not_found(habit_id: &HabitId) -> StorageError {
        StorageError::HabitNotFound {
            habit_id: habit_id.to_string(),
        }
    }
}

impl HabitStorage for SqliteStorage {
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let sql = format!("SELECT {} FROM habits ORDER BY created_at ASC", HABIT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], HabitRow::from_row)?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?.into_habit()?);
        }

        tracing::debug!("Loaded {} habits", habits.len());
        Ok(habits)
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);
        let row = self.conn
            .query_row(&sql, params![habit_id.to_string()], HabitRow::from_row)
            .optional()?;

        match row {
            Some(row) => row.into_habit(),
            None => Err(Self::not_found(habit_id)),
        }
    }

    fn create_habit(&self, name: &HabitName) -> Result<HabitId, StorageError> {
        let habit = Habit::new(HabitId::new(), name.clone(), Utc::now());
        let completed_json = serde_json::to_string(&habit.completed_dates)?;

        self.conn.execute(
            "INSERT INTO habits (id, name, created_at, completed_dates, streak)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.created_at.to_rfc3339(),
                completed_json,
                habit.streak
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(habit.id)
    }

    fn rename_habit(&self, habit_id: &HabitId, name: &HabitName) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET name = ?2 WHERE id = ?1",
            params![habit_id.to_string(), name.as_str()],
        )?;

        if rows_affected == 0 {
            return Err(Self::not_found(habit_id));
        }

        tracing::debug!("Renamed habit {} to {}", habit_id, name);
        Ok(())
    }

    fn apply_toggle(&self, habit_id: &HabitId, outcome: &ToggleOutcome) -> Result<(), StorageError> {
        let completed_json = serde_json::to_string(&outcome.completed_dates)?;

        // Single statement: both columns change or neither does
        let rows_affected = self.conn.execute(
            "UPDATE habits SET completed_dates = ?2, streak = ?3 WHERE id = ?1",
            params![habit_id.to_string(), completed_json, outcome.streak],
        )?;

        if rows_affected == 0 {
            return Err(Self::not_found(habit_id));
        }

        tracing::debug!(
            "Applied toggle to habit {}: {} completions, streak {}",
            habit_id,
            outcome.completed_dates.len(),
            outcome.streak
        );
        Ok(())
    }

    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(Self::not_found(habit_id));
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }
}
