/// End-to-end habit workflow against a temporary database
use habit_streak_mcp::*;
use tempfile::NamedTempFile;

fn key(s: &str) -> DayKey {
    DayKey::parse(s).expect("valid day key")
}

#[cfg(test)]
mod workflow_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_opens_existing_database() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let habit_id = {
            let server = HabitTrackerServer::new(db_path.clone(), DayClock::utc())
                .await
                .expect("Failed to create first server");
            let response = create_habit(server.storage(), CreateHabitParams { name: "Persisted".to_string() })
                .expect("create habit");
            response.habit_id
        };

        let server = HabitTrackerServer::new(db_path, DayClock::utc())
            .await
            .expect("Failed to create second server");
        let habits = server.storage().list_habits().expect("list habits");

        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].id.to_string(), habit_id);
    }

    #[test]
    fn test_full_habit_lifecycle() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path()).expect("Failed to create storage");

        let created = create_habit(&storage, CreateHabitParams { name: "Drink water".to_string() }).unwrap();
        let id = created.habit_id.clone();

        // 2024-01-10: mark done
        let r = toggle_habit(&storage, ToggleHabitParams { habit_id: id.clone() }, key("2024-01-10")).unwrap();
        assert!(r.completed_today);
        assert_eq!(r.current_streak, 1);

        // 2024-01-11: mark done, then change our mind
        let r = toggle_habit(&storage, ToggleHabitParams { habit_id: id.clone() }, key("2024-01-11")).unwrap();
        assert_eq!(r.current_streak, 2);
        let r = toggle_habit(&storage, ToggleHabitParams { habit_id: id.clone() }, key("2024-01-11")).unwrap();
        assert!(!r.completed_today);
        assert_eq!(r.current_streak, 1);

        rename_habit(&storage, RenameHabitParams { habit_id: id.clone(), name: "Drink more water".to_string() }).unwrap();

        let habit_id = HabitId::from_string(&id).unwrap();
        let stored = storage.get_habit(&habit_id).unwrap();
        assert_eq!(stored.name, "Drink more water");
        assert_eq!(stored.completed_dates.to_keys(), vec!["2024-01-10"]);
        assert_eq!(stored.streak, 1);

        let listed = list_habits(&storage, ListHabitsParams::default(), key("2024-01-11")).unwrap();
        assert_eq!(listed.habits.len(), 1);
        assert_eq!(listed.habits[0].current_streak, 1);
        assert!(!listed.habits[0].completed_today);

        let status = get_habit_status(&storage, StatusParams { habit_id: Some(id.clone()) }, key("2024-01-11")).unwrap();
        assert_eq!(status.habits[0].longest_streak, 1);

        delete_habit(&storage, DeleteHabitParams { habit_id: id }).unwrap();
        assert!(storage.list_habits().unwrap().is_empty());
        assert!(matches!(storage.get_habit(&habit_id), Err(StorageError::HabitNotFound { .. })));
    }

    #[test]
    fn test_invalid_input_is_rejected_before_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path()).expect("Failed to create storage");

        let result = create_habit(&storage, CreateHabitParams { name: "\n\t ".to_string() });
        assert!(matches!(result, Err(ToolError::Domain(DomainError::InvalidInput(_)))));
        assert!(storage.list_habits().unwrap().is_empty());

        // Storage interface is usable as a trait object
        let _: &dyn HabitStorage = &storage;
    }
}
