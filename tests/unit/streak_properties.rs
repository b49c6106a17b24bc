/// Properties of the completion set, streak calculator and toggle coordinator
use habit_streak_mcp::*;

fn key(s: &str) -> DayKey {
    DayKey::parse(s).expect("valid day key")
}

/// `n` days before `today`
fn days_ago(today: DayKey, n: u32) -> DayKey {
    (0..n).fold(today, |day, _| day.day_before())
}

#[cfg(test)]
mod streak_property_tests {
    use super::*;

    #[test]
    fn test_streak_fixtures() {
        for today in [key("2024-01-10"), key("2024-03-01"), key("2025-01-01")] {
            let yesterday = today.day_before();
            let set = |days: &[DayKey]| days.iter().copied().collect::<CompletionSet>();

            assert_eq!(current_streak(&CompletionSet::new(), today), 0);
            assert_eq!(current_streak(&set(&[today]), today), 1);
            assert_eq!(current_streak(&set(&[yesterday]), today), 1);
            assert_eq!(current_streak(&set(&[today, yesterday, yesterday.day_before()]), today), 3);
            assert_eq!(current_streak(&set(&[today, days_ago(today, 5)]), today), 1);
            assert_eq!(current_streak(&set(&[days_ago(today, 10)]), today), 0);
        }
    }

    #[test]
    fn test_add_remove_laws_over_many_sets() {
        let today = key("2024-01-10");
        let base: Vec<DayKey> = (0..8).map(|n| days_ago(today, n * 2)).collect();

        for size in 0..base.len() {
            let s: CompletionSet = base[..size].iter().copied().collect();
            for n in 0..16 {
                let d = days_ago(today, n);
                if s.contains(d) {
                    assert_eq!(s.remove(d).add(d), s);
                    assert_eq!(s.add(d), s);
                } else {
                    assert_eq!(s.add(d).remove(d), s);
                    assert_eq!(s.remove(d), s);
                }
            }
        }
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let today = key("2024-01-10");
        for pattern in 0u32..64 {
            // each bit marks one of the last six days as completed
            let completed: CompletionSet = (0..6)
                .filter(|bit| pattern & (1u32 << *bit) != 0)
                .map(|bit| days_ago(today, bit))
                .collect();
            let streak = current_streak(&completed, today);
            let habit = Habit::from_existing(
                HabitId::new(),
                "Pattern".to_string(),
                chrono::Utc::now(),
                completed.clone(),
                streak,
            );

            let mut toggled = habit.clone();
            toggled.apply_toggle(toggle(&toggled, today));
            assert_ne!(toggled.completed_dates, completed);
            toggled.apply_toggle(toggle(&toggled, today));

            assert_eq!(toggled, habit);
        }
    }

    #[test]
    fn test_cached_streak_matches_calculator_after_every_toggle() {
        let mut habit = Habit::new(HabitId::new(), HabitName::parse("Run").unwrap(), chrono::Utc::now());
        let days = ["2024-01-01", "2024-01-02", "2024-01-02", "2024-01-03", "2024-01-05", "2024-01-06"];

        for day in days {
            let today = key(day);
            habit.apply_toggle(toggle(&habit, today));
            assert_eq!(habit.streak, current_streak(&habit.completed_dates, today));
        }
    }

    #[test]
    fn test_raw_keys_fail_fast() {
        assert!(matches!(
            current_streak_from_keys(["2024-01-10", "2024-1-9"], "2024-01-10"),
            Err(DomainError::MalformedDayKey { .. })
        ));
        assert!(matches!(
            HabitName::parse(""),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
