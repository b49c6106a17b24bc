/// Completion set: the days on which a habit was marked done
///
/// This is the single source of truth for a habit's history. It is a value
/// type: `add` and `remove` return a new set and leave the receiver alone,
/// so callers can hold the before and after states side by side.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{DayKey, DomainError};

/// Set of day-keys, kept in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeSet<DayKey>);

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw key strings, failing on the first malformed key
    ///
    /// Duplicate keys collapse into one entry.
    pub fn from_keys<I, S>(keys: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|k| DayKey::parse(k.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// A set containing `key` plus every existing member
    pub fn add(&self, key: DayKey) -> Self {
        let mut days = self.0.clone();
        days.insert(key);
        Self(days)
    }

    /// A set with `key` absent
    pub fn remove(&self, key: DayKey) -> Self {
        let mut days = self.0.clone();
        days.remove(&key);
        Self(days)
    }

    pub fn contains(&self, key: DayKey) -> bool {
        self.0.contains(&key)
    }

    /// The most recent completed day, if any
    pub fn latest(&self) -> Option<DayKey> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Completed days, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = DayKey> + '_ {
        self.0.iter().copied()
    }

    /// Canonical string form of every key, oldest first
    pub fn to_keys(&self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

impl FromIterator<DayKey> for CompletionSet {
    fn from_iter<T: IntoIterator<Item = DayKey>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn set(keys: &[&str]) -> CompletionSet {
        CompletionSet::from_keys(keys).unwrap()
    }

    #[test]
    fn test_add_is_idempotent() {
        let s = set(&["2024-01-09"]);
        let once = s.add(key("2024-01-10"));
        let twice = once.add(key("2024-01-10"));

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
        assert!(once.contains(key("2024-01-10")));
        // original untouched
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let s = set(&["2024-01-09", "2024-01-10"]);
        let once = s.remove(key("2024-01-10"));
        let twice = once.remove(key("2024-01-10"));

        assert_eq!(once, twice);
        assert_eq!(once, set(&["2024-01-09"]));
        assert!(s.contains(key("2024-01-10")));
    }

    #[test]
    fn test_add_remove_inverse_laws() {
        let absent = key("2024-01-11");
        let present = key("2024-01-10");
        let s = set(&["2024-01-08", "2024-01-10"]);

        // d absent beforehand: remove(add(S, d), d) == S
        assert_eq!(s.add(absent).remove(absent), s);
        // d present beforehand: add(remove(S, d), d) == S
        assert_eq!(s.remove(present).add(present), s);
    }

    #[test]
    fn test_from_keys_rejects_malformed() {
        let result = CompletionSet::from_keys(["2024-01-10", "Jan 11"]);
        assert_eq!(
            result,
            Err(DomainError::MalformedDayKey { key: "Jan 11".to_string() })
        );
    }

    #[test]
    fn test_duplicates_collapse_and_latest() {
        let s = set(&["2024-01-10", "2023-12-31", "2024-01-10"]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.latest(), Some(key("2024-01-10")));
        assert_eq!(s.to_keys(), vec!["2023-12-31", "2024-01-10"]);
        assert_eq!(CompletionSet::new().latest(), None);
    }

    #[test]
    fn test_serializes_as_sorted_array() {
        let s = set(&["2024-01-10", "2024-01-02"]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"["2024-01-02","2024-01-10"]"#);

        let back: CompletionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(serde_json::from_str::<CompletionSet>(r#"["yesterday"]"#).is_err());
    }
}
