//! Search and type filters. Each filter produces its own exclusion set; an
//! entry is visible only when neither set contains it.

use std::collections::HashSet;
use std::fmt;

use crate::category::Category;
use crate::entry::{EntryId, LogEntry};

/// Ids hidden by one filter.
pub type ExclusionSet = HashSet<EntryId>;

/// Entry of the type selector: "All logs" or exactly one category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeSelection {
    #[default]
    All,
    Only(Category),
}

impl TypeSelection {
    /// Number of selector options, "All logs" included.
    pub const OPTIONS: u8 = 15;

    /// Maps the 1-indexed selector value to a selection: 0 is "All logs",
    /// `v > 0` selects category `v - 1`. Out-of-range values select nothing
    /// more specific than "All logs".
    pub fn from_ui_value(value: u8) -> Self {
        match value.checked_sub(1) {
            Some(code) => Category::from_code(code as u32)
                .map(TypeSelection::Only)
                .unwrap_or(TypeSelection::All),
            None => TypeSelection::All,
        }
    }

    pub fn ui_value(self) -> u8 {
        match self {
            TypeSelection::All => 0,
            TypeSelection::Only(category) => category.code() as u8 + 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeSelection::All => "All logs",
            TypeSelection::Only(category) => category.label(),
        }
    }

    /// Next option in selector order, wrapping to "All logs".
    pub fn next(self) -> Self {
        Self::from_ui_value((self.ui_value() + 1) % Self::OPTIONS)
    }

    pub fn prev(self) -> Self {
        Self::from_ui_value((self.ui_value() + Self::OPTIONS - 1) % Self::OPTIONS)
    }

    pub fn is_all(self) -> bool {
        self == TypeSelection::All
    }
}

impl fmt::Display for TypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// True when `needle` (already lowercased) occurs in any searchable field.
pub fn matches_search(entry: &LogEntry, needle: &str) -> bool {
    [
        entry.description.as_str(),
        entry.object.as_str(),
        entry.date.as_str(),
        entry.time.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Ids of entries that do not match `query`. An empty query excludes nothing.
pub fn search_exclusions(entries: &[LogEntry], query: &str) -> ExclusionSet {
    if query.is_empty() {
        return ExclusionSet::new();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| !matches_search(entry, &needle))
        .map(|entry| entry.id.clone())
        .collect()
}

/// Ids of entries whose type differs from the selected category.
pub fn type_exclusions(entries: &[LogEntry], selection: TypeSelection) -> ExclusionSet {
    match selection {
        TypeSelection::All => ExclusionSet::new(),
        TypeSelection::Only(category) => entries
            .iter()
            .filter(|entry| entry.kind != category.code())
            .map(|entry| entry.id.clone())
            .collect(),
    }
}

pub fn visible(entry: &LogEntry, search_excluded: &ExclusionSet, type_excluded: &ExclusionSet) -> bool {
    !search_excluded.contains(&entry.id) && !type_excluded.contains(&entry.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: i64, kind: u32, description: &str, object: &str) -> LogEntry {
        let timestamp = Some(chrono::Utc.with_ymd_and_hms(2021, 6, 1, 14, 30, 0).unwrap());
        LogEntry {
            id: EntryId::Int(id),
            kind,
            description: description.to_string(),
            object: object.to_string(),
            issue_id: None,
            timestamp,
            date: "June 01, 2021".to_string(),
            time: "02:30 PM".to_string(),
        }
    }

    #[test]
    fn test_ui_values_are_one_indexed() {
        assert_eq!(TypeSelection::from_ui_value(0), TypeSelection::All);
        assert_eq!(
            TypeSelection::from_ui_value(1),
            TypeSelection::Only(Category::IssueCreated)
        );
        assert_eq!(
            TypeSelection::from_ui_value(14),
            TypeSelection::Only(Category::SprintCompleted)
        );
        assert_eq!(TypeSelection::from_ui_value(15), TypeSelection::All);
    }

    #[test]
    fn test_selection_cycles_through_all_options() {
        let mut selection = TypeSelection::All;
        let mut seen = Vec::new();
        for _ in 0..TypeSelection::OPTIONS {
            seen.push(selection.ui_value());
            selection = selection.next();
        }
        assert_eq!(selection, TypeSelection::All);
        assert_eq!(seen, (0..15).collect::<Vec<u8>>());
        assert_eq!(TypeSelection::All.prev(), TypeSelection::Only(Category::SprintCompleted));
    }

    #[test]
    fn test_search_is_case_insensitive_over_four_fields() {
        let entries = vec![
            entry(1, 0, "Created issue", "Login Page"),
            entry(2, 3, "Commented on", "Docs"),
        ];
        assert!(search_exclusions(&entries, "login").contains(&EntryId::Int(2)));
        assert!(!search_exclusions(&entries, "login").contains(&EntryId::Int(1)));
        assert!(search_exclusions(&entries, "COMMENTED").contains(&EntryId::Int(1)));
        assert!(search_exclusions(&entries, "june").is_empty());
        assert!(search_exclusions(&entries, "02:30 pm").is_empty());
        assert_eq!(search_exclusions(&entries, "nothing").len(), 2);
        assert!(search_exclusions(&entries, "").is_empty());
    }

    #[test]
    fn test_type_exclusions_keep_only_selected_code() {
        let entries = vec![entry(1, 0, "a", "b"), entry(2, 3, "c", "d"), entry(3, 3, "e", "f")];
        let excluded = type_exclusions(&entries, TypeSelection::Only(Category::IssueCommented));
        assert_eq!(excluded, [EntryId::Int(1)].into_iter().collect());
        assert!(type_exclusions(&entries, TypeSelection::All).is_empty());
    }

    #[test]
    fn test_visible_requires_both_sets_to_pass() {
        let item = entry(1, 0, "a", "b");
        let hit: ExclusionSet = [EntryId::Int(1)].into_iter().collect();
        let empty = ExclusionSet::new();
        assert!(visible(&item, &empty, &empty));
        assert!(!visible(&item, &hit, &empty));
        assert!(!visible(&item, &empty, &hit));
    }
}
