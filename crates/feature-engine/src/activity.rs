//! Activity Encoding

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Code used for activity names missing from the table
pub const DEFAULT_ACTIVITY_CODE: u32 = 0;

/// Activity table of the v1 model (label-encoded, alphabetical)
pub const BUILTIN_ACTIVITIES: [(&str, u32); 4] = [
    ("Cycling", 0),
    ("Running", 1),
    ("Treadmill", 2),
    ("Weightlifting", 3),
];

/// Outcome of an activity lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "code", rename_all = "snake_case")]
pub enum ActivityLookup {
    /// Name found in the table
    Known(u32),
    /// Name not found; encoded as [`DEFAULT_ACTIVITY_CODE`]
    Unknown,
}

impl ActivityLookup {
    /// Code written into the feature vector
    pub fn code(self) -> u32 {
        match self {
            ActivityLookup::Known(code) => code,
            ActivityLookup::Unknown => DEFAULT_ACTIVITY_CODE,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, ActivityLookup::Known(_))
    }
}

/// Immutable activity name to code table. Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityMapping {
    codes: HashMap<String, u32>,
}

impl ActivityMapping {
    /// Build a table from `(name, code)` pairs; a repeated name keeps its last code
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            codes: entries
                .into_iter()
                .map(|(name, code)| (name.into(), code))
                .collect(),
        }
    }

    /// Activity table of the v1 model
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ACTIVITIES)
    }

    pub fn lookup(&self, name: &str) -> ActivityLookup {
        self.codes
            .get(name)
            .map_or(ActivityLookup::Unknown, |&code| ActivityLookup::Known(code))
    }

    /// Code for `name`, falling back to [`DEFAULT_ACTIVITY_CODE`]
    pub fn code(&self, name: &str) -> u32 {
        self.lookup(name).code()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// Known activity names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
