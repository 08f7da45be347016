//! Student record.
//!
//! A student is the unit being grouped. The core only reads students;
//! callers own the roster.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Personality type value meaning "not classified".
pub const UNCLASSIFIED: u8 = 0;

/// Highest valid personality type.
pub const MAX_PERSONALITY_TYPE: u8 = 9;

/// A student to be placed in a group.
///
/// Preference sets hold student ids. Ids that do not belong to the roster
/// are allowed and simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Personality type (enneatype) 1–9, or 0 when unclassified.
    #[serde(default, alias = "eneatipo")]
    pub personality_type: u8,
    /// Ids of classmates this student wants to work with.
    #[serde(default, alias = "favoritos")]
    pub favorites: BTreeSet<String>,
    /// Ids of classmates this student does not want to work with.
    #[serde(default, alias = "no_favoritos")]
    pub non_favorites: BTreeSet<String>,
}

impl Student {
    /// Creates an unclassified student with no preferences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            personality_type: UNCLASSIFIED,
            favorites: BTreeSet::new(),
            non_favorites: BTreeSet::new(),
        }
    }

    /// Sets the personality type.
    pub fn with_personality_type(mut self, personality_type: u8) -> Self {
        self.personality_type = personality_type;
        self
    }

    /// Adds a favorite classmate.
    pub fn with_favorite(mut self, id: impl Into<String>) -> Self {
        self.favorites.insert(id.into());
        self
    }

    /// Adds a non-favorite classmate.
    pub fn with_non_favorite(mut self, id: impl Into<String>) -> Self {
        self.non_favorites.insert(id.into());
        self
    }

    /// Whether `id` is among this student's favorites.
    pub fn likes(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Whether `id` is among this student's non-favorites.
    pub fn dislikes(&self, id: &str) -> bool {
        self.non_favorites.contains(id)
    }
}
