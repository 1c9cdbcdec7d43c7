// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Participant profile model for storage and matching.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Profile document as written by the profile-editing flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Auth provider user ID (also used as document ID)
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Free-form, compared after normalization
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Comma-delimited free text
    #[serde(default)]
    pub gift_preferences: Option<String>,
    #[serde(default)]
    pub profile_completed: bool,
    #[serde(default)]
    pub is_active: bool,
}

impl ProfileRecord {
    /// Completed and active profiles take part in matching.
    pub fn is_eligible(&self) -> bool {
        self.profile_completed && self.is_active
    }
}

/// Profile in the shape the pairing engine consumes.
///
/// Tag sets are already normalized, so scoring never touches raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: String,
    pub gender: Option<String>,
    pub interests: BTreeSet<String>,
    pub gift_tags: BTreeSet<String>,
}

impl From<&ProfileRecord> for Participant {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            gender: record
                .gender
                .as_deref()
                .map(|g| g.trim().to_lowercase())
                .filter(|g| !g.is_empty()),
            interests: normalize_tags(&record.interests),
            gift_tags: split_gift_preferences(record.gift_preferences.as_deref().unwrap_or("")),
        }
    }
}

/// Trim, lowercase and dedupe a list of tags, dropping empty entries.
pub fn normalize_tags<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Parse the comma-delimited gift preference text into a tag set.
pub fn split_gift_preferences(raw: &str) -> BTreeSet<String> {
    normalize_tags(raw.split(','))
}
