//! Stored shapes of the client store.

use serde::{Deserialize, Serialize};

use crate::model::{Assessment, Candidate, Job};
use crate::query::{CandidateFilters, Pagination};

/// Version written next to the persisted preferences.
pub const PREFERENCES_VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The auto-persisted UI preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
    pub candidate_filters: CandidateFilters,
}

/// `{"state": ..., "version": n}` wrapper of the preferences key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

impl<T> Versioned<T> {
    pub fn current(state: T) -> Self {
        Self {
            state,
            version: PREFERENCES_VERSION,
        }
    }
}

/// A full-state snapshot. Absent fields leave the store untouched on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_collapsed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<Job>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_filters: Option<CandidateFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessments: Option<Vec<Assessment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_pagination: Option<Pagination>,
}

impl Snapshot {
    pub fn touches_preferences(&self) -> bool {
        self.theme.is_some() || self.sidebar_collapsed.is_some() || self.candidate_filters.is_some()
    }
}
