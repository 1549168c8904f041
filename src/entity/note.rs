// src/entity/note.rs
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{NoirError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoteType {
    Project,
    Infra,
    #[default]
    Personal,
}

impl NoteType {
    pub const ALL: [NoteType; 3] = [NoteType::Project, NoteType::Infra, NoteType::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Project => "PROJECT",
            NoteType::Infra => "INFRA",
            NoteType::Personal => "PERSONAL",
        }
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NoteType {
    type Err = NoirError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PROJECT" => Ok(NoteType::Project),
            "INFRA" => Ok(NoteType::Infra),
            "PERSONAL" => Ok(NoteType::Personal),
            _ => Err(NoirError::InvalidNoteType(s.to_string())),
        }
    }
}

/// A single note. `id` is 0 until the store has persisted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub note_type: NoteType,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl Note {
    /// Build a new, unpersisted note. The title is trimmed and must not be empty.
    pub fn new(title: &str, note_type: NoteType) -> Result<Self> {
        Ok(Self {
            id: 0,
            title: validate_title(title)?,
            note_type,
            created_at: now(),
            completed_at: None,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn status_display(&self) -> &'static str {
        if self.is_completed() {
            "✅ Completed"
        } else {
            "⏳ Pending"
        }
    }

    /// `created_at` at minute precision, e.g. `2026-10-18 09:15`.
    pub fn created_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

pub(crate) fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(NoirError::Validation("title must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Current local wall-clock time, truncated to microseconds.
pub(crate) fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}
