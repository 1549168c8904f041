use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::entity::{now, validate_title, Note, NoteType};
use crate::error::{NoirError, Result};

const NOTES_TABLE: &str = "notes";

/// Partial update payload for a note. Only mutable fields are representable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub note_type: Option<NoteType>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.note_type.is_none()
    }
}

/// Query for `NoteStore::filter`. `note_type` takes precedence over `completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub note_type: Option<NoteType>,
    pub completed: Option<bool>,
}

/// A note as stored in the `notes` table. The id is the table key, not a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NoteRecord {
    title: String,
    note_type: NoteType,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::optional")]
    completed_at: Option<NaiveDateTime>,
}

impl NoteRecord {
    fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            note_type: note.note_type,
            created_at: note.created_at,
            completed_at: note.completed_at,
        }
    }

    fn to_note(&self, id: u64) -> Note {
        Note {
            id,
            title: self.title.clone(),
            note_type: self.note_type,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// In-memory view of the whole document file.
#[derive(Debug, Default)]
struct Document {
    /// Every table other than `notes`, written back untouched.
    other_tables: Map<String, Value>,
    notes: BTreeMap<u64, NoteRecord>,
}

impl Document {
    /// `None` once the highest id is `u64::MAX`.
    fn next_id(&self) -> Option<u64> {
        match self.notes.keys().next_back() {
            Some(last) => last.checked_add(1),
            None => Some(1),
        }
    }

    fn iter_notes(&self) -> impl Iterator<Item = Note> + '_ {
        self.notes.iter().map(|(id, record)| record.to_note(*id))
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.other_tables.len() + 1))?;
        for (name, table) in &self.other_tables {
            map.serialize_entry(name, table)?;
        }
        // u64 keys are written as JSON strings, in ascending id order
        map.serialize_entry(NOTES_TABLE, &self.notes)?;
        map.end()
    }
}

/// Note repository over a single JSON document file.
///
/// Every call re-reads the file, and every mutation writes it back before
/// returning. There is no locking: one writer at a time is assumed.
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    /// Open the store at the configured path, creating its directory if needed.
    ///
    /// The file itself is created by the first mutation.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let path = config.db_path().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opened note store");
        Ok(Self { path })
    }

    /// Path of the backing document file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a note, assign it the next free id and persist it.
    pub fn add(&self, title: &str, note_type: NoteType) -> Result<Note> {
        let mut note = Note::new(title, note_type)?;

        let mut doc = self.load()?;
        note.id = doc
            .next_id()
            .ok_or_else(|| self.corrupt("no note ids left after u64::MAX"))?;
        doc.notes.insert(note.id, NoteRecord::from_note(&note));
        self.save(&doc)?;

        info!(id = note.id, note_type = %note.note_type, "added note");
        Ok(note)
    }

    /// Get a note by id. An unknown id is `Ok(None)`.
    pub fn get_by_id(&self, id: u64) -> Result<Option<Note>> {
        let doc = self.load()?;
        Ok(doc.notes.get(&id).map(|record| record.to_note(id)))
    }

    /// All notes in insertion order
    pub fn get_all(&self) -> Result<Vec<Note>> {
        Ok(self.load()?.iter_notes().collect())
    }

    pub fn get_by_type(&self, note_type: NoteType) -> Result<Vec<Note>> {
        Ok(self
            .load()?
            .iter_notes()
            .filter(|n| n.note_type == note_type)
            .collect())
    }

    pub fn get_by_completed(&self, completed: bool) -> Result<Vec<Note>> {
        Ok(self
            .load()?
            .iter_notes()
            .filter(|n| n.is_completed() == completed)
            .collect())
    }

    /// Apply at most one filter: a type filter wins over a completion filter.
    pub fn filter(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        if let Some(note_type) = filter.note_type {
            return self.get_by_type(note_type);
        }
        if let Some(completed) = filter.completed {
            return self.get_by_completed(completed);
        }
        self.get_all()
    }

    /// Apply a partial update. Returns `false` for an empty update or an
    /// unknown id; neither touches the file.
    pub fn update(&self, id: u64, updates: NoteUpdate) -> Result<bool> {
        if updates.is_empty() {
            return Ok(false);
        }
        let title = updates.title.as_deref().map(validate_title).transpose()?;

        let mut doc = self.load()?;
        let Some(record) = doc.notes.get_mut(&id) else {
            return Ok(false);
        };

        if let Some(title) = title {
            record.title = title;
        }
        if let Some(note_type) = updates.note_type {
            record.note_type = note_type;
        }
        self.save(&doc)?;

        info!(id, "updated note");
        Ok(true)
    }

    /// Mark a note completed now. Completing an already-completed note
    /// refreshes its timestamp.
    pub fn complete(&self, id: u64) -> Result<bool> {
        let mut doc = self.load()?;
        let Some(record) = doc.notes.get_mut(&id) else {
            return Ok(false);
        };

        record.completed_at = Some(now());
        self.save(&doc)?;

        info!(id, "completed note");
        Ok(true)
    }

    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut doc = self.load()?;
        if doc.notes.remove(&id).is_none() {
            return Ok(false);
        }
        self.save(&doc)?;

        info!(id, "deleted note");
        Ok(true)
    }

    fn load(&self) -> Result<Document> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Document::default());
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| self.corrupt(format!("invalid JSON: {}", e)))?;
        let Value::Object(mut tables) = value else {
            return Err(self.corrupt("top level is not an object of tables"));
        };

        let notes = match tables.remove(NOTES_TABLE) {
            None => BTreeMap::new(),
            Some(Value::Object(rows)) => self.parse_notes_table(rows)?,
            Some(_) => return Err(self.corrupt("`notes` table is not an object")),
        };

        debug!(count = notes.len(), "loaded notes");
        Ok(Document {
            other_tables: tables,
            notes,
        })
    }

    fn parse_notes_table(&self, rows: Map<String, Value>) -> Result<BTreeMap<u64, NoteRecord>> {
        let mut notes = BTreeMap::new();

        for (key, row) in rows {
            // only the canonical spelling is accepted, so "01" cannot shadow "1"
            let id = match key.parse::<u64>() {
                Ok(id) if id > 0 && id.to_string() == key => id,
                _ => return Err(self.corrupt(format!("invalid note id `{}`", key))),
            };
            let record: NoteRecord = serde_json::from_value(row)
                .map_err(|e| self.corrupt(format!("note {}: {}", id, e)))?;
            if record.title.trim().is_empty() {
                return Err(self.corrupt(format!("note {}: title is empty", id)));
            }
            if notes.insert(id, record).is_some() {
                return Err(self.corrupt(format!("duplicate note id {}", id)));
            }
        }

        Ok(notes)
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let bytes = serde_json::to_vec(doc)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn corrupt(&self, reason: impl Into<String>) -> NoirError {
        NoirError::CorruptStore {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

/// ISO-8601 timestamps in naive local time.
///
/// Values carrying a UTC offset are accepted on read and reduced to their
/// wall-clock time.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }

    fn parse(s: &str) -> Result<NaiveDateTime, String> {
        if let Ok(naive) = s.parse::<NaiveDateTime>() {
            return Ok(naive);
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_local())
            .map_err(|_| format!("invalid timestamp `{}`", s))
    }

    pub mod optional {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::parse(&s).map_err(de::Error::custom))
                .transpose()
        }
    }
}
