mod json_store;

pub use json_store::{NoteFilter, NoteStore, NoteUpdate};
