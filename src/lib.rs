pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::StoreConfig;
pub use entity::{Note, NoteType};
pub use error::{NoirError, Result};
pub use storage::{NoteFilter, NoteStore, NoteUpdate};
