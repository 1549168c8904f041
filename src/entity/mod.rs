mod note;

pub use note::{Note, NoteType};

pub(crate) use note::{now, validate_title};
