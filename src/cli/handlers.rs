use std::io;

use tracing::warn;

use crate::cli::table::render_notes;
use crate::config::StoreConfig;
use crate::entity::{Note, NoteType};
use crate::error::{NoirError, Result};
use crate::storage::{NoteFilter, NoteStore, NoteUpdate};

pub fn handle_add(config: &StoreConfig, title: String, note_type: String, json: bool) -> Result<()> {
    let note_type: NoteType = note_type.parse()?;
    let store = NoteStore::open(config)?;

    let note = store.add(&title, note_type)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!(
            "✅ Added note: {} (ID: {}, Type: {})",
            note.title, note.id, note.note_type
        );
    }

    Ok(())
}

pub fn handle_list(
    config: &StoreConfig,
    note_type: Option<String>,
    completed: Option<bool>,
    json: bool,
) -> Result<()> {
    let filter = NoteFilter {
        note_type: note_type.map(|s| s.parse::<NoteType>()).transpose()?,
        completed,
    };
    if filter.note_type.is_some() && filter.completed.is_some() {
        warn!("--note-type takes precedence; ignoring --completed");
    }

    let store = NoteStore::open(config)?;
    let notes = store.filter(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("📝 No notes found!");
    } else {
        println!("\n📝 Found {} notes:\n", notes.len());
        print!("{}", render_notes(&notes));
    }

    Ok(())
}

pub fn handle_get(config: &StoreConfig, id: u64, json: bool) -> Result<()> {
    let store = NoteStore::open(config)?;
    let note = find_note(&store, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Note {}", note.id);
        println!("  Title:     {}", note.title);
        println!("  Type:      {}", note.note_type);
        println!("  Status:    {}", note.status_display());
        println!("  Created:   {}", note.created_display());
        if let Some(completed_at) = note.completed_at {
            println!("  Completed: {}", completed_at.format("%Y-%m-%d %H:%M"));
        }
    }

    Ok(())
}

pub fn handle_update(
    config: &StoreConfig,
    id: u64,
    title: Option<String>,
    note_type: Option<String>,
) -> Result<()> {
    let note_type: Option<NoteType> = note_type.map(|s| s.parse::<NoteType>()).transpose()?;
    let store = NoteStore::open(config)?;
    let note = find_note(&store, id)?;

    // Only send fields whose values actually change
    let mut updates = NoteUpdate::default();
    if let Some(title) = title {
        if title.trim() != note.title {
            updates.title = Some(title);
        }
    }
    if let Some(note_type) = note_type {
        if note_type != note.note_type {
            updates.note_type = Some(note_type);
        }
    }

    if updates.is_empty() {
        println!(
            "ℹ️ No new information provided or values are identical to the current ones for note ID {}. No update performed.",
            id
        );
        return Ok(());
    }

    if !store.update(id, updates)? {
        return Err(NoirError::NoteNotFound(id));
    }

    println!("✅ Note ID {} updated successfully.", id);
    Ok(())
}

pub fn handle_complete(config: &StoreConfig, id: u64) -> Result<()> {
    let store = NoteStore::open(config)?;

    if !store.complete(id)? {
        warn!(id, "complete: no such note");
        return Err(NoirError::NoteNotFound(id));
    }

    println!("✅ Note ID {} marked as completed.", id);
    Ok(())
}

pub fn handle_delete(config: &StoreConfig, id: u64, force: bool) -> Result<()> {
    let store = NoteStore::open(config)?;
    let note = find_note(&store, id)?;

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note {} - {}? [y/N] ", note.id, note.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NoirError::ConfirmationRequired);
        }
    }

    if !store.delete(id)? {
        return Err(NoirError::NoteNotFound(id));
    }

    println!("🗑️ Deleted note {} - {}", note.id, note.title);
    Ok(())
}

fn find_note(store: &NoteStore, id: u64) -> Result<Note> {
    store.get_by_id(id)?.ok_or_else(|| {
        warn!(id, "no such note");
        NoirError::NoteNotFound(id)
    })
}
