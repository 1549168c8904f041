mod commands;
mod handlers;
mod table;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_complete, handle_delete, handle_get, handle_list, handle_update,
};
pub use table::render_notes;
