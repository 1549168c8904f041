use clap::Parser;
use noir::cli::{
    handle_add, handle_complete, handle_delete, handle_get, handle_list, handle_update, Cli,
    Commands,
};
use noir::{logging, StoreConfig};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = StoreConfig::resolve(cli.db);

    let result = match cli.command {
        Commands::Add {
            title,
            note_type,
            json,
        } => handle_add(&config, title, note_type, json),
        Commands::List {
            note_type,
            completed,
            json,
        } => handle_list(&config, note_type, completed, json),
        Commands::Get { id, json } => handle_get(&config, id, json),
        Commands::Update {
            id,
            title,
            note_type,
        } => handle_update(&config, id, title, note_type),
        Commands::Complete { id } => handle_complete(&config, id),
        Commands::Delete { id, force } => handle_delete(&config, id, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
