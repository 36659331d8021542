//! Command-line host for `quicknote_core`.
//!
//! # Responsibility
//! - Resolve the data directory, start logging, open the SQLite store.
//! - Map subcommands onto repository, preference, and session operations.

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use log::info;
use quicknote_core::{
    default_log_level, init_logging, AppState, DataDir, Identity, NoteId, NoteInput,
    SqliteKvStore, StorageKeys,
};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(&cli.data_dir)?;
    data_dir
        .ensure_exists()
        .with_context(|| format!("failed to create `{}`", data_dir.root().display()))?;

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &data_dir.log_dir()).context("failed to initialize logging")?;

    let kv = SqliteKvStore::open(data_dir.db_path())
        .with_context(|| format!("failed to open `{}`", data_dir.db_path().display()))?;
    let mut app = AppState::open(&kv, &StorageKeys::default());

    run(&mut app, cli.command)
}

fn run(app: &mut AppState<'_, SqliteKvStore>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            title,
            content,
            tags,
        } => {
            let note = app
                .notes_mut()
                .create(&NoteInput::new(title, content, tags))?;
            println!("{}", note.id());
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
        } => {
            let id = NoteId::from(id);
            let Some(current) = app.notes().get(&id) else {
                println!("No note with id {id}.");
                return Ok(());
            };
            let mut input = NoteInput::from_note(current);
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(content) = content {
                input.content = content;
            }
            if let Some(tags) = tags {
                input.tags_raw = tags;
            }
            if let Some(note) = app.notes_mut().update(&id, &input)? {
                println!("Updated {} ({}).", note.id(), note.title());
            }
        }
        Command::Rm { id } => {
            let id = NoteId::from(id);
            if app.notes_mut().delete(&id)? {
                println!("Deleted {id}.");
            } else {
                println!("No note with id {id}.");
            }
        }
        Command::List { search, tag } => {
            let mode = app.preferences().load();
            let hits = app.notes().query(&search, &tag);
            info!(
                "event=cli_list module=cli status=ok hits={} mode={mode}",
                hits.len()
            );
            print!("{}", render::render_notes(&hits, mode));
        }
        Command::Tags => {
            for tag in app.notes().tags() {
                println!("{tag}");
            }
        }
        Command::View { mode } => match mode {
            Some(mode) => {
                app.preferences().save(mode.into())?;
                println!("View mode set to {}.", app.preferences().load());
            }
            None => println!("{}", app.preferences().load()),
        },
        Command::Login { email, name } => {
            let identity = Identity::new(&email, name.as_deref())
                .context("an email address is required to log in")?;
            app.session().save(Some(&identity))?;
            println!("Signed in as {}.", identity.display_name());
        }
        Command::Logout => {
            app.session().clear()?;
            println!("Signed out.");
        }
        Command::Whoami => match app.session().load() {
            Some(identity) => match identity.name.as_deref() {
                Some(name) => println!("{name} <{}>", identity.email),
                None => println!("{}", identity.email),
            },
            None => println!("Not signed in."),
        },
    }
    Ok(())
}

/// Logging requires an absolute directory; relative paths resolve against
/// the working directory.
fn resolve_data_dir(path: &Path) -> Result<DataDir> {
    if path.is_absolute() {
        return Ok(DataDir::new(path));
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(DataDir::new(cwd.join(path)))
}
