//! # CLI Layer
//!
//! One possible UI client for libris. This is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Parses arguments
//! - Formats output for humans
//! - Installs a log subscriber
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the data directory, loads config and the collection
//! - `handle_*()`: Per-command handlers that call the API and print the result
//!
//! Business rules never live here: handlers translate flags into API calls and
//! `CmdResult`s into text.

use super::render::{
    print_messages, render_book_details, render_book_list, render_config, render_genre_groups,
    render_stats,
};
use super::setup::{AddArgs, Cli, Commands, EditArgs};
use clap::Parser;
use directories::ProjectDirs;
use libris::api::{CmdResult, ConfigAction, LibrisApi, ListFilter};
use libris::config::LibrisConfig;
use libris::error::{LibrisError, Result};
use libris::logging::{init_logging, LogConfig};
use libris::model::{BookInput, BookPatch, BookStatus};
use libris::store::fs::FsBlobStore;
use std::path::PathBuf;
use tracing::{debug, warn};

struct AppContext {
    api: LibrisApi<FsBlobStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add(&mut ctx, args),
        Some(Commands::List {
            status,
            favorites,
            genre,
            limit,
        }) => handle_list(
            &ctx,
            ListFilter {
                status,
                favorites_only: favorites,
                genre,
                limit,
            },
        ),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Edit(args)) => handle_edit(&mut ctx, args),
        Some(Commands::Status { id, status }) => handle_status(&mut ctx, &id, status),
        Some(Commands::Favorite { id }) => handle_favorite(&mut ctx, &id),
        Some(Commands::Remove { id }) => handle_remove(&mut ctx, &id),
        Some(Commands::Search { query }) => handle_search(&ctx, &query.join(" ")),
        Some(Commands::Filter {
            statuses,
            min_rating,
        }) => handle_filter(&ctx, &statuses, min_rating),
        Some(Commands::Genres { name }) => handle_genres(&ctx, name),
        Some(Commands::Random { count }) => handle_random(&ctx, count),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, ListFilter::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = LibrisConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config.json, using defaults");
        LibrisConfig::default()
    });

    let store = FsBlobStore::new(data_dir.clone());
    let api = LibrisApi::open(store, config, data_dir)?;
    Ok(AppContext { api })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "libris", "libris")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            LibrisError::Api("Could not determine a data directory; pass --data-dir".into())
        })
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let input = BookInput {
        title: args.title.join(" "),
        author: args.author,
        synopsis: args.synopsis.unwrap_or_default(),
        genre: args.genre,
        cover_image_uri: Some(args.cover),
        status: args.status,
        date_start: args.start,
        date_end: args.end,
        rating: args.rating,
        notes: args.notes,
        favorite: args.favorite,
    };
    let result = ctx.api.add_book(input)?;
    print_affected(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: ListFilter) -> Result<()> {
    let result = ctx.api.list_books(&filter)?;
    print!("{}", render_book_list(&result.listed_books));
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_book(id)?;
    print!("{}", render_book_details(&result.listed_books));
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, args: EditArgs) -> Result<()> {
    let patch = edit_patch(&args);
    let result = ctx.api.update_book(&args.id, &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn edit_patch(args: &EditArgs) -> BookPatch {
    let mut patch = BookPatch::new();
    patch.title = args.title.clone();
    patch.author = args.author.clone();
    patch.synopsis = args.synopsis.clone();
    patch.genre = args.genre.clone();
    patch.cover_image_uri = args.cover.clone();
    patch.status = args.status;
    patch.date_start = settable(args.start, args.clear_start);
    patch.date_end = settable(args.end, args.clear_end);
    patch.rating = settable(args.rating, args.clear_rating);
    patch.notes = settable(args.notes.clone(), args.clear_notes);
    patch
}

/// `--x VALUE` sets, `--clear-x` clears, neither leaves the field alone.
fn settable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    match (value, clear) {
        (Some(v), _) => Some(Some(v)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

fn handle_status(ctx: &mut AppContext, id: &str, status: BookStatus) -> Result<()> {
    let result = ctx.api.set_status(id, status)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_favorite(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.toggle_favorite(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.remove_book(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, query: &str) -> Result<()> {
    let result = ctx.api.search_books(query)?;
    if !query.trim().is_empty() {
        print!("{}", render_book_list(&result.listed_books));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter(ctx: &AppContext, statuses: &[BookStatus], min_rating: u8) -> Result<()> {
    let result = ctx.api.filter_books(statuses, min_rating)?;
    if !result.listed_books.is_empty() {
        print!("{}", render_book_list(&result.listed_books));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_genres(ctx: &AppContext, name: Option<String>) -> Result<()> {
    match name {
        Some(genre) => {
            let result = ctx.api.genre_books(&genre)?;
            if !result.listed_books.is_empty() {
                print!("{}", render_book_list(&result.listed_books));
            }
            print_messages(&result.messages);
        }
        None => {
            let result = ctx.api.genres()?;
            print!("{}", render_genre_groups(&result.genre_groups));
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_random(ctx: &AppContext, count: Option<usize>) -> Result<()> {
    let result = ctx.api.random_books(count)?;
    if !result.listed_books.is_empty() {
        print!("{}", render_book_list(&result.listed_books));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print!("{}", render_stats(stats, &result.histogram));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = action == ConfigAction::ShowAll;

    let result = ctx.api.configure(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_affected(result: &CmdResult) {
    if !result.affected_books.is_empty() {
        print!("{}", render_book_list(&result.affected_books));
    }
}
