use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use libris::model::{parse_date, BookStatus, MAX_RATING};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "libris", bin_name = "libris", version)]
#[command(
    about = "Personal book catalogue: track what you read, rate it, see your stats",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the collection and config.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalogue
    #[command(alias = "a", display_order = 1)]
    Add(AddArgs),

    /// List books, newest first
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only books with this status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<BookStatus>,

        /// Only favourites
        #[arg(short, long)]
        favorites: bool,

        /// Only books of this genre
        #[arg(short, long)]
        genre: Option<String>,

        /// Show at most this many books
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show every field of one book
    #[command(alias = "v", display_order = 3)]
    Show {
        /// Book id or a unique prefix of it
        id: String,
    },

    /// Change fields of a book
    #[command(alias = "e", display_order = 4)]
    Edit(EditArgs),

    /// Move a book to another reading status
    #[command(display_order = 5)]
    Status {
        /// Book id or a unique prefix of it
        id: String,

        /// to-read, reading or finished
        #[arg(value_parser = parse_status)]
        status: BookStatus,
    },

    /// Toggle the favourite flag
    #[command(alias = "fav", display_order = 6)]
    Favorite {
        /// Book id or a unique prefix of it
        id: String,
    },

    /// Remove a book
    #[command(alias = "rm", display_order = 7)]
    Remove {
        /// Book id or a unique prefix of it
        id: String,
    },

    /// Find books by title or author
    #[command(display_order = 10)]
    Search {
        /// Words to look for (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Books matching any of the given statuses and a minimum rating
    #[command(display_order = 11)]
    Filter {
        /// Accepted status (repeat for more than one)
        #[arg(short, long = "status", value_parser = parse_status)]
        statuses: Vec<BookStatus>,

        /// Lowest rating to include (0 for any)
        #[arg(short = 'r', long, default_value_t = 0)]
        min_rating: u8,
    },

    /// Books grouped by genre, or the books of one genre
    #[command(display_order = 12)]
    Genres {
        /// Genre to list
        name: Option<String>,
    },

    /// Pick books at random
    #[command(display_order = 13)]
    Random {
        /// How many to pick (defaults to the random-picks setting)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Reading statistics
    #[command(display_order = 14)]
    Stats,

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (blob-name, last-added, random-picks)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title words (joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    #[arg(short, long)]
    pub author: String,

    #[arg(short, long)]
    pub genre: String,

    /// Path or URI of the cover image
    #[arg(short, long)]
    pub cover: String,

    #[arg(short, long, value_parser = parse_status, default_value = "to-read")]
    pub status: BookStatus,

    /// Start date (YYYY-MM-DD); today when omitted and the status needs one
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    #[arg(short, long, value_parser = parse_rating)]
    pub rating: Option<u8>,

    #[arg(long)]
    pub synopsis: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Mark as favourite
    #[arg(long)]
    pub favorite: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Book id or a unique prefix of it
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub cover: Option<String>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<BookStatus>,

    #[arg(long, value_parser = parse_date_arg, conflicts_with = "clear_start")]
    pub start: Option<NaiveDate>,

    #[arg(long)]
    pub clear_start: bool,

    #[arg(long, value_parser = parse_date_arg, conflicts_with = "clear_end")]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub clear_end: bool,

    #[arg(long, value_parser = parse_rating, conflicts_with = "clear_rating")]
    pub rating: Option<u8>,

    #[arg(long)]
    pub clear_rating: bool,

    #[arg(long)]
    pub synopsis: Option<String>,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    #[arg(long)]
    pub clear_notes: bool,
}

fn parse_status(s: &str) -> Result<BookStatus, String> {
    s.parse().map_err(|_| {
        let known: Vec<_> = BookStatus::ALL.iter().map(|st| st.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn parse_rating(s: &str) -> Result<u8, String> {
    match s.trim().parse::<u8>() {
        Ok(n) if (1..=MAX_RATING).contains(&n) => Ok(n),
        _ => Err(format!("expected a whole number from 1 to {}", MAX_RATING)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("libris").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn add_joins_title_words() {
        let cli = parse(&[
            "add", "The", "Name", "of", "the", "Wind", "-a", "Rothfuss", "-g", "fantasy", "-c",
            "cover.jpg",
        ]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.title.join(" "), "The Name of the Wind");
                assert_eq!(args.status, BookStatus::ToRead);
                assert!(!args.favorite);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_requires_cover() {
        let res = Cli::try_parse_from(["libris", "add", "Dune", "-a", "Herbert", "-g", "Sci-Fi"]);
        assert!(res.is_err());
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let res = Cli::try_parse_from(["libris", "edit", "abc", "--rating", "6"]);
        assert!(res.is_err());
    }

    #[test]
    fn dates_must_be_exact() {
        let res = Cli::try_parse_from(["libris", "edit", "abc", "--start", "2024-01-01junk"]);
        assert!(res.is_err());
        let res = Cli::try_parse_from(["libris", "edit", "abc", "--end", "2024-01-01T09:00:00"]);
        assert!(res.is_err());
    }

    #[test]
    fn edit_cannot_set_and_clear_together() {
        let res = Cli::try_parse_from([
            "libris",
            "edit",
            "abc",
            "--start",
            "2024-01-01",
            "--clear-start",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn filter_collects_statuses() {
        let cli = parse(&["filter", "-s", "reading", "--status", "finished", "-r", "4"]);
        match cli.command {
            Some(Commands::Filter {
                statuses,
                min_rating,
            }) => {
                assert_eq!(statuses, [BookStatus::Reading, BookStatus::Finished]);
                assert_eq!(min_rating, 4);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = parse(&["stats", "--data-dir", "/tmp/books", "-vv"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/books")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn no_command_is_allowed() {
        assert!(parse(&[]).command.is_none());
    }
}
