//! Terminal rendering for command results.
//!
//! Every `render_*` function returns a `String` so output can be asserted on
//! without capturing stdout. Width math stays Unicode-aware: titles are cut by
//! display columns, not bytes or chars.

use colored::Colorize;
use libris::api::{CmdMessage, MessageLevel};
use libris::config::LibrisConfig;
use libris::model::{Book, BookStatus, MAX_RATING};
use libris::views::{GenreCount, GenreGroup, Stats};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const ID_WIDTH: usize = 8;
const AUTHOR_WIDTH: usize = 24;
const STATUS_WIDTH: usize = 9;
const FAVORITE_MARKER: &str = "♥";
const HISTOGRAM_BAR: &str = "█";
const HISTOGRAM_WIDTH: usize = 30;

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

/// One line per book: short id, title, author, status and rating.
pub fn render_book_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let fixed = ID_WIDTH + 2 + AUTHOR_WIDTH + 2 + STATUS_WIDTH + 2 + MAX_RATING as usize + 2;
    let title_width = LINE_WIDTH.saturating_sub(fixed);

    let mut out = String::new();
    for book in books {
        let title = truncate_to_width(&book.title, title_width);
        let author = truncate_to_width(&book.author, AUTHOR_WIDTH);
        let marker = if book.favorite { FAVORITE_MARKER } else { " " };

        out.push_str(&format!(
            "{}  {}{}  {}{}  {}  {} {}\n",
            short_id(&book.id).yellow(),
            title,
            pad(&title, title_width),
            author.dimmed(),
            pad(&author, AUTHOR_WIDTH),
            status_cell(book.status),
            rating_stars(book.rating),
            marker.red(),
        ));
    }
    out
}

/// Every field of each book, separated by a rule.
pub fn render_book_details(books: &[Book]) -> String {
    let mut out = String::new();
    for (i, book) in books.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        out.push_str(&format!("{} {}\n", short_id(&book.id).yellow(), book.title.bold()));
        out.push_str("--------------------------------\n");
        field(&mut out, "Id", &book.id);
        field(&mut out, "Author", &book.author);
        field(&mut out, "Genre", book.genre_bucket());
        field(&mut out, "Status", book.status.label());
        if let Some(start) = book.date_start {
            field(&mut out, "Started", &start.to_string());
        }
        if let Some(end) = book.date_end {
            field(&mut out, "Finished", &end.to_string());
        }
        if let Some(days) = book.read_days() {
            field(&mut out, "Read in", &format!("{} days", days));
        }
        if book.rating.is_some() {
            field(&mut out, "Rating", &rating_stars(book.rating));
        }
        if book.favorite {
            field(&mut out, "Favourite", "yes");
        }
        if let Some(cover) = &book.cover_image_uri {
            field(&mut out, "Cover", cover);
        }
        if !book.synopsis.trim().is_empty() {
            out.push_str(&format!("\n{}\n", book.synopsis.trim()));
        }
        if let Some(notes) = &book.notes {
            out.push_str(&format!("\n{}\n{}\n", "Notes".bold(), notes.trim()));
        }
    }
    out
}

pub fn render_genre_groups(groups: &[GenreGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "{} {}\n",
            group.genre.bold(),
            format!("({})", group.books.len()).dimmed()
        ));
        if let Some(cover) = group.cover_image_uri() {
            out.push_str(&format!("  {}\n", cover.dimmed()));
        }
        for book in &group.books {
            let title = truncate_to_width(&book.title, LINE_WIDTH - ID_WIDTH - 6);
            out.push_str(&format!("    {}  {}\n", short_id(&book.id).yellow(), title));
        }
    }
    out
}

pub fn render_stats(stats: &Stats, histogram: &[GenreCount]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Reading stats".bold()));
    stat(&mut out, "Books", stats.total.to_string());
    stat(&mut out, "Finished", stats.finished_count.to_string());
    stat(&mut out, "Reading", stats.reading_count.to_string());
    stat(&mut out, "To read", stats.to_read_count.to_string());
    stat(&mut out, "Favourites", stats.favorite_count.to_string());
    stat(&mut out, "Average rating", format!("{:.1}", stats.average_rating));
    stat(&mut out, "Average days", format!("{:.1}", stats.average_read_days));

    if histogram.is_empty() {
        return out;
    }

    out.push_str(&format!("\n{}\n", "Finished by genre".bold()));
    let label_width = histogram
        .iter()
        .map(|g| g.genre.width())
        .max()
        .unwrap_or(0);
    let max = histogram.iter().map(|g| g.count).max().unwrap_or(1).max(1);
    for entry in histogram {
        let bar_len = (entry.count * HISTOGRAM_WIDTH).div_ceil(max);
        out.push_str(&format!(
            "  {}{}  {} {}\n",
            entry.genre,
            pad(&entry.genre, label_width),
            HISTOGRAM_BAR.repeat(bar_len).cyan(),
            entry.count
        ));
    }
    out
}

pub fn render_config(config: &LibrisConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<10} {}\n", format!("{}:", label).dimmed(), value));
}

fn stat(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("  {:<16}{}\n", label, value));
}

fn status_cell(status: BookStatus) -> String {
    let label = format!("{:<width$}", status.label(), width = STATUS_WIDTH);
    match status {
        BookStatus::ToRead => label.normal().to_string(),
        BookStatus::Reading => label.cyan().to_string(),
        BookStatus::Finished => label.green().to_string(),
    }
}

fn rating_stars(rating: Option<u8>) -> String {
    let filled = usize::from(rating.unwrap_or(0).min(MAX_RATING));
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_RATING as usize - filled)
    )
}

fn short_id(id: &str) -> String {
    let short = truncate_chars(id, ID_WIDTH);
    format!("{:<width$}", short, width = ID_WIDTH)
}

fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn pad(shown: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(shown.width()))
}

/// Cut `s` to at most `max_width` display columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris::model::BookInput;

    fn book(id: &str, title: &str, status: BookStatus) -> Book {
        colored::control::set_override(false);
        let today = libris::model::parse_date("2024-06-01").unwrap();
        BookInput::new(title, "Ursula K. Le Guin", "Fantasy", "cover.jpg", status)
            .into_book(id.to_string(), today)
            .unwrap()
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(render_book_list(&[]).trim(), "No books found.");
    }

    #[test]
    fn list_line_has_short_id_title_and_status() {
        let b = book("0123456789abcdef", "A Wizard of Earthsea", BookStatus::Reading);
        let out = render_book_list(&[b]);
        assert!(out.starts_with("01234567  A Wizard of Earthsea"));
        assert!(out.contains("Reading"));
        assert!(out.contains("☆☆☆☆☆"));
        assert!(!out.contains("89abcdef"));
    }

    #[test]
    fn list_lines_share_a_width() {
        let short = book("aaaaaaaa", "Dune", BookStatus::ToRead);
        let wide = book("bbbbbbbb", "ノルウェイの森", BookStatus::ToRead);
        let out = render_book_list(&[short, wide]);
        let widths: Vec<_> = out.lines().map(|l| l.width()).collect();
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("Dune", 10), "Dune");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Each CJK character is two columns wide
        let cut = truncate_to_width("ノルウェイの森", 6);
        assert!(cut.width() <= 6);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn details_show_optional_fields_only_when_set() {
        let mut b = book("abc", "Earthsea", BookStatus::Finished);
        b.date_end = Some(libris::model::parse_date("2024-06-11").unwrap());
        b.rating = Some(4);
        let out = render_book_details(&[b.clone()]);
        assert!(out.contains("Read in"));
        assert!(out.contains("10 days"));
        assert!(out.contains("★★★★☆"));
        assert!(!out.contains("Notes"));

        b.notes = Some("Loved the dragons".into());
        assert!(render_book_details(&[b]).contains("Loved the dragons"));
    }

    #[test]
    fn stats_include_histogram() {
        let stats = Stats {
            total: 3,
            finished_count: 2,
            average_rating: 4.5,
            ..Stats::default()
        };
        let histogram = vec![
            GenreCount {
                genre: "Fantasy".into(),
                count: 2,
            },
            GenreCount {
                genre: "Horror".into(),
                count: 1,
            },
        ];
        let out = render_stats(&stats, &histogram);
        assert!(out.contains("Average rating  4.5"));
        assert!(out.contains("Finished by genre"));
        assert!(out.contains(&HISTOGRAM_BAR.repeat(HISTOGRAM_WIDTH)));
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&LibrisConfig::default());
        for key in LibrisConfig::KEYS {
            assert!(out.contains(key));
        }
    }

    #[test]
    fn messages_one_per_line() {
        colored::control::set_override(false);
        let out = render_messages(&[CmdMessage::info("a"), CmdMessage::success("b")]);
        assert_eq!(out, "a\nb\n");
    }
}
