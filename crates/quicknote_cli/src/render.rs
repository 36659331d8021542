//! Plain-text rendering for the two layouts.

use quicknote_core::{Note, ViewMode};
use std::fmt::Write;

const GRID_COLUMNS: usize = 3;
const GRID_CELL_WIDTH: usize = 26;
const SNIPPET_CHARS: usize = 60;

pub fn render_notes(notes: &[&Note], mode: ViewMode) -> String {
    if notes.is_empty() {
        return "No notes found.\n".to_string();
    }
    match mode {
        ViewMode::List => render_list(notes),
        ViewMode::Grid => render_grid(notes),
    }
}

fn render_list(notes: &[&Note]) -> String {
    let mut out = String::new();
    for note in notes {
        let _ = writeln!(out, "{}  {}", note.id(), note.title());
        if !note.content().is_empty() {
            let _ = writeln!(out, "    {}", truncate(note.content(), SNIPPET_CHARS));
        }
        if !note.tags().is_empty() {
            let _ = writeln!(out, "    #{}", note.tags().join(" #"));
        }
    }
    out
}

fn render_grid(notes: &[&Note]) -> String {
    let mut out = String::new();
    for row in notes.chunks(GRID_COLUMNS) {
        let titles: Vec<String> = row
            .iter()
            .map(|note| pad(&truncate(note.title(), GRID_CELL_WIDTH - 2), GRID_CELL_WIDTH))
            .collect();
        let ids: Vec<String> = row
            .iter()
            .map(|note| pad(&truncate(note.id().as_str(), GRID_CELL_WIDTH - 2), GRID_CELL_WIDTH))
            .collect();
        let _ = writeln!(out, "{}", titles.join("|").trim_end());
        let _ = writeln!(out, "{}", ids.join("|").trim_end());
        let _ = writeln!(out);
    }
    out
}

fn truncate(value: &str, max_chars: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}
