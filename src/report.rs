//! Plain-text and JSON formatting for the non-interactive commands.
//!
//! Pure functions, data in, String out. No I/O.

use serde::Serialize;

use crate::themes::ThemeStore;
use crate::types::{OutputFormat, TranscriptEntry};

/// Format one processed submission.
pub fn format_entry(entry: &TranscriptEntry, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => {
            let mut out = entry.output.plain();
            out.push('\n');
            out
        }
        OutputFormat::Json => to_json(entry),
    }
}

/// Format the theme catalog, marking the active entry.
pub fn format_themes(themes: &ThemeStore, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_themes_human(themes),
        OutputFormat::Json => to_json(&theme_rows(themes)),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_themes_human(themes: &ThemeStore) -> String {
    let mut out = String::new();
    for row in theme_rows(themes) {
        out.push_str(&format!(
            "{} {:<14} {:<14} bg {}  fg {}  accent {}  secondary {}\n",
            if row.active { "*" } else { " " },
            row.key,
            row.name,
            row.background,
            row.foreground,
            row.accent,
            row.secondary,
        ));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct ThemeRow<'a> {
    key: &'a str,
    name: &'a str,
    background: &'a str,
    foreground: &'a str,
    accent: &'a str,
    secondary: &'a str,
    active: bool,
}

fn theme_rows(themes: &ThemeStore) -> Vec<ThemeRow<'_>> {
    let active = themes.active_key();
    themes
        .list()
        .map(|(key, theme)| ThemeRow {
            key,
            name: &theme.name,
            background: &theme.background,
            foreground: &theme.foreground,
            accent: &theme.accent,
            secondary: &theme.secondary,
            active: key == active,
        })
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain structs of strings and bools; serialization cannot fail
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Output, OutputLine, Tone};

    fn entry() -> TranscriptEntry {
        TranscriptEntry::new(
            "Themes set x",
            Output::new(vec![OutputLine::of("Theme 'x' not found.", Tone::Error)]),
        )
    }

    #[test]
    fn human_entry_is_plain_output() {
        assert_eq!(format_entry(&entry(), OutputFormat::Human), "Theme 'x' not found.\n");
    }

    #[test]
    fn json_entry_carries_raw_input_and_tones() {
        let json = format_entry(&entry(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["input"], "Themes set x");
        assert_eq!(value["output"]["lines"][0]["segments"][0]["tone"], "error");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn human_themes_mark_active() {
        let text = format_themes(&ThemeStore::builtin(), OutputFormat::Human);
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().next().unwrap().starts_with("* dark"));
    }

    #[test]
    fn json_themes_is_array_of_rows() {
        let mut themes = ThemeStore::builtin();
        themes.set_active("light").unwrap();
        let json = format_themes(&themes, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1]["key"], "light");
        assert_eq!(rows[1]["active"], true);
        assert_eq!(rows[0]["active"], false);
    }
}
