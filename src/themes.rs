//! Theme Store: the color catalog and the one active selection.
//!
//! The catalog is fixed when the store is built and validated up front:
//! non-empty, unique keys, every token a `#rrggbb` color. After that the
//! only mutation is `set_active`, and the active key always names an
//! existing entry.
//!
//! "Applying" a theme means deriving its [`Palette`]. The palette is
//! computed once per entry at construction, so applying is deterministic
//! and cannot fail.

use thiserror::Error;

use crate::types::{Theme, ThemeKey};

/// Key of the theme active at session start.
pub const DEFAULT_THEME: &str = "dark";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// `set_active` (or an initial selection) named a key not in the catalog.
    #[error("theme '{0}' not found")]
    KeyNotFound(String),

    /// The catalog had no entries.
    #[error("theme catalog is empty")]
    EmptyCatalog,

    /// A key that `themes set` can never reach: empty, padded with
    /// whitespace, or containing uppercase letters.
    #[error("theme key '{0}' must be lowercase with no surrounding whitespace")]
    UnselectableKey(String),

    /// Two catalog entries share a key.
    #[error("duplicate theme key '{0}'")]
    DuplicateKey(String),

    /// A color token is not `#rrggbb`.
    #[error("theme '{key}': invalid color '{value}' for {token}")]
    InvalidColor {
        key: String,
        token: &'static str,
        value: String,
    },
}

// ============================================================================
// PALETTE
// ============================================================================

/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The four parsed color tokens of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub accent: Rgb,
    pub secondary: Rgb,
}

impl Palette {
    /// Parse the four tokens of `theme`. `key` is only used for errors.
    pub fn from_theme(key: &str, theme: &Theme) -> Result<Palette, ThemeError> {
        let parse = |token: &'static str, value: &str| {
            parse_hex(value).ok_or_else(|| ThemeError::InvalidColor {
                key: key.to_string(),
                token,
                value: value.to_string(),
            })
        };

        Ok(Palette {
            background: parse("background", &theme.background)?,
            foreground: parse("foreground", &theme.foreground)?,
            accent: parse("accent", &theme.accent)?,
            secondary: parse("secondary", &theme.secondary)?,
        })
    }
}

/// Parse `#rrggbb` (case-insensitive). Anything else is rejected.
pub fn parse_hex(value: &str) -> Option<Rgb> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
}

// ============================================================================
// BUILT-IN CATALOG
// ============================================================================

/// The themes shipped with the binary, in display order.
pub fn builtin_catalog() -> Vec<(ThemeKey, Theme)> {
    vec![
        ("dark".into(), Theme::new("Dark", "#0a0e27", "#00ff41", "#00d9ff", "#1a1f3a")),
        ("light".into(), Theme::new("Light", "#f5f5f5", "#2d3748", "#3182ce", "#e2e8f0")),
        ("blue-matrix".into(), Theme::new("Blue Matrix", "#0d1b2a", "#00d9ff", "#00ff41", "#1b263b")),
        ("espresso".into(), Theme::new("Espresso", "#2b1d0e", "#e4c07a", "#d4976c", "#3d2817")),
        ("green-goblin".into(), Theme::new("Green Goblin", "#0f2027", "#39ff14", "#7fff00", "#1a3a3a")),
        ("ubuntu".into(), Theme::new("Ubuntu", "#300a24", "#ffffff", "#e95420", "#5e2750")),
    ]
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    theme: Theme,
    palette: Palette,
}

/// Ordered theme catalog with one active entry.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    entries: Vec<Entry>,
    /// Index into `entries`. Always in bounds.
    active: usize,
}

impl ThemeStore {
    /// Build a store from an ordered catalog, activating `initial`.
    pub fn new(catalog: Vec<(ThemeKey, Theme)>, initial: &str) -> Result<Self, ThemeError> {
        if catalog.is_empty() {
            return Err(ThemeError::EmptyCatalog);
        }

        let mut entries: Vec<Entry> = Vec::with_capacity(catalog.len());
        for (key, theme) in catalog {
            if !is_selectable(&key) {
                return Err(ThemeError::UnselectableKey(key));
            }
            if entries.iter().any(|e| e.key == key) {
                return Err(ThemeError::DuplicateKey(key));
            }
            let palette = Palette::from_theme(&key, &theme)?;
            entries.push(Entry { key, theme, palette });
        }

        let active = entries
            .iter()
            .position(|e| e.key == initial)
            .ok_or_else(|| ThemeError::KeyNotFound(initial.to_string()))?;

        Ok(ThemeStore { entries, active })
    }

    /// The built-in catalog with `dark` active.
    pub fn builtin() -> Self {
        let entries = builtin_catalog()
            .into_iter()
            .map(|(key, theme)| {
                let palette = Palette::from_theme(&key, &theme).unwrap_or(FALLBACK_PALETTE);
                Entry { key, theme, palette }
            })
            .collect();
        ThemeStore { entries, active: 0 }
    }

    /// All entries in catalog order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &Theme)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.theme))
    }

    /// Make `key` the active theme.
    ///
    /// Re-selecting the active key succeeds and changes nothing. An
    /// unknown key leaves the selection untouched.
    pub fn set_active(&mut self, key: &str) -> Result<&Theme, ThemeError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.key == key)
            .ok_or_else(|| ThemeError::KeyNotFound(key.to_string()))?;

        if index != self.active {
            tracing::info!(from = %self.entries[self.active].key, to = %key, "theme changed");
        }
        self.active = index;
        Ok(&self.entries[index].theme)
    }

    pub fn active_key(&self) -> &str {
        &self.entries[self.active].key
    }

    pub fn active(&self) -> &Theme {
        &self.entries[self.active].theme
    }

    /// The four parsed tokens of the active theme.
    pub fn palette(&self) -> Palette {
        self.entries[self.active].palette
    }
}

/// Command input is trimmed and lowercased before lookup, so only keys
/// already in that form can be selected.
fn is_selectable(key: &str) -> bool {
    !key.is_empty() && key.trim() == key && key.to_lowercase() == key
}

/// Only reachable if a built-in token were malformed; the test suite
/// checks every built-in entry parses.
const FALLBACK_PALETTE: Palette = Palette {
    background: Rgb(0, 0, 0),
    foreground: Rgb(255, 255, 255),
    accent: Rgb(0, 255, 255),
    secondary: Rgb(64, 64, 64),
};

impl Default for ThemeStore {
    fn default() -> Self {
        ThemeStore::builtin()
    }
}

// ============================================================================
// TESTS
// ============================================================================
