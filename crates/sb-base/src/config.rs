//! YAML configuration loader for the sticker palette and colour themes.
use std::collections::HashMap;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use crate::board::SourceRef;

// ============================================================================
// Palette Configuration
// ============================================================================

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone)]
pub struct PaletteConfig {
    pub stickers: Vec<PaletteEntry>,
}

/// One predefined sticker offered by the toolbar.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteEntry {
    /// Key used as the sticker's source reference
    pub id: String,
    pub name: String,
    /// Image file name, resolved against the asset directory
    pub file: String,
    /// Single-width symbol drawn on the terminal board
    pub glyph: String,
    /// Shown until the image is decoded, and used as the placeholder fill
    pub color: RgbColor,
}

impl PaletteEntry {
    pub fn source(&self) -> SourceRef {
        SourceRef::new(self.id.as_str())
    }
}

impl PaletteConfig {
    pub fn get(&self, source: &SourceRef) -> Option<&PaletteEntry> {
        self.stickers.iter().find(|e| e.id == source.as_str())
    }
}

// ============================================================================
// Theme Configuration
// ============================================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ThemesConfig {
    pub themes: HashMap<String, Theme>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub accent: RgbColor,
    pub warning: RgbColor,
    pub error: RgbColor,
    pub text: RgbColor,
    pub text_muted: RgbColor,
    pub bg_base: RgbColor,
    pub bg_board: RgbColor,
    pub grid: RgbColor,
    pub border: RgbColor,
}

/// Default theme ID
pub const DEFAULT_THEME: &str = "paper";

/// Available theme IDs in cycling order
pub const THEME_ORDER: &[&str] = &["paper", "night", "slate"];

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

pub static PALETTE: LazyLock<PaletteConfig> =
    LazyLock::new(|| parse_yaml("palette.yaml", include_str!("../../../yamls/palette.yaml")));
pub static THEMES: LazyLock<ThemesConfig> =
    LazyLock::new(|| parse_yaml("themes.yaml", include_str!("../../../yamls/themes.yaml")));

/// Get a theme by ID, falling back to default if not found
pub fn get_theme(theme_id: &str) -> &'static Theme {
    THEMES.themes.get(theme_id).or_else(|| THEMES.themes.get(DEFAULT_THEME)).expect("Default theme must exist")
}

// ============================================================================
// Active Theme
// ============================================================================

/// Index into THEME_ORDER of the active theme
static ACTIVE_THEME: AtomicUsize = AtomicUsize::new(0);

/// Set the active theme ID. Unknown IDs select the default theme.
pub fn set_active_theme(theme_id: &str) {
    let idx = THEME_ORDER.iter().position(|&t| t == theme_id).unwrap_or(0);
    ACTIVE_THEME.store(idx, Ordering::Release);
}

pub fn active_theme_id() -> &'static str {
    THEME_ORDER[ACTIVE_THEME.load(Ordering::Acquire) % THEME_ORDER.len()]
}

/// Advance to the next theme in THEME_ORDER and return its ID
pub fn cycle_theme() -> &'static str {
    let next = (ACTIVE_THEME.load(Ordering::Acquire) + 1) % THEME_ORDER.len();
    ACTIVE_THEME.store(next, Ordering::Release);
    THEME_ORDER[next]
}

pub fn active_theme() -> &'static Theme {
    get_theme(active_theme_id())
}

// =============================================================================
// THEME COLORS (loaded from active theme in yamls/themes.yaml)
// =============================================================================

pub mod theme {
    use crate::config::{RgbColor, active_theme};
    use ratatui::style::Color;

    pub fn rgb(c: RgbColor) -> Color {
        Color::Rgb(c[0], c[1], c[2])
    }

    pub fn accent() -> Color {
        rgb(active_theme().colors.accent)
    }
    pub fn warning() -> Color {
        rgb(active_theme().colors.warning)
    }
    pub fn error() -> Color {
        rgb(active_theme().colors.error)
    }
    pub fn text() -> Color {
        rgb(active_theme().colors.text)
    }
    pub fn text_muted() -> Color {
        rgb(active_theme().colors.text_muted)
    }
    pub fn bg_base() -> Color {
        rgb(active_theme().colors.bg_base)
    }
    pub fn bg_board() -> Color {
        rgb(active_theme().colors.bg_board)
    }
    pub fn grid() -> Color {
        rgb(active_theme().colors.grid)
    }
    pub fn border() -> Color {
        rgb(active_theme().colors.border)
    }
}

// =============================================================================
// UI CHARACTERS
// =============================================================================

pub mod chars {
    pub const GRID_DOT: &str = "·";
    pub const ARROW_RIGHT: &str = "▸";
}
