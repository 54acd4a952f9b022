//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::shapes::COLOR_COUNT;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Piece palette and UI colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Piece colours (index 0..=6): cyan, blue, orange, yellow, green, magenta, red.
    pub pieces: [Color; COLOR_COUNT as usize],
    /// Playfield background.
    pub bg: Color,
    /// Grid dots and borders.
    pub grid: Color,
    /// Text (score, hints).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex for theme[{key}]: {value}")]
    InvalidHex { key: String, value: String },
}

const DEFAULT_PIECES: [Color; COLOR_COUNT as usize] = [
    Color::Rgb(0x00, 0xFF, 0xFF), // cyan
    Color::Rgb(0x00, 0x00, 0xFF), // blue
    Color::Rgb(0xFF, 0xA5, 0x00), // orange
    Color::Rgb(0xFF, 0xFF, 0x00), // yellow
    Color::Rgb(0x00, 0xFF, 0x00), // green
    Color::Rgb(0xFF, 0x00, 0xFF), // magenta
    Color::Rgb(0xFF, 0x00, 0x00), // red
];

impl Default for Theme {
    fn default() -> Self {
        Self {
            pieces: DEFAULT_PIECES,
            bg: Color::Rgb(0x00, 0x00, 0x00),
            grid: Color::Rgb(0x80, 0x80, 0x80),
            main_fg: Color::Rgb(0xE0, 0xE0, 0xE0),
            title: Color::Rgb(0xFF, 0xFF, 0x00),
        }
    }
}

impl Theme {
    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to defaults if path is None or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        Self::from_map(&parse_theme_file(&s))
    }

    /// Keys: `piece0`..`piece6`, `bg`, `grid`, `main_fg`, `title`. Missing keys keep defaults.
    fn from_map(map: &HashMap<String, String>) -> Result<Self, ThemeError> {
        let get = |key: &str, fallback: Color| -> Result<Color, ThemeError> {
            match map.get(key) {
                Some(value) => parse_hex(value).ok_or_else(|| ThemeError::InvalidHex {
                    key: key.to_string(),
                    value: value.clone(),
                }),
                None => Ok(fallback),
            }
        };
        let defaults = Self::default();
        let mut pieces = defaults.pieces;
        for (i, slot) in pieces.iter_mut().enumerate() {
            *slot = get(&format!("piece{i}"), *slot)?;
        }
        Ok(Self {
            pieces,
            bg: get("bg", defaults.bg)?,
            grid: get("grid", defaults.grid)?,
            main_fg: get("main_fg", defaults.main_fg)?,
            title: get("title", defaults.title)?,
        })
    }

    /// Colour for a palette index (0..7).
    #[inline]
    pub fn piece_color(&self, index: u8) -> Color {
        self.pieces[index as usize % self.pieces.len()]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(s.get(range)?, 16).ok();
    match s.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}
