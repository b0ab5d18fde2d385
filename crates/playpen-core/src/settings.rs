//! # Editor Settings
//!
//! Static presentation settings for the editing collaborator: theme, font
//! and tab size, and the display toggles. None of this is persisted with
//! the workspace; it comes from the `[editor]` section of the app config.

use crate::PlaypenError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted font sizes, in points.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u8> = 8..=40;

/// Accepted tab widths, in columns.
pub const TAB_SIZE_RANGE: std::ops::RangeInclusive<u8> = 1..=8;

// =============================================================================
// THEMES
// =============================================================================

/// Editor colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Vs,
    #[default]
    VsDark,
    HcBlack,
    SolarizedDark,
    Nord,
    Monokai,
    Dracula,
    Github,
}

/// Colours of a custom theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    /// Built-in theme the palette is layered on.
    pub base: Theme,
    pub background: &'static str,
    pub foreground: &'static str,
    pub line_highlight: &'static str,
    pub comment: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
}

static SOLARIZED_DARK: ThemePalette = ThemePalette {
    base: Theme::VsDark,
    background: "#002b36",
    foreground: "#839496",
    line_highlight: "#073642",
    comment: "#586e75",
    keyword: "#cb4b16",
    string: "#2aa198",
};

static NORD: ThemePalette = ThemePalette {
    base: Theme::VsDark,
    background: "#2E3440",
    foreground: "#ECEFF4",
    line_highlight: "#3B4252",
    comment: "#4C566A",
    keyword: "#81A1C1",
    string: "#A3BE8C",
};

static MONOKAI: ThemePalette = ThemePalette {
    base: Theme::VsDark,
    background: "#272822",
    foreground: "#F8F8F2",
    line_highlight: "#3E3D32",
    comment: "#75715E",
    keyword: "#F92672",
    string: "#E6DB74",
};

static DRACULA: ThemePalette = ThemePalette {
    base: Theme::VsDark,
    background: "#282A36",
    foreground: "#F8F8F2",
    line_highlight: "#44475A",
    comment: "#6272A4",
    keyword: "#FF79C6",
    string: "#F1FA8C",
};

static GITHUB: ThemePalette = ThemePalette {
    base: Theme::Vs,
    background: "#FFFFFF",
    foreground: "#24292E",
    line_highlight: "#F6F8FA",
    comment: "#6A737D",
    keyword: "#D73A49",
    string: "#032F62",
};

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Vs,
        Theme::VsDark,
        Theme::HcBlack,
        Theme::SolarizedDark,
        Theme::Nord,
        Theme::Monokai,
        Theme::Dracula,
        Theme::Github,
    ];

    /// The id the editing collaborator knows this theme by.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Theme::Vs => "vs",
            Theme::VsDark => "vs-dark",
            Theme::HcBlack => "hc-black",
            Theme::SolarizedDark => "solarized-dark",
            Theme::Nord => "nord",
            Theme::Monokai => "monokai",
            Theme::Dracula => "dracula",
            Theme::Github => "github",
        }
    }

    /// Custom palette, or `None` for the built-in themes.
    #[must_use]
    pub fn palette(self) -> Option<&'static ThemePalette> {
        match self {
            Theme::Vs | Theme::VsDark | Theme::HcBlack => None,
            Theme::SolarizedDark => Some(&SOLARIZED_DARK),
            Theme::Nord => Some(&NORD),
            Theme::Monokai => Some(&MONOKAI),
            Theme::Dracula => Some(&DRACULA),
            Theme::Github => Some(&GITHUB),
        }
    }

    #[must_use]
    pub fn is_builtin(self) -> bool {
        self.palette().is_none()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Presentation settings for the editing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub theme: Theme,
    pub font_size: u8,
    pub tab_size: u8,
    pub word_wrap: bool,
    pub line_numbers: bool,
    pub minimap: bool,
    pub render_whitespace: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: Theme::VsDark,
            font_size: 14,
            tab_size: 4,
            word_wrap: true,
            line_numbers: true,
            minimap: true,
            render_whitespace: false,
        }
    }
}

/// The option object handed to the editor widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    pub theme: &'static str,
    pub font_size: u8,
    pub tab_size: u8,
    pub word_wrap: &'static str,
    pub line_numbers: &'static str,
    pub minimap: MinimapOptions,
    pub render_whitespace: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinimapOptions {
    pub enabled: bool,
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

impl EditorSettings {
    /// Check font and tab size against their accepted ranges.
    pub fn validate(&self) -> Result<(), PlaypenError> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(PlaypenError::InvalidSettings(format!(
                "font_size {} outside {}..={}",
                self.font_size,
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            )));
        }
        if !TAB_SIZE_RANGE.contains(&self.tab_size) {
            return Err(PlaypenError::InvalidSettings(format!(
                "tab_size {} outside {}..={}",
                self.tab_size,
                TAB_SIZE_RANGE.start(),
                TAB_SIZE_RANGE.end()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            theme: self.theme.id(),
            font_size: self.font_size,
            tab_size: self.tab_size,
            word_wrap: on_off(self.word_wrap),
            line_numbers: on_off(self.line_numbers),
            minimap: MinimapOptions {
                enabled: self.minimap,
            },
            render_whitespace: if self.render_whitespace { "all" } else { "none" },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
