use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::config;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

// Const fallback for places that need a compile-time style
pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub hover: Style,
    pub conflict: Style,
    pub tooltip_title: Style,
    pub event_fg: Color,
    pub event_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::LightGreen),
            selected: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            hover: Style::default().bg(Color::Rgb(48, 48, 48)),
            conflict: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            tooltip_title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            event_fg: Color::White,
            event_bg: Color::Blue,
        }
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = config::config_dir()?.join("theme.toml");
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str::<ThemeConfig>(&content) {
            Ok(config) => Some(config.into_theme()),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable theme file");
                None
            }
        }
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(80, 250, 123)), // green
            selected: Style::default().fg(Color::Rgb(139, 233, 253)).add_modifier(Modifier::BOLD), // cyan
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            hover: Style::default().bg(Color::Rgb(68, 71, 90)),
            conflict: Style::default()
                .fg(Color::Rgb(40, 42, 54))
                .bg(Color::Rgb(255, 85, 85))
                .add_modifier(Modifier::BOLD),
            tooltip_title: Style::default().fg(Color::Rgb(241, 250, 140)).add_modifier(Modifier::BOLD),
            event_fg: Color::Rgb(40, 42, 54),
            event_bg: Color::Rgb(189, 147, 249), // purple
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(184, 187, 38)), // green
            selected: Style::default().fg(Color::Rgb(131, 165, 152)).add_modifier(Modifier::BOLD), // aqua
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            hover: Style::default().bg(Color::Rgb(80, 73, 69)),
            conflict: Style::default()
                .fg(Color::Rgb(40, 40, 40))
                .bg(Color::Rgb(251, 73, 52))
                .add_modifier(Modifier::BOLD),
            tooltip_title: Style::default().fg(Color::Rgb(250, 189, 47)).add_modifier(Modifier::BOLD),
            event_fg: Color::Rgb(40, 40, 40),
            event_bg: Color::Rgb(254, 128, 25), // orange
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(163, 190, 140)), // green
            selected: Style::default().fg(Color::Rgb(136, 192, 208)).add_modifier(Modifier::BOLD), // frost
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            hover: Style::default().bg(Color::Rgb(59, 66, 82)),
            conflict: Style::default()
                .fg(Color::Rgb(46, 52, 64))
                .bg(Color::Rgb(191, 97, 106))
                .add_modifier(Modifier::BOLD),
            tooltip_title: Style::default().fg(Color::Rgb(235, 203, 139)).add_modifier(Modifier::BOLD),
            event_fg: Color::Rgb(46, 52, 64),
            event_bg: Color::Rgb(129, 161, 193),
        }
    }
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    today_fg: Option<String>,
    today_bg: Option<String>,
    selected_border: Option<String>,
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    hover_bg: Option<String>,
    conflict_bg: Option<String>,
    event_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.selected_border.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.hover_bg.as_deref().and_then(parse_color) {
            theme.hover = theme.hover.bg(c);
        }
        if let Some(c) = self.conflict_bg.as_deref().and_then(parse_color) {
            theme.conflict = theme.conflict.bg(c);
        }
        if let Some(c) = self.event_fg.as_deref().and_then(parse_color) {
            theme.event_fg = c;
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 && s.is_ascii() {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        // a few CSS names that show up in event data
        "orange" => Some(Color::Rgb(255, 165, 0)),
        "purple" => Some(Color::Rgb(128, 0, 128)),
        "pink" => Some(Color::Rgb(255, 192, 203)),
        "teal" => Some(Color::Rgb(0, 128, 128)),
        _ => None,
    }
}
