use std::fmt;
use std::str::FromStr;

/// A terminal color or style escape sequence.
///
/// Tokens are plain constants; the two families (foreground and background) are
/// concatenated around a message by the logger in color mode, followed by [`RESET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

pub const BLACK: Color = Color("\x1b[1;30m");
pub const RED: Color = Color("\x1b[1;31m");
pub const GREEN: Color = Color("\x1b[1;32m");
pub const YELLOW: Color = Color("\x1b[1;33m");
pub const BLUE: Color = Color("\x1b[1;34m");
pub const MAGENTA: Color = Color("\x1b[1;35m");
pub const PURPLE: Color = MAGENTA;
pub const CYAN: Color = Color("\x1b[1;36m");
pub const WHITE: Color = Color("\x1b[1;37m");

pub const BG_BLACK: Color = Color("\x1b[40m");
pub const BG_RED: Color = Color("\x1b[41m");
pub const BG_GREEN: Color = Color("\x1b[42m");
pub const BG_YELLOW: Color = Color("\x1b[43m");
pub const BG_BLUE: Color = Color("\x1b[44m");
pub const BG_MAGENTA: Color = Color("\x1b[45m");
pub const BG_CYAN: Color = Color("\x1b[46m");
pub const BG_WHITE: Color = Color("\x1b[47m");

pub const RESET: Color = Color("\x1b[0m");

const NAMED: &[(&str, Color)] = &[
    ("black", BLACK),
    ("red", RED),
    ("green", GREEN),
    ("yellow", YELLOW),
    ("blue", BLUE),
    ("magenta", MAGENTA),
    ("purple", PURPLE),
    ("cyan", CYAN),
    ("white", WHITE),
    ("bg-black", BG_BLACK),
    ("bg-red", BG_RED),
    ("bg-green", BG_GREEN),
    ("bg-yellow", BG_YELLOW),
    ("bg-blue", BG_BLUE),
    ("bg-magenta", BG_MAGENTA),
    ("bg-cyan", BG_CYAN),
    ("bg-white", BG_WHITE),
    ("reset", RESET),
];

impl Color {
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Two-digit SGR code of a foreground token; empty for anything else.
    pub fn code(self) -> &'static str {
        match self {
            BLACK => "30",
            RED => "31",
            GREEN => "32",
            YELLOW => "33",
            BLUE => "34",
            MAGENTA => "35",
            CYAN => "36",
            WHITE => "37",
            _ => "",
        }
    }

    /// Looks a token up by name (`red`, `bg-red`, `bg_red`, `reset`, ...).
    pub fn from_name(name: &str) -> Option<Color> {
        let key = name.trim().to_ascii_lowercase().replace('_', "-");
        NAMED
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, color)| *color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_name(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}
