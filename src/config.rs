use std::path::PathBuf;

use crate::color::{self, Color};
use crate::level::Level;

/// File the singleton logger appends to when no [`Parameter`] is supplied.
pub const DEFAULT_FILE: &str = "logs.txt";

/// Pattern used when a logger's timestamp format is empty (or unusable).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pattern of the singleton default configuration.
pub const SINGLETON_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Everything about a logger except where its file sink points.
///
/// Timestamp formats are strftime patterns (`%Y-%m-%d`), not example dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub level: Level,
    pub stdout: bool,
    pub stderr: bool,
    pub color: bool,
    pub text_color: Color,
    pub bg_color: Color,
    pub timestamps: bool,
    pub timestamp_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: Level::Info,
            stdout: true,
            stderr: false,
            color: false,
            text_color: color::WHITE,
            bg_color: color::BG_BLACK,
            timestamps: true,
            timestamp_format: SINGLETON_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// The pattern actually applied: the configured one, or the default when empty.
    pub fn effective_timestamp_format(&self) -> &str {
        if self.timestamp_format.is_empty() {
            DEFAULT_TIMESTAMP_FORMAT
        } else {
            &self.timestamp_format
        }
    }
}

/// Construction options of the singleton logger: a file path plus [`Settings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub filename: PathBuf,
    pub settings: Settings,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_FILE),
            settings: Settings::default(),
        }
    }
}

impl Parameter {
    pub fn new(filename: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            filename: filename.into(),
            settings,
        }
    }
}
