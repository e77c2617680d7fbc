use std::path::PathBuf;

use clap::Parser;

use crate::color::Color;
use crate::config::{Parameter, Settings, DEFAULT_FILE, SINGLETON_TIMESTAMP_FORMAT};
use crate::level::Level;

#[derive(Parser, Debug)]
#[command(
    name = "fanlog",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Cli {
    /// Log file to append to (created if missing)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Minimum level written while color is off
    #[arg(short, long, value_enum, default_value_t = Level::Info)]
    pub level: Level,

    /// Level of the message being logged
    #[arg(short = 'a', long = "at", value_enum, default_value_t = Level::Info)]
    pub at: Level,

    /// Do not echo to stdout
    #[arg(long)]
    pub no_stdout: bool,

    /// Echo to stderr as well
    #[arg(long)]
    pub stderr: bool,

    /// Wrap the message in ANSI colors (every level is then written)
    #[arg(short, long)]
    pub color: bool,

    /// Text color name (red, cyan, ...)
    #[arg(long, value_name = "COLOR", default_value = "white")]
    pub fg: Color,

    /// Background color name (bg-black, bg-blue, ...)
    #[arg(long, value_name = "COLOR", default_value = "bg-black")]
    pub bg: Color,

    /// Do not prefix a timestamp
    #[arg(long)]
    pub no_timestamps: bool,

    /// strftime pattern of the timestamp (empty for "%Y-%m-%d %H:%M:%S")
    #[arg(long, value_name = "PATTERN", default_value = SINGLETON_TIMESTAMP_FORMAT)]
    pub timestamp_format: String,

    /// Message words, joined with spaces
    #[arg(name = "MESSAGE", required = true)]
    pub message: Vec<String>,
}

impl Cli {
    pub fn parameter(&self) -> Parameter {
        Parameter::new(
            &self.file,
            Settings {
                level: self.level,
                stdout: !self.no_stdout,
                stderr: self.stderr,
                color: self.color,
                text_color: self.fg,
                bg_color: self.bg,
                timestamps: !self.no_timestamps,
                timestamp_format: self.timestamp_format.clone(),
            },
        )
    }

    pub fn message(&self) -> String {
        self.message.join(" ")
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
