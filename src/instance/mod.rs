//! The logger instance: level filtering, timestamping, color wrapping and sink fan-out.
//!
//! Every emitting method funnels into [`Logger::try_log`] or [`Logger::try_log_color`].
//! Settings, debug mode and sink handles share one lock, so a call formats and writes
//! to all of its sinks without interleaving with other calls or with setters.

mod format;
mod sink;

#[cfg(test)]
mod tests;

use std::fmt::{self, Write as _};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;

use crate::color::{self, Color};
use crate::config::{Parameter, Settings, DEFAULT_TIMESTAMP_FORMAT};
use crate::debugger::{Caller, Debugger};
use crate::error::LogError;
use crate::level::Level;
use sink::Sinks;

pub struct Logger {
    state: Mutex<State>,
    debugger: Debugger,
}

struct State {
    settings: Settings,
    debug_mode: bool,
    sinks: Sinks,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Logger")
            .field("settings", &state.settings)
            .field("debug_mode", &state.debug_mode)
            .field("file", &state.sinks.has_file())
            .finish()
    }
}

impl Logger {
    /// Creates a logger around an already opened file (or none).
    ///
    /// The file stays owned by the logger and is never closed by it.
    pub fn new(file: Option<File>, settings: Settings) -> Self {
        Self::from_sinks(
            Sinks::console(file.map(|f| Box::new(f) as sink::Writer)),
            settings,
        )
    }

    /// Creates a logger whose file sink is an arbitrary writer.
    pub fn with_writer(writer: impl Write + Send + 'static, settings: Settings) -> Self {
        Self::from_sinks(Sinks::console(Some(Box::new(writer))), settings)
    }

    /// Opens (creating if missing, appending otherwise) `param.filename` and builds a logger on it.
    pub fn open(param: &Parameter) -> Result<Self, LogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&param.filename)
            .map_err(|source| LogError::Open {
                path: param.filename.clone(),
                source,
            })?;
        Ok(Self::new(Some(file), param.settings.clone()))
    }

    fn from_sinks(sinks: Sinks, settings: Settings) -> Self {
        Self {
            state: Mutex::new(State {
                settings,
                debug_mode: true,
                sinks,
            }),
            debugger: Debugger,
        }
    }

    /// Replaces the process stdout/stderr streams with other writers.
    pub fn redirect_console(
        mut self,
        stdout: impl Write + Send + 'static,
        stderr: impl Write + Send + 'static,
    ) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .sinks
            .redirect(Box::new(stdout), Box::new(stderr));
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) {
        let _ = self.try_log(level, message);
    }

    /// Like [`Logger::log`], reporting the sinks that failed to take the write.
    ///
    /// In color mode the message is wrapped with the configured colors and written
    /// whatever its level; otherwise it is written only if `level` reaches the threshold.
    pub fn try_log(&self, level: Level, message: impl fmt::Display) -> Result<(), LogError> {
        self.emit(level, None, &message.to_string())
    }

    pub fn log_color(&self, level: Level, color: Color, message: impl fmt::Display) {
        let _ = self.try_log_color(level, color, message);
    }

    /// Writes `bg + color + message + RESET` in color mode, or behaves as
    /// [`Logger::try_log`] when color mode is off.
    pub fn try_log_color(
        &self,
        level: Level,
        color: Color,
        message: impl fmt::Display,
    ) -> Result<(), LogError> {
        self.emit(level, Some(color), &message.to_string())
    }

    fn emit(&self, level: Level, color: Option<Color>, message: &str) -> Result<(), LogError> {
        let mut state = self.lock();
        let State {
            settings, sinks, ..
        } = &mut *state;

        let text = stamp(settings, message);

        // color mode never consults the threshold
        if settings.color {
            let token = color.unwrap_or(settings.text_color);
            let wrapped = format!("{}{}{}{}", settings.bg_color, token, text, color::RESET);
            return sinks.fan_out(settings, &wrapped);
        }

        if !level.passes(settings.level) {
            return Ok(());
        }
        sinks.fan_out(settings, &text)
    }

    pub fn flush_sinks(&self) -> Result<(), LogError> {
        self.lock().sinks.flush()
    }

    /// Logs at debug level, preceded by a line locating the caller.
    ///
    /// Does nothing while debug mode is disabled.
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.debug_at(Caller::here(), message);
    }

    pub fn debug_at(&self, caller: Caller, message: impl fmt::Display) {
        if !self.debug_mode() {
            return;
        }
        self.log(Level::Debug, self.debugger.debug_message(&caller));
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Logs at fatal level. The process keeps running.
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Level::Fatal, message);
    }

    pub fn debug_color(&self, color: Color, message: impl fmt::Display) {
        self.log_color(Level::Debug, color, message);
    }

    pub fn debug_black(&self, message: impl fmt::Display) {
        self.debug_color(color::BLACK, message);
    }

    pub fn info_color(&self, color: Color, message: impl fmt::Display) {
        self.log_color(Level::Info, color, message);
    }

    pub fn warn_color(&self, color: Color, message: impl fmt::Display) {
        self.log_color(Level::Warn, color, message);
    }

    pub fn error_color(&self, color: Color, message: impl fmt::Display) {
        self.log_color(Level::Error, color, message);
    }

    pub fn fatal_color(&self, color: Color, message: impl fmt::Display) {
        self.log_color(Level::Fatal, color, message);
    }

    pub fn level(&self) -> Level {
        self.lock().settings.level
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.lock().settings.clone()
    }

    pub fn debug_mode(&self) -> bool {
        self.lock().debug_mode
    }

    pub fn set_level(&self, level: Level) {
        self.lock().settings.level = level;
    }

    pub fn set_stdout(&self, stdout: bool) {
        self.lock().settings.stdout = stdout;
    }

    pub fn set_stderr(&self, stderr: bool) {
        self.lock().settings.stderr = stderr;
    }

    pub fn set_color(&self, color: bool) {
        self.lock().settings.color = color;
    }

    pub fn set_text_color(&self, color: Color) {
        self.lock().settings.text_color = color;
    }

    pub fn set_bg_color(&self, color: Color) {
        self.lock().settings.bg_color = color;
    }

    pub fn enable_debug_mode(&self) {
        self.lock().debug_mode = true;
    }

    pub fn disable_debug_mode(&self) {
        self.lock().debug_mode = false;
    }

    pub fn enable_timestamps(&self) {
        self.lock().settings.timestamps = true;
    }

    pub fn disable_timestamps(&self) {
        self.lock().settings.timestamps = false;
    }

    pub fn set_timestamp_format(&self, format: impl Into<String>) {
        self.lock().settings.timestamp_format = format.into();
    }
}

fn stamp(settings: &Settings, message: &str) -> String {
    if !settings.timestamps {
        return message.to_string();
    }
    let now = Local::now();
    let mut stamp = String::new();
    if write!(stamp, "{}", now.format(settings.effective_timestamp_format())).is_err() {
        // unparsable pattern
        stamp.clear();
        let _ = write!(stamp, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
    }
    format!("[{}] {}", stamp, message)
}
