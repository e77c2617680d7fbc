use std::fmt;
use std::time::Instant;

use super::Logger;
use crate::debugger::Caller;
use crate::level::Level;

/// Formatting shims over the level methods.
///
/// The `*f` variants take pre-built [`fmt::Arguments`] (use `format_args!`), the `*ln`
/// variants end the message with a newline.
impl Logger {
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log(level, args);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.debug_at(Caller::here(), args);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.info(args);
    }

    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.infof(args);
    }

    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.warn(args);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.error(args);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.fatal(args);
    }

    #[track_caller]
    pub fn debugln(&self, message: impl fmt::Display) {
        self.debug_at(Caller::here(), format_args!("{}\n", message));
    }

    pub fn infoln(&self, message: impl fmt::Display) {
        self.info(format_args!("{}\n", message));
    }

    pub fn println(&self, message: impl fmt::Display) {
        self.infoln(message);
    }

    pub fn warningln(&self, message: impl fmt::Display) {
        self.warn(format_args!("{}\n", message));
    }

    pub fn errorln(&self, message: impl fmt::Display) {
        self.error(format_args!("{}\n", message));
    }

    pub fn fatalln(&self, message: impl fmt::Display) {
        self.fatal(format_args!("{}\n", message));
    }

    /// Logs one `key: value` line per entry at info level, in iteration order.
    pub fn print_map<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        for (key, value) in entries {
            self.info(format_args!("{}: {}\n", key, value));
        }
    }

    pub fn log_var<V: fmt::Debug + ?Sized>(&self, name: &str, value: &V) {
        self.info(self.debugger.variable(name, value));
    }

    /// Logs how long ago `start` was, labelled `name`.
    pub fn elapsed(&self, start: Instant, name: &str) {
        let elapsed = self.debugger.elapsed_since(start);
        self.info(self.debugger.elapsed_message(name, elapsed));
    }
}
