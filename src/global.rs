//! Process-wide logger.
//!
//! The first call to any accessor opens the log file and builds the logger; every
//! later call, whatever [`Parameter`] it passes, gets that same logger back.

use std::fmt;
use std::process;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::config::Parameter;
use crate::error::LogError;
use crate::instance::Logger;

static INSTANCE: OnceLock<Logger> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Returns the shared logger, building it from `param` if nobody has yet.
///
/// Opening the file happens under a lock, once per process. A `param` passed after
/// initialization is ignored.
pub fn try_instance_with(param: &Parameter) -> Result<&'static Logger, LogError> {
    if let Some(logger) = INSTANCE.get() {
        return Ok(logger);
    }
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(logger) = INSTANCE.get() {
        return Ok(logger);
    }
    let logger = Logger::open(param)?;
    Ok(INSTANCE.get_or_init(|| logger))
}

/// Like [`try_instance_with`], but a file that cannot be opened ends the process.
pub fn instance_with(param: &Parameter) -> &'static Logger {
    match try_instance_with(param) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{}: {}", env!("CARGO_PKG_NAME"), err);
            process::exit(1);
        }
    }
}

/// The shared logger, built with [`Parameter::default`] on first use.
pub fn instance() -> &'static Logger {
    match INSTANCE.get() {
        Some(logger) => logger,
        None => instance_with(&Parameter::default()),
    }
}

pub fn is_initialized() -> bool {
    INSTANCE.get().is_some()
}

/// Routes the `log` crate macros into the shared logger.
pub fn install_log_facade() -> Result<(), LogError> {
    log::set_logger(instance())?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    instance().debug(message);
}

#[track_caller]
pub fn debugln(message: impl fmt::Display) {
    instance().debugln(message);
}

pub fn info(message: impl fmt::Display) {
    instance().info(message);
}

pub fn infoln(message: impl fmt::Display) {
    instance().infoln(message);
}

pub fn print(message: impl fmt::Display) {
    instance().info(message);
}

pub fn println(message: impl fmt::Display) {
    instance().println(message);
}

pub fn warning(message: impl fmt::Display) {
    instance().warn(message);
}

pub fn warningln(message: impl fmt::Display) {
    instance().warningln(message);
}

pub fn error(message: impl fmt::Display) {
    instance().error(message);
}

pub fn errorln(message: impl fmt::Display) {
    instance().errorln(message);
}

pub fn fatal(message: impl fmt::Display) {
    instance().fatal(message);
}

pub fn fatalln(message: impl fmt::Display) {
    instance().fatalln(message);
}

pub fn enable_debug_mode() {
    instance().enable_debug_mode();
}

pub fn disable_debug_mode() {
    instance().disable_debug_mode();
}

/// `format!`-style info logging through the shared logger.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::global::instance().infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! printf {
    ($($arg:tt)+) => {
        $crate::global::instance().printf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warningf {
    ($($arg:tt)+) => {
        $crate::global::instance().warningf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::global::instance().errorf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::global::instance().fatalf(::std::format_args!($($arg)+))
    };
}

/// Debug logging through the shared logger, tagged with the calling function.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::global::instance().debug_at($crate::caller!(), ::std::format_args!($($arg)+))
    };
}
