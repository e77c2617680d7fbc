use std::fmt;
use std::panic::Location;
use std::time::{Duration, Instant};

/// Where a debug call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub function: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    pub const fn new(function: Option<&'static str>, file: &'static str, line: u32) -> Self {
        Self {
            function,
            file,
            line,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`.
    ///
    /// The function name is not recoverable this way; use [`caller!`](crate::caller)
    /// where it matters.
    #[track_caller]
    pub fn here() -> Self {
        let location = Location::caller();
        Self::new(None, location.file(), location.line())
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            Some(function) => write!(
                f,
                "Function name: {}, File: {}, Line: {}",
                function, self.file, self.line
            ),
            None => write!(f, "File: {}, Line: {}", self.file, self.line),
        }
    }
}

/// Captures the enclosing function path, file and line as a [`Caller`].
#[macro_export]
macro_rules! caller {
    () => {{
        fn __fanlog_here() {}
        fn __fanlog_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __fanlog_name_of(__fanlog_here);
        $crate::Caller::new(
            Some(name.strip_suffix("::__fanlog_here").unwrap_or(name)),
            file!(),
            line!(),
        )
    }};
}

/// Renders caller metadata for the logger's debug mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Debugger;

impl Debugger {
    pub fn debug_message(&self, caller: &Caller) -> String {
        format!("Debug Message - {}\n", caller)
    }

    pub fn variable<V: fmt::Debug + ?Sized>(&self, name: &str, value: &V) -> String {
        format!("Variable: {}, Value: {:?}\n", name, value)
    }

    pub fn elapsed_since(&self, start: Instant) -> Duration {
        start.elapsed()
    }

    pub fn elapsed_message(&self, name: &str, elapsed: Duration) -> String {
        format!("{} took {:?}\n", name, elapsed)
    }
}
