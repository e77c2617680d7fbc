use std::fmt;
use std::io;
use std::path::PathBuf;

/// One of the three destinations a message fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    File,
    Stdout,
    Stderr,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sink::File => "file",
            Sink::Stdout => "stdout",
            Sink::Stderr => "stderr",
        })
    }
}

#[derive(Debug)]
pub struct SinkFailure {
    pub sink: Sink,
    pub source: io::Error,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sink, self.source)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("unable to open log file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to {}", describe(.failures))]
    Write { failures: Vec<SinkFailure> },
    #[error("a log facade backend is already installed")]
    Facade(#[from] log::SetLoggerError),
}

impl LogError {
    /// Sinks that rejected the last write, empty for any other error.
    pub fn failed_sinks(&self) -> Vec<Sink> {
        match self {
            LogError::Open { .. } | LogError::Facade(_) => Vec::new(),
            LogError::Write { failures } => failures.iter().map(|f| f.sink).collect(),
        }
    }
}

fn describe(failures: &[SinkFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
