use std::io::{self, Write};

use crate::config::Settings;
use crate::error::{LogError, Sink, SinkFailure};

pub(crate) type Writer = Box<dyn Write + Send>;

/// The file handle (if any) and the two console streams of one logger.
pub(crate) struct Sinks {
    file: Option<Writer>,
    stdout: Writer,
    stderr: Writer,
}

impl Sinks {
    pub(crate) fn console(file: Option<Writer>) -> Self {
        Self {
            file,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    pub(crate) fn redirect(&mut self, stdout: Writer, stderr: Writer) {
        self.stdout = stdout;
        self.stderr = stderr;
    }

    pub(crate) fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Writes `text` to the file and every enabled console stream.
    ///
    /// Each sink is attempted even when an earlier one failed.
    pub(crate) fn fan_out(&mut self, settings: &Settings, text: &str) -> Result<(), LogError> {
        let mut failures = Vec::new();
        if let Some(file) = self.file.as_mut() {
            record(&mut failures, Sink::File, write_through(file, text));
        }
        if settings.stdout {
            record(
                &mut failures,
                Sink::Stdout,
                write_through(&mut self.stdout, text),
            );
        }
        if settings.stderr {
            record(
                &mut failures,
                Sink::Stderr,
                write_through(&mut self.stderr, text),
            );
        }
        finish(failures)
    }

    pub(crate) fn flush(&mut self) -> Result<(), LogError> {
        let mut failures = Vec::new();
        if let Some(file) = self.file.as_mut() {
            record(&mut failures, Sink::File, file.flush());
        }
        record(&mut failures, Sink::Stdout, self.stdout.flush());
        record(&mut failures, Sink::Stderr, self.stderr.flush());
        finish(failures)
    }
}

fn write_through(target: &mut Writer, text: &str) -> io::Result<()> {
    target.write_all(text.as_bytes())?;
    target.flush()
}

fn record(failures: &mut Vec<SinkFailure>, sink: Sink, result: io::Result<()>) {
    if let Err(source) = result {
        failures.push(SinkFailure { sink, source });
    }
}

fn finish(failures: Vec<SinkFailure>) -> Result<(), LogError> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(LogError::Write { failures })
    }
}
