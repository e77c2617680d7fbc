use crate::instance::Logger;
use crate::level::Level;

/// Lets a [`Logger`] back the `log` crate macros. Each record becomes one line.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let settings = self.settings();
        settings.color || Level::from(metadata.level()).passes(settings.level)
    }

    fn log(&self, record: &log::Record) {
        Logger::log(
            self,
            Level::from(record.level()),
            format_args!("{}\n", record.args()),
        );
    }

    fn flush(&self) {
        let _ = self.flush_sinks();
    }
}
