use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use chrono::Local;
use tempfile::tempdir;

use super::Logger;
use crate::color::{self, BG_BLACK, BG_BLUE, GREEN, RED, RESET, WHITE};
use crate::config::{Parameter, Settings};
use crate::error::{LogError, Sink};
use crate::level::Level;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf8 output")
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::WriteZero, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Harness {
    logger: Logger,
    file: Capture,
    stdout: Capture,
    stderr: Capture,
}

fn plain(level: Level) -> Settings {
    Settings {
        level,
        stdout: true,
        stderr: false,
        color: false,
        text_color: WHITE,
        bg_color: BG_BLACK,
        timestamps: false,
        timestamp_format: String::new(),
    }
}

fn harness(settings: Settings) -> Harness {
    let file = Capture::default();
    let stdout = Capture::default();
    let stderr = Capture::default();
    let logger =
        Logger::with_writer(file.clone(), settings).redirect_console(stdout.clone(), stderr.clone());
    Harness {
        logger,
        file,
        stdout,
        stderr,
    }
}

#[test]
fn plain_mode_filters_below_threshold() {
    let h = harness(plain(Level::Warn));

    h.logger.log(Level::Info, "x");
    assert_eq!(h.file.contents(), "");
    assert_eq!(h.stdout.contents(), "");

    h.logger.log(Level::Error, "x");
    assert_eq!(h.file.contents(), "x");
    assert_eq!(h.stdout.contents(), "x");
}

#[test]
fn threshold_is_inclusive() {
    let h = harness(plain(Level::Warn));
    h.logger.log(Level::Warn, "edge");
    assert_eq!(h.file.contents(), "edge");
}

#[test]
fn off_threshold_suppresses_every_level() {
    let h = harness(plain(Level::Off));
    for level in &Level::ALL_LEVELS[..6] {
        h.logger.log(*level, "nope");
    }
    assert_eq!(h.file.contents(), "");
    assert_eq!(h.stdout.contents(), "");
}

#[test]
fn color_mode_bypasses_threshold() {
    let h = harness(Settings {
        color: true,
        ..plain(Level::Error)
    });

    h.logger.log(Level::Debug, "x");

    let expected = format!("{}{}x{}", BG_BLACK, WHITE, RESET);
    assert_eq!(h.file.contents(), expected);
    assert_eq!(h.stdout.contents(), expected);
}

#[test]
fn log_color_wraps_background_color_message_reset() {
    let h = harness(Settings {
        color: true,
        ..plain(Level::All)
    });

    h.logger.log_color(Level::Info, RED, "hello");

    assert_eq!(h.file.contents(), "\x1b[40m\x1b[1;31mhello\x1b[0m");
}

#[test]
fn log_color_without_color_mode_is_plain_log() {
    let h = harness(plain(Level::Warn));

    h.logger.log_color(Level::Info, RED, "dropped");
    h.logger.log_color(Level::Error, RED, "kept");

    assert_eq!(h.file.contents(), "kept");
}

#[test]
fn timestamp_prefix_uses_configured_pattern() {
    let h = harness(Settings {
        timestamps: true,
        timestamp_format: "%Y/%m/%d".to_string(),
        ..plain(Level::All)
    });
    let today = Local::now().format("%Y/%m/%d").to_string();

    h.logger.log(Level::Info, "hi");

    let out = h.file.contents();
    assert!(
        out.starts_with(&format!("[{}] hi", today)),
        "unexpected output {:?}",
        out
    );
}

#[test]
fn literal_timestamp_pattern_is_copied_verbatim() {
    let h = harness(Settings {
        timestamps: true,
        timestamp_format: "stamp".to_string(),
        ..plain(Level::All)
    });
    h.logger.log(Level::Info, "hi");
    assert_eq!(h.file.contents(), "[stamp] hi");
}

#[test]
fn empty_timestamp_pattern_uses_default_layout() {
    let h = harness(Settings {
        timestamps: true,
        timestamp_format: String::new(),
        ..plain(Level::All)
    });
    h.logger.log(Level::Info, "hi");

    let out = h.file.contents();
    // [YYYY-MM-DD HH:MM:SS] hi
    let bytes = out.as_bytes();
    assert_eq!(out.len(), "[2024-01-01 00:00:00] hi".len(), "{:?}", out);
    assert_eq!(bytes[0], b'[');
    assert_eq!(bytes[5], b'-');
    assert_eq!(bytes[8], b'-');
    assert_eq!(bytes[11], b' ');
    assert_eq!(bytes[14], b':');
    assert!(out.ends_with("] hi"));
}

#[test]
fn invalid_timestamp_pattern_falls_back_instead_of_panicking() {
    let h = harness(Settings {
        timestamps: true,
        timestamp_format: "%Q%".to_string(),
        ..plain(Level::All)
    });
    h.logger.log(Level::Info, "hi");
    let out = h.file.contents();
    assert!(out.starts_with('['));
    assert!(out.ends_with("] hi"));
}

#[test]
fn timestamp_is_applied_inside_color_wrapping() {
    let h = harness(Settings {
        color: true,
        timestamps: true,
        timestamp_format: "ts".to_string(),
        ..plain(Level::All)
    });

    h.logger.log_color(Level::Info, GREEN, "hi");

    assert_eq!(h.file.contents(), format!("{}{}[ts] hi{}", BG_BLACK, GREEN, RESET));
}

#[test]
fn fan_out_writes_file_and_stdout_but_not_stderr() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let file = fs::File::create(&path).unwrap();
    let stdout = Capture::default();
    let stderr = Capture::default();
    let logger = Logger::new(Some(file), plain(Level::All))
        .redirect_console(stdout.clone(), stderr.clone());

    logger.log(Level::Error, "x");

    assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    assert_eq!(stdout.contents(), "x");
    assert_eq!(stderr.contents(), "");
}

#[test]
fn no_newline_is_appended() {
    let h = harness(plain(Level::All));
    h.logger.info("a");
    h.logger.info("b");
    assert_eq!(h.file.contents(), "ab");
}

#[test]
fn missing_file_sink_is_skipped() {
    let stdout = Capture::default();
    let logger =
        Logger::new(None, plain(Level::All)).redirect_console(stdout.clone(), Capture::default());

    logger.try_log(Level::Info, "only console").expect("no file is not an error");

    assert_eq!(stdout.contents(), "only console");
}

#[test]
fn failing_sink_does_not_stop_remaining_sinks() {
    let stdout = Capture::default();
    let stderr = Capture::default();
    let logger = Logger::with_writer(
        Broken,
        Settings {
            stderr: true,
            ..plain(Level::All)
        },
    )
    .redirect_console(stdout.clone(), stderr.clone());

    let err = logger.try_log(Level::Info, "still here").unwrap_err();

    assert!(matches!(err, LogError::Write { .. }));
    assert_eq!(err.failed_sinks(), vec![Sink::File]);
    assert_eq!(stdout.contents(), "still here");
    assert_eq!(stderr.contents(), "still here");

    // the infallible entry point swallows the failure
    logger.info("again");
    assert_eq!(stdout.contents(), "still hereagain");
}

#[test]
fn setters_apply_to_following_calls() {
    let h = harness(plain(Level::Error));

    h.logger.info("before");
    h.logger.set_level(Level::Info);
    h.logger.info("after");
    assert_eq!(h.file.contents(), "after");

    h.logger.set_stdout(false);
    h.logger.set_stderr(true);
    h.logger.info("|err");
    assert_eq!(h.stdout.contents(), "after");
    assert_eq!(h.stderr.contents(), "|err");

    h.logger.set_color(true);
    h.logger.set_text_color(RED);
    h.logger.set_bg_color(BG_BLUE);
    h.logger.info("c");
    assert_eq!(
        h.stderr.contents(),
        format!("|err{}{}c{}", BG_BLUE, RED, RESET)
    );

    h.logger.set_color(false);
    h.logger.enable_timestamps();
    h.logger.set_timestamp_format("T");
    h.logger.info("|t");
    h.logger.disable_timestamps();
    h.logger.info("|u");
    assert!(h.file.contents().ends_with("[T] |t|u"));

    let settings = h.logger.settings();
    assert_eq!(settings.level, Level::Info);
    assert!(!settings.stdout);
    assert!(settings.stderr);
    assert_eq!(settings.text_color, RED);
    assert_eq!(settings.bg_color, BG_BLUE);
    assert_eq!(settings.timestamp_format, "T");
}

#[test]
fn level_methods_use_fixed_levels() {
    let h = harness(plain(Level::Warn));

    h.logger.debug("d");
    h.logger.info("i");
    h.logger.warn("w");
    h.logger.error("e");
    h.logger.fatal("f");

    assert_eq!(h.file.contents(), "wef");
}

#[test]
fn fatal_does_not_terminate() {
    let h = harness(plain(Level::All));
    h.logger.fatal("fatal ");
    h.logger.fatalln("twice");
    h.logger.info("alive");
    assert_eq!(h.file.contents(), "fatal twice\nalive");
}

#[test]
fn debug_emits_caller_line_then_message() {
    let h = harness(plain(Level::All));
    assert!(h.logger.debug_mode());

    h.logger.debug("payload");

    let out = h.file.contents();
    assert!(out.starts_with("Debug Message - File: "), "{:?}", out);
    assert!(out.contains("tests.rs, Line: "), "{:?}", out);
    assert!(out.ends_with("\npayload"), "{:?}", out);
}

#[test]
fn debug_with_macro_caller_names_the_function() {
    let h = harness(plain(Level::All));
    h.logger.debug_at(crate::caller!(), "payload");
    assert!(h
        .file
        .contents()
        .contains("debug_with_macro_caller_names_the_function"));
}

#[test]
fn disabled_debug_mode_silences_debug() {
    let h = harness(plain(Level::All));
    h.logger.disable_debug_mode();

    h.logger.debug("hidden");
    h.logger.debugln("hidden");
    h.logger.debugf(format_args!("{}", "hidden"));
    assert_eq!(h.file.contents(), "");

    h.logger.enable_debug_mode();
    h.logger.debugln("shown");
    assert!(h.file.contents().ends_with("shown\n"));
}

#[test]
fn debug_is_still_subject_to_threshold() {
    let h = harness(plain(Level::Info));
    h.logger.debug("filtered");
    assert_eq!(h.file.contents(), "");
}

#[test]
fn color_convenience_methods_use_given_color() {
    let h = harness(Settings {
        color: true,
        ..plain(Level::All)
    });

    h.logger.warn_color(GREEN, "w");
    h.logger.debug_black("b");

    assert_eq!(
        h.file.contents(),
        format!(
            "{bg}{GREEN}w{RESET}{bg}{black}b{RESET}",
            bg = BG_BLACK,
            black = color::BLACK
        )
    );
}

#[test]
fn formatting_wrappers_delegate_to_level_methods() {
    let h = harness(plain(Level::Info));

    h.logger.infof(format_args!("{} bytes|", 3));
    h.logger.errorf(format_args!("code={}|", 7));
    h.logger.infoln("line");
    h.logger.warningln("warned");
    h.logger.logf(Level::Debug, format_args!("dropped"));

    assert_eq!(h.file.contents(), "3 bytes|code=7|line\nwarned\n");
}

#[test]
fn print_map_logs_one_line_per_entry() {
    let h = harness(plain(Level::All));
    let mut map = BTreeMap::new();
    map.insert("port", 8080);
    map.insert("workers", 4);

    h.logger.print_map(&map);

    assert_eq!(h.file.contents(), "port: 8080\nworkers: 4\n");
}

#[test]
fn log_var_and_elapsed_log_at_info() {
    let h = harness(plain(Level::All));

    h.logger.log_var("name", "fanlog");
    h.logger.elapsed(Instant::now(), "startup");

    let out = h.file.contents();
    assert!(out.starts_with("Variable: name, Value: \"fanlog\"\n"));
    assert!(out.contains("startup took "));
}

#[test]
fn concurrent_calls_do_not_interleave_within_a_message() {
    let h = harness(plain(Level::All));
    let logger = Arc::new(h.logger);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.infoln(format!("thread-{}-line-{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let out = h.file.contents();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 400);
    assert!(lines
        .iter()
        .all(|line| line.starts_with("thread-") && line.contains("-line-")));
}

#[test]
fn open_appends_to_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logs.txt");
    fs::write(&path, "old|").unwrap();

    let param = Parameter::new(
        &path,
        Settings {
            stdout: false,
            ..plain(Level::All)
        },
    );
    let logger = Logger::open(&param).expect("open log file");
    logger.info("new");
    logger.flush_sinks().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "old|new");
}

#[test]
fn open_reports_unreachable_path() {
    let dir = tempdir().unwrap();
    let param = Parameter::new(dir.path().join("missing/dir/logs.txt"), plain(Level::All));

    match Logger::open(&param) {
        Err(LogError::Open { path, .. }) => assert!(path.ends_with("logs.txt")),
        other => panic!("expected open error, got {:?}", other),
    }
}
