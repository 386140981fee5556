//! Logging setup for the `labor` binary.
//!
//! Events go to stderr, keeping stdout for command output (JSON, CSV, SVG
//! paths). A log file can be attached after startup, and the level filter can
//! be swapped once the config file has been read.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

const DEFAULT_FILTER: &str = "info";

static FILTER: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();
static LOG_FILE: OnceLock<LogFile> = OnceLock::new();

/// `12:04:05.123  INFO labor_core::history: history entry added id=...`
struct LineFormat;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "31",
        Level::WARN => "33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m \x1b[{}m{:>5}\x1b[0m \x1b[2m{}:\x1b[0m ",
                level_color(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Optional log file shared by every event. Writes are dropped until a file
/// is attached.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn attach(
        &self,
        file: File,
    ) {
        let mut slot = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(file);
    }
}

impl Write for LogFile {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        let mut slot = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match slot.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut slot = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

/// Installs the global subscriber. Later calls are no-ops.
///
/// The filter comes from `RUST_LOG`, falling back to `info`.
pub fn init_default_logging() {
    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter, handle) = reload::Layer::new(initial);

    let log_file = LogFile::default();
    let file_writer = log_file.clone();

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(move || file_writer.clone()),
        )
        .try_init()
        .is_ok();

    if installed {
        let _ = FILTER.set(handle);
        let _ = LOG_FILE.set(log_file);
    }
}

/// Replaces the active filter, e.g. `debug` or `labor_core=trace,info`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let handle = FILTER.get().context("logging is not initialized")?;
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log level '{directive}'"))?;
    handle
        .reload(filter)
        .context("cannot apply the new log level")
}

/// Appends all further log output to `path` as well. The directory must
/// exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let log_file = LOG_FILE.get().context("logging is not initialized")?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    log_file.attach(file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detached_log_file_swallows_output() {
        let mut log = LogFile::default();

        assert_eq!(log.write(b"dropped").unwrap(), 7);
        assert!(log.flush().is_ok());
    }

    #[test]
    fn attached_log_file_receives_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labor.log");
        let log = LogFile::default();
        log.attach(File::create(&path).unwrap());

        let mut writer = log.clone();
        writer.write_all(b"history entry added\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "history entry added\n"
        );
    }

    #[test]
    fn bad_level_directive_is_rejected() {
        init_default_logging();

        assert!(set_log_level("labor_core=[").is_err());
    }
}
