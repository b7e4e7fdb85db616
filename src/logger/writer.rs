//! Output sinks for the three log streams
//!
//! Notices go to stdout. Access lines and diagnostics go to stderr unless a
//! file is configured, in which case they are appended to it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static SINKS: OnceLock<LogWriter> = OnceLock::new();

enum Sink {
    Stdout,
    Stderr,
    Append(Mutex<File>),
}

impl Sink {
    fn stderr_or_file(path: Option<&str>) -> io::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stderr);
        };
        let path = Path::new(path);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::Append(Mutex::new(file)))
    }

    fn line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::Append(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{message}");
                }
            }
        }
    }
}

/// Process-wide log destinations
pub struct LogWriter {
    info: Sink,
    access: Sink,
    error: Sink,
}

impl LogWriter {
    fn open(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            info: Sink::Stdout,
            access: Sink::stderr_or_file(access_log_file)?,
            error: Sink::stderr_or_file(error_log_file)?,
        })
    }

    pub fn write_info(&self, message: &str) {
        self.info.line(message);
    }

    pub fn write_access(&self, message: &str) {
        self.access.line(message);
    }

    pub fn write_error(&self, message: &str) {
        self.error.line(message);
    }
}

/// Install the global writer. Fails if a file cannot be opened or a writer
/// is already installed.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::open(access_log_file, error_log_file)?;
    SINKS
        .set(writer)
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "log writer already set"))
}

pub fn get() -> Option<&'static LogWriter> {
    SINKS.get()
}
