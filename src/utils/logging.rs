use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

use crate::utils::app_paths::AppPaths;

/// Writer that timestamps every line and appends it to the session log file.
/// The TUI owns stdout, so nothing is echoed to the terminal.
#[derive(Clone)]
pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl LogFileWriter {
    /// Open `ataix-cli_<timestamp>.log` in `log_dir` and point `latest.log` at it
    pub fn create(log_dir: &Path) -> std::io::Result<(Self, PathBuf)> {
        std::fs::create_dir_all(log_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("ataix-cli_{}.log", timestamp));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        #[cfg(unix)]
        {
            let latest_path = log_dir.join("latest.log");
            let _ = std::fs::remove_file(&latest_path);
            let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
        }

        Ok((
            Self {
                file: Arc::new(Mutex::new(file)),
            },
            log_path,
        ))
    }
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let message = String::from_utf8_lossy(buf);
        let message = message.trim_end();
        if message.is_empty() {
            return Ok(buf.len());
        }

        let line = format!("[{}] {}\n", Local::now().format("%H:%M:%S%.3f"), message);
        if let Ok(mut file) = self.file.lock() {
            file.write_all(line.as_bytes())?;
            // Important for crash debugging!
            file.flush()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut file) = self.file.lock() {
            file.flush()?;
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize tracing with the file writer. Returns the log path, or `None`
/// when no log file could be opened (logging is then discarded).
pub fn init_tracing() -> Option<PathBuf> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFileWriter::create(&AppPaths::log_dir()) {
        Ok((writer, path)) => {
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .without_time() // We add our own timestamps
                .compact();

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();

            tracing::info!(target: "system", "Logging to {}", path.display());
            Some(path)
        }
        Err(e) => {
            eprintln!("Could not open log file: {}", e);
            None
        }
    }
}
