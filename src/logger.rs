use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;

use crate::config::ConfigManager;

/// Rotate the log file once it grows past this size (10MB)
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Initialize the logging system
///
/// Console logging goes to stderr and is controlled via `RUST_LOG`
/// (default: `warn`, so the operation report stays readable). Every
/// completed operation is also appended to a log file in the config
/// directory through [`log_to_file`]:
/// - Linux: ~/.config/sfclone/sfclone.log or $XDG_CONFIG_HOME/sfclone/sfclone.log
/// - macOS: ~/Library/Application Support/sfclone/sfclone.log
/// - Windows: %APPDATA%\sfclone\sfclone.log
///
/// ```bash
/// # Show every copied file
/// RUST_LOG=debug sfclone backup --all
/// ```
pub fn init_logger() {
    // Warn by default so the report is not buried
    let default_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(default_level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok(); // Already initialized
}

/// Append a line to the log file
pub fn log_to_file(message: &str) -> Result<()> {
    ConfigManager::ensure_config_dir()?;
    let log_path = ConfigManager::log_file_path()?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    )?;

    Ok(())
}

/// Rotate the log file to `sfclone.log.old` if it exceeds the size limit
pub fn rotate_log_if_needed() -> Result<()> {
    let log_path = ConfigManager::log_file_path()?;

    if log_path.exists() {
        let metadata = std::fs::metadata(&log_path)?;

        if metadata.len() > MAX_LOG_SIZE {
            // Only one old generation is kept
            let old_log_path = log_path.with_extension("log.old");

            if old_log_path.exists() {
                std::fs::remove_file(&old_log_path)?;
            }

            std::fs::rename(&log_path, &old_log_path)?;

            log::info!("Log file rotated to {}", old_log_path.display());
        }
    }

    Ok(())
}

/// Record an operation in the log file without ever failing the caller
pub fn audit(message: &str) {
    if let Err(e) = rotate_log_if_needed().and_then(|_| log_to_file(message)) {
        log::debug!("Could not write log file: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp = TempDir::new().unwrap();
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", temp.path());

        f();

        match previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger();
        init_logger();
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_log_to_file() {
        with_temp_config(|| {
            log_to_file("Test log message").unwrap();

            let log_path = ConfigManager::log_file_path().unwrap();
            let contents = std::fs::read_to_string(&log_path).unwrap();
            assert!(contents.contains("Test log message"));
        });
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_rotate_log_creates_backup() {
        with_temp_config(|| {
            ConfigManager::ensure_config_dir().unwrap();
            let log_path = ConfigManager::log_file_path().unwrap();
            let mut file = File::create(&log_path).unwrap();
            file.write_all(&vec![b'a'; (MAX_LOG_SIZE + 1) as usize]).unwrap();
            drop(file);

            rotate_log_if_needed().unwrap();

            assert!(log_path.with_extension("log.old").exists());
            assert!(!log_path.exists());
        });
    }
}
