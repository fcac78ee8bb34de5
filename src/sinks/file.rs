//! Timestamped file target
//!
//! Every rotation closes the current file and opens a new one named
//! `<prefix>-<YYYYMMDDHHMMSS.fffff><ext>` in the same directory. Old files are
//! left alone; removing or compressing them is up to the operator.

use crate::core::timestamp::file_stamp;
use crate::core::{Clock, LoggerError, Result, RotateTarget, Sink, SystemClock};
use chrono::{DateTime, Local};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{is_separator, Component, Path, PathBuf};
use std::sync::Arc;

/// File name used when the given path names a directory.
pub const DEFAULT_FILE_NAME: &str = "log.txt";
/// Extension used when the file name has none.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// How often the clock is re-sampled before a `-N` suffix is added.
const CLOCK_RETRIES: usize = 8;

/// Rotation target writing to one timestamped file at a time
///
/// The path given at construction may name a directory (an existing one, or
/// any path ending in a separator) or a file. For a file, the extension is kept
/// and the part of the name before the first `-` becomes the prefix of every
/// generated file, so `logs/access-log` produces `logs/access-<stamp>.txt`.
///
/// Writes go straight to the file without buffering. The file is synced before
/// it is closed.
///
/// # Examples
///
/// ```no_run
/// use leveled_logger::prelude::*;
///
/// let target = FileTarget::new("logs/app.log").unwrap();
/// let logger = Logger::builder()
///     .prefix("app")
///     .rotating_with(target, RotationThresholds::new(64 << 20, -1, 24 * 60))
///     .build()
///     .unwrap();
///
/// logger.info("started");
/// ```
pub struct FileTarget {
    file: Option<File>,
    directory: PathBuf,
    name_prefix: String,
    extension: String,
    path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
}

impl FileTarget {
    /// Resolve `path`, create its directory and open the first file.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FileTarget`] when the directory cannot be created
    /// or the first file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let given = path.as_ref();
        let (directory, name_prefix, extension) = resolve_path(given)?;

        fs::create_dir_all(&directory).map_err(|e| {
            LoggerError::file_target(
                directory.display().to_string(),
                format!("Failed to create directory: {}", e),
            )
        })?;

        let mut target = Self {
            file: None,
            directory,
            name_prefix,
            extension,
            path: None,
            clock,
        };

        let now = target.clock.now();
        target
            .rotate(now, now)
            .map_err(|e| LoggerError::file_target(given.display().to_string(), e.to_string()))?;

        Ok(target)
    }

    /// The file currently written to, or the last one if none is open.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// Includes the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn display_path(&self) -> String {
        self.path
            .as_deref()
            .unwrap_or(&self.directory)
            .display()
            .to_string()
    }

    // Sync and drop the handle. The handle is released even if the sync fails.
    fn close_file(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        file.sync_all().map_err(|e| {
            LoggerError::io_operation(
                "syncing log file",
                format!("Failed to sync '{}'", self.display_path()),
                e,
            )
        })
    }

    fn candidate(&self, at: &DateTime<Local>, seq: Option<u64>) -> PathBuf {
        let mut name = format!("{}-{}", self.name_prefix, file_stamp(at));
        if let Some(seq) = seq {
            name.push('-');
            name.push_str(&seq.to_string());
        }
        name.push_str(&self.extension);
        self.directory.join(name)
    }

    fn is_free(&self, candidate: &Path) -> bool {
        self.path.as_deref() != Some(candidate) && !candidate.exists()
    }

    fn next_path(&self, mut at: DateTime<Local>) -> PathBuf {
        for _ in 0..CLOCK_RETRIES {
            let candidate = self.candidate(&at, None);
            if self.is_free(&candidate) {
                return candidate;
            }
            at = at.max(self.clock.now());
        }

        // the clock did not move far enough; number the name instead
        let mut seq = 1;
        loop {
            let candidate = self.candidate(&at, Some(seq));
            if self.is_free(&candidate) {
                return candidate;
            }
            seq += 1;
        }
    }
}

impl Sink for FileTarget {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        if self.file.is_none() {
            return Err(LoggerError::not_open(self.display_path()));
        }
        let path = self.display_path();
        if let Some(file) = self.file.as_mut() {
            file.write_all(bytes).map_err(|e| {
                LoggerError::io_operation("writing log file", format!("Failed to write '{}'", path), e)
            })?;
        }
        Ok(bytes.len())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()?;
        }
        Ok(())
    }

    /// Sync and close the current file. Closing twice is a no-op.
    fn close(&mut self) -> Result<()> {
        self.close_file()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl RotateTarget for FileTarget {
    fn rotate(&mut self, _begin: DateTime<Local>, now: DateTime<Local>) -> Result<()> {
        let closed = self.close_file();

        let path = self.next_path(now);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;

        self.file = Some(file);
        self.path = Some(path);
        closed
    }
}

impl Drop for FileTarget {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.sync_all() {
                eprintln!(
                    "[LOGGER WARNING] Failed to sync '{}' on drop: {}",
                    self.display_path(),
                    e
                );
            }
        }
    }
}

/// Split a user path into directory, name prefix and extension.
fn resolve_path(path: &Path) -> Result<(PathBuf, String, String)> {
    let names_directory = path.as_os_str().to_string_lossy().ends_with(is_separator)
        || path.as_os_str().is_empty()
        || path.is_dir();

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = env::current_dir().map_err(|e| {
            LoggerError::file_target(
                path.display().to_string(),
                format!("Cannot resolve relative path: {}", e),
            )
        })?;
        cwd.join(path)
    };
    let absolute = normalize(&absolute);

    let file_path = if names_directory {
        absolute.join(DEFAULT_FILE_NAME)
    } else {
        absolute
    };

    let (Some(directory), Some(file_name)) = (file_path.parent(), file_path.file_name()) else {
        return Err(LoggerError::file_target(
            path.display().to_string(),
            "path has no file name",
        ));
    };
    let file_name = file_name.to_string_lossy();

    let (stem, extension) = match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], file_name[dot..].to_string()),
        None => (&file_name[..], DEFAULT_EXTENSION.to_string()),
    };
    let name_prefix = stem.split('-').next().unwrap_or(stem).to_string();

    Ok((directory.to_path_buf(), name_prefix, extension))
}

/// Lexically drop `.` and resolve `..` components. `..` at the root stays at
/// the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn file_name(target: &FileTarget) -> String {
        target
            .path()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn frozen() -> Arc<ManualClock> {
        let at = Local
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("valid datetime")
            + chrono::TimeDelta::microseconds(123_450);
        Arc::new(ManualClock::new(at))
    }

    #[test]
    fn test_trailing_separator_names_directory() {
        let dir = TempDir::new().unwrap();
        let path = format!("{}/logs/", dir.path().display());

        let target = FileTarget::new(&path).unwrap();
        assert_eq!(target.directory(), dir.path().join("logs"));
        assert_eq!(target.name_prefix(), "log");
        assert_eq!(target.extension(), ".txt");
        assert!(target.path().is_some_and(Path::exists));
        assert!(file_name(&target).starts_with("log-"));
        assert!(file_name(&target).ends_with(".txt"));
    }

    #[test]
    fn test_existing_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();

        let target = FileTarget::new(dir.path().join("logs")).unwrap();
        assert_eq!(target.directory(), dir.path().join("logs"));
        assert_eq!(target.name_prefix(), "log");
        assert_eq!(target.extension(), ".txt");
    }

    #[test]
    fn test_file_path_keeps_extension() {
        let dir = TempDir::new().unwrap();

        let target = FileTarget::new(dir.path().join("logs").join("app.log")).unwrap();
        assert_eq!(target.directory(), dir.path().join("logs"));
        assert_eq!(target.name_prefix(), "app");
        assert_eq!(target.extension(), ".log");
        assert!(file_name(&target).starts_with("app-"));
        assert!(file_name(&target).ends_with(".log"));
    }

    #[test]
    fn test_prefix_stops_at_first_dash() {
        let dir = TempDir::new().unwrap();

        let target = FileTarget::new(dir.path().join("access-log")).unwrap();
        assert_eq!(target.name_prefix(), "access");
        assert_eq!(target.extension(), ".txt");

        // names produced by an earlier run resume the same prefix
        let resumed = FileTarget::new(dir.path().join("access-20240102030405.12345.txt")).unwrap();
        assert_eq!(resumed.name_prefix(), "access");
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let (directory, prefix, extension) = resolve_path(Path::new("./rel/app.log")).unwrap();
        assert!(directory.is_absolute());
        assert!(directory.ends_with("rel"));
        assert_eq!(prefix, "app");
        assert_eq!(extension, ".log");
    }

    #[test]
    fn test_parent_components_are_resolved() {
        let dir = TempDir::new().unwrap();
        let given = dir.path().join("a").join("..").join(".").join("b").join("x.log");
        let target = FileTarget::new(&given).unwrap();

        assert_eq!(target.directory(), dir.path().join("b"));
        assert!(dir.path().join("b").is_dir());
        assert!(!dir.path().join("a").exists());
        assert_eq!(target.path().and_then(Path::parent), Some(dir.path().join("b").as_path()));
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../x/./y/../z")), PathBuf::from("/x/z"));
    }

    #[test]
    fn test_name_format() {
        let dir = TempDir::new().unwrap();
        let target = FileTarget::with_clock(dir.path().join("svc.log"), frozen()).unwrap();
        assert_eq!(file_name(&target), "svc-20240102030405.12345.log");
    }

    #[test]
    fn test_frozen_clock_yields_distinct_names() {
        let dir = TempDir::new().unwrap();
        let clock = frozen();
        let mut target = FileTarget::with_clock(dir.path().join("x.log"), clock.clone()).unwrap();
        let first = file_name(&target);

        let now = clock.now();
        target.rotate(now, now).unwrap();
        let second = file_name(&target);
        target.rotate(now, now).unwrap();
        let third = file_name(&target);

        assert_eq!(first, "x-20240102030405.12345.log");
        assert_eq!(second, "x-20240102030405.12345-1.log");
        assert_eq!(third, "x-20240102030405.12345-2.log");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_rotate_switches_files() {
        let dir = TempDir::new().unwrap();
        let clock = frozen();
        let mut target = FileTarget::with_clock(dir.path().join("app.log"), clock.clone()).unwrap();
        let first = target.path().map(Path::to_path_buf).unwrap();

        target.write(b"first file\n").unwrap();
        clock.advance(chrono::TimeDelta::seconds(1));
        let now = clock.now();
        target.rotate(now, now).unwrap();
        target.write(b"second file\n").unwrap();
        target.close().unwrap();

        let second = target.path().map(Path::to_path_buf).unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read_to_string(first).unwrap(), "first file\n");
        assert_eq!(fs::read_to_string(second).unwrap(), "second file\n");
    }

    #[test]
    fn test_write_after_close_is_not_open() {
        let dir = TempDir::new().unwrap();
        let mut target = FileTarget::new(dir.path().join("c.log")).unwrap();

        target.close().unwrap();
        assert!(!target.is_open());
        assert!(target.close().is_ok());
        assert!(matches!(target.write(b"late"), Err(LoggerError::NotOpen { .. })));
    }

    #[test]
    fn test_unwritable_directory_is_config_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let result = FileTarget::new(blocker.join("sub").join("app.log"));
        assert!(matches!(result, Err(LoggerError::FileTarget { .. })));
    }
}
