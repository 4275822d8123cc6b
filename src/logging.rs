//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file instead of
//! stderr. The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::error::AppError;

const LOG_FILE_NAME: &str = "subway-waker.log";

/// `<cache_dir>/subway-waker/subway-waker.log`, or the temp dir when the
/// platform has no cache dir
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("subway-waker")
        .join(LOG_FILE_NAME)
}

/// Install the global logger, appending to `path`. Returns the path used.
pub fn init(path: Option<&Path>) -> Result<PathBuf, AppError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = open_log(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();

    Ok(path)
}

fn open_log(path: &Path) -> Result<fs::File, AppError> {
    let to_error = |source| AppError::Log {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}
