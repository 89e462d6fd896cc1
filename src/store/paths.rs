// Default filesystem locations.
// Resolves the data file and log file under the platform's user directories.

use std::path::PathBuf;

use directories::ProjectDirs;

const DATA_FILE: &str = "items.json";
const LOG_FILE: &str = "browse.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "catalog")
}

/// Base data directory (~/.local/share/catalog on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Base cache directory (~/.cache/catalog on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default location of the items data file, falling back to `./data/items.json`.
///
/// A missing file is created empty on start-up. The repository's
/// `data/items.json` holds the five-item seed catalog; copy it here, or pass
/// `--data data/items.json`, to browse sample data.
pub fn default_data_path() -> PathBuf {
    data_dir()
        .map(|dir| dir.join(DATA_FILE))
        .unwrap_or_else(|| PathBuf::from("data").join(DATA_FILE))
}

/// Log file for the terminal front end, which cannot log to the screen.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LOG_FILE))
}
