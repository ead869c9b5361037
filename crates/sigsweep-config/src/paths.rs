//! Platform-specific paths for filter tables.
//!
//! # Directory Structure
//!
//! - **User tables**: `~/.config/sigsweep/tables/` (Linux), `~/Library/Application Support/sigsweep/tables/` (macOS), `%APPDATA%\sigsweep\tables\` (Windows)
//! - **User config**: the parent of the tables directory
//!
//! # Example
//!
//! ```rust,no_run
//! use sigsweep_config::paths;
//!
//! // Find a table by name (a path, then the user tables directory)
//! if let Some(path) = paths::find_table("lab3") {
//!     println!("Found table at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::{ConfigError, FilterTable, get_factory_table};

/// Application name used for directory paths.
const APP_NAME: &str = "sigsweep";

/// Subdirectory name for tables.
const TABLES_SUBDIR: &str = "tables";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific filter tables directory.
pub fn user_tables_dir() -> PathBuf {
    user_config_dir().join(TABLES_SUBDIR)
}

/// Find a table file by name.
///
/// The name can be a path to a TOML file, or a table name (with or without
/// `.toml`) looked up in the user tables directory.
pub fn find_table(name: &str) -> Option<PathBuf> {
    find_table_in(name, &user_tables_dir())
}

fn find_table_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    };

    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Resolve a table by name: a file path or user table first, then the
/// factory tables.
pub fn resolve_table(name: &str) -> Result<FilterTable, ConfigError> {
    if let Some(path) = find_table(name) {
        tracing::debug!(path = %path.display(), "loading filter table");
        return FilterTable::load(path);
    }
    get_factory_table(name).ok_or_else(|| ConfigError::TableNotFound(name.to_string()))
}

/// Ensure the user tables directory exists.
pub fn ensure_user_tables_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_tables_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// List all table files in the user tables directory, sorted.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_tables() -> Vec<PathBuf> {
    list_tables_in_dir(&user_tables_dir())
}

fn list_tables_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut tables: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    tables.sort();
    tables
}

/// Get the table name from a file path (its file stem).
///
/// # Example
///
/// ```rust
/// use sigsweep_config::paths::table_name_from_path;
/// use std::path::Path;
///
/// let name = table_name_from_path(Path::new("/path/to/lab3.toml"));
/// assert_eq!(name, Some("lab3".to_string()));
/// ```
pub fn table_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn user_tables_dir_is_namespaced() {
        let dir = user_tables_dir();
        assert!(dir.ends_with("sigsweep/tables") || dir.ends_with("sigsweep\\tables"));
    }

    #[test]
    fn find_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let table_path = temp_dir.path().join("lab.toml");
        fs::write(&table_path, "name = \"lab\"").unwrap();

        assert_eq!(find_table(table_path.to_str().unwrap()), Some(table_path));
    }

    #[test]
    fn find_by_name_adds_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("lab.toml"), "name = \"lab\"").unwrap();

        assert!(find_table_in("lab", temp_dir.path()).is_some());
        assert!(find_table_in("lab.toml", temp_dir.path()).is_some());
        assert!(find_table_in("other", temp_dir.path()).is_none());
    }

    #[test]
    fn resolve_falls_back_to_factory() {
        let table = resolve_table("hw10").unwrap();
        assert_eq!(table.name, "hw10");
        assert!(matches!(
            resolve_table("nonexistent_table_12345"),
            Err(ConfigError::TableNotFound(_))
        ));
    }

    #[test]
    fn resolve_loads_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mine.toml");
        FilterTable::new("mine").save(&path).unwrap();
        assert_eq!(resolve_table(path.to_str().unwrap()).unwrap().name, "mine");
    }

    #[test]
    fn listing_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let tables = list_tables_in_dir(temp_dir.path());
        let names: Vec<_> = tables.iter().filter_map(|p| table_name_from_path(p)).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn listing_missing_dir_is_empty() {
        assert!(list_tables_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }
}
