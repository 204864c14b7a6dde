//! # Configuration Module
//!
//! Resolves where the preference file lives and carries the few runtime
//! settings the binary needs.
//!
//! ## Data Storage
//!
//! Without `--file`, the store is kept in the platform-standard data directory:
//! - Linux: `~/.local/share/musicrec/musicrecplus.txt`
//! - macOS: `~/Library/Application Support/musicrec/musicrecplus.txt`
//! - Windows: `%APPDATA%\musicrec\musicrecplus.txt`

use crate::algorithm::DEFAULT_POPULAR_LIMIT;
use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the preference store.
pub const STORE_FILE_NAME: &str = "musicrecplus.txt";

/// Returns the platform-appropriate data directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The musicrec subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!(
            "Could not determine system data directory. Use --file to choose a store location."
        ))?;

    let app_dir = data_dir.join("musicrec");
    fs::create_dir_all(&app_dir)
        .with_context(|| format!(
            "Failed to create data directory at {}. Please check file permissions.",
            app_dir.display()
        ))?;

    Ok(app_dir)
}

/// Returns the default store file path inside [`get_data_dir`].
///
/// # Examples
///
/// ```no_run
/// use musicrec::config::default_store_path;
///
/// let path = default_store_path()?;
/// println!("Store location: {}", path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn default_store_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(STORE_FILE_NAME))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Path to the preference store file
    pub store_path: PathBuf,
    /// How many artists the popularity query shows
    pub popular_limit: usize,
}

impl RuntimeConfig {
    /// Build the configuration, falling back to [`default_store_path`] when
    /// no explicit file was given. Relative paths are made absolute against
    /// the current directory.
    pub fn new(store_path: Option<&Path>) -> Result<Self> {
        let store_path = match store_path {
            Some(path) => path
                .absolutize()
                .with_context(|| format!("Invalid store path {}", path.display()))?
                .into_owned(),
            None => default_store_path()?,
        };

        Ok(Self {
            store_path,
            popular_limit: DEFAULT_POPULAR_LIMIT,
        })
    }

    /// Override how many artists the popularity query shows.
    #[must_use]
    pub fn with_popular_limit(mut self, limit: usize) -> Self {
        self.popular_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_absolutized() {
        let config = RuntimeConfig::new(Some(Path::new("prefs.txt"))).expect("valid path");
        assert!(config.store_path.is_absolute());
        assert!(config.store_path.ends_with("prefs.txt"));
        assert_eq!(config.popular_limit, DEFAULT_POPULAR_LIMIT);
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("store.txt");
        let config = RuntimeConfig::new(Some(&path)).expect("valid path");
        assert_eq!(config.store_path, path);
    }

    #[test]
    fn test_popular_limit_override() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let config = RuntimeConfig::new(Some(&dir.path().join("s.txt")))
            .expect("valid path")
            .with_popular_limit(5);
        assert_eq!(config.popular_limit, 5);
    }

    #[test]
    fn test_config_serializes() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let config = RuntimeConfig::new(Some(&dir.path().join("s.txt"))).expect("valid path");
        let json = serde_json::to_string(&config).expect("serializable");
        let back: RuntimeConfig = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back.store_path, config.store_path);
    }
}
