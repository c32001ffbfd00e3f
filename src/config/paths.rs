use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::utils::error::Result;

const RAW_FILE: &str = "oui.csv";
const INDEX_FILE: &str = "oui.json";

/// Location of the two cache files in the per-user data directory.
///
/// Resolved once at startup and passed into the registry store and lookup
/// index explicitly; read-only afterwards.
#[derive(Debug, Clone)]
pub struct CachePaths {
    data_dir: PathBuf,
}

impl CachePaths {
    /// Resolve the platform user-data directory, creating it if needed
    /// (`~/.local/share/ouilookup` on Linux, `%APPDATA%\ouilookup` on
    /// Windows).
    pub fn resolve() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "ouilookup").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine the user data directory",
            )
        })?;
        Self::at(dirs.data_dir().to_path_buf())
    }

    /// Use an explicit directory instead of the platform default.
    pub fn at(data_dir: PathBuf) -> Result<Self> {
        if !data_dir.is_dir() {
            fs::create_dir_all(&data_dir)?;
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The raw registry dump as downloaded.
    pub fn raw_csv(&self) -> PathBuf {
        self.data_dir.join(RAW_FILE)
    }

    /// The derived lookup index.
    pub fn index_json(&self) -> PathBuf {
        self.data_dir.join(INDEX_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_at_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("cache");
        let paths = CachePaths::at(dir.clone()).unwrap();
        assert!(dir.is_dir());
        assert_eq!(paths.raw_csv(), dir.join("oui.csv"));
        assert_eq!(paths.index_json(), dir.join("oui.json"));
    }
}
