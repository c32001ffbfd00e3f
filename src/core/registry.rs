use chrono::{DateTime, Local};
use reqwest::Client;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::config::CachePaths;
use crate::core::index;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::validate_url;

/// Minimum interval between downloads, per the IEEE's one-per-day limit on
/// RA assignment files.
const DOWNLOAD_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Owner of the on-disk cache lifecycle: download, rate-limited refresh,
/// index rebuild, and readiness checks.
pub struct RegistryStore {
    paths: CachePaths,
    url: String,
    client: Client,
}

impl RegistryStore {
    pub fn new(paths: CachePaths, url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            paths,
            url: url.into(),
            client: Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?,
        })
    }

    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    /// Fetch `url` and write the response body verbatim to `dest`.
    /// Returns the number of bytes written; `dest` is untouched on failure.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        validate_url(url)?;
        println!("Downloading `{url}` to: `{}`", dest.display());
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(LookupError::EmptyDownload {
                url: url.to_string(),
            });
        }
        fs::write(dest, &body)?;
        tracing::info!("downloaded {} bytes from {url}", body.len());
        println!("Download complete. Bytes downloaded: {}", body.len());
        Ok(body.len() as u64)
    }

    /// Download the registry dump into the raw cache file, refusing when the
    /// previous download is younger than the minimum interval. A refused
    /// refresh mutates nothing.
    pub async fn refresh(&self) -> Result<u64> {
        let raw = self.paths.raw_csv();
        if let Some(mtime) = file_mtime(&raw) {
            if let Ok(age) = SystemTime::now().duration_since(mtime) {
                if age < DOWNLOAD_INTERVAL {
                    return Err(LookupError::RateLimited {
                        last: DateTime::<Local>::from(mtime),
                        remaining: chrono::Duration::from_std(DOWNLOAD_INTERVAL - age)
                            .unwrap_or_else(|_| chrono::Duration::zero()),
                    });
                }
            }
        }
        self.download(&self.url, &raw).await
    }

    /// Parse the raw registry dump into the lookup structure and persist it
    /// as the derived cache file. Rows sharing an OUI merge into an ordered
    /// list. Returns the number of distinct OUIs.
    pub fn rebuild_index(&self) -> Result<usize> {
        let raw = self.paths.raw_csv();
        let dest = self.paths.index_json();
        println!(
            "Converting `{}` to `{}`...",
            raw.display(),
            dest.display()
        );

        let mut reader = csv::Reader::from_path(&raw)?;
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for record in reader.records() {
            let record = record?;
            // Columns: Registry, Assignment, Organization Name, Organization Address
            if record.len() < 3 {
                continue;
            }
            let assignment = record.get(1).unwrap_or("").trim();
            let org_name = record.get(2).unwrap_or("").trim();
            if assignment.len() != 6 || org_name.is_empty() {
                continue;
            }
            entries
                .entry(assignment.to_string())
                .or_default()
                .push(org_name.to_string());
        }

        let json = index::to_index_json(&entries)?;
        fs::write(&dest, &json)?;
        tracing::info!(
            "indexed {} OUIs into {}",
            entries.len(),
            dest.display()
        );
        println!("Success. Wrote {} bytes to `{}`", json.len(), dest.display());
        Ok(entries.len())
    }

    /// Verify the cache is usable. A raw dump without a derived index
    /// triggers a rebuild; no raw dump at all means a download is required.
    pub fn ensure_ready(&self) -> Result<()> {
        let raw = self.paths.raw_csv();
        let index_file = self.paths.index_json();
        if raw.exists() && !index_file.exists() {
            println!("Can not find file `{}`", index_file.display());
            println!("Found source file `{}`.", raw.display());
            self.rebuild_index()?;
        }
        if !index_file.exists() {
            return Err(LookupError::CacheUnavailable { path: index_file });
        }
        Ok(())
    }
}

fn file_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
