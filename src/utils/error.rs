use chrono::{DateTime, Local};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no data received from `{url}`")]
    EmptyDownload { url: String },

    #[error(
        "RA assignment downloads are limited to one per day; last download at {}",
        .last.format("%Y-%m-%d %H:%M:%S")
    )]
    RateLimited {
        last: DateTime<Local>,
        remaining: chrono::Duration,
    },

    #[error("could not read OUI data `{}`", .path.display())]
    CacheUnavailable { path: PathBuf },

    #[error("invalid registry URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl LookupError {
    /// Actionable hint printed beneath the error message.
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            LookupError::RateLimited { remaining, .. } => Some(format!(
                "Please try again later. Next download in: {}",
                format_remaining(remaining)
            )),
            LookupError::CacheUnavailable { .. } => {
                Some("Use the `--download` option and try again.".to_string())
            }
            LookupError::Http(_) | LookupError::EmptyDownload { .. } => {
                Some("Check the network connection and retry.".to_string())
            }
            _ => None,
        }
    }
}

fn format_remaining(remaining: &chrono::Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub type Result<T> = std::result::Result<T, LookupError>;
