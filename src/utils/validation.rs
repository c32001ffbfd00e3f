use crate::utils::error::{LookupError, Result};
use url::Url;

/// Check that a registry URL is well-formed and uses http(s) before any
/// network access is attempted.
pub fn validate_url(url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LookupError::InvalidUrl {
            url: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LookupError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LookupError::InvalidUrl {
            url: url_str.to_string(),
            reason: format!("invalid URL format: {}", e),
        }),
    }
}
