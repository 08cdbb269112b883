use anyhow::{Context, Result};
use tracing::debug;

pub const WIKIDOT_URI: &str = "https://dnd5e.wikidot.com";

/// Fetch one page body. Any non-2xx status is an error; callers treat it the
/// same as a transport failure.
pub fn page(uri: &str) -> Result<String> {
    debug!("GET {}", uri);
    let body = reqwest::blocking::Client::new()
        .get(uri)
        .send()
        .with_context(|| format!("request to {} failed", uri))?
        .error_for_status()
        .with_context(|| format!("{} returned a non-success status", uri))?
        .text()
        .with_context(|| format!("reading body from {} failed", uri))?;
    Ok(body)
}
