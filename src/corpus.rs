/* ------------------------------------------------------------------ */
/* Corpus loading: one blocking HTTP GET, or a local file            */
/* ------------------------------------------------------------------ */

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Fetch the corpus over HTTP. No retry; any failure ends the run.
pub fn fetch(url: &str) -> Result<String> {
    info!("fetching corpus from {url}");
    let response = ureq::get(url).call().map_err(|e| Error::Fetch {
        url:    url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(response.into_string()?)
}

pub fn load(path: &Path) -> Result<String> {
    info!("loading corpus from {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

/// Local file when a path is given, otherwise the URL.
pub fn load_or_fetch(path: Option<&Path>, url: &str) -> Result<String> {
    match path {
        Some(p) => load(p),
        None => fetch(url),
    }
}
