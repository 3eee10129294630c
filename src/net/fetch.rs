use url::Url;

use crate::error::{FolioError, Result};

/// Result of fetching a page
#[derive(Clone)]
pub struct FetchResult {
    pub html: String,
    pub url: String,
    pub status: u16,
}

/// Normalize a user-typed address: bare hosts get `https://`.
pub fn normalize_url(url_str: &str) -> Result<Url> {
    let url = if !url_str.starts_with("http://") && !url_str.starts_with("https://") {
        format!("https://{}", url_str)
    } else {
        url_str.to_string()
    };
    Ok(Url::parse(&url)?)
}

/// Fetch a page's HTML (blocking).
pub fn fetch_page(url_str: &str) -> Result<FetchResult> {
    let parsed = normalize_url(url_str)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("folio-view/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FolioError::Transport(format!("client error: {}", e)))?;

    let response = client
        .get(parsed.as_str())
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .map_err(|e| FolioError::Transport(format!("request failed: {}", e)))?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let html = response
        .text()
        .map_err(|e| FolioError::Transport(format!("failed to read body: {}", e)))?;

    log::info!("fetched {} ({})", final_url, status);
    Ok(FetchResult {
        html,
        url: final_url,
        status,
    })
}
