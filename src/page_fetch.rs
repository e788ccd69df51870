use anyhow::{anyhow, Context, Result};

use crate::http_client::http_client;

/// Blocking GET returning the response body, or a fatal error carrying the
/// status code on anything outside 2xx. No retries: a failed page aborts the
/// operation and whatever was checkpointed before it stays on disk.
pub fn fetch_page(url: &str, query: &[(&str, &str)]) -> Result<String> {
    let client = http_client()?;
    let mut req = client.get(url);
    if !query.is_empty() {
        req = req.query(query);
    }
    let resp = req
        .send()
        .with_context(|| format!("request failed for {url}"))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!(
            "failed to download web page {url}. status code={status}"
        ));
    }
    resp.text()
        .with_context(|| format!("failed reading body from {url}"))
}
