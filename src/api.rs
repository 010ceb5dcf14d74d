use std::env;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_client::http_client;

const DEFAULT_API_BASE: &str = "https://lfcha2025.onrender.com";

/// Base URL of the league API, without a trailing slash.
pub fn api_base() -> String {
    match env::var("LIGA_API_BASE") {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}

/// One GET against the league API, returning the raw body.
///
/// Transport failures and non-2xx statuses are errors; the body itself is
/// returned untouched so callers can decide what an empty or `null` payload
/// means (for every list endpoint it is a valid empty result, not a failure).
/// No retries and no caching.
pub fn get_text(path: &str, params: &[(&str, Option<String>)]) -> Result<String> {
    let client = http_client()?;
    let url = format!("{}{path}", api_base());
    let query = query_pairs(params);
    let resp = client
        .get(&url)
        .query(&query)
        .send()
        .with_context(|| format!("request failed: {path}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        anyhow::bail!("http {status}: {path}");
    }
    Ok(body)
}

/// Tolerant first step for list payloads: empty bodies and JSON `null` read
/// as "nothing there" rather than as parse failures.
pub fn non_null_json(raw: &str, label: &'static str) -> Result<Option<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(trimmed).context(label)?;
    Ok(Some(value))
}

/// Drops parameters with no usable value. Omission, not an empty string, is
/// what signals "unfiltered" to the API.
pub fn query_pairs<'a>(params: &'a [(&'a str, Option<String>)]) -> Vec<(&'a str, &'a str)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let trimmed = value.as_deref()?.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some((*key, trimmed))
            }
        })
        .collect()
}
