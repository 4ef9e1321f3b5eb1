use crate::catalog::ModelDescriptor;
use crate::error::RelayError;

/// Build `{base}/{version}/models/{model}:{endpoint}?key={api_key}`.
///
/// # Errors
///
/// Returns [`RelayError::Config`] when the configured base URL cannot be
/// combined into a valid URL.
pub fn build_upstream_url(
    base_url: &str,
    model: &ModelDescriptor,
    api_key: &str,
) -> Result<url::Url, RelayError> {
    let raw = format!(
        "{}/{}/models/{}:{}",
        base_url.trim().trim_end_matches('/'),
        model.api_version,
        model.id,
        model.endpoint
    );
    let mut url = url::Url::parse(&raw)
        .map_err(|err| RelayError::Config(format!("Invalid Gemini base URL: {err}")))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

/// The URL without its query string, safe to log.
#[must_use]
pub fn redacted_url(url: &url::Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.to_string()
}
