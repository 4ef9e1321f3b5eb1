use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::RelayError;

fn build_reqwest_client(
    pool_max_idle_per_host: usize,
    pool_idle_timeout: Option<Duration>,
    timeout: Option<Duration>,
    use_env_proxy: bool,
) -> Result<reqwest::Client, RelayError> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(pool_max_idle_per_host)
        .pool_idle_timeout(pool_idle_timeout)
        .tcp_nodelay(true)
        .redirect(reqwest::redirect::Policy::none());

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if !use_env_proxy {
        builder = builder.no_proxy();
    }

    builder
        .build()
        .map_err(|err| RelayError::Transport(format!("Failed to build HTTP client: {err}")))
}

/// Status and fully-read body of an upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: http::StatusCode,
    pub body: bytes::Bytes,
}

/// HTTP client used for the single outbound Gemini call of each request.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with connection pooling from the given server config.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let pool_idle_timeout = if config.http_pool_idle_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(config.http_pool_idle_timeout_secs))
        };

        let client = match build_reqwest_client(
            config.http_pool_max_idle_per_host.max(1),
            pool_idle_timeout,
            config.timeout.map(Duration::from_secs),
            config.http_use_env_proxy,
        ) {
            Ok(client) => client,
            Err(err) => {
                tracing::error!(error = %err, "failed to build configured reqwest client, falling back to default client");
                reqwest::Client::new()
            }
        };

        Self { client }
    }

    /// POST a JSON body and read the whole response. Non-2xx statuses are
    /// returned as-is; only I/O failures are errors. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Transport`] when the request cannot be sent or
    /// the response body cannot be read.
    pub async fn post_json(
        &self,
        url: &url::Url,
        body: bytes::Bytes,
    ) -> Result<UpstreamReply, RelayError> {
        let response = self
            .client
            .post(url.clone())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            // reqwest errors embed the URL, which carries the API key.
            .map_err(|err| {
                RelayError::Transport(format!("Request to Gemini API failed: {}", err.without_url()))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            RelayError::Transport(format!(
                "Failed to read response body: {}",
                err.without_url()
            ))
        })?;

        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_refused_is_transport_error_without_key() {
        let transport = HttpTransport::new(&ServerConfig::default());
        let url = url::Url::parse(
            "http://127.0.0.1:9/v1beta/models/gemini-2.0-flash:generateContent?key=sekret",
        )
        .unwrap();
        let err = transport
            .post_json(&url, bytes::Bytes::from_static(b"{}"))
            .await
            .unwrap_err();
        match err {
            RelayError::Transport(message) => assert!(!message.contains("sekret")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
