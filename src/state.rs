mod request_id;

use crate::config::AppConfig;
use crate::error::RelayError;
use crate::transport::HttpTransport;

use request_id::RequestIdGenerator;

/// Shared application state accessible to all handlers. Immutable after startup.
pub struct AppState {
    pub config: AppConfig,
    pub transport: HttpTransport,
    api_key: Option<String>,
    request_ids: RequestIdGenerator,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, transport: HttpTransport, api_key: Option<String>) -> Self {
        Self {
            config,
            transport,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            request_ids: RequestIdGenerator::new(),
        }
    }

    /// Build state from config, reading the API key from the environment.
    #[must_use]
    pub fn from_config(config: AppConfig) -> Self {
        let transport = HttpTransport::new(&config.server);
        let api_key = config.gemini.resolve_api_key();
        Self::new(config, transport, api_key)
    }

    /// The provider API key.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] when no key is configured.
    pub fn api_key(&self) -> Result<&str, RelayError> {
        self.api_key.as_deref().ok_or_else(|| {
            RelayError::Config(format!(
                "Gemini API key is not configured (set {})",
                self.config.gemini.api_key_env
            ))
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn next_request_id(&self) -> uuid::Uuid {
        self.request_ids.next_uuid()
    }
}
