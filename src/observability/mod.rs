use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::catalog::Endpoint;
use crate::protocol::gemini::GeminiUsageMetadata;

/// Initialize the tracing subscriber with the configured log level.
///
/// Maps config log levels to tracing levels:
/// - "DISABLED" -> no subscriber installed
/// - "WARNING" -> WARN
/// - "CRITICAL" -> ERROR
/// - Others map directly (DEBUG, INFO, ERROR)
pub fn init_tracing(log_level: &str) {
    let level = log_level.to_uppercase();

    if level == "DISABLED" {
        return;
    }

    let filter = EnvFilter::try_new(tracing_level(&level)).unwrap_or_else(|_| EnvFilter::new("INFO"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn tracing_level(level: &str) -> &str {
    match level {
        "WARNING" => "WARN",
        "CRITICAL" => "ERROR",
        other => other,
    }
}

/// Log model, endpoint, token usage and duration for a completed chat request.
pub fn log_request_complete(
    model: &str,
    endpoint: Endpoint,
    usage: Option<&GeminiUsageMetadata>,
    start_time: Instant,
) {
    let usage = usage.cloned().unwrap_or_default();
    info!(
        model = model,
        endpoint = endpoint.as_str(),
        input_tokens = usage.prompt_token_count.unwrap_or(0),
        output_tokens = usage.candidates_token_count.unwrap_or(0),
        total_tokens = usage.total_token_count.unwrap_or(0),
        duration_seconds = start_time.elapsed().as_secs_f64(),
        "request completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(tracing_level("WARNING"), "WARN");
        assert_eq!(tracing_level("CRITICAL"), "ERROR");
        assert_eq!(tracing_level("DEBUG"), "DEBUG");
    }
}
