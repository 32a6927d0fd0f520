use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use yansi::Paint;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::utils::{absolute_url, build_query_string};

static TRACE_REQUESTS: AtomicBool = AtomicBool::new(false);

/// Echo every request as a curl command plus the raw response body.
pub fn set_trace_requests(enabled: bool) {
    TRACE_REQUESTS.store(enabled, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if TRACE_REQUESTS.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Blocking-per-action client for the product database.
///
/// One request per call, no retries. The identifying `User-Agent` and the
/// timeout come from [`ApiConfig`].
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl OpenFoodFactsClient {
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `endpoint` with `params` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// `ApiError::Timeout` when nothing arrives within the configured timeout,
    /// `ApiError::Network` for transport failures, `ApiError::Status` for a
    /// non-success status and `ApiError::Decode` for a malformed body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = absolute_url(&self.config.base_url, endpoint);

        // --- Curl Logging ---
        let mut url_for_log = url.clone();
        if !params.is_empty() {
            url_for_log = format!("{}?{}", url_for_log, build_query_string(params));
        }
        let parts = [
            Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
            format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
            format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)),
            format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new(format!("'User-Agent: {}'", self.config.user_agent)).fg(yansi::Color::Magenta)
            ),
        ];
        log_output(format!("Request:\n{}", parts.join(" ")));
        tracing::debug!(url = %url_for_log, "GET");
        // --------------------

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log_output(format!(
                "Response:\n{}",
                Paint::new(format!("HTTP {}: {}", status, error_text)).fg(yansi::Color::Red)
            ));
            tracing::warn!(status = status.as_u16(), url = %url, "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.config.timeout))?;

        // Grayed out color (dimmed/dark gray)
        log_output(format!("Response:\n{}", Paint::new(&text).rgb(100, 100, 100)));
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "response received");

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
