use anyhow::Result;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use thiserror::Error;

use crate::constants::{ACCEPT_GEO_JSON, NWS_API_BASE, REQUEST_TIMEOUT, USER_AGENT};

/// Settings for the outbound NWS client
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept: ACCEPT_GEO_JSON.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: status {0}")]
    Status(StatusCode),
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid JSON body: {0}")]
    Decode(reqwest::Error),
}

/// Single outbound HTTP path to the weather API.
///
/// Every failure is logged and reported to callers as `None`.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Arc<Client>,
    config: Arc<GatewayConfig>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Fetches `url` and returns the decoded JSON body, or `None` on any failure
    pub async fn fetch(&self, url: &str) -> Option<Value> {
        match self.try_fetch(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                match &e {
                    GatewayError::Status(_) => tracing::warn!(url, "{}", e),
                    GatewayError::Transport(inner) if inner.is_timeout() => {
                        tracing::warn!(url, "Request timed out: {}", inner)
                    }
                    GatewayError::Transport(_) => tracing::warn!(url, "{}", e),
                    GatewayError::Decode(_) => tracing::warn!(url, "Unexpected error: {}", e),
                }
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Value, GatewayError> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, self.config.accept.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::Decode(e)
            } else {
                GatewayError::Transport(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn gateway_for(server: &MockServer, timeout: Duration) -> Gateway {
        Gateway::new(GatewayConfig {
            base_url: server.uri(),
            timeout,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn returns_json_and_sends_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("user-agent", "weather-app/1.0"))
            .and(header("accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, REQUEST_TIMEOUT).await;
        let value = gateway.fetch(&format!("{}/ping", gateway.base_url())).await;

        assert_eq!(value, Some(json!({ "ok": true })));
    }

    #[tokio::test]
    async fn non_success_status_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "title": "down" })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, REQUEST_TIMEOUT).await;
        assert!(gateway.fetch(&format!("{}/x", server.uri())).await.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, REQUEST_TIMEOUT).await;
        let url = format!("{}/x", server.uri());
        assert!(matches!(
            gateway.try_fetch(&url).await,
            Err(GatewayError::Decode(_))
        ));
        assert!(gateway.fetch(&url).await.is_none());
    }

    #[tokio::test]
    async fn slow_response_times_out_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let gateway = gateway_for(&server, Duration::from_millis(100)).await;
        assert!(gateway.fetch(&format!("{}/slow", server.uri())).await.is_none());
    }

    #[tokio::test]
    async fn connection_failure_is_absent() {
        let gateway = Gateway::new(GatewayConfig {
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        // Port 9 on loopback has no listener.
        assert!(gateway.fetch("http://127.0.0.1:9/alerts").await.is_none());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let gateway = Gateway::new(GatewayConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }
}
