//! HTTP client for the proxy's `set_licensing_info` endpoint.

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use super::LicensingDispatcher;
use crate::config::LicensingConfig;
use crate::error::DispatchError;
use crate::licensing::LicensingChoice;

/// Result of one background dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub payload: LicensingChoice,
    /// The proxy's JSON reply (its new status), or why the request failed.
    pub result: Result<serde_json::Value, DispatchError>,
}

/// Sends licensing payloads with a `PUT` to `<base_url>/set_licensing_info`.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    endpoint: String,
    runtime: Handle,
    outcomes: Option<UnboundedSender<DispatchOutcome>>,
}

impl HttpDispatcher {
    /// `runtime` runs the requests spawned by `fetch_set_licensing`.
    pub fn new(config: &LicensingConfig, runtime: Handle) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DispatchError::Client {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: config.set_licensing_url(),
            runtime,
            outcomes: None,
        })
    }

    /// Reports every background dispatch result on `sender`.
    pub fn with_outcomes(mut self, sender: UnboundedSender<DispatchOutcome>) -> Self {
        self.outcomes = Some(sender);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `payload` and returns the proxy's JSON reply.
    pub async fn set_licensing_info(&self, payload: &LicensingChoice) -> Result<serde_json::Value, DispatchError> {
        let response = self
            .client
            .put(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("set_licensing_info failed: {status}");
            return Err(DispatchError::Http {
                status_code: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout
            } else {
                DispatchError::InvalidResponse {
                    message: e.to_string(),
                }
            }
        })
    }
}

fn classify(e: reqwest::Error) -> DispatchError {
    if e.is_timeout() {
        DispatchError::Timeout
    } else {
        DispatchError::Connection {
            message: e.to_string(),
        }
    }
}

impl LicensingDispatcher for HttpDispatcher {
    fn fetch_set_licensing(&self, payload: LicensingChoice) {
        let dispatcher = self.clone();
        self.runtime.spawn(async move {
            log::info!("Sending {:?} licensing to {}", payload.kind(), dispatcher.endpoint);
            let result = dispatcher.set_licensing_info(&payload).await;
            if let Err(e) = &result {
                log::warn!("Licensing dispatch failed: {e}");
            }
            if let Some(outcomes) = &dispatcher.outcomes {
                // Receiver gone means nobody is listening any more
                let _ = outcomes.send(DispatchOutcome { payload, result });
            }
        });
    }
}
