use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{CycleError, RequestContext};
use crate::models::Checkpoint;
use crate::providers::HomeworkSource;

/// Client for the homework status endpoint of the grading service.
pub struct Practicum {
    token: String,
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl Practicum {
    pub fn new(token: &str, endpoint: &str, timeout: Duration) -> Self {
        Practicum {
            token: token.to_string(),
            endpoint: endpoint.to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.practicum_token,
            &config.endpoint,
            config.request_timeout,
        )
    }

    fn context(&self, checkpoint: Checkpoint) -> RequestContext {
        RequestContext {
            endpoint: self.endpoint.clone(),
            from_date: checkpoint.as_secs(),
            timeout: self.timeout,
        }
    }
}

#[async_trait]
impl HomeworkSource for Practicum {
    async fn fetch(&self, checkpoint: Checkpoint) -> Result<Value, CycleError> {
        let context = self.context(checkpoint);
        let network_failure = |e: reqwest::Error| CycleError::NetworkFailure {
            reason: e.to_string(),
            context: context.clone(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("OAuth {}", self.token)).map_err(|_| {
                CycleError::NetworkFailure {
                    reason: "token is not a valid header value".to_string(),
                    context: context.clone(),
                }
            })?,
        );

        debug!("Making request to: {} (from_date={})", self.endpoint, context.from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .headers(headers)
            .query(&[("from_date", context.from_date)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(network_failure)?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(network_failure)?;
        interpret_response(status, &body, &context)
    }
}

/// Classifies what came back from the grading service.
pub fn interpret_response(
    status: StatusCode,
    body: &str,
    context: &RequestContext,
) -> Result<Value, CycleError> {
    if !status.is_success() {
        debug!("Error response body: {}", body);
        return Err(CycleError::ServerFailure {
            status: status.as_u16(),
            context: context.clone(),
        });
    }

    let answer: Value = serde_json::from_str(body).map_err(|e| CycleError::NetworkFailure {
        reason: format!("malformed response body: {}", e),
        context: context.clone(),
    })?;

    if let Some(object) = answer.as_object() {
        if object.contains_key("code") || object.contains_key("error") {
            let code = object.get("code").map(describe).unwrap_or_default();
            let message = object
                .get("message")
                .or_else(|| object.get("error"))
                .map(describe)
                .unwrap_or_default();
            return Err(CycleError::ServiceRejection {
                code,
                message,
                context: context.clone(),
            });
        }
    }

    Ok(answer)
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
