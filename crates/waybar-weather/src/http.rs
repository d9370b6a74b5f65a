use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::WeatherError;

/// Blocking JSON GET client. The timeout covers the whole request, body
/// included; a timed-out call surfaces as `WeatherError::Transport`.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: Client,
}

impl QueryClient {
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| WeatherError::Transport(error.to_string()))?;

        Ok(Self { client })
    }

    /// One attempt, no retries.
    pub fn get_json<T, Q>(&self, endpoint: &str, query: &Q, context: &str) -> Result<T, WeatherError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(endpoint, context, "sending request");
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "received response");

        decode_body(status, &body, context)
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    context: &str,
) -> Result<T, WeatherError> {
    if status != StatusCode::OK {
        return Err(WeatherError::UpstreamStatus {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }

    serde_json::from_str(body).map_err(|error| WeatherError::Decode {
        context: context.to_string(),
        message: error.to_string(),
    })
}

// The request URL carries the API token, so it is stripped before the error
// leaves this module.
fn transport_error(error: reqwest::Error) -> WeatherError {
    let timed_out = error.is_timeout();
    let error = error.without_url();
    if timed_out {
        WeatherError::Transport(format!("request timed out: {error}"))
    } else {
        WeatherError::Transport(error.to_string())
    }
}
