//! Shared request plumbing for the HTTP providers.

use folio_core::ModelConfig;
use folio_error::{ModelsError, ModelsErrorKind, ModelsResult};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Build a reqwest client honouring the configured timeout.
pub(crate) fn build_client(config: &ModelConfig) -> ModelsResult<Client> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| ModelsError::new(ModelsErrorKind::ClientBuild(e.to_string())))
}

fn transport_error(provider: &str, e: reqwest::Error) -> ModelsError {
    error!(provider, error = ?e, "Failed to send request");
    if e.is_timeout() {
        ModelsError::new(ModelsErrorKind::Timeout(e.to_string()))
    } else {
        ModelsError::new(ModelsErrorKind::Request(e.to_string()))
    }
}

/// Send a prepared request and decode a JSON body.
///
/// Non-success statuses become [`ModelsErrorKind::ApiError`] carrying the
/// response body so retry classification can see the status code.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> ModelsResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(provider, status = %status, body = %body, "Provider returned error");
        return Err(ModelsError::new(ModelsErrorKind::ApiError {
            status: status.as_u16(),
            message: body,
        }));
    }

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(provider, e))?;
    debug!(provider, bytes = body.len(), "Received response");

    serde_json::from_str(&body).map_err(|e| {
        error!(provider, error = %e, "Failed to parse provider response");
        ModelsError::new(ModelsErrorKind::ResponseParse(e.to_string()))
    })
}
