use reqwest::Client;
use shared::protocol::{RunScriptResponse, SearchRequest, RUN_SCRIPT_PATH};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod form;

pub use form::{FormController, FormPhase, PendingSubmit, RequestId};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported scheme '{scheme}' in server url (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Url,
        source: reqwest::Error,
    },
    #[error("could not decode response from {endpoint} (status {status}): {source}")]
    Decode {
        endpoint: Url,
        status: u16,
        source: reqwest::Error,
    },
}

/// Talks to the script runner's single endpoint.
#[derive(Debug, Clone)]
pub struct ScriptClient {
    http: Client,
    endpoint: Url,
}

impl ScriptClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(server_url.trim()).map_err(|source| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedScheme {
                scheme: base.scheme().to_string(),
            });
        }
        // Keep any path prefix on the base when joining.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(RUN_SCRIPT_PATH.trim_start_matches('/'))
            .map_err(|source| ClientError::InvalidServerUrl {
                url: server_url.to_string(),
                source,
            })?;

        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one request and hands back the body untouched. The status code
    /// is not checked: the runner reports failures inside the JSON body.
    pub async fn run_script(
        &self,
        request: &SearchRequest,
    ) -> Result<RunScriptResponse, ClientError> {
        debug!(
            endpoint = %self.endpoint,
            option = request.option.as_arg(),
            exam_filter = %request.exam_filter,
            merge_pdfs = request.merge_pdfs,
            "dispatching run-script request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| {
                warn!(endpoint = %self.endpoint, error = %source, "run-script request failed");
                ClientError::Transport {
                    endpoint: self.endpoint.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "run-script answered with non-success status");
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| {
                warn!(endpoint = %self.endpoint, %status, error = %source, "undecodable run-script response");
                ClientError::Decode {
                    endpoint: self.endpoint.clone(),
                    status: status.as_u16(),
                    source,
                }
            })?;
        Ok(RunScriptResponse::from_json(&body))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
