use chrono::Utc;
use rpcrun_protocol::{CODE_PATH, CodeRequest, CommandRequest, CommandResponse, Outcome, RPC_PATH};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::transport::{HttpTransport, Transport, TransportResponse};
use crate::{Error, Result};

/// Client for one rpcrun server.
///
/// Every call is a single independent POST. Nothing is shared between
/// calls beyond the configuration, so concurrent calls cannot observe
/// each other's responses.
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a shell command through `Call.RpcRunCommand`.
    ///
    /// The command is trimmed; an empty command is rejected without
    /// touching the network.
    pub async fn invoke_command(&self, command: &str) -> Result<String> {
        let command = command.trim();
        if command.is_empty() {
            return Err(Error::Validation("command is empty".to_string()));
        }
        let url = self.config.endpoint_url(RPC_PATH)?;

        let request = CommandRequest::run_command(
            Utc::now().timestamp_millis(),
            command,
            self.config.authcode.as_deref(),
        );
        let body = serde_json::to_string(&request)?;
        debug!(id = request.id, params = ?request.params, "sending RPC request");

        self.exchange(&url, body).await
    }

    /// Run a shortcode configured on the server
    pub async fn invoke_code(&self, code: &str) -> Result<String> {
        if code.is_empty() {
            return Err(Error::Validation("code is empty".to_string()));
        }
        let url = self.config.endpoint_url(CODE_PATH)?;

        let body = serde_json::to_string(&CodeRequest {
            shortcode: code.to_string(),
        })?;
        debug!(body = %body, "sending code request");

        self.exchange(&url, body).await
    }

    async fn exchange(&self, url: &str, body: String) -> Result<String> {
        let response = self.transport.post_json(url, body).await?;
        debug!(status = response.status, body = %response.body, "raw response");

        let output = interpret_response(response)?;
        info!(url = %url, bytes = output.len(), "call completed");
        Ok(output)
    }
}

/// Turn a raw response into the caller-visible result.
///
/// A non-2xx status fails before the body is looked at. A body that is not
/// a `{result}`/`{error}` object is returned verbatim instead of failing.
pub fn interpret_response(response: TransportResponse) -> Result<String> {
    if !response.is_success() {
        return Err(Error::Transport {
            status: response.status,
            status_text: response.status_text,
        });
    }

    let Some(parsed) = CommandResponse::parse(&response.body) else {
        warn!("Response is not a JSON object, returning raw text");
        return Ok(response.body);
    };

    match parsed.outcome() {
        Outcome::Error(error) => Err(Error::Remote(error.to_string())),
        Outcome::Result(text) => Ok(text),
        Outcome::Empty => {
            warn!("Response has neither result nor error, returning raw text");
            Ok(response.body)
        }
    }
}
