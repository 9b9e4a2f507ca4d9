use thiserror::Error;

mod client;
mod config;
pub mod last_used;
pub mod transport;

pub use client::{interpret_response, Client};
pub use config::ClientConfig;
pub use last_used::LastUsed;
pub use transport::{HttpTransport, Transport, TransportResponse};

#[derive(Debug, Error)]
pub enum Error {
    /// Caller input was rejected before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),
    /// Server answered with a non-2xx status
    #[error("HTTP error: {status} - {status_text}")]
    Transport { status: u16, status_text: String },
    /// Server answered with an `error` payload
    #[error("RPC error: {0}")]
    Remote(String),
    /// The request never completed (connect, send or body read failed)
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Run `command` on the server at `endpoint_address` using a fresh HTTP client
pub async fn invoke_command(
    command: &str,
    endpoint_address: &str,
    authcode: Option<&str>,
) -> Result<String> {
    let mut config = ClientConfig::new(endpoint_address);
    config.authcode = authcode.map(str::to_string);
    Client::new(config).invoke_command(command).await
}

/// Run a named shortcode on the server at `endpoint_address`
pub async fn invoke_code(code: &str, endpoint_address: &str) -> Result<String> {
    Client::new(ClientConfig::new(endpoint_address))
        .invoke_code(code)
        .await
}
