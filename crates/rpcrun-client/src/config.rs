use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Where to send requests and how to authorize them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server address as `host[:port]`, without scheme
    pub endpoint_address: String,
    /// Authorization code sent with command requests
    pub authcode: Option<String>,
}

impl ClientConfig {
    pub fn new(endpoint_address: impl Into<String>) -> Self {
        Self {
            endpoint_address: endpoint_address.into(),
            authcode: None,
        }
    }

    pub fn with_authcode(mut self, authcode: impl Into<String>) -> Self {
        self.authcode = Some(authcode.into());
        self
    }

    /// Full URL for an endpoint path such as `/rpc`
    pub fn endpoint_url(&self, path: &str) -> Result<String> {
        let address = self.endpoint_address.trim();
        if address.is_empty() {
            return Err(Error::Validation("endpoint address is empty".to_string()));
        }
        Ok(format!("http://{address}{path}"))
    }
}
