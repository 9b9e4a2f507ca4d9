use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version string sent with every command request
pub const JSONRPC_VERSION: &str = "2.0";

/// Remote procedure that runs a shell command on the server
pub const RUN_COMMAND_METHOD: &str = "Call.RpcRunCommand";

/// Path of the JSON-RPC command endpoint
pub const RPC_PATH: &str = "/rpc";

/// Path of the shortcode endpoint
pub const CODE_PATH: &str = "/code";

/// Request body posted to [`RPC_PATH`].
///
/// `params` is positional: the command text is always the first element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub jsonrpc: String,
    pub id: i64,
    pub method: String,
    pub params: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authcode: Option<String>,
}

impl CommandRequest {
    /// Build a run-command request.
    ///
    /// With an authcode the request carries `params: [command]` plus the
    /// `authcode` field. Without one it falls back to the older shape,
    /// `params: [command, ""]` and no `authcode` key.
    pub fn run_command(id: i64, command: &str, authcode: Option<&str>) -> Self {
        let params = match authcode {
            Some(_) => vec![command.to_string()],
            None => vec![command.to_string(), String::new()],
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: RUN_COMMAND_METHOD.to_string(),
            params,
            authcode: authcode.map(str::to_string),
        }
    }

    /// The command text, i.e. the first positional parameter
    pub fn command(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// Request body posted to [`CODE_PATH`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRequest {
    pub shortcode: String,
}

/// Response body returned by both endpoints.
///
/// Only one of the two fields is meaningful. A present `error` always wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// What a parsed response means to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Successful result rendered as text
    Result(String),
    /// Remote failure payload
    Error(Value),
    /// Neither field carried a value
    Empty,
}

impl CommandResponse {
    /// Parse a response body. Anything other than a JSON object is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let Value::Object(mut fields) = serde_json::from_str::<Value>(text).ok()? else {
            return None;
        };
        Some(Self {
            result: fields.remove("result"),
            error: fields.remove("error"),
        })
    }

    pub fn outcome(&self) -> Outcome {
        if let Some(error) = self.error.as_ref().filter(|e| !e.is_null()) {
            return Outcome::Error(error.clone());
        }
        match &self.result {
            Some(Value::String(text)) => Outcome::Result(text.clone()),
            Some(Value::Null) | None => Outcome::Empty,
            Some(other) => Outcome::Result(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_command_with_authcode() {
        let request = CommandRequest::run_command(42, "uptime", Some("secret"));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 42,
                "method": "Call.RpcRunCommand",
                "params": ["uptime"],
                "authcode": "secret",
            })
        );
    }

    #[test]
    fn test_run_command_without_authcode() {
        let request = CommandRequest::run_command(7, "ls -la", None);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["params"], json!(["ls -la", ""]));
        assert!(value.get("authcode").is_none());
    }

    #[test]
    fn test_params_order_survives_reparse() {
        let request = CommandRequest::run_command(1, "df -h", None);
        let text = serde_json::to_string(&request).unwrap();
        let parsed: CommandRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.command(), Some("df -h"));
        assert_eq!(parsed.params, vec!["df -h".to_string(), String::new()]);
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_code_request_shape() {
        let text = serde_json::to_string(&CodeRequest {
            shortcode: "restart".to_string(),
        })
        .unwrap();
        assert_eq!(text, r#"{"shortcode":"restart"}"#);
    }

    #[test]
    fn test_error_takes_precedence() {
        let response: CommandResponse =
            serde_json::from_str(r#"{"result":"ok","error":{"code":-1}}"#).unwrap();
        assert_eq!(response.outcome(), Outcome::Error(json!({"code": -1})));
    }

    #[test]
    fn test_null_error_is_ignored() {
        let response: CommandResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"done","error":null}"#)
                .unwrap();
        assert_eq!(response.outcome(), Outcome::Result("done".to_string()));
    }

    #[test]
    fn test_non_string_result_is_rendered_as_json() {
        let response: CommandResponse = serde_json::from_str(r#"{"result":{"n":3}}"#).unwrap();
        assert_eq!(response.outcome(), Outcome::Result(r#"{"n":3}"#.to_string()));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert_eq!(CommandResponse::parse(r#"["a","b"]"#), None);
        assert_eq!(CommandResponse::parse(r#""text""#), None);
        assert_eq!(CommandResponse::parse("12"), None);
        assert_eq!(CommandResponse::parse("plain"), None);
    }

    #[test]
    fn test_parse_object() {
        let response = CommandResponse::parse(r#"{"id":3,"result":"ok","error":null}"#).unwrap();
        assert_eq!(response.outcome(), Outcome::Result("ok".to_string()));
    }

    #[test]
    fn test_empty_response() {
        let response: CommandResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.outcome(), Outcome::Empty);
    }
}
