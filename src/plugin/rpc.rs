//! JSON-RPC request handling
//!
//! The host launches the plugin once per query with the request as the first
//! argument and reads a single JSON response from stdout. Every failure is
//! reported inside the response envelope; nothing here panics or exits.

use crate::command::RollResolver;
use crate::core::config::Settings;
use crate::core::error::{Result, RollerError};
use crate::plugin::result::ResultItem;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Request sent by the host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub parameters: Vec<Value>,
    /// Settings object the host may embed; overrides the settings file
    #[serde(default, alias = "Settings")]
    pub settings: Option<Value>,
}

impl RpcRequest {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Raw query text for a `query` call (empty when absent)
    pub fn query_text(&self) -> Result<&str> {
        match self.parameters.first() {
            None | Some(Value::Null) => Ok(""),
            Some(Value::String(query)) => Ok(query.as_str()),
            Some(other) => Err(RollerError::InvalidRequest(format!(
                "query parameter must be a string, found {}",
                other
            ))),
        }
    }
}

/// Response written back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RpcResponse {
    Result { result: Vec<ResultItem> },
    Error { error: String },
}

impl RpcResponse {
    pub fn error(message: impl Into<String>) -> Self {
        RpcResponse::Error {
            error: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Dispatches host requests to the roll resolver
pub struct PluginHandler {
    settings: Settings,
}

impl PluginHandler {
    /// Create a handler whose fallback settings come from the settings file
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle the raw request text passed on the command line
    pub fn handle_raw<R: Rng + ?Sized>(&self, raw: &str, rng: &mut R) -> RpcResponse {
        match RpcRequest::parse(raw) {
            Ok(request) => self.handle(&request, rng),
            Err(e) => {
                tracing::warn!("Rejected malformed request: {}", e);
                RpcResponse::error(format!("Invalid JSON request: {}", e))
            }
        }
    }

    pub fn handle<R: Rng + ?Sized>(&self, request: &RpcRequest, rng: &mut R) -> RpcResponse {
        tracing::debug!(method = %request.method, "handling request");

        match request.method.as_str() {
            "query" => match self.query(request, rng) {
                Ok(result) => RpcResponse::Result { result },
                Err(e) => RpcResponse::error(e.to_string()),
            },
            other => RpcResponse::error(format!("Unknown method: {}", other)),
        }
    }

    fn query<R: Rng + ?Sized>(&self, request: &RpcRequest, rng: &mut R) -> Result<Vec<ResultItem>> {
        let query = request.query_text()?;
        let settings = self.effective_settings(request);
        let roll = RollResolver::new(&settings).resolve_query(query, rng);

        tracing::debug!(query, %roll, "resolved query");
        Ok(vec![ResultItem::from(&roll)])
    }

    /// Settings embedded in the request win over the file settings; an
    /// embedded object that fails to parse is ignored with a warning.
    fn effective_settings(&self, request: &RpcRequest) -> Cow<'_, Settings> {
        let Some(value) = request.settings.clone() else {
            return Cow::Borrowed(&self.settings);
        };

        match Settings::from_value(value) {
            Ok(settings) => {
                settings.warn_if_invalid();
                Cow::Owned(settings)
            }
            Err(e) => {
                tracing::warn!("Ignoring request settings: {}", e);
                Cow::Borrowed(&self.settings)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RollType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    fn handler() -> PluginHandler {
        PluginHandler::new(Settings::default())
    }

    #[test]
    fn test_query_parameter_kinds() {
        let request = RpcRequest::parse(r#"{"method": "query", "parameters": ["10 20"]}"#).unwrap();
        assert_eq!(request.query_text().unwrap(), "10 20");

        let request = RpcRequest::parse(r#"{"method": "query"}"#).unwrap();
        assert_eq!(request.query_text().unwrap(), "");

        let request = RpcRequest::parse(r#"{"method": "query", "parameters": [5]}"#).unwrap();
        assert!(request.query_text().is_err());
    }

    #[test]
    fn test_settings_alias() {
        let request =
            RpcRequest::parse(r#"{"method": "query", "Settings": {"yes_label": "Y"}}"#).unwrap();
        assert_eq!(request.settings, Some(json!({"yes_label": "Y"})));
    }

    #[test]
    fn test_non_string_query_is_error_envelope() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let response = handler().handle_raw(r#"{"method": "query", "parameters": [[1]]}"#, &mut rng);
        match response {
            RpcResponse::Error { error } => assert!(error.starts_with("Invalid request:")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_settings_precedence() {
        let handler = handler();

        let request = RpcRequest::default();
        assert_eq!(*handler.effective_settings(&request), Settings::default());

        let request = RpcRequest {
            settings: Some(json!({"Default Roll Type": "Yes/No"})),
            ..RpcRequest::default()
        };
        assert_eq!(handler.effective_settings(&request).roll_type, RollType::YesNo);

        let request = RpcRequest {
            settings: Some(json!({"default_to": "many"})),
            ..RpcRequest::default()
        };
        assert_eq!(*handler.effective_settings(&request), Settings::default());
    }

    #[test]
    fn test_error_response_json() {
        let json = RpcResponse::error("Unknown method: ping").to_json().unwrap();
        assert_eq!(json, r#"{"error":"Unknown method: ping"}"#);
    }
}
