//! Hooklens Common - Shared wire types for the webhook relay dashboard
//!
//! This crate contains the JSON shapes the relay serves on its `/_relay/*`
//! endpoints, plus URL helpers used by the CLI and its tests.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from parsing a relay base URL
#[derive(Debug, Error)]
pub enum RelayUrlError {
    #[error("Relay URL is empty")]
    Empty,

    #[error("Unsupported relay URL scheme in {0:?} (expected http:// or https://)")]
    UnsupportedScheme(String),
}

/// One webhook delivery captured by the relay.
///
/// The relay owns these records; the dashboard only holds a read-only copy
/// for rendering. Only `id`, `method`, `path` and `timestamp` are required -
/// everything else the server sends is kept (via the flattened map if it is
/// a field this client does not know about) so the detail view can show the
/// record verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: String,

    /// ISO-8601 timestamp, kept as the server sent it
    pub timestamp: String,

    pub method: String,

    pub path: String,

    #[serde(default)]
    pub headers: Map<String, Value>,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub query_params: Map<String, Value>,

    /// Status the relay got when forwarding this delivery, if it forwarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded_status: Option<u16>,

    /// Result of webhook signature validation, if the relay checked one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_valid: Option<bool>,

    /// Any server-side fields this client version does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestRecord {
    /// Short clock label for table rows, e.g. "14:03:59"
    pub fn time_label(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.timestamp) {
            Ok(ts) => ts.format("%H:%M:%S").to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }

    /// The full record as pretty-printed JSON for the detail pane
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| format!("{} {}", self.method, self.path))
    }
}

/// Realtime mechanisms the relay supports, probed once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub websocket: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body of `DELETE /_relay/requests/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    pub deleted: bool,
    pub id: String,
}

/// Response body of `POST /_relay/replay/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub replayed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ReplayOutcome {
    /// Human-readable one-liner for command output
    pub fn describe(&self) -> String {
        match (self.replayed, self.status_code, self.reason.as_deref()) {
            (true, Some(status), _) => format!("Replayed, upstream answered {}", status),
            (true, None, _) => "Replayed".to_string(),
            (false, _, Some(reason)) => format!("Not replayed: {}", reason),
            (false, _, None) => "Not replayed".to_string(),
        }
    }
}

/// Normalized base URL of a relay, e.g. `http://127.0.0.1:8080`
///
/// Derives the endpoint URLs and the WebSocket URL (`http` maps to `ws`,
/// `https` to `wss`, matching the scheme rule the relay's own web UI uses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayUrl {
    base: String,
}

impl RelayUrl {
    pub fn parse(input: &str) -> Result<Self, RelayUrlError> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(RelayUrlError::Empty);
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(RelayUrlError::UnsupportedScheme(input.to_string()));
        }
        Ok(Self {
            base: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn requests_url(&self) -> String {
        format!("{}{}", self.base, constants::REQUESTS_PATH)
    }

    pub fn request_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base, constants::REQUESTS_PATH, id)
    }

    pub fn replay_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base, constants::REPLAY_PATH, id)
    }

    pub fn capabilities_url(&self) -> String {
        format!("{}{}", self.base, constants::CAPABILITIES_PATH)
    }

    /// WebSocket URL for the push channel
    pub fn ws_url(&self) -> String {
        let ws_scheme = if self.base.starts_with("https://") {
            "wss"
        } else {
            "ws"
        };
        let host = self
            .base
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("{}://{}{}", ws_scheme, host, constants::WS_PATH)
    }
}

impl std::fmt::Display for RelayUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}

/// Relay endpoint paths
pub mod constants {
    /// List of captured requests (GET), single record at `/{id}` (GET/DELETE)
    pub const REQUESTS_PATH: &str = "/_relay/requests";

    /// Replay a stored request to the relay's forward target (POST `/{id}`)
    pub const REPLAY_PATH: &str = "/_relay/replay";

    /// Capability probe (GET)
    pub const CAPABILITIES_PATH: &str = "/_relay/capabilities";

    /// Push-notification channel (WebSocket upgrade)
    pub const WS_PATH: &str = "/_relay/ws";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip_keeps_unknown_fields() {
        let raw = r#"{
            "id": "abc123",
            "timestamp": "2026-08-06T14:03:59+00:00",
            "method": "POST",
            "path": "/hook",
            "headers": {"content-type": "application/json"},
            "body": "{\"event\":\"push\"}",
            "query_params": {},
            "forwarded_status": 200,
            "signature_valid": true,
            "delivery_attempt": 3
        }"#;

        let record: RequestRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, "abc123");
        assert_eq!(record.forwarded_status, Some(200));
        assert_eq!(record.extra["delivery_attempt"], 3);

        let pretty = record.to_pretty_json();
        assert!(pretty.contains("\"delivery_attempt\": 3"));
        assert!(pretty.contains("\"signature_valid\": true"));
    }

    #[test]
    fn test_minimal_record_parses() {
        let raw = r#"{"id":"r1","timestamp":"T","method":"GET","path":"/"}"#;
        let record: RequestRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.body, "");
        assert!(record.headers.is_empty());
        assert_eq!(record.forwarded_status, None);
        // An unparseable timestamp falls back to the raw string
        assert_eq!(record.time_label(), "T");
    }

    #[test]
    fn test_time_label_formats_rfc3339() {
        let record = RequestRecord {
            id: "r1".to_string(),
            timestamp: "2026-08-06T14:03:59.123456+00:00".to_string(),
            method: "GET".to_string(),
            path: "/".to_string(),
            headers: Map::new(),
            body: String::new(),
            query_params: Map::new(),
            forwarded_status: None,
            signature_valid: None,
            extra: Map::new(),
        };
        assert_eq!(record.time_label(), "14:03:59");
    }

    #[test]
    fn test_capabilities_tolerates_extra_keys() {
        let caps: Capabilities =
            serde_json::from_str(r#"{"websocket": true, "sse": false}"#).unwrap();
        assert!(caps.websocket);

        let caps: Capabilities = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!caps.websocket);
    }

    #[test]
    fn test_relay_url_scheme_mapping() {
        let url = RelayUrl::parse("http://localhost:8080/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080");
        assert_eq!(url.ws_url(), "ws://localhost:8080/_relay/ws");
        assert_eq!(url.requests_url(), "http://localhost:8080/_relay/requests");
        assert_eq!(
            url.request_url("abc"),
            "http://localhost:8080/_relay/requests/abc"
        );

        let url = RelayUrl::parse("https://hooks.example.com").unwrap();
        assert_eq!(url.ws_url(), "wss://hooks.example.com/_relay/ws");
    }

    #[test]
    fn test_relay_url_rejects_bad_input() {
        assert!(matches!(RelayUrl::parse("  "), Err(RelayUrlError::Empty)));
        assert!(matches!(
            RelayUrl::parse("ftp://example.com"),
            Err(RelayUrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_replay_outcome_describe() {
        let ok: ReplayOutcome =
            serde_json::from_str(r#"{"replayed": true, "status_code": 204}"#).unwrap();
        assert_eq!(ok.describe(), "Replayed, upstream answered 204");

        let refused: ReplayOutcome =
            serde_json::from_str(r#"{"replayed": false, "reason": "No forward URL configured."}"#)
                .unwrap();
        assert_eq!(
            refused.describe(),
            "Not replayed: No forward URL configured."
        );
    }
}
