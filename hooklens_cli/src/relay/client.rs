//! HTTP client for the relay's inspection endpoints

use anyhow::{Context, Result};
use hooklens_common::{Capabilities, DeleteAck, RelayUrl, ReplayOutcome, RequestRecord};
use reqwest::Client;

/// Client for the `/_relay/*` endpoints of a running relay
#[derive(Clone)]
pub struct RelayClient {
    url: RelayUrl,
    client: Client,
}

impl RelayClient {
    /// Create a client for the given relay.
    ///
    /// No request timeout is configured: a hung relay leaves the call
    /// pending and the affected refresh cycle simply never happens.
    pub fn new(url: RelayUrl) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }

    /// The relay this client talks to
    pub fn url(&self) -> &RelayUrl {
        &self.url
    }

    /// Probe which realtime mechanisms the relay supports
    pub async fn capabilities(&self) -> Result<Capabilities> {
        let response = self
            .client
            .get(self.url.capabilities_url())
            .send()
            .await
            .context("Capability probe failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Capability probe answered {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse capabilities")
    }

    /// Fetch all captured requests, in the order the relay returns them
    pub async fn list_requests(&self) -> Result<Vec<RequestRecord>> {
        let response = self
            .client
            .get(self.url.requests_url())
            .send()
            .await
            .context("Failed to list relay requests")?;

        if !response.status().is_success() {
            anyhow::bail!("Relay answered {} to request listing", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse request listing")
    }

    /// Fetch a single captured request by ID
    pub async fn get_request(&self, id: &str) -> Result<RequestRecord> {
        let response = self
            .client
            .get(self.url.request_url(id))
            .send()
            .await
            .with_context(|| format!("Failed to fetch request {}", id))?;

        if !response.status().is_success() {
            anyhow::bail!("Relay answered {} for request {}", response.status(), id);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse request {}", id))
    }

    /// Delete a stored request
    pub async fn delete_request(&self, id: &str) -> Result<DeleteAck> {
        let response = self
            .client
            .delete(self.url.request_url(id))
            .send()
            .await
            .with_context(|| format!("Failed to delete request {}", id))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Relay answered {} when deleting request {}",
                response.status(),
                id
            );
        }

        response.json().await.context("Failed to parse delete ack")
    }

    /// Ask the relay to replay a stored request to its forward target
    pub async fn replay(&self, id: &str) -> Result<ReplayOutcome> {
        let response = self
            .client
            .post(self.url.replay_url(id))
            .send()
            .await
            .with_context(|| format!("Failed to replay request {}", id))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Relay answered {} when replaying request {}",
                response.status(),
                id
            );
        }

        response
            .json()
            .await
            .context("Failed to parse replay outcome")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(id: &str, req_path: &str) -> serde_json::Value {
        json!({
            "id": id,
            "timestamp": "2026-08-06T10:00:00+00:00",
            "method": "POST",
            "path": req_path,
            "headers": {},
            "body": "",
            "query_params": {},
            "forwarded_status": null,
            "signature_valid": null
        })
    }

    async fn client_for(server: &MockServer) -> RelayClient {
        RelayClient::new(RelayUrl::parse(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_list_requests_preserves_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_relay/requests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                record("b", "/second"),
                record("a", "/first"),
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let records = client.list_requests().await.unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_get_request_unknown_id_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_relay/requests/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_request("nope").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_capabilities_non_success_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_relay/capabilities"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.capabilities().await.is_err());
    }

    #[tokio::test]
    async fn test_replay_reports_refusal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_relay/replay/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "replayed": false,
                "reason": "No forward URL configured."
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let outcome = client.replay("r1").await.unwrap();
        assert!(!outcome.replayed);
        assert_eq!(outcome.reason.as_deref(), Some("No forward URL configured."));
    }

    #[tokio::test]
    async fn test_delete_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/_relay/requests/r1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"deleted": true, "id": "r1"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ack = client.delete_request("r1").await.unwrap();
        assert!(ack.deleted);
        assert_eq!(ack.id, "r1");
    }
}
