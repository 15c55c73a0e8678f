//! Realtime update strategy for the dashboard
//!
//! On startup the controller probes the relay's capabilities. If the relay
//! advertises WebSocket push it opens the push channel and refetches the
//! request list on every notification; otherwise it polls on a fixed timer.
//! The fallback is one-way: once the channel errors or closes, polling takes
//! over for the rest of the session and the channel is never reopened.

use crate::relay::RelayClient;
use futures_util::StreamExt;
use hooklens_common::RequestRecord;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Polling cadence when no push channel is available
const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// How the dashboard learns that new data may exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Listening on the relay's WebSocket channel
    Push,
    /// Refetching on a fixed timer
    Polling,
}

/// Messages consumed by the render loop
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Replace the whole table with these records (server order)
    Requests(Vec<RequestRecord>),

    /// The update strategy was decided, or changed by the fallback
    Strategy(UpdateStrategy),
}

/// Fetch the request list once, in the background, and hand the result to
/// the render loop. Also used by the manual refresh key and the initial
/// load; failures are logged and otherwise dropped, so the table keeps its
/// previous contents for that cycle.
pub fn spawn_refresh(client: &RelayClient, events: &mpsc::Sender<DashboardEvent>) {
    let client = client.clone();
    let events = events.clone();
    tokio::spawn(async move {
        fetch_and_render(&client, &events).await;
    });
}

async fn fetch_and_render(client: &RelayClient, events: &mpsc::Sender<DashboardEvent>) {
    match client.list_requests().await {
        Ok(records) => {
            let _ = events.send(DashboardEvent::Requests(records)).await;
        }
        Err(e) => tracing::warn!("Refresh failed: {:#}", e),
    }
}

/// Decides and executes how the dashboard stays current.
///
/// Owns whichever of the push channel or the polling timer is active; the
/// timer handle doubles as the idempotency guard for starting the polling
/// loop.
pub struct UpdateController {
    client: RelayClient,
    events: mpsc::Sender<DashboardEvent>,
    poll_task: Option<JoinHandle<()>>,
}

impl UpdateController {
    pub fn new(client: RelayClient, events: mpsc::Sender<DashboardEvent>) -> Self {
        Self {
            client,
            events,
            poll_task: None,
        }
    }

    /// Run until the dashboard closes.
    ///
    /// The initial fetch is issued before the probe resolves, so the table
    /// populates even while the strategy decision is still in flight.
    pub async fn run(mut self) {
        spawn_refresh(&self.client, &self.events);

        let push_available = match self.client.capabilities().await {
            Ok(caps) => caps.websocket,
            Err(e) => {
                tracing::debug!("Capability probe failed: {:#}", e);
                false
            }
        };

        if push_available {
            // Returns when the channel errors or closes
            self.listen_push().await;
        }

        let _ = self
            .events
            .send(DashboardEvent::Strategy(UpdateStrategy::Polling))
            .await;
        self.start_polling();

        // The session ends by tearing this task down, never by the timer.
        if let Some(task) = self.poll_task.take() {
            let _ = task.await;
        }
    }

    /// Listen on the relay's push channel, refreshing on every message.
    ///
    /// The payload is not inspected: a message only means "refetch now". A
    /// failed connection attempt counts as a channel error and falls through
    /// to polling.
    async fn listen_push(&self) {
        let ws_url = self.client.url().ws_url();
        let mut channel = match connect_async(&ws_url).await {
            Ok((channel, _)) => channel,
            Err(e) => {
                tracing::debug!("Push channel connect failed: {}", e);
                return;
            }
        };

        let _ = self
            .events
            .send(DashboardEvent::Strategy(UpdateStrategy::Push))
            .await;

        while let Some(msg) = channel.next().await {
            match msg {
                Ok(Message::Text(_)) | Ok(Message::Binary(_)) => {
                    spawn_refresh(&self.client, &self.events);
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {} // ping/pong
                Err(e) => {
                    tracing::debug!("Push channel error: {}", e);
                    break;
                }
            }
        }
    }

    /// Start the polling loop. Safe to call more than once: the stored task
    /// handle is the guard, so a second call changes nothing.
    ///
    /// Ticks spawn their fetches instead of awaiting them, so a slow relay
    /// cannot delay the cadence; overlapping fetches resolve last-render-wins.
    pub fn start_polling(&mut self) -> bool {
        if self.poll_task.is_some() {
            return false;
        }

        let client = self.client.clone();
        let events = self.events.clone();
        self.poll_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            // the zeroth tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                spawn_refresh(&client, &events);
            }
        }));
        true
    }
}
