//! Relay client and realtime update control

mod client;
mod controller;

pub use client::RelayClient;
pub use controller::{spawn_refresh, DashboardEvent, UpdateController, UpdateStrategy};
