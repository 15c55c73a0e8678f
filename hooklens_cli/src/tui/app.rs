//! Dashboard state and key handling

use crate::relay::UpdateStrategy;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hooklens_common::RequestRecord;

/// Side effects a key press asks the event loop to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Manual refresh, same cycle as any other trigger
    Refresh,
    /// Open the relay's own web UI in the browser
    OpenRelay,
}

/// Dashboard application state
pub struct DashApp {
    pub relay_url: String,
    /// None while the capability probe is still in flight
    pub strategy: Option<UpdateStrategy>,
    pub requests: Vec<RequestRecord>,
    pub selected: usize,
    /// Pretty-printed snapshot of the activated record. Deliberately not
    /// refreshed when the table is: it shows the record as it was activated.
    pub detail: Option<String>,
    pub should_quit: bool,
}

impl DashApp {
    pub fn new(relay_url: String) -> Self {
        Self {
            relay_url,
            strategy: None,
            requests: Vec::new(),
            selected: 0,
            detail: None,
            should_quit: false,
        }
    }

    /// Replace the whole table with a fresh listing, keeping the server's
    /// order. The cursor is clamped to the new length.
    pub fn set_requests(&mut self, requests: Vec<RequestRecord>) {
        self.requests = requests;
        self.selected = self.selected.min(self.requests.len().saturating_sub(1));
    }

    pub fn set_strategy(&mut self, strategy: UpdateStrategy) {
        self.strategy = Some(strategy);
    }

    /// Show the full record under the cursor in the detail pane
    pub fn activate_selected(&mut self) {
        if let Some(record) = self.requests.get(self.selected) {
            self.detail = Some(record.to_pretty_json());
        }
    }

    /// Handle key events; returns an action for the event loop to perform
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
                self.should_quit = true;
            }
            // Navigation
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                if self.selected < self.requests.len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            (KeyCode::PageUp, _) => {
                self.selected = self.selected.saturating_sub(10);
            }
            (KeyCode::PageDown, _) => {
                self.selected =
                    (self.selected + 10).min(self.requests.len().saturating_sub(1));
            }
            (KeyCode::Home, _) => {
                self.selected = 0;
            }
            (KeyCode::End, _) => {
                self.selected = self.requests.len().saturating_sub(1);
            }
            // Inspect the row under the cursor
            (KeyCode::Enter, _) => {
                self.activate_selected();
            }
            // Manual refresh
            (KeyCode::Char('r'), _) => {
                return Some(UiAction::Refresh);
            }
            // Open the relay web UI
            (KeyCode::Char('o'), _) => {
                return Some(UiAction::OpenRelay);
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> RequestRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "timestamp": "2026-08-06T10:00:00+00:00",
            "method": "POST",
            "path": "/hook"
        }))
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_activation_renders_full_record() {
        let mut app = DashApp::new("http://localhost:8080".to_string());
        let full: RequestRecord = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "timestamp": "T",
            "method": "POST",
            "path": "/hook",
            "extra": "X"
        }))
        .unwrap();
        app.set_requests(vec![full]);

        assert!(app.detail.is_none());
        app.handle_key(key(KeyCode::Enter));

        let detail = app.detail.as_deref().unwrap();
        // The detail pane carries fields the table never displays
        assert!(detail.contains("\"extra\": \"X\""));
        assert!(detail.contains("\"id\": \"r1\""));
    }

    #[test]
    fn test_detail_is_a_snapshot_across_refreshes() {
        let mut app = DashApp::new("http://localhost:8080".to_string());
        app.set_requests(vec![record("old")]);
        app.handle_key(key(KeyCode::Enter));
        app.set_requests(vec![record("new")]);

        assert!(app.detail.as_deref().unwrap().contains("\"id\": \"old\""));
    }

    #[test]
    fn test_refresh_replaces_table_and_clamps_cursor() {
        let mut app = DashApp::new("http://localhost:8080".to_string());
        app.set_requests(vec![record("a"), record("b"), record("c")]);
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.selected, 2);

        app.set_requests(vec![record("x")]);
        assert_eq!(app.requests.len(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = DashApp::new("http://localhost:8080".to_string());
        app.set_requests(vec![record("a"), record("b")]);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 1);

        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_action_keys() {
        let mut app = DashApp::new("http://localhost:8080".to_string());
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Some(UiAction::Refresh));
        assert_eq!(app.handle_key(key(KeyCode::Char('o'))), Some(UiAction::OpenRelay));

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
