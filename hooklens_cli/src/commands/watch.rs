//! The live dashboard command

use crate::relay::{spawn_refresh, DashboardEvent, RelayClient, UpdateController};
use crate::tui::{DashApp, UiAction};
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hooklens_common::RelayUrl;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Open the dashboard for the given relay and run until quit
pub async fn run(relay: &str) -> Result<()> {
    let url = RelayUrl::parse(relay)?;
    let client = RelayClient::new(url.clone());

    let (events_tx, events_rx) = mpsc::channel::<DashboardEvent>(100);

    // The controller does the initial load, probes capabilities and keeps
    // the table current; this task only renders and handles keys.
    let controller = UpdateController::new(client.clone(), events_tx.clone());
    let controller_task = tokio::spawn(controller.run());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashApp::new(url.to_string());
    let result = run_loop(&mut terminal, &mut app, &client, events_tx, events_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller_task.abort();
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashApp,
    client: &RelayClient,
    events_tx: mpsc::Sender<DashboardEvent>,
    mut events_rx: mpsc::Receiver<DashboardEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| crate::tui::draw(f, app))?;

        tokio::select! {
            // Handle keyboard events (non-blocking)
            _ = tick_interval.tick() => {
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        match app.handle_key(key) {
                            Some(UiAction::Refresh) => {
                                spawn_refresh(client, &events_tx);
                            }
                            Some(UiAction::OpenRelay) => {
                                if let Err(e) = open::that(app.relay_url.clone()) {
                                    tracing::warn!("Could not open browser: {}", e);
                                }
                            }
                            None => {}
                        }
                        if app.should_quit {
                            return Ok(());
                        }
                    }
                }
            }

            // Handle controller updates
            Some(event) = events_rx.recv() => {
                match event {
                    DashboardEvent::Requests(records) => app.set_requests(records),
                    DashboardEvent::Strategy(strategy) => app.set_strategy(strategy),
                }
            }
        }
    }
}
