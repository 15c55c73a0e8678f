//! One-shot request inspection commands (ls, show, delete, replay)

use crate::relay::RelayClient;
use anyhow::Result;
use console::style;
use hooklens_common::RelayUrl;

fn client_for(relay: &str) -> Result<RelayClient> {
    Ok(RelayClient::new(RelayUrl::parse(relay)?))
}

/// Print the current request table once
pub async fn list(relay: &str) -> Result<()> {
    let client = client_for(relay)?;
    let requests = client.list_requests().await?;

    if requests.is_empty() {
        println!("No captured requests.");
        println!();
        println!("Point a webhook at {} and try again.", client.url());
        return Ok(());
    }

    // Print header
    println!("{:<34} {:<8} {:<40} {:<10}", "ID", "METHOD", "PATH", "TIME");
    println!("{}", "-".repeat(94));

    for record in &requests {
        println!(
            "{:<34} {:<8} {:<40} {:<10}",
            record.id,
            record.method,
            truncate(&record.path, 38),
            record.time_label()
        );
    }

    Ok(())
}

/// Print one captured request in full, as the relay stores it
pub async fn show(relay: &str, id: &str) -> Result<()> {
    let client = client_for(relay)?;
    let record = client.get_request(id).await?;
    println!("{}", record.to_pretty_json());
    Ok(())
}

/// Delete a stored request
pub async fn delete(relay: &str, id: &str) -> Result<()> {
    let client = client_for(relay)?;
    let ack = client.delete_request(id).await?;
    println!("{} Deleted request {}", style("✓").green(), ack.id);
    Ok(())
}

/// Replay a stored request to the relay's forward target
pub async fn replay(relay: &str, id: &str) -> Result<()> {
    let client = client_for(relay)?;

    let spinner = cliclack::spinner();
    spinner.start(format!("Replaying request {}...", id));

    match client.replay(id).await {
        Ok(outcome) if outcome.replayed => {
            spinner.stop(format!("{} {}", style("✓").green(), outcome.describe()));
            Ok(())
        }
        Ok(outcome) => {
            spinner.stop(format!("{} {}", style("✗").yellow(), outcome.describe()));
            Ok(())
        }
        Err(e) => {
            spinner.error("Replay failed");
            Err(e)
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        format!("{}...", &s[..max_len - 3])
    } else {
        s.to_string()
    }
}
