//! Retry executor walkthrough.
//!
//! Uses the HTTP layer directly, without the store facade: build a session,
//! tune a retry policy, and inspect the full attempt history of each call.

use std::time::Duration;

use anyhow::{Context, Result};
use demoblaze_core::http::{RequestExecutor, RequestSpec, ResponseOutcome, Session, SessionConfig};
use demoblaze_core::logging::{LogConfig, init_logging};
use demoblaze_core::retry::RetryPolicy;

fn print_outcome(outcome: &ResponseOutcome) {
    println!("   Disposition: {}", outcome.disposition);
    println!("   Status: {:?}", outcome.status);
    println!("   Attempts: {}", outcome.attempts);
    println!("   Elapsed: {:?}", outcome.elapsed);
    for record in &outcome.history {
        match (&record.status, &record.error) {
            (Some(status), _) => println!(
                "   Attempt {}: HTTP {} in {:?}",
                record.attempt, status, record.duration
            ),
            (None, Some(error)) => println!(
                "   Attempt {}: {} in {:?}",
                record.attempt, error, record.duration
            ),
            (None, None) => println!("   Attempt {}: no response", record.attempt),
        }
        if let Some(delay) = record.delay_before_next {
            println!("      slept {:?} before retrying", delay);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LogConfig::development());

    println!("=== Resilient Fetch Example ===\n");

    // A patient policy: four attempts with a short first backoff.
    let policy = RetryPolicy {
        max_attempts: 4,
        base_delay_ms: 250,
        ..RetryPolicy::default()
    };

    // Example 1: Fetch the catalog from the real backend
    println!("1. Fetching /entries from the DemoBlaze backend...");
    let config = SessionConfig {
        timeout: Duration::from_secs(15),
        ..SessionConfig::new("https://api.demoblaze.com")
    };
    let session = Session::new(config).context("Failed to build HTTP session")?;
    let executor = RequestExecutor::new(session, policy.clone())
        .context("Failed to build request executor")?;

    match executor.execute(&RequestSpec::get("entries")).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            if outcome.is_success() {
                println!("   Body: {} bytes", outcome.body.len());
            }
        }
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    // Example 2: Exhaust retries against a dead endpoint
    // Nothing listens on this port, so every attempt fails at the
    // transport layer and the policy runs out.
    println!("2. Fetching from a dead endpoint...");
    let dead_config = SessionConfig {
        timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_millis(500),
        ..SessionConfig::new("http://127.0.0.1:9")
    };
    let dead_session = Session::new(dead_config).context("Failed to build HTTP session")?;
    let dead_executor = RequestExecutor::new(dead_session, policy)
        .context("Failed to build request executor")?;

    match dead_executor.execute(&RequestSpec::get("entries")).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            if let Some(error) = &outcome.error {
                println!("   Stored failure: {}", error.report());
                println!("   Retryable: {}", error.is_retryable());
            }
        }
        Err(e) => println!("   Error: {}", e),
    }
    println!();

    println!("=== Done ===");

    Ok(())
}
