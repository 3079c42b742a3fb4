//! Background scheduler for the periodic portfolio valuation job.
//!
//! Runs the revaluation pass on a fixed wall-clock interval in a single
//! tokio task. Cycles run sequentially; a cycle error is logged and never
//! stops subsequent ticks.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first cycle (let the server fully start).
const INITIAL_DELAY_SECS: u64 = 60;

/// Starts the background valuation scheduler.
pub fn start_valuation_scheduler(state: Arc<AppState>, interval_secs: u64) {
    tokio::spawn(async move {
        info!(
            "Valuation scheduler started ({}s interval)",
            interval_secs
        );

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick fires immediately, subsequent ticks at the interval
        let mut tick = interval(Duration::from_secs(interval_secs));

        loop {
            tick.tick().await;
            run_scheduled_valuation(&state).await;
        }
    });
}

/// Runs a single scheduled valuation cycle.
async fn run_scheduled_valuation(state: &Arc<AppState>) {
    info!("Running scheduled portfolio valuation...");

    match state.valuation_service.revalue_all_portfolios().await {
        Ok(summary) => {
            if summary.has_failures() {
                warn!(
                    "Valuation cycle completed with failures: {} processed, {} notifications, failed: {:?}",
                    summary.portfolios_processed,
                    summary.notifications_emitted,
                    summary.failures
                );
            } else {
                info!(
                    "Valuation cycle completed: {} portfolios, {} notifications",
                    summary.portfolios_processed, summary.notifications_emitted
                );
            }
        }
        Err(e) => {
            // Cycle-level failure (e.g. the portfolio scan itself); the next
            // tick will retry from scratch.
            warn!("Valuation cycle failed: {}", e);
        }
    }
}
