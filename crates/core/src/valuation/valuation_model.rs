//! Valuation cycle result models.

use serde::{Deserialize, Serialize};

/// Outcome of one full valuation cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationCycleSummary {
    /// Portfolios whose assets and value were committed this cycle.
    pub portfolios_processed: usize,
    /// Alert notifications appended this cycle (asset and portfolio level).
    pub notifications_emitted: usize,
    /// Portfolios skipped because of a quote or persistence failure, with
    /// the reason. Each entry is `(portfolio_id, reason)`.
    pub failures: Vec<(String, String)>,
}

impl ValuationCycleSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
