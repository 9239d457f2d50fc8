use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{BidResult, BidRound};
use super::warnings::AnalysisWarning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidHistoryReport {
    pub normalized: Vec<BidRound>,
    pub decline_rate_percent: f64,
    /// FAILED rounds since the decline baseline.
    pub failed_rounds: u32,
    /// Round the listing is currently offered in.
    pub current_round: u32,
    pub warnings: Vec<AnalysisWarning>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BidHistoryValidator;

impl BidHistoryValidator {
    pub fn validate(&self, rounds: &[BidRound]) -> BidHistoryReport {
        let mut normalized = rounds.to_vec();
        normalized.sort_by_key(|round| round.round);

        let mut warnings = Vec::new();
        let mut seen = BTreeSet::new();
        for round in &normalized {
            if !seen.insert(round.round) {
                warnings.push(AnalysisWarning::DuplicateRound { round: round.round });
            }
        }

        let mut baseline = 0usize;
        for (index, pair) in normalized.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.revalued {
                baseline = index + 1;
                continue;
            }
            if current.minimum_price > previous.minimum_price {
                warnings.push(AnalysisWarning::InvalidPriceSequence {
                    round: current.round,
                    previous_price: previous.minimum_price,
                    price: current.minimum_price,
                });
            }
        }

        let chain = normalized.get(baseline..).unwrap_or_default();
        let decline_rate_percent = match (chain.first(), chain.last()) {
            (Some(first), Some(last)) if first.minimum_price > 0 => {
                (first.minimum_price as f64 - last.minimum_price as f64)
                    / first.minimum_price as f64
                    * 100.0
            }
            _ => 0.0,
        };
        let failed_rounds = chain
            .iter()
            .filter(|round| round.result == BidResult::Failed)
            .count() as u32;

        debug!(
            rounds = normalized.len(),
            failed_rounds,
            decline_rate_percent,
            warnings = warnings.len(),
            "bid history validated"
        );

        BidHistoryReport {
            normalized,
            decline_rate_percent,
            failed_rounds,
            current_round: failed_rounds + 1,
            warnings,
        }
    }
}
