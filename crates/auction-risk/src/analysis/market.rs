use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::MarketComparable;
use super::warnings::AnalysisWarning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedComparable {
    pub name: String,
    pub avg_price_per_area: f64,
    pub transaction_count: u32,
    pub latest_transaction: Option<NaiveDate>,
    /// Share of the total transaction count this comparable contributes.
    pub weight: f64,
    /// Target price relative to this comparable, in percent.
    pub diff_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    pub avg_price_per_area: Option<f64>,
    pub diff_percent: Option<f64>,
    pub ranked_comparables: Vec<RankedComparable>,
    pub warnings: Vec<AnalysisWarning>,
}

impl MarketComparison {
    fn insufficient(usable_comparables: usize) -> Self {
        Self {
            avg_price_per_area: None,
            diff_percent: None,
            ranked_comparables: Vec::new(),
            warnings: vec![AnalysisWarning::InsufficientMarketData { usable_comparables }],
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketComparator;

impl MarketComparator {
    pub fn compare(
        &self,
        target_price_per_area: Option<f64>,
        comparables: &[MarketComparable],
    ) -> MarketComparison {
        let usable: Vec<&MarketComparable> = comparables
            .iter()
            .filter(|comparable| {
                comparable.transaction_count > 0
                    && comparable.avg_price_per_area.is_finite()
                    && comparable.avg_price_per_area > 0.0
            })
            .collect();

        let target = target_price_per_area.filter(|value| value.is_finite() && *value > 0.0);
        let Some(target) = target else {
            return MarketComparison::insufficient(usable.len());
        };
        if usable.is_empty() {
            return MarketComparison::insufficient(0);
        }

        // Weighting by transaction count keeps thin groups from skewing the benchmark.
        let total_count: f64 = usable
            .iter()
            .map(|comparable| comparable.transaction_count as f64)
            .sum();
        let weighted_sum: f64 = usable
            .iter()
            .map(|comparable| comparable.avg_price_per_area * comparable.transaction_count as f64)
            .sum();
        let avg = weighted_sum / total_count;
        let diff_percent = percent_diff(target, avg);

        let mut ranked_comparables: Vec<RankedComparable> = usable
            .iter()
            .map(|comparable| RankedComparable {
                name: comparable.name.clone(),
                avg_price_per_area: comparable.avg_price_per_area,
                transaction_count: comparable.transaction_count,
                latest_transaction: comparable.latest_transaction,
                weight: comparable.transaction_count as f64 / total_count,
                diff_percent: percent_diff(target, comparable.avg_price_per_area),
            })
            .collect();

        ranked_comparables.sort_by(|left, right| {
            let left_gap = (left.avg_price_per_area - target).abs();
            let right_gap = (right.avg_price_per_area - target).abs();
            left_gap
                .partial_cmp(&right_gap)
                .unwrap_or(Ordering::Equal)
                .then_with(|| right.transaction_count.cmp(&left.transaction_count))
                .then_with(|| left.name.cmp(&right.name))
        });

        debug!(
            comparables = ranked_comparables.len(),
            avg_price_per_area = avg,
            diff_percent,
            "market comparison computed"
        );

        MarketComparison {
            avg_price_per_area: Some(avg),
            diff_percent: Some(diff_percent),
            ranked_comparables,
            warnings: Vec::new(),
        }
    }
}

fn percent_diff(target: f64, benchmark: f64) -> f64 {
    (target - benchmark) / benchmark * 100.0
}
