use serde::{Deserialize, Serialize};

/// Thresholds and bid-premium bounds used by the verdict policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub strong_buy_decline_pct: f64,
    pub strong_buy_discount_pct: f64,
    pub consider_discount_pct: f64,
    pub base_bid_premium: f64,
    pub max_bid_premium: f64,
    pub premium_saturation_round: u32,
}

impl ScoringConfig {
    /// Bid premium for the given round, linear from base at round 1 to max at saturation.
    pub fn bid_premium_for_round(&self, round: u32) -> f64 {
        let round = round.max(1);
        if self.premium_saturation_round <= 1 || round >= self.premium_saturation_round {
            return self.max_bid_premium;
        }

        let progress = (round - 1) as f64 / (self.premium_saturation_round - 1) as f64;
        self.base_bid_premium + (self.max_bid_premium - self.base_bid_premium) * progress
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strong_buy_decline_pct: 20.0,
            strong_buy_discount_pct: -20.0,
            consider_discount_pct: -10.0,
            base_bid_premium: 0.10,
            max_bid_premium: 0.20,
            premium_saturation_round: 3,
        }
    }
}
