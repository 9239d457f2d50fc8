use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::rules::ScoreSignals;

/// Composite recommendation for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    StrongBuy,
    Consider,
    Caution,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::StrongBuy => "STRONG_BUY",
            Verdict::Consider => "CONSIDER",
            Verdict::Caution => "CAUTION",
        }
    }
}

pub(crate) fn decide_verdict(signals: &ScoreSignals, config: &ScoringConfig) -> (Verdict, String) {
    if signals.priority_tenant_at_risk {
        return (
            Verdict::Caution,
            "priority tenant deposit is a buyer-side exposure".to_string(),
        );
    }

    if signals.missing_reference {
        return (
            Verdict::Caution,
            "no reference entry found; manual review required".to_string(),
        );
    }

    if let Some(diff) = signals.diff_percent {
        if signals.decline_rate_percent >= config.strong_buy_decline_pct
            && diff <= config.strong_buy_discount_pct
        {
            return (
                Verdict::StrongBuy,
                format!(
                    "{:.2}% markdown and {:.2}% below market",
                    signals.decline_rate_percent,
                    diff.abs()
                ),
            );
        }

        if diff <= config.consider_discount_pct {
            return (
                Verdict::Consider,
                format!("{:.2}% below market", diff.abs()),
            );
        }
    }

    if signals.bid_history_anomaly {
        return (
            Verdict::Caution,
            "bid history contains anomalies".to_string(),
        );
    }

    (
        Verdict::Consider,
        "no decisive risk or opportunity signal".to_string(),
    )
}
