use super::super::bid_history::BidHistoryReport;
use super::super::domain::AuctionCase;
use super::super::market::MarketComparison;
use super::super::register::{DispositionBasis, RegisterClassification, RegisterError};
use super::super::tenancy::TenancyResolution;
use super::super::warnings::AnalysisWarning;
use super::config::ScoringConfig;
use super::{RiskSignal, SignalKind, SignalSeverity};

/// Inputs the verdict policy branches on, extracted once from the stage results.
pub(crate) struct ScoreSignals {
    pub priority_tenant_at_risk: bool,
    pub missing_reference: bool,
    pub decline_rate_percent: f64,
    pub diff_percent: Option<f64>,
    pub bid_history_anomaly: bool,
}

pub(crate) fn collect_signals(
    case: &AuctionCase,
    classification: Result<&RegisterClassification, &RegisterError>,
    tenancy: &TenancyResolution,
    bid_history: &BidHistoryReport,
    market: &MarketComparison,
    config: &ScoringConfig,
) -> (Vec<RiskSignal>, ScoreSignals) {
    let mut signals = Vec::new();

    for tenant in tenancy.at_risk() {
        signals.push(RiskSignal {
            kind: SignalKind::PriorityTenantDeposit,
            severity: SignalSeverity::Critical,
            detail: format!(
                "tenant {} ({}) holds priority without a distribution claim; deposit {} passes to the buyer",
                tenant.name, tenant.occupied_part, tenant.deposit
            ),
        });
    }

    match classification {
        Ok(classification) => {
            let encumbrances = classification
                .inherited()
                .filter(|entry| entry.basis != DispositionBasis::OwnershipTransfer);
            for entry in encumbrances {
                signals.push(RiskSignal {
                    kind: SignalKind::InheritedRight,
                    severity: SignalSeverity::Warning,
                    detail: format!(
                        "{:?} entry {} held by {} survives the sale",
                        entry.purpose, entry.key, entry.right_holder
                    ),
                });
            }
            push_warnings(&mut signals, &classification.warnings);
        }
        Err(err) => signals.push(RiskSignal {
            kind: SignalKind::ManualReviewRequired,
            severity: SignalSeverity::Critical,
            detail: err.to_string(),
        }),
    }

    push_warnings(&mut signals, &tenancy.warnings);
    push_warnings(&mut signals, &bid_history.warnings);
    push_warnings(&mut signals, &market.warnings);

    if bid_history.decline_rate_percent >= config.strong_buy_decline_pct {
        signals.push(RiskSignal {
            kind: SignalKind::DeepMarkdown,
            severity: SignalSeverity::Opportunity,
            detail: format!(
                "minimum price down {:.2}% over {} failed round(s)",
                bid_history.decline_rate_percent, bid_history.failed_rounds
            ),
        });
    }

    if let Some(diff) = market.diff_percent {
        if diff <= config.consider_discount_pct {
            signals.push(RiskSignal {
                kind: SignalKind::MarketDiscount,
                severity: SignalSeverity::Opportunity,
                detail: format!(
                    "minimum price per area {:.2}% below weighted market average",
                    diff.abs()
                ),
            });
        } else if diff > 0.0 {
            signals.push(RiskSignal {
                kind: SignalKind::AboveMarket,
                severity: SignalSeverity::Warning,
                detail: format!("minimum price per area {diff:.2}% above weighted market average"),
            });
        }
    }

    if case.minimum_price > case.appraisal_price {
        signals.push(RiskSignal {
            kind: SignalKind::AboveAppraisal,
            severity: SignalSeverity::Warning,
            detail: format!(
                "minimum price {} exceeds appraisal {}",
                case.minimum_price, case.appraisal_price
            ),
        });
    }

    let score_signals = ScoreSignals {
        priority_tenant_at_risk: tenancy.at_risk().next().is_some(),
        missing_reference: classification.is_err(),
        decline_rate_percent: bid_history.decline_rate_percent,
        diff_percent: market.diff_percent,
        bid_history_anomaly: !bid_history.warnings.is_empty(),
    };

    (signals, score_signals)
}

fn push_warnings(signals: &mut Vec<RiskSignal>, warnings: &[AnalysisWarning]) {
    signals.extend(warnings.iter().map(|warning| RiskSignal {
        kind: SignalKind::from_warning(warning),
        severity: SignalSeverity::Warning,
        detail: warning.summary(),
    }));
}
