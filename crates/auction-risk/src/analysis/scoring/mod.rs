mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::Verdict;

use super::bid_history::BidHistoryReport;
use super::domain::AuctionCase;
use super::market::MarketComparison;
use super::register::{RegisterClassification, RegisterError};
use super::tenancy::TenancyResolution;
use super::warnings::AnalysisWarning;
use policy::decide_verdict;
use serde::{Deserialize, Serialize};

/// Stateless scorer that composes stage results into a verdict.
#[derive(Debug, Clone, Default)]
pub struct RiskScoringEngine {
    config: ScoringConfig,
}

impl RiskScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        case: &AuctionCase,
        classification: Result<&RegisterClassification, &RegisterError>,
        tenancy: &TenancyResolution,
        bid_history: &BidHistoryReport,
        market: &MarketComparison,
    ) -> RiskAssessment {
        let (signals, score_signals) = rules::collect_signals(
            case,
            classification,
            tenancy,
            bid_history,
            market,
            &self.config,
        );

        let (verdict, rationale) = decide_verdict(&score_signals, &self.config);

        let premium = self.config.bid_premium_for_round(bid_history.current_round);
        let upper = (case.minimum_price as f64 * (1.0 + premium)).round();

        RiskAssessment {
            verdict,
            recommended_bid_range: BidRange {
                low: case.minimum_price,
                high: upper.min(u64::MAX as f64) as u64,
            },
            rationale,
            signals,
        }
    }
}

/// Inclusive price band a bidder should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRange {
    pub low: u64,
    pub high: u64,
}

/// Auditable contribution to the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSignal {
    pub kind: SignalKind,
    pub severity: SignalSeverity,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    PriorityTenantDeposit,
    ManualReviewRequired,
    InheritedRight,
    RegisterDiscrepancy,
    UnverifiedSeniorRight,
    TenancyDataGap,
    PriceSequenceAnomaly,
    InsufficientMarketData,
    DeepMarkdown,
    MarketDiscount,
    AboveMarket,
    AboveAppraisal,
}

impl SignalKind {
    pub(crate) fn from_warning(warning: &AnalysisWarning) -> Self {
        match warning {
            AnalysisWarning::ReferenceOverrideDiscrepancy { .. }
            | AnalysisWarning::DuplicateRegisterKey { .. }
            | AnalysisWarning::StatusFlagDiscrepancy { .. } => SignalKind::RegisterDiscrepancy,
            AnalysisWarning::UnverifiedSeniorRight { .. } => SignalKind::UnverifiedSeniorRight,
            AnalysisWarning::MissingTenancyDate { .. }
            | AnalysisWarning::TenancyUnassessed { .. } => SignalKind::TenancyDataGap,
            AnalysisWarning::InvalidPriceSequence { .. }
            | AnalysisWarning::DuplicateRound { .. } => SignalKind::PriceSequenceAnomaly,
            AnalysisWarning::InsufficientMarketData { .. } => SignalKind::InsufficientMarketData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalSeverity {
    Opportunity,
    Warning,
    Critical,
}

/// Verdict, bid band and the signals behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub verdict: Verdict,
    pub recommended_bid_range: BidRange,
    pub rationale: String,
    pub signals: Vec<RiskSignal>,
}

impl RiskAssessment {
    pub fn has_signal(&self, kind: SignalKind) -> bool {
        self.signals.iter().any(|signal| signal.kind == kind)
    }
}
