use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::bid_history::{BidHistoryReport, BidHistoryValidator};
use super::domain::{AuctionSnapshot, CaseId, RegisterKey};
use super::market::{MarketComparator, MarketComparison};
use super::register::{ClassifiedEntry, RegisterClassification, RegisterClassifier, RegisterError};
use super::scoring::{RiskAssessment, RiskScoringEngine, ScoringConfig};
use super::tenancy::{TenancyPriorityResolver, TenancyResolution};
use super::warnings::AnalysisWarning;

/// Register section of the report, flattened so a missing baseline serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub reference_date: Option<NaiveDate>,
    pub reference_entry: Option<RegisterKey>,
    pub manual_review: bool,
    pub classified: Vec<ClassifiedEntry>,
    pub warnings: Vec<AnalysisWarning>,
}

impl From<&Result<RegisterClassification, RegisterError>> for ClassificationReport {
    fn from(value: &Result<RegisterClassification, RegisterError>) -> Self {
        match value {
            Ok(classification) => Self {
                reference_date: Some(classification.reference_date),
                reference_entry: Some(classification.reference_entry),
                manual_review: false,
                classified: classification.classified.clone(),
                warnings: classification.warnings.clone(),
            },
            Err(RegisterError::NoReferenceEntryFound) => Self {
                reference_date: None,
                reference_entry: None,
                manual_review: true,
                classified: Vec::new(),
                warnings: Vec::new(),
            },
        }
    }
}

/// Complete, serializable result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionAnalysis {
    pub case_id: CaseId,
    pub classification: ClassificationReport,
    pub tenancy: TenancyResolution,
    pub bid_history: BidHistoryReport,
    pub market: MarketComparison,
    pub assessment: RiskAssessment,
}

/// Cache identity for an analysis: case id plus a digest of the full input snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisKey {
    pub case_id: CaseId,
    pub input_hash: String,
}

impl fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.case_id, self.input_hash)
    }
}

/// Runs every stage over a snapshot in dependency order.
#[derive(Debug, Clone, Default)]
pub struct AuctionAnalyzer {
    registers: RegisterClassifier,
    tenancy: TenancyPriorityResolver,
    bid_history: BidHistoryValidator,
    market: MarketComparator,
    scoring: RiskScoringEngine,
}

impl AuctionAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scoring: RiskScoringEngine::new(config),
            ..Self::default()
        }
    }

    pub fn analyze(&self, snapshot: &AuctionSnapshot) -> AuctionAnalysis {
        let case = &snapshot.case;

        let classification = self.registers.classify(&snapshot.registers);
        let reference_date = classification
            .as_ref()
            .ok()
            .map(|classification| classification.reference_date);
        let tenancy = self.tenancy.resolve(&snapshot.tenants, reference_date);
        let bid_history = self.bid_history.validate(&snapshot.bid_rounds);
        let market = self
            .market
            .compare(case.minimum_price_per_area(), &snapshot.comparables);

        let assessment = self.scoring.score(
            case,
            classification.as_ref(),
            &tenancy,
            &bid_history,
            &market,
        );

        let report = ClassificationReport::from(&classification);

        if let Err(err) = &classification {
            warn!(case_id = %case.case_id, error = %err, "register classification incomplete");
        }
        for warning in report
            .warnings
            .iter()
            .chain(&tenancy.warnings)
            .chain(&bid_history.warnings)
            .chain(&market.warnings)
        {
            warn!(
                case_id = %case.case_id,
                code = warning.code(),
                "{}",
                warning.summary()
            );
        }

        info!(
            case_id = %case.case_id,
            verdict = assessment.verdict.label(),
            signals = assessment.signals.len(),
            bid_low = assessment.recommended_bid_range.low,
            bid_high = assessment.recommended_bid_range.high,
            "auction analysis complete"
        );

        AuctionAnalysis {
            case_id: case.case_id.clone(),
            classification: report,
            tenancy,
            bid_history,
            market,
            assessment,
        }
    }

    /// Analyze independent listings; no state is shared between cases.
    pub fn analyze_batch<'a, I>(&self, snapshots: I) -> Vec<AuctionAnalysis>
    where
        I: IntoIterator<Item = &'a AuctionSnapshot>,
    {
        snapshots
            .into_iter()
            .map(|snapshot| self.analyze(snapshot))
            .collect()
    }
}

/// Derive the cache key a calling service can store analysis results under.
pub fn analysis_key(snapshot: &AuctionSnapshot) -> Result<AnalysisKey, serde_json::Error> {
    let payload = serde_json::to_vec(snapshot)?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);

    Ok(AnalysisKey {
        case_id: snapshot.case.case_id.clone(),
        input_hash: format!("{:x}", hasher.finalize()),
    })
}
