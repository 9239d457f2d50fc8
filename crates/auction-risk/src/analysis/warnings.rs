use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{RegisterKey, RightDisposition};

/// Non-fatal data-quality findings surfaced alongside stage results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisWarning {
    ReferenceOverrideDiscrepancy {
        computed: Option<RegisterKey>,
        curated: Option<RegisterKey>,
    },
    DuplicateRegisterKey {
        entry: RegisterKey,
    },
    StatusFlagDiscrepancy {
        entry: RegisterKey,
        persisted: RightDisposition,
        derived: RightDisposition,
    },
    UnverifiedSeniorRight {
        entry: RegisterKey,
        receipt_date: NaiveDate,
    },
    MissingTenancyDate {
        tenant: String,
    },
    TenancyUnassessed {
        tenants: usize,
    },
    InvalidPriceSequence {
        round: u32,
        previous_price: u64,
        price: u64,
    },
    DuplicateRound {
        round: u32,
    },
    InsufficientMarketData {
        usable_comparables: usize,
    },
}

impl AnalysisWarning {
    pub const fn code(&self) -> &'static str {
        match self {
            AnalysisWarning::ReferenceOverrideDiscrepancy { .. } => {
                "REFERENCE_OVERRIDE_DISCREPANCY"
            }
            AnalysisWarning::DuplicateRegisterKey { .. } => "DUPLICATE_REGISTER_KEY",
            AnalysisWarning::StatusFlagDiscrepancy { .. } => "STATUS_FLAG_DISCREPANCY",
            AnalysisWarning::UnverifiedSeniorRight { .. } => "UNVERIFIED_SENIOR_RIGHT",
            AnalysisWarning::MissingTenancyDate { .. } => "MISSING_TENANCY_DATE",
            AnalysisWarning::TenancyUnassessed { .. } => "TENANCY_UNASSESSED",
            AnalysisWarning::InvalidPriceSequence { .. } => "INVALID_PRICE_SEQUENCE",
            AnalysisWarning::DuplicateRound { .. } => "DUPLICATE_ROUND",
            AnalysisWarning::InsufficientMarketData { .. } => "INSUFFICIENT_MARKET_DATA",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AnalysisWarning::ReferenceOverrideDiscrepancy { computed, curated } => format!(
                "curated reference entry {} disagrees with computed pick {}",
                describe_key(curated),
                describe_key(computed)
            ),
            AnalysisWarning::DuplicateRegisterKey { entry } => {
                format!("entry {entry} is recorded more than once in the register transcript")
            }
            AnalysisWarning::StatusFlagDiscrepancy {
                entry,
                persisted,
                derived,
            } => format!(
                "entry {entry} persisted as {:?} but derives as {:?}",
                persisted, derived
            ),
            AnalysisWarning::UnverifiedSeniorRight {
                entry,
                receipt_date,
            } => format!(
                "entry {entry} recorded {receipt_date} predates the baseline without a verified status; assumed extinguished"
            ),
            AnalysisWarning::MissingTenancyDate { tenant } => {
                format!("tenant {tenant} is missing a move-in or fixed date; treated as no priority")
            }
            AnalysisWarning::TenancyUnassessed { tenants } => {
                format!("{tenants} tenant(s) could not be assessed without a reference date")
            }
            AnalysisWarning::InvalidPriceSequence {
                round,
                previous_price,
                price,
            } => format!(
                "round {round} minimum price {price} exceeds prior {previous_price} without revaluation"
            ),
            AnalysisWarning::DuplicateRound { round } => {
                format!("round {round} appears more than once in the bid history")
            }
            AnalysisWarning::InsufficientMarketData { usable_comparables } => format!(
                "market comparison skipped ({usable_comparables} usable comparable(s))"
            ),
        }
    }
}

fn describe_key(key: &Option<RegisterKey>) -> String {
    key.map(|key| key.to_string())
        .unwrap_or_else(|| "none".to_string())
}
