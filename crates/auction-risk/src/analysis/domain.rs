use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for court auction cases (e.g. `2024타경12345`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable snapshot of the listing under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionCase {
    pub case_id: CaseId,
    pub court: String,
    pub appraisal_price: u64,
    pub minimum_price: u64,
    pub sale_date: Option<NaiveDate>,
    pub item_type: String,
    pub location: String,
    /// Exclusive-use area in square metres, used to derive price-per-area.
    #[serde(default)]
    pub exclusive_area_m2: Option<f64>,
}

impl AuctionCase {
    /// Minimum price divided by exclusive area, when the area is known and positive.
    pub fn minimum_price_per_area(&self) -> Option<f64> {
        self.exclusive_area_m2
            .filter(|area| area.is_finite() && *area > 0.0)
            .map(|area| self.minimum_price as f64 / area)
    }
}

/// Section of the land register an entry was recorded in.
///
/// `Primary` is the ownership section (갑구), `Secondary` the other-rights section (을구).
/// The derived ordering places primary entries first, which is the reference tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterBook {
    Primary,
    Secondary,
}

impl RegisterBook {
    pub const fn label(self) -> &'static str {
        match self {
            RegisterBook::Primary => "primary",
            RegisterBook::Secondary => "secondary",
        }
    }
}

/// Stable identity of a register entry: its book and sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegisterKey {
    pub book: RegisterBook,
    pub sequence: u32,
}

impl fmt::Display for RegisterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.book.label(), self.sequence)
    }
}

/// Whether a recorded right survives the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RightDisposition {
    Inherited,
    Extinguished,
}

/// A single recorded right as ingested from the register transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEntry {
    pub book: RegisterBook,
    pub sequence: u32,
    pub receipt_date: NaiveDate,
    pub purpose: String,
    pub right_holder: String,
    #[serde(default)]
    pub claim_amount: Option<u64>,
    /// Curator-verified reference status; `Some(true)` pins this entry as the baseline.
    #[serde(default)]
    pub reference_override: Option<bool>,
    /// Curator-persisted survive/extinguish status.
    #[serde(default)]
    pub persisted_status: Option<RightDisposition>,
}

impl RegisterEntry {
    pub fn key(&self) -> RegisterKey {
        RegisterKey {
            book: self.book,
            sequence: self.sequence,
        }
    }

    pub fn right_purpose(&self) -> RightPurpose {
        RightPurpose::from_label(&self.purpose)
    }
}

/// Closed classification of register purpose labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RightPurpose {
    Mortgage,
    AuctionCommencement,
    ProvisionalAttachment,
    Attachment,
    SecurityProvisionalRegistration,
    ProvisionalRegistration,
    Injunction,
    Leasehold,
    OwnershipTransfer,
    Cancellation,
    Other,
}

impl RightPurpose {
    /// Parse a free-form purpose label such as `근저당권설정` or `임의경매개시결정`.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .replace(['\u{feff}', '\u{200b}'], "")
            .split_whitespace()
            .collect();

        // Longer labels first: 근저당권 contains 저당권, 가압류 contains 압류.
        if normalized.ends_with("말소") {
            RightPurpose::Cancellation
        } else if normalized.contains("경매개시") {
            RightPurpose::AuctionCommencement
        } else if normalized.contains("저당권") {
            RightPurpose::Mortgage
        } else if normalized.contains("가압류") {
            RightPurpose::ProvisionalAttachment
        } else if normalized.contains("압류") {
            RightPurpose::Attachment
        } else if normalized.contains("담보가등기") {
            RightPurpose::SecurityProvisionalRegistration
        } else if normalized.contains("가등기") {
            RightPurpose::ProvisionalRegistration
        } else if normalized.contains("가처분") {
            RightPurpose::Injunction
        } else if normalized.contains("전세권") || normalized.contains("임차권") {
            RightPurpose::Leasehold
        } else if normalized.contains("소유권이전") || normalized.contains("소유권보존") {
            RightPurpose::OwnershipTransfer
        } else {
            RightPurpose::Other
        }
    }

    /// Mortgage-type encumbrances and execution filings may serve as the baseline.
    pub const fn is_reference_eligible(self) -> bool {
        matches!(
            self,
            RightPurpose::Mortgage
                | RightPurpose::AuctionCommencement
                | RightPurpose::ProvisionalAttachment
                | RightPurpose::Attachment
                | RightPurpose::SecurityProvisionalRegistration
        )
    }
}

/// Residential occupancy declared in the court's tenancy survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub name: String,
    pub occupied_part: String,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub fixed_date: Option<NaiveDate>,
    /// Whether the tenant filed a distribution claim.
    pub has_bid_request: bool,
    pub deposit: u64,
    #[serde(default)]
    pub monthly_rent: u64,
}

/// Outcome of a single auction round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidResult {
    Failed,
    Successful,
    Postponed,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRound {
    pub round: u32,
    pub date: NaiveDate,
    pub minimum_price: u64,
    pub result: BidResult,
    #[serde(default)]
    pub winning_price: Option<u64>,
    #[serde(default)]
    pub bidder_count: Option<u32>,
    /// Set when the court re-appraised the property before this round.
    #[serde(default)]
    pub revalued: bool,
}

/// Aggregated actual-transaction data for a nearby complex or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketComparable {
    pub name: String,
    pub avg_price_per_area: f64,
    pub transaction_count: u32,
    #[serde(default)]
    pub latest_transaction: Option<NaiveDate>,
}

/// Full input of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSnapshot {
    pub case: AuctionCase,
    #[serde(default)]
    pub registers: Vec<RegisterEntry>,
    #[serde(default)]
    pub tenants: Vec<TenantRecord>,
    #[serde(default)]
    pub bid_rounds: Vec<BidRound>,
    #[serde(default)]
    pub comparables: Vec<MarketComparable>,
}
