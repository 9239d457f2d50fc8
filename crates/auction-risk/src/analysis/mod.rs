//! Rights classification, tenancy priority, bid-history validation, market benchmarking
//! and the composite verdict for a single foreclosure listing.
//!
//! Every stage is a pure function of its inputs; [`AuctionAnalyzer`] wires them together in
//! dependency order over one [`AuctionSnapshot`].

mod analyzer;
pub mod bid_history;
pub mod domain;
pub mod market;
pub mod register;
pub mod scoring;
pub mod tenancy;
pub mod warnings;

#[cfg(test)]
mod tests;

pub use analyzer::{
    analysis_key, AnalysisKey, AuctionAnalysis, AuctionAnalyzer, ClassificationReport,
};
pub use bid_history::{BidHistoryReport, BidHistoryValidator};
pub use domain::{
    AuctionCase, AuctionSnapshot, BidResult, BidRound, CaseId, MarketComparable, RegisterBook,
    RegisterEntry, RegisterKey, RightDisposition, RightPurpose, TenantRecord,
};
pub use market::{MarketComparator, MarketComparison, RankedComparable};
pub use register::{
    ClassifiedEntry, DispositionBasis, RegisterClassification, RegisterClassifier, RegisterError,
};
pub use scoring::{
    BidRange, RiskAssessment, RiskScoringEngine, RiskSignal, ScoringConfig, SignalKind,
    SignalSeverity, Verdict,
};
pub use tenancy::{TenancyPriorityResolver, TenancyResolution, TenantStatus};
pub use warnings::AnalysisWarning;
