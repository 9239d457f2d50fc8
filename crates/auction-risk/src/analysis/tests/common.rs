use chrono::NaiveDate;

use crate::analysis::domain::{
    AuctionCase, AuctionSnapshot, BidResult, BidRound, CaseId, MarketComparable, RegisterBook,
    RegisterEntry, RightDisposition, TenantRecord,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn auction_case() -> AuctionCase {
    AuctionCase {
        case_id: CaseId("2024타경51234".to_string()),
        court: "서울중앙지방법원".to_string(),
        appraisal_price: 1_084_000_000,
        minimum_price: 758_800_000,
        sale_date: Some(date(2025, 4, 15)),
        item_type: "아파트".to_string(),
        location: "서울특별시 송파구".to_string(),
        exclusive_area_m2: Some(84.0),
    }
}

pub(super) fn entry(
    book: RegisterBook,
    sequence: u32,
    receipt_date: NaiveDate,
    purpose: &str,
) -> RegisterEntry {
    RegisterEntry {
        book,
        sequence,
        receipt_date,
        purpose: purpose.to_string(),
        right_holder: format!("holder-{sequence}"),
        claim_amount: None,
        reference_override: None,
        persisted_status: None,
    }
}

pub(super) fn mortgage(sequence: u32, receipt_date: NaiveDate) -> RegisterEntry {
    RegisterEntry {
        claim_amount: Some(600_000_000),
        ..entry(RegisterBook::Secondary, sequence, receipt_date, "근저당권설정")
    }
}

pub(super) fn with_status(mut entry: RegisterEntry, status: RightDisposition) -> RegisterEntry {
    entry.persisted_status = Some(status);
    entry
}

pub(super) fn with_override(mut entry: RegisterEntry, value: bool) -> RegisterEntry {
    entry.reference_override = Some(value);
    entry
}

/// Registers from a typical listing: the 2019 mortgage is the baseline.
pub(super) fn registers() -> Vec<RegisterEntry> {
    vec![
        entry(RegisterBook::Primary, 3, date(2017, 6, 1), "소유권이전"),
        with_override(mortgage(9, date(2019, 2, 8)), true),
        entry(RegisterBook::Primary, 15, date(2025, 2, 7), "가압류"),
        entry(RegisterBook::Primary, 16, date(2025, 2, 20), "임의경매개시결정"),
    ]
}

pub(super) fn tenant(
    name: &str,
    move_in: Option<NaiveDate>,
    fixed: Option<NaiveDate>,
    has_bid_request: bool,
) -> TenantRecord {
    TenantRecord {
        name: name.to_string(),
        occupied_part: "전부".to_string(),
        move_in_date: move_in,
        fixed_date: fixed,
        has_bid_request,
        deposit: 350_000_000,
        monthly_rent: 0,
    }
}

pub(super) fn round(number: u32, minimum_price: u64, result: BidResult) -> BidRound {
    BidRound {
        round: number,
        date: date(2025, 1, 1) + chrono::Duration::days(i64::from(number) * 35),
        minimum_price,
        result,
        winning_price: None,
        bidder_count: None,
        revalued: false,
    }
}

pub(super) fn failed_rounds() -> Vec<BidRound> {
    vec![
        round(1, 1_084_000_000, BidResult::Failed),
        round(2, 758_800_000, BidResult::Failed),
    ]
}

pub(super) fn comparable(name: &str, price_per_area: f64, count: u32) -> MarketComparable {
    MarketComparable {
        name: name.to_string(),
        avg_price_per_area: price_per_area,
        transaction_count: count,
        latest_transaction: Some(date(2025, 3, 1)),
    }
}

pub(super) fn snapshot() -> AuctionSnapshot {
    AuctionSnapshot {
        case: auction_case(),
        registers: registers(),
        tenants: vec![tenant(
            "김임차",
            Some(date(2020, 5, 1)),
            Some(date(2020, 5, 3)),
            true,
        )],
        bid_rounds: failed_rounds(),
        comparables: vec![
            comparable("헬리오시티", 12_000_000.0, 40),
            comparable("가락쌍용", 11_500_000.0, 10),
        ],
    }
}
