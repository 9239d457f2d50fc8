use auction_risk::analysis::{
    analysis_key, AuctionAnalyzer, AuctionCase, AuctionSnapshot, BidResult, BidRound, CaseId,
    MarketComparable, RegisterBook, RegisterClassifier, RegisterEntry, RightDisposition,
    ScoringConfig, SignalKind, TenantRecord, Verdict,
};
use auction_risk::error::AppError;
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn register(
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
        right_holder: "한빛은행".to_string(),
        claim_amount: Some(480_000_000),
        reference_override: None,
        persisted_status: None,
    }
}

fn bid_round(round: u32, minimum_price: u64, result: BidResult) -> BidRound {
    BidRound {
        round,
        date: date(2025, 1, 7) + chrono::Duration::days(i64::from(round) * 28),
        minimum_price,
        result,
        winning_price: None,
        bidder_count: Some(0),
        revalued: false,
    }
}

fn snapshot() -> AuctionSnapshot {
    let mut mortgage = register(RegisterBook::Secondary, 9, date(2019, 2, 8), "근저당권설정");
    mortgage.reference_override = Some(true);

    AuctionSnapshot {
        case: AuctionCase {
            case_id: CaseId("2024타경7781".to_string()),
            court: "수원지방법원".to_string(),
            appraisal_price: 1_084_000_000,
            minimum_price: 758_800_000,
            sale_date: Some(date(2025, 5, 20)),
            item_type: "아파트".to_string(),
            location: "경기도 성남시 분당구".to_string(),
            exclusive_area_m2: Some(84.9),
        },
        registers: vec![
            register(RegisterBook::Primary, 4, date(2016, 11, 30), "소유권이전"),
            mortgage,
            register(RegisterBook::Primary, 15, date(2025, 2, 7), "가압류"),
        ],
        tenants: vec![TenantRecord {
            name: "오후순위".to_string(),
            occupied_part: "전부".to_string(),
            move_in_date: Some(date(2021, 3, 2)),
            fixed_date: Some(date(2021, 3, 2)),
            has_bid_request: true,
            deposit: 300_000_000,
            monthly_rent: 0,
        }],
        bid_rounds: vec![
            bid_round(1, 1_084_000_000, BidResult::Failed),
            bid_round(2, 758_800_000, BidResult::Failed),
        ],
        comparables: vec![
            MarketComparable {
                name: "파크뷰".to_string(),
                avg_price_per_area: 12_400_000.0,
                transaction_count: 36,
                latest_transaction: Some(date(2025, 3, 14)),
            },
            MarketComparable {
                name: "정자동 한솔".to_string(),
                avg_price_per_area: 11_800_000.0,
                transaction_count: 12,
                latest_transaction: Some(date(2025, 2, 27)),
            },
        ],
    }
}

#[test]
fn clean_listing_with_deep_markdown_is_strong_buy() {
    let analysis = AuctionAnalyzer::default().analyze(&snapshot());

    assert_eq!(analysis.classification.reference_date, Some(date(2019, 2, 8)));
    assert!(!analysis.classification.manual_review);
    let attachment = analysis
        .classification
        .classified
        .iter()
        .find(|entry| entry.key.sequence == 15)
        .expect("attachment classified");
    assert_eq!(attachment.disposition, RightDisposition::Extinguished);

    assert!(analysis.tenancy.tenants.iter().all(|tenant| !tenant.has_priority));
    assert!((analysis.bid_history.decline_rate_percent - 30.0).abs() < 0.1);
    assert!(analysis.market.diff_percent.expect("market diff") <= -20.0);
    assert_eq!(analysis.assessment.verdict, Verdict::StrongBuy);
}

#[test]
fn senior_tenant_without_claim_forces_caution() {
    let mut snapshot = snapshot();
    snapshot.tenants = vec![TenantRecord {
        name: "박선순위".to_string(),
        occupied_part: "전부".to_string(),
        move_in_date: Some(date(2019, 1, 1)),
        fixed_date: Some(date(2019, 1, 1)),
        has_bid_request: false,
        deposit: 420_000_000,
        monthly_rent: 0,
    }];

    let analysis = AuctionAnalyzer::default().analyze(&snapshot);

    let tenant = &analysis.tenancy.tenants[0];
    assert!(tenant.has_priority);
    assert!(tenant.deposit_at_risk);
    assert_eq!(analysis.tenancy.exposure, 420_000_000);
    assert_eq!(analysis.assessment.verdict, Verdict::Caution);
}

#[test]
fn missing_baseline_degrades_to_manual_review() {
    let mut snapshot = snapshot();
    snapshot.registers = vec![register(
        RegisterBook::Primary,
        1,
        date(2012, 8, 1),
        "소유권보존",
    )];

    let analysis = AuctionAnalyzer::default().analyze(&snapshot);

    assert_eq!(analysis.classification.reference_date, None);
    assert!(analysis.classification.manual_review);
    assert_eq!(analysis.assessment.verdict, Verdict::Caution);
    assert!(analysis
        .assessment
        .has_signal(SignalKind::ManualReviewRequired));

    let json = serde_json::to_value(&analysis).expect("analysis serializes");
    assert!(json["classification"]["reference_date"].is_null());
    assert_eq!(json["assessment"]["verdict"], "CAUTION");
}

#[test]
fn listing_without_market_data_still_completes() {
    let mut snapshot = snapshot();
    snapshot.comparables.clear();

    let analysis = AuctionAnalyzer::default().analyze(&snapshot);

    assert!(analysis.market.diff_percent.is_none());
    assert!(analysis
        .assessment
        .has_signal(SignalKind::InsufficientMarketData));
    assert_eq!(analysis.assessment.verdict, Verdict::Consider);
}

#[test]
fn stricter_configuration_changes_the_verdict() {
    let config = ScoringConfig {
        strong_buy_decline_pct: 40.0,
        ..ScoringConfig::default()
    };

    let analysis = AuctionAnalyzer::new(config).analyze(&snapshot());

    assert_eq!(analysis.assessment.verdict, Verdict::Consider);
}

#[test]
fn batch_analysis_matches_individual_runs() {
    let analyzer = AuctionAnalyzer::default();
    let mut second = snapshot();
    second.case.case_id = CaseId("2024타경7782".to_string());
    second.comparables.clear();
    let snapshots = vec![snapshot(), second];

    let batch = analyzer.analyze_batch(&snapshots);

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], analyzer.analyze(&snapshots[0]));
    assert_eq!(batch[1], analyzer.analyze(&snapshots[1]));
}

#[test]
fn analysis_key_tracks_input_changes() -> Result<(), AppError> {
    let original = snapshot();
    let key = analysis_key(&original)?;
    assert_eq!(key, analysis_key(&original)?);
    assert_eq!(key.input_hash.len(), 64);
    assert!(key.to_string().starts_with("2024타경7781:"));

    let mut changed = original.clone();
    changed.bid_rounds.push(bid_round(3, 531_160_000, BidResult::Postponed));
    assert_ne!(key, analysis_key(&changed)?);
    Ok(())
}

#[test]
fn missing_baseline_propagates_as_app_error() {
    let run = || -> Result<(), AppError> {
        RegisterClassifier.classify(&[])?;
        Ok(())
    };

    let err = run().expect_err("classification fails without registers");
    assert!(err.requires_manual_review());
}

#[test]
fn snapshot_round_trips_through_json_input() {
    let raw = r#"{
        "case": {
            "case_id": "2023타경900",
            "court": "대전지방법원",
            "appraisal_price": 500000000,
            "minimum_price": 350000000,
            "sale_date": "2025-06-02",
            "item_type": "다세대",
            "location": "대전광역시 서구"
        },
        "registers": [
            {
                "book": "SECONDARY",
                "sequence": 2,
                "receipt_date": "2020-10-05",
                "purpose": "근저당권설정",
                "right_holder": "새마을금고"
            }
        ],
        "bid_rounds": [
            { "round": 1, "date": "2025-03-03", "minimum_price": 500000000, "result": "FAILED" },
            { "round": 2, "date": "2025-04-07", "minimum_price": 350000000, "result": "FAILED" }
        ]
    }"#;

    let snapshot: AuctionSnapshot = serde_json::from_str(raw).expect("snapshot parses");
    let analysis = AuctionAnalyzer::default().analyze(&snapshot);

    assert_eq!(analysis.classification.reference_date, Some(date(2020, 10, 5)));
    assert!((analysis.bid_history.decline_rate_percent - 30.0).abs() < 1e-9);
    assert_eq!(analysis.assessment.verdict, Verdict::Consider);
}
