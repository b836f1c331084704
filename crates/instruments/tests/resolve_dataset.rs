use chrono::NaiveDate;
use dhan_agent_instruments::{
    ExpiryKind, InstrumentIndex, OptionType, ResolutionRequest, ResolveError, Resolver,
    StrikeSelector, Underlying,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn fixture_path() -> String {
    format!("{}/tests/data/master_sample.csv", env!("CARGO_MANIFEST_DIR"))
}

fn resolver() -> Resolver {
    let index = InstrumentIndex::from_csv(fixture_path()).expect("fixture should load");
    Resolver::new(Arc::new(index))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request(
    underlying: Underlying,
    expiry_kind: ExpiryKind,
    strike_selector: StrikeSelector,
    spot: Option<Decimal>,
) -> ResolutionRequest {
    ResolutionRequest {
        underlying,
        expiry_kind,
        option_type: OptionType::Ce,
        strike_selector,
        spot,
    }
}

#[test]
fn fixture_loads_every_row() {
    let r = resolver();
    assert_eq!(r.index().len(), 65);
    assert_eq!(r.index().counts_by_underlying().get("BANKNIFTY"), Some(&22));
}

#[test]
fn repeated_resolution_is_identical() {
    let r = resolver();
    let req = request(
        Underlying::BankNifty,
        ExpiryKind::CurrentWeek,
        StrikeSelector::Otm { value: Some(dec!(1)) },
        Some(dec!(47180)),
    );
    let first = r.resolve_on(&req, date(2024, 1, 1)).unwrap();
    let second = r.resolve_on(&req, date(2024, 1, 1)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_record_is_reachable() {
    let r = resolver();
    for record in r.index().records() {
        let req = ResolutionRequest {
            underlying: record.underlying_symbol.parse().unwrap(),
            expiry_kind: ExpiryKind::CurrentWeek,
            option_type: record.option_type,
            strike_selector: StrikeSelector::Absolute {
                value: Some(record.strike),
            },
            spot: None,
        };
        let resolved = r
            .resolve_on(&req, record.expiry)
            .unwrap_or_else(|e| panic!("{} unreachable: {e}", record.trading_symbol));
        assert_eq!(resolved.key(), record.key());
    }
}

#[test]
fn atm_without_spot_takes_middle_strike() {
    let resolved = resolver()
        .resolve_on(
            &request(Underlying::Nifty, ExpiryKind::CurrentWeek, StrikeSelector::Atm, None),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(resolved.expiry, date(2024, 1, 4));
    assert_eq!(resolved.strike, dec!(22500));
    assert_eq!(resolved.security_id, 35005);
}

#[test]
fn spot_is_rounded_to_the_inferred_step() {
    // 2024-01-11 ladder is 22400/22500/22600
    let resolved = resolver()
        .resolve_on(
            &request(Underlying::Nifty, ExpiryKind::NextWeek, StrikeSelector::Atm, Some(dec!(22463))),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(resolved.strike, dec!(22500));
}

#[test]
fn otm_offsets_from_spot_atm() {
    let mut req = request(
        Underlying::BankNifty,
        ExpiryKind::CurrentWeek,
        StrikeSelector::Otm { value: Some(dec!(2)) },
        Some(dec!(47250)),
    );
    let r = resolver();
    assert_eq!(r.resolve_on(&req, date(2024, 1, 1)).unwrap().security_id, 35041);

    req.option_type = OptionType::Pe;
    let put = r.resolve_on(&req, date(2024, 1, 1)).unwrap();
    assert_eq!(put.strike, dec!(47500));
    assert_eq!(put.option_type, OptionType::Pe);
}

#[test]
fn absolute_target_snaps_to_ladder() {
    let resolved = resolver()
        .resolve_on(
            &request(
                Underlying::Nifty,
                ExpiryKind::CurrentWeek,
                StrikeSelector::Absolute { value: Some(dec!(22532)) },
                None,
            ),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(resolved.security_id, 35007);
}

#[test]
fn delta_falls_back_to_atm() {
    let resolved = resolver()
        .resolve_on(
            &request(
                Underlying::FinNifty,
                ExpiryKind::CurrentWeek,
                StrikeSelector::Delta { value: Some(dec!(0.3)) },
                None,
            ),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(resolved.strike, dec!(21200));
}

#[test]
fn expired_horizon_falls_back_to_earliest_expiry() {
    let resolved = resolver()
        .resolve_on(
            &request(Underlying::FinNifty, ExpiryKind::CurrentWeek, StrikeSelector::Atm, None),
            date(2024, 1, 20),
        )
        .unwrap();
    assert_eq!(resolved.expiry, date(2024, 1, 2));
    assert_eq!(resolved.security_id, 35057);
}

#[test]
fn next_week_at_end_of_horizon_returns_current() {
    let resolved = resolver()
        .resolve_on(
            &request(Underlying::Nifty, ExpiryKind::NextWeek, StrikeSelector::Atm, None),
            date(2024, 2, 1),
        )
        .unwrap();
    assert_eq!(resolved.expiry, date(2024, 2, 29));
}

#[test]
fn monthly_picks_month_end_expiry() {
    let r = resolver();
    let nifty = r
        .resolve_on(
            &request(Underlying::Nifty, ExpiryKind::Monthly, StrikeSelector::Atm, None),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(nifty.expiry, date(2024, 2, 29));
    assert_eq!(nifty.security_id, 35027);

    let banknifty = r
        .resolve_on(
            &request(Underlying::BankNifty, ExpiryKind::Monthly, StrikeSelector::Atm, None),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(banknifty.expiry, date(2024, 1, 31));
}

#[test]
fn monthly_without_month_end_returns_latest_expiry() {
    let resolved = resolver()
        .resolve_on(
            &request(Underlying::FinNifty, ExpiryKind::Monthly, StrikeSelector::Atm, None),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(resolved.expiry, date(2024, 1, 9));
    assert_eq!(resolved.security_id, 35063);
}

#[test]
fn duplicate_rows_resolve_to_first_loaded() {
    let resolved = resolver()
        .resolve_on(
            &request(Underlying::Nifty, ExpiryKind::NextWeek, StrikeSelector::Atm, None),
            date(2024, 1, 1),
        )
        .unwrap();
    assert_eq!(resolved.security_id, 35013);
}

#[test]
fn missing_strike_is_not_substituted() {
    let err = resolver()
        .resolve_on(
            &request(
                Underlying::Nifty,
                ExpiryKind::CurrentWeek,
                StrikeSelector::Itm { value: Some(dec!(3)) },
                None,
            ),
            date(2024, 1, 1),
        )
        .unwrap_err();

    match err {
        ResolveError::InstrumentNotFound { key } => {
            assert_eq!(key.to_string(), "NIFTY|2024-01-04|CE|22350");
        }
        other => panic!("expected InstrumentNotFound, got {other:?}"),
    }
}

#[test]
fn requests_deserialize_from_tool_payloads() {
    let payload = r#"{
        "underlying": "BANKNIFTY",
        "expiry_kind": "monthly",
        "option_type": "PE",
        "strike_selector": { "mode": "ITM", "value": 1 }
    }"#;
    let req: ResolutionRequest = serde_json::from_str(payload).unwrap();
    let resolved = resolver().resolve_on(&req, date(2024, 1, 1)).unwrap();
    assert_eq!(resolved.strike, dec!(46000));
    assert_eq!(resolved.security_id, 35048);
}
