//! 판정/집계/상태 컨테이너 회귀 테스트.
use pump_cavitation_analyzer::cavitation::analysis::{
    analyze, analyze_with_diagnostics, AnalysisState,
};
use pump_cavitation_analyzer::csv_import::layout::SkipReason;
use pump_cavitation_analyzer::envelope::{FlowBand, PumpEnvelope};

#[test]
fn equal_npsha_and_npshr_counts_as_safe() {
    let text = "Temperature,Pressure,Flow,NPSHr,NPSHa\n20,5,100,10,10\n";
    let result = analyze(text).expect("parse");
    assert!(result.records[0].is_safe);
    assert_eq!(result.safe_count, 1);
}

#[test]
fn counts_sum_to_record_length() {
    let text = "Temperature,Pressure,Flow,NPSHr,NPSHa\n\
                20,5,100,10,12\n\
                25,5,120,10,9\n\
                30,5,140,10,8\n";
    let result = analyze(text).expect("parse");
    assert_eq!(result.safe_count + result.unsafe_count, result.records.len());
    assert_eq!(result.total(), 3);
}

#[test]
fn risk_percentage_rounds_to_one_decimal() {
    // 3건 중 1건 위험 → 33.333…% → 33.3%
    let text = "Temperature,Pressure,Flow,NPSHr,NPSHa\n\
                20,5,100,10,12\n\
                25,5,120,10,9\n\
                30,5,140,10,18\n";
    let result = analyze(text).expect("parse");
    assert_eq!(result.unsafe_count, 1);
    assert!((result.risk_percentage() - 33.3).abs() < 1e-9);
}

#[test]
fn risk_percentage_is_zero_for_empty_set() {
    let text = "#npshr curve\nFlow (m3/h),NPSHr (m)\n50,8\n";
    let result = analyze(text).expect("parse");
    assert_eq!(result.total(), 0);
    assert!((result.risk_percentage() - 0.0).abs() < 1e-12);
}

#[test]
fn analyze_and_diagnostics_variant_agree() {
    let text = "Temperature,Pressure,Flow,NPSHr,NPSHa\n20,5,100,10,12\n30,5,bad,10,9\n";
    let plain = analyze(text).expect("parse");
    let (with_diag, skips) = analyze_with_diagnostics(text).expect("parse");
    assert_eq!(plain.safe_count, with_diag.safe_count);
    assert_eq!(plain.unsafe_count, with_diag.unsafe_count);
    assert_eq!(plain.records.len(), with_diag.records.len());
    assert_eq!(skips, vec![SkipReason::InvalidNumber { line: 3 }]);
}

#[test]
fn diagnostics_enumerate_each_dropped_row() {
    let text = "Temperature,Pressure,Flow,NPSHr,NPSHa\n\
                20,5,100,10\n\
                30,5,oops,10,9\n\
                40,5,100,10,12\n";
    let (result, skips) = analyze_with_diagnostics(text).expect("parse");
    assert_eq!(result.records.len(), 1);
    assert_eq!(
        skips,
        vec![
            SkipReason::WidthMismatch {
                line: 2,
                expected: 5,
                found: 4
            },
            SkipReason::InvalidNumber { line: 3 },
        ]
    );
}

#[test]
fn state_replaces_results_wholesale() {
    let mut state = AnalysisState::new();
    assert!(state.current().is_none());

    let first = analyze("Temperature,Pressure,Flow,NPSHr,NPSHa\n20,5,100,10,12\n").expect("parse");
    state.replace(first);
    assert_eq!(state.current().expect("loaded").total(), 1);

    let second = analyze(
        "Temperature,Pressure,Flow,NPSHr,NPSHa\n20,5,100,10,12\n30,5,120,10,9\n",
    )
    .expect("parse");
    state.replace(second);
    assert_eq!(state.current().expect("replaced").total(), 2);

    state.clear();
    assert!(state.current().is_none());
}

#[test]
fn envelope_band_classifies_with_inclusive_bounds() {
    let env = PumpEnvelope {
        pump_type: "Centrifugal".to_string(),
        rated_flow_m3_per_h: 100.0,
        aor_min_m3_per_h: 50.0,
        aor_max_m3_per_h: 150.0,
        por_min_m3_per_h: 80.0,
        por_max_m3_per_h: 120.0,
        rated_npshr_m: 10.0,
    };
    assert_eq!(env.band(100.0), FlowBand::Preferred);
    assert_eq!(env.band(80.0), FlowBand::Preferred);
    assert_eq!(env.band(120.0), FlowBand::Preferred);
    assert_eq!(env.band(60.0), FlowBand::Allowable);
    assert_eq!(env.band(150.0), FlowBand::Allowable);
    assert_eq!(env.band(160.0), FlowBand::Outside);
    assert_eq!(env.band(10.0), FlowBand::Outside);
}
