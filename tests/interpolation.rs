//! NPSHr 기준 곡선 보간/외삽 회귀 테스트.
use pump_cavitation_analyzer::cavitation::analysis::analyze;
use pump_cavitation_analyzer::cavitation::curve::NpshrCurve;
use pump_cavitation_analyzer::csv_import::layout::{RawRow, RawTable};

fn curve_table(rows: &[(&str, &str)]) -> RawTable {
    RawTable {
        headers: vec!["Flow (m3/h)".to_string(), "NPSHr (m)".to_string()],
        rows: rows
            .iter()
            .enumerate()
            .map(|(i, (flow, npshr))| RawRow {
                line: i + 2,
                fields: vec![flow.to_string(), npshr.to_string()],
            })
            .collect(),
    }
}

#[test]
fn interpolation_is_exact_at_curve_points() {
    let curve = NpshrCurve::from_table(&curve_table(&[
        ("120", "11"),
        ("50", "8"),
        ("200", "14"),
    ]))
    .expect("curve");
    for &(flow, npshr) in &[(50.0, 8.0), (120.0, 11.0), (200.0, 14.0)] {
        assert!((curve.npshr_at(flow) - npshr).abs() < 1e-12);
    }
}

#[test]
fn interpolation_matches_linear_curve() {
    // npshr = 0.04 * flow + 6 으로 정의된 두 점 사이에서 선형성이 유지돼야 한다.
    let curve = NpshrCurve::from_table(&curve_table(&[("50", "8"), ("200", "14")])).expect("curve");
    for flow in [60.0, 100.0, 150.0, 199.0] {
        let expected = 0.04 * flow + 6.0;
        assert!(
            (curve.npshr_at(flow) - expected).abs() < 1e-9,
            "flow={flow}"
        );
    }
}

#[test]
fn extrapolation_is_flat_at_both_ends() {
    let curve = NpshrCurve::from_table(&curve_table(&[("50", "8"), ("200", "14")])).expect("curve");
    assert!((curve.npshr_at(10.0) - 8.0).abs() < 1e-12);
    assert!((curve.npshr_at(49.9) - 8.0).abs() < 1e-12);
    assert!((curve.npshr_at(300.0) - 14.0).abs() < 1e-12);
}

#[test]
fn unsorted_curve_rows_are_sorted_by_flow() {
    let curve = NpshrCurve::from_table(&curve_table(&[("200", "14"), ("50", "8")])).expect("curve");
    assert!((curve.npshr_at(100.0) - 10.0).abs() < 1e-9);
    let flows: Vec<f64> = curve.points().iter().map(|p| p.flow_m3_per_h).collect();
    assert_eq!(flows, vec![50.0, 200.0]);
}

#[test]
fn duplicate_flow_first_occurrence_wins() {
    // 같은 유량이 중복되면 안정 정렬 덕에 먼저 나온 점의 값이 반환된다.
    let curve =
        NpshrCurve::from_table(&curve_table(&[("100", "5"), ("100", "7"), ("50", "4")]))
            .expect("curve");
    assert!((curve.npshr_at(100.0) - 5.0).abs() < 1e-12);
}

#[test]
fn invalid_curve_rows_are_skipped() {
    let curve = NpshrCurve::from_table(&curve_table(&[
        ("50", "8"),
        ("abc", "9"),
        ("200", "14"),
    ]))
    .expect("curve");
    assert_eq!(curve.points().len(), 2);
}

#[test]
fn sectioned_input_interpolates_and_extrapolates() {
    // 유량 100은 (50,8)~(200,14) 사이 보간으로 10.0, 300은 평탄 외삽으로 14.0.
    let text = "#operating data\n\
                Temperature,Pressure,Flow Rate,NPSHa\n\
                20,5,100,12\n\
                20,5,300,15\n\
                #npshr curve\n\
                Flow (m3/h),NPSHr (m)\n\
                50,8\n\
                200,14\n";
    let result = analyze(text).expect("parse");
    assert_eq!(result.records.len(), 2);
    assert!((result.records[0].npshr_m - 10.0).abs() < 1e-9);
    assert!((result.records[1].npshr_m - 14.0).abs() < 1e-9);
    assert!(result.records[0].is_safe);
    assert!(result.records[1].is_safe);
}

#[test]
fn curve_value_overrides_operating_npshr_column() {
    let text = "#operating data\n\
                Temperature,Pressure,Flow Rate,NPSHr,NPSHa\n\
                20,5,100,99,12\n\
                #npshr curve\n\
                Flow (m3/h),NPSHr (m)\n\
                50,8\n\
                200,14\n";
    let result = analyze(text).expect("parse");
    assert_eq!(result.records.len(), 1);
    assert!((result.records[0].npshr_m - 10.0).abs() < 1e-9);
}
