//! Batch runs over a zoning column and the rendered output

use laplan::batch::{output, BatchParser, Crosswalk, OutputFormat, RowStatus};
use laplan::zoning;
use rstest::rstest;

const COLUMN: [&str; 4] = [
    "[Q]C1.5-1VLD-RIO",
    "ZZ9-1",
    "C2(CEC)-2D-CDO-HPOZ",
    "[Q]C1.5-1VLD-RIO",
];

#[test]
fn tsv_mixed_rows() {
    let report = BatchParser::default().run(&COLUMN[..]).unwrap();
    let tsv = output::render_rows(&report.rows, OutputFormat::Tsv).unwrap();
    insta::assert_snapshot!("tsv_mixed_rows", tsv);
}

#[test]
fn summary_counts_rows_and_distinct_codes() {
    let report = BatchParser::default().run(&COLUMN[..]).unwrap();
    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.unique, 3);
    assert_eq!(report.summary.parsed, 3);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.overridden, 0);
}

#[rstest]
#[case(1, true)]
#[case(4, true)]
#[case(4, false)]
#[case(0, false)]
fn rows_follow_input_order(#[case] threads: usize, #[case] dedupe: bool) {
    let codes: Vec<String> = (0..200)
        .map(|i| match i % 5 {
            0 => format!("R1-{}", i % 4 + 1),
            1 => "[T]RD2-1XL-CDO".to_string(),
            2 => format!("BAD{i}"),
            3 => "(Q)C4-2D".to_string(),
            _ => format!("M{}-1", i % 3 + 1),
        })
        .collect();

    let report = BatchParser::default()
        .with_threads(threads)
        .with_dedupe(dedupe)
        .run(&codes[..])
        .unwrap();

    assert_eq!(report.rows.len(), codes.len());
    for (row, code) in report.rows.iter().zip(&codes) {
        assert_eq!(&row.columns.zone_cmplt, code);
    }
    assert_eq!(report.summary.failed, 40);
}

#[test]
fn sentinel_never_parses_as_a_zone_class() {
    let batch = BatchParser::default().with_sentinel("failed");
    let row = batch.parse_row("R9-1");
    assert_eq!(row.status, RowStatus::Failed);
    assert!(zoning::parse(&row.columns.zone_class).is_err());
}

#[test]
fn crosswalk_rows_replace_parser_output() {
    let crosswalk = Crosswalk::from_json_str(
        r#"[{"ZONE_CMPLT": "ZZ9-1", "zone_class": "R1", "height_district": "1"}]"#,
    )
    .unwrap();
    let report = BatchParser::default()
        .with_crosswalk(crosswalk)
        .run(&COLUMN[..])
        .unwrap();

    let fixed = &report.rows[1];
    assert_eq!(fixed.status, RowStatus::Overridden);
    assert_eq!(fixed.columns.zone_cmplt, "ZZ9-1");
    assert_eq!(fixed.columns.zone_class, "R1");
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.summary.overridden, 1);
}

#[test]
fn failed_rows_carry_the_parse_error() {
    let report = BatchParser::default().run(&["ZZ9-1"][..]).unwrap();
    let json = output::render_rows(&report.rows, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["status"], "failed");
    assert_eq!(value[0]["overlay"], serde_json::json!([]));
    assert!(value[0]["error"].as_str().unwrap().contains("ZZ9"));
}

#[test]
fn unattributed_tokens_reach_every_format() {
    let report = BatchParser::default().run(&["C2-1-XX-SP"][..]).unwrap();

    let json = output::render_rows(&report.rows, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["unparsed"], serde_json::json!(["XX"]));

    let tsv = output::render_rows(&report.rows, OutputFormat::Tsv).unwrap();
    let row = tsv.lines().nth(1).unwrap();
    assert_eq!(row, "C2-1-XX-SP\t0\t0\tC2\t\t1\t\t0\tSP\tXX\tparsed");
}
