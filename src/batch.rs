//! Batch parsing of zoning columns
//!
//! Applies the zoning parser to every row of a dataset column and produces
//! flat, never-null output columns:
//!
//! - rows that parse get the extracted fields, plus any tokens no rule
//!   claimed in `unparsed`
//! - rows whose zone class can't be resolved get the sentinel in every text
//!   column, `false` flags and an empty overlay list, and the batch continues
//! - rows listed in a [`Crosswalk`] get the curated columns instead of the
//!   parser output
//!
//! Distinct codes are parsed once (zoning layers repeat a few thousand codes
//! across hundreds of thousands of parcels) on a rayon pool. Row order always
//! matches input order.

pub mod crosswalk;
pub mod output;

pub use crosswalk::Crosswalk;
pub use output::OutputFormat;

use crate::config::LaplanConfig;
use crate::error::Result;
use crate::zoning::{ParsedZoning, ZoningParser};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::BufRead;
use tracing::{debug, info};

/// Default literal written into text columns of failed rows
pub const DEFAULT_SENTINEL: &str = "failed";

/// Output columns attached to one input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoningColumns {
    #[serde(rename = "ZONE_CMPLT")]
    pub zone_cmplt: String,
    #[serde(rename = "Q", default)]
    pub qualified: bool,
    #[serde(rename = "T", default)]
    pub tentative: bool,
    pub zone_class: String,
    #[serde(default)]
    pub specific_plan: String,
    #[serde(default)]
    pub height_district: String,
    #[serde(default)]
    pub height_limit: String,
    #[serde(rename = "D", default)]
    pub development_limit: bool,
    #[serde(default)]
    pub overlay: Vec<String>,
    /// Tokens the parser could not attribute, in source order
    #[serde(default)]
    pub unparsed: Vec<String>,
}

impl ZoningColumns {
    pub fn from_parsed(code: &str, parsed: &ParsedZoning) -> Self {
        Self {
            zone_cmplt: code.to_string(),
            qualified: parsed.qualified(),
            tentative: parsed.tentative(),
            zone_class: parsed.zone_class().code().to_string(),
            specific_plan: parsed.specific_plan().to_string(),
            height_district: parsed.height_district().to_string(),
            height_limit: parsed.height_limit().to_string(),
            development_limit: parsed.development_limit(),
            overlay: parsed.overlay().to_vec(),
            unparsed: parsed.unparsed().to_vec(),
        }
    }

    /// Uniform failure record: sentinel text, `false` flags, no overlays
    pub fn failed(code: &str, sentinel: &str) -> Self {
        Self {
            zone_cmplt: code.to_string(),
            qualified: false,
            tentative: false,
            zone_class: sentinel.to_string(),
            specific_plan: sentinel.to_string(),
            height_district: sentinel.to_string(),
            height_limit: sentinel.to_string(),
            development_limit: false,
            overlay: Vec::new(),
            unparsed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowStatus {
    Parsed,
    Failed,
    Overridden,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Parsed => "parsed",
            RowStatus::Failed => "failed",
            RowStatus::Overridden => "overridden",
        }
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    #[serde(flatten)]
    pub columns: ZoningColumns,
    pub status: RowStatus,
    /// Parse error message for failed rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub unique: usize,
    pub parsed: usize,
    pub failed: usize,
    pub overridden: usize,
    /// Parsed rows that kept unattributed tokens
    pub incomplete: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
    pub summary: BatchSummary,
}

/// Per-row driver around [`ZoningParser`]
#[derive(Debug, Clone)]
pub struct BatchParser {
    parser: ZoningParser,
    crosswalk: Crosswalk,
    sentinel: String,
    threads: usize,
    dedupe: bool,
}

impl BatchParser {
    pub fn new(parser: ZoningParser) -> Self {
        Self {
            parser,
            crosswalk: Crosswalk::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            threads: 0,
            dedupe: true,
        }
    }

    pub fn from_config(config: &LaplanConfig) -> Self {
        Self::new(ZoningParser::from_config(&config.parser))
            .with_sentinel(config.batch.sentinel.trim())
            .with_threads(config.batch.threads)
            .with_dedupe(config.batch.dedupe)
    }

    pub fn with_crosswalk(mut self, crosswalk: Crosswalk) -> Self {
        self.crosswalk = crosswalk;
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Worker threads; `0` lets rayon decide
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Produce the output row for a single code. Never fails.
    pub fn parse_row(&self, code: &str) -> BatchRow {
        if let Some(columns) = self.crosswalk.get(code) {
            debug!(code, "using crosswalk row");
            return BatchRow {
                columns: ZoningColumns {
                    zone_cmplt: code.to_string(),
                    ..columns.clone()
                },
                status: RowStatus::Overridden,
                error: None,
            };
        }

        match self.parser.parse(code) {
            Ok(parsed) => {
                if !parsed.is_complete() {
                    debug!(code, unparsed = ?parsed.unparsed(), "zoning string has unattributed tokens");
                }
                BatchRow {
                    columns: ZoningColumns::from_parsed(code, &parsed),
                    status: RowStatus::Parsed,
                    error: None,
                }
            }
            Err(err) => {
                debug!(code, error = %err, "zoning string failed to parse");
                BatchRow {
                    columns: ZoningColumns::failed(code, &self.sentinel),
                    status: RowStatus::Failed,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Parse every code, returning rows in input order.
    pub fn run<S>(&self, codes: &[S]) -> Result<BatchReport>
    where
        S: AsRef<str> + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut unique: Vec<&str> = Vec::new();
        for code in codes {
            let code = code.as_ref();
            if !positions.contains_key(code) {
                positions.insert(code, unique.len());
                unique.push(code);
            }
        }

        let rows: Vec<BatchRow> = pool.install(|| {
            if self.dedupe {
                let parsed: Vec<BatchRow> =
                    unique.par_iter().map(|code| self.parse_row(code)).collect();
                codes
                    .iter()
                    .filter_map(|code| positions.get(code.as_ref()))
                    .map(|&index| parsed[index].clone())
                    .collect()
            } else {
                codes
                    .par_iter()
                    .map(|code| self.parse_row(code.as_ref()))
                    .collect()
            }
        });

        let mut summary = BatchSummary {
            total: rows.len(),
            unique: unique.len(),
            ..BatchSummary::default()
        };
        for row in &rows {
            match row.status {
                RowStatus::Parsed if !row.columns.unparsed.is_empty() => {
                    summary.parsed += 1;
                    summary.incomplete += 1;
                }
                RowStatus::Parsed => summary.parsed += 1,
                RowStatus::Failed => summary.failed += 1,
                RowStatus::Overridden => summary.overridden += 1,
            }
        }

        info!(
            total = summary.total,
            unique = summary.unique,
            parsed = summary.parsed,
            failed = summary.failed,
            overridden = summary.overridden,
            incomplete = summary.incomplete,
            "batch complete"
        );
        Ok(BatchReport { rows, summary })
    }
}

impl Default for BatchParser {
    fn default() -> Self {
        Self::new(ZoningParser::default())
    }
}

/// Read one zoning code per line, skipping blank lines
pub fn read_codes(reader: impl BufRead) -> Result<Vec<String>> {
    let mut codes = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let code = line.trim();
        if !code.is_empty() {
            codes.push(code.to_string());
        }
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_row_uses_sentinel_everywhere() {
        let row = BatchParser::default().parse_row("ZZ9-1");
        assert_eq!(row.status, RowStatus::Failed);
        assert_eq!(row.columns, ZoningColumns::failed("ZZ9-1", "failed"));
        assert_eq!(row.columns.zone_class, "failed");
        assert_eq!(row.columns.height_district, "failed");
        assert!(row.columns.overlay.is_empty());
        assert!(row.error.as_deref().unwrap_or_default().contains("ZZ9"));
    }

    #[test]
    fn parsed_row_copies_fields() {
        let row = BatchParser::default().parse_row("[Q]C1.5-1VLD-RIO");
        assert_eq!(row.status, RowStatus::Parsed);
        assert!(row.columns.qualified);
        assert_eq!(row.columns.zone_class, "C1.5");
        assert_eq!(row.columns.height_district, "1");
        assert_eq!(row.columns.height_limit, "VL");
        assert!(row.columns.development_limit);
        assert_eq!(row.columns.overlay, ["RIO"]);
        assert_eq!(row.error, None);
    }

    #[test]
    fn parsed_row_keeps_unattributed_tokens() {
        let report = BatchParser::default().run(&["C2-1-XX-SP"][..]).unwrap();
        let row = &report.rows[0];
        assert_eq!(row.status, RowStatus::Parsed);
        assert_eq!(row.columns.overlay, ["SP"]);
        assert_eq!(row.columns.unparsed, ["XX"]);
        assert_eq!(report.summary.incomplete, 1);

        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["unparsed"], serde_json::json!(["XX"]));
    }

    #[test]
    fn custom_sentinel() {
        let row = BatchParser::default().with_sentinel("n/a").parse_row("nonsense");
        assert_eq!(row.columns.specific_plan, "n/a");
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let codes = ["C2-1-SP", "ZZ9-1", "R1-1"];
        let report = BatchParser::default().run(&codes[..]).unwrap();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].status, RowStatus::Parsed);
        assert_eq!(report.rows[1].status, RowStatus::Failed);
        assert_eq!(report.rows[2].status, RowStatus::Parsed);
        assert_eq!(
            report.summary,
            BatchSummary {
                total: 3,
                unique: 3,
                parsed: 2,
                failed: 1,
                overridden: 0,
                incomplete: 0,
            }
        );
    }

    #[test]
    fn duplicates_are_expanded_in_input_order() {
        let codes = vec!["R1-1", "C2-1", "R1-1", "C2-1", "R1-1"];
        let report = BatchParser::default().with_threads(2).run(&codes[..]).unwrap();
        let zones: Vec<_> = report.rows.iter().map(|r| r.columns.zone_class.as_str()).collect();
        assert_eq!(zones, ["R1", "C2", "R1", "C2", "R1"]);
        assert_eq!(report.summary.unique, 2);
        assert_eq!(report.summary.total, 5);
    }

    #[test]
    fn dedupe_off_gives_same_rows() {
        let codes = vec!["R1-1", "ZZ9", "R1-1", "OS"];
        let with = BatchParser::default().run(&codes[..]).unwrap();
        let without = BatchParser::default().with_dedupe(false).run(&codes[..]).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn reads_codes_skipping_blank_lines() {
        let input = "C2-1-SP\n\n  R1-1  \r\n\t\nOS\n";
        let codes = read_codes(input.as_bytes()).unwrap();
        assert_eq!(codes, ["C2-1-SP", "R1-1", "OS"]);
    }

    #[test]
    fn row_serializes_flat() {
        let row = BatchParser::default().parse_row("C2-1-SP");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["ZONE_CMPLT"], "C2-1-SP");
        assert_eq!(json["status"], "parsed");
        assert!(json.get("error").is_none());
        assert!(json.get("columns").is_none());
    }
}
