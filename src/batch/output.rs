//! Rendering of batch rows
//!
//! - `json` - pretty-printed array of row objects
//! - `yaml` - sequence of row mappings
//! - `tsv` - one header line plus one line per row; flags as `1`/`0`,
//!   overlays and unparsed tokens joined with `", "`

use super::BatchRow;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TSV_HEADER: [&str; 11] = [
    "ZONE_CMPLT",
    "Q",
    "T",
    "zone_class",
    "specific_plan",
    "height_district",
    "height_limit",
    "D",
    "overlay",
    "unparsed",
    "status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Tsv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Yaml, OutputFormat::Tsv];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown output format '{}' (expected json, yaml or tsv)", s))
    }
}

/// Serialize any value as JSON or YAML. `tsv` falls back to JSON since only
/// batch rows have a tabular shape.
pub fn render_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json | OutputFormat::Tsv => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            Ok(json)
        }
    }
}

pub fn render_rows(rows: &[BatchRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tsv => Ok(render_tsv(rows)),
        _ => render_value(rows, format),
    }
}

pub fn render_tsv(rows: &[BatchRow]) -> String {
    let mut out = TSV_HEADER.join("\t");
    out.push('\n');
    for row in rows {
        let columns = &row.columns;
        let fields = [
            cell(&columns.zone_cmplt),
            flag(columns.qualified).to_string(),
            flag(columns.tentative).to_string(),
            cell(&columns.zone_class),
            cell(&columns.specific_plan),
            cell(&columns.height_district),
            cell(&columns.height_limit),
            flag(columns.development_limit).to_string(),
            cell(&columns.overlay.join(", ")),
            cell(&columns.unparsed.join(", ")),
            row.status.as_str().to_string(),
        ];
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }
    out
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Keep a value on one TSV cell
fn cell(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}
