//! The structured result of parsing one zoning string

use super::vocabulary::{self, ZoneClass};
use serde::Serialize;
use std::fmt;

/// Components extracted from one zoning string.
///
/// Built by [`ZoningParser`](super::ZoningParser) and read-only afterwards.
/// Serialized field names follow the column names used downstream (`Q`, `T`,
/// `D`, `zone_class`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedZoning {
    #[serde(rename = "Q")]
    pub(crate) qualified: bool,
    #[serde(rename = "T")]
    pub(crate) tentative: bool,
    pub(crate) zone_class: ZoneClass,
    pub(crate) specific_plan: String,
    pub(crate) height_district: String,
    pub(crate) height_limit: String,
    #[serde(rename = "D")]
    pub(crate) development_limit: bool,
    pub(crate) overlay: Vec<String>,
    pub(crate) unparsed: Vec<String>,
}

impl ParsedZoning {
    pub(crate) fn new(zone_class: ZoneClass) -> Self {
        Self {
            qualified: false,
            tentative: false,
            zone_class,
            specific_plan: String::new(),
            height_district: String::new(),
            height_limit: String::new(),
            development_limit: false,
            overlay: Vec::new(),
            unparsed: Vec::new(),
        }
    }

    /// `[Q]` prefix: the zone carries permanent conditions
    pub fn qualified(&self) -> bool {
        self.qualified
    }

    /// `[T]` prefix: the zone change is tentative
    pub fn tentative(&self) -> bool {
        self.tentative
    }

    pub fn zone_class(&self) -> ZoneClass {
        self.zone_class
    }

    pub fn specific_plan(&self) -> &str {
        &self.specific_plan
    }

    /// Height district number, e.g. `1` for `1VLD`
    pub fn height_district(&self) -> &str {
        &self.height_district
    }

    /// Limit tier following the height district number, e.g. `VL` for `1VLD`
    pub fn height_limit(&self) -> &str {
        &self.height_limit
    }

    /// `D` suffix on the height district: development limitation applies
    pub fn development_limit(&self) -> bool {
        self.development_limit
    }

    /// Overlay tags in source order
    pub fn overlay(&self) -> &[String] {
        &self.overlay
    }

    /// Tokens no rule recognized, in source order
    pub fn unparsed(&self) -> &[String] {
        &self.unparsed
    }

    /// Height district number and limit tier together, e.g. `1VL`
    pub fn full_height_district(&self) -> String {
        format!("{}{}", self.height_district, self.height_limit)
    }

    /// Whether the full height-district designation is in the city's table.
    /// Absent height districts count as known.
    pub fn has_known_height_district(&self) -> bool {
        self.height_district.is_empty()
            || vocabulary::is_height_district(&self.full_height_district())
    }

    /// True when every token of the source string was claimed by a rule
    pub fn is_complete(&self) -> bool {
        self.unparsed.is_empty()
    }
}

/// Canonical zoning string, e.g. `[T][Q]C2(CEC)-1VLD-CDO-RIO`.
/// The unparsed remainder is not rendered.
impl fmt::Display for ParsedZoning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tentative {
            f.write_str("[T]")?;
        }
        if self.qualified {
            f.write_str("[Q]")?;
        }
        write!(f, "{}", self.zone_class)?;
        if !self.specific_plan.is_empty() {
            write!(f, "({})", self.specific_plan)?;
        }
        if !self.height_district.is_empty() {
            write!(f, "-{}{}", self.height_district, self.height_limit)?;
            if self.development_limit {
                f.write_str("D")?;
            }
        }
        for tag in &self.overlay {
            write!(f, "-{}", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoning::vocabulary::lookup_zone_class;

    fn record(zone: &str) -> ParsedZoning {
        ParsedZoning::new(lookup_zone_class(zone).unwrap())
    }

    #[test]
    fn renders_canonical_form() {
        let mut parsed = record("C2");
        parsed.qualified = true;
        parsed.tentative = true;
        parsed.specific_plan = "CEC".to_string();
        parsed.height_district = "1".to_string();
        parsed.height_limit = "VL".to_string();
        parsed.development_limit = true;
        parsed.overlay = vec!["CDO".to_string(), "RIO".to_string()];
        assert_eq!(parsed.to_string(), "[T][Q]C2(CEC)-1VLD-CDO-RIO");
    }

    #[test]
    fn bare_zone_class_renders_alone() {
        assert_eq!(record("OS").to_string(), "OS");
    }

    #[test]
    fn height_district_table_check() {
        let mut parsed = record("R1");
        assert!(parsed.has_known_height_district());
        parsed.height_district = "1".to_string();
        parsed.height_limit = "XL".to_string();
        assert!(parsed.has_known_height_district());
        parsed.height_district = "9".to_string();
        assert!(!parsed.has_known_height_district());
    }

    #[test]
    fn serializes_with_column_names() {
        let mut parsed = record("C2");
        parsed.height_district = "1".to_string();
        parsed.overlay = vec!["SP".to_string()];
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["Q"], false);
        assert_eq!(json["D"], false);
        assert_eq!(json["zone_class"], "C2");
        assert_eq!(json["overlay"], serde_json::json!(["SP"]));
    }
}
