//! Static zoning vocabulary
//!
//! Read-only tables of every designator the parser recognizes:
//!
//! - [`ZONE_CLASSES`] - base zone classes with their land-use category
//! - [`HEIGHT_DISTRICTS`] - full height-district designations (`1`, `1VL`, ...)
//! - [`SUPPLEMENTAL_USES`] - overlay / supplemental-use district tags
//! - [`SPECIFIC_PLANS`] - specific-plan codes
//!
//! Both tag tables carry the description published with each code.
//!
//! Sources: LA City Planning "Guide to the current zoning string", Zoning Code
//! Article 2 and Sec. 12.04 (Zones, Districts, Symbols).
//!
//! Lookups are exact matches against upper-cased tokens. The zone-class table
//! is indexed once into a hash map; the smaller tables are scanned.

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Broad land-use family a zone class belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneCategory {
    Agricultural,
    Residential,
    Commercial,
    Industrial,
    HybridIndustrial,
    Parking,
    OpenSpace,
    PublicFacility,
}

impl ZoneCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ZoneCategory::Agricultural => "agricultural",
            ZoneCategory::Residential => "residential",
            ZoneCategory::Commercial => "commercial",
            ZoneCategory::Industrial => "industrial",
            ZoneCategory::HybridIndustrial => "hybrid-industrial",
            ZoneCategory::Parking => "parking",
            ZoneCategory::OpenSpace => "open-space",
            ZoneCategory::PublicFacility => "public-facility",
        }
    }
}

impl fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Descriptor for one entry of the zone-class table
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ZoneClassInfo {
    pub code: &'static str,
    pub category: ZoneCategory,
}

/// Handle to a known zone class.
///
/// Only obtainable through [`lookup_zone_class`], so holding one proves the
/// class is part of the vocabulary. Serializes as its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneClass(&'static ZoneClassInfo);

impl ZoneClass {
    pub fn code(&self) -> &'static str {
        self.0.code
    }

    pub fn category(&self) -> ZoneCategory {
        self.0.category
    }
}

impl fmt::Display for ZoneClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.code)
    }
}

impl Serialize for ZoneClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.code)
    }
}

macro_rules! zone_classes {
    ($($category:ident => [$($code:literal),* $(,)?]),* $(,)?) => {
        &[$($(ZoneClassInfo { code: $code, category: ZoneCategory::$category },)*)*]
    };
}

/// Every zone class the city publishes, grouped by category
pub static ZONE_CLASSES: &[ZoneClassInfo] = zone_classes![
    Agricultural => ["A1", "A2", "RA"],
    Residential => [
        "RE", "RE40", "RE20", "RE15", "RE11", "RE9", "RS", "R1", "R1F", "R1R", "R1H", "RU",
        "RZ2.5", "RZ3", "RZ4", "RW1", "R2", "RD1.5", "RD2", "RD3", "RD4", "RD5", "RD6", "RMP",
        "RW2", "R3", "RAS3", "R4", "RAS4", "R5",
        // single-family variations
        "R1R3", "R1H1", "R1V1", "R1V2", "R1V3",
    ],
    Commercial => ["CR", "C1", "C1.5", "C2", "C4", "C5", "CM"],
    Industrial => ["MR1", "M1", "MR2", "M2", "M3"],
    Parking => [
        "P", "PB", "R1P", "R2P", "R3P", "R4P", "R5P", "RAP", "RSP",
    ],
    OpenSpace => ["OS", "GW"],
    PublicFacility => ["PF", "FRWY", "SL"],
    HybridIndustrial => ["HJ", "HR", "NI"],
];

/// Full height-district designations, number plus optional limit tier
pub static HEIGHT_DISTRICTS: &[&str] = &["1", "1L", "1VL", "1XL", "1SS", "2", "3", "4"];

/// A suffix tag with the description published alongside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TagInfo {
    pub code: &'static str,
    pub description: &'static str,
}

macro_rules! tags {
    ($($code:literal => $description:literal),* $(,)?) => {
        &[$(TagInfo { code: $code, description: $description },)*]
    };
}

/// Supplemental-use districts (Zoning Code Article 3 / Table 2)
pub static SUPPLEMENTAL_USES: &[TagInfo] = tags![
    "O" => "Oil Drilling District",
    "S" => "Animal Slaughtering District",
    "G" => "Surface Mining District",
    "K" => "Equinekeeping District",
    "CA" => "Commercial and Artcraft District",
    "MU" => "Mixed Use District",
    "FH" => "Fence Height District",
    "SN" => "Sign District",
    "HS" => "Hillside Standards Overlay",
    "RG" => "Rock and Gravel District",
    "RPD" => "Residential Planned Development District",
    "POD" => "Pedestrian Oriented District",
    "CDO" => "Community Design Overlay District",
    "NSO" => "Neighborhood Stabilization Overlay",
    "RFA" => "Residential Floor Area District",
    "MPR" => "Modified Parking Requirement District",
    "RIO" => "River Improvement Overlay District",
    "HCR" => "Hillside Construction Regulation District",
    "CPIO" => "Community Plan Implementation Overlay District",
    "CUGU" => "Clean Up-Green Up Overlay District",
    "HPOZ" => "Historic Preservation Overlay Zone",
    "SP" => "Specific Plan",
    "NMU" => "Neighborhood Mixed Use",
    // Frequent in the city's layer; absent from the code's tables.
    "H" => "Undocumented suffix",
];

// TODO: Warner Center (`(WC)COLLEGE`, ...) and USC (`USC-1A`, ...) plan areas
// need their own token shapes before they can be listed here.
/// Specific-plan codes (Zoning Code Article 2, Sec. 12.04)
pub static SPECIFIC_PLANS: &[TagInfo] = tags![
    "CEC" => "Convention and Event Center Specific Plan",
    "CW" => "Central City West Specific Plan",
    "GM" => "Glencoe/Maxella Specific Plan",
    "OX" => "Oxford Triangle Specific Plan",
    "PV" => "Playa Vista Specific Plan",
    "WC" => "Warner Center Specific Plan",
    "ADP" => "Alameda District Specific Plan",
    "CCS" => "Century City South Specific Plan",
    "CSA" => "Centers Study Area Specific Plan",
    "PKM" => "Park Mile Specific Plan",
    "LAX" => "LAX Specific Plan",
    "LASED" => "Los Angeles Sports and Entertainment District Specific Plan",
    "PVSP" => "Playa Vista Area D Specific Plan",
    "UV" => "University Village Specific Plan",
    "EC" => "Exposition Corridor Specific Plan",
    "PPSP" => "Ponte Vista Specific Plan",
];

static ZONE_CLASS_INDEX: Lazy<HashMap<&'static str, &'static ZoneClassInfo>> =
    Lazy::new(|| ZONE_CLASSES.iter().map(|info| (info.code, info)).collect());

/// Resolve a zone-class token. Matching is exact after upper-casing.
pub fn lookup_zone_class(token: &str) -> Option<ZoneClass> {
    let token = token.trim();
    if let Some(info) = ZONE_CLASS_INDEX.get(token) {
        return Some(ZoneClass(*info));
    }
    ZONE_CLASS_INDEX
        .get(token.to_ascii_uppercase().as_str())
        .map(|info| ZoneClass(*info))
}

/// Iterate every known zone class in table order
pub fn zone_classes() -> impl Iterator<Item = ZoneClass> {
    ZONE_CLASSES.iter().map(ZoneClass)
}

pub fn is_height_district(designation: &str) -> bool {
    HEIGHT_DISTRICTS.contains(&designation)
}

pub fn is_supplemental_use(tag: &str) -> bool {
    find_tag(SUPPLEMENTAL_USES, tag).is_some()
}

pub fn is_specific_plan(code: &str) -> bool {
    find_tag(SPECIFIC_PLANS, code).is_some()
}

/// Description of a supplemental use or specific plan
pub fn describe_tag(tag: &str) -> Option<&'static str> {
    find_tag(SUPPLEMENTAL_USES, tag)
        .or_else(|| find_tag(SPECIFIC_PLANS, tag))
        .map(|info| info.description)
}

fn find_tag(table: &'static [TagInfo], code: &str) -> Option<&'static TagInfo> {
    table.iter().find(|info| info.code == code)
}
