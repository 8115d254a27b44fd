//! Extraction rules for zoning strings
//!
//! Each rule looks at a prefix or a single hyphen-delimited token and reports
//! what it recognized, borrowing from the input. The parser applies them in a
//! fixed order:
//!
//! 1. [`strip_prefixes`] - `[Q]`/`(Q)`/`Q` and `[T]`/`(T)`/`T` markers
//! 2. [`split_zone_token`] - zone class with optional `(PLAN)` before or after
//! 3. [`match_height_district`] - `1`, `1VL`, `2D`, `1XLD`, ...
//! 4. [`split_tag`] + [`TagRule`] - overlays and specific plans
//!
//! Rules never fail; a rule that does not apply returns `None` and the token is
//! left for the next one.

use super::vocabulary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading qualifier marker, bracketed, parenthesized or bare
static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\[(?P<bracketed>[QT])\]|\((?P<paren>[QT])\)|(?P<bare>[QT]))").unwrap());

/// Zone-class token with an optional parenthesized specific plan on either side
static ZONE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\((?P<lead>[A-Z0-9]+)\))?(?P<class>[A-Z0-9.]+)(?:\((?P<trail>[A-Z0-9]+)\))?$")
        .unwrap()
});

/// Height district: number followed by optional letters (limit tier and/or `D`)
static HEIGHT_DISTRICT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<number>[0-9]+)(?P<letters>[A-Z]*)$").unwrap());

/// Short tag code, optionally wrapped in brackets or parentheses
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[(?P<bracketed>[A-Z0-9]+)\]|\((?P<paren>[A-Z0-9]+)\)|(?P<bare>[A-Z0-9]+))$")
        .unwrap()
});

/// Upper-case the code and drop all whitespace
pub fn normalize(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Qualifier markers found at the start of a zoning string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers {
    pub qualified: bool,
    pub tentative: bool,
}

/// Strip up to two leading `Q`/`T` markers.
///
/// A marker is only taken when zone text follows it directly, so a lone `T`,
/// a `T-...` or a `[Q]-...` is left for the zone-class rule to reject.
pub fn strip_prefixes(code: &str) -> (Qualifiers, &str) {
    let mut qualifiers = Qualifiers::default();
    let mut rest = code;

    for _ in 0..2 {
        let Some(caps) = PREFIX_RE.captures(rest) else {
            break;
        };
        let marker = caps.get(0).map_or(0, |m| m.end());
        let after = &rest[marker..];
        if after.is_empty() || after.starts_with('-') {
            break;
        }

        let letter = caps
            .name("bracketed")
            .or_else(|| caps.name("paren"))
            .or_else(|| caps.name("bare"))
            .map(|m| m.as_str());
        match letter {
            Some("Q") => qualifiers.qualified = true,
            Some("T") => qualifiers.tentative = true,
            _ => break,
        }
        rest = after;
    }

    (qualifiers, rest)
}

/// Pieces of the zone-class token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneToken<'a> {
    pub class: &'a str,
    /// Parenthesized codes attached to the class, leading one first
    pub attached: [Option<&'a str>; 2],
}

/// Split `(WC)R1`, `C2(CEC)` or plain `C2` into class and attached codes.
/// Returns `None` when the token does not have a zone-class shape at all.
pub fn split_zone_token(token: &str) -> Option<ZoneToken<'_>> {
    let caps = ZONE_TOKEN_RE.captures(token)?;
    Some(ZoneToken {
        class: caps.name("class")?.as_str(),
        attached: [
            caps.name("lead").map(|m| m.as_str()),
            caps.name("trail").map(|m| m.as_str()),
        ],
    })
}

/// A recognized height-district token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightDistrict<'a> {
    pub number: &'a str,
    pub limit: &'a str,
    pub development_limit: bool,
}

/// Match `1`, `1L`, `1VLD`, `2D`, ... A trailing `D` is the development
/// limitation flag; any other letters are the limit tier.
pub fn match_height_district(token: &str) -> Option<HeightDistrict<'_>> {
    let caps = HEIGHT_DISTRICT_RE.captures(token)?;
    let number = caps.name("number")?.as_str();
    let letters = caps.name("letters").map_or("", |m| m.as_str());
    let (limit, development_limit) = match letters.strip_suffix('D') {
        Some(limit) => (limit, true),
        None => (letters, false),
    };
    Some(HeightDistrict {
        number,
        limit,
        development_limit,
    })
}

/// Unwrap `[SP]`, `(CEC)` or `RIO` to the bare tag code
pub fn split_tag(token: &str) -> Option<&str> {
    let caps = TAG_RE.captures(token)?;
    caps.name("bracketed")
        .or_else(|| caps.name("paren"))
        .or_else(|| caps.name("bare"))
        .map(|m| m.as_str())
}

/// A rule that can claim a suffix tag.
///
/// The parser tries rules in a configured priority order and the first one
/// whose vocabulary contains the tag claims it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagRule {
    SpecificPlan,
    Overlay,
}

impl TagRule {
    pub const DEFAULT_PRIORITY: [TagRule; 2] = [TagRule::SpecificPlan, TagRule::Overlay];

    pub fn claims(&self, tag: &str) -> bool {
        match self {
            TagRule::SpecificPlan => vocabulary::is_specific_plan(tag),
            TagRule::Overlay => vocabulary::is_supplemental_use(tag),
        }
    }
}

impl fmt::Display for TagRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRule::SpecificPlan => f.write_str("specific-plan"),
            TagRule::Overlay => f.write_str("overlay"),
        }
    }
}
