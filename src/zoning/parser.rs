//! Zoning string parser
//!
//! Applies the extraction rules in [`rules`](super::rules) in priority order:
//!
//! 1. qualifier prefixes (`[Q]`, `[T]`, bare letters)
//! 2. zone class, looked up in the vocabulary (the only rule that can fail)
//! 3. height district from the second token, with limit tier and `D` flag
//! 4. suffix tags, claimed by the configured [`TagRule`] priority list
//!
//! Each step consumes what it recognized and hands the rest to the next one.
//! Tokens nobody claims are kept in [`ParsedZoning::unparsed`], never dropped.

use super::error::ZoneParseError;
use super::record::ParsedZoning;
use super::rules::{self, TagRule};
use super::vocabulary;
use crate::config::ParserConfig;
use tracing::trace;

/// Parser for City of Los Angeles zoning strings.
///
/// Holds only the tag-rule priority, so it is cheap to clone and can be
/// shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoningParser {
    tag_rules: Vec<TagRule>,
}

impl ZoningParser {
    /// Parser with an explicit tag-rule priority. Rules left out are disabled.
    pub fn new(tag_rules: impl IntoIterator<Item = TagRule>) -> Self {
        Self {
            tag_rules: tag_rules.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.tag_rules.iter().copied())
    }

    pub fn tag_rules(&self) -> &[TagRule] {
        &self.tag_rules
    }

    /// Parse one zoning string.
    ///
    /// Fails only when the zone-class token is not a known zone class.
    pub fn parse(&self, code: &str) -> Result<ParsedZoning, ZoneParseError> {
        let normalized = rules::normalize(code);
        let (qualifiers, rest) = rules::strip_prefixes(&normalized);

        // The zone class must open the string; empty segments are only
        // skipped after it.
        let mut segments = rest.split('-');
        let zone_token = segments.next().unwrap_or_default();
        let mut tokens = segments.filter(|token| !token.is_empty()).peekable();
        let zone = rules::split_zone_token(zone_token)
            .ok_or_else(|| ZoneParseError::new(code, zone_token))?;
        let zone_class = vocabulary::lookup_zone_class(zone.class)
            .ok_or_else(|| ZoneParseError::new(code, zone.class))?;

        let mut parsed = ParsedZoning::new(zone_class);
        parsed.qualified = qualifiers.qualified;
        parsed.tentative = qualifiers.tentative;

        for plan in zone.attached.into_iter().flatten() {
            if vocabulary::is_specific_plan(plan) && parsed.specific_plan.is_empty() {
                parsed.specific_plan = plan.to_string();
            } else {
                parsed.unparsed.push(format!("({plan})"));
            }
        }

        if let Some(height) = tokens.peek().copied().and_then(rules::match_height_district) {
            parsed.height_district = height.number.to_string();
            parsed.height_limit = height.limit.to_string();
            parsed.development_limit = height.development_limit;
            tokens.next();
        }

        for token in tokens {
            self.claim_tag(&mut parsed, token);
        }

        trace!(code, parsed = %parsed, unparsed = ?parsed.unparsed, "parsed zoning string");
        Ok(parsed)
    }

    fn claim_tag(&self, parsed: &mut ParsedZoning, token: &str) {
        let Some(tag) = rules::split_tag(token) else {
            parsed.unparsed.push(token.to_string());
            return;
        };

        match self.tag_rules.iter().find(|rule| rule.claims(tag)) {
            Some(TagRule::SpecificPlan) if parsed.specific_plan.is_empty() => {
                parsed.specific_plan = tag.to_string();
            }
            Some(TagRule::Overlay) => parsed.overlay.push(tag.to_string()),
            _ => parsed.unparsed.push(token.to_string()),
        }
    }
}

impl Default for ZoningParser {
    fn default() -> Self {
        Self::new(TagRule::DEFAULT_PRIORITY)
    }
}
