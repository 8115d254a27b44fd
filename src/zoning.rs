//! Zoning string parsing
//!
//! Decomposes a City of Los Angeles zoning string such as `[Q]C1.5-1VLD-RIO`
//! into its components:
//!
//! ```text
//! [Q]   C1.5   -   1     VL     D    -  RIO
//! │     │          │     │      │       └─ overlay (supplemental use)
//! │     │          │     │      └─ development limitation
//! │     │          │     └─ height limit tier
//! │     │          └─ height district
//! │     └─ zone class
//! └─ qualified / tentative prefix
//! ```
//!
//! See <https://planning.lacity.org/zoning/guide-current-zoning-string>.
//!
//! [`parse`] uses the default tag-rule priority; build a [`ZoningParser`] to
//! change it.

pub mod error;
pub mod parser;
pub mod record;
pub mod rules;
pub mod vocabulary;

pub use error::ZoneParseError;
pub use parser::ZoningParser;
pub use record::ParsedZoning;
pub use rules::TagRule;
pub use vocabulary::{ZoneCategory, ZoneClass};

use once_cell::sync::Lazy;

static DEFAULT_PARSER: Lazy<ZoningParser> = Lazy::new(ZoningParser::default);

/// Parse one zoning string with the default rules
pub fn parse(code: &str) -> Result<ParsedZoning, ZoneParseError> {
    DEFAULT_PARSER.parse(code)
}
