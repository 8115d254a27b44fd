//! Error type for zoning string parsing

use thiserror::Error;

/// The zone-class segment of a zoning string is not in the vocabulary.
///
/// This is the only way a parse can fail; every other irregularity is
/// absorbed into defaults or the unparsed remainder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("couldn't resolve zone class `{token}` in zoning string `{code}`")]
pub struct ZoneParseError {
    /// The zoning string as given by the caller
    pub code: String,
    /// The candidate zone-class token that failed the lookup
    pub token: String,
}

impl ZoneParseError {
    pub fn new(code: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            token: token.into(),
        }
    }
}
