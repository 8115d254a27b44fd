//! # laplan
//!
//! Utilities for City of Los Angeles planning and zoning data.
//!
//! - [`zoning`] parses zoning strings such as `[Q]C1.5-1VLD-RIO` into typed
//!   components
//! - [`batch`] applies the parser to whole dataset columns, with failure
//!   sentinels, a manual-fix crosswalk and parallel execution
//! - [`config`] loads the layered TOML configuration
//! - [`logging`] installs the `tracing` subscriber used by the binary

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod zoning;

pub use error::{Error, Result};
