//! Domain models for compliance checking.
//!
//! This module contains the need record, the collection of needs supplied
//! per build, the standard prefixes, and configuration.

/// The need record and its type.
pub mod need;
pub use need::{Need, NeedType};

/// The collection of needs.
pub mod needs;
pub use needs::Needs;

mod prefix;
pub use prefix::{StandardPrefix, UnknownPrefixError};

/// Configuration loading and defaults.
pub mod config;
pub use config::Config;
