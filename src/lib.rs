//! Compliance checks for sphinx-needs documentation
//!
//! Needs are documentation items (requirements, workflows, work products)
//! cross-referenced through link fields. This crate checks that standard
//! requirements and work products are covered by compliance links and that
//! every work product is produced by exactly one workflow.

pub mod domain;
pub use domain::{Config, Need, NeedType, Needs, StandardPrefix};

pub mod select;

pub mod check;
pub use check::{Check, CheckLogger};

/// Diagnostics and [`CheckLogger`] implementations.
pub mod diagnostic;
pub use diagnostic::{Diagnostic, Diagnostics, TracingLogger};

pub mod report;
pub use report::Chart;

/// Loading needs from a sphinx-needs JSON export.
pub mod storage;
pub use storage::{LoadError, NeedsFile};
