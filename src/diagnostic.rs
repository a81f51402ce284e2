use std::fmt;

use serde::Serialize;

use crate::{
    check::{Check, CheckLogger},
    domain::{Config, Need, Needs},
};

/// A single warning raised by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The check that raised the warning, if it was run through
    /// [`Diagnostics::run`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<Check>,
    /// ID of the need the warning is about.
    pub need: String,
    /// The option (field) of the need the warning is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    /// Where the need is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The user-facing message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}", self.need)?;
        if let Some(option) = &self.option {
            write!(f, ".{option}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A [`CheckLogger`] that collects warnings in memory.
#[derive(Debug, Default)]
pub struct Diagnostics {
    current: Option<Check>,
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            diagnostics: Vec::new(),
        }
    }

    /// Runs a check, attributing every warning it emits to that check.
    ///
    /// Returns the number of warnings emitted.
    pub fn run(&mut self, check: Check, needs: &Needs, config: &Config) -> usize {
        self.current = Some(check);
        let warnings = check.run(needs, config, self);
        self.current = None;
        warnings
    }

    /// The collected diagnostics, in the order they were emitted.
    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The number of diagnostics raised by the given check.
    #[must_use]
    pub fn count_for(&self, check: Check) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.check == Some(check))
            .count()
    }

    /// The number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether no diagnostics were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consumes the collection, returning the diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn push(&mut self, need: &Need, option: Option<&str>, message: &str) {
        self.diagnostics.push(Diagnostic {
            check: self.current,
            need: need.id().to_string(),
            option: option.map(ToString::to_string),
            location: need.location(),
            message: message.to_string(),
        });
    }
}

impl CheckLogger for Diagnostics {
    fn warning_for_option(&mut self, need: &Need, option: &str, message: &str) {
        self.push(need, Some(option), message);
    }

    fn warning_for_need(&mut self, need: &Need, message: &str) {
        self.push(need, None, message);
    }
}

/// A [`CheckLogger`] that emits every warning as a `tracing` event.
#[derive(Debug, Default, Clone)]
pub struct TracingLogger {
    warnings: usize,
}

impl TracingLogger {
    /// Creates a logger that has not emitted anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { warnings: 0 }
    }

    /// The number of warnings emitted so far.
    #[must_use]
    pub const fn warnings(&self) -> usize {
        self.warnings
    }
}

impl CheckLogger for TracingLogger {
    fn warning_for_option(&mut self, need: &Need, option: &str, message: &str) {
        self.warnings += 1;
        tracing::warn!(
            need = need.id(),
            option,
            location = need.location().as_deref(),
            "{message}"
        );
    }

    fn warning_for_need(&mut self, need: &Need, message: &str) {
        self.warnings += 1;
        tracing::warn!(
            need = need.id(),
            location = need.location().as_deref(),
            "{message}"
        );
    }
}
