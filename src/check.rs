//! Graph consistency checks.
//!
//! Each check takes the whole collection of needs and reports violations to a
//! [`CheckLogger`]. Checks are independent of each other and keep no state
//! between calls, so they can be run in any order and any number of times.
//!
//! Every check returns the number of warnings it emitted. Zero means the
//! invariant holds.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use tracing::instrument;

use crate::{
    domain::{Config, Need, Needs},
    select,
};

/// A sink for the warnings produced by the checks.
pub trait CheckLogger {
    /// Report a problem with a specific option (field) of a need.
    fn warning_for_option(&mut self, need: &Need, option: &str, message: &str);

    /// Report a problem with a need as a whole.
    fn warning_for_need(&mut self, need: &Need, message: &str);
}

impl<L: CheckLogger + ?Sized> CheckLogger for &mut L {
    fn warning_for_option(&mut self, need: &Need, option: &str, message: &str) {
        (**self).warning_for_option(need, option, message);
    }

    fn warning_for_need(&mut self, need: &Need, message: &str) {
        (**self).warning_for_need(need, message);
    }
}

/// Checks that every standard requirement is linked to at least one item via
/// the `compliance-gd` option.
///
/// Logs a warning against the `id` option of each unlinked standard
/// requirement.
#[instrument(level = "debug", skip_all)]
pub fn standard_requirements_linked(
    needs: &Needs,
    prefixes: &[String],
    log: &mut impl CheckLogger,
) -> usize {
    let requirements = select::standard_requirements(needs, prefixes);
    let linked = select::compliance_gd_tags(needs);
    tracing::debug!(
        requirements = requirements.len(),
        tags = linked.len(),
        "checking standard requirements"
    );

    let mut warnings = 0;
    for (id, need) in requirements {
        if !linked.contains(id) {
            let message = format!(
                "Standard requirement `{id}` is not linked to at least one item via the compliance-gd tag."
            );
            log.warning_for_option(need, "id", &message);
            warnings += 1;
        }
    }
    warnings
}

/// Checks that every standard work product is linked to at least one item via
/// the `compliance-wp` option.
///
/// Logs a warning against the `id` option of each unlinked standard work
/// product.
#[instrument(level = "debug", skip_all)]
pub fn standard_workproducts_linked(
    needs: &Needs,
    prefixes: &[String],
    log: &mut impl CheckLogger,
) -> usize {
    let workproducts = select::standard_workproducts(needs, prefixes);
    let linked = select::compliance_wp_tags(needs);
    tracing::debug!(
        workproducts = workproducts.len(),
        tags = linked.len(),
        "checking standard workproducts"
    );

    let mut warnings = 0;
    for (id, need) in workproducts {
        if !linked.contains(id) {
            let message = format!(
                "Standard workproduct `{id}` is not linked to at least one item via the compliance-wp tag."
            );
            log.warning_for_option(need, "id", &message);
            warnings += 1;
        }
    }
    warnings
}

/// Checks that every work product is contained in exactly one workflow.
///
/// Work products in no workflow, or in several, are reported. Several owning
/// workflows are listed in workflow order.
#[instrument(level = "debug", skip_all)]
pub fn workproduct_uniqueness_over_workflows(needs: &Needs, log: &mut impl CheckLogger) -> usize {
    let membership = select::workflow_membership(needs);
    tracing::debug!(workproducts = membership.len(), "checking workflow membership");

    let mut warnings = 0;
    for (id, entry) in membership {
        let message = match entry.count() {
            1 => continue,
            0 => format!("Workproduct `{id}` is not contained in any workflow, which is incorrect."),
            count => {
                let workflows = entry
                    .workflows
                    .iter()
                    .map(|workflow| format!("`{workflow}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Workproduct `{id}` is contained in {count} workflows: {workflows}, which is incorrect."
                )
            }
        };
        log.warning_for_need(entry.workproduct, &message);
        warnings += 1;
    }
    warnings
}

/// The available checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Check {
    /// Every standard requirement is linked via `compliance-gd`.
    StandardRequirements,
    /// Every standard work product is linked via `compliance-wp`.
    StandardWorkproducts,
    /// Every work product is contained in exactly one workflow.
    WorkproductUniqueness,
}

impl Check {
    /// All checks, in the order they are normally run.
    pub const ALL: [Self; 3] = [
        Self::StandardRequirements,
        Self::StandardWorkproducts,
        Self::WorkproductUniqueness,
    ];

    /// The name of the check.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StandardRequirements => "standard-requirements",
            Self::StandardWorkproducts => "standard-workproducts",
            Self::WorkproductUniqueness => "workproduct-uniqueness",
        }
    }

    /// A one-line description of what the check verifies.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::StandardRequirements => {
                "standard requirements are linked via compliance-gd"
            }
            Self::StandardWorkproducts => {
                "standard workproducts are linked via compliance-wp"
            }
            Self::WorkproductUniqueness => "workproducts belong to exactly one workflow",
        }
    }

    /// Runs the check, returning the number of warnings emitted.
    pub fn run(self, needs: &Needs, config: &Config, log: &mut impl CheckLogger) -> usize {
        let prefixes = config.standard_prefixes();
        match self {
            Self::StandardRequirements => standard_requirements_linked(needs, prefixes, log),
            Self::StandardWorkproducts => standard_workproducts_linked(needs, prefixes, log),
            Self::WorkproductUniqueness => workproduct_uniqueness_over_workflows(needs, log),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Check {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Error returned when parsing an unknown check name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown check '{0}'")]
pub struct UnknownCheckError(String);

impl FromStr for Check {
    type Err = UnknownCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|check| check.name() == s)
            .ok_or_else(|| UnknownCheckError(s.to_string()))
    }
}
