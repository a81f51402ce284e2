//! Selection helpers.
//!
//! Each helper recomputes its subset from the full collection on every call.
//! Nothing is cached between calls.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Need, NeedType, Needs};

/// A subset of needs, keyed by ID.
pub type Selection<'a> = BTreeMap<&'a str, &'a Need>;

/// Needs whose ID starts with one of the standard `prefixes` and contains
/// `RQ`.
#[must_use]
pub fn standard_requirements<'a>(needs: &'a Needs, prefixes: &[String]) -> Selection<'a> {
    standard_items(needs, prefixes, "RQ")
}

/// Needs whose ID starts with one of the standard `prefixes` and contains
/// `WP`.
#[must_use]
pub fn standard_workproducts<'a>(needs: &'a Needs, prefixes: &[String]) -> Selection<'a> {
    standard_items(needs, prefixes, "WP")
}

fn standard_items<'a>(needs: &'a Needs, prefixes: &[String], marker: &str) -> Selection<'a> {
    needs
        .iter()
        .filter(|need| has_standard_prefix(need.id(), prefixes) && need.id().contains(marker))
        .map(|need| (need.id(), need))
        .collect()
}

fn has_standard_prefix(id: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| id.starts_with(prefix.as_str()))
}

/// Needs of type `workflow`.
#[must_use]
pub fn workflows(needs: &Needs) -> Selection<'_> {
    of_type(needs, &NeedType::Workflow)
}

/// Needs of type `workproduct`.
#[must_use]
pub fn workproducts(needs: &Needs) -> Selection<'_> {
    of_type(needs, &NeedType::Workproduct)
}

fn of_type<'a>(needs: &'a Needs, need_type: &NeedType) -> Selection<'a> {
    needs
        .iter()
        .filter(|need| need.need_type() == need_type)
        .map(|need| (need.id(), need))
        .collect()
}

/// Every ID referenced through a `compliance-gd` link, by any need.
#[must_use]
pub fn compliance_gd_tags(needs: &Needs) -> BTreeSet<&str> {
    needs
        .iter()
        .flat_map(Need::compliance_gd)
        .map(String::as_str)
        .collect()
}

/// Every ID referenced through a `compliance-wp` link, by any need.
#[must_use]
pub fn compliance_wp_tags(needs: &Needs) -> BTreeSet<&str> {
    needs
        .iter()
        .flat_map(Need::compliance_wp)
        .map(String::as_str)
        .collect()
}

/// The workflows producing a single work product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership<'a> {
    /// The work product.
    pub workproduct: &'a Need,
    /// IDs of the workflows listing the work product in their `output`, in
    /// workflow iteration order.
    pub workflows: Vec<&'a str>,
}

impl Membership<'_> {
    /// The number of workflows the work product is contained in.
    #[must_use]
    pub fn count(&self) -> usize {
        self.workflows.len()
    }
}

/// For every work product, the workflows that list it as an output.
///
/// Work products contained in no workflow are present with an empty list.
/// Outputs that are not work products are ignored. A workflow listing the
/// same work product more than once is counted once.
#[must_use]
pub fn workflow_membership(needs: &Needs) -> BTreeMap<&str, Membership<'_>> {
    let mut membership: BTreeMap<&str, Membership<'_>> = workproducts(needs)
        .into_iter()
        .map(|(id, workproduct)| {
            (
                id,
                Membership {
                    workproduct,
                    workflows: Vec::new(),
                },
            )
        })
        .collect();

    for (workflow_id, workflow) in workflows(needs) {
        for output in workflow.output() {
            if let Some(entry) = membership.get_mut(output.as_str()) {
                if entry.workflows.last() != Some(&workflow_id) {
                    entry.workflows.push(workflow_id);
                }
            }
        }
    }

    membership
}
