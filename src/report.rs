//! Reporting callbacks for pie charts.
//!
//! Each callback recomputes the same partitions the checks use and appends
//! the size of every slice, in a fixed order, to a caller supplied results
//! vector.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    domain::{Config, Needs},
    select,
};

/// Tallies standard requirements linked via `compliance-gd`.
///
/// Appends `[linked, unlinked]`.
pub fn pie_linked_standard_requirements(
    needs: &Needs,
    prefixes: &[String],
    results: &mut Vec<usize>,
) {
    let linked = select::compliance_gd_tags(needs);
    let (connected, not_connected) = partition(
        select::standard_requirements(needs, prefixes).into_keys(),
        |id| linked.contains(id),
    );

    results.push(connected);
    results.push(not_connected);
}

/// Tallies standard work products linked via `compliance-wp`.
///
/// Appends `[linked, unlinked]`.
pub fn pie_linked_standard_workproducts(
    needs: &Needs,
    prefixes: &[String],
    results: &mut Vec<usize>,
) {
    let linked = select::compliance_wp_tags(needs);
    let (connected, not_connected) = partition(
        select::standard_workproducts(needs, prefixes).into_keys(),
        |id| linked.contains(id),
    );

    results.push(connected);
    results.push(not_connected);
}

/// Tallies work products by the number of workflows containing them.
///
/// Appends `[in no workflow, in exactly one, in more than one]`.
pub fn pie_workproducts_in_exactly_one_workflow(needs: &Needs, results: &mut Vec<usize>) {
    let mut none = 0;
    let mut one = 0;
    let mut many = 0;

    for entry in select::workflow_membership(needs).values() {
        match entry.count() {
            0 => none += 1,
            1 => one += 1,
            _ => many += 1,
        }
    }

    results.push(none);
    results.push(one);
    results.push(many);
}

fn partition<'a>(
    ids: impl Iterator<Item = &'a str>,
    is_linked: impl Fn(&str) -> bool,
) -> (usize, usize) {
    ids.fold((0, 0), |(linked, unlinked), id| {
        if is_linked(id) {
            (linked + 1, unlinked)
        } else {
            (linked, unlinked + 1)
        }
    })
}

/// The available charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chart {
    /// Standard requirements linked vs. not linked via `compliance-gd`.
    StandardRequirements,
    /// Standard work products linked vs. not linked via `compliance-wp`.
    StandardWorkproducts,
    /// Work products by number of owning workflows.
    WorkproductWorkflows,
}

/// One slice of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    /// What the slice counts.
    pub label: &'static str,
    /// The number of needs in the slice.
    pub count: usize,
}

impl Chart {
    /// All charts.
    pub const ALL: [Self; 3] = [
        Self::StandardRequirements,
        Self::StandardWorkproducts,
        Self::WorkproductWorkflows,
    ];

    /// The name of the chart.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StandardRequirements => "standard-requirements",
            Self::StandardWorkproducts => "standard-workproducts",
            Self::WorkproductWorkflows => "workproduct-workflows",
        }
    }

    /// Labels of the slices, in the order the callback appends them.
    #[must_use]
    pub const fn labels(self) -> &'static [&'static str] {
        match self {
            Self::StandardRequirements | Self::StandardWorkproducts => &["linked", "not linked"],
            Self::WorkproductWorkflows => &["no workflow", "one workflow", "several workflows"],
        }
    }

    /// Appends the tallies of this chart to `results`.
    pub fn collect(self, needs: &Needs, config: &Config, results: &mut Vec<usize>) {
        let prefixes = config.standard_prefixes();
        match self {
            Self::StandardRequirements => {
                pie_linked_standard_requirements(needs, prefixes, results);
            }
            Self::StandardWorkproducts => {
                pie_linked_standard_workproducts(needs, prefixes, results);
            }
            Self::WorkproductWorkflows => pie_workproducts_in_exactly_one_workflow(needs, results),
        }
    }

    /// Computes the labelled slices of this chart.
    #[must_use]
    pub fn tally(self, needs: &Needs, config: &Config) -> Vec<Slice> {
        let mut results = Vec::with_capacity(self.labels().len());
        self.collect(needs, config, &mut results);
        self.labels()
            .iter()
            .zip(results)
            .map(|(&label, count)| Slice { label, count })
            .collect()
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Chart {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Error returned when parsing an unknown chart name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown chart '{0}'")]
pub struct UnknownChartError(String);

impl FromStr for Chart {
    type Err = UnknownChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|chart| chart.name() == s)
            .ok_or_else(|| UnknownChartError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Need;

    fn prefixes() -> Vec<String> {
        Config::default().standard_prefixes().to_vec()
    }

    #[test]
    fn one_linked_one_unlinked_requirement() {
        let needs: Needs = [
            Need::new("R_ISO26262_RQ_1", "std_req"),
            Need::new("R_ISO26262_RQ_2", "std_req"),
            Need::new("X", "gd_req").with_compliance_gd(["R_ISO26262_RQ_2"]),
        ]
        .into_iter()
        .collect();
        let mut results = Vec::new();

        pie_linked_standard_requirements(&needs, &prefixes(), &mut results);

        assert_eq!(results, [1, 1]);
    }

    #[test]
    fn workproduct_slices() {
        let needs: Needs = [
            Need::new("WP_A", "workproduct"),
            Need::new("WP_B", "workproduct"),
            Need::new("WP_C", "workproduct"),
            Need::new("W1", "workflow").with_output(["WP_A", "WP_C"]),
            Need::new("W2", "workflow").with_output(["WP_A"]),
        ]
        .into_iter()
        .collect();
        let mut results = Vec::new();

        pie_workproducts_in_exactly_one_workflow(&needs, &mut results);

        assert_eq!(results, [1, 1, 1]);
    }

    #[test]
    fn empty_collection_appends_zeros() {
        let needs = Needs::new();
        let config = Config::default();
        let mut results = Vec::new();

        for chart in Chart::ALL {
            chart.collect(&needs, &config, &mut results);
        }

        assert_eq!(results, [0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn results_are_appended_not_replaced() {
        let needs: Needs = [Need::new("R_ISO2143_WP_1", "std_wp")].into_iter().collect();
        let mut results = vec![42];

        pie_linked_standard_workproducts(&needs, &prefixes(), &mut results);

        assert_eq!(results, [42, 0, 1]);
    }

    #[test]
    fn linked_and_unlinked_add_up() {
        let needs: Needs = [
            Need::new("R_ISO26262_RQ_1", "std_req"),
            Need::new("R_ISO2143_RQ_2", "std_req"),
            Need::new("R_ISOPAS8926_RQ_3", "std_req"),
            Need::new("R_ISOPAS8926_WP_1", "std_wp"),
            Need::new("GD", "gd_req").with_compliance_gd(["R_ISO2143_RQ_2", "UNKNOWN"]),
        ]
        .into_iter()
        .collect();
        let prefixes = prefixes();

        let mut requirements = Vec::new();
        pie_linked_standard_requirements(&needs, &prefixes, &mut requirements);
        let mut workproducts = Vec::new();
        pie_linked_standard_workproducts(&needs, &prefixes, &mut workproducts);

        assert_eq!(
            requirements.iter().sum::<usize>(),
            select::standard_requirements(&needs, &prefixes).len()
        );
        assert_eq!(
            workproducts.iter().sum::<usize>(),
            select::standard_workproducts(&needs, &prefixes).len()
        );
        assert_eq!(requirements, [1, 2]);
    }

    #[test]
    fn tally_labels_slices() {
        let needs: Needs = [Need::new("WP_A", "workproduct")].into_iter().collect();

        let slices = Chart::WorkproductWorkflows.tally(&needs, &Config::default());

        assert_eq!(
            slices,
            [
                Slice { label: "no workflow", count: 1 },
                Slice { label: "one workflow", count: 0 },
                Slice { label: "several workflows", count: 0 },
            ]
        );
    }
}
