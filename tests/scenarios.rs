//! End-to-end checks over needs exports.

use std::path::PathBuf;

use compliance::{
    Chart, Check, Config, Diagnostics, Need, Needs, NeedsFile, check, report, storage,
};

fn run_all(needs: &Needs) -> Diagnostics {
    let config = Config::default();
    let mut diagnostics = Diagnostics::new();
    for check in Check::ALL {
        diagnostics.run(check, needs, &config);
    }
    diagnostics
}

fn tally_all(needs: &Needs) -> Vec<usize> {
    let config = Config::default();
    let mut results = Vec::new();
    for chart in Chart::ALL {
        chart.collect(needs, &config, &mut results);
    }
    results
}

fn messages(diagnostics: &Diagnostics) -> Vec<&str> {
    diagnostics
        .as_slice()
        .iter()
        .map(|diagnostic| diagnostic.message.as_str())
        .collect()
}

#[test]
fn unlinked_standard_requirement() {
    let needs: Needs = [
        Need::new("R_ISO26262_RQ_1", "std_req"),
        Need::new("R_ISO26262_RQ_2", "std_req"),
        Need::new("X", "gd_req").with_compliance_gd(["R_ISO26262_RQ_2"]),
    ]
    .into_iter()
    .collect();

    let diagnostics = run_all(&needs);
    let mut results = Vec::new();
    report::pie_linked_standard_requirements(
        &needs,
        Config::default().standard_prefixes(),
        &mut results,
    );

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.as_slice()[0].need, "R_ISO26262_RQ_1");
    assert_eq!(diagnostics.as_slice()[0].option.as_deref(), Some("id"));
    assert_eq!(results, [1, 1]);
}

#[test]
fn workproduct_in_two_workflows() {
    let needs: Needs = [
        Need::new("WP_A", "workproduct"),
        Need::new("W1", "workflow").with_output(["WP_A"]),
        Need::new("W2", "workflow").with_output(["WP_A"]),
    ]
    .into_iter()
    .collect();

    let diagnostics = run_all(&needs);

    assert_eq!(
        messages(&diagnostics),
        ["Workproduct `WP_A` is contained in 2 workflows: `W1`, `W2`, which is incorrect."]
    );
    assert_eq!(tally_all(&needs), [0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn workproduct_in_no_workflow() {
    let needs: Needs = [Need::new("WP_B", "workproduct")].into_iter().collect();

    let diagnostics = run_all(&needs);

    assert_eq!(
        messages(&diagnostics),
        ["Workproduct `WP_B` is not contained in any workflow, which is incorrect."]
    );
    assert_eq!(tally_all(&needs), [0, 0, 0, 0, 1, 0, 0]);
}

#[test]
fn empty_collection() {
    let needs = Needs::new();

    assert!(run_all(&needs).is_empty());
    assert_eq!(tally_all(&needs), [0; 7]);
}

#[test]
fn exactly_one_workflow_is_silent() {
    let needs: Needs = [
        Need::new("WP_A", "workproduct"),
        Need::new("W1", "workflow").with_output(["WP_A", "NOT_A_WORKPRODUCT"]),
    ]
    .into_iter()
    .collect();

    let mut log = Diagnostics::new();
    assert_eq!(check::workproduct_uniqueness_over_workflows(&needs, &mut log), 0);
    assert!(log.is_empty());
}

#[test]
fn checks_and_charts_agree_on_an_export() {
    let tmp = tempfile::tempdir().unwrap();
    let path: PathBuf = tmp.path().join("needs.json");
    std::fs::write(
        &path,
        r#"{
            "current_version": "",
            "versions": {
                "": {
                    "needs": {
                        "R_ISO26262_RQ_1": {"id": "R_ISO26262_RQ_1", "type": "std_req"},
                        "R_ISO26262_RQ_2": {"id": "R_ISO26262_RQ_2", "type": "std_req"},
                        "R_ISOPAS8926_WP_1": {"id": "R_ISOPAS8926_WP_1", "type": "std_wp"},
                        "GD_1": {"id": "GD_1", "type": "gd_req", "compliance-gd": ["R_ISO26262_RQ_2"]},
                        "WP_A": {"id": "WP_A", "type": "workproduct", "compliance-wp": ["R_ISOPAS8926_WP_1"]},
                        "WP_B": {"id": "WP_B", "type": "workproduct"},
                        "WP_C": {"id": "WP_C", "type": "workproduct"},
                        "WF_1": {"id": "WF_1", "type": "workflow", "output": ["WP_A", "WP_C"]},
                        "WF_2": {"id": "WF_2", "type": "workflow", "output": "WP_C"}
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let needs = NeedsFile::new(path).load().unwrap();
    let diagnostics = run_all(&needs);
    let results = tally_all(&needs);

    assert_eq!(needs.len(), 9);
    assert_eq!(diagnostics.count_for(Check::StandardRequirements), results[1]);
    assert_eq!(diagnostics.count_for(Check::StandardWorkproducts), results[3]);
    assert_eq!(
        diagnostics.count_for(Check::WorkproductUniqueness),
        results[4] + results[6]
    );
    assert_eq!(results, [1, 1, 1, 0, 1, 1, 1]);
}

#[test]
fn parse_and_check_are_repeatable() {
    let content = r#"{"WP_A": {"type": "workproduct"}, "R_ISO2143_RQ_1": {"type": "std_req"}}"#;

    let first = run_all(&storage::parse(content, None).unwrap()).into_vec();
    let second = run_all(&storage::parse(content, None).unwrap()).into_vec();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}
