//! This bench runs every check and chart over a generated corpus of standard
//! requirements, guidance items, workflows and work products.

#![allow(missing_docs)]

use compliance::{Chart, Check, Config, Diagnostics, Need, Needs};
use criterion::{Criterion, criterion_group, criterion_main};

/// Generates a corpus where some items are unlinked and some work products
/// are shared between workflows.
fn corpus(size: usize) -> Needs {
    let mut needs = Needs::new();
    for i in 0..size {
        needs.insert(Need::new(format!("R_ISO26262_RQ_{i}"), "std_req"));
        needs.insert(Need::new(format!("R_ISO2143_WP_{i}"), "std_wp"));
        if i % 3 != 0 {
            needs.insert(
                Need::new(format!("GD_{i}"), "gd_req")
                    .with_compliance_gd([format!("R_ISO26262_RQ_{i}")]),
            );
        }
        needs.insert(
            Need::new(format!("WP_{i}"), "workproduct")
                .with_compliance_wp([format!("R_ISO2143_WP_{i}")]),
        );
        needs.insert(
            Need::new(format!("WF_{i}"), "workflow")
                .with_output([format!("WP_{i}"), format!("WP_{}", (i * 7) % size)]),
        );
    }
    needs
}

fn run_checks(c: &mut Criterion) {
    let needs = corpus(2_000);
    let config = Config::default();

    c.bench_function("run all checks", |b| {
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            for check in Check::ALL {
                diagnostics.run(check, &needs, &config);
            }
            diagnostics
        });
    });

    c.bench_function("tally all charts", |b| {
        b.iter(|| {
            let mut results = Vec::new();
            for chart in Chart::ALL {
                chart.collect(&needs, &config, &mut results);
            }
            results
        });
    });
}

criterion_group!(benches, run_checks);
criterion_main!(benches);
