use clap::Parser;
use compliance::{Config, Diagnostics, Needs};
use tracing::instrument;

use super::terminal::Style;

#[derive(Debug, Default, Parser)]
#[command(about = "Check compliance links and workflow membership of all needs")]
pub struct Check {
    /// Checks to run (can be specified multiple times)
    #[arg(long, value_name = "CHECK")]
    check: Vec<CheckType>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq, Eq)]
enum CheckType {
    /// Standard requirements are linked via compliance-gd
    StandardRequirements,
    /// Standard workproducts are linked via compliance-wp
    StandardWorkproducts,
    /// Workproducts belong to exactly one workflow
    WorkproductUniqueness,
    /// Run all checks
    All,
}

impl CheckType {
    const fn resolve(self) -> Option<compliance::Check> {
        match self {
            Self::StandardRequirements => Some(compliance::Check::StandardRequirements),
            Self::StandardWorkproducts => Some(compliance::Check::StandardWorkproducts),
            Self::WorkproductUniqueness => Some(compliance::Check::WorkproductUniqueness),
            Self::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Check {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, needs: &Needs, config: &Config) -> anyhow::Result<()> {
        let checks = self.selected();

        let mut diagnostics = Diagnostics::new();
        for &check in &checks {
            let warnings = diagnostics.run(check, needs, config);
            tracing::info!(check = check.name(), warnings, "check complete");
        }

        match self.output {
            OutputFormat::Table if !self.quiet => {
                Self::output_table(&checks, &diagnostics, needs);
            }
            OutputFormat::Table => {}
            OutputFormat::Json => Self::output_json(&diagnostics)?,
            OutputFormat::Summary => Self::output_summary(&diagnostics),
        }

        // Exit with appropriate code
        if !diagnostics.is_empty() {
            std::process::exit(2);
        }

        Ok(())
    }

    fn selected(&self) -> Vec<compliance::Check> {
        if self.check.is_empty() || self.check.contains(&CheckType::All) {
            compliance::Check::ALL.to_vec()
        } else {
            let mut checks: Vec<_> = self
                .check
                .iter()
                .copied()
                .filter_map(CheckType::resolve)
                .collect();
            checks.sort_unstable();
            checks.dedup();
            checks
        }
    }

    fn output_table(checks: &[compliance::Check], diagnostics: &Diagnostics, needs: &Needs) {
        println!("Checking {} needs...\n", needs.len());

        for &check in checks {
            let count = diagnostics.count_for(check);
            if count == 0 {
                let line = format!("✓ {:<24} {}", check.name(), check.description());
                println!("{}", Style::Pass.paint(&line));
            } else {
                let line = format!("✗ {:<24} {count} issues found", check.name());
                println!("{}", Style::Issue.paint(&line));
                for diagnostic in diagnostics
                    .as_slice()
                    .iter()
                    .filter(|diagnostic| diagnostic.check == Some(check))
                {
                    println!("    {}", Style::Detail.paint(diagnostic));
                }
            }
        }

        if diagnostics.is_empty() {
            println!("\n{}", Style::Pass.paint("All checks passed (0 issues)"));
        } else {
            let line = format!("Summary: {} issues found", diagnostics.len());
            println!("\n{}", Style::Issue.paint(&line));
        }
    }

    fn output_json(diagnostics: &Diagnostics) -> anyhow::Result<()> {
        use serde_json::json;

        let output = json!({
            "status": if diagnostics.is_empty() { "passed" } else { "issues_found" },
            "issues": diagnostics.as_slice(),
            "summary": {
                "total_issues": diagnostics.len(),
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(diagnostics: &Diagnostics) {
        println!("issues={}", diagnostics.len());
    }
}
