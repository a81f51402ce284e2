use clap::Parser;
use compliance::{Chart, Config, Needs};
use tracing::instrument;

use super::terminal::Style;

#[derive(Debug, Parser)]
#[command(about = "Print the tallies behind the compliance charts")]
pub struct Report {
    /// Charts to print (can be specified multiple times) [default: all]
    #[arg(long, value_name = "CHART")]
    chart: Vec<ChartType>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq, Eq)]
enum ChartType {
    /// Standard requirements linked via compliance-gd
    StandardRequirements,
    /// Standard workproducts linked via compliance-wp
    StandardWorkproducts,
    /// Workproducts by number of owning workflows
    WorkproductWorkflows,
}

impl From<ChartType> for Chart {
    fn from(chart: ChartType) -> Self {
        match chart {
            ChartType::StandardRequirements => Self::StandardRequirements,
            ChartType::StandardWorkproducts => Self::StandardWorkproducts,
            ChartType::WorkproductWorkflows => Self::WorkproductWorkflows,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Report {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, needs: &Needs, config: &Config) -> anyhow::Result<()> {
        let charts: Vec<Chart> = if self.chart.is_empty() {
            Chart::ALL.to_vec()
        } else {
            self.chart.iter().copied().map(Chart::from).collect()
        };

        match self.output {
            OutputFormat::Table => Self::output_table(&charts, needs, config),
            OutputFormat::Json => Self::output_json(&charts, needs, config)?,
        }

        Ok(())
    }

    fn output_table(charts: &[Chart], needs: &Needs, config: &Config) {
        for (i, &chart) in charts.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", Style::Heading.paint(chart.name()));
            for slice in chart.tally(needs, config) {
                println!("  {:<18} {:>6}", slice.label, slice.count);
            }
        }
    }

    fn output_json(charts: &[Chart], needs: &Needs, config: &Config) -> anyhow::Result<()> {
        use serde_json::json;

        let output: Vec<_> = charts
            .iter()
            .map(|&chart| {
                json!({
                    "chart": chart,
                    "slices": chart.tally(needs, config),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chart_names() {
        let command = Report::try_parse_from([
            "report",
            "--chart",
            "workproduct-workflows",
            "--output",
            "json",
        ])
        .unwrap();
        assert_eq!(command.chart, [ChartType::WorkproductWorkflows]);
    }

    #[test]
    fn value_names_match_library_names() {
        use clap::ValueEnum;

        for variant in ChartType::value_variants() {
            let name = variant.to_possible_value().unwrap();
            assert_eq!(name.get_name(), Chart::from(*variant).name());
        }
    }
}
