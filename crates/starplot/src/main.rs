mod cli;
mod color;
mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use output::{output_error, output_summary, ChartSummary};
use star_chart::ChartRenderer;
use star_search::{extract_series, SearchClient};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// fetch -> extract -> render, stopping at the first failure
fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli);
    config.validate()?;

    let client = SearchClient::with_base_url(&config.api_url).with_timeout(config.timeout());
    let body = client
        .fetch_top_repositories(&config.language, config.per_page)
        .with_context(|| format!("Failed to fetch {} repositories", config.language))?;

    let series = extract_series(&body).context("Unexpected search response")?;
    info!(repositories = series.len(), "extracted chart series");

    let chart = ChartRenderer::new(config.chart_options())
        .render(&series, &config.language)
        .context("Failed to render chart")?;
    let path = chart.show(&config.output_mode())?;

    let summary = ChartSummary::new(&config.language, &chart.title, &path, &series);
    output_summary(&summary, cli.format);
    Ok(())
}
