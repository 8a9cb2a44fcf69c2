use crate::{
    cmd::{aggregation_settings, build_loader, OutputFormat},
    modules::{models::response::ReportResponse, render::render_report},
};
use anyhow::{Context, Result};
use cf_wrapped_libs::{rating, YearStats, YearWindow};
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Codeforces handle
    handle: String,
    /// Calendar year to report on. Defaults to the last completed year.
    #[arg(short, long)]
    year: Option<i32>,
    /// Ignore cached data
    #[arg(long)]
    refresh: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn run(args: ReportArgs) -> Result<()> {
    let settings = aggregation_settings()?;
    let loader = build_loader()?;

    let current_year = settings.zone.current_year();
    let year = args.year.unwrap_or(current_year - 1);
    if year >= current_year {
        tracing::warn!("year {} is not over yet, the report will be partial", year);
    }

    let data = loader
        .load(&args.handle, args.refresh)
        .await
        .with_context(|| {
            let message = format!("couldn't load data of user {}", args.handle);
            tracing::error!(message);
            message
        })?;

    let stats = YearStats::compute(year, &data.submissions, &data.rating_history, &settings);
    tracing::info!(
        "{} solved {} problems in {}",
        data.user_info.handle,
        stats.unique_problems_solved,
        year
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_report(&data.user_info, &stats)),
        OutputFormat::Json => {
            let window = YearWindow::new(year, &settings.zone);
            let history = rating::chronological(&data.rating_history);
            let rating_history = rating::in_window(&history, &window)
                .into_iter()
                .cloned()
                .collect();
            let response = ReportResponse::new(data.user_info, stats, rating_history);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
