use crate::{
    cmd::{aggregation_settings, build_loader, OutputFormat},
    modules::{models::response::YearsResponse, render::render_years},
};
use anyhow::{Context, Result};
use cf_wrapped_libs::{available_years, summarize_years};
use clap::Args;

#[derive(Debug, Args)]
pub struct YearsArgs {
    /// Codeforces handle
    handle: String,
    /// Ignore cached data
    #[arg(long)]
    refresh: bool,
    /// Hide years without any submission or contest
    #[arg(long)]
    active_only: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn run(args: YearsArgs) -> Result<()> {
    let settings = aggregation_settings()?;
    let loader = build_loader()?;

    let data = loader
        .load(&args.handle, args.refresh)
        .await
        .with_context(|| {
            let message = format!("couldn't load data of user {}", args.handle);
            tracing::error!(message);
            message
        })?;

    let years = available_years(
        &data.submissions,
        &data.rating_history,
        data.user_info.registration_time_seconds,
        &settings.zone,
        settings.zone.current_year(),
    );
    let summaries: Vec<_> = summarize_years(&years, &data.submissions, &data.rating_history, &settings.zone)
        .into_iter()
        .filter(|summary| !args.active_only || summary.has_activity)
        .collect();
    tracing::info!("{} has {} reportable years", data.user_info.handle, summaries.len());

    match args.format {
        OutputFormat::Text => print!("{}", render_years(&data.user_info, &summaries)),
        OutputFormat::Json => {
            let response = YearsResponse::new(data.user_info, summaries);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
