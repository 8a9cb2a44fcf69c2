mod cmd;
mod modules;

use crate::cmd::{
    cache::{self, CacheArgs},
    report::{self, ReportArgs},
    server::{self, ServerArgs},
    years::{self, YearsArgs},
};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::{env, str::FromStr};
use tokio::runtime::Builder;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, time::OffsetTime},
};

#[derive(Debug, Parser)]
#[command(name = "cf_wrapped")]
#[command(about = "Codeforces year in review")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Statistics and badges of one user over one year
    Report(ReportArgs),
    /// Completed years of one user with a short summary each
    Years(YearsArgs),
    /// Serve reports over HTTP
    Server(ServerArgs),
    /// Manage cached user data
    Cache(CacheArgs),
}

fn main() {
    dotenv().ok();

    let log_level = env::var("RUST_LOG").unwrap_or(String::from("info"));
    let filter = EnvFilter::builder()
        .with_default_directive(
            LevelFilter::from_str(&log_level)
                .unwrap_or(LevelFilter::INFO)
                .into(),
        )
        .from_env_lossy();
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_timer(OffsetTime::local_rfc_3339().expect("couldn't determine local UTC offset"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(format)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    let result = match Cli::parse().command {
        Commands::Report(args) => runtime.block_on(report::run(args)),
        Commands::Years(args) => runtime.block_on(years::run(args)),
        Commands::Server(args) => runtime.block_on(server::run(args)),
        Commands::Cache(args) => runtime.block_on(cache::run(args)),
    };

    if let Err(e) = result {
        eprintln!("error: {:?}", e);
        std::process::exit(1);
    }
}
