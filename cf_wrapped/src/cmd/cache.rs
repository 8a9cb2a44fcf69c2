use crate::cmd::{build_cache, cache_directory};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    command: CacheCommand,
}

#[derive(Debug, Subcommand)]
enum CacheCommand {
    /// Remove cached data of one handle, or of every handle
    Clear {
        handle: Option<String>,
    },
}

pub async fn run(args: CacheArgs) -> Result<()> {
    let cache = build_cache()?;

    match args.command {
        CacheCommand::Clear { handle } => {
            let removed = cache.clear(handle.as_deref()).with_context(|| {
                let message = format!(
                    "couldn't clear cache entries in {}",
                    cache_directory().display()
                );
                tracing::error!(message);
                message
            })?;
            tracing::info!("{} cache entries removed", removed);
        }
    }

    Ok(())
}
