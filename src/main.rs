mod domain;
mod clients;

mod app_system;
mod api;
mod browser;
mod carousel;
mod query_cache;
mod user_source;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, BrowseArgs, Cli, Command, ServeArgs, UserSystem};
use crate::carousel::CarouselController;
use crate::domain::User;
use crate::query_cache::MemoryQueryCache;
use crate::user_source::{HttpUserSource, UserSource};

#[tokio::main]
async fn main() {
    // Setup tracing once for the entire application
    setup_tracing();

    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Browse(args) => browse(args).await,
    }
}

/// Serve the seeded store over HTTP until Ctrl-C.
async fn serve(args: ServeArgs) -> Result<()> {
    let system = UserSystem::seeded(args.seed)
        .instrument(tracing::info_span!("seeding"))
        .await
        .context("failed to seed user store")?;

    let app = api::router(system.user_client.clone());
    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("Serving users on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Ctrl-C received");
        })
        .await
        .context("server error")?;

    system.shutdown().await.map_err(anyhow::Error::msg)
}

/// Run the interactive carousel against a server or a local store.
async fn browse(args: BrowseArgs) -> Result<()> {
    let local = if args.local {
        Some(UserSystem::seeded(args.seed).await.context("failed to seed user store")?)
    } else {
        None
    };

    let source: Arc<dyn UserSource> = match &local {
        Some(system) => Arc::new(system.user_client.clone()),
        None => {
            let remote = HttpUserSource::new(&args.url);
            info!(url = %remote.users_url(), "Browsing remote store");
            Arc::new(remote)
        }
    };
    let cache = Arc::new(MemoryQueryCache::<Vec<User>>::new());

    let (controller, handle) = CarouselController::new(32, source, cache, args.retry_policy());
    let controller_task = tokio::spawn(controller.run());

    browser::run(handle).await?;
    controller_task.await.context("carousel controller panicked")?;

    if let Some(system) = local {
        system.shutdown().await.map_err(anyhow::Error::msg)?;
    }
    Ok(())
}
