use crate::{
    cmd::{aggregation_settings, build_loader},
    modules::handlers::{liveness, user_year_report, user_years, AppState},
};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use http::{header::CONTENT_TYPE, Method};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let settings = aggregation_settings()?;
    let loader = build_loader()?;

    let app = create_router(AppState { loader, settings });
    let port = match args.port {
        Some(port) => port,
        None => match env::var("SERVER_PORT") {
            Ok(port) => port.parse::<u16>().with_context(|| {
                let message = format!("SERVER_PORT `{}` is not a valid port number", port);
                tracing::error!(message);
                message
            })?,
            Err(_) => {
                tracing::warn!("API server will be launched at default port number 8000");
                8000u16
            }
        },
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| {
            let message = format!("server at port {} stopped unexpectedly", port);
            tracing::error!(message);
            message
        })?;

    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users/:handle/years", routing::get(user_years))
        .route("/api/users/:handle/years/:year", routing::get(user_year_report))
        .route("/api/liveness", routing::get(liveness))
        .layer(Extension(Arc::new(state)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, starting graceful shutdown.");
}
