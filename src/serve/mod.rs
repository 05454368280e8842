use anyhow::Result;
use axum::{
    body::{boxed, Body},
    extract::Extension,
    http::Request,
    response::Response,
    Router,
};
use clap::Args;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::signal;
use tower::ServiceExt;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::*;

use crate::config::DevConfig;

mod proxy;

pub use proxy::Proxy;

#[derive(Debug, Args)]
pub struct Command {
    /// Address to listen on.
    #[arg(long, value_name = "ADDR")]
    listen: Option<SocketAddr>,
    /// Directory holding the built application.
    #[arg(long, value_name = "DIR")]
    dist: Option<PathBuf>,
}

impl Command {
    fn configure(&self, config: &DevConfig) -> DevConfig {
        let mut config = config.clone();
        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if let Some(dist) = &self.dist {
            config.dist = dist.clone();
        }
        config
    }
}

struct AppState {
    proxy: Proxy,
    shell: ServeDir<ServeFile>,
}

/// Proxies backend prefixes and serves everything else from the bundle,
/// falling back to `index.html` so history-mode URLs load the app.
pub fn app(config: &DevConfig) -> Router {
    let shell = ServeDir::new(&config.dist)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(config.dist.join("index.html")));

    let app_state = Arc::new(AppState {
        proxy: Proxy::new(config.proxy.clone()),
        shell,
    });

    Router::new()
        .fallback(dispatch)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(Extension(app_state))
}

async fn dispatch(Extension(state): Extension<Arc<AppState>>, req: Request<Body>) -> Response {
    if let Some(rule) = state.proxy.rule_for(req.uri().path()) {
        return state.proxy.forward(rule, req).await.map(boxed);
    }

    match state.shell.clone().oneshot(req).await {
        Ok(response) => response.map(boxed),
        Err(never) => match never {},
    }
}

#[tokio::main]
pub async fn execute_command(config: &DevConfig, cmd: &Command) -> Result<()> {
    let config = cmd.configure(config);

    if !config.dist.join("index.html").exists() {
        warn!(dist = %config.dist.display(), "no index.html, run `trunk build` in web/");
    }

    for rule in &config.proxy {
        info!(prefix = %rule.prefix, target = %rule.target, change_origin = rule.change_origin, "proxying");
    }

    let app = app(&config);

    info!("listening on {}", config.listen);

    axum::Server::bind(&config.listen)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("ctrl-c handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests;
