use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    present::Action,
    services::{health, list_users, show_user},
    state::AppState,
};
use crate::config::Config;
use crate::presenter::PresenterRegistry;
use crate::views::{FileViews, ViewEngine};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Demo routes, each tagged with the action the html presenter derives
/// its view from
pub fn router(state: AppState) -> Router {
    let list = Action::new("UsersController", "index");
    let show = Action::new("UsersController", "show");

    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users).layer(Extension(list)))
        .route("/users/{id}", get(show_user).layer(Extension(show.clone())))
        .route("/users/{id}/{presentUsing}", get(show_user).layer(Extension(show)))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config, address: Option<SocketAddr>) -> Result<(), AnyError> {
    let address = address.unwrap_or(config.server.bind_addr);

    info!(path = %config.views.path.display(), "Using views directory");
    let views: Arc<dyn ViewEngine> = Arc::new(FileViews::new(config.views.path.clone()));
    let registry = PresenterRegistry::from_config(&config, views);
    info!(
        presenters = ?registry.presenters().collect::<Vec<_>>(),
        "Presenter registry ready"
    );

    let app = router(AppState::new(registry));

    let listener = TcpListener::bind(address).await?;
    info!(%address, "presently listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
