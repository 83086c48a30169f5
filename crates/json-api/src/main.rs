//! Kusuri JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use kusuri_app::{
    context::{AppConfig, AppContext},
    notifications::{LogNotifier, Notifier, WhatsAppNotifier},
};

use crate::{
    config::ServerConfig,
    observability::{MeteredNotifier, Observability, request_logging},
    state::{NotificationChannel, State},
};

mod auth;
mod config;
mod contact;
mod extensions;
mod feedback;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Kusuri JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so there is nowhere else to report"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let (notifier, channel) = build_notifier(&config);

    let app_config = AppConfig {
        database_url: config.database.database_url.clone(),
        max_connections: config.database.database_max_connections,
        session_ttl: config.auth.session_ttl(),
        migrate: config.database.database_migrate,
    };

    let app = match AppContext::from_config(&app_config, &notifier).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            observability.shutdown();
            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!(notifications = channel.as_str(), "Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::shared(app, channel)))
        .push(router::app_router());

    let doc = OpenApi::new("Kusuri API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}

/// WhatsApp when fully configured, the log otherwise. Either way deliveries are counted.
fn build_notifier(config: &ServerConfig) -> (Arc<dyn Notifier>, NotificationChannel) {
    let (inner, channel): (Arc<dyn Notifier>, _) = match config.notifications.whatsapp() {
        Some(whatsapp) => (
            Arc::new(WhatsAppNotifier::new(whatsapp)),
            NotificationChannel::WhatsApp,
        ),
        None => {
            info!("WhatsApp is not configured, admin notifications will be logged");

            (Arc::new(LogNotifier), NotificationChannel::Log)
        }
    };

    (Arc::new(MeteredNotifier::new(inner)), channel)
}
