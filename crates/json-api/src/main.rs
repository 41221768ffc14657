//! Bazaar JSON API Server

use std::{process::ExitCode, sync::Arc};

use salvo::{
    affix_state::inject,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler},
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, InvalidHeaderValue},
    },
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info, warn};

use bazaar_app::{
    auth::{GoogleTokenVerifier, SessionKeys},
    context::{AppContext, Collaborators},
    mail::{Mailer, SmtpMailer, UnconfiguredMailer},
};

use crate::{
    auth::SessionCookies,
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    realtime::{ConnectionRegistry, SocketNotifier},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod categories;
mod config;
mod extensions;
mod healthcheck;
mod messages;
mod observability;
mod orders;
mod products;
mod realtime;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Bazaar JSON API Server entry point
#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(parse_error) => {
            let code = if parse_error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };

            if let Err(print_error) = parse_error.print() {
                #[expect(
                    clippy::print_stderr,
                    reason = "logging is not initialised before configuration loads"
                )]
                {
                    eprintln!("Configuration error: {parse_error} ({print_error})");
                }
            }

            return code;
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "the subscriber failed to install so tracing has nowhere to write"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    let code = match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(startup_error) => {
            error!("server failed to start: {startup_error}");

            ExitCode::FAILURE
        }
    };

    observability.shutdown();

    code
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to initialise app context: {0}")]
    App(#[from] bazaar_app::context::AppInitError),

    #[error("invalid CLIENT_URL: {0}")]
    ClientUrl(#[from] InvalidHeaderValue),
}

async fn run(config: &ServerConfig) -> Result<(), StartupError> {
    let registry = ConnectionRegistry::new();

    let collaborators = Collaborators {
        keys: SessionKeys::new(config.auth.jwt_secret.as_bytes(), config.auth.session_ttl()),
        google: Arc::new(GoogleTokenVerifier::new(config.auth.google_client_id.clone())),
        mailer: mailer(config),
        notifier: Arc::new(SocketNotifier::new(registry.clone())),
    };

    let app = AppContext::from_database_url(&config.database.database_url, collaborators).await?;

    if let Some(seed) = config.auth.admin_seed() {
        match app.users.ensure_admin(seed).await {
            Ok(admin) => info!(email = %admin.email, "bootstrap administrator ready"),
            Err(seed_error) => error!("failed to ensure bootstrap administrator: {seed_error}"),
        }
    }

    let cookies = SessionCookies {
        secure: config.auth.cookie_secure,
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::new(app, registry, cookies)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(router::api_router());

    let doc = OpenApi::new("Bazaar API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let cors = cors(config)?;

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(signal_error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {signal_error}");
        }
    });

    server.serve(Service::new(router).hoop(cors)).await;

    info!("server stopped");

    Ok(())
}

fn mailer(config: &ServerConfig) -> Arc<dyn Mailer> {
    let Some(settings) = config.mail.smtp_settings() else {
        warn!("SMTP_HOST is not set, outbound email is disabled");

        return Arc::new(UnconfiguredMailer);
    };

    match SmtpMailer::new(&settings) {
        Ok(mailer) => Arc::new(mailer),
        Err(mail_error) => {
            warn!("SMTP disabled, mailer could not be built: {mail_error}");

            Arc::new(UnconfiguredMailer)
        }
    }
}

/// Credentialed requests from the configured browser origin only.
fn cors(config: &ServerConfig) -> Result<CorsHandler, InvalidHeaderValue> {
    Ok(Cors::new()
        .allow_origin(AllowOrigin::exact(HeaderValue::from_str(&config.cors.client_url)?))
        .allow_credentials(true)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([AUTHORIZATION, CONTENT_TYPE]))
        .into_handler())
}
