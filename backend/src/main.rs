//! Backend entry-point: wires REST endpoints, session handling, and OpenAPI
//! docs over the in-memory adapter set.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::inbound::http::{self, health::HealthState, state::HttpState};
use backend::server::{Adapters, AppConfig, build_state, seed_example_data};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let key_path = config.session_key_file();
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            if cfg!(debug_assertions) || config.allow_ephemeral_session_key {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )));
            }
        }
    };

    let adapters = Adapters::new();
    if config.seed_example_data {
        seed_example_data(
            adapters.users.as_ref(),
            adapters.freights.as_ref(),
            Arc::new(DefaultClock),
        )
        .await
        .map_err(|e| std::io::Error::other(format!("seeding failed: {e}")))?;
    }
    let state = build_state(&adapters);

    let health_state = Arc::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = Arc::clone(&health_state);
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            Arc::clone(&server_health_state),
            key.clone(),
            cookie_secure,
        )
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    state: HttpState,
    health_state: Arc<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let app = App::new()
        .wrap(session)
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(health_state))
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}
