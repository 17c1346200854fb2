//! Backend entry-point: loads settings, picks the store and serves the API.

mod server;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use banking_backend::inbound::http::health::HealthState;
use banking_backend::inbound::http::session_config::{BuildMode, load_session_key};
use banking_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use banking_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

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

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let key = load_session_key(
        &settings.session_key_file(),
        BuildMode::from_debug_assertions(),
        settings.session_allow_ephemeral(),
    )
    .map_err(|err| std::io::Error::other(err.to_string()))?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr);
    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
