// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use formflow_core::{resolve_db_path, ENV_FORMFLOW_LOG_JSON};
use formflow_server::{
    build_router, ApiConfig, AppState, FixedBackoff, RetryPolicy, CONFIG_SCHEMA_VERSION,
    DEFAULT_BIND_ADDR, DEFAULT_CORS_ORIGINS,
};
use formflow_store::Store;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_list(name: &str, default: &[&str]) -> Vec<String> {
    match env_non_empty(name) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        None => default.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool(ENV_FORMFLOW_LOG_JSON, true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn api_config_from_env() -> ApiConfig {
    let defaults = ApiConfig::default();
    ApiConfig {
        max_body_bytes: env_usize("FORMFLOW_MAX_BODY_BYTES", defaults.max_body_bytes),
        token_secret: env_non_empty("FORMFLOW_TOKEN_SECRET"),
        token_ttl: Duration::from_secs(env_u64(
            "FORMFLOW_TOKEN_TTL_SECS",
            defaults.token_ttl.as_secs(),
        )),
        cors_allowed_origins: env_list("FORMFLOW_CORS_ALLOWED_ORIGINS", &DEFAULT_CORS_ORIGINS),
        external_totalusers_url: env_non_empty("FORMFLOW_EXTERNAL_TOTALUSERS_URL"),
        external_retry: RetryPolicy {
            max_attempts: env_usize(
                "FORMFLOW_EXTERNAL_RETRY_ATTEMPTS",
                defaults.external_retry.max_attempts,
            ),
            backoff: FixedBackoff {
                delay_ms: env_u64(
                    "FORMFLOW_EXTERNAL_RETRY_DELAY_MS",
                    defaults.external_retry.backoff.delay_ms,
                ),
            },
        },
        external_timeout: defaults.external_timeout,
        targeting_level_override: env_non_empty("FORMFLOW_TARGETING_LEVEL_OVERRIDE"),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("FORMFLOW_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let api_cfg = api_config_from_env();
    api_cfg.validate()?;
    info!(
        schema_version = CONFIG_SCHEMA_VERSION,
        config = %serde_json::to_string(&api_cfg).unwrap_or_default(),
        "effective config"
    );

    let db_path = resolve_db_path();
    let store = Store::open(&db_path)
        .map_err(|e| format!("open database {}: {e}", db_path.display()))?;
    if env_bool("FORMFLOW_SEED_MASTER_DATA", true) {
        match store.seed_master_data_if_empty() {
            Ok(true) => info!("master data seeded"),
            Ok(false) => {}
            Err(e) => warn!("master data seeding failed: {e}"),
        }
    }

    let state = AppState::new(Arc::new(store), api_cfg);
    let app = build_router(state);

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!(db = %db_path.display(), "formflow-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                error!("cannot install SIGTERM handler: {e}");
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("ctrl_c handler failed: {e}");
                }
                return;
            }
        };
        tokio::select! {
            _ = term.recv() => info!("SIGTERM received"),
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => info!("SIGINT received"),
                Err(e) => error!("ctrl_c handler failed: {e}"),
            },
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("ctrl_c handler failed: {e}");
        }
    }
}
