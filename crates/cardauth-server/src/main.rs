//! Card Authenticator Server Binary
//!
//! Runs the authenticator HTTP server against the configured identity
//! platform.

use std::env;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cardauth_bridge::{ActionFlowResolver, HttpPlatformClient};
use cardauth_server::{
    create_router, load_identities, AppState, AuthenticatorConfig, IdentityLookup, MemoryUserStore,
    SessionStore, UserActionDispatcher, UserStore,
};

#[tokio::main]
async fn main() {
    // Initialize logging
    let log_level = env::var("CARDAUTH_LOG_LEVEL")
        .unwrap_or_else(|_| "info".into())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Authenticator stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthenticatorConfig::from_env()?;

    let platform = Arc::new(HttpPlatformClient::new(config.platform_config())?);
    let resolver = Arc::new(ActionFlowResolver::with_defaults(config.success_code));

    let users: Arc<dyn UserStore> = match &config.users_file {
        Some(path) => {
            let identities = load_identities(path)?;
            info!(path = %path.display(), count = identities.len(), "Loaded users");
            Arc::new(MemoryUserStore::with_identities(identities))
        }
        None => {
            warn!("CARDAUTH_USERS_FILE is not set; the user store is empty");
            Arc::new(MemoryUserStore::new())
        }
    };

    let dispatcher =
        UserActionDispatcher::new(platform, resolver, IdentityLookup::new(users.clone()))
            .with_sender(config.idp_sender.clone());

    if config.debug_mode {
        info!("Debug mode is enabled: verification mismatches are logged, not rejected");
    }

    info!(
        platform_url = %config.platform_url,
        success_code = config.success_code,
        port = config.port,
        "Starting card authenticator"
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState {
        sessions: SessionStore::new(config.session_ttl),
        config,
        dispatcher,
        users,
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Card authenticator listening");

    axum::serve(listener, app).await?;
    Ok(())
}
