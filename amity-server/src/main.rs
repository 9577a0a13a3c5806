use amity_core::config::load_core_config;
use amity_core::logging;
use amity_store::{UserApiBuilder, UserServiceConfig, UserStore};
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "amity")]
#[command(about = "In-memory user and friendship service", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "AMITY_HTTP_BIND")]
    bind: Option<String>,
    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "AMITY_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_core_config().context("failed to load configuration")?;

    let level = cli.log_level.as_deref().or(config.log_level.as_deref());
    if let Err(err) = logging::init_tracing(level) {
        eprintln!("failed to initialise tracing: {err}");
    }

    let mut service_config = UserServiceConfig::from(&config);
    if let Some(bind) = cli.bind {
        service_config.bind_address = bind;
    }

    info!(
        node = %config.node_name,
        environment = ?config.environment,
        bind = %service_config.bind_address,
        "starting amity"
    );

    UserApiBuilder::new(UserStore::new())
        .run(service_config, shutdown_signal())
        .await
        .context("amity server terminated with error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
