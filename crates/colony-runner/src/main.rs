//! Interactive runner for the Colony simulation.

use anyhow::{Context, Result};
use colony_core::RunConfig;
use colony_runner::session::{self, SessionEnd};
use colony_runner::{presenter, telemetry};
use colony_world::Simulation;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    telemetry::init_logging(config.presenter)?;

    let seed = config.seed.unwrap_or_else(rand::random);

    let mut sim = Simulation::new(config.world.clone(), seed)
        .context("failed to initialize the world")?;
    let mut presenter = presenter::from_config(&config);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    loop {
        info!(
            width = config.world.width,
            height = config.world.height,
            cell_size = config.display.cell_size,
            seed,
            "Starting Game of Life"
        );

        let end = session::run_session(&mut sim, presenter.as_mut(), &config, &mut shutdown).await?;
        info!(reason = ?end, "Game ended after {} generations", sim.generation());

        if end == SessionEnd::Interrupted
            || !session::prompt_restart(&mut stdin, &mut stdout, &mut shutdown).await?
        {
            break;
        }
        sim.restart()?;
    }

    info!("Shutting down");
    Ok(())
}

/// Defaults, overlaid by the JSON file named in `COLONY_CONFIG` and the seed
/// in `COLONY_SEED`.
fn load_config() -> Result<RunConfig> {
    let mut config = match std::env::var("COLONY_CONFIG") {
        Ok(path) => RunConfig::from_json_file(&path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        Err(_) => RunConfig::default(),
    };

    if let Ok(seed) = std::env::var("COLONY_SEED") {
        let seed = seed
            .parse::<u64>()
            .with_context(|| format!("COLONY_SEED must be an unsigned integer, got {seed:?}"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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
