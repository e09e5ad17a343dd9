//! Logging setup for the runner.

use anyhow::Result;
use colony_core::PresenterKind;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
///
/// The terminal presenter redraws the board on the same tty, so per-generation
/// debug events stay off unless asked for.
pub fn default_filter(presenter: PresenterKind) -> &'static str {
    match presenter {
        PresenterKind::Terminal => "info",
        PresenterKind::Headless => "info,colony_world=debug,colony_runner=debug",
    }
}

/// Install the global subscriber.
///
/// Logs go to stderr so they never interleave with the terminal board on
/// stdout. `RUST_LOG` overrides the default filter and
/// `COLONY_LOG_FORMAT=json` switches to structured JSON lines.
pub fn init_logging(presenter: PresenterKind) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(presenter).into());

    let json = std::env::var("COLONY_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    info!("Logging initialized");
    Ok(())
}
