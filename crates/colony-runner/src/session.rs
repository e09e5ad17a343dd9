//! The paced run loop for one game session.

use crate::presenter::PresentationPort;
use colony_core::{Result, RunConfig};
use colony_world::Simulation;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, instrument};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No male or female left on the board.
    Extinct,
    /// `max_generations` reached.
    GenerationCap,
    /// The exit signal fired between generations.
    Interrupted,
}

/// Step `sim` once per frame until extinction, the generation cap, or
/// `shutdown` resolves. A generation is never cut short: the exit signal is
/// only observed between steps.
#[instrument(skip_all, fields(seed = sim.seed()))]
pub async fn run_session<S>(
    sim: &mut Simulation,
    presenter: &mut dyn PresentationPort,
    config: &RunConfig,
    shutdown: &mut S,
) -> Result<SessionEnd>
where
    S: Future<Output = ()> + Unpin,
{
    let mut frames = interval(Duration::from_millis(config.frame_delay_ms.max(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    presenter.present(sim.state(), sim.generation())?;

    loop {
        tokio::select! {
            biased;
            _ = &mut *shutdown => {
                info!(generation = sim.generation(), "Exit requested");
                return Ok(SessionEnd::Interrupted);
            }
            _ = frames.tick() => {}
        }

        let report = sim.advance();
        presenter.present(sim.state(), sim.generation())?;

        let generation = sim.generation();
        if generation % config.report_interval == 0 {
            info!(
                event = "population_report",
                generation,
                total_live = report.census.total(),
                males = report.census.males,
                females = report.census.females,
                "Generation {} - Total Live Cells: {} (Males: {}, Females: {})",
                generation,
                report.census.total(),
                report.census.males,
                report.census.females
            );
        }

        if report.census.is_extinct() {
            info!(generation, "All cells are dead. Game over.");
            return Ok(SessionEnd::Extinct);
        }

        if config.max_generations.is_some_and(|max| generation >= max) {
            return Ok(SessionEnd::GenerationCap);
        }
    }
}

/// Ask whether to play again. Only an answer of `y` restarts; end of input or
/// the exit signal firing while waiting both decline.
pub async fn prompt_restart<R, W, S>(
    input: &mut R,
    output: &mut W,
    shutdown: &mut S,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()> + Unpin,
{
    output
        .write_all(b"Do you want to restart the game? (y/n): ")
        .await?;
    output.flush().await?;

    let mut answer = String::new();
    let read = tokio::select! {
        biased;
        _ = &mut *shutdown => {
            info!("Exit requested at the restart prompt");
            return Ok(false);
        }
        read = input.read_line(&mut answer) => read?,
    };

    Ok(read > 0 && answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::HeadlessPresenter;
    use colony_core::{Lifespan, WorldConfig};
    use colony_world::{Grid, WorldState};

    fn fast_config(world: WorldConfig, max_generations: Option<u64>) -> RunConfig {
        RunConfig {
            seed: Some(1),
            max_generations,
            frame_delay_ms: 1,
            world,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stops_at_generation_cap() {
        let world = WorldConfig {
            width: 20,
            height: 20,
            ..Default::default()
        };
        let config = fast_config(world.clone(), Some(12));
        let mut sim = Simulation::new(world, 1).unwrap();
        let mut presenter = HeadlessPresenter::new(config.display.clone(), 10);
        let mut shutdown = std::future::pending::<()>();

        let end = run_session(&mut sim, &mut presenter, &config, &mut shutdown)
            .await
            .unwrap();

        if end == SessionEnd::GenerationCap {
            assert_eq!(sim.generation(), 12);
            assert_eq!(presenter.frames_presented(), 13);
        } else {
            assert_eq!(end, SessionEnd::Extinct);
            assert!(sim.generation() <= 12);
        }
    }

    #[tokio::test]
    async fn test_stops_on_extinction() {
        let world = WorldConfig {
            width: 2,
            height: 1,
            ..Default::default()
        };
        let cells = Grid::from_rows(&["F."]).unwrap();
        let state = WorldState::with_uniform_lifespan(cells, Lifespan::new(0, 3));
        let config = fast_config(world.clone(), None);
        let mut sim = Simulation::from_state(world, state, 0).unwrap();
        let mut presenter = HeadlessPresenter::new(config.display.clone(), 10);
        let mut shutdown = std::future::pending::<()>();

        let end = run_session(&mut sim, &mut presenter, &config, &mut shutdown)
            .await
            .unwrap();

        assert_eq!(end, SessionEnd::Extinct);
        assert_eq!(sim.generation(), 4);
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_between_generations() {
        let world = WorldConfig {
            width: 10,
            height: 10,
            ..Default::default()
        };
        let config = fast_config(world.clone(), None);
        let mut sim = Simulation::new(world, 3).unwrap();
        let mut presenter = HeadlessPresenter::new(config.display.clone(), 10);
        let mut shutdown = std::future::ready(());

        let end = run_session(&mut sim, &mut presenter, &config, &mut shutdown)
            .await
            .unwrap();

        assert_eq!(end, SessionEnd::Interrupted);
        assert_eq!(presenter.frames_presented(), 1);
    }

    #[tokio::test]
    async fn test_prompt_restart_reads_answer() {
        let mut shutdown = std::future::pending::<()>();
        let cases: [(&[u8], bool); 4] = [
            (b"y\n", true),
            (b"Y\n", true),
            (b"n\n", false),
            (b"", false),
        ];

        for (input, expected) in cases {
            let mut input = input;
            let mut output = Vec::new();
            let restart = prompt_restart(&mut input, &mut output, &mut shutdown)
                .await
                .unwrap();
            assert_eq!(restart, expected);
            assert!(String::from_utf8(output).unwrap().contains("(y/n)"));
        }
    }

    #[tokio::test]
    async fn test_shutdown_declines_restart_prompt() {
        let mut input: &[u8] = b"y\n";
        let mut output = Vec::new();
        let mut shutdown = std::future::ready(());

        let restart = prompt_restart(&mut input, &mut output, &mut shutdown)
            .await
            .unwrap();
        assert!(!restart);
    }
}
