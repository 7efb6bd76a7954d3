//! Plays the match in a terminal.
//!
//! Up/W and Down/S move the right paddle; either one serves. Q, Esc or
//! Ctrl-C quit. Logs go to stderr, filtered by `RUST_LOG`.

mod config;
mod input;
mod terminal;

use anyhow::{Context, Result};
use pong_core::{MatchController, MatchState};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::TermConfig;
use crate::terminal::TerminalPort;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = TermConfig::from_env()?;
    info!(frame_hz = config.core.frame_hz, scale = config.scale, "starting");

    let mut port = TerminalPort::new(&config).context("failed to set up the terminal")?;
    let result = run(&mut port, &config);
    // Restore the terminal before any error is printed
    drop(port);
    result
}

fn run(port: &mut TerminalPort, config: &TermConfig) -> Result<()> {
    let mut controller = MatchController::new(port, &config.core)?;
    let mut last_state = controller.state();

    loop {
        port.poll_events()?;
        if port.quit_requested() {
            info!(frames = controller.frame(), "quit");
            return Ok(());
        }

        let frame = controller.frame();
        let state = controller.step(port);
        port.take_failure().context("failed to draw the frame")?;

        if state != last_state {
            info!(?state, score = ?controller.score(), "match state");
            last_state = state;
        }
        // A frozen match presents nothing; keep the loop at frame rate
        if state == MatchState::Frozen && controller.frame() == frame {
            port.idle();
        }
    }
}
