//! Arcade Runner entry point
//!
//! Terminal host: builds the session from the environment config and runs
//! the fixed-timestep loop until quit.

use std::io::{self, BufWriter, Stdout, stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event},
    terminal,
};

use arcade_runner::audio::{AudioManager, TerminalBell};
use arcade_runner::consts::{DEFAULT_SEED, MAX_SUBSTEPS};
use arcade_runner::platform::{FixedStep, InputCollector, TerminalRenderer};
use arcade_runner::sim::{GameSession, LogNotifier, Notifier, TickInput};
use arcade_runner::{ConfigError, GameConfig};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let config = GameConfig::from_env()?;
    let seed = clock_seed(SystemTime::now());
    let notifier = (AudioManager::new(TerminalBell::new(stdout())), LogNotifier);
    let mut session = GameSession::new(config, seed, notifier)?;
    log::info!("Game initialized with seed: {}", seed);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = run(&mut out, &mut session);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result
}

/// Nanoseconds since the epoch, or the default seed if that does not fit
fn clock_seed(now: SystemTime) -> u64 {
    now.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| u64::try_from(d.as_nanos()).ok())
        .unwrap_or(DEFAULT_SEED)
}

fn run<N: Notifier>(
    out: &mut BufWriter<Stdout>,
    session: &mut GameSession<N>,
) -> Result<(), AppError> {
    let (cols, rows) = terminal::size()?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;
    let mut renderer = TerminalRenderer::new(&mut *out, cols, rows);
    let mut input = InputCollector::new();
    let mut clock = FixedStep::new(session.config().screen.tick_rate_hz, MAX_SUBSTEPS);
    let mut last = Instant::now();

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => input.handle_key(&key),
                Event::Resize(cols, rows) => {
                    renderer.resize(cols, rows);
                    renderer
                        .writer_mut()
                        .execute(terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }
        if input.quit_requested() {
            log::info!("Quit requested");
            return Ok(());
        }

        let now = Instant::now();
        let steps = clock.advance(now - last);
        last = now;

        // Input belongs to the first tick of the frame only
        for i in 0..steps {
            let tick_input = if i == 0 {
                input.take()
            } else {
                TickInput::default()
            };
            session.tick(&tick_input);
        }

        if steps > 0 {
            renderer.render(&session.snapshot())?;
        }

        // Wake early on input, otherwise sleep until the next tick
        event::poll(clock.until_next())?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_seed() {
        let now = UNIX_EPOCH + Duration::from_nanos(1_234_567);
        assert_eq!(clock_seed(now), 1_234_567);
        assert_eq!(clock_seed(UNIX_EPOCH - Duration::from_secs(1)), DEFAULT_SEED);
        // Past u64::MAX nanoseconds (year 2554) the count no longer fits
        let far = UNIX_EPOCH + Duration::from_secs(u64::MAX / 1_000_000_000 + 1);
        assert_eq!(clock_seed(far), DEFAULT_SEED);
    }
}
