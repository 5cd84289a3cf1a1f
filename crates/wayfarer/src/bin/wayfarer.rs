//! # WAYFARER
//!
//! Headless single player. Reads keys from stdin one line at a time,
//! applies every character of the line, then prints the viewport and the
//! HUD line.
//!
//! ## Usage
//!
//! ```bash
//! wayfarer [config.toml]
//! printf 'dddd\nssss\nq\n' | wayfarer
//! ```

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use wayfarer::{init_logging, load_config, parse_args, Invocation, GameResult, InputOutcome, Session, TextSurface};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let Invocation::Run { config: config_path } = parse_args(&args) else {
        println!("Usage: wayfarer [--config <PATH> | PATH]");
        println!();
        println!("Reads key characters from stdin, one line per turn batch.");
        return ExitCode::SUCCESS;
    };

    match run(config_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<&str>) -> GameResult<()> {
    let config = load_config(config_path)?;
    let mut session = Session::from_config(&config)?;
    let mut surface = TextSurface::new(config.viewport.width, config.viewport.height);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&session, &mut surface, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut quit = false;
        for key in line.bytes() {
            if session.process_input(key) == InputOutcome::Quit {
                quit = true;
                break;
            }
        }
        render(&session, &mut surface, &mut out)?;
        if quit {
            break;
        }
    }

    let stats = session.world().stats();
    tracing::info!(
        "Session over: {} chunks generated, {} evicted",
        stats.generated_total,
        stats.evicted_total
    );
    Ok(())
}

fn render(session: &Session, surface: &mut TextSurface, out: &mut impl Write) -> GameResult<()> {
    surface.clear();
    session.draw(surface);
    write!(out, "{surface}")?;
    writeln!(out, "{}", session.hud())?;
    out.flush()?;
    Ok(())
}
