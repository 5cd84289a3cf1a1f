//! # WAYFARER Server
//!
//! Multiplayer host. The host player is driven from stdin, one line of keys
//! at a time, like the single player binary. Remote players connect over
//! TCP, send raw key bytes and receive a text frame every tick.
//!
//! ## Usage
//!
//! ```bash
//! wayfarer_server [config.toml]
//! ```

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info};
use wayfarer::networking::{Control, GameServer, PlayerIndex, WorldHost};
use wayfarer::{init_logging, load_config, parse_args, Invocation, GameResult, MultiplayerWorld, Session};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let Invocation::Run { config: config_path } = parse_args(&args) else {
        println!("Usage: wayfarer_server [--config <PATH> | PATH]");
        println!();
        println!("Host keys are read from stdin. Stop with Ctrl-C or the quit key.");
        return ExitCode::SUCCESS;
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("cannot start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config_path.as_deref())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config_path: Option<&str>) -> GameResult<()> {
    let config = load_config(config_path)?;
    let host = Session::from_config(&config)?;
    let world = Arc::new(Mutex::new(MultiplayerWorld::new(host, config.server.max_players)));

    let server = GameServer::bind(config.server_config()?, Arc::clone(&world)).await?;
    info!(
        "Hosting on {} for up to {} players",
        server.local_addr()?,
        config.server.max_players
    );

    let (quit_tx, quit_rx) = tokio::sync::oneshot::channel::<()>();
    spawn_host_input(Arc::clone(&world), quit_tx);

    server
        .run_until(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("Interrupted"),
                // A dropped sender means stdin closed; keep serving
                Ok(()) = quit_rx => info!("Host quit"),
            }
        })
        .await?;
    Ok(())
}

/// Reads host keys on a plain thread; stdin has no async reader here.
fn spawn_host_input(world: Arc<Mutex<MultiplayerWorld>>, quit: tokio::sync::oneshot::Sender<()>) {
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let mut host = world.lock();
            for key in line.bytes() {
                if host.apply_input(PlayerIndex::HOST, key) == Control::Disconnect {
                    drop(host);
                    let _ = quit.send(());
                    return;
                }
            }
            info!("{}", host.host().hud());
        }
    });
}
