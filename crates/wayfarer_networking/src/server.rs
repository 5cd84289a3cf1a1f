//! # Session Server
//!
//! Hosts a [`WorldHost`] over TCP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   key bytes    ┌────────────────────┐
//! │ reader task  │ ─────────────> │ Arc<Mutex<World>>  │
//! │ (per client) │                └─────────┬──────────┘
//! └──────────────┘                          │ encode_frame
//! ┌──────────────┐   Arc<str>     ┌─────────▼──────────┐
//! │ writer task  │ <───────────── │ broadcast ticker   │
//! │ (per client) │   broadcast    │ (tick_rate Hz)     │
//! └──────────────┘                └────────────────────┘
//! ```
//!
//! Every world access takes the one lock, so inputs from all clients are
//! applied in arrival order. The lock is never held across an await point.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{NetError, NetResult};
use crate::integration::{Control, PlayerIndex, WorldHost};
use wayfarer_shared::{SERVER_PORT, TICK_RATE};

/// Frames buffered per subscriber before slow clients start skipping.
const FRAME_BACKLOG: usize = 16;

/// Bytes read from a socket per wakeup.
const READ_CHUNK: usize = 256;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_address: SocketAddr,
    /// World broadcasts per second.
    pub tick_rate: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, SERVER_PORT)),
            tick_rate: TICK_RATE,
        }
    }
}

impl ServerConfig {
    /// Time between broadcasts.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::InvalidConfig`] for a zero tick rate.
    pub fn tick_interval(&self) -> NetResult<Duration> {
        if self.tick_rate == 0 {
            return Err(NetError::InvalidConfig("tick_rate must be positive".into()));
        }
        Ok(Duration::from_secs(1) / self.tick_rate)
    }
}

/// A bound, not yet running, session server.
pub struct GameServer<W: WorldHost + 'static> {
    listener: TcpListener,
    world: Arc<Mutex<W>>,
    frames: broadcast::Sender<Arc<str>>,
    tick: Duration,
}

impl<W: WorldHost + 'static> GameServer<W> {
    /// Binds the listener.
    ///
    /// The caller keeps its own handle to `world` to drive the host player.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config or when the address cannot be bound.
    pub async fn bind(config: ServerConfig, world: Arc<Mutex<W>>) -> NetResult<Self> {
        let tick = config.tick_interval()?;
        let listener = TcpListener::bind(config.bind_address).await?;
        let (frames, _) = broadcast::channel(FRAME_BACKLOG);

        info!(
            "Session server bound to {} ({} Hz)",
            listener.local_addr()?,
            config.tick_rate
        );

        Ok(Self {
            listener,
            world,
            frames,
            tick,
        })
    }

    /// Address actually bound (useful with port 0).
    ///
    /// # Errors
    ///
    /// Propagates the socket error.
    pub fn local_addr(&self) -> NetResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Shared handle to the hosted world.
    #[must_use]
    pub fn world(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.world)
    }

    /// Encodes and sends a frame right away. Returns the number of
    /// subscribers it reached.
    pub fn broadcast_now(&self) -> usize {
        broadcast_frame(&self.world, &self.frames)
    }

    /// Accepts clients forever.
    ///
    /// # Errors
    ///
    /// See [`GameServer::run_until`].
    pub async fn run(self) -> NetResult<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accepts clients until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Currently infallible after binding; accept failures are logged and
    /// skipped.
    pub async fn run_until<F>(self, shutdown: F) -> NetResult<()>
    where
        F: Future<Output = ()>,
    {
        let ticker = spawn_ticker(Arc::clone(&self.world), self.frames.clone(), self.tick);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Session server shutting down");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let world = Arc::clone(&self.world);
                        let frames = self.frames.clone();
                        tokio::spawn(serve_connection(stream, addr, world, frames));
                    }
                    Err(e) => warn!("accept failed: {}", e),
                },
            }
        }

        ticker.abort();
        Ok(())
    }
}

fn spawn_ticker<W: WorldHost + 'static>(
    world: Arc<Mutex<W>>,
    frames: broadcast::Sender<Arc<str>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            broadcast_frame(&world, &frames);
        }
    })
}

fn broadcast_frame<W: WorldHost>(world: &Mutex<W>, frames: &broadcast::Sender<Arc<str>>) -> usize {
    if frames.receiver_count() == 0 {
        return 0;
    }
    let frame: Arc<str> = Arc::from(world.lock().encode_frame());
    // Err only when every subscriber left between the check and the send
    frames.send(frame).unwrap_or(0)
}

fn join_world<W: WorldHost>(world: &Mutex<W>) -> Option<PlayerIndex> {
    world.lock().join()
}

fn leave_world<W: WorldHost>(world: &Mutex<W>, player: PlayerIndex) {
    world.lock().leave(player);
}

/// Applies a batch of key bytes under one lock acquisition.
fn apply_keys<W: WorldHost>(world: &Mutex<W>, player: PlayerIndex, keys: &[u8]) -> Control {
    let mut world = world.lock();
    for &key in keys {
        if world.apply_input(player, key) == Control::Disconnect {
            return Control::Disconnect;
        }
    }
    Control::Continue
}

async fn serve_connection<W: WorldHost + 'static>(
    stream: TcpStream,
    addr: SocketAddr,
    world: Arc<Mutex<W>>,
    frames: broadcast::Sender<Arc<str>>,
) {
    let Some(player) = join_world(&world) else {
        warn!("Rejecting {}: world is full", addr);
        return;
    };
    info!("Player {} joined from {}", player, addr);

    let (mut reader, writer) = stream.into_split();
    // Subscribe before the first frame can be sent so the joiner sees itself
    let writer_task = tokio::spawn(forward_frames(writer, frames.subscribe(), player));

    let mut buf = [0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if apply_keys(&world, player, &buf[..n]) == Control::Disconnect {
                    debug!("Player {} quit", player);
                    break;
                }
            }
            Err(e) => {
                debug!("read from {} failed: {}", addr, e);
                break;
            }
        }
    }

    leave_world(&world, player);
    writer_task.abort();
    info!("Player {} left", player);
}

async fn forward_frames(
    mut writer: OwnedWriteHalf,
    mut frames: broadcast::Receiver<Arc<str>>,
    player: PlayerIndex,
) {
    loop {
        match frames.recv().await {
            Ok(frame) => {
                if writer.write_all(frame.as_bytes()).await.is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                debug!("Player {} lagging, skipped {} frames", player, skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
