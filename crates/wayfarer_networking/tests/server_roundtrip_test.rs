//! # Server Round-Trip Test
//!
//! Runs a real server on a loopback port against a small in-memory world
//! and talks to it with the client.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::time::timeout;
use wayfarer_networking::{
    Control, GameClient, GameServer, NetError, PlayerIndex, ServerConfig, WorldHost,
};
use wayfarer_shared::{Frame, FrameEncoder, PlayerRecord, ProtocolError, TileRecord, MAX_LINE_LEN};

const WAIT: Duration = Duration::from_secs(5);

/// Open plane; every player starts at (0, 0).
struct PlaneWorld {
    capacity: usize,
    next: u32,
    players: BTreeMap<u32, (i32, i32)>,
}

impl PlaneWorld {
    fn new(capacity: usize) -> Self {
        let mut players = BTreeMap::new();
        players.insert(0, (0, 0));
        Self {
            capacity,
            next: 1,
            players,
        }
    }
}

impl WorldHost for PlaneWorld {
    fn join(&mut self) -> Option<PlayerIndex> {
        if self.players.len() >= self.capacity {
            return None;
        }
        let index = self.next;
        self.next += 1;
        self.players.insert(index, (0, 0));
        Some(PlayerIndex(index))
    }

    fn leave(&mut self, player: PlayerIndex) {
        self.players.remove(&player.0);
    }

    fn apply_input(&mut self, player: PlayerIndex, key: u8) -> Control {
        let Some(pos) = self.players.get_mut(&player.0) else {
            return Control::Continue;
        };
        match key {
            b'd' => pos.0 += 1,
            b'a' => pos.0 -= 1,
            b'q' => return Control::Disconnect,
            _ => {}
        }
        Control::Continue
    }

    fn encode_frame(&self) -> String {
        let mut encoder = FrameEncoder::with_capacity(1 + self.players.len());
        encoder.push_tile(TileRecord {
            world_x: 0,
            world_y: 0,
            tile: 0,
            difficulty: 1,
        });
        for (&index, &(x, y)) in &self.players {
            encoder.push_player(PlayerRecord {
                index,
                x,
                y,
                is_host: index == 0,
            });
        }
        encoder.finish()
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }
}

struct Running {
    addr: std::net::SocketAddr,
    world: Arc<Mutex<PlaneWorld>>,
    shutdown: oneshot::Sender<()>,
}

async fn start(capacity: usize) -> Running {
    let world = Arc::new(Mutex::new(PlaneWorld::new(capacity)));
    let config = ServerConfig {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        tick_rate: 50,
    };
    let server = GameServer::bind(config, Arc::clone(&world)).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();
    tokio::spawn(server.run_until(async move {
        let _ = rx.await;
    }));
    Running {
        addr,
        world,
        shutdown,
    }
}

async fn frame_where<F: Fn(&Frame) -> bool>(client: &mut GameClient, pred: F) -> Frame {
    timeout(WAIT, async {
        loop {
            let frame = client.next_frame().await.unwrap();
            if pred(&frame) {
                return frame;
            }
        }
    })
    .await
    .expect("no matching frame in time")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_joined_player_appears_in_frames() {
    let running = start(4).await;
    let mut client = GameClient::connect(running.addr).await.unwrap();

    let frame = frame_where(&mut client, |f| f.player(1).is_some()).await;
    assert_eq!(frame.players.len(), 2);
    assert!(frame.host().is_some());
    assert!(!frame.player(1).unwrap().is_host);
    assert_eq!(frame.tiles.len(), 1);

    let _ = running.shutdown.send(());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_key_moves_remote_player() {
    let running = start(4).await;
    let mut client = GameClient::connect(running.addr).await.unwrap();
    frame_where(&mut client, |f| f.player(1).is_some()).await;

    client.send_key(b'd').await.unwrap();
    let frame = frame_where(&mut client, |f| f.player(1).is_some_and(|p| p.x == 1)).await;

    // Host did not move
    assert_eq!(frame.host().map(|p| (p.x, p.y)), Some((0, 0)));
    let _ = running.shutdown.send(());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_world_closes_connection() {
    // Capacity 1: only the host fits
    let running = start(1).await;
    let mut client = GameClient::connect(running.addr).await.unwrap();

    let result = timeout(WAIT, client.next_frame()).await.unwrap();
    assert!(matches!(result, Err(NetError::ConnectionClosed | NetError::Io(_))));
    assert_eq!(running.world.lock().player_count(), 1);

    let _ = running.shutdown.send(());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quit_key_removes_player() {
    let running = start(4).await;
    let mut client = GameClient::connect(running.addr).await.unwrap();
    frame_where(&mut client, |f| f.player(1).is_some()).await;
    assert_eq!(running.world.lock().player_count(), 2);

    client.send_key(b'q').await.unwrap();

    timeout(WAIT, async {
        while running.world.lock().player_count() != 1 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("player never removed");

    let _ = running.shutdown.send(());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_client_rejects_endless_line() {
    use tokio::io::AsyncWriteExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        // A megabyte with no newline in sight
        let junk = vec![b'A'; 1 << 20];
        let _ = stream.write_all(&junk).await;
        let _ = stream.shutdown().await;
    });

    let mut client = GameClient::connect(addr).await.unwrap();
    let result = timeout(WAIT, client.next_frame()).await.unwrap();
    assert!(matches!(
        result,
        Err(NetError::Protocol(ProtocolError::LineTooLong { max: MAX_LINE_LEN }))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_client_accepts_longest_record() {
    use tokio::io::AsyncWriteExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let player = PlayerRecord {
        index: u32::MAX,
        x: i32::MIN,
        y: i32::MIN,
        is_host: false,
    };
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let text = format!("{player}\r\nEND\r\n");
        let _ = stream.write_all(text.as_bytes()).await;
    });

    let mut client = GameClient::connect(addr).await.unwrap();
    let frame = timeout(WAIT, client.next_frame()).await.unwrap().unwrap();
    assert_eq!(frame.players, vec![player]);
}
