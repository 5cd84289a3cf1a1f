//! # Session Client
//!
//! Minimal client: sends raw key bytes and reads whole frames.

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

use crate::error::{NetError, NetResult};
use wayfarer_shared::{Frame, FrameDecoder, ProtocolError, MAX_LINE_LEN};

/// Bytes read per line at most: the longest record plus `\r\n`.
const LINE_LIMIT: u64 = MAX_LINE_LEN as u64 + 2;

/// A connection to a session server.
pub struct GameClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    decoder: FrameDecoder,
    line: String,
}

impl GameClient {
    /// Connects to a server.
    ///
    /// # Errors
    ///
    /// Propagates the connect error.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> NetResult<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        debug!("Connected to {}", stream.peer_addr()?);
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
            decoder: FrameDecoder::new(),
            line: String::new(),
        })
    }

    /// Sends one key byte.
    ///
    /// # Errors
    ///
    /// Propagates the write error.
    pub async fn send_key(&mut self, key: u8) -> NetResult<()> {
        self.send_keys(&[key]).await
    }

    /// Sends several key bytes in one write.
    ///
    /// # Errors
    ///
    /// Propagates the write error.
    pub async fn send_keys(&mut self, keys: &[u8]) -> NetResult<()> {
        self.writer.write_all(keys).await?;
        Ok(())
    }

    /// Reads until the next complete frame.
    ///
    /// # Errors
    ///
    /// [`NetError::ConnectionClosed`] at end of stream, or a protocol error
    /// for a malformed line. A line longer than any record is rejected
    /// without buffering the rest of it; the connection should then be
    /// dropped.
    pub async fn next_frame(&mut self) -> NetResult<Frame> {
        loop {
            self.line.clear();
            let read = (&mut self.reader)
                .take(LINE_LIMIT)
                .read_line(&mut self.line)
                .await?;
            if read == 0 {
                return Err(NetError::ConnectionClosed);
            }
            if read as u64 == LINE_LIMIT && !self.line.ends_with('\n') {
                return Err(ProtocolError::LineTooLong { max: MAX_LINE_LEN }.into());
            }
            if let Some(frame) = self.decoder.feed_line(&self.line)? {
                return Ok(frame);
            }
        }
    }
}
