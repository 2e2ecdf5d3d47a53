//! The stream capability the session handlers are written against.
//!
//! A transport hosts a call by handing the handler an [`Inbound`] source, an
//! [`Outbound`] sink, or both. Handlers never see the concrete transport.
//!
//! Two families of implementations ship with the library:
//!
//! - `tokio::sync::mpsc` receivers and senders, for in-process wiring and tests
//! - [`NdjsonInbound`], which decodes newline-delimited JSON out of any stream of
//!   byte chunks (an HTTP request or response body, for instance)

use std::fmt;
use std::marker::PhantomData;
use std::mem;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::error::{Result, TransportError};

/// Receiving half of a call.
#[async_trait]
pub trait Inbound<T> {
    /// Wait for the next message.
    ///
    /// `Ok(None)` marks the end of the stream; no message follows it.
    async fn receive(&mut self) -> Result<Option<T>>;
}

/// Sending half of a call.
#[async_trait]
pub trait Outbound<T> {
    /// Deliver one message to the peer.
    async fn send(&mut self, item: T) -> Result<()>;
}

#[async_trait]
impl<T: Send> Inbound<T> for mpsc::Receiver<T> {
    async fn receive(&mut self) -> Result<Option<T>> {
        Ok(self.recv().await)
    }
}

#[async_trait]
impl<T: Send> Outbound<T> for mpsc::Sender<T> {
    async fn send(&mut self, item: T) -> Result<()> {
        mpsc::Sender::send(self, item)
            .await
            .map_err(|_| TransportError::Closed)
    }
}

/// Longest NDJSON line accepted by default, newline excluded.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Incremental newline-delimited JSON decoder.
///
/// Bytes go in with [`LineDecoder::extend`] in whatever chunking the transport
/// delivers; complete lines come out as decoded values. Blank lines are
/// skipped. A line longer than the decoder's limit is a
/// [`TransportError::Protocol`] error.
pub struct LineDecoder<T> {
    buf: Vec<u8>,
    max_line: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for LineDecoder<T> {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_LEN)
    }
}

impl<T> LineDecoder<T> {
    /// Decoder that rejects lines longer than `max_line` bytes.
    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_line,
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> LineDecoder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer another chunk of input.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Decode the next complete line, if one is buffered.
    pub fn next_item(&mut self) -> Result<Option<T>> {
        while let Some(end) = self.buf.iter().position(|&b| b == b'\n') {
            self.check_len(end)?;
            let line: Vec<u8> = self.buf.drain(..=end).collect();
            if let Some(item) = decode_line(&line)? {
                return Ok(Some(item));
            }
        }
        self.check_len(self.buf.len())?;
        Ok(None)
    }

    /// Decode whatever trails the last newline once input has ended.
    pub fn finish(&mut self) -> Result<Option<T>> {
        self.check_len(self.buf.len())?;
        let rest = mem::take(&mut self.buf);
        decode_line(&rest)
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_line {
            return Err(TransportError::Protocol(format!(
                "line exceeds {} bytes",
                self.max_line
            )));
        }
        Ok(())
    }
}

fn decode_line<T: DeserializeOwned>(line: &[u8]) -> Result<Option<T>> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(line)
        .map(Some)
        .map_err(TransportError::Decode)
}

/// Serialize `item` as one NDJSON line, trailing newline included.
pub fn encode_line<T: Serialize>(item: &T) -> Result<String> {
    let mut line = serde_json::to_string(item).map_err(TransportError::Encode)?;
    line.push('\n');
    Ok(line)
}

/// [`Inbound`] over a stream of byte chunks carrying newline-delimited JSON.
pub struct NdjsonInbound<S, T> {
    chunks: S,
    decoder: LineDecoder<T>,
    exhausted: bool,
}

impl<S, T> NdjsonInbound<S, T> {
    pub fn new(chunks: S) -> Self {
        Self {
            chunks,
            decoder: LineDecoder::default(),
            exhausted: false,
        }
    }
}

impl<S, T> fmt::Debug for NdjsonInbound<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdjsonInbound")
            .field("buffered", &self.decoder.buf.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

#[async_trait]
impl<S, B, E, T> Inbound<T> for NdjsonInbound<S, T>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin + Send,
    B: AsRef<[u8]> + Send,
    E: fmt::Display + Send,
    T: DeserializeOwned + Send,
{
    async fn receive(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.decoder.next_item()? {
                return Ok(Some(item));
            }
            if self.exhausted {
                return self.decoder.finish();
            }
            match self.chunks.next().await {
                Some(Ok(chunk)) => self.decoder.extend(chunk.as_ref()),
                Some(Err(e)) => return Err(TransportError::Io(e.to_string())),
                None => self.exhausted = true,
            }
        }
    }
}
