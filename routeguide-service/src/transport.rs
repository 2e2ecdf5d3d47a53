//! WebSocket adapters for `RouteChat`.
//!
//! A chat socket is split into its two halves; [`WsInbound`] reads notes out
//! of incoming text (or binary) frames and [`WsOutbound`] writes each outgoing
//! note as one text frame. A Close frame from the peer ends the inbound side.

use std::fmt;

use async_trait::async_trait;
use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream, StreamExt};
use routeguide::{Inbound, Outbound, Result, RouteNote, TransportError};

/// Inbound notes read from WebSocket frames.
pub struct WsInbound<S> {
    frames: S,
}

impl<S> WsInbound<S> {
    pub fn new(frames: S) -> Self {
        Self { frames }
    }
}

#[async_trait]
impl<S, E> Inbound<RouteNote> for WsInbound<S>
where
    S: Stream<Item = std::result::Result<Message, E>> + Unpin + Send,
    E: fmt::Display + Send,
{
    async fn receive(&mut self) -> Result<Option<RouteNote>> {
        while let Some(frame) = self.frames.next().await {
            match frame.map_err(|e| TransportError::Io(e.to_string()))? {
                Message::Text(text) => {
                    return serde_json::from_str(&text)
                        .map(Some)
                        .map_err(TransportError::Decode)
                }
                Message::Binary(bytes) => {
                    return serde_json::from_slice(&bytes)
                        .map(Some)
                        .map_err(TransportError::Decode)
                }
                Message::Close(_) => return Ok(None),
                // Keep-alives carry no notes
                Message::Ping(_) | Message::Pong(_) => continue,
            }
        }
        Ok(None)
    }
}

/// Outbound notes written as WebSocket text frames.
pub struct WsOutbound<S> {
    frames: S,
}

impl<S> WsOutbound<S> {
    pub fn new(frames: S) -> Self {
        Self { frames }
    }

    pub fn into_inner(self) -> S {
        self.frames
    }
}

#[async_trait]
impl<S, E> Outbound<RouteNote> for WsOutbound<S>
where
    S: Sink<Message, Error = E> + Unpin + Send,
    E: fmt::Display + Send,
{
    async fn send(&mut self, note: RouteNote) -> Result<()> {
        let text = serde_json::to_string(&note).map_err(TransportError::Encode)?;
        self.frames
            .send(Message::Text(text))
            .await
            .map_err(|e| TransportError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::stream;
    use routeguide::Point;

    type Frame = std::result::Result<Message, std::io::Error>;

    #[tokio::test]
    async fn test_inbound_reads_text_and_binary_frames() {
        let frames: Vec<Frame> = vec![
            Ok(Message::Text(
                r#"{"location":{"latitude":0,"longitude":1},"message":"First message"}"#.to_string(),
            )),
            Ok(Message::Ping(vec![1, 2, 3])),
            Ok(Message::Binary(
                br#"{"location":{"latitude":0,"longitude":2},"message":"Second message"}"#.to_vec(),
            )),
            Ok(Message::Close(None)),
            Ok(Message::Text("ignored after close".to_string())),
        ];
        let mut inbound = WsInbound::new(stream::iter(frames));

        let first = inbound.receive().await.unwrap().unwrap();
        assert_eq!(first, RouteNote::new(Point::new(0, 1), "First message"));
        let second = inbound.receive().await.unwrap().unwrap();
        assert_eq!(second, RouteNote::new(Point::new(0, 2), "Second message"));
        assert!(inbound.receive().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inbound_rejects_malformed_note() {
        let frames: Vec<Frame> = vec![Ok(Message::Text("{\"message\": 5}".to_string()))];
        let mut inbound = WsInbound::new(stream::iter(frames));
        assert!(matches!(
            inbound.receive().await,
            Err(TransportError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_inbound_propagates_socket_error() {
        let frames: Vec<Frame> = vec![Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset by peer",
        ))];
        let mut inbound = WsInbound::new(stream::iter(frames));
        match inbound.receive().await {
            Err(TransportError::Io(msg)) => assert!(msg.contains("reset by peer")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_outbound_writes_text_frames() {
        let (tx, mut rx) = mpsc::unbounded::<Message>();
        let mut outbound = WsOutbound::new(tx);

        let note = RouteNote::new(Point::new(0, 3), "Third message");
        outbound.send(note.clone()).await.unwrap();
        drop(outbound);

        match rx.next().await {
            Some(Message::Text(text)) => {
                let decoded: RouteNote = serde_json::from_str(&text).unwrap();
                assert_eq!(decoded, note);
            }
            other => panic!("expected text frame, got {:?}", other),
        }
        assert!(rx.next().await.is_none());
    }

    #[tokio::test]
    async fn test_outbound_closed_peer() {
        let (tx, rx) = mpsc::unbounded::<Message>();
        drop(rx);
        let mut outbound = WsOutbound::new(tx);
        let result = outbound
            .send(RouteNote::new(Point::new(0, 0), "nobody listening"))
            .await;
        assert!(matches!(result, Err(TransportError::Io(_))));
    }
}
