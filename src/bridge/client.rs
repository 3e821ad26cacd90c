//! Background WebSocket client.
//!
//! `BridgeClient::spawn` starts one task on the current tokio runtime. The
//! task owns the socket, forwards decoded frames as `BridgeEvent`s, sends
//! queued outbound frames, and reconnects after `reconnect_delay_ms` when
//! the connection drops.
//!
//! The task is the only owner of the socket and of the reconnect timer, so
//! at most one reconnect is ever pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::protocol::BridgeMessage;
use crate::core::BridgeConfig;
use crate::error::BridgeError;

/// UID used by the bridge's own test tooling.
pub const DEFAULT_TEST_UID: &str = "04A2243F9C";

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Something the host should forward to `GameManager::handle_bridge_event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeEvent {
    /// The socket is open.
    Connected,
    /// The socket closed; a reconnect is scheduled.
    Disconnected,
    /// The bridge greeted us.
    Greeting {
        message: String,
        card_simulation_mode: bool,
    },
    /// A card was tapped.
    Card { uid: String, timestamp: u64 },
}

enum SessionEnd {
    Dropped,
    Shutdown,
}

/// Handle to the background bridge connection.
#[derive(Debug)]
pub struct BridgeClient {
    outbound: mpsc::UnboundedSender<BridgeMessage>,
    connected: Arc<AtomicBool>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl BridgeClient {
    /// Start the connection task. Must be called inside a tokio runtime.
    ///
    /// Returns the handle and the stream of events for the host to drain.
    pub fn spawn(config: BridgeConfig) -> (Self, mpsc::UnboundedReceiver<BridgeEvent>) {
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let connected = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run(
            config,
            Arc::clone(&connected),
            outbound_rx,
            events_tx,
            shutdown_rx,
        ));

        (
            Self {
                outbound,
                connected,
                shutdown,
                task,
            },
            events_rx,
        )
    }

    /// True while the socket is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Ask the bridge to broadcast a simulated card read.
    pub fn request_test_trigger(&self, uid: impl Into<String>) -> Result<(), BridgeError> {
        if !self.is_connected() {
            return Err(BridgeError::NotConnected);
        }
        self.outbound
            .send(BridgeMessage::SimulateCard { uid: uid.into() })
            .map_err(|e| BridgeError::SendFailed(e.to_string()))
    }

    /// Close the socket and stop reconnecting.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "bridge task ended abnormally");
        }
    }
}

async fn run(
    config: BridgeConfig,
    connected: Arc<AtomicBool>,
    mut outbound: mpsc::UnboundedReceiver<BridgeMessage>,
    events: mpsc::UnboundedSender<BridgeEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let delay = Duration::from_millis(config.reconnect_delay_ms);

    loop {
        if *shutdown.borrow() {
            break;
        }
        match connect(&config).await {
            Ok(socket) => {
                info!(url = %config.url, "bridge connected");
                connected.store(true, Ordering::Release);
                let _ = events.send(BridgeEvent::Connected);

                let end = serve(socket, &mut outbound, &events, &mut shutdown).await;

                connected.store(false, Ordering::Release);
                let _ = events.send(BridgeEvent::Disconnected);
                if let SessionEnd::Shutdown = end {
                    break;
                }
                warn!(delay_ms = config.reconnect_delay_ms, "bridge disconnected; reconnecting");
            }
            Err(e) => {
                warn!(url = %config.url, error = %e, "bridge connection failed");
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.changed() => break,
        }
    }
    debug!("bridge task stopped");
}

async fn connect(config: &BridgeConfig) -> Result<Socket, BridgeError> {
    let timeout = Duration::from_millis(config.connect_timeout_ms);
    let (socket, _) = tokio::time::timeout(timeout, connect_async(config.url.as_str()))
        .await
        .map_err(|_| BridgeError::Timeout)?
        .map_err(|e| BridgeError::ConnectionFailed(e.to_string()))?;
    Ok(socket)
}

async fn serve(
    socket: Socket,
    outbound: &mut mpsc::UnboundedReceiver<BridgeMessage>,
    events: &mpsc::UnboundedSender<BridgeEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> SessionEnd {
    let (mut write, mut read) = socket.split();

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => match BridgeMessage::parse(&text) {
                    Ok(message) => dispatch(message, events),
                    Err(e) => warn!(error = %e, "dropping malformed bridge frame"),
                },
                Some(Ok(Message::Close(_))) | None => return SessionEnd::Dropped,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "bridge read failed");
                    return SessionEnd::Dropped;
                }
            },
            message = outbound.recv() => {
                let Some(message) = message else {
                    return SessionEnd::Shutdown;
                };
                let frame = match message.to_json() {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, "could not encode bridge frame");
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(frame)).await {
                    warn!(error = %e, "bridge send failed");
                    return SessionEnd::Dropped;
                }
            }
            _ = shutdown.changed() => {
                let _ = write.send(Message::Close(None)).await;
                return SessionEnd::Shutdown;
            }
        }
    }
}

fn dispatch(message: BridgeMessage, events: &mpsc::UnboundedSender<BridgeEvent>) {
    let event = match message {
        BridgeMessage::Nfc { uid, timestamp } => {
            debug!(%uid, timestamp, "card read");
            BridgeEvent::Card { uid, timestamp }
        }
        BridgeMessage::Server {
            message,
            card_simulation_mode,
        } => {
            info!(%message, card_simulation_mode, "bridge greeting");
            BridgeEvent::Greeting {
                message,
                card_simulation_mode,
            }
        }
        BridgeMessage::SimulateCard { .. } => {
            debug!("ignoring echoed simulate-card frame");
            return;
        }
    };
    let _ = events.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_maps_frames_to_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(
            BridgeMessage::Nfc {
                uid: "AA".to_string(),
                timestamp: 7,
            },
            &tx,
        );
        dispatch(
            BridgeMessage::SimulateCard {
                uid: "BB".to_string(),
            },
            &tx,
        );

        assert_eq!(
            rx.try_recv().ok(),
            Some(BridgeEvent::Card {
                uid: "AA".to_string(),
                timestamp: 7
            })
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_trigger_requires_connection() {
        // Nothing listens on port 1
        let config = BridgeConfig::enabled("ws://127.0.0.1:1").with_reconnect_delay_ms(50);
        let (client, _events) = BridgeClient::spawn(config);

        assert!(!client.is_connected());
        assert!(matches!(
            client.request_test_trigger(DEFAULT_TEST_UID),
            Err(BridgeError::NotConnected)
        ));
        client.shutdown().await;
    }
}
