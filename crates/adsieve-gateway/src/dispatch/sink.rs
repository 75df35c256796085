use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use adsieve_core::error::{AdsieveError, Result};

/// Receives the final payload of an intercepted request.
#[async_trait]
pub trait PayloadSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, payload: Bytes) -> Result<()>;
}

/// Logs the payload size and drops it. Useful for dry runs.
#[derive(Default)]
pub struct LogSink;

#[async_trait]
impl PayloadSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, payload: Bytes) -> Result<()> {
        tracing::info!(bytes = payload.len(), "response sent");
        Ok(())
    }
}

/// Forwards payloads into a bounded channel.
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl PayloadSink for ChannelSink {
    fn name(&self) -> &'static str {
        "channel"
    }

    async fn send(&self, payload: Bytes) -> Result<()> {
        self.tx
            .send(payload)
            .await
            .map_err(|_| AdsieveError::Internal("sink channel closed".into()))
    }
}

/// Single-use sink that hands the payload back to whoever holds the receiver
/// (the HTTP handler turns it into the response body).
pub struct ReplySink {
    tx: Mutex<Option<oneshot::Sender<Bytes>>>,
}

impl ReplySink {
    pub fn new() -> (Self, oneshot::Receiver<Bytes>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }
}

#[async_trait]
impl PayloadSink for ReplySink {
    fn name(&self) -> &'static str {
        "reply"
    }

    async fn send(&self, payload: Bytes) -> Result<()> {
        let tx = match self.tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => return Err(AdsieveError::Internal("reply sink lock poisoned".into())),
        };
        let tx = tx.ok_or_else(|| AdsieveError::Internal("reply already sent".into()))?;
        tx.send(payload)
            .map_err(|_| AdsieveError::Internal("reply receiver dropped".into()))
    }
}
