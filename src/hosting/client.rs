use super::bus::envelope;
use crate::gameroom::AskError;
use crate::gameroom::Player;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Seat-side end of a WebSocket guest.
///
/// Lines typed while seated arrive on `rx`; everything the engine says goes
/// out on the guest's outbox as JSON envelopes.
pub struct Client {
    tx: UnboundedSender<String>,
    rx: UnboundedReceiver<String>,
}

impl Client {
    pub fn new(tx: UnboundedSender<String>, rx: UnboundedReceiver<String>) -> Self {
        Self { tx, rx }
    }
}

#[async_trait::async_trait]
impl Player for Client {
    async fn ask(&mut self, timeout: Duration) -> Result<String, AskError> {
        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Err(_) => Err(AskError::Timeout),
            Ok(None) => Err(AskError::Closed),
            Ok(Some(line)) if line.trim().eq_ignore_ascii_case("exit") => Err(AskError::Exit),
            Ok(Some(line)) => Ok(line),
        }
    }
    async fn write(&mut self, text: &str) {
        self.tx
            .send(envelope("message", text))
            .inspect_err(|e| log::debug!("failed to write to client: {}", e))
            .ok();
    }
    async fn warn(&mut self, err: &(dyn std::error::Error + Send + Sync)) {
        self.tx
            .send(envelope("error", &err.to_string()))
            .inspect_err(|e| log::debug!("failed to warn client: {}", e))
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test(start_paused = true)]
    async fn ask_maps_transport_states() {
        let (out_tx, mut out_rx) = unbounded_channel();
        let (in_tx, in_rx) = unbounded_channel();
        let mut client = Client::new(out_tx, in_rx);
        let second = Duration::from_secs(1);
        assert_eq!(client.ask(second).await, Err(AskError::Timeout));
        in_tx.send("345".to_string()).unwrap();
        assert_eq!(client.ask(second).await, Ok("345".to_string()));
        in_tx.send(" EXIT ".to_string()).unwrap();
        assert_eq!(client.ask(second).await, Err(AskError::Exit));
        drop(in_tx);
        assert_eq!(client.ask(second).await, Err(AskError::Closed));
        client.write("hello").await;
        assert!(out_rx.recv().await.unwrap().contains("hello"));
    }
}
