use crate::ID;
use crate::gameroom::Broadcast;
use crate::gameroom::Member;
use crate::gameroom::Room;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;

/// One connected WebSocket guest.
#[derive(Debug)]
pub struct Guest {
    pub name: String,
    pub room: ID<Room>,
    pub outbox: UnboundedSender<String>,
    /// Forwarding line into the seat's client while a game runs.
    pub seat: Option<UnboundedSender<String>>,
}

pub type Guests = Arc<RwLock<HashMap<ID<Member>, Guest>>>;

/// JSON line sent to a guest.
pub fn envelope(kind: &str, text: &str) -> String {
    serde_json::json!({ "type": kind, "text": text }).to_string()
}

/// Room-wide fan-out over the guest registry.
pub struct Bus {
    guests: Guests,
}

impl Bus {
    pub fn new(guests: Guests) -> Self {
        Self { guests }
    }
}

#[async_trait::async_trait]
impl Broadcast for Bus {
    async fn broadcast(&self, room: ID<Room>, text: &str, exclude: &[ID<Member>]) {
        let line = envelope("broadcast", text);
        self.guests
            .read()
            .await
            .iter()
            .filter(|(_, g)| g.room == room)
            .filter(|(id, _)| !exclude.contains(id))
            .filter_map(|(id, g)| g.outbox.send(line.clone()).err().map(|_| id))
            .for_each(|id| log::warn!("[bus] failed broadcast to {}", id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test]
    async fn skips_excluded_and_other_rooms() {
        let guests = Guests::default();
        let room = ID::<Room>::default();
        let (a, b, c) = (ID::default(), ID::default(), ID::default());
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        let (tx_c, mut rx_c) = unbounded_channel();
        let (tx_d, rx_d) = unbounded_channel::<String>();
        drop(rx_d);
        {
            let mut map = guests.write().await;
            let guest = |room, outbox| Guest {
                name: "guest".into(),
                room,
                outbox,
                seat: None,
            };
            map.insert(a, guest(room, tx_a));
            map.insert(b, guest(room, tx_b));
            map.insert(c, guest(ID::default(), tx_c));
            map.insert(ID::default(), guest(room, tx_d));
        }
        Bus::new(guests).broadcast(room, "hi", &[b]).await;
        assert!(rx_a.try_recv().unwrap().contains("hi"));
        assert!(rx_b.try_recv().is_err());
        assert!(rx_c.try_recv().is_err());
    }
}
