use super::bus::Bus;
use super::bus::Guest;
use super::bus::Guests;
use super::bus::envelope;
use super::client::Client;
use crate::ID;
use crate::gameroom::Broadcast;
use crate::gameroom::Dealer;
use crate::gameroom::Game;
use crate::gameroom::Member;
use crate::gameroom::Player;
use crate::gameroom::Room;
use crate::gameroom::Setup;
use crate::gameroom::Timeouts;
use crate::gameroom::Variant;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

/// Registry of rooms and connected guests.
///
/// Lookups that can race with a disconnect return `Option` or a not-found
/// error instead of panicking.
pub struct Hall {
    rooms: RwLock<HashMap<ID<Room>, Arc<Mutex<Room>>>>,
    guests: Guests,
    bus: Arc<Bus>,
    timeouts: Timeouts,
}

impl Default for Hall {
    fn default() -> Self {
        Self::new(Timeouts::default())
    }
}

impl Hall {
    pub fn new(timeouts: Timeouts) -> Self {
        let guests = Guests::default();
        Self {
            rooms: RwLock::new(HashMap::new()),
            bus: Arc::new(Bus::new(guests.clone())),
            guests,
            timeouts,
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Opens an empty room for `variant`.
    pub async fn create(&self, variant: Variant) -> ID<Room> {
        let setup = Setup {
            variant,
            timeouts: self.timeouts,
            ..Setup::default()
        };
        let room = Room::new(setup);
        let id = crate::Unique::id(&room);
        self.rooms
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(room)));
        log::info!("[hall] opened {} room {}", variant, id);
        id
    }

    pub async fn room(&self, id: ID<Room>) -> Option<Arc<Mutex<Room>>> {
        self.rooms.read().await.get(&id).cloned()
    }

    pub async fn rooms(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Seats a new guest in the waiting room. Returns their identity and the
    /// stream of lines to deliver to them.
    pub async fn connect(
        &self,
        room: ID<Room>,
        name: &str,
    ) -> anyhow::Result<(ID<Member>, UnboundedReceiver<String>)> {
        let lobby = self
            .room(room)
            .await
            .ok_or_else(|| anyhow::anyhow!("room not found"))?;
        let member = ID::<Member>::default();
        lobby.lock().await.join(member)?;
        let (outbox, inbox) = unbounded_channel();
        let guest = Guest {
            name: name.to_string(),
            room,
            outbox,
            seat: None,
        };
        self.guests.write().await.insert(member, guest);
        self.bus
            .broadcast(room, &format!("{} joined", name), &[])
            .await;
        Ok((member, inbox))
    }

    /// Delivers one line typed by `member`. Seated guests talk to their
    /// seat; everyone else talks to the waiting room.
    pub async fn route(&self, member: ID<Member>, line: String) -> anyhow::Result<()> {
        let seat = self
            .guests
            .read()
            .await
            .get(&member)
            .ok_or_else(|| anyhow::anyhow!("guest not found"))?
            .seat
            .clone();
        if let Some(seat) = seat {
            let exit = line.trim().eq_ignore_ascii_case("exit");
            if seat.send(line.clone()).is_ok() && !exit {
                return Ok(());
            }
            self.unseat(member).await;
            if exit {
                self.tell(member, "you left the table, it plays on without you")
                    .await;
                return Ok(());
            }
        }
        self.lobby(member, line).await
    }

    /// Removes a guest. Their seat, if any, falls back to default moves.
    pub async fn disconnect(&self, member: ID<Member>) {
        let Some(guest) = self.guests.write().await.remove(&member) else {
            return;
        };
        if let Some(lobby) = self.room(guest.room).await {
            lobby.lock().await.disconnect(member);
        }
        self.bus
            .broadcast(guest.room, &format!("{} left", guest.name), &[])
            .await;
        log::info!("[hall] {} disconnected", member);
    }

    /// Deals a game for a full room and starts its workers.
    ///
    /// The room is claimed before any guest is seated, so of two racing
    /// starts only one ever touches the seats.
    pub async fn start(&self, room: ID<Room>) -> anyhow::Result<()> {
        let lobby = self
            .room(room)
            .await
            .ok_or_else(|| anyhow::anyhow!("room not found"))?;
        let (members, setup) = {
            let mut lobby = lobby.lock().await;
            let members = lobby.reserve()?;
            (members, *lobby.setup())
        };
        let launched = self.launch(room, lobby.clone(), members, setup).await;
        if launched.is_err() {
            lobby.lock().await.release();
        }
        launched
    }

    async fn launch(
        &self,
        room: ID<Room>,
        lobby: Arc<Mutex<Room>>,
        members: Vec<ID<Member>>,
        setup: Setup,
    ) -> anyhow::Result<()> {
        let game = Game::deal(room, members.clone(), &setup, rand::random())?;
        let seats = {
            let mut guests = self.guests.write().await;
            members
                .iter()
                .map(|member| -> anyhow::Result<(ID<Member>, Box<dyn Player>)> {
                    let guest = guests
                        .get_mut(member)
                        .ok_or_else(|| anyhow::anyhow!("guest not found"))?;
                    let (tx, rx) = unbounded_channel();
                    guest.seat = Some(tx);
                    let client = Client::new(guest.outbox.clone(), rx);
                    Ok((*member, Box::new(client)))
                })
                .collect::<anyhow::Result<Vec<_>>>()?
        };
        self.bus
            .broadcast(room, &format!("{} game starting", setup.variant), &[])
            .await;
        Dealer::launch(lobby, seats, game, self.bus.clone()).await?;
        Ok(())
    }

    /// Removes rooms nobody can reach, and rooms idle past `horizon` no
    /// matter who is still connected. Returns how many were removed.
    pub async fn sweep(&self, horizon: Duration) -> usize {
        let mut doomed = Vec::new();
        for (id, lobby) in self.rooms.read().await.iter() {
            let mut lobby = lobby.lock().await;
            if !lobby.has_online() || lobby.idle() > horizon {
                lobby.finish();
                doomed.push(*id);
            }
        }
        let mut rooms = self.rooms.write().await;
        let mut guests = self.guests.write().await;
        for id in doomed.iter() {
            rooms.remove(id);
            guests.retain(|_, g| g.room != *id);
            log::info!("[hall] reaped room {}", id);
        }
        doomed.len()
    }
}

impl Hall {
    async fn lobby(&self, member: ID<Member>, line: String) -> anyhow::Result<()> {
        let (room, name) = self
            .guests
            .read()
            .await
            .get(&member)
            .map(|g| (g.room, g.name.clone()))
            .ok_or_else(|| anyhow::anyhow!("guest not found"))?;
        match line.trim().to_lowercase().as_str() {
            "" => {}
            "start" => {
                if let Err(e) = self.start(room).await {
                    self.tell(member, &format!("cannot start: {}", e)).await;
                }
            }
            "exit" => self.disconnect(member).await,
            "score" | "scores" => {
                let score = match self.room(room).await {
                    Some(lobby) => lobby.lock().await.score(member),
                    None => 0,
                };
                self.tell(member, &format!("score: {}", score)).await;
            }
            _ => {
                self.bus
                    .broadcast(room, &format!("{}: {}", name, line.trim()), &[])
                    .await
            }
        }
        Ok(())
    }

    async fn unseat(&self, member: ID<Member>) {
        if let Some(guest) = self.guests.write().await.get_mut(&member) {
            guest.seat = None;
        }
    }

    async fn tell(&self, member: ID<Member>, text: &str) {
        if let Some(guest) = self.guests.read().await.get(&member) {
            let _ = guest.outbox.send(envelope("message", text));
        }
    }
}
