use super::mailbox::Postbox;
use super::player::Member;
use super::variant::Setup;
use crate::ID;
use crate::Points;
use crate::Unique;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Whether a room is between games or running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Waiting,
    /// Claimed by a starter that is still seating players.
    Starting,
    Playing,
}

/// Lifecycle container for one table.
///
/// Shared between the workers of a running game, the registry, and the
/// reaper, so it lives behind a mutex. Critical sections stay short: roster
/// and status checks, ownership transfer, teardown.
#[derive(Debug)]
pub struct Room {
    id: ID<Room>,
    setup: Setup,
    owner: Option<ID<Member>>,
    online: Vec<ID<Member>>,
    seated: Vec<ID<Member>>,
    status: Status,
    active: Instant,
    postbox: Option<Arc<Postbox>>,
    scores: HashMap<ID<Member>, Points>,
    rounds: usize,
}

impl Unique for Room {
    fn id(&self) -> ID<Room> {
        self.id
    }
}

impl Room {
    pub fn new(setup: Setup) -> Self {
        Self {
            id: ID::default(),
            setup,
            owner: None,
            online: Vec::new(),
            seated: Vec::new(),
            status: Status::Waiting,
            active: Instant::now(),
            postbox: None,
            scores: HashMap::new(),
            rounds: 0,
        }
    }

    /// Adds an online member. The first one in owns the room.
    pub fn join(&mut self, member: ID<Member>) -> anyhow::Result<()> {
        if self.online.contains(&member) {
            return Err(anyhow::anyhow!("already in room"));
        }
        if self.online.len() >= self.setup.seats {
            return Err(anyhow::anyhow!("room is full"));
        }
        self.online.push(member);
        self.owner.get_or_insert(member);
        self.touch();
        log::info!("[room {}] {} joined ({}/{})", self.id, member, self.online.len(), self.setup.seats);
        Ok(())
    }

    /// Removes a member who went offline. Ownership passes to the next
    /// member still online. A seated member keeps their seat; the worker
    /// plays defaults for it until the game ends.
    pub fn disconnect(&mut self, member: ID<Member>) {
        self.online.retain(|m| *m != member);
        if self.owner == Some(member) {
            self.owner = self.online.first().copied();
            if let Some(owner) = self.owner {
                log::info!("[room {}] ownership passes to {}", self.id, owner);
            }
        }
        self.touch();
    }

    /// Claims a full, idle room for a game about to be dealt. Only one
    /// caller can hold the claim; the rest see the room as busy.
    pub fn reserve(&mut self) -> anyhow::Result<Vec<ID<Member>>> {
        if self.status != Status::Waiting {
            return Err(anyhow::anyhow!("game already running"));
        }
        if self.online.len() != self.setup.seats {
            return Err(anyhow::anyhow!("waiting for players"));
        }
        self.status = Status::Starting;
        self.touch();
        Ok(self.online.clone())
    }

    /// Drops a claim whose game never began.
    pub fn release(&mut self) {
        if self.status == Status::Starting {
            self.status = Status::Waiting;
        }
    }

    /// Seats every online member and attaches the game's mailboxes.
    pub fn begin(&mut self, postbox: Arc<Postbox>) -> anyhow::Result<Vec<ID<Member>>> {
        if self.status == Status::Playing {
            return Err(anyhow::anyhow!("game already running"));
        }
        if self.online.len() != self.setup.seats {
            return Err(anyhow::anyhow!(
                "need {} players, have {}",
                self.setup.seats,
                self.online.len()
            ));
        }
        self.seated = self.online.clone();
        self.status = Status::Playing;
        self.postbox = Some(postbox);
        self.rounds += 1;
        self.touch();
        log::info!("[room {}] game {} begins", self.id, self.rounds);
        Ok(self.seated.clone())
    }

    /// Ends the running game: closes every mailbox and returns to waiting.
    /// True only for the call that actually closed them.
    pub fn finish(&mut self) -> bool {
        self.status = Status::Waiting;
        self.seated.clear();
        self.touch();
        let closed = self.postbox.take().is_some_and(|postbox| postbox.close());
        if closed {
            log::info!("[room {}] game over, waiting", self.id);
        }
        closed
    }

    /// Adds settlement deltas, seat by seat, to the running scores.
    pub fn record(&mut self, players: &[ID<Member>], deltas: &[Points]) {
        players
            .iter()
            .zip(deltas.iter())
            .for_each(|(m, d)| *self.scores.entry(*m).or_default() += *d);
    }

    pub fn touch(&mut self) {
        self.active = Instant::now();
    }
}

impl Room {
    pub fn setup(&self) -> &Setup {
        &self.setup
    }
    pub fn owner(&self) -> Option<ID<Member>> {
        self.owner
    }
    pub fn online(&self) -> &[ID<Member>] {
        &self.online
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn is_playing(&self) -> bool {
        self.status != Status::Waiting
    }
    pub fn is_full(&self) -> bool {
        self.online.len() >= self.setup.seats
    }
    pub fn is_seated(&self, member: ID<Member>) -> bool {
        self.seated.contains(&member)
    }
    pub fn has_online(&self) -> bool {
        !self.online.is_empty()
    }
    pub fn score(&self, member: ID<Member>) -> Points {
        self.scores.get(&member).copied().unwrap_or_default()
    }
    /// Time since anything last happened in the room.
    pub fn idle(&self) -> Duration {
        self.active.elapsed()
    }
}
