use super::bidding::Bidding;
use super::code::Wake;
use super::error::GameError;
use super::player::Member;
use super::room::Room;
use super::timer::Timeouts;
use super::variant::Setup;
use super::variant::Variant;
use crate::ID;
use crate::Points;
use crate::Position;
use crate::cards::Card;
use crate::cards::Counter;
use crate::cards::Deal;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::faces::Face;
use crate::faces::Rules;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bidding,
    Playing,
}

impl Phase {
    fn initial(variant: Variant) -> Self {
        match variant.bidding() {
            true => Self::Bidding,
            false => Self::Playing,
        }
    }
}

/// The most recent accepted play.
#[derive(Debug, Clone)]
pub struct Lead {
    pub seat: Position,
    pub face: Face,
    pub cards: Vec<Card>,
}

/// Shared state of one round.
///
/// Never behind a lock: the game travels inside `Bid` and `Play` wake codes,
/// so the worker that received it is the only one that can touch it.
#[derive(Debug)]
pub struct Game {
    pub(super) room: ID<Room>,
    pub(super) round: usize,
    pub(super) variant: Variant,
    pub(super) players: Vec<ID<Member>>,
    pub(super) hands: Vec<Hand>,
    pub(super) groups: Vec<u8>,
    pub(super) phase: Phase,
    pub(super) bidding: Bidding,
    pub(super) multiplier: u32,
    pub(super) last: Option<Lead>,
    pub(super) counter: Counter,
    pub(super) discard: Vec<Card>,
    pub(super) kitty: Vec<Card>,
    pub(super) claimed: bool,
    pub(super) wildcard: Option<Rank>,
    pub(super) bonus: Vec<usize>,
    pub(super) absent: Vec<bool>,
    pub(super) turns: Vec<Duration>,
    pub(super) timeouts: Timeouts,
    pub(super) size: usize,
    pub(super) rng: SmallRng,
}

impl Game {
    /// Shuffles a fresh deck for `players` and deals it.
    pub fn deal(
        room: ID<Room>,
        players: Vec<ID<Member>>,
        setup: &Setup,
        seed: u64,
    ) -> Result<Self, GameError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let deal = Self::shuffle(setup.variant, players.len(), &mut rng)?;
        let opener = Self::first_mover(setup.variant, &deal, &mut rng);
        let mut game = Self::arrange(room, players, setup, deal, opener)?;
        game.rng = rng;
        if setup.variant.wildcards() {
            game.designate();
        }
        Ok(game)
    }

    /// Builds a round from hands dealt elsewhere. The opener bids first, or
    /// leads straight away when the variant has no bidding.
    pub fn arrange(
        room: ID<Room>,
        players: Vec<ID<Member>>,
        setup: &Setup,
        deal: Deal,
        opener: Position,
    ) -> Result<Self, GameError> {
        let n = players.len();
        if n != setup.seats || deal.hands.len() != n {
            return Err(GameError::Structural(format!(
                "{} players, {} hands, {} seats",
                n,
                deal.hands.len(),
                setup.seats
            )));
        }
        if opener >= n {
            return Err(GameError::Structural(format!("no seat {}", opener)));
        }
        let all = deal
            .hands
            .iter()
            .flat_map(|h| h.cards().iter().copied())
            .chain(deal.kitty.iter().copied())
            .collect::<Vec<_>>();
        let game = Self {
            room,
            round: 1,
            variant: setup.variant,
            players,
            size: all.len(),
            counter: Counter::from(all.as_slice()),
            hands: deal.hands,
            kitty: deal.kitty,
            groups: vec![0; n],
            phase: Phase::initial(setup.variant),
            bidding: Bidding::new(opener),
            multiplier: 1,
            last: None,
            discard: Vec::new(),
            claimed: false,
            wildcard: None,
            bonus: vec![0; n],
            absent: vec![false; n],
            turns: vec![setup.timeouts.play; n],
            timeouts: setup.timeouts,
            rng: SmallRng::seed_from_u64(0),
        };
        game.check()?;
        Ok(game)
    }

    /// Throws every card back in and deals a new round from a random opener.
    pub fn redeal(&mut self) -> Result<Position, GameError> {
        let deal = Self::shuffle(self.variant, self.players.len(), &mut self.rng)?;
        let opener = Self::first_mover(self.variant, &deal, &mut self.rng);
        self.round += 1;
        self.hands = deal.hands;
        self.kitty = deal.kitty;
        self.counter = Counter::from(self.all().as_slice());
        self.groups.iter_mut().for_each(|g| *g = 0);
        self.phase = Phase::initial(self.variant);
        self.bidding = Bidding::new(opener);
        self.multiplier = 1;
        self.last = None;
        self.discard.clear();
        self.claimed = false;
        self.wildcard = None;
        if self.variant.wildcards() {
            self.designate();
        }
        log::debug!("[game {}] round {} redealt, P{} opens", self.room, self.round, opener);
        self.check()?;
        Ok(opener)
    }

    /// Hands the round to whoever moves first.
    pub fn open(self) -> (Position, Wake) {
        let opener = self.bidding.opener();
        match self.phase {
            Phase::Bidding => (opener, Wake::Bid(Box::new(self))),
            Phase::Playing => (opener, Wake::Play(Box::new(self))),
        }
    }

    /// Verifies card conservation, the privileged-role count, and that the
    /// table is empty exactly when nothing has been played.
    pub fn check(&self) -> Result<(), GameError> {
        let held = self.hands.iter().map(Hand::size).sum::<usize>();
        let kitty = if self.claimed { 0 } else { self.kitty.len() };
        if held + self.discard.len() + kitty != self.size {
            return Err(GameError::Structural(format!(
                "{} held + {} discarded + {} kitty != {}",
                held,
                self.discard.len(),
                kitty,
                self.size
            )));
        }
        let privileged = self.groups.iter().filter(|g| **g == 1).count();
        let expected = match (self.phase, self.variant.bidding()) {
            (Phase::Playing, true) => 1,
            _ => 0,
        };
        if privileged != expected {
            return Err(GameError::Structural(format!(
                "{} landlords during {:?}",
                privileged, self.phase
            )));
        }
        if self.last.is_none() != self.discard.is_empty() {
            return Err(GameError::Structural("table and discard pile disagree".into()));
        }
        Ok(())
    }

    /// Gives `seat` the kitty and the privileged role, and starts play.
    pub(super) fn claim(&mut self, seat: Position) {
        self.hands[seat].add(self.kitty.iter().copied());
        self.groups[seat] = 1;
        self.claimed = true;
        self.phase = Phase::Playing;
        log::debug!("[game {}] P{} claims the kitty", self.room, seat);
    }

    /// Score deltas per seat when `winner` has emptied their hand.
    pub fn settle(&self, winner: Position) -> Vec<Points> {
        let stake = Points::from(self.multiplier);
        match self.variant {
            Variant::RunFast => {
                let owed = self
                    .hands
                    .iter()
                    .map(|h| h.size() as Points)
                    .collect::<Vec<_>>();
                let total = owed.iter().sum::<Points>();
                owed.iter()
                    .enumerate()
                    .map(|(p, n)| if p == winner { total - n } else { -n })
                    .collect()
            }
            Variant::Classic | Variant::Laizi => {
                let landlord_won = self.groups[winner] == 1;
                self.groups
                    .iter()
                    .map(|g| match (*g == 1, landlord_won) {
                        (true, true) => 2 * stake,
                        (true, false) => -2 * stake,
                        (false, true) => -stake,
                        (false, false) => stake,
                    })
                    .collect()
            }
        }
    }

    /// Marks `seat` as played by autopilot for the rest of the game.
    pub fn leave(&mut self, seat: Position) {
        if let Some(absent) = self.absent.get_mut(seat) {
            *absent = true;
        }
    }
    /// True once no seat has a player behind it.
    pub fn is_deserted(&self) -> bool {
        self.absent.iter().all(|a| *a)
    }

    /// Extra consecutive turns for `seat`.
    pub fn grant(&mut self, seat: Position, turns: usize) {
        if let Some(bonus) = self.bonus.get_mut(seat) {
            *bonus += turns;
        }
    }
    /// Consumes one extra turn if `seat` has any.
    pub fn take_bonus(&mut self, seat: Position) -> bool {
        match self.bonus.get_mut(seat) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }
    pub fn set_timeout(&mut self, seat: Position, timeout: Duration) {
        if let Some(turn) = self.turns.get_mut(seat) {
            *turn = timeout;
        }
    }
    pub fn play_timeout(&self, seat: Position) -> Duration {
        self.turns.get(seat).copied().unwrap_or(self.timeouts.play)
    }
    pub fn bid_timeout(&self) -> Duration {
        self.timeouts.bid
    }
}

impl Game {
    fn shuffle(variant: Variant, seats: usize, rng: &mut SmallRng) -> Result<Deal, GameError> {
        let mut deck = variant.deck();
        deck.shuffle(rng);
        deck.deal(seats, variant.kitty())
            .ok_or_else(|| GameError::Structural(format!("deck does not split {} ways", seats)))
    }

    fn first_mover(variant: Variant, deal: &Deal, rng: &mut SmallRng) -> Position {
        match variant.bidding() {
            true => rng.random_range(0..deal.hands.len().max(1)),
            false => deal
                .hands
                .iter()
                .enumerate()
                .filter_map(|(p, h)| h.lowest().map(|c| (p, u8::from(c))))
                .min_by_key(|(_, c)| *c)
                .map(|(p, _)| p)
                .unwrap_or_default(),
        }
    }

    /// Picks this round's wildcard rank and flags it everywhere.
    fn designate(&mut self) {
        let suited = Rank::suited().collect::<Vec<_>>();
        let rank = suited[self.rng.random_range(0..suited.len())];
        self.hands.iter_mut().for_each(|h| h.flag(rank));
        self.kitty.iter_mut().for_each(|c| {
            if c.rank() == rank {
                *c = c.wild();
            }
        });
        self.wildcard = Some(rank);
        log::debug!("[game {}] {} is wild", self.room, rank);
    }

    fn all(&self) -> Vec<Card> {
        self.hands
            .iter()
            .flat_map(|h| h.cards().iter().copied())
            .chain(self.kitty.iter().copied())
            .chain(self.discard.iter().copied())
            .collect()
    }
}

impl Game {
    pub fn room(&self) -> ID<Room> {
        self.room
    }
    pub fn round(&self) -> usize {
        self.round
    }
    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn rules(&self) -> &'static dyn Rules {
        self.variant.rules()
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn players(&self) -> &[ID<Member>] {
        &self.players
    }
    pub fn next(&self, seat: Position) -> Position {
        (seat + 1) % self.players.len()
    }
    pub fn hand(&self, seat: Position) -> &Hand {
        &self.hands[seat]
    }
    pub fn landlord(&self) -> Option<Position> {
        self.groups.iter().position(|g| *g == 1)
    }
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }
    pub fn opener(&self) -> Position {
        self.bidding.opener()
    }
    pub fn last(&self) -> Option<&Lead> {
        self.last.as_ref()
    }
    pub fn last_face(&self) -> Option<&Face> {
        self.last.as_ref().map(|l| &l.face)
    }
    pub fn last_cards(&self) -> Option<&[Card]> {
        self.last.as_ref().map(|l| l.cards.as_slice())
    }
    pub fn last_player(&self) -> Option<Position> {
        self.last.as_ref().map(|l| l.seat)
    }
    /// True when `seat` leads the trick: nothing played yet, or everyone
    /// else passed since `seat` last played.
    pub fn is_master(&self, seat: Position) -> bool {
        self.last.as_ref().is_none_or(|l| l.seat == seat)
    }
    pub fn counter(&self) -> &Counter {
        &self.counter
    }
    pub fn kitty(&self) -> &[Card] {
        &self.kitty
    }
    pub fn wildcard(&self) -> Option<Rank> {
        self.wildcard
    }
}
