use super::bidding::Step;
use super::bidding::answer;
use super::code::Wake;
use super::error::AskError;
use super::error::GameError;
use super::error::MailError;
use super::game::Game;
use super::mailbox::Mailbox;
use super::mailbox::Postbox;
use super::play::Input;
use super::play::Move;
use super::player::Broadcast;
use super::player::Member;
use super::player::Player;
use super::room::Room;
use super::timer::Timer;
use crate::ID;
use crate::Position;
use crate::faces::PlayError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the worker loop does after handling a wake code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Idle,
    Exit,
}

/// Drives one seat for the length of a game.
///
/// Blocks on its mailbox, runs the phase named by the wake code, and hands
/// the game to exactly one successor. Leaves when its mailbox closes or
/// when it was the one to end the game.
pub struct Worker {
    seat: Position,
    member: ID<Member>,
    room: ID<Room>,
    player: Box<dyn Player>,
    mailbox: Mailbox,
    postbox: Arc<Postbox>,
    lobby: Arc<Mutex<Room>>,
    bus: Arc<dyn Broadcast>,
    chat: bool,
    present: bool,
}

impl Worker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        member: ID<Member>,
        room: ID<Room>,
        player: Box<dyn Player>,
        mailbox: Mailbox,
        postbox: Arc<Postbox>,
        lobby: Arc<Mutex<Room>>,
        bus: Arc<dyn Broadcast>,
        chat: bool,
    ) -> Self {
        Self {
            seat: mailbox.seat(),
            member,
            room,
            player,
            mailbox,
            postbox,
            lobby,
            bus,
            chat,
            present: true,
        }
    }

    pub async fn run(mut self) {
        log::debug!("[worker P{}] started", self.seat);
        loop {
            let flow = match self.mailbox.recv().await {
                Some(wake) => self.handle(wake).await,
                None => self.depart().await,
            };
            if flow == Flow::Exit {
                break;
            }
        }
        log::debug!("[worker P{}] exited", self.seat);
    }

    async fn handle(&mut self, wake: Wake) -> Flow {
        log::trace!("[worker P{}] woke with {}", self.seat, wake.code());
        match wake {
            Wake::Reset => self.reset().await,
            _ if self.postbox.is_closed() => Flow::Exit,
            Wake::Bid(game) => self.bid(game).await,
            Wake::Play(game) => self.play(game).await,
            Wake::Wait => self.wait().await,
        }
    }
}

impl Worker {
    async fn wait(&mut self) -> Flow {
        if self.present {
            self.player.write("game started, waiting for your turn").await;
        }
        Flow::Idle
    }

    async fn reset(&mut self) -> Flow {
        if self.present {
            self.player.write("game aborted, back to the waiting room").await;
        }
        Flow::Exit
    }

    async fn depart(&mut self) -> Flow {
        if self.present {
            self.player.write("game over, back to the waiting room").await;
        }
        Flow::Exit
    }

    async fn bid(&mut self, mut game: Box<Game>) -> Flow {
        let accept = self.ask_bid(&game).await;
        if !self.present {
            game.leave(self.seat);
        }
        let verdict = if accept { "bids" } else { "declines" };
        self.announce(&format!("P{} {}", self.seat, verdict)).await;
        match game.bid(self.seat, accept) {
            Err(e) => self.abort(e).await,
            Ok(Step::Ask(next)) => self.hand_off(next, Wake::Bid(game)),
            Ok(Step::Void(_)) if game.is_deserted() => self.abandon().await,
            Ok(Step::Void(opener)) => {
                self.announce(&format!("nobody bid, redealing, P{} opens", opener))
                    .await;
                self.hand_off(opener, Wake::Bid(game))
            }
            Ok(Step::Resolve(landlord)) => {
                let kitty = game
                    .kitty()
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.announce(&format!(
                    "P{} is landlord, takes {}, multiplier x{}",
                    landlord,
                    kitty,
                    game.multiplier()
                ))
                .await;
                self.hand_off(landlord, Wake::Play(game))
            }
        }
    }

    async fn ask_bid(&mut self, game: &Game) -> bool {
        if !self.present {
            return false;
        }
        self.player.write(&game.ask_bid(self.seat)).await;
        let timer = Timer::start(game.bid_timeout());
        loop {
            match self.player.ask(timer.remaining()).await {
                Ok(text) => match answer(&text) {
                    Some(accept) => return accept,
                    None => self.player.warn(&PlayError::Malformed(text)).await,
                },
                Err(AskError::Timeout) => {
                    self.player.write("timed out, passing").await;
                    return false;
                }
                Err(e) => {
                    self.leave(e);
                    return false;
                }
            }
        }
    }

    async fn play(&mut self, mut game: Box<Game>) -> Flow {
        loop {
            match self.turn(&mut game).await {
                Move::Played(face) => {
                    let left = game.hand(self.seat).size();
                    self.announce(&format!("P{} plays {}, {} left", self.seat, face, left))
                        .await;
                }
                Move::Passed => self.announce(&format!("P{} passes", self.seat)).await,
            }
            if let Err(e) = game.check() {
                return self.abort(e).await;
            }
            if game.hand(self.seat).is_empty() {
                return self.victory(game).await;
            }
            if !game.take_bonus(self.seat) {
                break;
            }
            log::debug!("[worker P{}] takes a bonus turn", self.seat);
        }
        let next = game.next(self.seat);
        self.hand_off(next, Wake::Play(game))
    }

    /// One decision, re-prompting on refused input without resetting the
    /// clock. Falls back to the default move on timeout or departure.
    async fn turn(&mut self, game: &mut Game) -> Move {
        if !self.present {
            return game.autoplay(self.seat);
        }
        self.player.write(&game.prompt(self.seat)).await;
        let timer = Timer::start(game.play_timeout(self.seat));
        loop {
            let text = match self.player.ask(timer.remaining()).await {
                Ok(text) => text,
                Err(AskError::Timeout) => {
                    self.player.write("timed out").await;
                    return game.autoplay(self.seat);
                }
                Err(e) => {
                    self.leave(e);
                    return game.autoplay(self.seat);
                }
            };
            let refusal = match Input::from(text.as_str()) {
                Input::Peek => {
                    self.player.write(&game.peek(self.seat)).await;
                    continue;
                }
                Input::Pass => match game.pass(self.seat) {
                    Ok(()) => return Move::Passed,
                    Err(e) => e,
                },
                Input::Cards(selectors) => match game.play(self.seat, &selectors) {
                    Ok(face) => return Move::Played(face),
                    Err(e) => e,
                },
            };
            match refusal {
                PlayError::Unknown(_) if self.chat => {
                    let line = format!("P{}: {}", self.seat, text.trim());
                    self.bus.broadcast(self.room, &line, &[self.member]).await;
                }
                refusal => self.player.warn(&refusal).await,
            }
        }
    }

    async fn victory(&mut self, game: Box<Game>) -> Flow {
        let deltas = game.settle(self.seat);
        let side = match game.landlord() {
            Some(p) if p == self.seat => "landlord wins",
            Some(_) => "farmers win",
            None => "wins",
        };
        let scores = deltas
            .iter()
            .enumerate()
            .map(|(p, d)| format!("P{} {:+}", p, d))
            .collect::<Vec<_>>()
            .join(", ");
        self.announce(&format!(
            "P{} is out, {}! x{}: {}",
            self.seat,
            side,
            game.multiplier(),
            scores
        ))
        .await;
        let mut room = self.lobby.lock().await;
        room.record(game.players(), &deltas);
        room.finish();
        Flow::Exit
    }

    /// Ends the round on a broken invariant.
    async fn abort(&mut self, error: GameError) -> Flow {
        log::error!("[worker P{}] aborting round: {}", self.seat, error);
        self.announce(&format!("round aborted: {}", error)).await;
        self.teardown().await
    }

    /// Ends a round nobody is left to bid in.
    async fn abandon(&mut self) -> Flow {
        log::info!("[worker P{}] every seat has left, abandoning round", self.seat);
        self.announce("every seat left, round abandoned").await;
        self.teardown().await
    }

    /// Tells the other seats to reset, then closes the mailboxes.
    async fn teardown(&mut self) -> Flow {
        let mut room = self.lobby.lock().await;
        (0..room.setup().seats)
            .filter(|p| *p != self.seat)
            .for_each(|p| {
                let _ = self.postbox.post(p, Wake::Reset);
            });
        room.finish();
        Flow::Exit
    }

    fn hand_off(&self, seat: Position, wake: Wake) -> Flow {
        match self.postbox.post(seat, wake) {
            Ok(()) => Flow::Idle,
            Err(MailError::Closed) => Flow::Exit,
            Err(e) => {
                log::error!("[worker P{}] hand off to P{} failed: {}", self.seat, seat, e);
                Flow::Idle
            }
        }
    }

    fn leave(&mut self, reason: AskError) {
        log::info!("[worker P{}] {}, playing defaults", self.seat, reason);
        self.present = false;
    }

    async fn announce(&mut self, text: &str) {
        self.bus.broadcast(self.room, text, &[]).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unique;
    use crate::gameroom::Dealer;
    use crate::gameroom::Setup;
    use std::time::Duration;

    type Transcript = Arc<std::sync::Mutex<Vec<String>>>;

    /// Declines every question and remembers what it was told.
    struct Decliner(Transcript);

    #[async_trait::async_trait]
    impl Player for Decliner {
        async fn ask(&mut self, _: Duration) -> Result<String, AskError> {
            Ok("n".to_string())
        }
        async fn write(&mut self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
        async fn warn(&mut self, err: &(dyn std::error::Error + Send + Sync)) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    #[derive(Clone, Default)]
    struct Board(Transcript);

    #[async_trait::async_trait]
    impl Broadcast for Board {
        async fn broadcast(&self, _: ID<Room>, text: &str, _: &[ID<Member>]) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn broken_invariant_resets_the_other_seats() {
        let setup = Setup::default();
        let mut room = Room::new(setup);
        let members = (0..3).map(|_| ID::<Member>::default()).collect::<Vec<_>>();
        members.iter().for_each(|m| room.join(*m).unwrap());
        let mut game = Game::deal(room.id(), members.clone(), &setup, 1).unwrap();
        game.size += 1;
        let opener = game.opener();
        let transcripts = (0..3).map(|_| Transcript::default()).collect::<Vec<_>>();
        let seats = members
            .iter()
            .zip(transcripts.iter())
            .map(|(m, t)| (*m, Box::new(Decliner(t.clone())) as Box<dyn Player>))
            .collect();
        let lobby = Arc::new(Mutex::new(room));
        let board = Board::default();
        let handles = Dealer::launch(lobby.clone(), seats, game, Arc::new(board.clone()))
            .await
            .unwrap();
        for handle in handles {
            handle.await.unwrap();
        }
        let said = board.0.lock().unwrap().clone();
        assert!(said.iter().any(|l| l.starts_with("round aborted: invariant violated")));
        for (seat, transcript) in transcripts.iter().enumerate().filter(|(p, _)| *p != opener) {
            let heard = transcript.lock().unwrap();
            assert!(
                heard.iter().any(|l| l.contains("game aborted")),
                "P{} was not reset",
                seat
            );
        }
        assert!(!lobby.lock().await.is_playing());
    }
}
