use super::error::GameError;
use super::game::Game;
use super::game::Phase;
use crate::Position;

/// Auction state for the privileged role.
///
/// The first pass asks every seat once, starting at the opener. Each
/// acceptance doubles the multiplier. If the pass ends with several
/// acceptors, a final round asks them again, most recent first; the first
/// to accept again wins, so the last acceptor always has priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bidding {
    opener: Position,
    turn: Position,
    first: Option<Position>,
    last: Option<Position>,
    accepted: Vec<Position>,
    finale: Vec<Position>,
    final_round: bool,
}

/// What the auction wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Ask this seat.
    Ask(Position),
    /// This seat won the auction and now leads play.
    Resolve(Position),
    /// Nobody accepted; the round was redealt and this seat opens again.
    Void(Position),
}

impl Bidding {
    pub fn new(opener: Position) -> Self {
        Self {
            opener,
            turn: opener,
            ..Self::default()
        }
    }
    pub fn opener(&self) -> Position {
        self.opener
    }
    pub fn first(&self) -> Option<Position> {
        self.first
    }
    pub fn last(&self) -> Option<Position> {
        self.last
    }
    pub fn is_final_round(&self) -> bool {
        self.final_round
    }
}

impl Game {
    /// Records `seat`'s answer and advances the auction.
    pub fn bid(&mut self, seat: Position, accept: bool) -> Result<Step, GameError> {
        if self.phase != Phase::Bidding {
            return Err(GameError::Structural(format!("P{} bids during play", seat)));
        }
        if self.bidding.turn != seat {
            return Err(GameError::Structural(format!(
                "P{} bids out of turn, P{} expected",
                seat, self.bidding.turn
            )));
        }
        let step = match self.bidding.final_round {
            false => self.first_pass(seat, accept),
            true => self.final_pass(seat, accept),
        };
        match step {
            Step::Ask(next) => self.bidding.turn = next,
            Step::Resolve(winner) => self.claim(winner),
            Step::Void(_) => {
                let opener = self.redeal()?;
                return Ok(Step::Void(opener));
            }
        }
        self.check()?;
        Ok(step)
    }

    fn first_pass(&mut self, seat: Position, accept: bool) -> Step {
        if accept {
            self.multiplier *= 2;
            self.bidding.first.get_or_insert(seat);
            self.bidding.last = Some(seat);
            self.bidding.accepted.push(seat);
        }
        let next = self.next(seat);
        if next != self.bidding.opener {
            return Step::Ask(next);
        }
        match self.bidding.accepted.as_slice() {
            [] => Step::Void(self.bidding.opener),
            [winner] => Step::Resolve(*winner),
            many => {
                self.bidding.final_round = true;
                self.bidding.finale = many.iter().rev().copied().collect();
                Step::Ask(self.bidding.finale[0])
            }
        }
    }

    fn final_pass(&mut self, seat: Position, accept: bool) -> Step {
        if accept {
            self.bidding.last = Some(seat);
            return Step::Resolve(seat);
        }
        self.bidding.finale.retain(|p| *p != seat);
        match self.bidding.finale.as_slice() {
            [winner] => Step::Resolve(*winner),
            [next, ..] => Step::Ask(*next),
            [] => Step::Resolve(self.bidding.last.unwrap_or(seat)),
        }
    }
}

/// Reads a yes/no answer to the bidding question. None when unclear.
pub fn answer(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" | "1" | "bid" => Some(true),
        "" | "n" | "no" | "0" | "pass" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;
    use crate::gameroom::Member;
    use crate::gameroom::Setup;

    fn game(opener: Position) -> Game {
        let players = (0..3).map(|_| ID::<Member>::default()).collect::<Vec<_>>();
        let mut game = Game::deal(ID::default(), players, &Setup::default(), 21).unwrap();
        game.bidding = Bidding::new(opener);
        game
    }

    #[test]
    fn nobody_bids_voids_the_round() {
        let mut game = game(0);
        assert_eq!(game.bid(0, false), Ok(Step::Ask(1)));
        assert_eq!(game.bid(1, false), Ok(Step::Ask(2)));
        let Ok(Step::Void(opener)) = game.bid(2, false) else {
            panic!("expected a void round");
        };
        assert_eq!(game.opener(), opener);
        assert_eq!(game.multiplier(), 1);
        assert_eq!(game.round(), 2);
        assert_eq!(game.phase(), Phase::Bidding);
        assert_eq!(game.landlord(), None);
    }

    #[test]
    fn single_acceptor_resolves_on_wrap() {
        let mut game = game(1);
        assert_eq!(game.bid(1, false), Ok(Step::Ask(2)));
        assert_eq!(game.bid(2, true), Ok(Step::Ask(0)));
        assert_eq!(game.bid(0, false), Ok(Step::Resolve(2)));
        assert_eq!(game.multiplier(), 2);
        assert_eq!(game.landlord(), Some(2));
        assert_eq!(game.hand(2).size(), 20);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn final_round_asks_latest_acceptor_first() {
        let mut game = game(0);
        assert_eq!(game.bid(0, true), Ok(Step::Ask(1)));
        assert_eq!(game.bid(1, true), Ok(Step::Ask(2)));
        assert_eq!(game.multiplier(), 4);
        assert_eq!(game.bid(2, false), Ok(Step::Ask(1)));
        assert!(game.bidding.is_final_round());
        assert_eq!(game.bid(1, true), Ok(Step::Resolve(1)));
        assert_eq!(game.multiplier(), 4);
        assert_eq!(game.landlord(), Some(1));
    }

    #[test]
    fn declining_in_final_round_passes_priority_back() {
        let mut game = game(0);
        game.bid(0, true).unwrap();
        game.bid(1, true).unwrap();
        game.bid(2, true).unwrap();
        assert_eq!(game.multiplier(), 8);
        assert_eq!(game.bidding.first(), Some(0));
        assert_eq!(game.bid(2, false), Ok(Step::Ask(1)));
        assert_eq!(game.bid(1, false), Ok(Step::Resolve(0)));
        assert_eq!(game.landlord(), Some(0));
    }

    #[test]
    fn out_of_turn_is_structural() {
        let mut game = game(0);
        assert!(matches!(game.bid(2, true), Err(GameError::Structural(_))));
    }

    #[test]
    fn answers() {
        assert_eq!(answer("Y"), Some(true));
        assert_eq!(answer(" bid "), Some(true));
        assert_eq!(answer(""), Some(false));
        assert_eq!(answer("pass"), Some(false));
        assert_eq!(answer("maybe"), None);
    }
}
