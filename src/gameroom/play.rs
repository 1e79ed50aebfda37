use super::game::Game;
use super::game::Lead;
use super::game::Phase;
use crate::Position;
use crate::cards::Card;
use crate::cards::Hand;
use crate::faces::Face;
use crate::faces::PlayError;
use crate::faces::hint;
use crate::faces::parse;
use crate::faces::select;

/// One line of player input during the play phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Pass,
    Peek,
    Cards(String),
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "" | "p" | "pass" => Self::Pass,
            "v" | "view" | "peek" => Self::Peek,
            _ => Self::Cards(text.trim().to_string()),
        }
    }
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Played(Face),
    Passed,
}

impl Game {
    /// Validates and commits a play of the cards named by `selectors`.
    ///
    /// Selectors must resolve to held cards, the cards must read as some
    /// face, and unless `seat` leads the trick one reading must beat the
    /// table. Any refusal leaves the game untouched.
    pub fn play(&mut self, seat: Position, selectors: &str) -> Result<Face, PlayError> {
        if self.phase != Phase::Playing {
            return Err(PlayError::Malformed("bidding is not over".into()));
        }
        let cards = select(&self.hands[seat], selectors)?;
        if cards.is_empty() {
            return Err(PlayError::NoFace);
        }
        let candidates = parse(&cards, self.rules());
        if candidates.is_empty() {
            return Err(PlayError::NoFace);
        }
        let chosen = match self.last_face().filter(|_| !self.is_master(seat)) {
            None => candidates.into_iter().next(),
            Some(last) => candidates.into_iter().find(|c| c.face.beats(last)),
        }
        .ok_or(PlayError::TooWeak)?;
        self.commit(seat, chosen.face.clone(), chosen.cards);
        Ok(chosen.face)
    }

    /// Declines to follow. The trick leader may not pass, and under
    /// must-beat rules nobody may pass while holding a winning play.
    pub fn pass(&mut self, seat: Position) -> Result<(), PlayError> {
        if self.is_master(seat) {
            return Err(PlayError::MustPlay);
        }
        if self.rules().must_beat() && hint(&self.hands[seat], self.last_face(), self.rules()).is_some() {
            return Err(PlayError::MustBeat);
        }
        log::debug!("[game {}] P{} passes", self.room, seat);
        Ok(())
    }

    /// Default action for a seat that timed out or left: the trick leader
    /// plays their lowest single, everyone else passes.
    pub fn autoplay(&mut self, seat: Position) -> Move {
        if !self.is_master(seat) {
            return Move::Passed;
        }
        let Some(card) = self.hands[seat].lowest() else {
            return Move::Passed;
        };
        let card = match card.is_wild() {
            true => card.bind(card.rank()),
            false => card,
        };
        match parse(&[card], self.rules()).into_iter().next() {
            Some(single) => {
                self.commit(seat, single.face.clone(), single.cards);
                Move::Played(single.face)
            }
            None => Move::Passed,
        }
    }

    fn commit(&mut self, seat: Position, face: Face, cards: Vec<Card>) {
        self.hands[seat].remove(&cards);
        cards.iter().for_each(|c| self.counter.decrement(c.logical()));
        self.discard.extend(cards.iter().copied());
        log::debug!(
            "[game {}] P{} plays {} as {}",
            self.room,
            seat,
            Hand::from(cards.clone()),
            face
        );
        self.last = Some(Lead { seat, face, cards });
    }
}

impl Game {
    /// What `seat` sees when their turn starts.
    pub fn prompt(&self, seat: Position) -> String {
        let mut lines = vec![format!("your cards: {}", self.hands[seat])];
        if let Some(rank) = self.wildcard {
            lines.push(format!("wild: {}", rank));
        }
        match self.last.as_ref().filter(|_| !self.is_master(seat)) {
            Some(lead) => lines.push(format!(
                "beat P{}: {} ({})",
                lead.seat,
                Hand::from(lead.cards.clone()),
                lead.face
            )),
            None => lines.push("you lead, play any face".to_string()),
        }
        lines.join("\n")
    }

    /// The bidding question for `seat`.
    pub fn ask_bid(&self, seat: Position) -> String {
        format!(
            "your cards: {}\nmultiplier x{}\nbid for landlord? (y/n)",
            self.hands[seat], self.multiplier
        )
    }

    /// Table view: unseen ranks from `seat`'s side, card counts, last play.
    pub fn peek(&self, seat: Position) -> String {
        let counts = self
            .hands
            .iter()
            .enumerate()
            .map(|(p, h)| format!("P{}:{}", p, h.size()))
            .collect::<Vec<_>>();
        let table = match self.last.as_ref() {
            Some(lead) => format!("P{} {}", lead.seat, Hand::from(lead.cards.clone())),
            None => "empty".to_string(),
        };
        format!(
            "unseen: {}\ncards: {}\ntable: {}\nmultiplier x{}",
            self.counter.view(&self.hands[seat]),
            counts.join(" "),
            table,
            self.multiplier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;
    use crate::cards::Deal;
    use crate::cards::Rank;
    use crate::faces::Kind;
    use crate::gameroom::Setup;
    use crate::gameroom::Variant;

    fn deal(hands: [&str; 3], kitty: &str) -> Deal {
        Deal {
            hands: hands.iter().map(|h| Hand::try_from(*h).unwrap()).collect(),
            kitty: Hand::try_from(kitty).unwrap().into(),
        }
    }

    /// A classic table mid-round: seat 0 won the auction and leads.
    fn table() -> Game {
        let deal = deal(
            [
                "3c 4d 5h 6s 8c 9c 9d Tc Jd Qh Ks Ac 2c 2d X 3d 4c",
                "3h 4h 5c 6c 7c 7d 8d Th Jh Qc Kc Ad 2h D 5d 6d 7h",
                "3s 4s 5s 6h 7s 8h 8s 9h 9s Ts Js Qs Qd Kd Kh As Ah",
            ],
            "2s Jc Td",
        );
        let players = (0..3).map(|_| ID::default()).collect();
        let mut game = Game::arrange(ID::default(), players, &Setup::default(), deal, 0).unwrap();
        game.bid(0, true).unwrap();
        game.bid(1, false).unwrap();
        game.bid(2, false).unwrap();
        game
    }

    /// The same deal under laizi rules with nines wild.
    fn wild_table() -> Game {
        let deal = deal(
            [
                "3c 4d 5h 6s 8c 9c 9d Tc Jd Qh Ks Ac 2c 2d X 3d 4c",
                "3h 4h 5c 6c 7c 7d 8d Th Jh Qc Kc Ad 2h D 5d 6d 7h",
                "3s 4s 5s 6h 7s 8h 8s 9h 9s Ts Js Qs Qd Kd Kh As Ah",
            ],
            "2s Jc Td",
        );
        let players = (0..3).map(|_| ID::default()).collect();
        let setup = Setup::from(Variant::Laizi);
        let mut game = Game::arrange(ID::default(), players, &setup, deal, 0).unwrap();
        game.hands.iter_mut().for_each(|h| h.flag(Rank::Nine));
        game.wildcard = Some(Rank::Nine);
        game.bid(0, true).unwrap();
        game.bid(1, false).unwrap();
        game.bid(2, false).unwrap();
        game
    }

    #[test]
    fn wildcard_fills_a_triple_and_counts_as_borrowed_rank() {
        let mut game = wild_table();
        let face = game.play(0, "333").unwrap();
        assert_eq!(face.kind(), Kind::Triple);
        assert_eq!(face.ranks(), &[Rank::Three]);
        let played = game.last_cards().unwrap();
        let wild = played.iter().find(|c| c.is_wild()).unwrap();
        assert_eq!(wild.rank(), Rank::Nine);
        assert_eq!(wild.logical(), Rank::Three);
        assert_eq!(game.hand(0).of(Rank::Nine).count(), 1);
        assert_eq!(game.counter().get(Rank::Three), 1);
        assert_eq!(game.counter().get(Rank::Nine), 4);
        assert!(game.check().is_ok());
    }

    #[test]
    fn lone_wildcard_leads_as_itself() {
        let mut game = wild_table();
        let face = game.play(0, "*").unwrap();
        assert_eq!(face.kind(), Kind::Single);
        assert_eq!(face.ranks(), &[Rank::Nine]);
        assert_eq!(game.counter().get(Rank::Nine), 3);
    }

    #[test]
    fn inputs() {
        assert_eq!(Input::from(""), Input::Pass);
        assert_eq!(Input::from(" P "), Input::Pass);
        assert_eq!(Input::from("view"), Input::Peek);
        assert_eq!(Input::from("345 67"), Input::Cards("345 67".into()));
    }

    #[test]
    fn leader_cannot_pass() {
        let mut game = table();
        assert!(game.is_master(0));
        assert_eq!(game.pass(0), Err(PlayError::MustPlay));
    }

    #[test]
    fn broken_straight_is_rejected() {
        let mut game = table();
        assert_eq!(game.play(0, "34569"), Err(PlayError::NoFace));
        assert_eq!(game.hand(0).size(), 20);
        assert!(game.last().is_none());
        assert!(game.check().is_ok());
    }

    #[test]
    fn unknown_selector_is_rejected() {
        let mut game = table();
        assert_eq!(game.play(0, "hello"), Err(PlayError::Unknown('h')));
    }

    #[test]
    fn tie_is_rejected_higher_is_accepted() {
        let mut game = table();
        let face = game.play(0, "9").unwrap();
        assert_eq!(face.kind(), Kind::Single);
        assert_eq!(game.counter().get(Rank::Nine), 3);
        assert!(!game.is_master(1));
        assert_eq!(game.play(1, "8"), Err(PlayError::TooWeak));
        assert_eq!(game.play(1, "T"), Ok(face_of(&game, 1)));
        assert_eq!(game.last_player(), Some(1));
        assert_eq!(game.counter().get(Rank::Ten), 3);
        assert!(game.check().is_ok());
    }

    fn face_of(game: &Game, seat: Position) -> Face {
        game.last()
            .filter(|l| l.seat == seat)
            .map(|l| l.face.clone())
            .unwrap()
    }

    #[test]
    fn follower_may_pass_and_leader_regains_control() {
        let mut game = table();
        game.play(0, "3").unwrap();
        assert_eq!(game.pass(1), Ok(()));
        assert_eq!(game.pass(2), Ok(()));
        assert!(game.is_master(0));
        assert_eq!(game.pass(0), Err(PlayError::MustPlay));
    }

    #[test]
    fn autoplay_leads_lowest_single_or_passes() {
        let mut game = table();
        let Move::Played(face) = game.autoplay(0) else {
            panic!("leader must play");
        };
        assert_eq!(face.kind(), Kind::Single);
        assert_eq!(game.hand(0).size(), 19);
        assert_eq!(game.autoplay(1), Move::Passed);
        assert_eq!(game.hand(1).size(), 17);
    }

    #[test]
    fn joker_beats_ace() {
        let mut game = table();
        game.play(0, "A").unwrap();
        assert_eq!(game.play(1, "X"), Err(PlayError::Missing(Rank::Little)));
        assert!(game.play(1, "D").is_ok());
        assert_eq!(game.last_cards().map(|c| c.len()), Some(1));
    }

    #[test]
    fn run_fast_must_beat_when_able() {
        let deal = deal(
            [
                "3c 4d 5h 6s 8c 9c 9d Tc Jd Qh Ks Ac 3d 4c 5d 6d",
                "3h 4h 5c 6c 7c 7d 8d Th Jh Qc Kc Ad 2s 7h 8h 8s",
                "3s 4s 5s 6h 7s 9h 9s Ts Js Qs Qd Kd Kh Ah Td Jc",
            ],
            "",
        );
        let players = (0..3).map(|_| ID::default()).collect();
        let setup = Setup::from(Variant::RunFast);
        let mut game = Game::arrange(ID::default(), players, &setup, deal, 0).unwrap();
        game.play(0, "3").unwrap();
        assert_eq!(game.pass(1), Err(PlayError::MustBeat));
        assert!(game.play(1, "4").is_ok());
    }

    #[test]
    fn peek_shows_counts() {
        let mut game = table();
        game.play(0, "3").unwrap();
        let view = game.peek(1);
        assert!(view.contains("P0:19"));
        assert!(view.contains("table: P0 3d"));
    }
}
