use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result};
use std::hash::{Hash, Hasher};

/// A physical card plus the rank it currently plays as.
///
/// Identity (equality, hashing) is the physical card only. A wildcard
/// carries a `bound` rank while it stands in for another rank; the binding
/// is made at play time and cleared with [`Card::unbind`], never carried
/// into the next round.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    id: u8,
    wild: bool,
    bound: Option<Rank>,
}

impl Card {
    /// Number of distinct physical cards (52 suited + 2 jokers).
    pub const COUNT: u8 = 54;

    pub fn new(rank: Rank, suit: Suit) -> Self {
        match rank {
            Rank::Little => Self::from(52u8),
            Rank::Big => Self::from(53u8),
            rank => Self::from(u8::from(rank) * 4 + u8::from(suit)),
        }
    }
    /// Physical rank printed on the card.
    pub fn rank(&self) -> Rank {
        match self.id {
            52 => Rank::Little,
            53 => Rank::Big,
            n => Rank::from(n / 4),
        }
    }
    /// Physical suit; jokers have none.
    pub fn suit(&self) -> Option<Suit> {
        match self.id {
            52 | 53 => None,
            n => Some(Suit::from(n % 4)),
        }
    }
    /// Rank this card plays as right now.
    pub fn logical(&self) -> Rank {
        self.bound.unwrap_or(self.rank())
    }
    pub fn is_wild(&self) -> bool {
        self.wild
    }
    /// A wildcard that has not yet been told which rank to play as.
    pub fn is_free(&self) -> bool {
        self.wild && self.bound.is_none()
    }
    pub fn wild(self) -> Self {
        Self { wild: true, ..self }
    }
    pub fn tame(self) -> Self {
        Self {
            wild: false,
            bound: None,
            ..self
        }
    }
    pub fn bind(self, rank: Rank) -> Self {
        Self {
            bound: Some(rank),
            ..self
        }
    }
    pub fn unbind(self) -> Self {
        Self {
            bound: None,
            ..self
        }
    }
}

/// u8 isomorphism
/// suited cards are rank * 4 + suit, then the two jokers
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.id
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < Self::COUNT, "invalid card u8: {}", n);
        Self {
            id: n,
            wild: false,
            bound: None,
        }
    }
}

/// str isomorphism, e.g. "Th", "3c", "X", "D"
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        let rank = chars
            .next()
            .and_then(|c| Rank::try_from(c).ok())
            .ok_or_else(|| format!("invalid card: {}", s))?;
        if rank.is_joker() {
            return Ok(Self::new(rank, Suit::default()));
        }
        let suit = chars
            .next()
            .and_then(|c| Suit::try_from(c).ok())
            .ok_or_else(|| format!("invalid card: {}", s))?;
        Ok(Self::new(rank, suit))
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Card {}
impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.suit() {
            Some(suit) => write!(f, "{}{}", self.rank(), suit)?,
            None => write!(f, "{}", self.rank())?,
        }
        match (self.wild, self.bound) {
            (true, Some(rank)) if rank != self.rank() => write!(f, "={}", rank),
            (true, _) => write!(f, "*"),
            (false, _) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        assert!((0..Card::COUNT).all(|n| u8::from(Card::from(n)) == n));
    }

    #[test]
    fn jokers_have_no_suit() {
        assert_eq!(Card::from(52).rank(), Rank::Little);
        assert_eq!(Card::from(53).rank(), Rank::Big);
        assert_eq!(Card::from(53).suit(), None);
        assert_eq!(Card::try_from("X"), Ok(Card::from(52)));
    }

    #[test]
    fn parse_suited() {
        let card = Card::try_from("Th").unwrap();
        assert_eq!(card.rank(), Rank::Ten);
        assert_eq!(card.suit(), Some(Suit::Heart));
        assert!(Card::try_from("T").is_err());
        assert!(Card::try_from("Zz").is_err());
    }

    #[test]
    fn binding_changes_logical_rank_only() {
        let five = Card::new(Rank::Five, Suit::Spade).wild();
        let bound = five.bind(Rank::King);
        assert_eq!(bound.rank(), Rank::Five);
        assert_eq!(bound.logical(), Rank::King);
        assert_eq!(bound, five);
        assert_eq!(bound.unbind().logical(), Rank::Five);
        assert_eq!(bound.to_string(), "5s=K");
        assert!(!bound.tame().is_wild());
    }
}
