use super::card::Card;
use super::hand::Hand;
use super::rank::Rank;
use super::suit::Suit;
use rand::Rng;
use rand::seq::SliceRandom;

/// A shoe of cards to be shuffled and dealt.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

/// Result of splitting a deck: one hand per seat plus the reserved kitty.
#[derive(Debug, Clone)]
pub struct Deal {
    pub hands: Vec<Hand>,
    pub kitty: Vec<Card>,
}

impl Deck {
    /// All 54 cards.
    pub fn full() -> Self {
        Self((0..Card::COUNT).map(Card::from).collect())
    }
    /// 48 cards: no jokers, a single two (spades), three aces (no spade ace).
    pub fn short() -> Self {
        Self(
            (0..Card::COUNT)
                .map(Card::from)
                .filter(|c| !c.rank().is_joker())
                .filter(|c| c.rank() != Rank::Two || c.suit() == Some(Suit::Spade))
                .filter(|c| c.rank() != Rank::Ace || c.suit() != Some(Suit::Spade))
                .collect(),
        )
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }
    /// Splits the deck into `seats` equal hands after reserving `kitty` cards.
    /// Returns None when the deck does not divide evenly or leaves nobody
    /// any cards.
    pub fn deal(self, seats: usize, kitty: usize) -> Option<Deal> {
        let dealt = self.0.len().checked_sub(kitty)?;
        if seats == 0 || dealt == 0 || dealt % seats != 0 {
            return None;
        }
        let each = dealt / seats;
        let mut cards = self.0;
        let kitty = cards.split_off(dealt);
        let hands = cards
            .chunks(each)
            .map(|chunk| Hand::from(chunk.to_vec()))
            .collect::<Vec<_>>();
        Some(Deal { hands, kitty })
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
