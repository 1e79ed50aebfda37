use super::card::Card;
use super::rank::Rank;

/// Ordered multiset of cards held by one player.
/// Always kept sorted by physical rank, then suit, so the lowest card is
/// first and display order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn lowest(&self) -> Option<Card> {
        self.0.first().copied()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    /// Cards whose physical rank is `rank`.
    pub fn of(&self, rank: Rank) -> impl DoubleEndedIterator<Item = &Card> {
        self.0.iter().filter(move |c| c.rank() == rank)
    }
    pub fn wilds(&self) -> impl DoubleEndedIterator<Item = &Card> {
        self.0.iter().filter(|c| c.is_wild())
    }
    pub fn add<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.0.extend(cards);
        self.sort();
    }
    /// Removes every listed card, or nothing if any of them is missing.
    pub fn remove(&mut self, cards: &[Card]) -> bool {
        if cards.iter().all(|c| self.contains(c)) {
            self.0.retain(|c| !cards.contains(c));
            true
        } else {
            false
        }
    }
    /// Flags every card of `rank` as a wildcard.
    pub fn flag(&mut self, rank: Rank) {
        self.0
            .iter_mut()
            .filter(|c| c.rank() == rank)
            .for_each(|c| *c = c.wild());
    }
    pub fn sort(&mut self) {
        self.0.sort_by_key(|c| u8::from(*c));
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        let mut hand = Self(cards);
        hand.sort();
        hand
    }
}
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// str isomorphism over whitespace separated cards, e.g. "3c 3d X"
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self.0.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        write!(f, "{}", cards.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_on_construction() {
        let hand = Hand::try_from("D 2s 3h 3c").unwrap();
        assert_eq!(hand.to_string(), "3c 3h 2s D");
        assert_eq!(hand.lowest(), Card::try_from("3c").ok());
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut hand = Hand::try_from("3c 4d 5h").unwrap();
        let missing = Hand::try_from("3c 6s").unwrap();
        assert!(!hand.remove(missing.cards()));
        assert_eq!(hand.size(), 3);
        let present = Hand::try_from("3c 5h").unwrap();
        assert!(hand.remove(present.cards()));
        assert_eq!(hand.to_string(), "4d");
    }

    #[test]
    fn flag_marks_rank_as_wild() {
        let mut hand = Hand::try_from("5c 5d 6h").unwrap();
        hand.flag(Rank::Five);
        assert_eq!(hand.wilds().count(), 2);
        assert_eq!(hand.of(Rank::Six).filter(|c| c.is_wild()).count(), 0);
    }
}
