use super::card::Card;
use super::hand::Hand;
use super::rank::Rank;

/// Per-rank count of cards not yet played.
///
/// The game keeps one counter for the whole table; a player's view
/// subtracts their own hand so it shows only what opponents may hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter([u8; Rank::COUNT]);

impl Counter {
    pub fn get(&self, rank: Rank) -> u8 {
        self.0[usize::from(u8::from(rank))]
    }
    /// Records a played card under the rank it was played as.
    pub fn decrement(&mut self, rank: Rank) {
        let slot = &mut self.0[usize::from(u8::from(rank))];
        *slot = slot.saturating_sub(1);
    }
    pub fn total(&self) -> usize {
        self.0.iter().map(|n| usize::from(*n)).sum()
    }
    /// What remains unseen from the point of view of `hand`'s holder.
    pub fn view(&self, hand: &Hand) -> Self {
        let mut view = *self;
        hand.cards()
            .iter()
            .for_each(|c| view.decrement(c.rank()));
        view
    }
}

impl From<&[Card]> for Counter {
    fn from(cards: &[Card]) -> Self {
        let mut counter = Self::default();
        cards
            .iter()
            .for_each(|c| counter.0[usize::from(u8::from(c.rank()))] += 1);
        counter
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ranks = Rank::all()
            .filter(|r| self.get(*r) > 0)
            .map(|r| format!("{}:{}", r, self.get(r)))
            .collect::<Vec<_>>();
        write!(f, "{}", ranks.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;

    #[test]
    fn full_deck_counts() {
        let deck = (0..Card::COUNT).map(Card::from).collect::<Vec<_>>();
        let counter = Counter::from(deck.as_slice());
        assert_eq!(counter.get(Rank::Three), 4);
        assert_eq!(counter.get(Rank::Big), 1);
        assert_eq!(counter.total(), Deck::full().size());
    }

    #[test]
    fn view_excludes_own_hand() {
        let hand = Hand::try_from("3c 3d X").unwrap();
        let all = (0..Card::COUNT).map(Card::from).collect::<Vec<_>>();
        let view = Counter::from(all.as_slice()).view(&hand);
        assert_eq!(view.get(Rank::Three), 2);
        assert_eq!(view.get(Rank::Little), 0);
        assert_eq!(view.total(), 51);
    }

    #[test]
    fn decrement_saturates() {
        let mut counter = Counter::default();
        counter.decrement(Rank::Ace);
        assert_eq!(counter.get(Rank::Ace), 0);
    }
}
