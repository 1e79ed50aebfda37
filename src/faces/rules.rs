use super::kind::Kind;
use crate::cards::Rank;

/// House rules a table plays under.
///
/// A ruleset is a small bundle of pure functions: rank values, chain
/// lengths, ranks barred from chains, and which shapes are legal at all.
pub trait Rules: Send + Sync + std::fmt::Debug {
    /// Ordering value of a rank; higher beats lower.
    fn value(&self, rank: Rank) -> i32;
    /// Minimum number of consecutive main ranks in a chain of `group`-sized units.
    fn boundary(&self, group: usize) -> usize;
    /// Ranks that may never appear in a chain.
    fn reserved(&self) -> &'static [Rank];
    fn allows(&self, _: Kind) -> bool {
        true
    }
    /// Whether a non-leading player must play when able to beat the table.
    fn must_beat(&self) -> bool {
        false
    }
    /// Distinct `ranks` form a legal chain of `group`-sized units.
    fn is_straight(&self, ranks: &[Rank], group: usize) -> bool {
        let mut values = ranks.iter().map(|r| self.value(*r)).collect::<Vec<_>>();
        values.sort_unstable();
        ranks.len() >= self.boundary(group)
            && ranks.iter().all(|r| !self.reserved().contains(r))
            && values.windows(2).all(|w| w[1] == w[0] + 1)
    }
}

/// Classic three-player landlord.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl Rules for Classic {
    fn value(&self, rank: Rank) -> i32 {
        i32::from(u8::from(rank)) + 3
    }
    fn boundary(&self, group: usize) -> usize {
        match group {
            1 => 5,
            2 => 3,
            3 => 2,
            _ => usize::MAX,
        }
    }
    fn reserved(&self) -> &'static [Rank] {
        &[Rank::Two, Rank::Little, Rank::Big]
    }
}

/// Run fast: short deck, shorter pair chains, no four-with-two, must beat.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunFast;

impl Rules for RunFast {
    fn value(&self, rank: Rank) -> i32 {
        i32::from(u8::from(rank)) + 3
    }
    fn boundary(&self, group: usize) -> usize {
        match group {
            1 => 5,
            2 => 2,
            3 => 2,
            _ => usize::MAX,
        }
    }
    fn reserved(&self) -> &'static [Rank] {
        &[Rank::Two]
    }
    fn allows(&self, kind: Kind) -> bool {
        !matches!(kind, Kind::FourSingles | Kind::FourPairs | Kind::Rocket)
    }
    fn must_beat(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_is_reserved_from_straights() {
        let ranks = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];
        assert!(Classic.is_straight(&ranks, 1));
        let ranks = [Rank::Jack, Rank::Queen, Rank::King, Rank::Ace, Rank::Two];
        assert!(!Classic.is_straight(&ranks, 1));
        assert!(!RunFast.is_straight(&ranks, 1));
    }

    #[test]
    fn gaps_break_straights() {
        let ranks = [Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Eight];
        assert!(!Classic.is_straight(&ranks, 1));
    }

    #[test]
    fn pair_chain_lengths_differ() {
        let ranks = [Rank::Three, Rank::Four];
        assert!(!Classic.is_straight(&ranks, 2));
        assert!(RunFast.is_straight(&ranks, 2));
    }
}
