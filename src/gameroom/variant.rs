use super::timer::Timeouts;
use crate::cards::Deck;
use crate::faces::Classic;
use crate::faces::Rules;
use crate::faces::RunFast;
use serde::Deserialize;
use serde::Serialize;

/// Which shedding game a room plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// 54 cards, kitty of three, bid for landlord.
    #[default]
    Classic,
    /// Classic with one random rank made wild every deal.
    Laizi,
    /// 48 cards, no kitty, no bidding, lowest card leads, must beat.
    RunFast,
}

impl Variant {
    pub fn rules(&self) -> &'static dyn Rules {
        match self {
            Self::Classic | Self::Laizi => &Classic,
            Self::RunFast => &RunFast,
        }
    }
    pub fn deck(&self) -> Deck {
        match self {
            Self::Classic | Self::Laizi => Deck::full(),
            Self::RunFast => Deck::short(),
        }
    }
    pub fn kitty(&self) -> usize {
        match self {
            Self::Classic | Self::Laizi => 3,
            Self::RunFast => 0,
        }
    }
    pub fn bidding(&self) -> bool {
        !matches!(self, Self::RunFast)
    }
    pub fn wildcards(&self) -> bool {
        matches!(self, Self::Laizi)
    }
}

impl TryFrom<&str> for Variant {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "landlord" => Ok(Self::Classic),
            "laizi" | "wild" => Ok(Self::Laizi),
            "run_fast" | "runfast" => Ok(Self::RunFast),
            other => Err(format!("unknown variant: {}", other)),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Laizi => write!(f, "laizi"),
            Self::RunFast => write!(f, "run fast"),
        }
    }
}

/// Everything a room needs to know to host a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setup {
    pub variant: Variant,
    pub seats: usize,
    pub timeouts: Timeouts,
    pub chat: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seats: crate::N,
            timeouts: Timeouts::default(),
            chat: true,
        }
    }
}

impl From<Variant> for Setup {
    fn from(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decks_divide_evenly() {
        for variant in [Variant::Classic, Variant::Laizi, Variant::RunFast] {
            let deck = variant.deck();
            assert_eq!((deck.size() - variant.kitty()) % crate::N, 0);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!(Variant::try_from("RunFast"), Ok(Variant::RunFast));
        assert_eq!(Variant::try_from("landlord"), Ok(Variant::Classic));
        assert!(Variant::try_from("poker").is_err());
    }

    #[test]
    fn only_run_fast_skips_bidding() {
        assert!(Variant::Classic.bidding());
        assert!(Variant::Laizi.wildcards());
        assert!(!Variant::RunFast.bidding());
        assert!(Variant::RunFast.rules().must_beat());
    }
}
