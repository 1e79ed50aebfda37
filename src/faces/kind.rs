/// Shape of a legal combination.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    Single,
    Pair,
    Triple,
    TripleSingle,
    TriplePair,
    Straight,
    PairStraight,
    Plane,
    PlaneSingles,
    PlanePairs,
    FourSingles,
    FourPairs,
    Bomb,
    Rocket,
}

impl Kind {
    /// Cards contributed by each main rank.
    pub fn group(&self) -> usize {
        match self {
            Kind::Single | Kind::Straight => 1,
            Kind::Pair | Kind::PairStraight | Kind::Rocket => 2,
            Kind::Triple
            | Kind::TripleSingle
            | Kind::TriplePair
            | Kind::Plane
            | Kind::PlaneSingles
            | Kind::PlanePairs => 3,
            Kind::FourSingles | Kind::FourPairs | Kind::Bomb => 4,
        }
    }
    /// Attachments carried alongside `mains` main ranks: (count, as pairs).
    pub fn wings(&self, mains: usize) -> (usize, bool) {
        match self {
            Kind::TripleSingle | Kind::PlaneSingles => (mains, false),
            Kind::TriplePair | Kind::PlanePairs => (mains, true),
            Kind::FourSingles => (2, false),
            Kind::FourPairs => (2, true),
            _ => (0, false),
        }
    }
    pub fn is_bomb(&self) -> bool {
        matches!(self, Kind::Bomb | Kind::Rocket)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Kind::Single => "single",
                Kind::Pair => "pair",
                Kind::Triple => "triple",
                Kind::TripleSingle => "triple with single",
                Kind::TriplePair => "triple with pair",
                Kind::Straight => "straight",
                Kind::PairStraight => "pair straight",
                Kind::Plane => "plane",
                Kind::PlaneSingles => "plane with singles",
                Kind::PlanePairs => "plane with pairs",
                Kind::FourSingles => "four with two",
                Kind::FourPairs => "four with two pairs",
                Kind::Bomb => "bomb",
                Kind::Rocket => "rocket",
            }
        )
    }
}
