use super::kind::Kind;
use crate::cards::Rank;

/// A recognised, ranked interpretation of a set of played cards.
///
/// `ranks` holds the main ranks (the triples of a plane, the four of a
/// bomb) lowest first; `strength` is the ruleset value of the highest main
/// rank and is only comparable between faces of the same kind and size.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Face {
    kind: Kind,
    ranks: Vec<Rank>,
    size: usize,
    strength: i32,
}

impl Face {
    pub fn new(kind: Kind, ranks: Vec<Rank>, size: usize, strength: i32) -> Self {
        Self {
            kind,
            ranks,
            size,
            strength,
        }
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn strength(&self) -> i32 {
        self.strength
    }
    /// True iff `self` may legally be played over `other`.
    ///
    /// Irreflexive and asymmetric: a rocket beats everything and nothing
    /// beats a rocket, bombs beat every non-bomb, and otherwise only a face
    /// of the same kind and size with higher strength wins.
    pub fn beats(&self, other: &Face) -> bool {
        match (self.kind, other.kind) {
            (_, Kind::Rocket) => false,
            (Kind::Rocket, _) => true,
            (Kind::Bomb, Kind::Bomb) => self.strength > other.strength,
            (Kind::Bomb, _) => true,
            (_, Kind::Bomb) => false,
            (a, b) => a == b && self.size == other.size && self.strength > other.strength,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ranks = self.ranks.iter().map(|r| r.to_string()).collect::<String>();
        write!(f, "{} {}", self.kind, ranks)
    }
}
