/// Card ranks in landlord order, lowest first.
/// The derived ordering is the natural play order before any ruleset
/// assigns values; jokers sit above the two.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Rank {
    #[default]
    Three = 0,
    Four = 1,
    Five = 2,
    Six = 3,
    Seven = 4,
    Eight = 5,
    Nine = 6,
    Ten = 7,
    Jack = 8,
    Queen = 9,
    King = 10,
    Ace = 11,
    Two = 12,
    Little = 13,
    Big = 14,
}

impl Rank {
    pub const COUNT: usize = 15;

    /// Every rank, lowest first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (0..Self::COUNT as u8).map(Rank::from)
    }
    /// The thirteen suited ranks that may stand in for a wildcard.
    pub fn suited() -> impl Iterator<Item = Rank> {
        Self::all().filter(|r| !r.is_joker())
    }
    pub fn is_joker(&self) -> bool {
        matches!(self, Rank::Little | Rank::Big)
    }
}

/// u8 isomorphism
impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        match n {
            0 => Rank::Three,
            1 => Rank::Four,
            2 => Rank::Five,
            3 => Rank::Six,
            4 => Rank::Seven,
            5 => Rank::Eight,
            6 => Rank::Nine,
            7 => Rank::Ten,
            8 => Rank::Jack,
            9 => Rank::Queen,
            10 => Rank::King,
            11 => Rank::Ace,
            12 => Rank::Two,
            13 => Rank::Little,
            14 => Rank::Big,
            _ => panic!("invalid rank u8: {}", n),
        }
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// selector character isomorphism
///
/// `0` and `t` are accepted for ten, lowercase letters for everything else.
impl TryFrom<char> for Rank {
    type Error = char;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' | '0' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' | '1' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            'X' => Ok(Rank::Little),
            'D' => Ok(Rank::Big),
            _ => Err(c),
        }
    }
}
impl From<Rank> for char {
    fn from(r: Rank) -> char {
        match r {
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Little => 'X',
            Rank::Big => 'D',
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        assert!(Rank::all().all(|r| r == Rank::from(u8::from(r))));
    }

    #[test]
    fn bijective_char() {
        assert!(Rank::all().all(|r| Rank::try_from(char::from(r)) == Ok(r)));
    }

    #[test]
    fn aliases_for_ten_and_ace() {
        assert_eq!(Rank::try_from('0'), Ok(Rank::Ten));
        assert_eq!(Rank::try_from('t'), Ok(Rank::Ten));
        assert_eq!(Rank::try_from('1'), Ok(Rank::Ace));
        assert_eq!(Rank::try_from('?'), Err('?'));
    }

    #[test]
    fn jokers_outrank_two() {
        assert!(Rank::Two < Rank::Little);
        assert!(Rank::Little < Rank::Big);
        assert_eq!(Rank::suited().count(), 13);
    }
}
