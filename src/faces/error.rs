use crate::cards::Rank;

/// Reasons a submitted play is refused. Always recoverable: the player is
/// told and asked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    Unknown(char),
    Missing(Rank),
    NoWild,
    NoFace,
    TooWeak,
    MustPlay,
    MustBeat,
    Malformed(String),
}

impl std::fmt::Display for PlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(c) => write!(f, "unknown card selector: {}", c),
            Self::Missing(r) => write!(f, "you do not hold enough {}", r),
            Self::NoWild => write!(f, "you hold no wildcard"),
            Self::NoFace => write!(f, "faces invalid"),
            Self::TooWeak => write!(f, "does not beat the table"),
            Self::MustPlay => write!(f, "you lead this trick and must play"),
            Self::MustBeat => write!(f, "you can beat the table and must play"),
            Self::Malformed(s) => write!(f, "cannot understand: {}", s),
        }
    }
}

impl std::error::Error for PlayError {}
