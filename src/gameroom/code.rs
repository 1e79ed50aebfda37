use super::game::Game;

/// Small integer wake codes carried by turn mailboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Code {
    Bid = 1,
    Play = 2,
    Reset = 3,
    Wait = 4,
}

/// A wake code as delivered to a worker.
///
/// `Bid` and `Play` carry the game itself: whoever holds the message holds
/// the turn, and only that worker can reach the game object.
#[derive(Debug)]
pub enum Wake {
    Bid(Box<Game>),
    Play(Box<Game>),
    Reset,
    Wait,
}

impl Wake {
    pub fn code(&self) -> Code {
        match self {
            Self::Bid(_) => Code::Bid,
            Self::Play(_) => Code::Play,
            Self::Reset => Code::Reset,
            Self::Wait => Code::Wait,
        }
    }
}

impl From<Code> for u8 {
    fn from(code: Code) -> u8 {
        code as u8
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Bid => write!(f, "BID"),
            Self::Play => write!(f, "PLAY"),
            Self::Reset => write!(f, "RESET"),
            Self::Wait => write!(f, "WAIT"),
        }
    }
}
