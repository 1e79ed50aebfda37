/// Failures of the player I/O collaborator.
///
/// None of these are faults of the engine: a timeout takes the default
/// action, and both `Closed` and `Exit` put the seat on autopilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskError {
    Timeout,
    Closed,
    Exit,
}

impl std::fmt::Display for AskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Closed => write!(f, "connection closed"),
            Self::Exit => write!(f, "player exited"),
        }
    }
}

impl std::error::Error for AskError {}

/// Delivery failures of a turn mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailError {
    /// The slot already held an unread wake code; this one was dropped.
    Full,
    /// The game has been torn down.
    Closed,
    /// No mailbox for that seat.
    Vacant,
}

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "mailbox full, wake code lost"),
            Self::Closed => write!(f, "mailbox closed"),
            Self::Vacant => write!(f, "no mailbox at that seat"),
        }
    }
}

impl std::error::Error for MailError {}

/// Broken game invariant. Fatal to the round, never to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Structural(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structural(s) => write!(f, "invariant violated: {}", s),
        }
    }
}

impl std::error::Error for GameError {}
