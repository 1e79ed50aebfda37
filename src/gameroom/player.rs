use super::error::AskError;
use super::room::Room;
use crate::ID;
use std::time::Duration;

/// Marker for player identities in the registry.
#[derive(Debug)]
pub struct Member;

/// Line-oriented conversation with one connected player.
///
/// Transport agnostic: the engine neither knows nor cares whether lines
/// arrive over a WebSocket, a terminal, or a test script.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Waits at most `timeout` for the player's next line.
    async fn ask(&mut self, timeout: Duration) -> Result<String, AskError>;
    /// Sends a line of text to this player only.
    async fn write(&mut self, text: &str);
    /// Tells this player their last input was refused.
    async fn warn(&mut self, err: &(dyn std::error::Error + Send + Sync));
}

/// Fan-out of room events to every online member.
///
/// Fire and forget: a recipient that cannot be reached is skipped and the
/// sender never learns about it.
#[async_trait::async_trait]
pub trait Broadcast: Send + Sync {
    async fn broadcast(&self, room: ID<Room>, text: &str, exclude: &[ID<Member>]);
}
