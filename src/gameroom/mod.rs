mod bidding;
mod code;
mod dealer;
mod error;
mod game;
mod mailbox;
mod play;
mod player;
mod room;
mod timer;
mod variant;
mod worker;

pub use bidding::*;
pub use code::*;
pub use dealer::*;
pub use error::*;
pub use game::*;
pub use mailbox::*;
pub use play::*;
pub use player::*;
pub use room::*;
pub use timer::*;
pub use variant::*;
pub use worker::*;
