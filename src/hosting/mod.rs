mod bus;
mod client;
mod hall;
mod reaper;
mod server;

pub use bus::*;
pub use client::*;
pub use hall::*;
pub use reaper::*;
pub use server::*;
