use super::code::Wake;
use super::game::Game;
use super::mailbox::Postbox;
use super::player::Broadcast;
use super::player::Member;
use super::player::Player;
use super::room::Room;
use super::worker::Worker;
use crate::ID;
use crate::Unique;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Starts a game in a room.
pub struct Dealer;

impl Dealer {
    /// Opens one mailbox per seat, spawns a worker for each, tells every
    /// seat but the opener to wait, and hands the game to the opener.
    ///
    /// `seats` must follow the game's seating order.
    pub async fn launch(
        lobby: Arc<Mutex<Room>>,
        seats: Vec<(ID<Member>, Box<dyn Player>)>,
        game: Game,
        bus: Arc<dyn Broadcast>,
    ) -> anyhow::Result<Vec<JoinHandle<()>>> {
        if seats.iter().map(|(m, _)| *m).ne(game.players().iter().copied()) {
            return Err(anyhow::anyhow!("seating does not match the deal"));
        }
        let (postbox, mailboxes) = Postbox::open(seats.len());
        let (room, chat) = {
            let mut room = lobby.lock().await;
            room.begin(postbox.clone())?;
            (room.id(), room.setup().chat)
        };
        let handles = seats
            .into_iter()
            .zip(mailboxes)
            .map(|((member, player), mailbox)| {
                Worker::new(
                    member,
                    room,
                    player,
                    mailbox,
                    postbox.clone(),
                    lobby.clone(),
                    bus.clone(),
                    chat,
                )
            })
            .map(|worker| tokio::spawn(worker.run()))
            .collect::<Vec<_>>();
        let (opener, wake) = game.open();
        for seat in (0..handles.len()).filter(|p| *p != opener) {
            postbox.post(seat, Wake::Wait)?;
        }
        while !postbox.quiet() {
            tokio::task::yield_now().await;
        }
        postbox.post(opener, wake)?;
        log::info!("[room {}] dealt, P{} opens", room, opener);
        Ok(handles)
    }
}
