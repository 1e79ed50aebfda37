use super::code::Wake;
use super::error::MailError;
use crate::Position;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::channel;
use tokio::sync::mpsc::error::TrySendError;

/// Receiving end of one seat's single-slot turn mailbox.
#[derive(Debug)]
pub struct Mailbox {
    seat: Position,
    rx: Receiver<Wake>,
}

impl Mailbox {
    pub fn seat(&self) -> Position {
        self.seat
    }
    /// Waits for the next wake code. None once the game is torn down.
    pub async fn recv(&mut self) -> Option<Wake> {
        self.rx.recv().await
    }
}

/// Sending ends of every mailbox in a game.
///
/// Senders live only here, so closing the postbox closes every mailbox at
/// once. A post never queues behind an unread one: if the slot is full the
/// wake is dropped and reported.
#[derive(Debug)]
pub struct Postbox {
    slots: Mutex<Option<Vec<Sender<Wake>>>>,
}

impl Postbox {
    /// Opens `n` capacity-1 mailboxes.
    pub fn open(n: usize) -> (Arc<Self>, Vec<Mailbox>) {
        let (senders, mailboxes) = (0..n)
            .map(|seat| {
                let (tx, rx) = channel(1);
                (tx, Mailbox { seat, rx })
            })
            .unzip::<_, _, Vec<_>, Vec<_>>();
        let postbox = Self {
            slots: Mutex::new(Some(senders)),
        };
        (Arc::new(postbox), mailboxes)
    }
    pub fn post(&self, seat: Position, wake: Wake) -> Result<(), MailError> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let code = wake.code();
        let result = slots
            .as_ref()
            .ok_or(MailError::Closed)?
            .get(seat)
            .ok_or(MailError::Vacant)?
            .try_send(wake);
        match result {
            Ok(()) => {
                log::trace!("[postbox] {} -> P{}", code, seat);
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                log::error!("[postbox] P{} already holds a wake code, {} lost", seat, code);
                Err(MailError::Full)
            }
            Err(TrySendError::Closed(_)) => Err(MailError::Closed),
        }
    }
    /// Closes every mailbox. Only the first call does anything.
    pub fn close(&self) -> bool {
        let closed = self
            .slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some();
        if closed {
            log::debug!("[postbox] closed");
        }
        closed
    }
    /// True when no mailbox holds an unread wake code.
    pub fn quiet(&self) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|slots| slots.iter().all(|tx| tx.capacity() == tx.max_capacity()))
            .unwrap_or(true)
    }
    pub fn is_closed(&self) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameroom::Code;

    #[tokio::test]
    async fn delivers_to_the_right_seat() {
        let (postbox, mut mailboxes) = Postbox::open(3);
        postbox.post(1, Wake::Wait).unwrap();
        let wake = mailboxes[1].recv().await.unwrap();
        assert_eq!(wake.code(), Code::Wait);
        assert_eq!(mailboxes[1].seat(), 1);
    }

    #[tokio::test]
    async fn second_unread_post_is_lost() {
        let (postbox, mut mailboxes) = Postbox::open(1);
        postbox.post(0, Wake::Wait).unwrap();
        assert_eq!(postbox.post(0, Wake::Reset), Err(MailError::Full));
        assert_eq!(mailboxes[0].recv().await.unwrap().code(), Code::Wait);
        postbox.post(0, Wake::Reset).unwrap();
    }

    #[tokio::test]
    async fn closing_ends_every_mailbox() {
        let (postbox, mut mailboxes) = Postbox::open(2);
        assert!(postbox.close());
        assert!(postbox.is_closed());
        assert!(mailboxes[0].recv().await.is_none());
        assert!(mailboxes[1].recv().await.is_none());
        assert_eq!(postbox.post(0, Wake::Wait), Err(MailError::Closed));
    }

    #[tokio::test]
    async fn racing_closes_run_once() {
        for _ in 0..64 {
            let (postbox, _mailboxes) = Postbox::open(3);
            let a = tokio::spawn({
                let postbox = postbox.clone();
                async move { postbox.close() }
            });
            let b = tokio::spawn({
                let postbox = postbox.clone();
                async move { postbox.close() }
            });
            let (a, b) = (a.await.unwrap(), b.await.unwrap());
            assert!(a ^ b);
        }
    }

    #[tokio::test]
    async fn quiet_once_drained() {
        let (postbox, mut mailboxes) = Postbox::open(2);
        assert!(postbox.quiet());
        postbox.post(1, Wake::Wait).unwrap();
        assert!(!postbox.quiet());
        mailboxes[1].recv().await.unwrap();
        assert!(postbox.quiet());
    }

    #[test]
    fn unknown_seat_is_vacant() {
        let (postbox, _mailboxes) = Postbox::open(1);
        assert_eq!(postbox.post(5, Wake::Wait), Err(MailError::Vacant));
    }
}
