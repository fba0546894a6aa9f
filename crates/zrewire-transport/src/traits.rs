use bytes::Bytes;

use crate::error::Result;

/// Which end of the asynchronous request/reply channel a socket occupies.
///
/// The role is fixed at construction time. Router sockets see a
/// peer-identifying frame ahead of every delivered message and must lead
/// every submit with one; dealer sockets neither send nor see that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketRole {
    /// Point-to-point requester. No identity frames on either direction.
    Dealer,
    /// Responder. The substrate injects the sender's identity on delivery
    /// and consumes a leading identity frame on submit.
    Router,
}

/// A duplex channel carrying whole multipart messages.
///
/// `submit` hands one message's frames to the substrate atomically;
/// `deliver` blocks until one whole message is available. Callers treat
/// implementations as black boxes: retry, timeout, and cancellation
/// policy all live behind this trait.
pub trait Socket {
    /// The construction-time role of this socket.
    fn role(&self) -> SocketRole;

    /// Send one multipart message.
    fn submit(&self, frames: Vec<Bytes>) -> Result<()>;

    /// Receive one multipart message, blocking until it is complete.
    fn deliver(&self) -> Result<Vec<Bytes>>;
}
