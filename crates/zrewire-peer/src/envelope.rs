use bytes::Bytes;
use tracing::trace;
use zrewire_codec::{decode, encode, Command};
use zrewire_transport::{Socket, SocketRole};

use crate::error::{PeerError, Result};

/// A command paired with the transport metadata needed to route a reply.
///
/// On router-role sockets the substrate delivers the sender's identity
/// as an extra leading frame; [`Envelope::receive`] captures it here so
/// a reply can be routed back to the same peer. The identity is captured
/// per receive and must be carried forward explicitly — it is never part
/// of the application payload, and dealer-role sends ignore it.
///
/// Envelopes are plain values. Build one per message; to reply, use
/// [`Envelope::reply`] on the received envelope rather than mutating a
/// shared message object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    routing_id: Option<Bytes>,
    command: Command,
}

impl Envelope {
    /// Wrap a command with no routing identity (dealer-role send, or a
    /// router-role send whose identity is set later).
    pub fn new(command: Command) -> Self {
        Self {
            routing_id: None,
            command,
        }
    }

    /// Wrap a command with the identity of the peer it should reach.
    pub fn with_routing_id(command: Command, routing_id: Bytes) -> Self {
        Self {
            routing_id: Some(routing_id),
            command,
        }
    }

    /// The routing identity captured from a router-role receive, if any.
    pub fn routing_id(&self) -> Option<&Bytes> {
        self.routing_id.as_ref()
    }

    /// Set the routing identity for a router-role send.
    pub fn set_routing_id(&mut self, routing_id: Bytes) {
        self.routing_id = Some(routing_id);
    }

    /// Remove and return the routing identity.
    pub fn take_routing_id(&mut self) -> Option<Bytes> {
        self.routing_id.take()
    }

    /// The wrapped command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Consume the envelope, keeping only the command.
    pub fn into_command(self) -> Command {
        self.command
    }

    /// Build a reply envelope carrying this envelope's routing identity
    /// forward, so a router-role send reaches the original peer.
    pub fn reply(&self, command: Command) -> Envelope {
        Envelope {
            routing_id: self.routing_id.clone(),
            command,
        }
    }

    /// Encode the command and submit it on `socket`.
    ///
    /// Dealer role: frames go out directly; any routing identity on the
    /// envelope is not transmitted. Router role: the routing identity is
    /// required and is prepended as the leading frame, ahead of the
    /// signature frame. Fails with [`PeerError::MissingRoutingId`] before
    /// any transport call if it is absent.
    pub fn send(&self, socket: &impl Socket) -> Result<()> {
        let frames = encode(&self.command)?;
        let frames = match socket.role() {
            SocketRole::Dealer => frames,
            SocketRole::Router => {
                let identity = self
                    .routing_id
                    .clone()
                    .ok_or(PeerError::MissingRoutingId)?;
                let mut routed = Vec::with_capacity(1 + frames.len());
                routed.push(identity);
                routed.extend(frames);
                routed
            }
        };

        trace!(kind = %self.command.kind(), frames = frames.len(), "submitting envelope");
        socket.submit(frames)?;
        Ok(())
    }

    /// Block for the next message on `socket` and decode it.
    ///
    /// Router role: the first delivered frame is captured as the routing
    /// identity before the rest is decoded. Dealer role: every delivered
    /// frame goes to the decoder and the routing identity stays unset.
    pub fn receive(socket: &impl Socket) -> Result<Envelope> {
        let mut frames = socket.deliver()?;
        let routing_id = match socket.role() {
            SocketRole::Router => {
                if frames.is_empty() {
                    return Err(zrewire_codec::WireError::EmptyMessage.into());
                }
                Some(frames.remove(0))
            }
            SocketRole::Dealer => None,
        };

        let command = decode(&frames)?;
        trace!(
            kind = %command.kind(),
            routed = routing_id.is_some(),
            "received envelope"
        );
        Ok(Envelope {
            routing_id,
            command,
        })
    }
}

impl From<Command> for Envelope {
    fn from(command: Command) -> Self {
        Envelope::new(command)
    }
}

#[cfg(test)]
mod tests {
    use zrewire_transport::{RouterSocket, TransportError};

    use super::*;

    #[test]
    fn reply_carries_routing_id_forward() {
        let received =
            Envelope::with_routing_id(Command::ping(1), Bytes::from_static(b"peer-a"));
        let reply = received.reply(Command::ping_ok(1));
        assert_eq!(reply.routing_id(), Some(&Bytes::from_static(b"peer-a")));
        assert_eq!(reply.command(), &Command::ping_ok(1));
    }

    #[test]
    fn take_routing_id_clears_it() {
        let mut envelope =
            Envelope::with_routing_id(Command::ping(1), Bytes::from_static(b"peer-a"));
        assert_eq!(envelope.take_routing_id(), Some(Bytes::from_static(b"peer-a")));
        assert_eq!(envelope.routing_id(), None);
    }

    #[test]
    fn router_send_without_identity_fails_before_transport() {
        let router = RouterSocket::new();
        let _dealer = router.connect();

        let err = Envelope::new(Command::ping(1)).send(&router).unwrap_err();
        assert!(matches!(err, PeerError::MissingRoutingId));
    }

    #[test]
    fn router_send_to_unknown_identity_surfaces_transport_error() {
        let router = RouterSocket::new();
        let _dealer = router.connect();

        let envelope =
            Envelope::with_routing_id(Command::ping(1), Bytes::from_static(b"nobody"));
        let err = envelope.send(&router).unwrap_err();
        assert!(matches!(
            err,
            PeerError::Transport(TransportError::UnknownPeer(_))
        ));
    }

    #[test]
    fn dealer_send_ignores_stale_routing_id() {
        let router = RouterSocket::new();
        let dealer = router.connect();

        // A leftover identity from some earlier receive must not leak
        // into a dealer-role send.
        let envelope =
            Envelope::with_routing_id(Command::ping(3), Bytes::from_static(b"stale"));
        envelope.send(&dealer).unwrap();

        let at_router = Envelope::receive(&router).unwrap();
        assert_eq!(at_router.command(), &Command::ping(3));
        assert_ne!(
            at_router.routing_id(),
            Some(&Bytes::from_static(b"stale"))
        );
    }

    #[test]
    fn invalid_frames_surface_wire_error() {
        let router = RouterSocket::new();
        let dealer = router.connect();

        dealer
            .submit(vec![Bytes::from_static(&[0xDE, 0xAD, 0xBE])])
            .unwrap();
        let err = Envelope::receive(&router).unwrap_err();
        assert!(matches!(err, PeerError::Wire(_)));
    }
}
