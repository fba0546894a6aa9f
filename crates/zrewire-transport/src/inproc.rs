//! In-process ROUTER/DEALER exchange.
//!
//! Models the identity semantics of the real request/reply substrate:
//! every dealer connection gets an opaque identity minted by the
//! exchange, the router sees that identity as an extra leading frame on
//! delivery, and a router submit is routed to exactly the dealer named
//! by its leading identity frame. Dealers never see identity frames in
//! either direction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::{Socket, SocketRole};

type Multipart = Vec<Bytes>;

/// Responder-side socket. Accepts any number of in-process dealers.
pub struct RouterSocket {
    inbound_tx: Sender<(Bytes, Multipart)>,
    inbound: Mutex<Receiver<(Bytes, Multipart)>>,
    peers: Arc<Mutex<HashMap<Bytes, Sender<Multipart>>>>,
    next_peer: AtomicU32,
}

impl RouterSocket {
    pub fn new() -> Self {
        let (inbound_tx, inbound) = channel();
        Self {
            inbound_tx,
            inbound: Mutex::new(inbound),
            peers: Arc::new(Mutex::new(HashMap::new())),
            next_peer: AtomicU32::new(1),
        }
    }

    /// Connect a new dealer to this router.
    ///
    /// The identity is minted here, by the substrate — the dealer itself
    /// never learns it. A leading zero byte marks it as auto-generated.
    pub fn connect(&self) -> DealerSocket {
        let n = self.next_peer.fetch_add(1, Ordering::Relaxed);
        let mut id = [0u8; 5];
        id[1..].copy_from_slice(&n.to_be_bytes());
        let identity = Bytes::copy_from_slice(&id);

        let (tx, rx) = channel();
        self.peers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(identity.clone(), tx);
        debug!(peer = n, "dealer connected");

        DealerSocket {
            identity,
            outbound: self.inbound_tx.clone(),
            inbound: Mutex::new(rx),
        }
    }
}

impl Default for RouterSocket {
    fn default() -> Self {
        Self::new()
    }
}

impl Socket for RouterSocket {
    fn role(&self) -> SocketRole {
        SocketRole::Router
    }

    fn submit(&self, mut frames: Vec<Bytes>) -> Result<()> {
        if frames.is_empty() {
            return Err(TransportError::MissingIdentityFrame);
        }
        let identity = frames.remove(0);

        let peers = self.peers.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = peers
            .get(&identity)
            .ok_or(TransportError::UnknownPeer(identity.len()))?;
        tx.send(frames).map_err(|_| TransportError::Closed)
    }

    fn deliver(&self) -> Result<Vec<Bytes>> {
        let (identity, frames) = self
            .inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv()
            .map_err(|_| TransportError::Closed)?;

        let mut message = Vec::with_capacity(1 + frames.len());
        message.push(identity);
        message.extend(frames);
        Ok(message)
    }
}

/// Requester-side socket bound to one router.
pub struct DealerSocket {
    identity: Bytes,
    outbound: Sender<(Bytes, Multipart)>,
    inbound: Mutex<Receiver<Multipart>>,
}

impl Socket for DealerSocket {
    fn role(&self) -> SocketRole {
        SocketRole::Dealer
    }

    fn submit(&self, frames: Vec<Bytes>) -> Result<()> {
        // The substrate stamps the connection identity; the sending
        // application never handles it.
        self.outbound
            .send((self.identity.clone(), frames))
            .map_err(|_| TransportError::Closed)
    }

    fn deliver(&self) -> Result<Vec<Bytes>> {
        self.inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv()
            .map_err(|_| TransportError::Closed)
    }
}
