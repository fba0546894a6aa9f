/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The other end of the channel has hung up.
    #[error("transport closed")]
    Closed,

    /// A router submit named an identity with no connected peer.
    #[error("no connected peer for routing identity ({0} bytes)")]
    UnknownPeer(usize),

    /// A router submit carried no identity frame.
    #[error("router submit requires a leading identity frame")]
    MissingIdentityFrame,
}

pub type Result<T> = std::result::Result<T, TransportError>;
