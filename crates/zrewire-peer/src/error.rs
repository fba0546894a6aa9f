/// Errors that can occur sending or receiving envelopes.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    /// Frame-level encode/decode error.
    #[error("wire error: {0}")]
    Wire(#[from] zrewire_codec::WireError),

    /// Transport-level error, surfaced unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] zrewire_transport::TransportError),

    /// A router-role send was attempted without a routing identity set.
    #[error("routing identity required for router-role send")]
    MissingRoutingId,
}

pub type Result<T> = std::result::Result<T, PeerError>;
