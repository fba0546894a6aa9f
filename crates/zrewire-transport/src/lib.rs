//! Multipart socket abstraction with ROUTER/DEALER identity semantics.
//!
//! Defines the duplex channel contract the codec layer sends frames
//! through ([`Socket`]), the construction-time [`SocketRole`] that
//! decides identity handling, and an in-process exchange faithful to
//! the substrate's identity-injection behavior for hermetic tests.
//!
//! This crate never inspects payload bytes. Socket creation, binding,
//! and connection over real networks belong to substrate-specific
//! implementations of [`Socket`].

pub mod error;
pub mod inproc;
pub mod traits;

pub use error::{Result, TransportError};
pub use inproc::{DealerSocket, RouterSocket};
pub use traits::{Socket, SocketRole};
