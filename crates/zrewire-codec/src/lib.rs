//! Binary codec for the peer exchange protocol.
//!
//! Converts structured [`Command`] values to and from ordered multipart
//! wire frames. Frame 0 carries a 2-byte protocol signature, a 1-byte
//! kind tag, and the kind's fixed field set; Whisper and Shout carry
//! caller content as additional verbatim frames.
//!
//! Encode and decode are pure functions — no I/O, no shared state. The
//! routing identity used by router-role sockets is transport metadata
//! and never appears inside this crate's framing.

pub mod codec;
pub mod command;
pub mod error;
mod wire;

pub use codec::{decode, encode, HEADER_SIZE, SIGNATURE};
pub use command::{Command, Hello, Join, Kind, Leave, Ping, PingOk, Shout, Whisper};
pub use error::{Result, WireError};
pub use wire::{MAX_ENTRIES, MAX_STRING_LEN};
