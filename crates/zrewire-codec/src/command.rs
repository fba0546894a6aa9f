use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

/// The seven command kinds, with their wire tag values.
///
/// Tag values are part of the interoperability surface and must never be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Greeting announcing a peer and its group memberships.
    Hello = 1,
    /// Point-to-point message with opaque content frames.
    Whisper = 2,
    /// Group broadcast with opaque content frames.
    Shout = 3,
    /// Group membership join.
    Join = 4,
    /// Group membership leave.
    Leave = 5,
    /// Liveness probe.
    Ping = 6,
    /// Liveness probe response.
    PingOk = 7,
}

impl Kind {
    /// The 1-byte wire tag for this kind.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its wire tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Kind::Hello),
            2 => Some(Kind::Whisper),
            3 => Some(Kind::Shout),
            4 => Some(Kind::Join),
            5 => Some(Kind::Leave),
            6 => Some(Kind::Ping),
            7 => Some(Kind::PingOk),
            _ => None,
        }
    }

    /// Protocol-level command name.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Hello => "HELLO",
            Kind::Whisper => "WHISPER",
            Kind::Shout => "SHOUT",
            Kind::Join => "JOIN",
            Kind::Leave => "LEAVE",
            Kind::Ping => "PING",
            Kind::PingOk => "PING-OK",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Greeting a peer sends on first contact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hello {
    pub sequence: u16,
    /// Endpoint the sending peer can be reached at.
    pub endpoint: String,
    /// Groups the sending peer is a member of, in join order.
    pub groups: Vec<String>,
    pub status: u8,
    /// Display name of the sending peer.
    pub name: String,
    /// Free-form key/value metadata. Keys are unique.
    pub headers: HashMap<String, String>,
}

/// Point-to-point message. Content frames pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Whisper {
    pub sequence: u16,
    /// One or more opaque frames supplied by the caller.
    pub content: Vec<Bytes>,
}

/// Broadcast to every member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shout {
    pub sequence: u16,
    pub group: String,
    /// One or more opaque frames supplied by the caller.
    pub content: Vec<Bytes>,
}

/// Announcement that the sending peer joined a group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Join {
    pub sequence: u16,
    pub group: String,
    pub status: u8,
}

/// Announcement that the sending peer left a group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leave {
    pub sequence: u16,
    pub group: String,
    pub status: u8,
}

/// Liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ping {
    pub sequence: u16,
}

/// Response to a liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PingOk {
    pub sequence: u16,
}

/// One protocol command, discriminated by [`Kind`].
///
/// Exactly one variant is active at a time; fields of other kinds are
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello(Hello),
    Whisper(Whisper),
    Shout(Shout),
    Join(Join),
    Leave(Leave),
    Ping(Ping),
    PingOk(PingOk),
}

impl Command {
    /// The kind discriminator for this command.
    pub fn kind(&self) -> Kind {
        match self {
            Command::Hello(_) => Kind::Hello,
            Command::Whisper(_) => Kind::Whisper,
            Command::Shout(_) => Kind::Shout,
            Command::Join(_) => Kind::Join,
            Command::Leave(_) => Kind::Leave,
            Command::Ping(_) => Kind::Ping,
            Command::PingOk(_) => Kind::PingOk,
        }
    }

    /// The sequence number, present on every kind.
    pub fn sequence(&self) -> u16 {
        match self {
            Command::Hello(c) => c.sequence,
            Command::Whisper(c) => c.sequence,
            Command::Shout(c) => c.sequence,
            Command::Join(c) => c.sequence,
            Command::Leave(c) => c.sequence,
            Command::Ping(c) => c.sequence,
            Command::PingOk(c) => c.sequence,
        }
    }

    /// Build a liveness probe.
    pub fn ping(sequence: u16) -> Self {
        Command::Ping(Ping { sequence })
    }

    /// Build a liveness probe response.
    pub fn ping_ok(sequence: u16) -> Self {
        Command::PingOk(PingOk { sequence })
    }
}

impl From<Hello> for Command {
    fn from(c: Hello) -> Self {
        Command::Hello(c)
    }
}

impl From<Whisper> for Command {
    fn from(c: Whisper) -> Self {
        Command::Whisper(c)
    }
}

impl From<Shout> for Command {
    fn from(c: Shout) -> Self {
        Command::Shout(c)
    }
}

impl From<Join> for Command {
    fn from(c: Join) -> Self {
        Command::Join(c)
    }
}

impl From<Leave> for Command {
    fn from(c: Leave) -> Self {
        Command::Leave(c)
    }
}

impl From<Ping> for Command {
    fn from(c: Ping) -> Self {
        Command::Ping(c)
    }
}

impl From<PingOk> for Command {
    fn from(c: PingOk) -> Self {
        Command::PingOk(c)
    }
}
