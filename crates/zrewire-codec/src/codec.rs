//! Frame-level encode/decode for protocol commands.
//!
//! Frame 0 layout:
//! ```text
//! ┌───────────────┬────────────┬──────────────────────────────┐
//! │ Signature (2B)│ Kind (1B)  │ Body (kind-specific fields)  │
//! │ 0xAA 0xA1     │ 1..=7      │ integers BE, strings 1B-len  │
//! └───────────────┴────────────┴──────────────────────────────┘
//! ```
//! Whisper and Shout append caller content as additional verbatim frames
//! after frame 0. Both directions are pure functions: no I/O, no state.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::command::{Command, Hello, Join, Kind, Leave, Ping, PingOk, Shout, Whisper};
use crate::error::{Result, WireError};
use crate::wire::{self, FrameCursor};

/// Protocol signature: family byte 0xAA, version 1 in the low nibble.
pub const SIGNATURE: [u8; 2] = [0xAA, 0xA1];

/// Bytes of frame 0 occupied by signature + kind tag.
pub const HEADER_SIZE: usize = 3;

fn frame0(kind: Kind, body_hint: usize) -> BytesMut {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + body_hint);
    buf.put_slice(&SIGNATURE);
    buf.put_u8(kind.tag());
    buf
}

/// Encode a command into its ordered wire frames.
///
/// Validation failures (oversized string, oversized list/map, empty
/// content) surface before any frame is produced.
pub fn encode(command: &Command) -> Result<Vec<Bytes>> {
    match command {
        Command::Hello(c) => encode_hello(c),
        Command::Whisper(c) => encode_whisper(c),
        Command::Shout(c) => encode_shout(c),
        Command::Join(c) => encode_join(c),
        Command::Leave(c) => encode_leave(c),
        Command::Ping(c) => encode_ping(c),
        Command::PingOk(c) => encode_ping_ok(c),
    }
}

fn encode_hello(c: &Hello) -> Result<Vec<Bytes>> {
    let mut buf = frame0(Kind::Hello, 8 + c.endpoint.len() + c.name.len());
    buf.put_u16(c.sequence);
    wire::put_string(&mut buf, &c.endpoint)?;
    wire::put_string_list(&mut buf, &c.groups)?;
    buf.put_u8(c.status);
    wire::put_string(&mut buf, &c.name)?;
    wire::put_string_map(&mut buf, &c.headers)?;
    Ok(vec![buf.freeze()])
}

fn encode_whisper(c: &Whisper) -> Result<Vec<Bytes>> {
    if c.content.is_empty() {
        return Err(WireError::MissingContent);
    }
    let mut buf = frame0(Kind::Whisper, 2);
    buf.put_u16(c.sequence);
    let mut frames = Vec::with_capacity(1 + c.content.len());
    frames.push(buf.freeze());
    frames.extend(c.content.iter().cloned());
    Ok(frames)
}

fn encode_shout(c: &Shout) -> Result<Vec<Bytes>> {
    if c.content.is_empty() {
        return Err(WireError::MissingContent);
    }
    let mut buf = frame0(Kind::Shout, 3 + c.group.len());
    buf.put_u16(c.sequence);
    wire::put_string(&mut buf, &c.group)?;
    let mut frames = Vec::with_capacity(1 + c.content.len());
    frames.push(buf.freeze());
    frames.extend(c.content.iter().cloned());
    Ok(frames)
}

fn encode_join(c: &Join) -> Result<Vec<Bytes>> {
    let mut buf = frame0(Kind::Join, 4 + c.group.len());
    buf.put_u16(c.sequence);
    wire::put_string(&mut buf, &c.group)?;
    buf.put_u8(c.status);
    Ok(vec![buf.freeze()])
}

fn encode_leave(c: &Leave) -> Result<Vec<Bytes>> {
    let mut buf = frame0(Kind::Leave, 4 + c.group.len());
    buf.put_u16(c.sequence);
    wire::put_string(&mut buf, &c.group)?;
    buf.put_u8(c.status);
    Ok(vec![buf.freeze()])
}

fn encode_ping(c: &Ping) -> Result<Vec<Bytes>> {
    let mut buf = frame0(Kind::Ping, 2);
    buf.put_u16(c.sequence);
    Ok(vec![buf.freeze()])
}

fn encode_ping_ok(c: &PingOk) -> Result<Vec<Bytes>> {
    let mut buf = frame0(Kind::PingOk, 2);
    buf.put_u16(c.sequence);
    Ok(vec![buf.freeze()])
}

/// Decode an ordered frame sequence into a command.
///
/// All-or-nothing: any failure returns an error with no partial command.
/// Trailing unconsumed bytes in frame 0 are tolerated so that newer
/// peers can append fields without breaking older decoders.
pub fn decode(frames: &[Bytes]) -> Result<Command> {
    let first = frames.first().ok_or(WireError::EmptyMessage)?;
    let mut cursor = FrameCursor::new(first);

    let sig = [cursor.get_u8()?, cursor.get_u8()?];
    if sig != SIGNATURE {
        return Err(WireError::MalformedSignature);
    }

    let tag = cursor.get_u8()?;
    let kind = Kind::from_tag(tag).ok_or(WireError::UnknownKind(tag))?;

    let command = match kind {
        Kind::Hello => {
            let sequence = cursor.get_u16()?;
            let endpoint = cursor.get_string()?;
            let groups = cursor.get_string_list()?;
            let status = cursor.get_u8()?;
            let name = cursor.get_string()?;
            let headers = cursor.get_string_map()?;
            Command::Hello(Hello {
                sequence,
                endpoint,
                groups,
                status,
                name,
                headers,
            })
        }
        Kind::Whisper => {
            let sequence = cursor.get_u16()?;
            let content = content_frames(frames)?;
            Command::Whisper(Whisper { sequence, content })
        }
        Kind::Shout => {
            let sequence = cursor.get_u16()?;
            let group = cursor.get_string()?;
            let content = content_frames(frames)?;
            Command::Shout(Shout {
                sequence,
                group,
                content,
            })
        }
        Kind::Join => {
            let sequence = cursor.get_u16()?;
            let group = cursor.get_string()?;
            let status = cursor.get_u8()?;
            Command::Join(Join {
                sequence,
                group,
                status,
            })
        }
        Kind::Leave => {
            let sequence = cursor.get_u16()?;
            let group = cursor.get_string()?;
            let status = cursor.get_u8()?;
            Command::Leave(Leave {
                sequence,
                group,
                status,
            })
        }
        Kind::Ping => {
            let sequence = cursor.get_u16()?;
            Command::Ping(Ping { sequence })
        }
        Kind::PingOk => {
            let sequence = cursor.get_u16()?;
            Command::PingOk(PingOk { sequence })
        }
    };

    trace!(kind = %kind, frames = frames.len(), "decoded command");
    Ok(command)
}

/// Everything after frame 0, verbatim. At least one frame is required.
fn content_frames(frames: &[Bytes]) -> Result<Vec<Bytes>> {
    if frames.len() < 2 {
        return Err(WireError::MissingContent);
    }
    Ok(frames[1..].to_vec())
}
