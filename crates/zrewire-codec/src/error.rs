/// Errors that can occur during command encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Frame 0 does not begin with the protocol signature.
    #[error("malformed signature (expected 0xAA 0xA1)")]
    MalformedSignature,

    /// The kind tag is not one of the defined command kinds.
    #[error("unknown command kind tag {0}")]
    UnknownKind(u8),

    /// A fixed-width field declared more bytes than the frame holds.
    #[error("truncated frame ({needed} bytes needed, {remaining} remaining)")]
    TruncatedFrame { needed: usize, remaining: usize },

    /// A length prefix would read past the end of the frame.
    #[error("length prefix {length} exceeds {remaining} remaining bytes")]
    InvalidLength { length: usize, remaining: usize },

    /// A Whisper or Shout arrived without any content frame.
    #[error("missing content frame")]
    MissingContent,

    /// The same header key appeared twice in one message.
    #[error("duplicate header key {0:?}")]
    DuplicateHeaderKey(String),

    /// A string field exceeds the 255-byte wire limit.
    #[error("string too long ({len} bytes, max 255)")]
    StringTooLong { len: usize },

    /// A list or map has more entries than a 1-byte count can carry.
    #[error("too many entries ({count}, max 255)")]
    TooManyEntries { count: usize },

    /// String bytes on the wire are not valid UTF-8.
    #[error("malformed string: {0}")]
    MalformedString(#[from] std::str::Utf8Error),

    /// Decode was handed a message with no frames at all.
    #[error("empty message (no frames)")]
    EmptyMessage,
}

pub type Result<T> = std::result::Result<T, WireError>;
