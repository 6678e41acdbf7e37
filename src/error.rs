use thiserror::Error;

/// Coarse classification of an [EncodingError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed an empty payload, an invalid range or an invalid geometry.
    Argument,
    /// The payload contains data which can not be represented in Code 128.
    Format,
    /// The encoder contradicted itself. This is a bug.
    Invariant,
}

/// Errors produced while encoding a Code 128 barcode.
///
/// Any error means that no encoding was produced, there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("payload is empty")]
    EmptyPayload,
    #[error("range of {count} characters at offset {offset} is invalid for a payload of length {len}")]
    InvalidRange {
        offset: usize,
        count: usize,
        len: usize,
    },
    #[error("geometry must be finite and have a positive width and height")]
    InvalidGeometry,
    #[error("character {byte:#04x} at offset {offset} is not in any code set")]
    UnencodableCharacter { offset: usize, byte: u8 },
    #[error("no digit pair at offset {offset}")]
    InvalidDigitPair { offset: usize },
    #[error("internal encoder error at offset {offset}: {reason}")]
    Internal { reason: &'static str, offset: usize },
}

impl EncodingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPayload | Self::InvalidRange { .. } | Self::InvalidGeometry => ErrorKind::Argument,
            Self::UnencodableCharacter { .. } | Self::InvalidDigitPair { .. } => ErrorKind::Format,
            Self::Internal { .. } => ErrorKind::Invariant,
        }
    }

    /// Offset into the payload the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::EmptyPayload | Self::InvalidGeometry => None,
            Self::InvalidRange { offset, .. }
            | Self::UnencodableCharacter { offset, .. }
            | Self::InvalidDigitPair { offset }
            | Self::Internal { offset, .. } => Some(*offset),
        }
    }
}

#[test]
fn test_kinds_and_messages() {
    let err = EncodingError::UnencodableCharacter {
        offset: 3,
        byte: 0xe4,
    };
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.offset(), Some(3));
    assert_eq!(
        err.to_string(),
        "character 0xe4 at offset 3 is not in any code set"
    );
    assert_eq!(EncodingError::EmptyPayload.kind(), ErrorKind::Argument);
    assert_eq!(EncodingError::EmptyPayload.offset(), None);
    let err = EncodingError::Internal {
        reason: "test",
        offset: 0,
    };
    assert_eq!(err.kind(), ErrorKind::Invariant);
}
