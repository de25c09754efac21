//! Error types for encoding and rendering.

use thiserror::Error;

use crate::symbology::Symbology;

/// A single validation or encoding failure.
///
/// Encoders collect every failure they find in one pass and return them
/// together, so a result may carry several of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unsupported symbology: {0}")]
    UnsupportedSymbology(String),

    #[error("{symbology}: unsupported character {character:?} at position {position}")]
    UnsupportedCharacter {
        symbology: Symbology,
        character: char,
        position: usize,
    },

    #[error("{symbology}: invalid data length {actual}, expected {expected}")]
    InvalidLength {
        symbology: Symbology,
        actual: usize,
        expected: &'static str,
    },

    #[error("invalid checksum input: {0}")]
    InvalidChecksumInput(String),

    #[error("{symbology}: supplied check {supplied} does not match computed {computed}")]
    ChecksumMismatch {
        symbology: Symbology,
        supplied: String,
        computed: String,
    },

    #[error("{symbology}: {message}")]
    InvalidData {
        symbology: Symbology,
        message: String,
    },
}

impl EncodeError {
    pub(crate) fn length(symbology: Symbology, actual: usize, expected: &'static str) -> Self {
        Self::InvalidLength {
            symbology,
            actual,
            expected,
        }
    }

    pub(crate) fn character(symbology: Symbology, character: char, position: usize) -> Self {
        Self::UnsupportedCharacter {
            symbology,
            character,
            position,
        }
    }

    pub(crate) fn data(symbology: Symbology, message: impl Into<String>) -> Self {
        Self::InvalidData {
            symbology,
            message: message.into(),
        }
    }

    /// Re-tags an error raised by a shared helper (a table lookup, a
    /// sub-encoder) with the symbology the caller actually requested.
    pub(crate) fn retag(self, symbology: Symbology) -> Self {
        match self {
            Self::UnsupportedCharacter {
                character,
                position,
                ..
            } => Self::character(symbology, character, position),
            Self::InvalidLength {
                actual, expected, ..
            } => Self::length(symbology, actual, expected),
            Self::ChecksumMismatch {
                supplied, computed, ..
            } => Self::ChecksumMismatch {
                symbology,
                supplied,
                computed,
            },
            Self::InvalidData { message, .. } => Self::data(symbology, message),
            other => other,
        }
    }
}

/// Errors raised while turning an [`Encoding`](crate::Encoding) into an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("encoding has {0} error(s) and cannot be rendered")]
    EncodingFailed(usize),

    #[error("image width {width}px is too narrow for {modules} modules")]
    ImageTooNarrow { width: u32, modules: usize },

    #[error("invalid render option: {0}")]
    InvalidOption(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("options parse error: {0}")]
    Options(#[from] serde_json::Error),
}

/// Result of a single encoder pass: the value or every failure found.
pub type EncodeResult<T> = Result<T, Vec<EncodeError>>;

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
