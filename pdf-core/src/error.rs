use std::io;

use crate::encoding::Encoding;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while building or saving a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page dimension was zero, negative or not finite.
    #[error("invalid page size {width} x {height}: both dimensions must be positive")]
    InvalidPageSize { width: f64, height: f64 },

    /// The font name is not one of the 14 standard fonts.
    #[error("unknown font '{0}': not one of the 14 standard fonts")]
    UnknownFont(String),

    /// The encoding name passed to font resolution is not recognised.
    #[error("unknown encoding '{encoding}' requested for font '{font}'")]
    UnknownEncoding { font: String, encoding: String },

    /// Text contains a character the active font's encoding cannot represent.
    #[error("character {ch:?} (U+{:04X}) is not representable in {encoding} encoding", u32::from(*.ch))]
    InvalidEncoding { ch: char, encoding: Encoding },

    /// A text operator ran before any font was selected.
    #[error("{operation} requires an active font; select one with set_font first")]
    NoActiveFont { operation: &'static str },

    /// A font handle minted by another document was used.
    #[error("font resource F{resource} does not belong to this document")]
    ForeignFont { resource: u32 },

    /// A numeric or string argument was out of range.
    #[error("{operation}: {detail}")]
    InvalidParameter {
        operation: &'static str,
        detail: String,
    },

    /// A page index past the end of the page sequence.
    #[error("page {0} does not exist")]
    PageNotFound(usize),

    /// An object id that was never allocated.
    #[error("object {0} 0 R was never allocated")]
    NotFound(u32),

    /// The document has been saved and no longer accepts changes.
    #[error("document already saved; {operation} is not allowed")]
    DocumentClosed { operation: &'static str },

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for command-line wrappers: 2 when the output
    /// could not be opened or written, 3 when a font could not be
    /// resolved, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 2,
            Error::UnknownFont(_) | Error::UnknownEncoding { .. } => 3,
            _ => 1,
        }
    }

    pub(crate) fn invalid(operation: &'static str, detail: impl Into<String>) -> Self {
        Error::InvalidParameter {
            operation,
            detail: detail.into(),
        }
    }
}

/// Reject NaN and infinities before they reach the content stream.
pub(crate) fn ensure_finite(operation: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(operation, format!("{} is not a finite number", value)))
    }
}
