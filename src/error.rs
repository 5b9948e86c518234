//! The error and result types shared by every codec in the crate.

use std::io;

use thiserror::Error;

use crate::{Blob, Tag};

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while decoding, encoding or parsing NBT.
///
/// Binary decode errors carry the byte offset at which the cursor stood when
/// the problem was noticed. Nothing inside a pinned-dialect read retries;
/// the auto-detect probe is the only caller that catches and moves on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A read would have run past the end of the input buffer.
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    /// The byte in tag position is not a known tag id.
    #[error("invalid nbt tag {tag} at byte {offset}")]
    InvalidTag { tag: u8, offset: usize },

    /// An End tag turned up where a payload was required.
    #[error("unexpected end tag at byte {offset}")]
    UnexpectedEndTag { offset: usize },

    /// A list mixed element types. Only the writer can see this; decoded
    /// lists are homogeneous by construction.
    #[error("heterogeneous list: declared {expected:?}, found {found:?}")]
    HeterogeneousList { expected: Tag, found: Tag },

    /// The root of a binary stream was not a compound or list.
    #[error("invalid root tag {tag:?}, expected compound or list")]
    InvalidRoot { tag: Tag },

    /// Strict mode found bytes after the root value. The successfully
    /// parsed tree rides along so the caller can still inspect it.
    #[error("{remaining} trailing bytes after root value at byte {offset}")]
    TrailingData {
        offset: usize,
        remaining: usize,
        blob: Box<Blob>,
    },

    /// A varint kept its continuation bit set past the width of the value
    /// it was encoding.
    #[error("varint overflows its declared width at byte {offset}")]
    VarintOverflow { offset: usize },

    /// SNBT parse failure, with the byte offset of the cursor in the text.
    #[error("snbt: {message} at byte {offset}")]
    Snbt { message: String, offset: usize },

    /// A caller-supplied option was outside its recognized set.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Surfaced from the compression service.
    #[error("compression: {0}")]
    Compression(#[source] io::Error),

    /// A string payload was not valid modified UTF-8.
    #[error("invalid modified utf-8 string at byte {offset}")]
    NonUnicodeString { offset: usize },

    /// A length prefix was negative, lied about the payload size, or did
    /// not fit the field that has to carry it.
    #[error("invalid length {length} at byte {offset}")]
    InvalidLength { length: i64, offset: usize },

    /// The tree nests deeper than [`ReadOpts::depth_limit`](crate::ReadOpts).
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthLimit { limit: usize },

    /// A string is too long for its u16 length prefix.
    #[error("string of {length} bytes exceeds the u16 length prefix")]
    StringTooLong { length: usize },
}
