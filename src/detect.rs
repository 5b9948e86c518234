//! The format probe: bounded retry over the dialect axes the caller left
//! unspecified. Compression is sniffed from magic bytes where possible;
//! the remaining axes are resolved by attempting full pinned decodes, at
//! most twelve in all. If every candidate is exhausted, the caller sees
//! the first failure, not the last.

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};

use crate::compression::decompress;
use crate::error::{Error, Result};
use crate::read::read_pinned;
use crate::{Blob, Compression, Endian, ReadOpts, RootName};

pub(crate) fn read_auto(input: &[u8], opts: &ReadOpts) -> Result<Blob> {
    let candidates: Vec<Compression> = match opts.compression {
        Some(scheme) => vec![scheme],
        None => match sniff(input) {
            Some(scheme) => vec![scheme],
            None => vec![Compression::None, Compression::Deflate],
        },
    };

    let mut first_err = None;
    for scheme in candidates {
        let data: Cow<[u8]> = match scheme {
            Compression::None => Cow::Borrowed(input),
            _ => match decompress(input, scheme) {
                Ok(data) => Cow::Owned(data),
                Err(e) => {
                    first_err.get_or_insert(e);
                    continue;
                }
            },
        };
        match read_decompressed(&data, scheme, opts) {
            Ok(blob) => return Ok(blob),
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }

    Err(first_err.unwrap_or(Error::UnexpectedEof { offset: 0 }))
}

/// Magic-byte sniff: `1F 8B` is gzip, a leading `78` is a zlib stream.
/// Anything else is either uncompressed or raw deflate, which has no
/// signature and can only be settled by trying.
fn sniff(input: &[u8]) -> Option<Compression> {
    match input {
        [0x1f, 0x8b, ..] => Some(Compression::Gzip),
        [0x78, ..] => Some(Compression::Zlib),
        _ => None,
    }
}

fn read_decompressed(data: &[u8], scheme: Compression, opts: &ReadOpts) -> Result<Blob> {
    let endians: Vec<Endian> = match opts.endian {
        Some(endian) => vec![endian],
        None => vec![Endian::Big, Endian::Little, Endian::LittleVarint],
    };
    let namings: Vec<bool> = match opts.root_name {
        Some(RootName::Anonymous) => vec![false],
        Some(_) => vec![true],
        None => vec![true, false],
    };

    let mut first_err = None;
    for &endian in &endians {
        let bedrock = match opts.bedrock_level {
            Some(present) => present,
            // The level header only ever accompanies the little-endian
            // save-file dialect.
            None => endian == Endian::Little && has_level_header(data),
        };
        for &named in &namings {
            match read_pinned(data, endian, named, bedrock, scheme, opts) {
                Ok(blob) => return Ok(blob),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
    }

    Err(first_err.unwrap_or(Error::UnexpectedEof { offset: 0 }))
}

/// The Bedrock level header is present iff the little-endian u32 at offset
/// 4 equals the remaining payload size.
fn has_level_header(data: &[u8]) -> bool {
    data.len() >= 8 && LittleEndian::read_u32(&data[4..8]) as usize == data.len() - 8
}
