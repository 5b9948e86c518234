//! The compression service the codecs lean on, wrapping `flate2`. The
//! codecs treat this as an opaque `(bytes, scheme) -> bytes` collaborator.

use std::io::Read;

use flate2::read::{DeflateDecoder, DeflateEncoder, GzDecoder, GzEncoder, ZlibDecoder, ZlibEncoder};
use flate2::Compression as Level;

use crate::error::{Error, Result};
use crate::Compression;

pub(crate) fn decompress(input: &[u8], scheme: Compression) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let res = match scheme {
        Compression::None => return Ok(input.to_vec()),
        Compression::Gzip => GzDecoder::new(input).read_to_end(&mut out),
        Compression::Zlib => ZlibDecoder::new(input).read_to_end(&mut out),
        Compression::Deflate => DeflateDecoder::new(input).read_to_end(&mut out),
    };
    res.map_err(Error::Compression)?;
    Ok(out)
}

pub(crate) fn compress(input: Vec<u8>, scheme: Compression) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let level = Level::default();
    let res = match scheme {
        Compression::None => return Ok(input),
        Compression::Gzip => GzEncoder::new(&input[..], level).read_to_end(&mut out),
        Compression::Zlib => ZlibEncoder::new(&input[..], level).read_to_end(&mut out),
        Compression::Deflate => DeflateEncoder::new(&input[..], level).read_to_end(&mut out),
    };
    res.map_err(Error::Compression)?;
    Ok(out)
}
