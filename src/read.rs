//! The binary decoder. One [`Reader`] owns a borrowed buffer and a cursor
//! for the duration of a single decode; the cursor never advances past the
//! end of the buffer, and every primitive read checks its bytes are
//! available before touching them.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::value::Compound;
use crate::{detect, Blob, Compression, Endian, ReadOpts, Tag, Value};

/// Decode a buffer, auto-detecting compression, endianness, root naming and
/// the Bedrock level header. The returned [`Blob`] echoes the detected
/// dialect. See the [crate docs](crate) for an example.
pub fn from_bytes(input: &[u8]) -> Result<Blob> {
    detect::read_auto(input, &ReadOpts::default())
}

/// Decode a buffer under the given options. Dialect axes pinned in `opts`
/// are honored without retry; unspecified axes are probed as in
/// [`from_bytes`].
pub fn from_bytes_with_opts(input: &[u8], opts: ReadOpts) -> Result<Blob> {
    detect::read_auto(input, &opts)
}

/// Decode under a fully pinned dialect. `data` is already decompressed;
/// `compression` only stamps the envelope.
pub(crate) fn read_pinned(
    data: &[u8],
    endian: Endian,
    named_root: bool,
    bedrock: bool,
    compression: Compression,
    opts: &ReadOpts,
) -> Result<Blob> {
    if bedrock && endian == Endian::Big {
        return Err(Error::InvalidOption(
            "the bedrock level header requires a little-endian dialect".to_owned(),
        ));
    }

    let mut reader = Reader {
        buf: data,
        pos: 0,
        endian,
        depth_limit: opts.depth_limit,
    };

    let bedrock_level = if bedrock {
        let version = reader.read_header_u32()?;
        let declared = reader.read_header_u32()? as usize;
        if declared != data.len() - 8 {
            return Err(Error::InvalidLength {
                length: declared as i64,
                offset: 4,
            });
        }
        Some(version)
    } else {
        None
    };

    let tag = reader.read_tag()?;
    if tag != Tag::Compound && tag != Tag::List {
        return Err(Error::InvalidRoot { tag });
    }

    let name = if named_root {
        Some(reader.read_string()?)
    } else {
        None
    };

    let root = reader.read_payload(tag, 0)?;

    let blob = Blob {
        name,
        root,
        endian,
        compression,
        bedrock_level,
    };

    if opts.strict && reader.pos < data.len() {
        return Err(Error::TrailingData {
            offset: reader.pos,
            remaining: data.len() - reader.pos,
            blob: Box::new(blob),
        });
    }

    Ok(blob)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
    depth_limit: usize,
}

impl<'a> Reader<'a> {
    /// Take the next `n` bytes, failing without advancing if they are not
    /// there.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(Error::UnexpectedEof { offset: self.pos })?;
        if end > self.buf.len() {
            return Err(Error::UnexpectedEof { offset: self.pos });
        }
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let offset = self.pos;
        let byte = self.read_u8()?;
        Tag::try_from(byte).map_err(|_| Error::InvalidTag { tag: byte, offset })
    }

    /// The Bedrock level header is little-endian in every dialect that can
    /// carry it.
    fn read_header_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u16(bytes),
            Endian::Little | Endian::LittleVarint => LittleEndian::read_u16(bytes),
        })
    }

    fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    fn read_i32(&mut self) -> Result<i32> {
        match self.endian {
            Endian::Big => Ok(BigEndian::read_i32(self.take(4)?)),
            Endian::Little => Ok(LittleEndian::read_i32(self.take(4)?)),
            Endian::LittleVarint => self.read_zigzag32(),
        }
    }

    fn read_i64(&mut self) -> Result<i64> {
        match self.endian {
            Endian::Big => Ok(BigEndian::read_i64(self.take(8)?)),
            Endian::Little => Ok(LittleEndian::read_i64(self.take(8)?)),
            Endian::LittleVarint => self.read_zigzag64(),
        }
    }

    fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.take(4)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_f32(bytes),
            Endian::Little | Endian::LittleVarint => LittleEndian::read_f32(bytes),
        })
    }

    fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take(8)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_f64(bytes),
            Endian::Little | Endian::LittleVarint => LittleEndian::read_f64(bytes),
        })
    }

    /// Unsigned LEB128-style varint: low seven bits per byte, least
    /// significant group first, high bit means continue.
    fn read_varuint32(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        let mut shift = 0;
        loop {
            if shift > 31 {
                return Err(Error::VarintOverflow { offset: self.pos });
            }
            let byte = self.read_u8()?;
            value |= ((byte & 0x7f) as u32) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_varuint64(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        let mut shift = 0;
        loop {
            if shift > 63 {
                return Err(Error::VarintOverflow { offset: self.pos });
            }
            let byte = self.read_u8()?;
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_zigzag32(&mut self) -> Result<i32> {
        let n = self.read_varuint32()?;
        Ok(((n >> 1) as i32) ^ -((n & 1) as i32))
    }

    fn read_zigzag64(&mut self) -> Result<i64> {
        let n = self.read_varuint64()?;
        Ok(((n >> 1) as i64) ^ -((n & 1) as i64))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = match self.endian {
            Endian::LittleVarint => self.read_varuint32()? as usize,
            _ => self.read_u16()? as usize,
        };
        let offset = self.pos;
        let bytes = self.take(len)?;
        let s = cesu8::from_java_cesu8(bytes).map_err(|_| Error::NonUnicodeString { offset })?;
        Ok(s.into_owned())
    }

    /// Array and list length prefix: a dialect-dependent i32 that must not
    /// be negative.
    fn read_len(&mut self) -> Result<usize> {
        let offset = self.pos;
        let len = self.read_i32()?;
        if len < 0 {
            return Err(Error::InvalidLength {
                length: len as i64,
                offset,
            });
        }
        Ok(len as usize)
    }

    fn read_payload(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        if depth > self.depth_limit {
            return Err(Error::DepthLimit {
                limit: self.depth_limit,
            });
        }

        Ok(match tag {
            Tag::Byte => Value::Byte(self.read_i8()?),
            Tag::Short => Value::Short(self.read_i16()?),
            Tag::Int => Value::Int(self.read_i32()?),
            Tag::Long => Value::Long(self.read_i64()?),
            Tag::Float => Value::Float(self.read_f32()?),
            Tag::Double => Value::Double(self.read_f64()?),
            Tag::String => Value::String(self.read_string()?),
            Tag::ByteArray => {
                let len = self.read_len()?;
                let bytes = self.take(len)?;
                Value::ByteArray(bytes.iter().map(|&b| b as i8).collect())
            }
            Tag::IntArray => {
                let len = self.read_len()?;
                let mut values = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    values.push(self.read_i32()?);
                }
                Value::IntArray(values)
            }
            Tag::LongArray => {
                let len = self.read_len()?;
                let mut values = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    values.push(self.read_i64()?);
                }
                Value::LongArray(values)
            }
            Tag::List => {
                let element_offset = self.pos;
                let element_tag = self.read_tag()?;
                let len = self.read_len()?;

                // Writers mark an empty list with element type End. An End
                // element type with a nonzero length has no meaning though,
                // and a malicious header could claim a massive list of
                // zero-sized payloads, so only the empty form is let
                // through.
                if element_tag == Tag::End && len != 0 {
                    return Err(Error::UnexpectedEndTag {
                        offset: element_offset,
                    });
                }

                let mut values = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    values.push(self.read_payload(element_tag, depth + 1)?);
                }
                Value::List(values)
            }
            Tag::Compound => {
                let mut map = Compound::new();
                loop {
                    let entry_tag = self.read_tag()?;
                    if entry_tag == Tag::End {
                        break;
                    }
                    let key = self.read_string()?;
                    let value = self.read_payload(entry_tag, depth + 1)?;
                    map.insert(key, value);
                }
                Value::Compound(map)
            }
            Tag::End => {
                return Err(Error::UnexpectedEndTag {
                    offset: self.pos.saturating_sub(1),
                })
            }
        })
    }
}
