//! The binary encoder, symmetric to the reader under a fixed dialect. The
//! writer owns a growing byte buffer and emits exactly the bytes the
//! reader accepts.

use crate::compression;
use crate::error::{Error, Result};
use crate::{Blob, Compression, Endian, RootName, Tag, Value, WriteOpts};

/// Encode a blob under its own envelope.
pub fn to_bytes(blob: &Blob) -> Result<Vec<u8>> {
    to_bytes_with_opts(blob, WriteOpts::default())
}

/// Encode a blob, with any field set in `opts` overriding the blob's
/// envelope.
pub fn to_bytes_with_opts(blob: &Blob, opts: WriteOpts) -> Result<Vec<u8>> {
    let endian = opts.endian.unwrap_or(blob.endian);
    let scheme = opts.compression.unwrap_or(blob.compression);
    let bedrock_level = opts.bedrock_level.unwrap_or(blob.bedrock_level);

    let name = match opts.root_name {
        None => blob.name.clone(),
        Some(RootName::Anonymous) => None,
        Some(RootName::Named) => Some(blob.name.clone().unwrap_or_default()),
        Some(RootName::Exact(name)) => Some(name),
    };

    encode(&blob.root, name.as_deref(), endian, scheme, bedrock_level)
}

/// Encode a bare tree under the Java defaults: big-endian, uncompressed,
/// root named with the empty string.
pub fn value_to_bytes(root: &Value) -> Result<Vec<u8>> {
    encode(root, Some(""), Endian::Big, Compression::None, None)
}

fn encode(
    root: &Value,
    name: Option<&str>,
    endian: Endian,
    scheme: Compression,
    bedrock_level: Option<u32>,
) -> Result<Vec<u8>> {
    let root_tag = root.tag();
    if root_tag != Tag::Compound && root_tag != Tag::List {
        return Err(Error::InvalidRoot { tag: root_tag });
    }
    if bedrock_level.is_some() && endian == Endian::Big {
        return Err(Error::InvalidOption(
            "the bedrock level header requires a little-endian dialect".to_owned(),
        ));
    }

    let mut writer = Writer::new(endian);
    writer.write_tag(root_tag);
    if let Some(name) = name {
        writer.write_string(name)?;
    }
    writer.write_payload(root)?;

    let frame = match bedrock_level {
        Some(version) => {
            let payload_len = u32::try_from(writer.out.len()).map_err(|_| Error::InvalidLength {
                length: writer.out.len() as i64,
                offset: 4,
            })?;
            let mut framed = Vec::with_capacity(writer.out.len() + 8);
            framed.extend_from_slice(&version.to_le_bytes());
            framed.extend_from_slice(&payload_len.to_le_bytes());
            framed.extend_from_slice(&writer.out);
            framed
        }
        None => writer.out,
    };

    compression::compress(frame, scheme)
}

struct Writer {
    out: Vec<u8>,
    endian: Endian,
}

impl Writer {
    fn new(endian: Endian) -> Writer {
        Writer {
            // A modest starting size; growth is Vec's own doubling.
            out: Vec::with_capacity(1024),
            endian,
        }
    }

    fn write_tag(&mut self, tag: Tag) {
        self.out.push(tag as u8);
    }

    fn write_i8(&mut self, v: i8) {
        self.out.push(v as u8);
    }

    fn write_u16(&mut self, v: u16) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little | Endian::LittleVarint => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn write_i16(&mut self, v: i16) {
        self.write_u16(v as u16);
    }

    fn write_i32(&mut self, v: i32) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
            Endian::LittleVarint => self.write_zigzag32(v),
        }
    }

    fn write_i64(&mut self, v: i64) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
            Endian::LittleVarint => self.write_zigzag64(v),
        }
    }

    fn write_f32(&mut self, v: f32) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little | Endian::LittleVarint => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn write_f64(&mut self, v: f64) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little | Endian::LittleVarint => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn write_varuint32(&mut self, mut v: u32) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.out.push(byte);
                return;
            }
            self.out.push(byte | 0x80);
        }
    }

    fn write_varuint64(&mut self, mut v: u64) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.out.push(byte);
                return;
            }
            self.out.push(byte | 0x80);
        }
    }

    fn write_zigzag32(&mut self, v: i32) {
        self.write_varuint32(((v << 1) ^ (v >> 31)) as u32);
    }

    fn write_zigzag64(&mut self, v: i64) {
        self.write_varuint64(((v << 1) ^ (v >> 63)) as u64);
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let encoded = cesu8::to_java_cesu8(s);
        match self.endian {
            Endian::LittleVarint => {
                let len = u32::try_from(encoded.len()).map_err(|_| Error::StringTooLong {
                    length: encoded.len(),
                })?;
                self.write_varuint32(len);
            }
            _ => {
                let len = u16::try_from(encoded.len()).map_err(|_| Error::StringTooLong {
                    length: encoded.len(),
                })?;
                self.write_u16(len);
            }
        }
        self.out.extend_from_slice(&encoded);
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::InvalidLength {
            length: len as i64,
            offset: self.out.len(),
        })?;
        self.write_i32(len);
        Ok(())
    }

    fn write_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.write_i8(*v),
            Value::Short(v) => self.write_i16(*v),
            Value::Int(v) => self.write_i32(*v),
            Value::Long(v) => self.write_i64(*v),
            Value::Float(v) => self.write_f32(*v),
            Value::Double(v) => self.write_f64(*v),
            Value::String(v) => self.write_string(v)?,
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                for b in v {
                    self.out.push(*b as u8);
                }
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.write_i32(*i);
                }
            }
            Value::LongArray(v) => {
                self.write_len(v.len())?;
                for l in v {
                    self.write_i64(*l);
                }
            }
            Value::List(items) => {
                // An empty list declares element type End.
                let element_tag = items.first().map(Value::tag).unwrap_or(Tag::End);
                for item in items {
                    if item.tag() != element_tag {
                        return Err(Error::HeterogeneousList {
                            expected: element_tag,
                            found: item.tag(),
                        });
                    }
                }
                self.write_tag(element_tag);
                self.write_len(items.len())?;
                for item in items {
                    self.write_payload(item)?;
                }
            }
            Value::Compound(map) => {
                for (key, entry) in map {
                    self.write_tag(entry.tag());
                    self.write_string(key)?;
                    self.write_payload(entry)?;
                }
                self.write_tag(Tag::End);
            }
        }
        Ok(())
    }
}
