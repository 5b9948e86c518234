//! The dialect axes and the envelope that records them.
//!
//! A fully pinned dialect makes decoding deterministic: a byte order, a
//! compression scheme, whether the root carries a name, and whether a
//! Bedrock level header prefixes the stream. [`Blob`] is a decoded root
//! together with that metadata, so a blob can be written back out in the
//! shape it arrived in.

use crate::Value;

/// Byte order and integer packing of the binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Java Edition. All scalars fixed-width big-endian.
    #[default]
    Big,
    /// Bedrock save files. All scalars fixed-width little-endian.
    Little,
    /// Bedrock network protocol. Ints, longs and length prefixes are
    /// zig-zag varints, string lengths are unsigned varints, and the
    /// remaining scalars are fixed-width little-endian.
    LittleVarint,
}

/// Compression applied around the whole binary frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zlib,
    /// Raw deflate with no wrapper, as some Bedrock network payloads use.
    Deflate,
}

/// Whether the root tag is followed by a name string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootName {
    /// No name on the wire.
    Anonymous,
    /// A name is present; reading takes it from the data, writing uses the
    /// blob's stored name (an empty string when it has none).
    Named,
    /// A name is present; writing uses this string. Reading treats this
    /// the same as [`RootName::Named`].
    Exact(String),
}

/// A decoded root value plus its envelope: the name and the dialect it was
/// read under (or should be written under). Returned by
/// [`from_bytes`](crate::from_bytes) and consumed by
/// [`to_bytes`](crate::to_bytes).
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Root name, or `None` for an anonymous root.
    pub name: Option<String>,
    /// The root value. Must be a compound or a list.
    pub root: Value,
    pub endian: Endian,
    pub compression: Compression,
    /// Version number of the Bedrock `level.dat` header, when present.
    pub bedrock_level: Option<u32>,
}

impl Blob {
    /// A blob with the Java defaults: big-endian, uncompressed, root named
    /// with the empty string.
    pub fn new(root: Value) -> Blob {
        Blob {
            name: Some(String::new()),
            root,
            endian: Endian::Big,
            compression: Compression::None,
            bedrock_level: None,
        }
    }

    pub fn named(name: impl Into<String>, root: Value) -> Blob {
        Blob {
            name: Some(name.into()),
            ..Blob::new(root)
        }
    }
}

impl From<Value> for Blob {
    fn from(root: Value) -> Blob {
        Blob::new(root)
    }
}

/// Options for [`from_bytes_with_opts`](crate::from_bytes_with_opts). Every
/// dialect axis left `None` is auto-detected; pinning all of them skips the
/// probe entirely.
#[derive(Debug, Clone)]
pub struct ReadOpts {
    pub endian: Option<Endian>,
    pub compression: Option<Compression>,
    pub root_name: Option<RootName>,
    /// `Some(true)` requires the Bedrock level header, `Some(false)`
    /// forbids it, `None` detects it from the length field.
    pub bedrock_level: Option<bool>,
    /// When set (the default), bytes remaining after the root value are an
    /// error rather than silently ignored.
    pub strict: bool,
    /// Maximum nesting of lists and compounds before the reader gives up.
    pub depth_limit: usize,
}

impl Default for ReadOpts {
    fn default() -> Self {
        ReadOpts {
            endian: None,
            compression: None,
            root_name: None,
            bedrock_level: None,
            strict: true,
            depth_limit: 512,
        }
    }
}

impl ReadOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn root_name(mut self, root_name: RootName) -> Self {
        self.root_name = Some(root_name);
        self
    }

    pub fn bedrock_level(mut self, present: bool) -> Self {
        self.bedrock_level = Some(present);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }
}

/// Options for [`to_bytes_with_opts`](crate::to_bytes_with_opts). Every
/// field left `None` inherits from the blob's envelope.
#[derive(Debug, Clone, Default)]
pub struct WriteOpts {
    pub endian: Option<Endian>,
    pub compression: Option<Compression>,
    pub root_name: Option<RootName>,
    /// `Some(Some(v))` forces a Bedrock header with version `v`,
    /// `Some(None)` forces it off, `None` inherits from the blob.
    pub bedrock_level: Option<Option<u32>>,
}

impl WriteOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn root_name(mut self, root_name: RootName) -> Self {
        self.root_name = Some(root_name);
        self
    }

    pub fn bedrock_level(mut self, version: Option<u32>) -> Self {
        self.bedrock_level = Some(version);
        self
    }
}
