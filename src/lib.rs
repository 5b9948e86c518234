//! polynbt reads and writes NBT data from *Minecraft* in all three wire
//! dialects: the big-endian format of Java Edition, the little-endian format
//! of Bedrock save files, and the varint-packed little-endian format of the
//! Bedrock network protocol. It also parses and prints SNBT, the textual
//! surface used by commands and data packs.
//!
//! * For decoding byte buffers see [`from_bytes`] and [`from_bytes_with_opts`].
//! * For encoding see [`to_bytes`] and [`to_bytes_with_opts`].
//! * For the textual format see [`snbt`].
//! * For building values by hand see [`Value`] and the [`nbt!`] macro.
//!
//! ```toml
//! [dependencies]
//! polynbt = "0.1"
//! ```
//!
//! # Quick example
//!
//! Decode a world's `level.dat` without knowing anything about how it was
//! written. [`from_bytes`] probes the compression scheme, byte order, root
//! naming and the Bedrock level header, and the returned [`Blob`] records
//! what it found, so writing the blob back produces the same kind of file:
//!
//! ```no_run
//! use polynbt::error::Result;
//!
//! fn main() -> Result<()> {
//!     let data = std::fs::read("level.dat").expect("file to exist");
//!
//!     let level = polynbt::from_bytes(&data)?;
//!     println!("endian: {:?}, compression: {:?}", level.endian, level.compression);
//!     println!("{}", polynbt::snbt::to_snbt_pretty(&level.root, "  "));
//!
//!     let out = polynbt::to_bytes(&level)?;
//!     std::fs::write("level.dat", out).expect("write to succeed");
//!     Ok(())
//! }
//! ```
//!
//! # Dialects
//!
//! A fully pinned dialect is a choice of endianness, compression scheme,
//! root-name policy and Bedrock-header policy. Decoding under a pinned
//! dialect is deterministic and bit-exact: re-encoding a decoded buffer
//! under the same dialect reproduces it byte for byte. Any axis left
//! unspecified in [`ReadOpts`] is auto-detected by bounded retry, worst
//! case twelve parse attempts.
//!
//! # Strings
//!
//! NBT strings are not UTF-8 but Java's "modified UTF-8" (`U+0000` takes
//! two bytes, supplementary characters six). Both codecs go through the
//! `cesu8` crate, so strings that are unrepresentable in standard UTF-8
//! round-trip correctly.

pub mod error;
pub mod snbt;

mod compression;
mod detect;
mod format;
mod macros;
mod read;
mod value;
mod write;

pub use format::{Blob, Compression, Endian, ReadOpts, RootName, WriteOpts};
pub use read::{from_bytes, from_bytes_with_opts};
pub use value::{Compound, Value};
pub use write::{to_bytes, to_bytes_with_opts, value_to_bytes};

#[cfg(test)]
mod test;

/// An NBT tag id. This does not carry the payload or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of Byte (i8).
    ByteArray = 7,
    /// Represents a modified-UTF-8 string.
    String = 8,
    /// Represents a list of other values, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
    /// Represents an array of Long (i64).
    LongArray = 12,
}

// Crates exist to generate these conversions for us, but the tags will very
// rarely change, so writing them out saves the compile time.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
