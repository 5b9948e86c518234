use super::builder::Builder;
use crate::error::Error;
use crate::{
    from_bytes_with_opts, nbt, to_bytes, Compression, Endian, ReadOpts, RootName, Tag, Value,
};

fn pinned(endian: Endian, named: bool) -> ReadOpts {
    ReadOpts::new()
        .endian(endian)
        .compression(Compression::None)
        .root_name(if named {
            RootName::Named
        } else {
            RootName::Anonymous
        })
        .bedrock_level(false)
}

#[test]
fn named_empty_compound() {
    // {} with root name "root", big-endian.
    let bytes = [0x0a, 0x00, 0x04, 0x72, 0x6f, 0x6f, 0x74, 0x00];

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();
    assert_eq!(blob.name.as_deref(), Some("root"));
    assert_eq!(blob.endian, Endian::Big);
    assert_eq!(blob.root, nbt!({}));

    assert_eq!(to_bytes(&blob).unwrap(), bytes);
}

#[test]
fn byte_in_compound() {
    let bytes = [0x0a, 0x00, 0x00, 0x01, 0x00, 0x01, 0x78, 0x7f, 0x00];

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();
    assert_eq!(blob.name.as_deref(), Some(""));
    assert_eq!(blob.root, nbt!({"x": 127i8}));
}

#[test]
fn scalars_in_both_fixed_dialects() {
    for endian in [Endian::Big, Endian::Little] {
        let bytes = Builder::with_endian(endian)
            .start_compound("")
            .byte("b", -1)
            .short("s", -300)
            .int("i", 123456)
            .long("l", -5_000_000_000)
            .float("f", 1.5)
            .double("d", -2.25)
            .string("str", "héllo")
            .end_compound()
            .build();

        let blob = from_bytes_with_opts(&bytes, pinned(endian, true)).unwrap();
        assert_eq!(
            blob.root,
            nbt!({
                "b": -1i8,
                "s": -300i16,
                "i": 123456,
                "l": -5_000_000_000i64,
                "f": 1.5f32,
                "d": -2.25,
                "str": "héllo",
            })
        );

        assert_eq!(to_bytes(&blob).unwrap(), bytes);
    }
}

#[test]
fn arrays_and_lists() {
    let bytes = Builder::new()
        .start_compound("")
        .byte_array("ba", &[1, -1, 127])
        .int_array("ia", &[1, -2])
        .long_array("la", &[3])
        .start_list("list", Tag::Short, 2)
        .short_payload(1)
        .short_payload(2)
        .start_list("names", Tag::String, 2)
        .string_payload("a")
        .string_payload("b")
        .end_compound()
        .build();

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();
    assert_eq!(
        blob.root,
        nbt!({
            "ba": [B; 1, -1, 127],
            "ia": [I; 1, -2],
            "la": [L; 3],
            "list": [1i16, 2i16],
            "names": ["a", "b"],
        })
    );

    assert_eq!(to_bytes(&blob).unwrap(), bytes);
}

#[test]
fn varint_dialect() {
    // Ints and longs are zig-zag varints, string lengths unsigned varints.
    let bytes = Builder::with_endian(Endian::LittleVarint)
        .tag(Tag::Compound)
        .int("n", -1)
        .long("big", 75_000_000_000)
        .string("s", "hi")
        .start_list("l", Tag::Int, 3)
        .int_payload(0)
        .int_payload(-2)
        .int_payload(300)
        .end_compound()
        .build();

    let opts = pinned(Endian::LittleVarint, false);
    let blob = from_bytes_with_opts(&bytes, opts).unwrap();
    assert_eq!(blob.name, None);
    assert_eq!(
        blob.root,
        nbt!({
            "n": -1,
            "big": 75_000_000_000i64,
            "s": "hi",
            "l": [0, -2, 300],
        })
    );

    assert_eq!(to_bytes(&blob).unwrap(), bytes);
}

#[test]
fn zigzag_single_bytes() {
    // -1 zig-zags to 1, 1 to 2.
    let bytes = Builder::with_endian(Endian::LittleVarint)
        .tag(Tag::Compound)
        .int("a", -1)
        .end_compound()
        .build();
    assert_eq!(bytes, [0x0a, 0x03, 0x01, 0x61, 0x01, 0x00]);
}

#[test]
fn empty_list_of_end_is_valid() {
    let bytes = Builder::new()
        .start_compound("")
        .start_list("empty", Tag::End, 0)
        .end_compound()
        .build();

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();
    assert_eq!(blob.root, nbt!({"empty": []}));
}

#[test]
fn nonempty_list_of_end_fails() {
    let bytes = Builder::new()
        .start_compound("")
        .start_list("bad", Tag::End, 3)
        .end_compound()
        .build();

    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEndTag { .. }));
}

#[test]
fn unknown_tag_id() {
    let bytes = [0x0a, 0x00, 0x00, 0x0d, 0x00, 0x01, 0x78, 0x00];
    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    assert!(matches!(err, Error::InvalidTag { tag: 13, offset: 3 }));
}

#[test]
fn root_must_be_compound_or_list() {
    let bytes = [0x01, 0x00, 0x00, 0x07];
    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    assert!(matches!(err, Error::InvalidRoot { tag: Tag::Byte }));
}

#[test]
fn list_root() {
    let bytes = Builder::new()
        .tag(Tag::List)
        .name("")
        .tag(Tag::Int)
        .int_payload(2)
        .int_payload(7)
        .int_payload(8)
        .build();

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();
    assert_eq!(blob.root, nbt!([7, 8]));
    assert_eq!(to_bytes(&blob).unwrap(), bytes);
}

#[test]
fn truncated_input() {
    let bytes = Builder::new()
        .start_compound("")
        .tag(Tag::Int)
        .name("i")
        .raw_bytes(&[0x00, 0x01])
        .build();

    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn trailing_bytes_strict() {
    let mut bytes = Builder::new()
        .start_compound("")
        .byte("x", 1)
        .end_compound()
        .build();
    bytes.push(0xff);

    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    match err {
        Error::TrailingData {
            offset,
            remaining,
            blob,
        } => {
            assert_eq!(offset, bytes.len() - 1);
            assert_eq!(remaining, 1);
            assert_eq!(blob.root, nbt!({"x": 1i8}));
        }
        other => panic!("expected TrailingData, got {:?}", other),
    }

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true).strict(false)).unwrap();
    assert_eq!(blob.root, nbt!({"x": 1i8}));
}

#[test]
fn varint_overflow() {
    // Six continuation bytes push the shift past 31 bits.
    let bytes = Builder::with_endian(Endian::LittleVarint)
        .tag(Tag::Compound)
        .tag(Tag::Int)
        .name("n")
        .raw_bytes(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01])
        .end_compound()
        .build();

    let err = from_bytes_with_opts(&bytes, pinned(Endian::LittleVarint, false)).unwrap_err();
    assert!(matches!(err, Error::VarintOverflow { .. }));
}

#[test]
fn negative_array_length() {
    let bytes = Builder::new()
        .start_compound("")
        .tag(Tag::ByteArray)
        .name("a")
        .raw_bytes(&[0xff, 0xff, 0xff, 0xff])
        .end_compound()
        .build();

    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    assert!(matches!(err, Error::InvalidLength { length: -1, .. }));
}

#[test]
fn depth_limit() {
    let mut b = Builder::new().tag(Tag::Compound);
    for _ in 0..6 {
        b = b.tag(Tag::Compound).name("a");
    }
    for _ in 0..7 {
        b = b.end_compound();
    }
    let bytes = b.build();

    let deep = from_bytes_with_opts(&bytes, pinned(Endian::Big, false)).unwrap();
    assert_eq!(deep.root["a"]["a"]["a"]["a"]["a"]["a"], nbt!({}));

    let err =
        from_bytes_with_opts(&bytes, pinned(Endian::Big, false).depth_limit(4)).unwrap_err();
    assert!(matches!(err, Error::DepthLimit { limit: 4 }));
}

#[test]
fn modified_utf8_null_byte() {
    // U+0000 is two bytes in modified UTF-8, not a raw zero.
    let bytes = Builder::new()
        .start_compound("")
        .string("s", "a\u{0}b")
        .end_compound()
        .build();

    let blob = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();
    assert_eq!(blob.root["s"], Value::String("a\u{0}b".to_owned()));
    assert_eq!(to_bytes(&blob).unwrap(), bytes);
}

#[test]
fn raw_zero_byte_in_string_is_rejected() {
    let bytes = Builder::new()
        .start_compound("")
        .tag(Tag::String)
        .name("s")
        .raw_bytes(&[0x00, 0x01, 0x00])
        .end_compound()
        .build();

    let err = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap_err();
    assert!(matches!(err, Error::NonUnicodeString { .. }));
}
