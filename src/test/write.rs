use super::builder::Builder;
use crate::error::Error;
use crate::{
    from_bytes_with_opts, nbt, to_bytes, to_bytes_with_opts, value_to_bytes, Blob, Compression,
    Endian, ReadOpts, RootName, Tag, Value, WriteOpts,
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

fn specimen() -> Value {
    nbt!({
        "byte": -128i8,
        "short": 32767i16,
        "int": -1,
        "long": 1_234_567_890_123i64,
        "float": 0.5f32,
        "double": -123.456,
        "string": "with \"quotes\" and snowman ☃",
        "bytes": [B; 0, 1, -1],
        "ints": [I; 0, -1, 2_000_000_000],
        "longs": [L; -9_000_000_000],
        "list": ["a", "b"],
        "nested": {"inner": [{"x": 1}, {"x": 2}], "empty": []},
    })
}

#[test]
fn named_empty_compound_bytes() {
    let out = to_bytes(&Blob::named("root", nbt!({}))).unwrap();
    assert_eq!(out, [0x0a, 0x00, 0x04, 0x72, 0x6f, 0x6f, 0x74, 0x00]);
}

#[test]
fn empty_list_declares_end_type() {
    let out = to_bytes(&Blob::new(nbt!({"L": []}))).unwrap();
    let expected = Builder::new()
        .start_compound("")
        .start_list("L", Tag::End, 0)
        .end_compound()
        .build();
    assert_eq!(out, expected);
}

#[test]
fn heterogeneous_list_is_rejected() {
    let blob = Blob::new(Value::Compound(
        [(
            "l".to_owned(),
            Value::List(vec![Value::Int(1), Value::Byte(2)]),
        )]
        .into_iter()
        .collect(),
    ));

    let err = to_bytes(&blob).unwrap_err();
    assert!(matches!(
        err,
        Error::HeterogeneousList {
            expected: Tag::Int,
            found: Tag::Byte,
        }
    ));
}

#[test]
fn width_preservation() {
    // A byte stays one byte and a short two whatever their runtime values.
    let out = to_bytes(&Blob::new(nbt!({"b": -1i8, "s": -1i16, "i": -1}))).unwrap();
    let expected = Builder::new()
        .start_compound("")
        .byte("b", -1)
        .short("s", -1)
        .int("i", -1)
        .end_compound()
        .build();
    assert_eq!(out, expected);
}

#[test]
fn tree_round_trips_in_every_dialect() {
    for endian in [Endian::Big, Endian::Little, Endian::LittleVarint] {
        let blob = Blob {
            name: Some("root".to_owned()),
            root: specimen(),
            endian,
            compression: Compression::None,
            bedrock_level: None,
        };

        let bytes = to_bytes(&blob).unwrap();
        let back = from_bytes_with_opts(&bytes, pinned(endian, true)).unwrap();
        assert_eq!(back, blob);

        // Byte round-trip: re-encoding the decoded tree reproduces the
        // buffer exactly.
        assert_eq!(to_bytes(&back).unwrap(), bytes);
    }
}

#[test]
fn compound_preserves_insertion_order() {
    let tree = nbt!({"zebra": 1, "apple": 2, "mango": 3});
    let bytes = to_bytes(&Blob::new(tree)).unwrap();
    let back = from_bytes_with_opts(&bytes, pinned(Endian::Big, true)).unwrap();

    let keys: Vec<&str> = match &back.root {
        Value::Compound(map) => map.keys().map(String::as_str).collect(),
        _ => panic!("expected compound"),
    };
    assert_eq!(keys, ["zebra", "apple", "mango"]);
}

#[test]
fn bedrock_level_header() {
    let blob = Blob {
        name: Some(String::new()),
        root: nbt!({"x": 1i8}),
        endian: Endian::Little,
        compression: Compression::None,
        bedrock_level: Some(10),
    };

    let bytes = to_bytes(&blob).unwrap();
    assert_eq!(&bytes[0..4], &10u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &((bytes.len() - 8) as u32).to_le_bytes());

    let opts = ReadOpts::new()
        .endian(Endian::Little)
        .compression(Compression::None)
        .root_name(RootName::Named)
        .bedrock_level(true);
    let back = from_bytes_with_opts(&bytes, opts).unwrap();
    assert_eq!(back, blob);
}

#[test]
fn bedrock_header_requires_little_endian() {
    let blob = Blob {
        bedrock_level: Some(10),
        ..Blob::new(nbt!({}))
    };
    let err = to_bytes(&blob).unwrap_err();
    assert!(matches!(err, Error::InvalidOption(_)));
}

#[test]
fn compression_round_trips() {
    for scheme in [Compression::Gzip, Compression::Zlib, Compression::Deflate] {
        let blob = Blob {
            compression: scheme,
            ..Blob::new(specimen())
        };

        let bytes = to_bytes(&blob).unwrap();
        let opts = ReadOpts::new()
            .endian(Endian::Big)
            .compression(scheme)
            .root_name(RootName::Named)
            .bedrock_level(false);
        let back = from_bytes_with_opts(&bytes, opts).unwrap();
        assert_eq!(back, blob);
    }
}

#[test]
fn write_opts_override_envelope() {
    let blob = Blob::new(nbt!({"x": 1i8}));

    let opts = WriteOpts::new()
        .endian(Endian::Little)
        .root_name(RootName::Exact("level".to_owned()));
    let bytes = to_bytes_with_opts(&blob, opts).unwrap();

    let back = from_bytes_with_opts(&bytes, pinned(Endian::Little, true)).unwrap();
    assert_eq!(back.name.as_deref(), Some("level"));
    assert_eq!(back.root, blob.root);
}

#[test]
fn anonymous_root() {
    let blob = Blob {
        name: None,
        ..Blob::new(nbt!({"x": 1i8}))
    };
    let bytes = to_bytes(&blob).unwrap();
    assert_eq!(bytes, [0x0a, 0x01, 0x00, 0x01, 0x78, 0x01, 0x00]);
}

#[test]
fn root_must_be_a_container() {
    let err = to_bytes(&Blob::new(Value::Int(7))).unwrap_err();
    assert!(matches!(err, Error::InvalidRoot { tag: Tag::Int }));
}

#[test]
fn oversized_string_is_rejected() {
    let blob = Blob::new(nbt!({"s": "x".repeat(70_000)}));
    let err = to_bytes(&blob).unwrap_err();
    assert!(matches!(err, Error::StringTooLong { length: 70_000 }));
}

#[test]
fn value_to_bytes_uses_java_defaults() {
    let tree = nbt!({"x": 1i8});
    assert_eq!(
        value_to_bytes(&tree).unwrap(),
        to_bytes(&Blob::new(tree.clone())).unwrap()
    );
}

#[test]
fn varint_string_and_lengths() {
    let blob = Blob {
        name: None,
        root: nbt!({"s": "hey"}),
        endian: Endian::LittleVarint,
        compression: Compression::None,
        bedrock_level: None,
    };

    let bytes = to_bytes(&blob).unwrap();
    // tag, entry tag, key varuint len + "s", value varuint len + "hey", end.
    assert_eq!(
        bytes,
        [0x0a, 0x08, 0x01, 0x73, 0x03, 0x68, 0x65, 0x79, 0x00]
    );
}
