mod common;

use std::io::Cursor;

use allods_assets::allods::format::registry;
use allods_assets::allods::utils::{parse_encoding, DEFAULT_ENCODING};
use allods_assets::{AssetError, RegistryTree, RegistryValue};
use common::{RegistryBuilder, TYPE_DIRECTORY};

fn decode(bytes: Vec<u8>) -> Result<RegistryTree, AssetError> {
    registry::decode(&mut Cursor::new(bytes), DEFAULT_ENCODING)
}

#[test]
fn single_int_under_section() {
    let mut b = RegistryBuilder::new();
    b.directory("root", 1, 1);
    b.int("x", 42);
    let tree = decode(b.build(0, 1)).unwrap();

    assert_eq!(tree.get_string("root", "x", ""), "");
    assert_eq!(tree.get_int("root", "x", 0), 42);
    assert_eq!(tree.get_float("root", "x", 1.5), 1.5);
    assert_eq!(tree.get_int_array("root", "x", &[9]), vec![9]);
}

#[test]
fn lookups_ignore_case() {
    let mut b = RegistryBuilder::new();
    b.directory("Window", 1, 1);
    b.int("Width", 640);
    let tree = decode(b.build(0, 1)).unwrap();

    assert_eq!(tree.get_int("window", "WIDTH", 0), 640);
    assert_eq!(tree.get_int("WINDOW", "width", 0), 640);
}

#[test]
fn duplicate_names_resolve_to_first() {
    let mut b = RegistryBuilder::new();
    b.directory("sec", 1, 2);
    b.int("dup", 1);
    b.int("dup", 2);
    let tree = decode(b.build(0, 1)).unwrap();

    assert_eq!(tree.sections()[0].children().len(), 2);
    assert_eq!(tree.get_int("sec", "dup", 0), 1);
    assert_eq!(tree.get_int("SEC", "DUP", 0), 1);
}

#[test]
fn first_section_match_must_be_a_directory() {
    let mut b = RegistryBuilder::new();
    b.int("sec", 5);
    b.directory("sec", 2, 1);
    b.int("x", 3);
    let tree = decode(b.build(0, 2)).unwrap();

    assert_eq!(tree.get_int("sec", "x", 7), 7);
}

#[test]
fn all_leaf_kinds_decode() {
    let mut b = RegistryBuilder::new();
    b.directory("data", 1, 4);
    b.string("title", "Allods");
    b.int("negative", -17);
    b.float("scale", 3.25);
    b.int_array("list", &[1, -2, 3]);
    let tree = decode(b.build(0, 1)).unwrap();

    assert_eq!(tree.get_string("data", "title", "?"), "Allods");
    assert_eq!(tree.get_int("data", "negative", 0), -17);
    assert_eq!(tree.get_float("data", "scale", 0.0), 3.25);
    assert_eq!(tree.get_int_array("data", "list", &[]), vec![1, -2, 3]);
}

#[test]
fn arrays_are_returned_as_copies() {
    let mut b = RegistryBuilder::new();
    b.directory("data", 1, 1);
    b.int_array("list", &[4, 5]);
    let tree = decode(b.build(0, 1)).unwrap();

    let mut first = tree.get_int_array("data", "list", &[]);
    first[0] = 100;
    assert_eq!(tree.get_int_array("data", "list", &[]), vec![4, 5]);
}

#[test]
fn strings_and_names_use_legacy_codepage() {
    // "имя" -> "Привет", both in CP866
    let mut b = RegistryBuilder::new();
    b.directory("text", 1, 1);
    b.string_bytes(&[0xA8, 0xAC, 0xEF], &[0x8F, 0xE0, 0xA8, 0xA2, 0xA5, 0xE2]);
    let tree = decode(b.build(0, 1)).unwrap();

    assert_eq!(tree.sections()[0].children()[0].name, "имя");
    assert_eq!(tree.get_string("text", "ИМЯ", ""), "Привет");
}

#[test]
fn explicit_encoding_overrides_default() {
    let mut b = RegistryBuilder::new();
    b.directory("text", 1, 1);
    // "Да" in windows-1251
    b.string_bytes(b"v", &[0xC4, 0xE0]);
    let bytes = b.build(0, 1);

    let tree = registry::decode(&mut Cursor::new(bytes), parse_encoding("windows-1251")).unwrap();
    assert_eq!(tree.get_string("text", "v", ""), "Да");
}

#[test]
fn string_values_keep_trailing_bytes() {
    let mut b = RegistryBuilder::new();
    b.directory("s", 1, 1);
    b.string_bytes(b"k", b"ab\0");
    let tree = decode(b.build(0, 1)).unwrap();
    assert_eq!(tree.get_string("s", "k", ""), "ab\0");
}

#[test]
fn bad_magic_is_format_error() {
    let mut b = RegistryBuilder::new();
    b.directory("root", 1, 1);
    b.int("x", 42);
    let err = decode(b.build_with_magic(0x2718_2818, 0, 1)).unwrap_err();

    assert!(matches!(err, AssetError::InvalidFormat(_)), "got {:?}", err);
    assert!(decode(Vec::new()).unwrap_err().is_format_error());
}

#[test]
fn misaligned_array_is_format_error() {
    let mut b = RegistryBuilder::new();
    b.directory("data", 1, 1);
    let offset = b.data(&[0u8; 8]);
    b.entry(offset, 6, common::TYPE_ARRAY, b"list");
    let err = decode(b.build(0, 1)).unwrap_err();

    assert!(matches!(err, AssetError::InvalidFormat(_)), "got {:?}", err);
}

#[test]
fn unknown_entry_types_are_skipped() {
    let mut b = RegistryBuilder::new();
    b.directory("sec", 1, 3);
    b.int("a", 1);
    b.entry(0, 0, 3, b"mystery");
    b.int("b", 2);
    let tree = decode(b.build(0, 1)).unwrap();

    let names: Vec<&str> = tree.sections()[0].children().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(tree.get_int("sec", "b", 0), 2);
}

#[test]
fn data_outside_stream_is_truncated() {
    let mut b = RegistryBuilder::new();
    b.directory("sec", 1, 1);
    b.entry(0x1000, 4, common::TYPE_STRING, b"far");
    let err = decode(b.build(0, 1)).unwrap_err();
    assert!(err.is_truncated(), "got {:?}", err);
}

#[test]
fn directory_range_outside_index_is_truncated() {
    let mut b = RegistryBuilder::new();
    b.directory("sec", 1, 50);
    b.int("only", 1);
    let err = decode(b.build(0, 1)).unwrap_err();
    assert!(err.is_truncated(), "got {:?}", err);
}

#[test]
fn self_referencing_directory_is_rejected() {
    let mut b = RegistryBuilder::new();
    b.entry(0, 1, TYPE_DIRECTORY, b"loop");
    let err = decode(b.build(0, 1)).unwrap_err();
    assert!(matches!(err, AssetError::InvalidFormat(_)), "got {:?}", err);
}

#[test]
fn root_range_may_start_mid_index() {
    let mut b = RegistryBuilder::new();
    b.int("leaf", 8);
    b.directory("top", 0, 1);
    let tree = decode(b.build(1, 1)).unwrap();

    assert_eq!(tree.sections().len(), 1);
    assert_eq!(tree.get_int("top", "leaf", 0), 8);
}

#[test]
fn iter_walks_depth_first() {
    let mut b = RegistryBuilder::new();
    b.directory("a", 2, 2);
    b.directory("b", 4, 1);
    b.int("a1", 1);
    b.directory("a2", 5, 1);
    b.int("b1", 3);
    b.float("deep", 0.5);
    let tree = decode(b.build(0, 2)).unwrap();

    let walk: Vec<(usize, &str)> = tree.iter().map(|(d, n)| (d, n.name.as_str())).collect();
    assert_eq!(
        walk,
        vec![(0, "a"), (1, "a1"), (1, "a2"), (2, "deep"), (0, "b"), (1, "b1")]
    );
    assert_eq!(tree.node_count(), 6);
    assert!(tree.root().is_directory());
    assert!(matches!(tree.sections()[0].children()[1].children()[0].value, RegistryValue::Float(v) if v == 0.5));
}

#[test]
fn float_spans_offset_and_count_fields() {
    let mut b = RegistryBuilder::new();
    b.directory("d", 1, 1);
    let bits = 3.25f64.to_bits();
    let index = b.entry(bits as u32, (bits >> 32) as u32, common::TYPE_FLOAT, b"f");
    b.set_unused(index, 0xDEAD_BEEF);
    let tree = decode(b.build(0, 1)).unwrap();

    assert_eq!(tree.get_float("d", "f", -1.0), 3.25);
    assert_eq!(tree.get_int("d", "f", 9), 9);
}
