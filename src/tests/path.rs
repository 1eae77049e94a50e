use crate::pathbuf::PathBuf;
use crate::token::{utf8_prefix, write_usize};

#[test]
fn push_key_and_index_compose_dotted_bracketed_path() {
    let mut path = PathBuf::new(64);
    path.push_key(b"a");
    path.push_key(b"b");
    path.push_index(3);
    assert_eq!(path.as_str(), ".a.b[3]");
}

#[test]
fn truncate_restores_a_saved_length() {
    let mut path = PathBuf::new(64);
    path.push_key(b"a");
    let save = path.len();
    path.push_key(b"nested");
    assert_eq!(path.as_str(), ".a.nested");
    path.truncate(save);
    assert_eq!(path.as_str(), ".a");
}

#[test]
fn budget_truncates_rather_than_panicking() {
    let mut path = PathBuf::new(3);
    path.push_key(b"abcdefgh");
    assert_eq!(path.len(), 3);
    // Must not panic even though the append landed mid-component.
    let _ = path.as_str();
}

#[test]
fn write_usize_matches_std_formatting() {
    let mut buf = [0u8; 20];
    assert_eq!(write_usize(&mut buf, 0), "0");
    assert_eq!(write_usize(&mut buf, 42), "42");
    assert_eq!(write_usize(&mut buf, usize::MAX), usize::MAX.to_string());
}

#[test]
fn utf8_prefix_drops_incomplete_trailing_sequence() {
    let bytes = [b'h', b'i', 0xe2, 0x98]; // truncated 3-byte sequence
    assert_eq!(utf8_prefix(&bytes), "hi");
}
