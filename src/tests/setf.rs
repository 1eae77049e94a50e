use crate::emit::Arg;
use crate::mutate::{next_elem, next_key, setf, setf_fmt, SetOp};

#[test]
fn replace_existing_scalar() {
    let (out, matched) = setf(br#"{a:1,b:2}"#, ".a", SetOp::Replace(b"99")).unwrap();
    assert_eq!(out, b"{a:99,b:2}");
    assert!(matched);
}

#[test]
fn replace_existing_string() {
    let (out, matched) = setf(br#"{name:"Ada"}"#, ".name", SetOp::Replace(br#""Grace""#)).unwrap();
    assert_eq!(out, br#"{name:"Grace"}"#);
    assert!(matched);
}

#[test]
fn insert_new_member_into_nonempty_object() {
    let (out, matched) = setf(b"{a:1}", ".b", SetOp::Replace(b"2")).unwrap();
    assert_eq!(out, br#"{a:1,"b":2}"#);
    assert!(!matched);
}

#[test]
fn insert_new_member_into_empty_object() {
    let (out, matched) = setf(b"{}", ".a", SetOp::Replace(b"1")).unwrap();
    assert_eq!(out, br#"{"a":1}"#);
    assert!(!matched);
}

#[test]
fn creates_one_missing_intermediate_object() {
    let (out, matched) = setf(b"{a:1}", ".d.e", SetOp::Replace(b"8")).unwrap();
    assert_eq!(out, br#"{a:1,"d":{"e":8}}"#);
    assert!(!matched);
}

#[test]
fn creates_multiple_missing_intermediate_objects() {
    let (out, matched) = setf(b"{}", ".a.b.c", SetOp::Replace(b"8")).unwrap();
    assert_eq!(out, br#"{"a":{"b":{"c":8}}}"#);
    assert!(!matched);
}

#[test]
fn setf_fmt_renders_the_replacement_through_the_emitter() {
    let (out, matched) = setf_fmt(b"{a:1}", ".a", "%d", &mut [Arg::I64(42)]).unwrap();
    assert_eq!(out, b"{a:42}");
    assert!(matched);
}

#[test]
fn delete_member_with_trailing_comma() {
    let (out, matched) = setf(b"{a:1,b:2,c:3}", ".b", SetOp::Delete).unwrap();
    assert_eq!(out, b"{a:1,c:3}");
    assert!(matched);
}

#[test]
fn delete_last_member_falls_back_to_leading_comma() {
    let (out, matched) = setf(b"{a:1,b:2,c:3}", ".c", SetOp::Delete).unwrap();
    assert_eq!(out, b"{a:1,b:2}");
    assert!(matched);
}

#[test]
fn delete_missing_path_is_noop() {
    let input: &[u8] = b"{a:1}";
    let (out, matched) = setf(input, ".z", SetOp::Delete).unwrap();
    assert_eq!(out, input);
    assert!(!matched);
}

#[test]
fn next_key_iterates_object_members() {
    let buf = b"{a:1,b:2,c:3}";
    let (k1, ..) = next_key(buf, "", None).unwrap().unwrap();
    assert_eq!(k1, "a");
    let (k2, ..) = next_key(buf, "", Some("a")).unwrap().unwrap();
    assert_eq!(k2, "b");
    assert!(next_key(buf, "", Some("c")).unwrap().is_none());
}

#[test]
fn next_elem_iterates_array_elements() {
    let buf = b"[10,20,30]";
    let (idx, start, end) = next_elem(buf, "", None).unwrap().unwrap();
    assert_eq!(idx, 0);
    assert_eq!(&buf[start..end], b"10");
    let (idx, start, end) = next_elem(buf, "", Some(0)).unwrap().unwrap();
    assert_eq!(idx, 1);
    assert_eq!(&buf[start..end], b"20");
    assert!(next_elem(buf, "", Some(2)).unwrap().is_none());
}
