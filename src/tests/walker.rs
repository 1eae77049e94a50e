use crate::options::WalkOptions;
use crate::token::TokenKind;
use crate::walker::{walk, walk_default, Event, ParseStatus};

#[test]
fn empty_object_is_complete() {
    let status = walk_default(b"{}", &mut |_: Event<'_>| {});
    assert_eq!(status, ParseStatus::Complete(2));
}

#[test]
fn bare_key_with_escaped_control_char() {
    let mut scalars = Vec::new();
    let status = walk_default(br#"{a:""}"#, &mut |ev: Event<'_>| {
        if let Event::Scalar { path, token, .. } = ev {
            scalars.push((path.to_string(), token.kind, token.len));
        }
    });
    assert_eq!(status, ParseStatus::Complete(12));
    assert_eq!(scalars, vec![(".a".to_string(), TokenKind::String, 6)]);
}

#[test]
fn trailing_bytes_after_root_value_are_not_consumed() {
    let status = walk_default(b" {a:[1]} 123456", &mut |_: Event<'_>| {});
    assert_eq!(status, ParseStatus::Complete(8));
}

#[test]
fn number_with_bad_fraction_is_invalid() {
    let status = walk_default(b"{a:.1}", &mut |_: Event<'_>| {});
    assert_eq!(status, ParseStatus::Invalid { pos: 4 });
}

#[test]
fn truncated_literal_is_incomplete() {
    let status = walk_default(b"{a:nul", &mut |_: Event<'_>| {});
    assert_eq!(status, ParseStatus::Incomplete);
}

#[test]
fn truncated_number_at_buffer_end_is_incomplete_not_invalid() {
    // "123" could still extend into "1234..." if more bytes arrived.
    let status = walk_default(b"12", &mut |_: Event<'_>| {});
    assert_eq!(status, ParseStatus::Incomplete);
}

#[test]
fn array_elements_get_decimal_index_names() {
    let mut names = Vec::new();
    walk_default(b"[10,20,30]", &mut |ev: Event<'_>| {
        if let Event::Scalar { name, .. } = ev {
            names.push(name.map(str::to_string));
        }
    });
    assert_eq!(names, vec![Some("0".into()), Some("1".into()), Some("2".into())]);
}

#[test]
fn nested_path_is_dotted_and_bracketed() {
    let mut paths = Vec::new();
    walk_default(br#"{a:{b:[1,2]}}"#, &mut |ev: Event<'_>| {
        if let Event::Scalar { path, .. } = ev {
            paths.push(path.to_string());
        }
    });
    assert_eq!(paths, vec![".a.b[0]".to_string(), ".a.b[1]".to_string()]);
}

#[test]
fn depth_budget_rejects_deep_nesting() {
    let input: String = "[".repeat(5) + &"]".repeat(5);
    let opts = WalkOptions { max_depth: 3, ..WalkOptions::default() };
    let status = walk(input.as_bytes(), &mut |_: Event<'_>| {}, &opts);
    assert!(matches!(status, ParseStatus::Invalid { .. }));
}

#[test]
fn path_budget_truncates_rather_than_erroring() {
    let opts = WalkOptions { max_path_len: 4, ..WalkOptions::default() };
    let mut last_path = String::new();
    let status = walk(br#"{abcdefgh:1}"#, &mut |ev: Event<'_>| {
        if let Event::Scalar { path, .. } = ev {
            last_path = path.to_string();
        }
    }, &opts);
    assert!(status.is_complete());
    assert!(last_path.len() <= 4);
}

#[test]
fn begin_end_bracket_a_container_span() {
    let mut events = Vec::new();
    walk_default(b"{a:[1,2]}", &mut |ev: Event<'_>| match ev {
        Event::Begin { path, kind, .. } => events.push(format!("BEGIN {path} {kind:?}")),
        Event::End { path, token, .. } => events.push(format!("END {path} {:?}", token.kind)),
        Event::Scalar { path, token, .. } => events.push(format!("SCALAR {path} {:?}", token.kind)),
    });
    assert_eq!(
        events,
        vec![
            "BEGIN  ObjectBegin".to_string(),
            "BEGIN .a ArrayBegin".to_string(),
            "SCALAR .a[0] Number".to_string(),
            "SCALAR .a[1] Number".to_string(),
            "END .a ArrayEnd".to_string(),
            "END  ObjectEnd".to_string(),
        ]
    );
}
