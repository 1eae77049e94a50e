use crate::extract::{scanf, scanf_array_elem, Out};
use crate::token::{Token, TokenKind};

#[test]
fn matches_flat_object_fields() {
    let mut name = String::new();
    let mut age: i64 = 0;
    let matched = scanf(
        br#"{name:"Ada",age:36}"#,
        "{name:%s,age:%d}",
        &mut [Out::Str(&mut name), Out::I64(&mut age)],
    )
    .unwrap();
    assert_eq!(matched, 2);
    assert_eq!(name, "Ada");
    assert_eq!(age, 36);
}

#[test]
fn unmatched_binding_is_left_untouched() {
    let mut a: i64 = -1;
    let mut b: i64 = -1;
    let matched = scanf(b"{a:1}", "{a:%d,b:%d}", &mut [Out::I64(&mut a), Out::I64(&mut b)]).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(a, 1);
    assert_eq!(b, -1);
}

#[test]
fn nested_path_pattern() {
    let mut x: f64 = 0.0;
    let matched = scanf(br#"{pos:{x:1.5}}"#, "{pos:{x:%f}}", &mut [Out::F64(&mut x)]).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(x, 1.5);
}

#[test]
fn bool_conversion() {
    let mut flag = false;
    scanf(b"{ok:true}", "{ok:%B}", &mut [Out::Bool(&mut flag)]).unwrap();
    assert!(flag);
}

#[test]
fn unsigned_octal_and_hex_conversions() {
    let mut u: i64 = 0;
    let mut o: i64 = 0;
    let mut x: i64 = 0;
    let matched = scanf(
        b"{u:42,o:42,x:42}",
        "{u:%u,o:%o,x:%x}",
        &mut [Out::I64(&mut u), Out::I64(&mut o), Out::I64(&mut x)],
    )
    .unwrap();
    assert_eq!(matched, 3);
    assert_eq!(u, 42);
    assert_eq!(o, 0o42);
    assert_eq!(x, 0x42);
}

#[test]
fn length_modified_float_conversion() {
    let mut v: f64 = 0.0;
    let matched = scanf(b"{v:2.5}", "{v:%lf}", &mut [Out::F64(&mut v)]).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(v, 2.5);
}

#[test]
fn base64_and_hex_byte_conversions() {
    let mut v = Vec::new();
    let mut h = Vec::new();
    let matched = scanf(
        br#"{v:"YTI=",h:"6132"}"#,
        "{v:%V,h:%H}",
        &mut [Out::Bytes(&mut v), Out::Bytes(&mut h)],
    )
    .unwrap();
    assert_eq!(matched, 2);
    assert_eq!(v, b"a2");
    assert_eq!(h, b"a2");
}

#[test]
fn q_unescapes_while_s_copies_raw() {
    let mut raw = String::new();
    let mut unescaped = String::new();
    let matched = scanf(
        br#"{raw:"a\nb",esc:"a\nb"}"#,
        "{raw:%s,esc:%Q}",
        &mut [Out::Str(&mut raw), Out::QuotedStr(&mut unescaped)],
    )
    .unwrap();
    assert_eq!(matched, 2);
    assert_eq!(raw, r"a\nb");
    assert_eq!(unescaped, "a\nb");
}

#[test]
fn q_against_null_does_not_match() {
    let mut s = String::new();
    let matched = scanf(b"{a:null}", "{a:%Q}", &mut [Out::QuotedStr(&mut s)]).unwrap();
    assert_eq!(matched, 0);
}

#[test]
fn mismatched_conversion_is_skipped_not_fatal() {
    let mut a: i64 = -1;
    let mut b: i64 = -1;
    // `a` is a string, not a number: `%d` against it fails to decode but doesn't abort the call.
    let matched = scanf(
        br#"{a:"oops",b:2}"#,
        "{a:%d,b:%d}",
        &mut [Out::I64(&mut a), Out::I64(&mut b)],
    )
    .unwrap();
    assert_eq!(matched, 1);
    assert_eq!(a, -1);
    assert_eq!(b, 2);
}

#[test]
fn token_capture_conversion() {
    let mut tok = Token::new(TokenKind::Invalid, 0, 0);
    let matched = scanf(b"{a:42}", "{a:%T}", &mut [Out::Token(&mut tok)]).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(tok.kind, TokenKind::Number);
    assert_eq!(tok.span_str(b"{a:42}"), "42");
}

#[test]
fn hook_conversion_receives_raw_span() {
    let mut seen = String::new();
    let mut hook = |raw: &[u8], kind: TokenKind| -> crate::error::RjResult<()> {
        seen = format!("{:?}:{}", kind, String::from_utf8_lossy(raw));
        Ok(())
    };
    let matched = scanf(b"{a:42}", "{a:%M}", &mut [Out::Hook(&mut hook)]).unwrap();
    assert_eq!(matched, 1);
    assert_eq!(seen, "Number:42");
}

#[test]
fn scanf_array_elem_returns_decoded_span() {
    let buf = br#"{items:[10,20,30]}"#;
    let hit = scanf_array_elem(buf, ".items", 1).unwrap().unwrap();
    assert_eq!(hit.text(buf), "20");
}

#[test]
fn scanf_array_elem_out_of_bounds_is_none() {
    let buf = br#"{items:[1]}"#;
    assert!(scanf_array_elem(buf, ".items", 5).unwrap().is_none());
}
