use crate::emit::{printf_to_vec, Arg};

fn render(fmt: &str, args: &mut [Arg<'_>]) -> String {
    String::from_utf8(printf_to_vec(fmt, args).unwrap()).unwrap()
}

#[test]
fn auto_quotes_bare_object_keys() {
    let out = render("{a:%d,b:%s}", &mut [Arg::I64(1), Arg::Str("x")]);
    assert_eq!(out, r#"{"a":1,"b":x}"#);
}

#[test]
fn quoted_conversion_escapes_string() {
    let out = render("{a:%Q}", &mut [Arg::Str("line\n\"quoted\"")]);
    assert_eq!(out, r#"{"a":"line\n\"quoted\""}"#);
}

#[test]
fn bool_conversion() {
    assert_eq!(render("%B", &mut [Arg::Bool(true)]), "true");
    assert_eq!(render("%B", &mut [Arg::Bool(false)]), "false");
}

#[test]
fn base64_and_hex_conversions() {
    assert_eq!(render("%V", &mut [Arg::Bytes(b"foo")]), "\"Zm9v\"");
    assert_eq!(render("%H", &mut [Arg::Bytes(b"\x00\xff")]), "\"00ff\"");
}

#[test]
fn width_and_zero_padding() {
    assert_eq!(render("%05d", &mut [Arg::I64(42)]), "00042");
    assert_eq!(render("%-5d|", &mut [Arg::I64(42)]), "42   |");
}

#[test]
fn float_precision() {
    assert_eq!(render("%.2f", &mut [Arg::F64(3.14159)]), "3.14");
}

#[test]
fn scientific_conversion_uses_c_style_signed_exponent() {
    assert_eq!(render("%.2e", &mut [Arg::F64(314.159)]), "3.14e+02");
    assert_eq!(render("%.1E", &mut [Arg::F64(0.005)]), "5.0E-03");
}

#[test]
fn general_conversion_picks_fixed_or_scientific_by_magnitude() {
    assert_eq!(render("%g", &mut [Arg::F64(100.0)]), "100");
    assert_eq!(render("%.3g", &mut [Arg::F64(3.14159)]), "3.14");
    assert_eq!(render("%g", &mut [Arg::F64(0.00001234)]), "1.234e-05");
    assert_eq!(render("%G", &mut [Arg::F64(0.00001234)]), "1.234E-05");
}

#[test]
fn quoted_conversion_honors_precision_as_input_byte_cap() {
    assert_eq!(render("%.3Q", &mut [Arg::Str("hello")]), "\"hel\"");
}

#[test]
fn string_precision_is_a_byte_cap_not_a_char_count() {
    // "日本語" is three 3-byte UTF-8 characters; a precision of 3 keeps exactly the first
    // character, not the first three characters.
    assert_eq!(render("%.3s", &mut [Arg::Str("日本語")]), "日");
}

#[test]
fn percent_literal_and_hook() {
    assert_eq!(render("100%%", &mut []), "100%");
    let mut hook = |sink: &mut dyn crate::emit::Sink| sink.write_bytes(b"[hooked]");
    assert_eq!(render("%M", &mut [Arg::Hook(&mut hook)]), "[hooked]");
}

#[test]
fn count_conversion_reports_bytes_emitted_so_far() {
    let mut n: i64 = -1;
    let out = render("abc%n", &mut [Arg::CountOut(&mut n)]);
    assert_eq!(out, "abc");
    assert_eq!(n, 3);
}

#[test]
fn missing_argument_is_an_error() {
    let mut out = Vec::new();
    let mut sink = crate::emit::BufSink::new(&mut out);
    let err = crate::emit::printf(&mut sink, "%d", &mut []).unwrap_err();
    assert!(matches!(err, crate::error::RjError::Format(_)));
}
