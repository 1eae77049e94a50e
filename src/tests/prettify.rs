use crate::options::PrettyOptions;
use crate::pretty::prettify;

#[test]
fn simple_object_gets_indented_and_keys_quoted() {
    let out = prettify(br#"{a:1,b:"x"}"#, &PrettyOptions::default()).unwrap();
    assert_eq!(out, "{\n  \"a\": 1,\n  \"b\": \"x\"\n}");
}

#[test]
fn empty_object_and_array_stay_on_one_line() {
    assert_eq!(prettify(b"{}", &PrettyOptions::default()).unwrap(), "{}");
    assert_eq!(prettify(b"[]", &PrettyOptions::default()).unwrap(), "[]");
}

#[test]
fn nested_array_of_objects() {
    let out = prettify(br#"[{a:1},{b:2}]"#, &PrettyOptions::default()).unwrap();
    assert_eq!(
        out,
        "[\n  {\n    \"a\": 1\n  },\n  {\n    \"b\": 2\n  }\n]"
    );
}

#[test]
fn custom_indent_width() {
    let opts = PrettyOptions { indent_width: 4, ..PrettyOptions::default() };
    let out = prettify(br#"{a:1}"#, &opts).unwrap();
    assert_eq!(out, "{\n    \"a\": 1\n}");
}

#[test]
fn invalid_input_is_rejected() {
    assert!(prettify(b"{a:.1}", &PrettyOptions::default()).is_err());
}

#[test]
fn incomplete_input_is_rejected() {
    assert!(prettify(b"{a:1", &PrettyOptions::default()).is_err());
}
