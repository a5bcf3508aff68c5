use mathex_attrs::ErrorKind;
use mathex_error::{Error, ErrorCategory};

/// A closing parenthesis without a matching opening parenthesis.
#[derive(Debug, ErrorKind)]
#[error(
    category = Syntax,
    message = "unmatched closing parenthesis",
    labels = ["this parenthesis"],
    help = "remove it, or add an opening parenthesis before it",
)]
struct UnmatchedParen;

/// An error with fields used by its message.
#[derive(Debug, ErrorKind)]
#[error(
    category = UnknownVariable,
    message = format!("unknown variable `{}`", name),
)]
struct Unknown {
    name: String,
}

/// An error without any tags.
#[derive(Debug, ErrorKind)]
struct Bare;

fn render(err: &Error, source: &str) -> String {
    let rendered = err.report_to_string("input", source);
    String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
}

#[test]
fn category_and_message() {
    let err = Error::new(vec![3..4], UnmatchedParen);
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert_eq!(err.message(), "unmatched closing parenthesis");
    assert_eq!(err.to_string(), "syntax error: unmatched closing parenthesis");
}

#[test]
fn message_uses_fields() {
    let err = Error::without_spans(Unknown { name: "y".to_string() });
    assert_eq!(err.category(), ErrorCategory::UnknownVariable);
    assert_eq!(err.message(), "unknown variable `y`");
    assert_eq!(err.kind::<Unknown>().map(|kind| kind.name.as_str()), Some("y"));
    assert!(!err.is::<UnmatchedParen>());
}

#[test]
fn defaults_to_generic() {
    let err = Error::without_spans(Bare);
    assert_eq!(err.category(), ErrorCategory::Generic);
}

#[test]
fn report_contains_label_and_help() {
    let err = Error::new(vec![3..4], UnmatchedParen);
    let report = render(&err, "1+2)");
    assert!(report.contains("unmatched closing parenthesis"));
    assert!(report.contains("this parenthesis"));
    assert!(report.contains("add an opening parenthesis"));
}

#[test]
fn report_without_spans() {
    let err = Error::without_spans(Unknown { name: "y".to_string() });
    let report = render(&err, "x + y");
    assert!(report.contains("unknown variable `y`"));
}
