//! The algebraic identities used by [`simplify`](super::simplify::simplify).

use once_cell::sync::Lazy;
use super::rewrite::RewriteRule;

/// The default rules, as `(pattern, predicate, replacement)`.
const SOURCES: &[(&str, Option<&str>, &str)] = &[
    // addition and subtraction
    ("0 + __exp1", None, "__exp1"),
    ("__exp1 + 0", None, "__exp1"),
    ("__exp1 + __exp1", None, "2 * __exp1"),
    ("__exp1 - __exp1", None, "0"),

    // multiplication
    ("1 * __exp1", None, "__exp1"),
    ("__exp1 * 1", None, "__exp1"),
    ("__exp1 / 1", None, "__exp1"),
    ("__exp1 * __exp1", None, "__exp1 ^ 2"),
    ("__num1 * __var1", None, "__var1 * __num1"),
    ("0 * __exp1", None, "0"),
    ("__exp1 * 0", None, "0"),

    // negation
    ("--__exp1", None, "__exp1"),
    ("abs(-__exp1)", None, "abs(__exp1)"),

    // powers
    ("exp(__exp1) * exp(__exp2)", None, "exp(__exp1 + __exp2)"),
    ("(__exp1 ^ __exp3) * (__exp2 ^ __exp3)", None, "(__exp1 * __exp2) ^ __exp3"),
    ("__exp1 ^ 0", None, "1"),
    ("__exp1 ^ 1", None, "__exp1"),
    ("sqrt(__exp1 ^ 2)", None, "abs(__exp1)"),

    // angle conversions
    ("dtor(rtod(__exp1))", None, "__exp1"),
    ("rtod(dtor(__exp1))", None, "__exp1"),

    // division
    ("__exp1 / __exp1", Some("__exp1 != 0"), "1"),
    ("(__exp1 * __exp2) / __exp2", Some("__exp2 != 0"), "__exp1"),
    ("(__exp2 * __exp1) / __exp2", Some("__exp2 != 0"), "__exp1"),
    ("__exp2 / (__exp2 * __exp1)", Some("__exp2 != 0"), "1 / __exp1"),
    ("__exp2 / (__exp1 * __exp2)", Some("__exp2 != 0"), "1 / __exp1"),

    // roots
    ("nthroot(__exp1, 1)", None, "__exp1"),
    ("nthroot(__exp1 ^ __exp2, __exp2)", Some("mod(__exp2, 2) == 0"), "abs(__exp1)"),
    ("nthroot(__exp1 ^ __exp2, __exp2)", Some("mod(__exp2, 2) == 1"), "__exp1"),
    ("abs(__exp1)", Some("__exp1 >= 0"), "__exp1"),
];

/// The default simplification rules, parsed with the default operator catalog.
///
/// # Panics
///
/// Panics on first use if one of the built-in rules does not parse.
pub static DEFAULT_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    SOURCES
        .iter()
        .map(|(pattern, predicate, replacement)| {
            RewriteRule::parse(pattern, *predicate, replacement).unwrap_or_else(|err| {
                panic!("built-in rule `{}` does not parse: {}", pattern, err.message())
            })
        })
        .collect()
});
