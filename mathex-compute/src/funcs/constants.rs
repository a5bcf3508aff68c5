//! Constants, written as functions that take no arguments.
//!
//! With argumentless functions enabled (the default), constants can be written without
//! parentheses, so `2pi` is `2 * pi()`.

use rug::Float;
use crate::consts;
use crate::numerical::func::Function;

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("yes", "true"),
    ("no", "false"),
    ("ϕ", "phi"),
    ("π", "pi"),
    ("tau_2", "pi"),
    ("tau_4", "pi_2"),
    ("tau_8", "pi_4"),
    ("τ", "tau"),
];

pub(crate) fn functions() -> Vec<Function> {
    vec![
        Function::constant("true", |precision| Float::with_val(precision, 1)),
        Function::constant("false", |precision| Float::with_val(precision, 0)),
        Function::constant("phi", consts::phi),
        Function::constant("pi", consts::pi),
        Function::constant("pi_2", |precision| consts::pi(precision) / 2u32),
        Function::constant("pi_4", |precision| consts::pi(precision) / 4u32),
        Function::constant("tau", consts::tau),
        Function::constant("sqrt2", consts::sqrt2),
        Function::constant("e", consts::e),
        Function::constant("log2e", consts::log2e),
        Function::constant("log10e", consts::log10e),
        Function::constant("ln2", consts::ln2),
        Function::constant("ln10", consts::ln10),
    ]
}
