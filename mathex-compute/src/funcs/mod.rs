//! The function library of the default [`Evaluator`](crate::Evaluator).
//!
//! Every operator in the default catalog resolves to one of these functions, so an evaluator
//! created with [`Evaluator::empty`](crate::Evaluator::empty) cannot even evaluate `1 + 2`. Names
//! are case-insensitive.
//!
//! ```
//! use mathex_compute::{Evaluator, Substitutions};
//!
//! let evaluator = Evaluator::default();
//! let value = evaluator.evaluate_str("max(2, 7, 3) + avg(1, 2, 3)", &Substitutions::new()).unwrap();
//! assert_eq!(value, 9);
//! ```

pub mod aggregate;
pub mod arithmetic;
pub mod bitwise;
pub mod constants;
mod helper;
pub mod logic;
pub mod miscellaneous;
pub mod power;
pub mod round;
pub mod trigonometry;

use crate::numerical::{func::Function, function_set::FunctionSet};

/// Returns a function set containing every function of the library, along with their aliases.
pub fn all() -> FunctionSet {
    let functions: [Vec<Function>; 9] = [
        aggregate::functions(),
        arithmetic::functions(),
        bitwise::functions(),
        constants::functions(),
        logic::functions(),
        miscellaneous::functions(),
        power::functions(),
        round::functions(),
        trigonometry::functions(),
    ];
    let aliases = [
        aggregate::ALIASES,
        arithmetic::ALIASES,
        constants::ALIASES,
        logic::ALIASES,
        power::ALIASES,
        trigonometry::ALIASES,
    ];

    let mut set = FunctionSet::new();
    for function in functions.into_iter().flatten() {
        set.insert(function);
    }
    for (alias, target) in aliases.into_iter().flatten() {
        set.insert_alias(alias, target);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let set = all();
        let count = aggregate::functions().len()
            + arithmetic::functions().len()
            + bitwise::functions().len()
            + constants::functions().len()
            + logic::functions().len()
            + miscellaneous::functions().len()
            + power::functions().len()
            + round::functions().len()
            + trigonometry::functions().len();
        assert_eq!(set.names().count(), count);

        for (alias, target) in set.aliases() {
            assert!(set.get(target).is_some(), "alias `{}` points to missing `{}`", alias, target);
            assert!(set.names().all(|name| name != alias), "alias `{}` shadows a function", alias);
        }
    }

    #[test]
    fn every_operator_has_a_function() {
        let set = all();
        for op in mathex_parser::DEFAULT_CATALOG.operators() {
            assert!(set.get(&op.function).is_some(), "no function for `{}`", op.function);
        }

        let catalog = mathex_parser::OperatorCatalog::new(mathex_parser::CatalogOptions {
            percent_as_modulo: false,
            ..Default::default()
        });
        for op in catalog.operators() {
            assert!(set.get(&op.function).is_some(), "no function for `{}`", op.function);
        }
    }
}
