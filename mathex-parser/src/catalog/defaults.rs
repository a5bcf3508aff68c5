use super::op::{Associativity, Operator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the modulo operator sits relative to multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModuloPrecedence {
    /// `%` binds tighter than multiplication, division and implicit multiplication.
    #[default]
    AboveMultiplication,

    /// `%` shares the band of multiplication and division.
    SameAsMultiplication,
}

/// The associativity of each family of binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssociativityOptions {
    pub bitwise_or: Associativity,
    pub bitwise_xor: Associativity,
    pub bitwise_and: Associativity,
    pub shift_left: Associativity,
    pub shift_right: Associativity,

    /// Addition and subtraction.
    pub additive: Associativity,

    /// Multiplication and division.
    pub multiplicative: Associativity,
    pub modulo: Associativity,

    /// Exponentiation. Right-associative by default, so `2^3^2` is `2^(3^2)`.
    pub power: Associativity,
}

impl Default for AssociativityOptions {
    fn default() -> Self {
        Self {
            bitwise_or: Associativity::Left,
            bitwise_xor: Associativity::Left,
            bitwise_and: Associativity::Left,
            shift_left: Associativity::Left,
            shift_right: Associativity::Left,
            additive: Associativity::Left,
            multiplicative: Associativity::Left,
            modulo: Associativity::Left,
            power: Associativity::Right,
        }
    }
}

/// Options used to build the default operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogOptions {
    /// If true, `%` is the binary modulo operator. Otherwise, it is a postfix percent operator,
    /// so that `50%` is `0.5`.
    pub percent_as_modulo: bool,

    /// The band of the modulo operator, if `%` is modulo.
    pub modulo_precedence: ModuloPrecedence,

    /// The associativity of each binary operator family.
    pub associativity: AssociativityOptions,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            percent_as_modulo: true,
            modulo_precedence: ModuloPrecedence::default(),
            associativity: AssociativityOptions::default(),
        }
    }
}

/// Returns the default operators grouped into precedence bands, lowest precedence first.
pub(super) fn bands(options: &CatalogOptions) -> Vec<Vec<Operator>> {
    use Associativity::Left;
    let assoc = &options.associativity;

    let mut multiplicative = vec![
        Operator::binary("multiply", assoc.multiplicative, ["*", "×"]),
        Operator::binary("divide", assoc.multiplicative, ["/", "÷"]),
    ];
    let mut modulo = Vec::new();
    let mut postfix = vec![
        Operator::postfix("factorial", ["!"]),
        Operator::postfix("factorial2", ["!!"]),
        Operator::postfix("dtor", ["°", "º"]),
    ];

    if options.percent_as_modulo {
        let op = Operator::binary("mod", assoc.modulo, ["%"]);
        match options.modulo_precedence {
            ModuloPrecedence::AboveMultiplication => modulo.push(op),
            ModuloPrecedence::SameAsMultiplication => multiplicative.push(op),
        }
    } else {
        postfix.push(Operator::postfix("percent", ["%"]));
    }

    let bands = vec![
        vec![Operator::binary("l_or", Left, ["||", "∨"])],
        vec![Operator::binary("l_and", Left, ["&&", "∧"])],
        vec![
            Operator::binary("l_eq", Left, ["==", "="]),
            Operator::binary("l_neq", Left, ["!=", "≠"]),
        ],
        vec![
            Operator::binary("l_lt", Left, ["<"]),
            Operator::binary("l_gt", Left, [">"]),
            Operator::binary("l_ltoe", Left, ["<=", "=<", "≤"]),
            Operator::binary("l_gtoe", Left, [">=", "=>", "≥"]),
        ],
        vec![Operator::prefix("l_not", ["¬"])],
        vec![Operator::binary("or", assoc.bitwise_or, ["|"])],
        vec![Operator::binary("xor", assoc.bitwise_xor, ["⊻"])],
        vec![Operator::binary("and", assoc.bitwise_and, ["&"])],
        vec![
            Operator::binary("lshift", assoc.shift_left, ["<<"]),
            Operator::binary("rshift", assoc.shift_right, [">>"]),
        ],
        vec![
            Operator::binary("add", assoc.additive, ["+"]),
            Operator::binary("subtract", assoc.additive, ["-", "−"]),
        ],
        multiplicative,
        modulo,
        vec![Operator::prefix("not", ["~"])],
        vec![
            Operator::prefix("negate", ["-", "−"]),
            Operator::prefix("positive", ["+"]),
            Operator::prefix("sqrt", ["√"]),
            Operator::prefix("cuberoot", ["∛"]),
        ],
        postfix,
        vec![Operator::binary("pow", assoc.power, ["^", "**"])],
    ];

    bands.into_iter().filter(|band| !band.is_empty()).collect()
}
