//! The table of operators understood by the parser.
//!
//! An [`OperatorCatalog`] maps operator spellings to the functions they stand for, together with
//! their arity, precedence and associativity. Precedence is never given as a raw number: new
//! operators are placed relative to an operator that is already in the catalog, and the catalog
//! renumbers its bands to make room.
//!
//! The catalog may be changed freely until it is handed to a [`Parser`](crate::Parser), which
//! borrows it immutably for as long as it exists.

mod defaults;
pub mod op;

pub use defaults::{AssociativityOptions, CatalogOptions, ModuloPrecedence};

use crate::parser::error::{kind, Error};
use once_cell::sync::Lazy;
use op::{Arity, Operator, OperatorId, Position};

/// The catalog built from [`CatalogOptions::default`], used by [`crate::parse`] and by the
/// [`Display`](std::fmt::Display) implementation of [`Expr`](crate::Expr).
pub static DEFAULT_CATALOG: Lazy<OperatorCatalog> = Lazy::new(OperatorCatalog::default);

/// Where to place a new operator's precedence, relative to an existing operator's function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation<'a> {
    /// Share the precedence band of the named operator.
    SamePrecedenceAs(&'a str),

    /// Create a new band directly below the named operator.
    LowerThan(&'a str),

    /// Create a new band directly above the named operator.
    HigherThan(&'a str),
}

/// The operator definitions a single spelling can stand for, one per position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidates {
    pub prefix: Option<OperatorId>,
    pub postfix: Option<OperatorId>,
    pub infix: Option<OperatorId>,
}

impl Candidates {
    /// Returns true if the spelling does not belong to any operator.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.postfix.is_none() && self.infix.is_none()
    }

    /// Returns true if the spelling can stand for more than one operator, in which case its
    /// meaning depends on the position it appears in.
    pub fn is_ambiguous(&self) -> bool {
        [self.prefix, self.postfix, self.infix].iter().filter(|id| id.is_some()).count() > 1
    }
}

/// A table of operator definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCatalog {
    operators: Vec<Operator>,
}

impl Default for OperatorCatalog {
    fn default() -> Self {
        Self::new(CatalogOptions::default())
    }
}

impl OperatorCatalog {
    /// Creates the default operator table with the given options.
    pub fn new(options: CatalogOptions) -> Self {
        let operators = defaults::bands(&options)
            .into_iter()
            .enumerate()
            .flat_map(|(band, operators)| {
                operators.into_iter().map(move |mut op| {
                    op.precedence = band as u32;
                    op
                })
            })
            .collect();
        Self { operators }
    }

    /// Creates a catalog without any operators.
    pub fn empty() -> Self {
        Self { operators: Vec::new() }
    }

    /// Returns an iterator over every operator in the catalog.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    /// Returns the operator with the given id.
    ///
    /// Ids are only handed out by this catalog, and operators are never removed, so this cannot
    /// fail for an id produced by the same catalog.
    pub fn get(&self, id: OperatorId) -> &Operator {
        &self.operators[id.0]
    }

    /// Looks up the operator with the given arity that is spelled `token`.
    pub fn lookup(&self, token: &str, arity: Arity) -> Option<&Operator> {
        self.operators.iter().find(|op| op.arity == arity && op.has_token(token))
    }

    /// Looks up the operator that turns into the function `name`.
    pub fn lookup_function(&self, name: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.function == name)
    }

    /// Looks up the operator that turns into the function `name` when called with `args`
    /// arguments.
    pub fn lookup_function_with_args(&self, name: &str, args: usize) -> Option<&Operator> {
        let arity = match args {
            1 => Arity::Unary,
            2 => Arity::Binary,
            _ => return None,
        };
        self.operators.iter().find(|op| op.arity == arity && op.function == name)
    }

    /// Returns the identifier of the operator with the given arity that turns into the function
    /// `name`.
    pub fn function_id(&self, name: &str, arity: Arity) -> Option<OperatorId> {
        self.operators
            .iter()
            .position(|op| op.arity == arity && op.function == name)
            .map(OperatorId)
    }

    /// Returns the operators that the given spelling can stand for.
    pub fn candidates(&self, token: &str) -> Candidates {
        let mut candidates = Candidates::default();
        for (index, op) in self.operators.iter().enumerate() {
            if !op.has_token(token) {
                continue;
            }

            let slot = match op.position() {
                Position::Prefix => &mut candidates.prefix,
                Position::Postfix => &mut candidates.postfix,
                Position::Infix => &mut candidates.infix,
            };
            slot.get_or_insert(OperatorId(index));
        }
        candidates
    }

    /// Returns the longest operator spelling that `input` starts with.
    pub fn longest_token(&self, input: &str) -> Option<&str> {
        self.operators
            .iter()
            .flat_map(|op| op.tokens.iter())
            .filter(|token| input.starts_with(token.as_str()))
            .max_by_key(|token| token.len())
            .map(String::as_str)
    }

    /// Returns true if `word` is the spelling of any operator.
    pub fn is_token(&self, word: &str) -> bool {
        self.operators.iter().any(|op| op.has_token(word))
    }

    /// Returns true if `token` is already used by an operator with the given arity.
    fn is_taken(&self, token: &str, arity: Arity) -> bool {
        self.lookup(token, arity).is_some()
    }

    /// Adds an operator, placing its precedence relative to an existing operator.
    ///
    /// If an operator with the same function and arity already exists, the new operator's
    /// spellings are added to it instead. Spellings already used by another operator of the same
    /// arity are skipped, so that a spelling and arity always identify a single operator.
    pub fn add_operator(&mut self, mut op: Operator, relation: Relation<'_>) -> Result<(), Error> {
        if let Some(index) = self.operators
            .iter()
            .position(|existing| existing.function == op.function && existing.arity == op.arity)
        {
            return self.merge_tokens(index, op.tokens);
        }

        let (Relation::SamePrecedenceAs(anchor) | Relation::LowerThan(anchor) | Relation::HigherThan(anchor)) = relation;
        let base = self.lookup_function(anchor)
            .map(Operator::precedence)
            .ok_or_else(|| unknown_operator(anchor))?;

        op.precedence = match relation {
            Relation::SamePrecedenceAs(_) => base,
            Relation::LowerThan(_) => {
                self.shift_bands_from(base);
                base
            },
            Relation::HigherThan(_) => {
                self.shift_bands_from(base + 1);
                base + 1
            },
        };

        let tokens = std::mem::take(&mut op.tokens);
        op.tokens = tokens.into_iter()
            .filter(|token| !self.is_taken(token, op.arity))
            .collect();
        self.operators.push(op);
        Ok(())
    }

    /// Adds spellings to the operator that turns into the function `function`. Spellings already
    /// used by an operator of the same arity are skipped.
    pub fn add_tokens<I, S>(&mut self, tokens: I, function: &str) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = self.operators
            .iter()
            .position(|op| op.function == function)
            .ok_or_else(|| unknown_operator(function))?;
        self.merge_tokens(index, tokens.into_iter().map(Into::into).collect())
    }

    fn merge_tokens(&mut self, index: usize, tokens: Vec<String>) -> Result<(), Error> {
        let arity = self.operators[index].arity;
        for token in tokens {
            if !token.is_empty() && !self.is_taken(&token, arity) {
                self.operators[index].tokens.push(token);
            }
        }
        Ok(())
    }

    /// Moves every band at or above `band` up by one.
    fn shift_bands_from(&mut self, band: u32) {
        for op in self.operators.iter_mut().filter(|op| op.precedence >= band) {
            op.precedence += 1;
        }
    }
}

fn unknown_operator(function: &str) -> Error {
    Error::without_spans(kind::UnknownOperator { function: function.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use op::Associativity;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_round_trip() {
        let catalog = OperatorCatalog::default();
        for op in catalog.operators() {
            for token in &op.tokens {
                let by_token = catalog.lookup(token, op.arity).unwrap();
                let by_function = catalog.lookup_function(&by_token.function).unwrap();
                assert_eq!(by_token, by_function);
                assert_eq!(by_token, op);
            }
        }
    }

    #[test]
    fn function_ids() {
        let catalog = OperatorCatalog::default();
        let pow = catalog.function_id("pow", Arity::Binary).unwrap();
        assert!(catalog.get(pow).has_token("^"));
        assert_eq!(catalog.function_id("pow", Arity::Unary), None);
        assert_eq!(OperatorCatalog::empty().function_id("pow", Arity::Binary), None);
    }

    #[test]
    fn token_and_arity_are_unique() {
        let catalog = OperatorCatalog::default();
        for op in catalog.operators() {
            for token in &op.tokens {
                let count = catalog.operators()
                    .filter(|other| other.arity == op.arity && other.has_token(token))
                    .count();
                assert_eq!(count, 1, "`{}` is ambiguous", token);
            }
        }
    }

    #[test]
    fn minus_is_ambiguous() {
        let catalog = OperatorCatalog::default();
        let candidates = catalog.candidates("-");
        assert!(candidates.is_ambiguous());
        assert_eq!(catalog.get(candidates.prefix.unwrap()).function, "negate");
        assert_eq!(catalog.get(candidates.infix.unwrap()).function, "subtract");
        assert!(candidates.postfix.is_none());
    }

    #[test]
    fn precedence_order() {
        let catalog = OperatorCatalog::default();
        let prec = |name: &str| catalog.lookup_function(name).unwrap().precedence();
        assert!(prec("add") < prec("multiply"));
        assert!(prec("multiply") < prec("mod"));
        assert!(prec("negate") < prec("pow"));
        assert!(prec("factorial") < prec("pow"));
        assert!(prec("l_or") < prec("l_and"));
        assert_eq!(prec("add"), prec("subtract"));
        assert_eq!(prec("negate"), prec("sqrt"));
    }

    #[test]
    fn percent_mode() {
        let catalog = OperatorCatalog::new(CatalogOptions {
            percent_as_modulo: false,
            ..Default::default()
        });
        assert!(catalog.lookup("%", Arity::Binary).is_none());
        let percent = catalog.lookup("%", Arity::Unary).unwrap();
        assert_eq!(percent.function, "percent");
        assert_eq!(percent.position(), Position::Postfix);
        assert_eq!(percent.precedence(), catalog.lookup_function("factorial").unwrap().precedence());
    }

    #[test]
    fn modulo_shares_multiplication() {
        let catalog = OperatorCatalog::new(CatalogOptions {
            modulo_precedence: ModuloPrecedence::SameAsMultiplication,
            ..Default::default()
        });
        assert_eq!(
            catalog.lookup_function("mod").unwrap().precedence(),
            catalog.lookup_function("multiply").unwrap().precedence(),
        );
    }

    #[test]
    fn longest_match() {
        let catalog = OperatorCatalog::default();
        assert_eq!(catalog.longest_token("**2"), Some("**"));
        assert_eq!(catalog.longest_token("*2"), Some("*"));
        assert_eq!(catalog.longest_token("!!x"), Some("!!"));
        assert_eq!(catalog.longest_token("<=3"), Some("<="));
        assert_eq!(catalog.longest_token("$"), None);
    }

    #[test]
    fn add_operator_relative() {
        let mut catalog = OperatorCatalog::default();
        let add = catalog.lookup_function("add").unwrap().precedence();
        let multiply = catalog.lookup_function("multiply").unwrap().precedence();

        catalog.add_operator(
            Operator::binary("dot", Associativity::Left, ["·"]),
            Relation::HigherThan("add"),
        ).unwrap();

        let dot = catalog.lookup("·", Arity::Binary).unwrap().precedence();
        assert_eq!(dot, add + 1);
        assert_eq!(catalog.lookup_function("add").unwrap().precedence(), add);
        assert_eq!(catalog.lookup_function("multiply").unwrap().precedence(), multiply + 1);

        catalog.add_operator(
            Operator::binary("cross", Associativity::Left, ["⨯"]),
            Relation::SamePrecedenceAs("dot"),
        ).unwrap();
        assert_eq!(catalog.lookup("⨯", Arity::Binary).unwrap().precedence(), dot);

        catalog.add_operator(
            Operator::binary("union", Associativity::Left, ["∪"]),
            Relation::LowerThan("l_or"),
        ).unwrap();
        assert_eq!(catalog.lookup("∪", Arity::Binary).unwrap().precedence(), 0);
        assert_eq!(catalog.lookup_function("l_or").unwrap().precedence(), 1);
    }

    #[test]
    fn add_operator_skips_taken_tokens() {
        let mut catalog = OperatorCatalog::default();
        catalog.add_operator(
            Operator::binary("plus", Associativity::Left, ["+", "plus"]),
            Relation::SamePrecedenceAs("add"),
        ).unwrap();
        assert_eq!(catalog.lookup("+", Arity::Binary).unwrap().function, "add");
        assert_eq!(catalog.lookup("plus", Arity::Binary).unwrap().function, "plus");
    }

    #[test]
    fn add_operator_merges_existing_function() {
        let mut catalog = OperatorCatalog::default();
        let before = catalog.operators().count();
        catalog.add_operator(
            Operator::binary("multiply", Associativity::Left, ["⋅"]),
            Relation::SamePrecedenceAs("add"),
        ).unwrap();
        assert_eq!(catalog.operators().count(), before);
        assert_eq!(catalog.lookup("⋅", Arity::Binary).unwrap().function, "multiply");
    }

    #[test]
    fn add_tokens() {
        let mut catalog = OperatorCatalog::default();
        catalog.add_tokens(["mod", "%"], "mod").unwrap();
        let op = catalog.lookup_function("mod").unwrap();
        assert_eq!(op.tokens, vec!["%".to_string(), "mod".to_string()]);

        let err = catalog.add_tokens(["@"], "nope").unwrap_err();
        assert!(err.is::<kind::UnknownOperator>());
    }

    #[test]
    fn unknown_anchor() {
        let mut catalog = OperatorCatalog::default();
        let err = catalog.add_operator(
            Operator::prefix("hash", ["#"]),
            Relation::HigherThan("nope"),
        ).unwrap_err();
        assert_eq!(err.message(), "unknown operator function `nope`");
    }
}
