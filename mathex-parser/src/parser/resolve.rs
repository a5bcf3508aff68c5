//! The second parsing phase: folding term sequences into expression trees.

use crate::catalog::{op::{Associativity, Operator, Position}, OperatorCatalog};
use std::{iter::Peekable, ops::Range, vec::IntoIter};
use super::{
    ast::Expr,
    error::{kind, Error},
    term::Term,
    ParserConfig,
};

/// The function that implicit multiplication turns into.
const MULTIPLY: &str = "multiply";

/// How tightly an operator binds, derived from its precedence band.
///
/// Each band is spread over several binding powers, so that implicit multiplication can sit just
/// above the multiplication band without a band of its own, and left-associative operators can
/// require a strictly tighter operator on their right.
type BindingPower = u32;

/// The number of binding powers per precedence band.
const BAND_WIDTH: BindingPower = 4;

/// Folds the term sequences produced by the [`TermBuilder`](super::term::TermBuilder) into an
/// [`Expr`], by precedence climbing.
///
/// In each sequence, the operator that binds tightest is applied first. Between operators that
/// bind equally tight, left-associative operators are applied left to right, and
/// right-associative operators are applied right to left, so `2^3^2` is `2^(3^2)`. A prefix
/// operator applies to everything on its right that binds tighter than itself, so `-2^2` is
/// `-(2^2)`.
pub struct Resolver<'c> {
    catalog: &'c OperatorCatalog,
    config: ParserConfig,
}

/// An expression with the region of the source code it was built from.
struct Spanned {
    expr: Expr,
    span: Range<usize>,
}

type Terms = Peekable<IntoIter<Term>>;

impl<'c> Resolver<'c> {
    /// Creates a resolver that looks operators up in the given catalog.
    pub fn new(catalog: &'c OperatorCatalog, config: ParserConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolves a complete, non-empty sequence of terms.
    pub fn resolve(&self, terms: Vec<Term>) -> Result<Expr, Error> {
        self.sequence(terms).map(|spanned| spanned.expr)
    }

    fn sequence(&self, terms: Vec<Term>) -> Result<Spanned, Error> {
        let mut terms = terms.into_iter().peekable();
        let resolved = self.expr(&mut terms, 0)?;

        // every term that could not be consumed is an operand without an operator before it
        match terms.next() {
            Some(term) => Err(Error::new(vec![resolved.span, term.span()], kind::MissingOperator)),
            None => Ok(resolved),
        }
    }

    fn binding_power(&self, op: &Operator) -> BindingPower {
        op.precedence() * BAND_WIDTH
    }

    fn implicit_binding_power(&self) -> BindingPower {
        let band = self.catalog
            .lookup_function_with_args(MULTIPLY, 2)
            .map_or(0, |op| self.binding_power(op));
        if self.config.high_precedence_implicit_multiplication {
            band + 2
        } else {
            band
        }
    }

    /// Parses the longest expression whose operators all bind at least as tight as `min`.
    fn expr(&self, terms: &mut Terms, min: BindingPower) -> Result<Spanned, Error> {
        let mut lhs = self.operand(terms)?;

        loop {
            let (power, right_assoc) = match terms.peek() {
                Some(Term::Operator { id, .. }) => {
                    let op = self.catalog.get(*id);
                    match op.position() {
                        Position::Postfix | Position::Infix => (
                            self.binding_power(op),
                            op.associativity == Associativity::Right,
                        ),

                        // a prefix operator right after an operand
                        Position::Prefix => break,
                    }
                },
                Some(Term::ImplicitMultiplication { .. }) => (self.implicit_binding_power(), false),
                _ => break,
            };

            if power < min {
                break;
            }

            let Some(term) = terms.next() else {
                break;
            };

            lhs = match term {
                Term::Operator { id, symbol, span } => {
                    let op = self.catalog.get(id);
                    if op.position() == Position::Postfix {
                        Spanned {
                            span: lhs.span.start..span.end,
                            expr: Expr::function(op.function.clone(), [lhs.expr]),
                        }
                    } else {
                        let next_min = if right_assoc { power } else { power + 1 };
                        let rhs = self.right_operand(terms, next_min, &symbol, span)?;
                        Spanned {
                            span: lhs.span.start..rhs.span.end,
                            expr: Expr::function(op.function.clone(), [lhs.expr, rhs.expr]),
                        }
                    }
                },
                Term::ImplicitMultiplication { span } => {
                    let rhs = self.right_operand(terms, power + 1, "", span)?;
                    Spanned {
                        span: lhs.span.start..rhs.span.end,
                        expr: Expr::function(MULTIPLY, [lhs.expr, rhs.expr]),
                    }
                },
                _ => unreachable!("only operators are consumed here"),
            };
        }

        Ok(lhs)
    }

    /// Parses the right operand of an operator, reporting a missing operand at the operator.
    fn right_operand(
        &self,
        terms: &mut Terms,
        min: BindingPower,
        symbol: &str,
        span: Range<usize>,
    ) -> Result<Spanned, Error> {
        if terms.peek().is_none() {
            return Err(Error::new(vec![span], kind::MissingRightOperand {
                operator: symbol.to_string(),
            }));
        }
        self.expr(terms, min)
    }

    /// Parses an operand, along with the prefix operators in front of it.
    fn operand(&self, terms: &mut Terms) -> Result<Spanned, Error> {
        let Some(term) = terms.next() else {
            unreachable!("sequences are non-empty and end in an operand");
        };

        match term {
            Term::Number { value, span } => Ok(Spanned { expr: Expr::Number(value), span }),
            Term::Variable { name, span } => Ok(Spanned { expr: Expr::Variable(name), span }),
            Term::Group { inner, span } => {
                let inner = self.sequence(inner)?;
                Ok(Spanned { expr: inner.expr, span })
            },
            Term::Call { name, args, span } => {
                let args = args.into_iter()
                    .map(|arg| self.sequence(arg).map(|arg| arg.expr))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Spanned { expr: Expr::Function { name, args }, span })
            },
            Term::Operator { id, symbol, span } => {
                let op = self.catalog.get(id);
                if op.position() != Position::Prefix {
                    return Err(Error::new(vec![span], kind::MissingLeftOperand {
                        operator: symbol,
                    }));
                }

                let operand = self.right_operand(terms, self.binding_power(op), &symbol, span.clone())?;
                Ok(Spanned {
                    span: span.start..operand.span.end,
                    expr: Expr::function(op.function.clone(), [operand.expr]),
                })
            },
            Term::ImplicitMultiplication { span } => Err(Error::new(vec![span], kind::MissingLeftOperand {
                operator: String::new(),
            })),
        }
    }
}
