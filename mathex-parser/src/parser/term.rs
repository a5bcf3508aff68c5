//! The first parsing phase: grouping tokens into a raw term tree.

use crate::{
    catalog::{op::{Arity, OperatorId}, OperatorCatalog},
    tokenizer::{Lexer, Token, TokenKind},
};
use rug::Float;
use std::ops::Range;
use super::{error::{kind, Error}, ParserConfig};

/// The function of the unary plus operator, which is dropped while building terms.
const POSITIVE: &str = "positive";

/// The function that superscript exponents are applied with.
const POW: &str = "pow";

/// A raw, precedence-agnostic parse node.
///
/// A sequence of terms is one level of the source: the top level, the inside of a pair of
/// parentheses, or one argument of a function call. Operators in a sequence have already been
/// resolved to a single definition, but have not been combined with their operands yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Number {
        value: Float,
        span: Range<usize>,
    },
    Variable {
        name: String,
        span: Range<usize>,
    },
    Operator {
        id: OperatorId,

        /// The spelling used in the source, for error messages.
        symbol: String,
        span: Range<usize>,
    },

    /// Two operands written next to each other, such as `2x`.
    ImplicitMultiplication {
        span: Range<usize>,
    },

    /// A parenthesized sequence.
    Group {
        inner: Vec<Term>,
        span: Range<usize>,
    },

    /// A function call, with one sequence per argument.
    Call {
        name: String,
        args: Vec<Vec<Term>>,
        span: Range<usize>,
    },
}

impl Term {
    /// Returns the region of the source code that this term was built from.
    pub fn span(&self) -> Range<usize> {
        match self {
            Term::Number { span, .. }
                | Term::Variable { span, .. }
                | Term::Operator { span, .. }
                | Term::ImplicitMultiplication { span }
                | Term::Group { span, .. }
                | Term::Call { span, .. } => span.clone(),
        }
    }
}

/// What the next term of a sequence may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// An operand or a prefix operator.
    Operand,

    /// An infix or postfix operator. An operand here is an implicit multiplication.
    Operator,
}

/// Builds the raw term tree of a source string.
pub struct TermBuilder<'source, 'c> {
    lexer: Lexer<'source, 'c>,
    catalog: &'c OperatorCatalog,
    config: ParserConfig,
}

impl<'source, 'c> TermBuilder<'source, 'c> {
    /// Creates a term builder over the given source.
    pub fn new(source: &'source str, catalog: &'c OperatorCatalog, config: ParserConfig) -> Self {
        Self {
            lexer: Lexer::new(source, catalog),
            catalog,
            config,
        }
    }

    /// Builds the top-level sequence of the source.
    pub fn build(mut self) -> Result<Vec<Term>, Error> {
        let terms = self.sequence()?;
        match self.next_token()? {
            None if terms.is_empty() => Err(Error::new(vec![self.lexer.eof_span()], kind::EmptyExpression)),
            None => Ok(terms),
            Some(token) if token.kind == TokenKind::Comma => {
                Err(Error::new(vec![token.span], kind::UnexpectedComma))
            },
            Some(token) => Err(Error::new(vec![token.span], kind::UnmatchedCloseParenthesis)),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'source>>, Error> {
        self.lexer.next().transpose()
    }

    /// Returns true if the next token ends the current sequence.
    fn at_sequence_end(&mut self) -> Result<bool, Error> {
        match self.lexer.peek() {
            None => return Ok(true),
            Some(Ok(token)) => {
                return Ok(matches!(token.kind, TokenKind::CloseParen | TokenKind::Comma));
            },
            Some(Err(_)) => (),
        }

        // surface the lexing error
        match self.lexer.next() {
            Some(Err(err)) => Err(err),
            _ => Ok(true),
        }
    }

    /// Reads terms until a closing parenthesis, a comma, or the end of the source, none of which
    /// are consumed.
    fn sequence(&mut self) -> Result<Vec<Term>, Error> {
        let mut terms = Vec::new();
        let mut expect = Expect::Operand;

        // the last operator that still needs a right operand, for error reporting
        let mut pending: Option<(String, Range<usize>)> = None;

        while !self.at_sequence_end()? {
            let Some(token) = self.next_token()? else {
                break;
            };

            if let TokenKind::Exponent(exponent) = &token.kind {
                if expect == Expect::Operand {
                    return Err(Error::new(vec![token.span], kind::MissingLeftOperand {
                        operator: token.lexeme.to_string(),
                    }));
                }
                let exponent = exponent.clone();
                self.push_exponent(&mut terms, &exponent, token)?;
                continue;
            }

            if let (TokenKind::Fraction(fraction), Expect::Operator) = (&token.kind, expect) {
                if let Some(Term::Number { value, span }) = terms.last_mut() {
                    *value += fraction;
                    span.end = token.span.end;
                    continue;
                }
            }

            if token.starts_operand() {
                if expect == Expect::Operator {
                    self.push_implicit_multiplication(&mut terms, token.span.start);
                }
                let operand = self.operand(token)?;
                terms.push(operand);
                expect = Expect::Operator;
                pending = None;
                continue;
            }

            let TokenKind::Operator(candidates) = token.kind else {
                unreachable!("closing parentheses and commas end the sequence, and other tokens are operands");
            };

            match expect {
                Expect::Operand => {
                    let Some(id) = candidates.prefix else {
                        return Err(Error::new(vec![token.span], kind::MissingLeftOperand {
                            operator: token.lexeme.to_string(),
                        }));
                    };
                    pending = Some((token.lexeme.to_string(), token.span.clone()));
                    self.push_prefix(&mut terms, id, token);
                },
                Expect::Operator => {
                    if let Some(id) = candidates.infix {
                        pending = Some((token.lexeme.to_string(), token.span.clone()));
                        terms.push(operator_term(id, token));
                        expect = Expect::Operand;
                    } else if let Some(id) = candidates.postfix {
                        terms.push(operator_term(id, token));
                    } else if let Some(id) = candidates.prefix {
                        self.push_implicit_multiplication(&mut terms, token.span.start);
                        pending = Some((token.lexeme.to_string(), token.span.clone()));
                        self.push_prefix(&mut terms, id, token);
                        expect = Expect::Operand;
                    }
                },
            }
        }

        if let Some((operator, span)) = pending {
            return Err(Error::new(vec![span], kind::MissingRightOperand { operator }));
        }

        Ok(terms)
    }

    /// Builds an operand term from a token that starts one.
    fn operand(&mut self, token: Token<'source>) -> Result<Term, Error> {
        match token.kind {
            TokenKind::Number(value) | TokenKind::Fraction(value) => {
                Ok(Term::Number { value, span: token.span })
            },
            TokenKind::Variable => Ok(Term::Variable {
                name: token.name().into_owned(),
                span: token.span,
            }),
            TokenKind::Function => self.call(token),
            TokenKind::OpenParen => self.group(token.span),
            _ => unreachable!("token does not start an operand"),
        }
    }

    /// Builds a parenthesized group. The opening parenthesis has been consumed.
    fn group(&mut self, open: Range<usize>) -> Result<Term, Error> {
        let inner = self.sequence()?;
        match self.next_token()? {
            Some(close) if close.kind == TokenKind::CloseParen => {
                if inner.is_empty() {
                    Err(Error::new(vec![open.start..close.span.end], kind::EmptyGroup))
                } else {
                    Ok(Term::Group { inner, span: open.start..close.span.end })
                }
            },
            Some(comma) => Err(Error::new(vec![comma.span], kind::UnexpectedComma)),
            None => Err(Error::new(vec![open], kind::UnclosedParenthesis)),
        }
    }

    /// Builds a function call. The name has been consumed; the opening parenthesis is next.
    fn call(&mut self, name: Token<'source>) -> Result<Term, Error> {
        let open = match self.next_token()? {
            Some(token) if token.kind == TokenKind::OpenParen => token.span,
            _ => unreachable!("function names are followed by an opening parenthesis"),
        };

        let mut args = Vec::new();
        loop {
            let arg = self.sequence()?;
            match self.next_token()? {
                Some(close) if close.kind == TokenKind::CloseParen => {
                    if arg.is_empty() {
                        if !args.is_empty() {
                            return Err(Error::new(vec![close.span], kind::EmptyArgument));
                        }
                    } else {
                        args.push(arg);
                    }
                    return Ok(Term::Call {
                        name: name.lexeme.to_string(),
                        args,
                        span: name.span.start..close.span.end,
                    });
                },
                Some(comma) => {
                    if arg.is_empty() {
                        return Err(Error::new(vec![comma.span], kind::EmptyArgument));
                    }
                    args.push(arg);
                },
                None => return Err(Error::new(vec![open], kind::UnclosedParenthesis)),
            }
        }
    }

    /// Raises the previous operand to a superscript exponent, such as `x²`.
    ///
    /// The exponent text is parsed as its own sequence and pushed as a group, so `x⁻¹` reads as
    /// `x ^ (-1)`. Every term of the exponent points at the superscript in the source.
    fn push_exponent(
        &self,
        terms: &mut Vec<Term>,
        exponent: &str,
        token: Token<'source>,
    ) -> Result<(), Error> {
        let Some(id) = self.catalog.function_id(POW, Arity::Binary) else {
            return Err(Error::new(vec![token.span], kind::UnknownOperator {
                function: POW.to_string(),
            }));
        };

        let mut inner = TermBuilder::new(exponent, self.catalog, self.config)
            .build()
            .map_err(|mut err| {
                err.spans = vec![token.span.clone()];
                err
            })?;
        for term in &mut inner {
            relocate(term, &token.span);
        }

        let span = token.span.clone();
        terms.push(operator_term(id, token));
        terms.push(Term::Group { inner, span });
        Ok(())
    }

    /// Pushes a prefix operator, unless it is a unary plus.
    fn push_prefix(&self, terms: &mut Vec<Term>, id: OperatorId, token: Token<'source>) {
        if self.catalog.get(id).function != POSITIVE {
            terms.push(operator_term(id, token));
        }
    }

    /// Bridges the previous operand and the one starting at `start`, if enabled.
    fn push_implicit_multiplication(&self, terms: &mut Vec<Term>, start: usize) {
        if !self.config.implicit_multiplication {
            return;
        }
        let end = terms.last().map_or(start, |term| term.span().end);
        terms.push(Term::ImplicitMultiplication { span: end..start });
    }
}

/// Points a term and everything inside it at the given span.
fn relocate(term: &mut Term, to: &Range<usize>) {
    match term {
        Term::Number { span, .. }
            | Term::Variable { span, .. }
            | Term::Operator { span, .. }
            | Term::ImplicitMultiplication { span } => *span = to.clone(),
        Term::Group { inner, span } => {
            *span = to.clone();
            inner.iter_mut().for_each(|term| relocate(term, to));
        },
        Term::Call { args, span, .. } => {
            *span = to.clone();
            args.iter_mut().flatten().for_each(|term| relocate(term, to));
        },
    }
}

fn operator_term(id: OperatorId, token: Token<'_>) -> Term {
    Term::Operator {
        id,
        symbol: token.lexeme.to_string(),
        span: token.span,
    }
}
