pub mod glyph;
pub mod token;

use crate::{
    catalog::OperatorCatalog,
    parser::{ast::PRECISION, error::{kind, Error}},
};
use logos::Logos;
use rug::{Float, Integer};
pub use token::{RawToken, Token, TokenKind};

/// Converts source code into [`Token`]s, using an [`OperatorCatalog`] to recognize operators.
///
/// The lexer is an iterator over `Result<Token, Error>`, and supports looking at the next token
/// without consuming it with [`Lexer::peek`]. Once an error is returned, the remaining output is
/// unspecified; callers should stop at the first error.
pub struct Lexer<'source, 'c> {
    raw: logos::Lexer<'source, RawToken>,
    catalog: &'c OperatorCatalog,

    /// The next token, if [`Lexer::peek`] was called.
    peeked: Option<Option<Result<Token<'source>, Error>>>,
}

impl<'source, 'c> Lexer<'source, 'c> {
    /// Creates a lexer over the given source.
    pub fn new(source: &'source str, catalog: &'c OperatorCatalog) -> Self {
        Self {
            raw: RawToken::lexer(source),
            catalog,
            peeked: None,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Option<&Result<Token<'source>, Error>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex());
        }
        self.peeked.as_ref().and_then(Option::as_ref)
    }

    /// Returns the span pointing at the end of the source code.
    pub fn eof_span(&self) -> std::ops::Range<usize> {
        let len = self.raw.source().len();
        len..len
    }

    fn lex(&mut self) -> Option<Result<Token<'source>, Error>> {
        let raw = self.raw.next()?;
        let span = self.raw.span();
        let lexeme = self.raw.slice();

        let kind = match raw {
            Ok(RawToken::Number) => parse_decimal(lexeme).map(TokenKind::Number),
            Ok(RawToken::Hex) => parse_radix(lexeme, 16).map(TokenKind::Number),
            Ok(RawToken::Octal) => parse_radix(lexeme, 8).map(TokenKind::Number),
            Ok(RawToken::MalformedNumber) => None,
            Ok(RawToken::Fraction) => lexeme.chars()
                .next()
                .and_then(glyph::vulgar_fraction)
                .map(|(numerator, denominator)| {
                    TokenKind::Fraction(Float::with_val(PRECISION, numerator) / denominator)
                }),
            Ok(RawToken::Superscript) => {
                Some(TokenKind::Exponent(lexeme.chars().filter_map(glyph::superscript).collect()))
            },
            Ok(RawToken::Name) if self.catalog.is_token(lexeme) => {
                Some(TokenKind::Operator(self.catalog.candidates(lexeme)))
            },
            Ok(RawToken::Name) => {
                if self.raw.remainder().trim_start().starts_with('(') {
                    Some(TokenKind::Function)
                } else {
                    Some(TokenKind::Variable)
                }
            },
            Ok(RawToken::Quoted) if lexeme.len() == 2 => {
                return Some(Err(Error::new(vec![span], kind::EmptyVariableName)));
            },
            Ok(RawToken::DollarName | RawToken::Quoted) => Some(TokenKind::Variable),
            Ok(RawToken::UnterminatedQuote) => {
                return Some(Err(Error::new(vec![span], kind::UnterminatedQuote)));
            },
            Ok(RawToken::OpenParen) => Some(TokenKind::OpenParen),
            Ok(RawToken::CloseParen) => Some(TokenKind::CloseParen),
            Ok(RawToken::Comma) => Some(TokenKind::Comma),
            Ok(RawToken::Symbol) | Err(()) => return Some(self.lex_operator()),
        };

        Some(match kind {
            Some(kind) => Ok(Token { span, kind, lexeme }),
            None => Err(Error::new(vec![span], kind::MalformedNumber {
                literal: lexeme.to_string(),
            })),
        })
    }

    /// Extends the current symbol to the longest operator spelling in the catalog.
    fn lex_operator(&mut self) -> Result<Token<'source>, Error> {
        let catalog = self.catalog;
        let start = self.raw.span().start;
        let rest = &self.raw.source()[start..];

        let Some(token) = catalog.longest_token(rest) else {
            return self.lex_symbol_name(start, rest);
        };

        let matched = self.raw.slice().len();
        if token.len() > matched {
            self.raw.bump(token.len() - matched);
        }

        let lexeme = &rest[..token.len()];
        Ok(Token {
            span: start..start + token.len(),
            kind: TokenKind::Operator(catalog.candidates(lexeme)),
            lexeme,
        })
    }
}

impl<'source> Lexer<'source, '_> {
    /// Lexes a run of non-ASCII symbols that do not start an operator, such as `∑`, as a name.
    fn lex_symbol_name(&mut self, start: usize, rest: &'source str) -> Result<Token<'source>, Error> {
        let catalog = self.catalog;
        let len = rest.char_indices()
            .find(|&(i, c)| {
                c.is_ascii()
                    || c.is_whitespace()
                    || glyph::is_numeric_glyph(c)
                    || catalog.longest_token(&rest[i..]).is_some()
            })
            .map_or(rest.len(), |(i, _)| i);

        if len == 0 {
            let character = rest.chars().next().unwrap_or_default();
            return Err(Error::new(
                vec![start..start + character.len_utf8()],
                kind::UnrecognizedCharacter { character },
            ));
        }

        let matched = self.raw.slice().len();
        if len > matched {
            self.raw.bump(len - matched);
        }

        let kind = if self.raw.remainder().trim_start().starts_with('(') {
            TokenKind::Function
        } else {
            TokenKind::Variable
        };
        Ok(Token {
            span: start..start + len,
            kind,
            lexeme: &rest[..len],
        })
    }
}

impl<'source> Iterator for Lexer<'source, '_> {
    type Item = Result<Token<'source>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lex(),
        }
    }
}

/// Parses a decimal literal, which may use the Unicode minus sign in its exponent.
fn parse_decimal(lexeme: &str) -> Option<Float> {
    let mut normalized = lexeme.replace('−', "-");
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if normalized.ends_with('.') {
        normalized.pop();
    }
    let parsed = Float::parse(normalized).ok()?;
    Some(Float::with_val(PRECISION, parsed))
}

/// Parses a hexadecimal (`0x...`) or octal (`0o...`) literal.
fn parse_radix(lexeme: &str, radix: i32) -> Option<Float> {
    let digits = lexeme.get(2..)?;
    let int = Integer::from_str_radix(digits, radix).ok()?;
    Some(Float::with_val(PRECISION, int))
}

/// Returns every token in the source, stopping at the first error.
pub fn tokenize_complete<'source>(
    source: &'source str,
    catalog: &OperatorCatalog,
) -> Result<Box<[Token<'source>]>, Error> {
    Lexer::new(source, catalog).collect()
}
