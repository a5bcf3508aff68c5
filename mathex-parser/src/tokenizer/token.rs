use crate::catalog::Candidates;
use logos::Logos;
use rug::Float;
use std::{borrow::Cow, ops::Range};

/// The raw lexical classes recognized before operators are matched against the catalog.
///
/// Operators are not listed here, since the set of operator spellings is only known at runtime.
/// Any character that does not start another token is lexed as a [`RawToken::Symbol`], and the
/// [`Lexer`](super::Lexer) extends it to the longest operator spelling from the catalog.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"\s+")]
pub enum RawToken {
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+\-−]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+\-−]?[0-9]+)?")]
    Number,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    Hex,

    #[regex(r"0[oO][0-7]+")]
    Octal,

    #[regex(r"[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]")]
    Fraction,

    #[regex(r"[⁰¹²³⁴⁵⁶⁷⁸⁹⁺⁻⁽⁾]+")]
    Superscript,

    #[regex(r"[0-9]*\.[0-9]*\.[0-9.]*")]
    MalformedNumber,

    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Name,

    /// A variable name prefixed with `$`, such as `$x`.
    #[regex(r"\$\p{XID_Continue}+")]
    DollarName,

    /// A variable name in single or double quotes, in which `\` escapes the next character.
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    Quoted,

    #[regex(r#""([^"\\]|\\.)*"#)]
    #[regex(r#"'([^'\\]|\\.)*"#)]
    UnterminatedQuote,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(",")]
    Comma,

    #[regex(r".", priority = 0)]
    Symbol,
}

/// The kind of a token, after identifiers have been classified and operators matched against the
/// catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A number literal, with its value.
    Number(Float),

    /// A vulgar fraction character such as `½`, with its value. Directly after a number, it adds
    /// to that number (`2½` is `2.5`).
    Fraction(Float),

    /// A run of superscript characters such as `²`, with the ASCII text it stands for. It raises
    /// the preceding operand to that power.
    Exponent(String),

    /// An identifier that is not followed by an opening parenthesis, or a `$`-prefixed or quoted
    /// variable name.
    Variable,

    /// An identifier that is followed by an opening parenthesis.
    Function,

    /// An operator spelling, with every operator it can stand for. If there is more than one
    /// candidate, the position of the token decides which one is meant.
    Operator(Candidates),

    OpenParen,
    CloseParen,
    Comma,
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl<'source> Token<'source> {
    /// Returns true if the token can begin an operand: a number, a name, or an opening
    /// parenthesis.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number(_)
                | TokenKind::Fraction(_)
                | TokenKind::Variable
                | TokenKind::Function
                | TokenKind::OpenParen
        )
    }

    /// Returns the name written by a variable or function token, without the `$` prefix or the
    /// quotes and escapes of a quoted name.
    pub fn name(&self) -> Cow<'source, str> {
        let lexeme = self.lexeme;
        match lexeme.chars().next() {
            Some('$') => Cow::Borrowed(&lexeme[1..]),
            Some('"' | '\'') => Cow::Owned(unescape(&lexeme[1..lexeme.len() - 1])),
            _ => Cow::Borrowed(lexeme),
        }
    }
}

/// Removes the backslashes that escape characters of a quoted name.
fn unescape(quoted: &str) -> String {
    let mut name = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.extend(chars.next()),
            c => name.push(c),
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(lexeme: &str) -> Token<'_> {
        Token { span: 0..lexeme.len(), kind: TokenKind::Variable, lexeme }
    }

    #[test]
    fn names() {
        assert_eq!(variable("x1").name(), "x1");
        assert_eq!(variable("$x1").name(), "x1");
        assert_eq!(variable("\"my var\"").name(), "my var");
        assert_eq!(variable(r#"'it\'s'"#).name(), "it's");
        assert_eq!(variable(r#""a\\b""#).name(), "a\\b");
    }
}
