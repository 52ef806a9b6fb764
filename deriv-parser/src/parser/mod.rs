pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use deriv_error::ErrorKind;
use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The maximum number of nested parentheses, function calls, and signs the parser will descend
/// into before giving up.
pub const MAX_NESTING: usize = 128;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro can also catch fatal errors and immediately short-circuit the parsing process.
///
/// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
/// value is returned. Otherwise, the error of the last attempted parsing function is produced.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                err => err,
            }
        )+
    }};
}

/// A high-level parser for infix expressions. This is the type to use to parse an arbitrary
/// expression into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many parentheses, function calls, and signs the parser is currently inside of.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the index of the next non-whitespace token, starting at the cursor.
    fn significant_index(&self) -> Option<usize> {
        (self.cursor..self.tokens.len()).find(|&i| !self.tokens[i].is_whitespace())
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.significant_index()
            .map_or_else(|| self.eof_span(), |i| self.tokens[i].span.clone())
    }

    /// Returns the previous non-whitespace token. The cursor is not moved. Returns [`None`] if
    /// nothing has been parsed yet.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens[..self.cursor]
            .iter()
            .rev()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the current token, which may be whitespace. The cursor is not moved. Returns
    /// [`None`] if the cursor is at the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.significant_index().map(|i| self.tokens[i].kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn skip_whitespace(&mut self) {
        while self.current_token().is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns true if the parser can insert an implicit multiplication at the cursor. This is
    /// the case when the previous token is a number or a closing parenthesis, and the next token
    /// starts a name or a parenthesized expression, such as in `2x` or `(x + 1)(x - 1)`.
    pub fn implicit_multiplication_allowed(&self) -> bool {
        let prev = self.prev_token().map(|token| token.kind);
        let next = self.peek_kind();
        matches!(prev, Some(TokenKind::Int | TokenKind::Float | TokenKind::CloseParen))
            && matches!(next, Some(TokenKind::Name | TokenKind::OpenParen))
    }

    /// Returns the number of opening parentheses before the cursor that have not been closed yet.
    pub fn unclosed_parens(&self) -> usize {
        self.tokens[..self.cursor].iter().fold(0, |open, token| match token.kind {
            TokenKind::OpenParen => open + 1,
            TokenKind::CloseParen => open.saturating_sub(1),
            _ => open,
        })
    }

    /// Runs the given parsing function one nesting level deeper. Returns a fatal error instead if
    /// [`MAX_NESTING`] levels have already been entered.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        if self.depth >= MAX_NESTING {
            return Err(self.error_fatal(kind::TooDeeplyNested { max: MAX_NESTING }));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parses a value from the stream, then rewinds the cursor whether parsing succeeded or not.
    pub fn peek<T: Parse>(&mut self) -> Option<T> {
        let start = self.cursor;
        let value = T::parse(self).ok();
        self.cursor = start;
        value
    }

    /// Parses a `T`, rewinding the cursor if it fails.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Runs `f`, rewinding the cursor if it fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a `T` and checks it with `predicate`. The cursor is rewound if either step fails.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a `T` that spans the whole input. Leftover tokens are an error: a stray `)` or
    /// unknown character is reported as such, and anything else as [`kind::ExpectedEof`].
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        if self.peek_kind().is_none() {
            return Err(Error::new(vec![self.eof_span()], kind::EmptyExpression));
        }

        let value = T::parse(self)?;
        self.skip_whitespace();

        match self.current_token() {
            None => Ok(value),
            Some(token) => match token.kind {
                TokenKind::CloseParen => Err(Error::new_fatal(
                    vec![token.span.clone()],
                    kind::UnclosedParenthesis { opening: false },
                )),
                TokenKind::Symbol => Err(Error::new_fatal(
                    vec![token.span.clone()],
                    kind::UnexpectedCharacter { lexeme: token.lexeme.to_string() },
                )),
                _ => Err(Error::new(
                    vec![token.span.start..self.eof_span().end],
                    kind::ExpectedEof,
                )),
            },
        }
    }
}

/// A syntax node that can be read from a [`Parser`].
///
/// Implementations may leave the cursor anywhere on failure; callers go through
/// [`Parser::try_parse`] to get backtracking.
pub trait Parse: Sized {
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// How a chain of operators of equal precedence groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `x - y - z` is `(x - y) - z`.
    Left,

    /// `x ^ y ^ z` is `x ^ (y ^ z)`.
    Right,
}

/// How tightly an operator binds, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Below every operator; used to parse a whole expression.
    Any,

    /// `+` and `-`
    Term,

    /// `*`, `/`, and implicit multiplication
    Factor,

    /// A leading `-`. `-2x` groups as `(-2)x`, and `-x^2` as `-(x^2)`.
    Neg,

    /// `^`
    Exp,
}
