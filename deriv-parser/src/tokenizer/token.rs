use logos::Logos;
use std::ops::Range;

/// Every kind of token in an expression. Unicode spellings of the operators (`−`, `·`, `×`, `÷`)
/// are accepted alongside the ASCII ones.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[\n\r]+")]
    NewLine,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    #[token("−")]
    Sub,

    #[token("*")]
    #[token("·")]
    #[token("×")]
    Mul,

    #[token("/")]
    #[token("÷")]
    Div,

    #[token("^")]
    Exp,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]*\.[0-9]+")]
    Float,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Whitespace separates tokens but never carries meaning, except that it blocks implicit
    /// multiplication between two numbers (`2 3`).
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::NewLine)
    }

    pub fn is_number(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// A short description of the token for error messages, such as "`+`" or "a number".
    pub fn describe(self) -> &'static str {
        match self {
            Self::NewLine => "a line break",
            Self::Whitespace => "whitespace",
            Self::Add => "`+`",
            Self::Sub => "`-`",
            Self::Mul => "`*`",
            Self::Div => "`/`",
            Self::Exp => "`^`",
            Self::Name => "a name",
            Self::OpenParen => "`(`",
            Self::CloseParen => "`)`",
            Self::Int | Self::Float => "a number",
            Self::Symbol => "an unknown character",
        }
    }
}

/// A classified slice of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// Byte range of the lexeme in the input.
    pub span: Range<usize>,
    pub kind: TokenKind,
    pub lexeme: &'source str,
}

impl Token<'_> {
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
