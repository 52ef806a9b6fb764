pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Lexes the input lazily, one [`TokenKind`] at a time.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Lexes the whole input up front, so the parser can backtrack freely.
///
/// Unrecognized characters become [`TokenKind::Symbol`] tokens; the returned tokens always cover
/// the entire input.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    std::iter::from_fn(|| {
        let kind = lexer.next()?.unwrap_or(TokenKind::Symbol);
        Some(Token { span: lexer.span(), kind, lexeme: lexer.slice() })
    })
    .collect()
}
