pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Declares a struct for each kind of delimiter token, with a [`Parse`] implementation that only
/// accepts that kind. This lets the parser request a delimiter by type, as in
/// `input.try_parse::<OpenParen>()`.
macro_rules! delimiters {
    ($($(#[$attr:meta])* $name:ident)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                /// The region of the source code that this delimiter was parsed from.
                pub span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;
                    match token.kind {
                        TokenKind::$name => Ok(Self { span: token.span }),
                        found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found,
                        })),
                    }
                }
            }
        )*
    };
}

delimiters! {
    /// An opening parenthesis, `(`.
    OpenParen

    /// A closing parenthesis, `)`.
    CloseParen
}
