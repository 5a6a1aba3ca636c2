//! Detecting branches made only of `:not()`.

use cssparser::{Parser, ParserInput, Token};

use crate::syntax::next_token;

/// Whether a branch consists solely of negation clauses.
///
/// `:not(.foo)` and chained negations such as `:not(.a):not(.b)` qualify.
/// A negation combined with anything else (`.bar:not(.foo)`,
/// `.bar :not(.foo)`, `:not(.foo) .bar`) does not. Surrounding whitespace is
/// ignored.
pub fn is_standalone_negation(branch: &str) -> bool {
    let mut input = ParserInput::new(branch);
    let mut parser = Parser::new(&mut input);
    let mut negations = 0;
    let mut trailing = false;

    while let Some(token) = next_token(&mut parser) {
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) => {
                if negations > 0 {
                    trailing = true;
                }
            }
            Token::Colon if !trailing => {
                if !consume_not(&mut parser) {
                    return false;
                }
                negations += 1;
            }
            _ => return false,
        }
    }

    negations > 0
}

/// Consume `not(...)` (or `not (...)`) after a `:`.
fn consume_not(parser: &mut Parser<'_, '_>) -> bool {
    match next_token(parser) {
        Some(Token::Function(name)) => name.eq_ignore_ascii_case("not"),
        Some(Token::Ident(name)) if name.eq_ignore_ascii_case("not") => loop {
            match next_token(parser) {
                Some(Token::WhiteSpace(_)) => {}
                Some(Token::ParenthesisBlock) => return true,
                _ => return false,
            }
        },
        _ => false,
    }
}
