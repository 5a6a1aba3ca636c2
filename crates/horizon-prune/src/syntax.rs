//! Token-level helpers shared by the stylesheet and selector scanners.
//!
//! Both scanners work on source positions rather than parsed values so that
//! every byte they do not deliberately drop is reproduced verbatim.

use cssparser::{ParseError, Parser, Token};

/// Whether a token opens a nested block that `cssparser` skips lazily.
pub(crate) fn opens_block(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock
    )
}

/// Consume the block opened by the last token, leaving the parser positioned
/// right after its closing delimiter.
///
/// `cssparser` would otherwise skip the block on the next `next()` call, which
/// leaves `position()` pointing inside the block in the meantime.
///
/// Must only be called right after a token for which [`opens_block`] is true.
pub(crate) fn skip_block(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_nested_block(|p| {
        while p.next_including_whitespace_and_comments().is_ok() {}
        Ok::<_, ParseError<'_, ()>>(())
    });
}

/// Read the next token, consuming any block it opens.
///
/// Returns an owned copy so the parser can be used again immediately.
pub(crate) fn next_token<'i>(parser: &mut Parser<'i, '_>) -> Option<Token<'i>> {
    let token = parser.next_including_whitespace_and_comments().ok()?.clone();
    if opens_block(&token) {
        skip_block(parser);
    }
    Some(token)
}
