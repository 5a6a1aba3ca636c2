//! Splitting a selector list into branches.

use cssparser::{Parser, ParserInput, Token};

use crate::syntax::next_token;

/// Split a selector list on its top-level commas.
///
/// Commas inside functions, brackets and strings do not split, so
/// `:is(.a, .b)` stays one branch. Each branch keeps its surrounding
/// whitespace, which lets kept branches be rejoined with `,` unchanged.
pub fn split_branches(selector: &str) -> Vec<&str> {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);
    let mut branches = vec![];
    let mut branch_start = parser.position();

    loop {
        let token_start = parser.position();
        match next_token(&mut parser) {
            Some(Token::Comma) => {
                branches.push(parser.slice(branch_start..token_start));
                branch_start = parser.position();
            }
            Some(_) => {}
            None => break,
        }
    }

    branches.push(parser.slice_from(branch_start));
    branches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_branch() {
        assert_eq!(split_branches(".foo"), vec![".foo"]);
    }

    #[test]
    fn keeps_whitespace() {
        assert_eq!(
            split_branches(".bar, :not(.foo),\n.baz"),
            vec![".bar", " :not(.foo)", "\n.baz"]
        );
    }

    #[test]
    fn nested_commas_do_not_split() {
        assert_eq!(
            split_branches(":is(.a, .b) p, [title=\"x,y\"], .c"),
            vec![":is(.a, .b) p", " [title=\"x,y\"]", " .c"]
        );
    }

    #[test]
    fn escaped_comma_does_not_split() {
        assert_eq!(split_branches(r".a\,b, .c"), vec![r".a\,b", " .c"]);
    }

    #[test]
    fn empty_branches_are_kept() {
        assert_eq!(split_branches(".a,,.b"), vec![".a", "", ".b"]);
        assert_eq!(split_branches(""), vec![""]);
    }
}
