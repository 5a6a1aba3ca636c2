//! Removing pseudo-classes and pseudo-elements from a selector.

use cssparser::{Parser, ParserInput, Token};

use crate::syntax::next_token;

/// Strip every pseudo-class and pseudo-element from a selector branch.
///
/// A pseudo segment is `:name`, `::name`, `:name(...)` or `::name(...)`;
/// runs of them (`:hover::before`) are removed together, arguments included.
/// Colons escaped in identifiers or sitting inside attribute selectors are
/// left alone. If a stripped run made up its whole compound selector, `*`
/// takes its place so the result stays well formed:
///
/// ```
/// use horizon_prune::selector::strip_pseudo;
///
/// assert_eq!(strip_pseudo("a:hover::before"), "a");
/// assert_eq!(strip_pseudo(".list > :first-child"), ".list > *");
/// assert_eq!(strip_pseudo(r"[ng\:cloak]"), r"[ng\:cloak]");
/// ```
///
/// Branches with a dangling colon are returned unchanged; they are not
/// valid selectors and the query will reject them.
pub fn strip_pseudo(branch: &str) -> String {
    let mut input = ParserInput::new(branch);
    let mut parser = Parser::new(&mut input);
    let mut out = String::with_capacity(branch.len());
    let mut kept_from = parser.position();
    let mut in_compound = false;

    loop {
        let token_start = parser.position();
        let Some(token) = next_token(&mut parser) else {
            break;
        };

        match token {
            Token::Colon => {
                if !consume_pseudo(&mut parser) {
                    return branch.to_string();
                }
                out.push_str(parser.slice(kept_from..token_start));
                if !in_compound {
                    out.push('*');
                    in_compound = true;
                }
                kept_from = parser.position();
            }
            Token::WhiteSpace(_) | Token::Comma | Token::Delim('>' | '+' | '~') => {
                in_compound = false;
            }
            Token::Comment(_) => {}
            _ => in_compound = true,
        }
    }

    out.push_str(parser.slice_from(kept_from));
    out
}

/// Consume the rest of a pseudo segment whose first `:` was just read.
fn consume_pseudo(parser: &mut Parser<'_, '_>) -> bool {
    let mut token = next_token(parser);
    if matches!(token, Some(Token::Colon)) {
        token = next_token(parser);
    }
    matches!(token, Some(Token::Ident(_) | Token::Function(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pseudo_classes() {
        assert_eq!(strip_pseudo(".foo:first-child"), ".foo");
        assert_eq!(strip_pseudo("li:nth-child(2n + 1)"), "li");
        assert_eq!(strip_pseudo("a:HOVER"), "a");
    }

    #[test]
    fn strips_pseudo_elements() {
        assert_eq!(strip_pseudo(".foo::before"), ".foo");
        assert_eq!(strip_pseudo("p:first-line"), "p");
        assert_eq!(strip_pseudo("input::-webkit-input-placeholder"), "input");
    }

    #[test]
    fn strips_chained_runs() {
        assert_eq!(strip_pseudo("a:hover::before"), "a");
        assert_eq!(strip_pseudo(".btn:focus:not(.x)::after"), ".btn");
    }

    #[test]
    fn keeps_structure_around_pseudos() {
        assert_eq!(strip_pseudo(".a:hover > .b:focus"), ".a > .b");
        assert_eq!(strip_pseudo("ul li:first-child a"), "ul li a");
        assert_eq!(strip_pseudo(".a:hover.b"), ".a.b");
    }

    #[test]
    fn negation_is_stripped_as_a_unit() {
        assert_eq!(strip_pseudo(".foo:not(.bar)"), ".foo");
        assert_eq!(strip_pseudo(".foo:not(:nth-child(2))"), ".foo");
        assert_eq!(strip_pseudo(".bar :not(.foo)"), ".bar *");
    }

    #[test]
    fn bare_pseudo_becomes_universal() {
        assert_eq!(strip_pseudo(":root"), "*");
        assert_eq!(strip_pseudo("::selection"), "*");
        assert_eq!(strip_pseudo(".list > :first-child"), ".list > *");
        assert_eq!(strip_pseudo(" :hover"), " *");
    }

    #[test]
    fn escaped_colons_are_not_pseudos() {
        assert_eq!(strip_pseudo(r"[ng\:cloak]"), r"[ng\:cloak]");
        assert_eq!(strip_pseudo(r".md\:flex:hover"), r".md\:flex");
        assert_eq!(strip_pseudo(r#"a[href="http://x"]:visited"#), r#"a[href="http://x"]"#);
    }

    #[test]
    fn no_pseudos_is_identity() {
        assert_eq!(strip_pseudo(" .a  .b "), " .a  .b ");
        assert_eq!(strip_pseudo("#id > p ~ span + em"), "#id > p ~ span + em");
    }

    #[test]
    fn dangling_colon_is_left_alone() {
        assert_eq!(strip_pseudo("a:"), "a:");
        assert_eq!(strip_pseudo("a: hover"), "a: hover");
    }
}
