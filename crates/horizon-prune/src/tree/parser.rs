//! Lossless stylesheet parser built on the `cssparser` tokenizer.
//!
//! The parser only recognizes structure: rules, at-rules, comments, and the
//! whitespace between them. Selectors, preludes and declaration blocks are
//! captured as source slices and never reformatted.

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

use super::node::{AtRule, AtRuleBody, Comment, Node, NodeKind, Rule, holds_declarations};
use crate::syntax::{opens_block, skip_block};

/// Parse CSS text into a node list and the trailing whitespace.
///
/// Parsing never fails: text that is not a rule, at-rule or comment is kept
/// as [`NodeKind::Other`].
pub(crate) fn parse_nodes(css: &str) -> (Vec<Node>, String) {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_node_list(&mut parser)
}

/// Parse nodes until the parser is exhausted.
fn parse_node_list(parser: &mut Parser<'_, '_>) -> (Vec<Node>, String) {
    let mut nodes = vec![];

    loop {
        let before = consume_whitespace(parser);
        let start = parser.position();

        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return (nodes, before),
        };

        let kind = match token {
            Token::Comment(text) => NodeKind::Comment(Comment {
                text: text.to_string(),
                raw: parser.slice_from(start).to_string(),
            }),
            Token::AtKeyword(name) => NodeKind::AtRule(parse_at_rule(parser, start, name.to_string())),
            Token::CDO
            | Token::CDC
            | Token::Semicolon
            | Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket => {
                tracing::debug!("Keeping stray '{}' verbatim", parser.slice_from(start));
                NodeKind::Other(parser.slice_from(start).to_string())
            }
            first => parse_qualified_rule(parser, start, first),
        };

        nodes.push(Node::new(before, kind));
    }
}

/// Consume whitespace tokens and return their source text.
fn consume_whitespace(parser: &mut Parser<'_, '_>) -> String {
    let start = parser.position();

    loop {
        let state = parser.state();
        let is_whitespace = matches!(
            parser.next_including_whitespace_and_comments(),
            Ok(Token::WhiteSpace(_))
        );
        if !is_whitespace {
            parser.reset(&state);
            break;
        }
    }

    parser.slice_from(start).to_string()
}

/// Parse `prelude { block }`, starting after the prelude's first token.
fn parse_qualified_rule<'i>(
    parser: &mut Parser<'i, '_>,
    start: SourcePosition,
    first: Token<'i>,
) -> NodeKind {
    let mut token = first;
    let mut token_start = start;

    loop {
        match token {
            Token::CurlyBracketBlock => {
                skip_block(parser);
                let prelude = parser.slice(start..token_start);
                let selector = prelude.trim_end();

                return NodeKind::Rule(Rule {
                    selector: selector.to_string(),
                    between: prelude[selector.len()..].to_string(),
                    block: parser.slice_from(token_start).to_string(),
                });
            }
            Token::Semicolon => {
                tracing::debug!("Skipping rule without a block: {}", parser.slice_from(start));
                return NodeKind::Other(parser.slice_from(start).to_string());
            }
            ref t if opens_block(t) => skip_block(parser),
            _ => {}
        }

        token_start = parser.position();
        token = match parser.next_including_whitespace_and_comments() {
            Ok(t) => t.clone(),
            Err(_) => {
                tracing::debug!("Rule without a block at end of input");
                return NodeKind::Other(parser.slice_from(start).to_string());
            }
        };
    }
}

/// Parse an at-rule whose `@keyword` has just been consumed.
fn parse_at_rule(parser: &mut Parser<'_, '_>, start: SourcePosition, name: String) -> AtRule {
    let raw_name = parser.slice_from(start).to_string();
    let prelude_start = parser.position();

    loop {
        let token_start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(t) => t.clone(),
            Err(_) => {
                return AtRule {
                    name,
                    raw_name,
                    prelude: parser.slice_from(prelude_start).to_string(),
                    body: AtRuleBody::Statement(String::new()),
                };
            }
        };

        match token {
            Token::Semicolon => {
                return AtRule {
                    name,
                    raw_name,
                    prelude: parser.slice(prelude_start..token_start).to_string(),
                    body: AtRuleBody::Statement(";".to_string()),
                };
            }
            Token::CurlyBracketBlock => {
                let prelude = parser.slice(prelude_start..token_start).to_string();
                let body = if holds_declarations(&name) {
                    skip_block(parser);
                    AtRuleBody::Opaque(parser.slice_from(token_start).to_string())
                } else {
                    parse_block_body(parser, token_start, &name)
                };

                return AtRule {
                    name,
                    raw_name,
                    prelude,
                    body,
                };
            }
            ref t if opens_block(t) => skip_block(parser),
            _ => {}
        }
    }
}

/// Parse the nested node list of an at-rule block whose `{` was just consumed.
fn parse_block_body(parser: &mut Parser<'_, '_>, brace: SourcePosition, name: &str) -> AtRuleBody {
    let mut inner_end = None;

    let parsed = parser.parse_nested_block(|p| {
        let list = parse_node_list(p);
        inner_end = Some(p.position());
        Ok::<_, ParseError<'_, ()>>(list)
    });

    match parsed {
        Ok((nodes, after)) => {
            let closed = inner_end.is_some_and(|end| end != parser.position());
            if !closed {
                tracing::warn!("Unterminated @{} block at end of stylesheet", name);
            }
            AtRuleBody::Block {
                nodes,
                after,
                closed,
            }
        }
        Err(e) => {
            tracing::warn!("Keeping @{} block verbatim: {:?}", name, e);
            AtRuleBody::Opaque(parser.slice_from(brace).to_string())
        }
    }
}
