//! Unit tests for the parse tree accessors.

use super::{rules::Rule, tree::ParseNode};
use crate::{errors::errors::LowerError, SourceLocation};

fn at(column: u32) -> SourceLocation {
    SourceLocation::new(0, column, column)
}

fn block_node() -> ParseNode {
    ParseNode::node(
        Rule::Block,
        vec![
            ParseNode::leaf(Rule::Punctuation, "{", at(0)),
            ParseNode::node(Rule::StatementList, vec![]),
            ParseNode::leaf(Rule::Punctuation, "}", at(4)),
        ],
    )
}

#[test]
fn test_span_covers_first_and_last_token() {
    let span = block_node().span();

    assert_eq!(span.start.column, 0);
    assert_eq!(span.end.column, 4);
}

#[test]
fn test_span_skips_empty_lists() {
    let node = ParseNode::node(
        Rule::ClassDefinition,
        vec![
            ParseNode::node(Rule::ClassModifier, vec![]),
            ParseNode::leaf(Rule::Keyword, "class", at(7)),
            ParseNode::node(Rule::BaseClause, vec![]),
        ],
    );

    assert_eq!(node.span().start.column, 7);
    assert_eq!(node.span().end.column, 7);
}

#[test]
fn test_missing_child() {
    let node = block_node();

    assert!(node.child(2).is_ok());
    assert_eq!(
        node.child(3),
        Err(LowerError::MissingChild {
            rule: Rule::Block,
            index: 3
        })
    );
}

#[test]
fn test_expect_rule() {
    let node = block_node();

    assert!(node.expect(Rule::Block).is_ok());
    assert_eq!(
        node.expect(Rule::IfStatement),
        Err(LowerError::UnexpectedRule {
            expected: Rule::IfStatement,
            found: Rule::Block
        })
    );
}

#[test]
fn test_inner_node_has_no_token() {
    let node = block_node();

    assert!(node.text().is_err());
    assert_eq!(node.child(0).and_then(|c| c.text()), Ok("{"));
}

#[test]
fn test_rule_kinds() {
    assert!(Rule::Identifier.is_terminal());
    assert!(!Rule::Block.is_terminal());
    assert!(Rule::ForStatement.is_statement());
    assert!(!Rule::MethodCall.is_statement());
}
