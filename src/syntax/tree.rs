use crate::{errors::errors::LowerError, SourceLocation, Span};

use super::rules::Rule;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub location: SourceLocation,
}

/// One node of the tree produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub rule: Rule,
    pub token: Option<Token>,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// Creates an inner node.
    pub fn node(rule: Rule, children: Vec<ParseNode>) -> Self {
        ParseNode {
            rule,
            token: None,
            children,
        }
    }

    /// Creates a terminal node.
    pub fn leaf(rule: Rule, text: &str, location: SourceLocation) -> Self {
        ParseNode {
            rule,
            token: Some(Token {
                text: text.to_string(),
                location,
            }),
            children: vec![],
        }
    }

    pub fn expect(&self, rule: Rule) -> Result<&Self, LowerError> {
        if self.rule == rule {
            Ok(self)
        } else {
            Err(LowerError::UnexpectedRule {
                expected: rule,
                found: self.rule,
            })
        }
    }

    pub fn child(&self, index: usize) -> Result<&ParseNode, LowerError> {
        self.children.get(index).ok_or(LowerError::MissingChild {
            rule: self.rule,
            index,
        })
    }

    /// The single child of an optional-element list node, if any.
    pub fn optional(&self) -> Option<&ParseNode> {
        self.children.first()
    }

    pub fn token(&self) -> Result<&Token, LowerError> {
        self.token
            .as_ref()
            .ok_or(LowerError::MissingToken { rule: self.rule })
    }

    pub fn text(&self) -> Result<&str, LowerError> {
        Ok(&self.token()?.text)
    }

    /// Location of the first token under this node.
    pub fn first_location(&self) -> Option<SourceLocation> {
        match &self.token {
            Some(token) => Some(token.location),
            None => self.children.iter().find_map(|c| c.first_location()),
        }
    }

    /// Location of the last token under this node.
    pub fn last_location(&self) -> Option<SourceLocation> {
        match &self.token {
            Some(token) => Some(token.location),
            None => self.children.iter().rev().find_map(|c| c.last_location()),
        }
    }

    /// Span from the first to the last token of this rule instance.
    ///
    /// Empty optional lists have no tokens and get a default span.
    pub fn span(&self) -> Span {
        match (self.first_location(), self.last_location()) {
            (Some(start), Some(end)) => Span::new(start, end),
            _ => Span::default(),
        }
    }
}
