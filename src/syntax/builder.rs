//! Construction helpers for parse trees.
//!
//! Hosts that adapt a parser, and the test suites, build trees through
//! these helpers so the child layouts always match what lowering expects.
//! Every terminal gets the next free position, one terminal per column.

use std::cell::Cell;

use crate::SourceLocation;

use super::{rules::Rule, tree::ParseNode};

/// Header of a class declaration.
#[derive(Debug, Clone, Copy)]
pub struct ClassHeader<'s> {
    pub name: &'s str,
    pub base: Option<&'s str>,
    pub modifier: Option<&'s str>,
    pub label: &'s str,
    pub primitive: bool,
    pub backend: bool,
}

impl<'s> ClassHeader<'s> {
    pub fn class(name: &'s str) -> Self {
        ClassHeader {
            name,
            base: None,
            modifier: None,
            label: "class",
            primitive: false,
            backend: false,
        }
    }

    pub fn screen(name: &'s str) -> Self {
        ClassHeader {
            label: "screen",
            ..ClassHeader::class(name)
        }
    }

    pub fn extends(mut self, base: &'s str) -> Self {
        self.base = Some(base);
        self
    }

    /// `abstract` or `concrete`.
    pub fn modifier(mut self, modifier: &'s str) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn primitive(mut self) -> Self {
        self.primitive = true;
        self
    }

    pub fn backend(mut self) -> Self {
        self.backend = true;
        self
    }
}

/// Header shared by fields, methods and operators.
#[derive(Debug, Clone, Copy)]
pub struct MemberHeader<'s> {
    pub accessor: Option<&'s str>,
    pub modifier: Option<&'s str>,
    pub is_static: bool,
    pub type_name: &'s str,
}

impl<'s> MemberHeader<'s> {
    pub fn new(type_name: &'s str) -> Self {
        MemberHeader {
            accessor: None,
            modifier: None,
            is_static: false,
            type_name,
        }
    }

    pub fn public(self) -> Self {
        self.accessor("public")
    }

    pub fn accessor(mut self, accessor: &'s str) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// `virtual`, `abstract` or `override`.
    pub fn modifier(mut self, modifier: &'s str) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    next: Cell<u32>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    fn terminal(&self, rule: Rule, text: &str) -> ParseNode {
        let position = self.next.get();
        self.next.set(position + 1);
        ParseNode::leaf(rule, text, SourceLocation::new(0, position, position))
    }

    fn optional(&self, rule: Rule, child: Option<ParseNode>) -> ParseNode {
        ParseNode::node(rule, child.into_iter().collect())
    }

    fn optional_keyword(&self, rule: Rule, keyword: Option<&str>) -> ParseNode {
        self.optional(rule, keyword.map(|k| self.keyword(k)))
    }

    pub fn identifier(&self, text: &str) -> ParseNode {
        self.terminal(Rule::Identifier, text)
    }

    pub fn keyword(&self, text: &str) -> ParseNode {
        self.terminal(Rule::Keyword, text)
    }

    pub fn punctuation(&self, text: &str) -> ParseNode {
        self.terminal(Rule::Punctuation, text)
    }

    pub fn operator_token(&self, text: &str) -> ParseNode {
        self.terminal(Rule::Operator, text)
    }

    pub fn int(&self, text: &str) -> ParseNode {
        self.terminal(Rule::IntegerLiteral, text)
    }

    pub fn real(&self, text: &str) -> ParseNode {
        self.terminal(Rule::RealLiteral, text)
    }

    pub fn string(&self, text: &str) -> ParseNode {
        self.terminal(Rule::StringLiteral, text)
    }

    pub fn character(&self, text: &str) -> ParseNode {
        self.terminal(Rule::CharLiteral, text)
    }

    pub fn boolean(&self, value: bool) -> ParseNode {
        self.terminal(Rule::BooleanLiteral, if value { "true" } else { "false" })
    }

    // Classes and members

    pub fn program(&self, classes: Vec<ParseNode>) -> ParseNode {
        ParseNode::node(Rule::Program, classes)
    }

    pub fn class(&self, header: ClassHeader<'_>, members: Vec<ParseNode>) -> ParseNode {
        let base = header
            .base
            .map(|base| vec![self.punctuation(":"), self.identifier(base)])
            .unwrap_or_default();
        ParseNode::node(
            Rule::ClassDefinition,
            vec![
                self.optional_keyword(Rule::ClassModifier, header.modifier),
                self.optional_keyword(
                    Rule::PrimitiveMarker,
                    header.primitive.then_some("primitive"),
                ),
                self.optional_keyword(Rule::BackendMarker, header.backend.then_some("backend")),
                self.keyword(header.label),
                self.identifier(header.name),
                ParseNode::node(Rule::BaseClause, base),
                self.punctuation("{"),
                ParseNode::node(Rule::MemberList, members),
                self.punctuation("}"),
            ],
        )
    }

    fn member_prefix(&self, header: MemberHeader<'_>) -> Vec<ParseNode> {
        vec![
            self.optional_keyword(Rule::Accessor, header.accessor),
            self.optional_keyword(Rule::MemberModifier, header.modifier),
            self.optional_keyword(Rule::StaticMarker, header.is_static.then_some("static")),
            self.identifier(header.type_name),
        ]
    }

    pub fn atom(&self, name: &str, value: Option<ParseNode>) -> ParseNode {
        let mut children = vec![self.identifier(name)];
        if let Some(value) = value {
            children.push(self.operator_token("="));
            children.push(value);
        }
        ParseNode::node(Rule::FieldAtom, children)
    }

    pub fn field(&self, header: MemberHeader<'_>, atoms: Vec<ParseNode>) -> ParseNode {
        let mut children = self.member_prefix(header);
        children.push(ParseNode::node(Rule::FieldAtomList, atoms));
        children.push(self.punctuation(";"));
        ParseNode::node(Rule::FieldDefinition, children)
    }

    fn parameters(&self, parameters: &[(&str, &str)]) -> ParseNode {
        ParseNode::node(
            Rule::ParameterList,
            parameters
                .iter()
                .map(|(type_name, name)| {
                    ParseNode::node(
                        Rule::Parameter,
                        vec![self.identifier(type_name), self.identifier(name)],
                    )
                })
                .collect(),
        )
    }

    pub fn method(
        &self,
        header: MemberHeader<'_>,
        name: &str,
        parameters: &[(&str, &str)],
        body: Option<ParseNode>,
    ) -> ParseNode {
        let mut children = self.member_prefix(header);
        children.push(self.identifier(name));
        children.push(self.punctuation("("));
        children.push(self.parameters(parameters));
        children.push(self.punctuation(")"));
        children.push(body.unwrap_or_else(|| self.punctuation(";")));
        ParseNode::node(Rule::MethodDefinition, children)
    }

    pub fn operator(
        &self,
        header: MemberHeader<'_>,
        symbol: &str,
        parameters: &[(&str, &str)],
        body: Option<ParseNode>,
    ) -> ParseNode {
        let mut children = self.member_prefix(header);
        children.push(self.keyword("operator"));
        children.push(self.operator_token(symbol));
        children.push(self.punctuation("("));
        children.push(self.parameters(parameters));
        children.push(self.punctuation(")"));
        children.push(body.unwrap_or_else(|| self.punctuation(";")));
        ParseNode::node(Rule::OperatorDefinition, children)
    }

    // Statements

    pub fn block(&self, statements: Vec<ParseNode>) -> ParseNode {
        ParseNode::node(
            Rule::Block,
            vec![
                self.punctuation("{"),
                ParseNode::node(Rule::StatementList, statements),
                self.punctuation("}"),
            ],
        )
    }

    pub fn return_statement(&self, value: Option<ParseNode>) -> ParseNode {
        let mut children = vec![self.keyword("return")];
        children.extend(value);
        children.push(self.punctuation(";"));
        ParseNode::node(Rule::ReturnStatement, children)
    }

    pub fn break_statement(&self) -> ParseNode {
        ParseNode::node(
            Rule::BreakStatement,
            vec![self.keyword("break"), self.punctuation(";")],
        )
    }

    pub fn continue_statement(&self) -> ParseNode {
        ParseNode::node(
            Rule::ContinueStatement,
            vec![self.keyword("continue"), self.punctuation(";")],
        )
    }

    pub fn declaration(&self, type_name: &str, atoms: Vec<ParseNode>) -> ParseNode {
        ParseNode::node(
            Rule::DeclarationStatement,
            vec![
                self.identifier(type_name),
                ParseNode::node(Rule::FieldAtomList, atoms),
                self.punctuation(";"),
            ],
        )
    }

    pub fn while_statement(&self, condition: ParseNode, body: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::WhileStatement,
            vec![
                self.keyword("while"),
                self.punctuation("("),
                condition,
                self.punctuation(")"),
                body,
            ],
        )
    }

    pub fn do_while_statement(&self, body: ParseNode, condition: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::DoWhileStatement,
            vec![
                self.keyword("do"),
                body,
                self.keyword("while"),
                self.punctuation("("),
                condition,
                self.punctuation(")"),
                self.punctuation(";"),
            ],
        )
    }

    pub fn if_statement(
        &self,
        condition: ParseNode,
        then_branch: ParseNode,
        else_branch: Option<ParseNode>,
    ) -> ParseNode {
        let else_clause = else_branch
            .map(|branch| vec![self.keyword("else"), branch])
            .unwrap_or_default();
        ParseNode::node(
            Rule::IfStatement,
            vec![
                self.keyword("if"),
                self.punctuation("("),
                condition,
                self.punctuation(")"),
                then_branch,
                ParseNode::node(Rule::ElseClause, else_clause),
            ],
        )
    }

    pub fn for_statement(
        &self,
        init: Option<ParseNode>,
        condition: Option<ParseNode>,
        step: Option<ParseNode>,
        body: ParseNode,
    ) -> ParseNode {
        ParseNode::node(
            Rule::ForStatement,
            vec![
                self.keyword("for"),
                self.punctuation("("),
                self.optional(Rule::ForInit, init),
                self.punctuation(";"),
                self.optional(Rule::ForCondition, condition),
                self.punctuation(";"),
                self.optional(Rule::ForStep, step),
                self.punctuation(")"),
                body,
            ],
        )
    }

    pub fn expression_statement(&self, expression: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::ExpressionStatement,
            vec![expression, self.punctuation(";")],
        )
    }

    // Expressions

    pub fn member(&self, target: ParseNode, name: &str) -> ParseNode {
        ParseNode::node(
            Rule::MemberAccess,
            vec![target, self.punctuation("."), self.identifier(name)],
        )
    }

    pub fn call(&self, callee: ParseNode, arguments: Vec<ParseNode>) -> ParseNode {
        ParseNode::node(
            Rule::MethodCall,
            vec![
                callee,
                self.punctuation("("),
                ParseNode::node(Rule::ArgumentList, arguments),
                self.punctuation(")"),
            ],
        )
    }

    pub fn new_object(&self, class_name: &str, arguments: Vec<ParseNode>) -> ParseNode {
        ParseNode::node(
            Rule::NewExpression,
            vec![
                self.keyword("new"),
                self.identifier(class_name),
                self.punctuation("("),
                ParseNode::node(Rule::ArgumentList, arguments),
                self.punctuation(")"),
            ],
        )
    }

    pub fn unary(&self, operator: &str, operand: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::UnaryExpression,
            vec![self.operator_token(operator), operand],
        )
    }

    pub fn binary(&self, left: ParseNode, operator: &str, right: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::BinaryExpression,
            vec![left, self.operator_token(operator), right],
        )
    }

    pub fn assign(&self, target: ParseNode, operator: &str, value: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::AssignmentExpression,
            vec![target, self.operator_token(operator), value],
        )
    }

    pub fn parenthesized(&self, expression: ParseNode) -> ParseNode {
        ParseNode::node(
            Rule::ParenthesizedExpression,
            vec![self.punctuation("("), expression, self.punctuation(")")],
        )
    }
}
