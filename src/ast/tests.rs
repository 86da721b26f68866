//! Unit tests for lowering and the model's own predicates.

use crate::ast::{
    ast::{ClassLabel, ClassModifier, Program},
    expressions::{Expression, LiteralKind},
    members::{Accessor, MemberDefinition, MemberKind, MemberModifier, Parameter},
    outline::outline_program,
    statements::{ForInit, Statement},
};
use crate::errors::errors::LowerError;
use crate::syntax::{
    builder::{ClassHeader, MemberHeader, TreeBuilder},
    rules::Rule,
};

fn lower(tree: &crate::syntax::tree::ParseNode) -> Program {
    Program::from_parse_tree(tree).unwrap()
}

#[test]
fn test_lower_class_header() {
    let b = TreeBuilder::new();
    let tree = b.program(vec![
        b.class(ClassHeader::class("Animal").modifier("abstract"), vec![]),
        b.class(ClassHeader::screen("Menu"), vec![]),
        b.class(ClassHeader::class("Dog").extends("Animal"), vec![]),
    ]);

    let program = lower(&tree);

    assert_eq!(program.classes.len(), 3);
    assert_eq!(program.classes[0].modifier, ClassModifier::Abstract);
    assert_eq!(program.classes[0].label, ClassLabel::Class);
    assert_eq!(program.classes[1].label, ClassLabel::Screen);
    assert_eq!(program.classes[1].modifier, ClassModifier::Normal);
    assert_eq!(program.classes[2].base_name(), Some("Animal"));
    assert_eq!(program.classes[0].base_name(), None);
}

#[test]
fn test_lower_members() {
    let b = TreeBuilder::new();
    let tree = b.program(vec![b.class(
        ClassHeader::class("Counter"),
        vec![
            b.field(
                MemberHeader::new("int"),
                vec![b.atom("count", Some(b.int("0"))), b.atom("step", None)],
            ),
            b.method(
                MemberHeader::new("void").public().modifier("virtual"),
                "Reset",
                &[("int", "value")],
                Some(b.block(vec![])),
            ),
            b.method(
                MemberHeader::new("int").modifier("abstract"),
                "Next",
                &[],
                None,
            ),
            b.operator(
                MemberHeader::new("Counter").public().static_member(),
                "+",
                &[("Counter", "left"), ("int", "right")],
                Some(b.block(vec![])),
            ),
        ],
    )]);

    let program = lower(&tree);
    let class = &program.classes[0];

    assert_eq!(class.members.len(), 4);
    let field = &class.members[0];
    assert_eq!(field.accessor, Accessor::Private);
    assert_eq!(field.owner, "Counter");
    match &field.kind {
        MemberKind::Field(definition) => {
            assert_eq!(definition.atoms.len(), 2);
            assert_eq!(definition.atoms[0].name.text, "count");
            assert!(definition.atoms[0].value.is_some());
            assert!(definition.atoms[1].value.is_none());
        }
        other => panic!("expected a field, got {:?}", other),
    }

    let reset = &class.members[1];
    assert_eq!(reset.accessor, Accessor::Public);
    assert_eq!(reset.modifier, MemberModifier::Virtual);
    assert_eq!(reset.name(), "Reset");
    assert_eq!(reset.parameters()[0].name.text, "value");
    assert!(reset.body().is_some());

    let next = &class.members[2];
    assert_eq!(next.modifier, MemberModifier::Abstract);
    assert!(next.body().is_none());

    let operator = &class.members[3];
    assert!(operator.is_static);
    assert_eq!(operator.name(), "+");
    assert_eq!(
        operator.operator_key(),
        Some("+_2_Counter_int".to_string())
    );
}

#[test]
fn test_lower_statements() {
    let b = TreeBuilder::new();
    let body = b.block(vec![
        b.for_statement(
            Some(b.declaration("int", vec![b.atom("i", Some(b.int("0")))])),
            Some(b.binary(b.identifier("i"), "<", b.int("10"))),
            Some(b.assign(b.identifier("i"), "+=", b.int("1"))),
            b.block(vec![b.continue_statement()]),
        ),
        b.expression_statement(b.parenthesized(b.string("\"hi\""))),
        b.return_statement(None),
    ]);
    let tree = b.program(vec![b.class(
        ClassHeader::class("Main"),
        vec![b.method(MemberHeader::new("void"), "Run", &[], Some(body))],
    )]);

    let program = lower(&tree);
    let block = program.classes[0].members[0].body().unwrap();

    assert_eq!(block.statements.len(), 3);
    match &block.statements[0] {
        Statement::For(stmt) => {
            assert!(matches!(stmt.init, Some(ForInit::Declaration(_))));
            assert!(stmt.condition.is_some());
            assert!(stmt.step.is_some());
        }
        other => panic!("expected a for statement, got {:?}", other),
    }
    match &block.statements[1] {
        Statement::Expression(stmt) => assert!(matches!(
            stmt.expression,
            Expression::Literal {
                kind: LiteralKind::String,
                ..
            }
        )),
        other => panic!("expected an expression statement, got {:?}", other),
    }
    match &block.statements[2] {
        Statement::Return(stmt) => assert!(stmt.value.is_none()),
        other => panic!("expected a return statement, got {:?}", other),
    }
}

#[test]
fn test_lower_rejects_wrong_root() {
    let b = TreeBuilder::new();
    let tree = b.block(vec![]);

    assert_eq!(
        Program::from_parse_tree(&tree),
        Err(LowerError::UnexpectedRule {
            expected: Rule::Program,
            found: Rule::Block
        })
    );
}

#[test]
fn test_lower_rejects_unknown_modifier() {
    let b = TreeBuilder::new();
    let tree = b.program(vec![b.class(ClassHeader::class("A").modifier("sealed"), vec![])]);

    assert!(matches!(
        Program::from_parse_tree(&tree),
        Err(LowerError::UnknownKeyword { .. })
    ));
}

#[test]
fn test_returns_a_value() {
    let b = TreeBuilder::new();
    let body = b.block(vec![
        b.if_statement(
            b.boolean(true),
            b.return_statement(Some(b.int("1"))),
            Some(b.block(vec![b.return_statement(Some(b.int("2")))])),
        ),
        b.if_statement(b.boolean(true), b.return_statement(Some(b.int("1"))), None),
        b.while_statement(b.boolean(true), b.return_statement(Some(b.int("1")))),
        b.do_while_statement(b.return_statement(Some(b.int("1"))), b.boolean(true)),
    ]);
    let tree = b.program(vec![b.class(
        ClassHeader::class("Main"),
        vec![b.method(MemberHeader::new("int"), "Get", &[], Some(body))],
    )]);

    let program = lower(&tree);
    let block = program.classes[0].members[0].body().unwrap();

    assert!(block.statements[0].returns_a_value());
    assert!(!block.statements[1].returns_a_value());
    assert!(!block.statements[2].returns_a_value());
    assert!(block.statements[3].returns_a_value());
    assert!(block.returns_a_value());
    assert!(!program.classes[0].returns_a_value());
}

#[test]
fn test_signature_match() {
    let speak = MemberDefinition::builtin_method(
        "Animal",
        "Speak",
        "string",
        vec![Parameter::new("int", "times")],
    );
    let same = MemberDefinition::builtin_method(
        "Dog",
        "Speak",
        "string",
        vec![Parameter::new("int", "count")],
    );
    let other_return = MemberDefinition::builtin_method(
        "Dog",
        "Speak",
        "void",
        vec![Parameter::new("int", "times")],
    );
    let other_parameters = MemberDefinition::builtin_method("Dog", "Speak", "string", vec![]);

    assert!(speak.does_match_signature(&same));
    assert!(!speak.does_match_signature(&other_return));
    assert!(!speak.does_match_signature(&other_parameters));
}

#[test]
fn test_outline() {
    let b = TreeBuilder::new();
    let tree = b.program(vec![b.class(
        ClassHeader::class("Dog").extends("Animal"),
        vec![b.method(
            MemberHeader::new("void"),
            "Bark",
            &[],
            Some(b.block(vec![b.break_statement()])),
        )],
    )]);

    let outline = outline_program(&lower(&tree));

    assert_eq!(outline.label, "Program: Count = 1");
    let class = &outline.children[0];
    assert_eq!(class.label, "Normal Class Dog extends Animal");
    assert_eq!(class.children[0].label, "Members: Count = 1");
    let method = &class.children[0].children[0];
    assert_eq!(method.label, "Method: Bark");
    let body = method.children.last().unwrap();
    assert_eq!(body.label, "Block: Count = 1");
    assert_eq!(body.children[0].label, "Break Statement");
}
