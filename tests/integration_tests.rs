//! Integration tests for the whole semantic pass.
//!
//! These tests build parse trees the way a parser adapter would, run
//! `analyze` on them and inspect the diagnostics and the resulting model.

use semantics::{
    analyze,
    ast::outline::outline_program,
    errors::errors::{ErrorType, LowerError},
    semantics::{checker::check_program, context::CheckContext},
    syntax::{
        builder::{ClassHeader, MemberHeader, TreeBuilder},
        rules::Rule,
        tree::ParseNode,
    },
};

/// A small zoo: an abstract base, two implementations and a keeper that
/// stores animals in a list.
fn zoo(b: &TreeBuilder, bird_overrides: bool) -> ParseNode {
    let animal = b.class(
        ClassHeader::class("Animal").modifier("abstract"),
        vec![
            b.field(
                MemberHeader::new("string").accessor("protected"),
                vec![b.atom("name", Some(b.string("\"unnamed\"")))],
            ),
            b.method(
                MemberHeader::new("string").public().modifier("abstract"),
                "Sound",
                &[],
                None,
            ),
            b.method(
                MemberHeader::new("string").public().modifier("virtual"),
                "Describe",
                &[],
                Some(b.block(vec![b.return_statement(Some(b.binary(
                    b.identifier("name"),
                    "+",
                    b.call(b.identifier("Sound"), vec![]),
                )))])),
            ),
        ],
    );

    let dog = b.class(
        ClassHeader::class("Dog").extends("Animal"),
        vec![b.method(
            MemberHeader::new("string").public().modifier("override"),
            "Sound",
            &[],
            Some(b.block(vec![b.return_statement(Some(b.string("\"woof\"")))])),
        )],
    );

    let bird_sound = if bird_overrides {
        MemberHeader::new("string").public().modifier("override")
    } else {
        MemberHeader::new("string").public()
    };
    let bird = b.class(
        ClassHeader::class("Bird").extends("Animal"),
        vec![b.method(
            bird_sound,
            "Sound",
            &[],
            Some(b.block(vec![b.return_statement(Some(b.string("\"tweet\"")))])),
        )],
    );

    let keeper = b.class(
        ClassHeader::class("Keeper"),
        vec![
            b.field(
                MemberHeader::new("Animal_list"),
                vec![b.atom("animals", Some(b.new_object("Animal_list", vec![])))],
            ),
            b.method(
                MemberHeader::new("int").public(),
                "Feed",
                &[],
                Some(b.block(vec![
                    b.expression_statement(b.call(
                        b.member(b.identifier("animals"), "Append"),
                        vec![b.new_object("Dog", vec![])],
                    )),
                    b.declaration("int", vec![b.atom("fed", Some(b.int("0")))]),
                    b.for_statement(
                        Some(b.declaration("int", vec![b.atom("i", Some(b.int("0")))])),
                        Some(b.binary(
                            b.identifier("i"),
                            "<",
                            b.call(b.member(b.identifier("animals"), "Count"), vec![]),
                        )),
                        Some(b.assign(b.identifier("i"), "+=", b.int("1"))),
                        b.block(vec![
                            b.declaration(
                                "Animal",
                                vec![b.atom(
                                    "animal",
                                    Some(b.call(
                                        b.member(b.identifier("animals"), "At"),
                                        vec![b.identifier("i")],
                                    )),
                                )],
                            ),
                            b.if_statement(
                                b.binary(
                                    b.call(b.member(b.identifier("animal"), "Sound"), vec![]),
                                    "==",
                                    b.string("\"\""),
                                ),
                                b.continue_statement(),
                                None,
                            ),
                            b.expression_statement(b.assign(
                                b.identifier("fed"),
                                "+=",
                                b.int("1"),
                            )),
                        ]),
                    ),
                    b.return_statement(Some(b.identifier("fed"))),
                ])),
            ),
        ],
    );

    b.program(vec![animal, dog, bird, keeper])
}

#[test]
fn test_valid_program() {
    let b = TreeBuilder::new();
    let analysis = analyze(&zoo(&b, true), "Zoo.lang").unwrap();

    assert!(
        analysis.succeeded(),
        "unexpected errors: {:?}",
        analysis
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
    );
    assert!(analysis.classes.contains("Animal_list"));
    assert_eq!(analysis.program.classes.len(), 4);
}

#[test]
fn test_missing_override_keyword() {
    let b = TreeBuilder::new();
    let analysis = analyze(&zoo(&b, false), "Zoo.lang").unwrap();

    assert!(!analysis.succeeded());
    assert_eq!(analysis.errors.len(), 1);
    let error = &analysis.errors[0];
    assert_eq!(
        error.kind(),
        &ErrorType::AbstractImplementationMethodModifierMustBeOverride {
            method: "Sound".to_string()
        }
    );
    assert_eq!(error.file(), "Zoo.lang");
    assert!(error.to_string().starts_with("Error : From (1:"));
}

#[test]
fn test_errors_in_independent_classes_accumulate() {
    let b = TreeBuilder::new();
    let tree = b.program(vec![
        b.class(ClassHeader::class("Base").modifier("concrete"), vec![]),
        b.class(ClassHeader::class("Derived").extends("Base"), vec![]),
        b.class(
            ClassHeader::class("Looper"),
            vec![b.method(
                MemberHeader::new("void"),
                "Run",
                &[],
                Some(b.block(vec![b.break_statement()])),
            )],
        ),
        b.class(ClassHeader::class("Orphan").extends("Nowhere"), vec![]),
    ]);

    let analysis = analyze(&tree, "Main.lang").unwrap();
    let names: Vec<&str> = analysis.errors.iter().map(|e| e.get_error_name()).collect();

    assert_eq!(
        names,
        vec!["ConcreteBase", "StatementMustAppearInLoop", "TypeNotFound"]
    );
}

#[test]
fn test_analysis_is_repeatable() {
    let b = TreeBuilder::new();
    let tree = zoo(&b, false);

    let first = analyze(&tree, "Zoo.lang").unwrap();
    let second = analyze(&tree, "Zoo.lang").unwrap();

    assert_eq!(first.errors, second.errors);
}

#[test]
fn test_check_program_with_context() {
    let b = TreeBuilder::new();
    let analysis = analyze(&zoo(&b, true), "Zoo.lang").unwrap();

    let mut context = CheckContext::new("Other.lang");
    let found_errors = check_program(&analysis.program, &mut context);

    assert!(!found_errors);
    assert!(!context.has_errors());
    assert_eq!(context.current_file(), "Other.lang");
}

#[test]
fn test_malformed_tree() {
    let b = TreeBuilder::new();
    let tree = ParseNode::node(Rule::Program, vec![b.block(vec![])]);

    let result = analyze(&tree, "Main.lang");

    assert_eq!(
        result.err(),
        Some(LowerError::UnexpectedRule {
            expected: Rule::ClassDefinition,
            found: Rule::Block
        })
    );
}

#[test]
fn test_outline_of_analyzed_program() {
    let b = TreeBuilder::new();
    let analysis = analyze(&zoo(&b, true), "Zoo.lang").unwrap();

    let outline = outline_program(&analysis.program);

    assert_eq!(outline.label, "Program: Count = 4");
    assert_eq!(outline.children[0].label, "Abstract Class Animal");
    assert_eq!(outline.children[1].label, "Normal Class Dog extends Animal");
}
