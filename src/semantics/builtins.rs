//! Classes the runtime provides instead of user source.

use crate::{
    ast::{
        ast::{ClassDefinition, ClassLabel, ClassModifier, Identifier},
        members::{MemberDefinition, Parameter},
    },
    Span,
};

use super::types::Type;

/// Builds the backend class behind `<element>_list`.
pub fn generate_list(element: &Type) -> ClassDefinition {
    let element = element.name();
    let name = format!("{}_list", element);
    let method = |method: &str, return_type: &str, parameters: Vec<Parameter>| {
        MemberDefinition::builtin_method(&name, method, return_type, parameters)
    };

    let members = vec![
        method("Append", "void", vec![Parameter::new(&element, "item")]),
        method("RemoveAt", "void", vec![Parameter::new("int", "position")]),
        method("Clear", "void", vec![]),
        method("At", &element, vec![Parameter::new("int", "position")]),
        method(
            "Replace",
            "void",
            vec![
                Parameter::new("int", "position"),
                Parameter::new(&element, "item"),
            ],
        ),
        method(
            "Insert",
            "void",
            vec![
                Parameter::new("int", "position"),
                Parameter::new(&element, "item"),
            ],
        ),
        method("Count", "int", vec![]),
    ];

    ClassDefinition {
        name: Identifier::synthetic(&name),
        base: None,
        modifier: ClassModifier::Concrete,
        label: ClassLabel::Class,
        is_backend: true,
        is_primitive: false,
        members,
        span: Span::default(),
    }
}
