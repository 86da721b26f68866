use std::rc::Rc;

use crate::Span;

use super::members::{
    FieldDefinition, MemberDefinition, MemberKind, MethodDefinition, OperatorDefinition,
};

/// A name as written in the source, with its location.
///
/// Used for class names, type names, member names and variables alike.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub text: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(text: &str, span: Span) -> Self {
        Identifier {
            text: text.to_string(),
            span,
        }
    }

    /// An identifier that does not come from source, used by synthesized classes.
    pub fn synthetic(text: &str) -> Self {
        Identifier::new(text, Span::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassModifier {
    Abstract,
    Concrete,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLabel {
    Class,
    Screen,
}

/// A class (or screen) declaration.
///
/// `base` is only a name. It is resolved through the class table every time
/// it is needed, so forward references and synthesized classes behave the
/// same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinition {
    pub name: Identifier,
    pub base: Option<Identifier>,
    pub modifier: ClassModifier,
    pub label: ClassLabel,
    pub is_backend: bool,
    pub is_primitive: bool,
    pub members: Vec<MemberDefinition>,
    pub span: Span,
}

impl ClassDefinition {
    pub fn name(&self) -> &str {
        &self.name.text
    }

    pub fn base_name(&self) -> Option<&str> {
        self.base.as_ref().map(|base| base.text.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&MemberDefinition, &FieldDefinition)> {
        self.members.iter().filter_map(|member| match &member.kind {
            MemberKind::Field(field) => Some((member, field)),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = (&MemberDefinition, &MethodDefinition)> {
        self.members.iter().filter_map(|member| match &member.kind {
            MemberKind::Method(method) => Some((member, method)),
            _ => None,
        })
    }

    pub fn operators(&self) -> impl Iterator<Item = (&MemberDefinition, &OperatorDefinition)> {
        self.members.iter().filter_map(|member| match &member.kind {
            MemberKind::Operator(operator) => Some((member, operator)),
            _ => None,
        })
    }

    pub fn find_method(&self, name: &str) -> Option<&MemberDefinition> {
        self.methods()
            .find(|(_, method)| method.name.text == name)
            .map(|(member, _)| member)
    }

    /// Classes never produce a value.
    pub fn returns_a_value(&self) -> bool {
        false
    }
}

/// Every class of one compilation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub classes: Vec<Rc<ClassDefinition>>,
}
