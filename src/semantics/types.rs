//! The type model.
//!
//! Types are closed: a primitive, a reference to a class by name, a list of
//! some element type, or the `void` marker. Class identity is the class
//! name, since the class table maps every name to exactly one definition.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use super::classes::ClassTable;

lazy_static! {
    /// `<element>_list`, where the element may itself be a list.
    static ref LIST_TYPE: Regex = Regex::new(r"^(?P<element>\w+)_list$").unwrap();
}

/// Returns the element type name of a list type name such as `int_list`.
pub fn list_element_name(name: &str) -> Option<&str> {
    LIST_TYPE
        .captures(name)
        .and_then(|captures| captures.name("element"))
        .map(|element| element.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Char,
    String,
    Double,
    Float,
    Byte,
    Short,
    Int,
    Long,
}

impl Primitive {
    pub const ALL: [Primitive; 9] = [
        Primitive::Bool,
        Primitive::Char,
        Primitive::String,
        Primitive::Double,
        Primitive::Float,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Primitive> {
        Primitive::ALL
            .into_iter()
            .find(|primitive| primitive.keyword() == keyword)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::String => "string",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Primitive::Double
                | Primitive::Float
                | Primitive::Byte
                | Primitive::Short
                | Primitive::Int
                | Primitive::Long
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(Primitive),
    ClassRef(String),
    ListOf(Box<Type>),
    Void,
}

impl Type {
    pub fn int() -> Type {
        Type::Primitive(Primitive::Int)
    }

    pub fn bool() -> Type {
        Type::Primitive(Primitive::Bool)
    }

    pub fn list_of(element: Type) -> Type {
        Type::ListOf(Box::new(element))
    }

    /// Structural equality: same variant, same class name for class
    /// references, equal element types for lists.
    pub fn is_equal_to(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Primitive(mine), Type::Primitive(theirs)) => mine == theirs,
            (Type::ClassRef(mine), Type::ClassRef(theirs)) => mine == theirs,
            (Type::ListOf(mine), Type::ListOf(theirs)) => mine.is_equal_to(theirs),
            (Type::Void, Type::Void) => true,
            _ => false,
        }
    }

    /// Whether a value of this type may be stored where `target` is expected.
    ///
    /// Equal types always are; a class reference also is when `target` names
    /// one of its ancestors. Nothing else converts implicitly.
    pub fn is_assignable_to(&self, target: &Type, classes: &ClassTable) -> bool {
        if self.is_equal_to(target) {
            return true;
        }
        match (self, target) {
            (Type::ClassRef(class), Type::ClassRef(ancestor)) => {
                classes.is_ancestor(ancestor, class)
            }
            _ => false,
        }
    }

    /// Name of the class that holds this type's members.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Type::Void => None,
            _ => Some(self.name()),
        }
    }

    /// The name this type is written as in source.
    pub fn name(&self) -> String {
        match self {
            Type::Primitive(primitive) => primitive.keyword().to_string(),
            Type::ClassRef(name) => name.clone(),
            Type::ListOf(element) => format!("{}_list", element.name()),
            Type::Void => "void".to_string(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Primitive(Primitive::Bool))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Primitive(primitive) if primitive.is_numeric())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolves a type name as written in source.
///
/// List types synthesize their backend class on first use; later requests
/// find it in the table. Returns `None` when the name is not a type.
pub fn resolve_type(name: &str, classes: &mut ClassTable) -> Option<Type> {
    if name == "void" {
        return Some(Type::Void);
    }
    if let Some(primitive) = Primitive::from_keyword(name) {
        return Some(Type::Primitive(primitive));
    }
    if let Some(element) = list_element_name(name) {
        match resolve_type(element, classes) {
            Some(Type::Void) | None => {}
            Some(element) => {
                classes.ensure_list(&element);
                return Some(Type::list_of(element));
            }
        }
    }
    if classes.contains(name) {
        return Some(Type::ClassRef(name.to_string()));
    }

    None
}

/// What an expression denotes once checked.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionType {
    /// A value; `assignable` values may appear on the left of `=`.
    Value { ty: Type, assignable: bool },
    /// A type name used as an expression, as in `Math.Max(a, b)`.
    TypeName(Type),
    /// A method not yet called.
    MethodGroup {
        class: String,
        name: String,
        through_type: bool,
    },
}

impl ExpressionType {
    pub fn value(ty: Type) -> Self {
        ExpressionType::Value {
            ty,
            assignable: false,
        }
    }

    pub fn value_type(&self) -> Option<&Type> {
        match self {
            ExpressionType::Value { ty, .. } => Some(ty),
            _ => None,
        }
    }

    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            ExpressionType::Value {
                assignable: true,
                ..
            }
        )
    }

    pub fn describe(&self) -> String {
        match self {
            ExpressionType::Value { ty, .. } => ty.name(),
            ExpressionType::TypeName(ty) => format!("type {}", ty.name()),
            ExpressionType::MethodGroup { name, .. } => format!("method group {}", name),
        }
    }
}
