//! Expression typing.
//!
//! `resolve_expression` reports what is wrong with an expression and returns
//! `None`, or returns what the expression denotes.

use crate::{
    ast::{
        ast::{ClassModifier, Identifier},
        expressions::{Expression, LiteralKind},
        members::Accessor,
    },
    errors::errors::ErrorType,
    Span,
};

use super::{
    context::CheckContext,
    scope::ScopeStack,
    types::{ExpressionType, Primitive, Type},
};

pub fn resolve_expression(
    expression: &Expression,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    match expression {
        Expression::Literal { kind, .. } => Some(ExpressionType::value(literal_type(*kind))),
        Expression::Identifier(identifier) => resolve_identifier(identifier, scopes, ctx),
        Expression::MemberAccess { target, member, .. } => {
            resolve_member_access(target, member, scopes, ctx)
        }
        Expression::Call {
            callee,
            arguments,
            span,
        } => resolve_call(callee, arguments, *span, scopes, ctx),
        Expression::New {
            class_name,
            arguments,
            span,
        } => resolve_new(class_name, arguments, *span, scopes, ctx),
        Expression::Unary {
            operator,
            operand,
            span,
        } => resolve_unary(operator, operand, *span, scopes, ctx),
        Expression::Binary {
            left,
            operator,
            right,
            span,
        } => resolve_binary(left, operator, right, *span, scopes, ctx),
        Expression::Assignment {
            target,
            operator,
            value,
            span,
        } => resolve_assignment(target, operator, value, *span, scopes, ctx),
    }
}

/// Checks that `value` may initialize a variable or field of type `declared`.
pub fn check_initializer(
    declared: &Type,
    value: &Expression,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> bool {
    match resolve_expression(value, scopes, ctx) {
        None => true,
        Some(ExpressionType::Value { ty, .. }) => {
            if ty.is_assignable_to(declared, &ctx.classes) {
                return false;
            }
            ctx.report(
                ErrorType::ExpressionDoesnotMatchType {
                    expected: declared.name(),
                    found: ty.name(),
                },
                value.span(),
            );
            true
        }
        Some(_) => {
            ctx.report(ErrorType::CannotAssignRHSToLHS, value.span());
            true
        }
    }
}

fn literal_type(kind: LiteralKind) -> Type {
    Type::Primitive(match kind {
        LiteralKind::Integer => Primitive::Int,
        LiteralKind::Real => Primitive::Double,
        LiteralKind::String => Primitive::String,
        LiteralKind::Char => Primitive::Char,
        LiteralKind::Boolean => Primitive::Bool,
    })
}

/// Variables first, then type names, then methods of the current class.
fn resolve_identifier(
    identifier: &Identifier,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let name = &identifier.text;
    if let Some(variable) = scopes.lookup(name) {
        return Some(ExpressionType::Value {
            ty: variable.ty.clone(),
            assignable: variable.assignable,
        });
    }

    match ctx.resolve_type(name) {
        Some(Type::Void) | None => {}
        Some(ty) => return Some(ExpressionType::TypeName(ty)),
    }

    if let Some(class) = scopes.current_class() {
        let owner = ctx
            .classes
            .lineage(class.name())
            .into_iter()
            .find(|candidate| candidate.find_method(name).is_some());
        if let Some(owner) = owner {
            return Some(ExpressionType::MethodGroup {
                class: owner.name().to_string(),
                name: name.clone(),
                through_type: false,
            });
        }
    }

    ctx.report(
        ErrorType::IdentifierNotFound { name: name.clone() },
        identifier.span,
    );
    None
}

enum FoundKind {
    Field { type_name: String },
    Method { name: String },
}

struct FoundMember {
    owner: String,
    accessor: Accessor,
    is_static: bool,
    kind: FoundKind,
}

/// Searches the class chain nearest first; fields before methods.
fn find_member(ctx: &CheckContext, class_name: &str, name: &str) -> Option<FoundMember> {
    for class in ctx.classes.lineage(class_name) {
        for (member, field) in class.fields() {
            if field.atoms.iter().any(|atom| atom.name.text == name) {
                return Some(FoundMember {
                    owner: class.name().to_string(),
                    accessor: member.accessor,
                    is_static: member.is_static,
                    kind: FoundKind::Field {
                        type_name: member.declared_type.text.clone(),
                    },
                });
            }
        }
        if let Some(member) = class.find_method(name) {
            return Some(FoundMember {
                owner: class.name().to_string(),
                accessor: member.accessor,
                is_static: member.is_static,
                kind: FoundKind::Method {
                    name: name.to_string(),
                },
            });
        }
    }

    None
}

fn is_accessible(member: &FoundMember, scopes: &ScopeStack, ctx: &CheckContext) -> bool {
    let current = scopes.current_class().map(|class| class.name());
    match member.accessor {
        Accessor::Public => true,
        Accessor::Private => current == Some(member.owner.as_str()),
        Accessor::Protected => current.is_some_and(|current| {
            current == member.owner || ctx.classes.is_ancestor(&member.owner, current)
        }),
    }
}

fn resolve_member_access(
    target: &Expression,
    member: &Identifier,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let target_type = resolve_expression(target, scopes, ctx)?;
    let (ty, through_type) = match &target_type {
        ExpressionType::Value { ty, .. } => (ty.clone(), false),
        ExpressionType::TypeName(ty) => (ty.clone(), true),
        ExpressionType::MethodGroup { .. } => {
            ctx.report(
                ErrorType::MemberNotFound {
                    member: member.text.clone(),
                    type_name: target_type.describe(),
                },
                member.span,
            );
            return None;
        }
    };

    let found = match ty.class_name() {
        Some(class_name) => find_member(ctx, &class_name, &member.text),
        None => None,
    };
    let Some(found) = found else {
        ctx.report(
            ErrorType::MemberNotFound {
                member: member.text.clone(),
                type_name: ty.name(),
            },
            member.span,
        );
        return None;
    };

    if !is_accessible(&found, scopes, ctx) {
        ctx.report(
            ErrorType::MemberNotAccessible {
                member: member.text.clone(),
            },
            member.span,
        );
        return None;
    }
    if found.is_static != through_type {
        ctx.report(
            ErrorType::StaticMemberMismatch {
                member: member.text.clone(),
            },
            member.span,
        );
        return None;
    }

    match found.kind {
        FoundKind::Field { type_name } => {
            let field_type = ctx.expect_type(&Identifier::new(&type_name, member.span))?;
            Some(ExpressionType::Value {
                ty: field_type,
                assignable: true,
            })
        }
        FoundKind::Method { name } => Some(ExpressionType::MethodGroup {
            class: found.owner,
            name,
            through_type,
        }),
    }
}

/// True when every argument may be passed for the parameter in its position.
fn accepts(ctx: &mut CheckContext, parameters: &[String], arguments: &[&Type]) -> bool {
    if parameters.len() != arguments.len() {
        return false;
    }
    let parameters: Vec<Option<Type>> = parameters
        .iter()
        .map(|parameter| ctx.resolve_type(parameter))
        .collect();

    parameters
        .iter()
        .zip(arguments)
        .all(|(parameter, argument)| {
            parameter
                .as_ref()
                .is_some_and(|parameter| argument.is_assignable_to(parameter, &ctx.classes))
        })
}

fn resolve_call(
    callee: &Expression,
    arguments: &[Expression],
    span: Span,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let callee_type = resolve_expression(callee, scopes, ctx)?;

    let mut argument_types = Vec::with_capacity(arguments.len());
    let mut arguments_failed = false;
    for argument in arguments {
        match resolve_expression(argument, scopes, ctx) {
            Some(argument_type) => argument_types.push(argument_type),
            None => arguments_failed = true,
        }
    }

    let ExpressionType::MethodGroup { class, name, .. } = callee_type else {
        ctx.report(ErrorType::NotAMethod, callee.span());
        return None;
    };
    if arguments_failed {
        return None;
    }

    let signature = ctx.classes.lineage(&class).into_iter().find_map(|owner| {
        owner.find_method(&name).map(|method| {
            let parameters: Vec<String> = method
                .parameters()
                .iter()
                .map(|parameter| parameter.type_name.text.clone())
                .collect();
            (parameters, method.declared_type.text.clone())
        })
    });
    let Some((parameters, return_type)) = signature else {
        ctx.report(
            ErrorType::MemberNotFound {
                member: name,
                type_name: class,
            },
            callee.span(),
        );
        return None;
    };

    let values: Option<Vec<&Type>> = argument_types
        .iter()
        .map(ExpressionType::value_type)
        .collect();
    let matches = values.is_some_and(|values| accepts(ctx, &parameters, &values));
    if !matches {
        ctx.report(ErrorType::ArgumentsDoNotMatch { method: name }, span);
        return None;
    }

    // An unknown return type is reported by the method's own check.
    let return_type = ctx.resolve_type(&return_type)?;
    Some(ExpressionType::value(return_type))
}

fn resolve_new(
    class_name: &Identifier,
    arguments: &[Expression],
    span: Span,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let ty = ctx.expect_type(class_name)?;
    let instantiable = match &ty {
        Type::ClassRef(name) => ctx.classes.get(name).is_some_and(|class| {
            class.modifier != ClassModifier::Abstract && !class.is_primitive
        }),
        Type::ListOf(_) => true,
        Type::Primitive(_) | Type::Void => false,
    };
    if !instantiable {
        ctx.report(
            ErrorType::CannotInstantiate {
                type_name: ty.name(),
            },
            class_name.span,
        );
        return None;
    }

    if !arguments.is_empty() {
        for argument in arguments {
            resolve_expression(argument, scopes, ctx);
        }
        ctx.report(ErrorType::ArgumentsDoNotMatch { method: ty.name() }, span);
        return None;
    }

    Some(ExpressionType::value(ty))
}

fn resolve_unary(
    operator: &str,
    operand: &Expression,
    span: Span,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let operand_type = resolve_expression(operand, scopes, ctx)?;
    let result = match operand_type.value_type() {
        Some(ty) => match operator {
            "-" | "+" if ty.is_numeric() => Some(ty.clone()),
            "!" if ty.is_bool() => Some(ty.clone()),
            _ => user_operator(operator, &[ty], ctx),
        },
        None => None,
    };

    match result {
        Some(ty) => Some(ExpressionType::value(ty)),
        None => {
            ctx.report(
                ErrorType::OperatorNotDefined {
                    operator: operator.to_string(),
                    operands: operand_type.describe(),
                },
                span,
            );
            None
        }
    }
}

fn resolve_binary(
    left: &Expression,
    operator: &str,
    right: &Expression,
    span: Span,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let left_type = resolve_expression(left, scopes, ctx);
    let right_type = resolve_expression(right, scopes, ctx);
    let (left_type, right_type) = (left_type?, right_type?);

    let result = match (left_type.value_type(), right_type.value_type()) {
        (Some(left), Some(right)) => binary_result(operator, left, right, ctx),
        _ => None,
    };

    match result {
        Some(ty) => Some(ExpressionType::value(ty)),
        None => {
            ctx.report(
                ErrorType::OperatorNotDefined {
                    operator: operator.to_string(),
                    operands: format!("{} and {}", left_type.describe(), right_type.describe()),
                },
                span,
            );
            None
        }
    }
}

fn is_ordered(ty: &Type) -> bool {
    ty.is_numeric() || matches!(ty, Type::Primitive(Primitive::Char))
}

fn binary_result(
    operator: &str,
    left: &Type,
    right: &Type,
    ctx: &mut CheckContext,
) -> Option<Type> {
    if left.is_void() || right.is_void() {
        return None;
    }

    let same = left.is_equal_to(right);
    let builtin = match operator {
        "+" if same && matches!(left, Type::Primitive(Primitive::String)) => Some(left.clone()),
        "+" | "-" | "*" | "/" | "%" if same && left.is_numeric() => Some(left.clone()),
        "<" | ">" | "<=" | ">=" if same && is_ordered(left) => Some(Type::bool()),
        "==" | "!="
            if left.is_assignable_to(right, &ctx.classes)
                || right.is_assignable_to(left, &ctx.classes) =>
        {
            Some(Type::bool())
        }
        "&&" | "||" if left.is_bool() && right.is_bool() => Some(Type::bool()),
        _ => None,
    };

    builtin.or_else(|| user_operator(operator, &[left, right], ctx))
}

/// Looks for a user operator in the first operand's class chain.
fn user_operator(operator: &str, operands: &[&Type], ctx: &mut CheckContext) -> Option<Type> {
    let class_name = operands.first()?.class_name()?;
    let candidates: Vec<(Vec<String>, String)> = ctx
        .classes
        .lineage(&class_name)
        .iter()
        .flat_map(|class| {
            class
                .operators()
                .filter(|(_, definition)| {
                    definition.operator.text == operator
                        && definition.parameters.len() == operands.len()
                })
                .map(|(member, definition)| {
                    let parameters: Vec<String> = definition
                        .parameters
                        .iter()
                        .map(|parameter| parameter.type_name.text.clone())
                        .collect();
                    (parameters, member.declared_type.text.clone())
                })
                .collect::<Vec<_>>()
        })
        .collect();

    for (parameters, return_type) in candidates {
        if accepts(ctx, &parameters, operands) {
            return ctx.resolve_type(&return_type);
        }
    }
    None
}

fn resolve_assignment(
    target: &Expression,
    operator: &str,
    value: &Expression,
    span: Span,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> Option<ExpressionType> {
    let target_type = resolve_expression(target, scopes, ctx);
    let value_type = resolve_expression(value, scopes, ctx);
    let (target_type, value_type) = (target_type?, value_type?);

    let ExpressionType::Value {
        ty: target_ty,
        assignable: true,
    } = target_type
    else {
        ctx.report(ErrorType::LeftHandSideNotAssignable, target.span());
        return None;
    };
    let Some(value_ty) = value_type.value_type() else {
        ctx.report(ErrorType::CannotAssignRHSToLHS, value.span());
        return None;
    };

    let stored = match operator.strip_suffix('=') {
        Some(binary) if !binary.is_empty() => {
            match binary_result(binary, &target_ty, value_ty, ctx) {
                Some(ty) => ty,
                None => {
                    ctx.report(
                        ErrorType::OperatorNotDefined {
                            operator: operator.to_string(),
                            operands: format!("{} and {}", target_ty, value_ty),
                        },
                        span,
                    );
                    return None;
                }
            }
        }
        _ => value_ty.clone(),
    };

    if !stored.is_assignable_to(&target_ty, &ctx.classes) {
        ctx.report(
            ErrorType::ExpressionDoesnotMatchType {
                expected: target_ty.name(),
                found: stored.name(),
            },
            value.span(),
        );
        return None;
    }

    Some(ExpressionType::value(target_ty))
}
