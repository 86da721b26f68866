use crate::{
    ast::{
        ast::{ClassDefinition, ClassModifier},
        members::{
            FieldDefinition, MemberDefinition, MemberKind, MemberModifier, MethodDefinition,
            OperatorDefinition, Parameter,
        },
        statements::Block,
    },
    errors::errors::ErrorType,
};

use super::{
    context::CheckContext,
    expressions::check_initializer,
    scope::{ScopeKind, ScopeOwner, ScopeStack, Variable},
    statements::check_block,
    types::Type,
};

pub fn check_member<'a>(
    member: &'a MemberDefinition,
    class: &'a ClassDefinition,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    match &member.kind {
        MemberKind::Field(field) => check_field(member, field, scopes, ctx),
        MemberKind::Method(method) => check_method(member, method, class, scopes, ctx),
        MemberKind::Operator(operator) => check_operator(member, operator, class, scopes, ctx),
    }
}

fn check_field<'a>(
    member: &'a MemberDefinition,
    field: &'a FieldDefinition,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    if member.modifier != MemberModifier::Normal {
        ctx.report(ErrorType::FieldInvalidModifier, member.span);
        return true;
    }
    let Some(declared) = ctx.expect_type(&member.declared_type) else {
        return true;
    };
    if declared.is_void() {
        ctx.report(ErrorType::InvalidVoidUsage, member.declared_type.span);
        return true;
    }

    let mut found_errors = false;
    for atom in &field.atoms {
        if let Some(value) = &atom.value {
            found_errors |= check_initializer(&declared, value, scopes, ctx);
        }
    }
    found_errors
}

fn check_method<'a>(
    member: &'a MemberDefinition,
    method: &'a MethodDefinition,
    class: &'a ClassDefinition,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let name = &method.name;
    let Some(return_type) = ctx.expect_type(&member.declared_type) else {
        return true;
    };

    let mut found_errors = false;
    if member.is_static && member.modifier != MemberModifier::Normal {
        ctx.report(
            ErrorType::StaticMemberInvalidModifier {
                member: name.text.clone(),
            },
            name.span,
        );
        found_errors = true;
    }

    let is_abstract = member.modifier == MemberModifier::Abstract;
    if is_abstract && class.modifier != ClassModifier::Abstract {
        ctx.report(
            ErrorType::AbstractMethodInNonAbstractClass {
                method: name.text.clone(),
                class: class.name().to_string(),
            },
            name.span,
        );
        found_errors = true;
    }
    if is_abstract && method.body.is_some() {
        ctx.report(
            ErrorType::AbstractMethodHasBody {
                method: name.text.clone(),
            },
            name.span,
        );
        found_errors = true;
    }
    if !is_abstract && method.body.is_none() && !class.is_backend {
        ctx.report(
            ErrorType::MethodMustHaveBody {
                method: name.text.clone(),
            },
            name.span,
        );
        found_errors = true;
    }

    if member.modifier == MemberModifier::Override && !has_overridable_method(member, class, ctx) {
        ctx.report(
            ErrorType::NoSuitableMethodToOverride {
                method: name.text.clone(),
            },
            name.span,
        );
        found_errors = true;
    }

    found_errors |= check_function(
        member,
        &method.parameters,
        method.body.as_ref(),
        &return_type,
        scopes,
        ctx,
    );
    found_errors
}

fn check_operator<'a>(
    member: &'a MemberDefinition,
    operator: &'a OperatorDefinition,
    class: &'a ClassDefinition,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let symbol = &operator.operator;
    let mut found_errors = false;

    if member.modifier != MemberModifier::Normal {
        ctx.report(
            ErrorType::OperatorInvalidModifier {
                operator: symbol.text.clone(),
            },
            symbol.span,
        );
        found_errors = true;
    }
    let count = operator.parameters.len();
    if !(1..=2).contains(&count) {
        ctx.report(
            ErrorType::OperatorInvalidParameterCount {
                operator: symbol.text.clone(),
                count,
            },
            symbol.span,
        );
        found_errors = true;
    }

    let Some(return_type) = ctx.expect_type(&member.declared_type) else {
        return true;
    };
    if operator.body.is_none() && !class.is_backend {
        ctx.report(
            ErrorType::MethodMustHaveBody {
                method: symbol.text.clone(),
            },
            symbol.span,
        );
        found_errors = true;
    }

    found_errors |= check_function(
        member,
        &operator.parameters,
        operator.body.as_ref(),
        &return_type,
        scopes,
        ctx,
    );
    found_errors
}

/// Checks parameters and body inside a fresh `Function` scope.
fn check_function<'a>(
    member: &'a MemberDefinition,
    parameters: &'a [Parameter],
    body: Option<&'a Block>,
    return_type: &Type,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let mut scope = scopes.push_scope(ScopeKind::Function, ScopeOwner::Function(member));

    for parameter in parameters {
        let Some(ty) = ctx.expect_type(&parameter.type_name) else {
            return true;
        };
        if ty.is_void() {
            ctx.report(ErrorType::InvalidVoidUsage, parameter.type_name.span);
            return true;
        }
        if let Err(error) = scope.declare(Variable::new(&parameter.name.text, ty)) {
            ctx.report(error, parameter.name.span);
            return true;
        }
    }

    let Some(body) = body else {
        return false;
    };

    let mut found_errors = check_block(body, &mut scope, ctx);
    if !return_type.is_void() && !body.returns_a_value() {
        ctx.report(
            ErrorType::NotAllCodePathsReturnAValue {
                method: member.name().to_string(),
            },
            member.span,
        );
        found_errors = true;
    }
    found_errors
}

/// An ancestor method with the same signature that may be overridden.
fn has_overridable_method(
    member: &MemberDefinition,
    class: &ClassDefinition,
    ctx: &CheckContext,
) -> bool {
    ctx.classes.ancestors(class).iter().any(|ancestor| {
        ancestor.methods().any(|(candidate, _)| {
            candidate.modifier != MemberModifier::Normal && candidate.does_match_signature(member)
        })
    })
}
