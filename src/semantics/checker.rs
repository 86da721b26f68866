//! Program and class checks.
//!
//! Every check returns `true` when it found an error that stops checking of
//! the node it was given. Errors themselves always go to the context.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{ClassDefinition, ClassLabel, ClassModifier, Program},
        members::{MemberKind, MemberModifier},
    },
    errors::errors::ErrorType,
};

use super::{
    classes::is_backend_class_name,
    context::CheckContext,
    members::check_member,
    scope::{ScopeKind, ScopeOwner, ScopeStack, Variable},
    types::Type,
};

/// Registers every class of `program`, then checks them in declaration order.
pub fn check_program(program: &Program, ctx: &mut CheckContext) -> bool {
    for class in &program.classes {
        ctx.classes.register(Rc::clone(class));
    }

    let mut found_errors = false;
    for class in &program.classes {
        let mut scopes = ScopeStack::new();
        found_errors |= check_class(class, &mut scopes, ctx);
    }
    found_errors
}

pub fn check_class<'a>(
    class: &'a ClassDefinition,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    log::debug!("checking class `{}`", class.name());
    let found_errors = check_class_body(class, scopes, ctx);
    log::debug!(
        "finished class `{}` ({})",
        class.name(),
        if found_errors { "failed" } else { "ok" }
    );
    found_errors
}

fn check_class_body<'a>(
    class: &'a ClassDefinition,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let mut found_errors = false;

    if class.is_backend && !is_backend_class_name(class.name()) {
        ctx.report(
            ErrorType::UserDefinedBackendClass {
                class: class.name().to_string(),
            },
            class.name.span,
        );
        found_errors = true;
    }

    if let Some(base) = &class.base {
        // Synthesizes list bases.
        ctx.resolve_type(&base.text);
        let Some(parent) = ctx.classes.get(&base.text) else {
            ctx.report(
                ErrorType::TypeNotFound {
                    type_name: base.text.clone(),
                },
                base.span,
            );
            return true;
        };

        if ctx.classes.has_cyclic_inheritence(class) {
            ctx.report(
                ErrorType::CyclicInheritence {
                    class: class.name().to_string(),
                },
                class.name.span,
            );
            return true;
        }

        if class.label == ClassLabel::Screen {
            ctx.report(
                ErrorType::ScreenCannotInherit {
                    class: class.name().to_string(),
                },
                base.span,
            );
            found_errors = true;
        } else if parent.modifier == ClassModifier::Concrete {
            ctx.report(
                ErrorType::ConcreteBase {
                    class: class.name().to_string(),
                    base: parent.name().to_string(),
                },
                base.span,
            );
            found_errors = true;
        }
    }

    if class.label == ClassLabel::Screen && class.modifier != ClassModifier::Normal {
        ctx.report(
            ErrorType::ScreenModifierNotNormal {
                class: class.name().to_string(),
            },
            class.name.span,
        );
        found_errors = true;
    }

    let mut scope = scopes.push_scope(ScopeKind::Class, ScopeOwner::Class(class));

    found_errors |= declare_inherited_fields(class, &mut scope, ctx);
    let this = Variable::read_only("this", Type::ClassRef(class.name().to_string()));
    if let Err(error) = scope.declare(this) {
        ctx.report(error, class.name.span);
        return true;
    }
    if declare_own_fields(class, &mut scope, ctx) {
        return true;
    }
    if check_multiple_members(class, ctx) {
        return true;
    }

    for member in &class.members {
        found_errors |= check_member(member, class, &mut scope, ctx);
    }

    if class.base.is_some() && class.modifier != ClassModifier::Abstract {
        found_errors |= check_abstract_contract(class, ctx);
    }

    found_errors
}

/// Declares the field atoms of every ancestor, oldest first.
///
/// Field types that do not resolve are skipped; the ancestor's own check
/// reports them.
fn declare_inherited_fields(
    class: &ClassDefinition,
    scopes: &mut ScopeStack,
    ctx: &mut CheckContext,
) -> bool {
    let mut found_errors = false;

    for ancestor in ctx.classes.ancestors(class).iter().rev() {
        for (member, field) in ancestor.fields() {
            let Some(ty) = ctx.resolve_type(&member.declared_type.text) else {
                continue;
            };
            for atom in &field.atoms {
                if let Err(error) = scopes.declare(Variable::new(&atom.name.text, ty.clone())) {
                    ctx.report(error, atom.name.span);
                    found_errors = true;
                }
            }
        }
    }

    found_errors
}

fn declare_own_fields(
    class: &ClassDefinition,
    scopes: &mut ScopeStack,
    ctx: &mut CheckContext,
) -> bool {
    for (member, field) in class.fields() {
        let Some(ty) = ctx.expect_type(&member.declared_type) else {
            return true;
        };
        if ty.is_void() {
            ctx.report(ErrorType::InvalidVoidUsage, member.declared_type.span);
            return true;
        }
        for atom in &field.atoms {
            if let Err(error) = scopes.declare(Variable::new(&atom.name.text, ty.clone())) {
                ctx.report(error, atom.name.span);
                return true;
            }
        }
    }

    false
}

/// Names must be unique among fields and methods of one class, operators
/// among operators with the same parameter list.
fn check_multiple_members(class: &ClassDefinition, ctx: &mut CheckContext) -> bool {
    let mut names: Vec<&str> = vec![];
    let mut operators: Vec<String> = vec![];

    for member in &class.members {
        let duplicate = match &member.kind {
            MemberKind::Field(field) => field.atoms.iter().find_map(|atom| {
                if names.contains(&atom.name.text.as_str()) {
                    Some((atom.name.text.clone(), atom.name.span))
                } else {
                    names.push(&atom.name.text);
                    None
                }
            }),
            MemberKind::Method(method) => {
                if names.contains(&method.name.text.as_str()) {
                    Some((method.name.text.clone(), method.name.span))
                } else {
                    names.push(&method.name.text);
                    None
                }
            }
            MemberKind::Operator(operator) => {
                let key = member.operator_key().unwrap_or_default();
                if operators.contains(&key) {
                    Some((operator.operator.text.clone(), operator.operator.span))
                } else {
                    operators.push(key);
                    None
                }
            }
        };

        if let Some((name, span)) = duplicate {
            ctx.report(ErrorType::ItemAlreadyDefined { name }, span);
            return true;
        }
    }

    false
}

/// Every abstract method anywhere up the chain needs a matching override in
/// this class. Reports each missing or unmarked one.
fn check_abstract_contract(class: &ClassDefinition, ctx: &mut CheckContext) -> bool {
    let mut found_errors = false;

    for ancestor in ctx.classes.ancestors(class) {
        let abstract_methods = ancestor
            .methods()
            .filter(|(member, _)| member.modifier == MemberModifier::Abstract);

        for (required, _) in abstract_methods {
            let implementation = class
                .methods()
                .find(|(member, _)| member.does_match_signature(required));

            match implementation {
                None => {
                    ctx.report(
                        ErrorType::AbstractMethodNotImplemented {
                            method: required.name().to_string(),
                        },
                        class.name.span,
                    );
                    found_errors = true;
                }
                Some((member, method)) if member.modifier != MemberModifier::Override => {
                    ctx.report(
                        ErrorType::AbstractImplementationMethodModifierMustBeOverride {
                            method: method.name.text.clone(),
                        },
                        method.name.span,
                    );
                    found_errors = true;
                }
                Some(_) => {}
            }
        }
    }

    found_errors
}
