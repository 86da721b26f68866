use crate::{
    ast::{
        expressions::Expression,
        statements::{Block, DeclarationStatement, ForInit, ReturnStatement, Statement},
    },
    errors::errors::ErrorType,
    Span,
};

use super::{
    context::CheckContext,
    expressions::{check_initializer, resolve_expression},
    scope::{ScopeKind, ScopeOwner, ScopeStack, Variable},
    types::ExpressionType,
};

/// Checks `block` in its own scope.
///
/// Statements keep being checked after an error. The first statement that
/// follows one that always returns is reported as unreachable and ends the
/// block.
pub fn check_block<'a>(
    block: &'a Block,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let mut scope = scopes.push_scope(ScopeKind::Block, ScopeOwner::Block(block));
    let mut found_errors = false;
    let mut found_return = false;

    for statement in block.iter() {
        if found_return {
            ctx.report(ErrorType::UnreachableCodeDetected, statement.span());
            return true;
        }
        found_errors |= check_statement(statement, &mut scope, ctx);
        found_return = statement.returns_a_value();
    }

    found_errors
}

pub fn check_statement<'a>(
    statement: &'a Statement,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    match statement {
        Statement::Block(block) => check_block(block, scopes, ctx),
        Statement::Continue(span) => check_loop_control("continue", *span, scopes, ctx),
        Statement::Break(span) => check_loop_control("break", *span, scopes, ctx),
        Statement::Return(stmt) => check_return(stmt, scopes, ctx),
        Statement::Declaration(stmt) => check_declaration(stmt, scopes, ctx),
        Statement::While(stmt) => {
            let mut found_errors = check_condition(&stmt.condition, scopes, ctx);
            let mut scope = scopes.push_scope(ScopeKind::Loop, ScopeOwner::Statement(statement));
            found_errors |= check_statement(&stmt.body, &mut scope, ctx);
            found_errors
        }
        Statement::DoWhile(stmt) => {
            let mut found_errors = {
                let mut scope =
                    scopes.push_scope(ScopeKind::Loop, ScopeOwner::Statement(statement));
                check_statement(&stmt.body, &mut scope, ctx)
            };
            found_errors |= check_condition(&stmt.condition, scopes, ctx);
            found_errors
        }
        Statement::If(stmt) => {
            let mut found_errors = check_condition(&stmt.condition, scopes, ctx);
            found_errors |= check_branch(&stmt.then_branch, scopes, ctx);
            if let Some(branch) = &stmt.else_branch {
                found_errors |= check_branch(branch, scopes, ctx);
            }
            found_errors
        }
        Statement::For(stmt) => {
            let mut scope = scopes.push_scope(ScopeKind::Loop, ScopeOwner::Statement(statement));
            let mut found_errors = match &stmt.init {
                Some(ForInit::Declaration(declaration)) => {
                    check_declaration(declaration, &mut scope, ctx)
                }
                Some(ForInit::Expression(expression)) => {
                    resolve_expression(expression, &scope, ctx).is_none()
                }
                None => false,
            };
            if let Some(condition) = &stmt.condition {
                found_errors |= check_condition(condition, &scope, ctx);
            }
            if let Some(step) = &stmt.step {
                found_errors |= resolve_expression(step, &scope, ctx).is_none();
            }
            found_errors |= check_statement(&stmt.body, &mut scope, ctx);
            found_errors
        }
        Statement::Expression(stmt) => resolve_expression(&stmt.expression, scopes, ctx).is_none(),
    }
}

/// A branch of an `if` gets a scope of its own, so a bare declaration does
/// not leak into the enclosing block.
fn check_branch<'a>(
    branch: &'a Statement,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let mut scope = scopes.push_scope(ScopeKind::Block, ScopeOwner::Statement(branch));
    check_statement(branch, &mut scope, ctx)
}

fn check_loop_control(
    statement: &str,
    span: Span,
    scopes: &ScopeStack,
    ctx: &mut CheckContext,
) -> bool {
    if scopes.has_ancestor_scope_of_kind(ScopeKind::Loop) {
        return false;
    }
    ctx.report(
        ErrorType::StatementMustAppearInLoop {
            statement: statement.to_string(),
        },
        span,
    );
    true
}

fn check_return<'a>(
    stmt: &'a ReturnStatement,
    scopes: &ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let Some(function) = scopes.current_function() else {
        ctx.report(ErrorType::ReturnOutsideFunction, stmt.span);
        return true;
    };
    // An unknown return type was already reported by the member check.
    let Some(expected) = ctx.resolve_type(&function.declared_type.text) else {
        return true;
    };

    match &stmt.value {
        Some(value) => match resolve_expression(value, scopes, ctx) {
            None => true,
            Some(ExpressionType::Value { ty, .. })
                if !expected.is_void() && ty.is_assignable_to(&expected, &ctx.classes) =>
            {
                false
            }
            Some(found) => {
                ctx.report(
                    ErrorType::ReturnTypeMismatch {
                        expected: expected.name(),
                        found: found.describe(),
                    },
                    value.span(),
                );
                true
            }
        },
        None if !expected.is_void() => {
            ctx.report(
                ErrorType::MissingReturnValue {
                    expected: expected.name(),
                },
                stmt.span,
            );
            true
        }
        None => false,
    }
}

/// Checks each initializer, then declares its name in the innermost scope.
fn check_declaration<'a>(
    stmt: &'a DeclarationStatement,
    scopes: &mut ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    let Some(ty) = ctx.expect_type(&stmt.type_name) else {
        return true;
    };
    if ty.is_void() {
        ctx.report(ErrorType::InvalidVoidUsage, stmt.type_name.span);
        return true;
    }

    let mut found_errors = false;
    for atom in &stmt.atoms {
        if let Some(value) = &atom.value {
            found_errors |= check_initializer(&ty, value, scopes, ctx);
        }
        if let Err(error) = scopes.declare(Variable::new(&atom.name.text, ty.clone())) {
            ctx.report(error, atom.name.span);
            found_errors = true;
        }
    }
    found_errors
}

fn check_condition<'a>(
    condition: &'a Expression,
    scopes: &ScopeStack<'a>,
    ctx: &mut CheckContext,
) -> bool {
    match resolve_expression(condition, scopes, ctx) {
        None => true,
        Some(ExpressionType::Value { ty, .. }) if ty.is_bool() => false,
        Some(found) => {
            ctx.report(
                ErrorType::ConditionMustBeBoolean {
                    found: found.describe(),
                },
                condition.span(),
            );
            true
        }
    }
}
