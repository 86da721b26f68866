use std::ops::{Deref, DerefMut};

use crate::{
    ast::{
        ast::ClassDefinition,
        members::MemberDefinition,
        statements::{Block, Statement},
    },
    errors::errors::ErrorType,
};

use super::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Class,
    Function,
    Loop,
    Block,
}

/// The node that opened a scope. Borrowed, never owned.
#[derive(Debug, Clone, Copy)]
pub enum ScopeOwner<'a> {
    Class(&'a ClassDefinition),
    Function(&'a MemberDefinition),
    Statement(&'a Statement),
    Block(&'a Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
    pub assignable: bool,
}

impl Variable {
    pub fn new(name: &str, ty: Type) -> Self {
        Variable {
            name: name.to_string(),
            ty,
            assignable: true,
        }
    }

    pub fn read_only(name: &str, ty: Type) -> Self {
        Variable {
            assignable: false,
            ..Variable::new(name, ty)
        }
    }
}

#[derive(Debug)]
pub struct Scope<'a> {
    pub kind: ScopeKind,
    pub owner: ScopeOwner<'a>,
    variables: Vec<Variable>,
}

impl<'a> Scope<'a> {
    fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }
}

/// Lexical scopes of one checking pass, innermost last.
///
/// A name may only be declared once across the whole live stack, so an inner
/// scope can never shadow a name from an outer one.
#[derive(Debug, Default)]
pub struct ScopeStack<'a> {
    scopes: Vec<Scope<'a>>,
}

impl<'a> ScopeStack<'a> {
    pub fn new() -> Self {
        ScopeStack { scopes: vec![] }
    }

    /// Enters a scope. It is left when the returned guard is dropped.
    pub fn push_scope(&mut self, kind: ScopeKind, owner: ScopeOwner<'a>) -> ScopeGuard<'_, 'a> {
        log::trace!("push {:?} scope at depth {}", kind, self.scopes.len());
        self.scopes.push(Scope {
            kind,
            owner,
            variables: vec![],
        });
        ScopeGuard { stack: self }
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            log::trace!("pop {:?} scope at depth {}", scope.kind, self.scopes.len());
        }
    }

    pub fn declare(&mut self, variable: Variable) -> Result<(), ErrorType> {
        if self.lookup(&variable.name).is_some() {
            return Err(ErrorType::ItemAlreadyDefined {
                name: variable.name,
            });
        }

        match self.scopes.last_mut() {
            Some(scope) => {
                log::trace!("declare `{}` as {}", variable.name, variable.ty);
                scope.variables.push(variable);
                Ok(())
            }
            None => Err(ErrorType::IdentifierNotFound {
                name: variable.name,
            }),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_variable(name))
    }

    pub fn has_ancestor_scope_of_kind(&self, kind: ScopeKind) -> bool {
        self.scopes.iter().any(|scope| scope.kind == kind)
    }

    pub fn current_class(&self) -> Option<&'a ClassDefinition> {
        self.scopes.iter().rev().find_map(|scope| match scope.owner {
            ScopeOwner::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn current_function(&self) -> Option<&'a MemberDefinition> {
        self.scopes.iter().rev().find_map(|scope| match scope.owner {
            ScopeOwner::Function(function) => Some(function),
            _ => None,
        })
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// An entered scope. Dereferences to the stack it was pushed on.
pub struct ScopeGuard<'s, 'a> {
    stack: &'s mut ScopeStack<'a>,
}

impl<'a> Deref for ScopeGuard<'_, 'a> {
    type Target = ScopeStack<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.stack
    }
}

impl<'a> DerefMut for ScopeGuard<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.stack
    }
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        self.stack.pop_scope();
    }
}
