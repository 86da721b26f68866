use std::rc::Rc;

use crate::{
    ast::ast::Identifier,
    errors::errors::{CompilerError, ErrorType},
    Span,
};

use super::{
    classes::ClassTable,
    types::{resolve_type, Type},
};

/// State shared by every check of one run: the file being checked, the
/// diagnostics found so far and the class table.
#[derive(Debug)]
pub struct CheckContext {
    file: Rc<str>,
    errors: Vec<CompilerError>,
    pub classes: ClassTable,
}

impl CheckContext {
    pub fn new(file: &str) -> Self {
        CheckContext::with_classes(file, ClassTable::new())
    }

    pub fn with_classes(file: &str, classes: ClassTable) -> Self {
        CheckContext {
            file: Rc::from(file),
            errors: vec![],
            classes,
        }
    }

    pub fn current_file(&self) -> &str {
        &self.file
    }

    /// Errors reported from now on carry `file`; earlier ones keep theirs.
    pub fn set_current_file(&mut self, file: &str) {
        self.file = Rc::from(file);
    }

    pub fn report(&mut self, kind: ErrorType, span: Span) {
        log::debug!("{}: {}", kind.get_error_name(), kind);
        self.errors
            .push(CompilerError::new(kind, span, Rc::clone(&self.file)));
    }

    pub fn errors(&self) -> &[CompilerError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn resolve_type(&mut self, name: &str) -> Option<Type> {
        resolve_type(name, &mut self.classes)
    }

    /// Resolves a written type name, reporting `TypeNotFound` on failure.
    pub fn expect_type(&mut self, name: &Identifier) -> Option<Type> {
        let resolved = self.resolve_type(&name.text);
        if resolved.is_none() {
            self.report(
                ErrorType::TypeNotFound {
                    type_name: name.text.clone(),
                },
                name.span,
            );
        }
        resolved
    }

    pub fn finish(self) -> (ClassTable, Vec<CompilerError>) {
        (self.classes, self.errors)
    }
}
