//! The class table and everything that walks base chains.

use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use lazy_static::lazy_static;

use crate::ast::ast::ClassDefinition;

use super::{
    builtins::generate_list,
    types::{Primitive, Type},
};

lazy_static! {
    static ref BACKEND_CLASSES: HashSet<&'static str> = {
        let mut names: HashSet<&'static str> =
            Primitive::ALL.iter().map(|primitive| primitive.keyword()).collect();
        names.insert("list");
        names
    };
}

/// Whether a class of this name may be marked backend.
pub fn is_backend_class_name(name: &str) -> bool {
    BACKEND_CLASSES.contains(name)
}

/// Every known class by name.
///
/// Filled with the user's classes before any check runs; list classes are
/// added on first use and then shared by every later lookup.
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: HashMap<String, Rc<ClassDefinition>>,
    order: Vec<String>,
}

impl ClassTable {
    pub fn new() -> Self {
        ClassTable::default()
    }

    /// Registers `class` under its name. A later class of the same name
    /// replaces the earlier one.
    pub fn register(&mut self, class: Rc<ClassDefinition>) {
        let name = class.name().to_string();
        if self.classes.insert(name.clone(), class).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Rc<ClassDefinition>> {
        self.classes.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<ClassDefinition>> {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    /// Returns the backend class for a list of `element`, synthesizing it on
    /// the first request.
    pub fn ensure_list(&mut self, element: &Type) -> Rc<ClassDefinition> {
        let name = format!("{}_list", element.name());
        if let Some(existing) = self.get(&name) {
            return existing;
        }

        log::debug!("synthesizing list class `{}`", name);
        let list = Rc::new(generate_list(element));
        self.register(Rc::clone(&list));
        list
    }

    pub fn base_of(&self, class: &ClassDefinition) -> Option<Rc<ClassDefinition>> {
        class.base_name().and_then(|base| self.get(base))
    }

    /// Ancestors of `class`, nearest first.
    ///
    /// Stops at the first base that is not registered and never visits a
    /// class twice, so a cyclic chain ends where it would repeat.
    pub fn ancestors(&self, class: &ClassDefinition) -> Vec<Rc<ClassDefinition>> {
        let mut visited = vec![class.name().to_string()];
        let mut ancestors = vec![];
        let mut next = self.base_of(class);

        while let Some(current) = next {
            if visited.iter().any(|name| name == current.name()) {
                break;
            }
            visited.push(current.name().to_string());
            next = self.base_of(&current);
            ancestors.push(current);
        }

        ancestors
    }

    /// The class registered as `name` followed by its ancestors.
    pub fn lineage(&self, name: &str) -> Vec<Rc<ClassDefinition>> {
        match self.get(name) {
            Some(class) => {
                let mut lineage = self.ancestors(&class);
                lineage.insert(0, class);
                lineage
            }
            None => vec![],
        }
    }

    /// Walks base names from `class`; true as soon as a name repeats.
    pub fn has_cyclic_inheritence(&self, class: &ClassDefinition) -> bool {
        let mut visited = vec![class.name()];
        let mut base = class.base_name();

        while let Some(name) = base {
            if visited.contains(&name) {
                return true;
            }
            visited.push(name);
            base = match self.classes.get(name) {
                Some(parent) => parent.base_name(),
                None => None,
            };
        }

        false
    }

    /// True when `ancestor` appears in the base chain of `class`.
    pub fn is_ancestor(&self, ancestor: &str, class: &str) -> bool {
        match self.get(class) {
            Some(class) => self
                .ancestors(&class)
                .iter()
                .any(|candidate| candidate.name() == ancestor),
            None => false,
        }
    }
}
