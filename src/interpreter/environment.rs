/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// One scope frame in the environment chain.
///
/// Frames are shared through `Rc<RefCell<_>>`: the interpreter holds the
/// frame of the running block, child frames point at their parent, and
/// closures keep the chain they were defined in alive.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new(parent: Option<Rc<RefCell<Environment>>>) -> Self {
        Self {
            values: HashMap::new(),
            parent,
        }
    }

    /// Creates a fresh child frame of `parent`.
    pub fn child(parent: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::new(Some(parent.clone()))))
    }

    /// The outermost frame has no parent.
    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Binds `name` in this frame, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Updates the nearest frame that already holds `name`.
    ///
    /// Returns `false` when no frame in the chain has the binding.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }

        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }

        false
    }

    /// Looks `name` up from this frame outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().get(name),
            None => None,
        }
    }

    /// Looks `name` up in this frame only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Values bound in this frame, in no particular order.
    pub fn bindings(&self) -> impl Iterator<Item = &Value> {
        self.values.values()
    }

    pub fn parent(&self) -> Option<&Rc<RefCell<Environment>>> {
        self.parent.as_ref()
    }

    /// Drops every binding in this frame.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let global = Rc::new(RefCell::new(Environment::new(None)));
        global.borrow_mut().define("x", Value::from(1.0));
        let child = Environment::child(&global);

        assert_eq!(child.borrow().get("x"), Some(Value::from(1.0)));
        assert_eq!(child.borrow().get("y"), None);
        assert!(global.borrow().is_global());
        assert!(!child.borrow().is_global());
    }

    #[test]
    fn define_shadows_and_assign_updates_nearest() {
        let global = Rc::new(RefCell::new(Environment::new(None)));
        global.borrow_mut().define("x", Value::from(1.0));
        let child = Environment::child(&global);

        child.borrow_mut().define("x", Value::from(2.0));
        assert!(child.borrow_mut().assign("x", Value::from(3.0)));
        assert_eq!(global.borrow().get("x"), Some(Value::from(1.0)));
        assert_eq!(child.borrow().get("x"), Some(Value::from(3.0)));

        let other = Environment::child(&global);
        assert!(other.borrow_mut().assign("x", Value::from(4.0)));
        assert_eq!(global.borrow().get("x"), Some(Value::from(4.0)));
        assert!(!other.borrow_mut().assign("missing", Value::Nil));
    }
}
