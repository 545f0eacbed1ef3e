use crate::object::Object;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a frame. Closures and child frames keep their defining
/// frame alive through this.
pub type Env = Rc<RefCell<Environment>>;

/// One scope frame: local bindings plus an optional link to the enclosing frame.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            outer: None,
        }
    }

    /// A fresh top‑level frame behind a shared handle.
    pub fn new_shared() -> Env {
        Rc::new(RefCell::new(Self::new()))
    }

    /// A child frame whose lookups fall through to `outer`.
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Search this frame, then the outer chain.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.values.get(name) {
            Some(value.clone())
        } else if let Some(outer) = &self.outer {
            outer.borrow().get(name)
        } else {
            None
        }
    }

    /// Bind or overwrite `name` in this frame only; outer frames are never
    /// touched, so an inner `let` shadows.
    pub fn set(&mut self, name: &str, value: Object) {
        debug!("Binding '{}' => {}", name, value);

        self.values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::object::Object;

    #[test]
    fn test_get_set() {
        let env = Environment::new_shared();
        assert_eq!(env.borrow().get("x"), None);

        env.borrow_mut().set("x", Object::Integer(1));
        assert_eq!(env.borrow().get("x"), Some(Object::Integer(1)));

        env.borrow_mut().set("x", Object::Integer(2));
        assert_eq!(env.borrow().get("x"), Some(Object::Integer(2)));
    }

    #[test]
    fn test_enclosed_lookup_and_shadowing() {
        let outer = Environment::new_shared();
        outer.borrow_mut().set("x", Object::Integer(1));
        outer.borrow_mut().set("y", Object::Integer(10));

        let inner = Environment::new_enclosed(outer.clone());
        inner.borrow_mut().set("x", Object::Integer(2));

        assert_eq!(inner.borrow().get("x"), Some(Object::Integer(2)));
        assert_eq!(inner.borrow().get("y"), Some(Object::Integer(10)));
        assert_eq!(outer.borrow().get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn test_outer_mutation_visible_through_child() {
        let outer = Environment::new_shared();
        let inner = Environment::new_enclosed(outer.clone());

        outer.borrow_mut().set("late", Object::Boolean(true));

        assert_eq!(inner.borrow().get("late"), Some(Object::Boolean(true)));
    }
}
