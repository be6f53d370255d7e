use crate::core;
use crate::types::{LispObject, LispSymbol};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of bindings plus an optional link to the enclosing frame.
/// Frames are shared via `Rc`: a closure keeps its defining chain alive for
/// as long as the closure itself lives.
pub struct Environment {
    data: RefCell<HashMap<LispSymbol, LispObject>>,
    outer: Option<Rc<Environment>>,
}

#[derive(Debug)]
pub struct UnknownSymbol(pub String);

impl Environment {
    pub fn spawn_from(outer: &Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            data: RefCell::new(HashMap::new()),
            outer: Some(Rc::clone(outer)),
        })
    }

    /// Child frame binding `params[i]` to `args[i]` pairwise. The shorter
    /// side wins silently: extra arguments are dropped and missing parameters
    /// are simply left unbound.
    pub fn with_bindings(
        params: &[LispSymbol],
        args: &[LispObject],
        outer: &Rc<Environment>,
    ) -> Rc<Environment> {
        let env = Environment::spawn_from(outer);
        for (key, value) in params.iter().zip(args) {
            env.set(key.clone(), value.clone());
        }
        env
    }

    /// Bind in this frame, shadowing any outer binding of the same name.
    pub fn set(&self, key: LispSymbol, value: LispObject) {
        self.data.borrow_mut().insert(key, value);
    }

    /// Look the symbol up through the chain, innermost frame first.
    pub fn get(&self, key: &LispSymbol) -> Option<LispObject> {
        match self.data.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    pub fn fetch(&self, key: &LispSymbol) -> Result<LispObject, UnknownSymbol> {
        self.get(key).ok_or_else(|| UnknownSymbol(key.0.clone()))
    }

    /// The innermost frame in which `key` is already bound, if any.
    pub fn find(self: &Rc<Self>, key: &LispSymbol) -> Option<Rc<Environment>> {
        let mut frame = Rc::clone(self);
        loop {
            if frame.data.borrow().contains_key(key) {
                return Some(frame);
            }
            match frame.outer.as_ref().map(Rc::clone) {
                Some(outer) => frame = outer,
                None => return None,
            }
        }
    }

    /// `set!`: overwrite the innermost existing binding. Unlike `set`, this
    /// never creates a binding.
    pub fn assign(
        self: &Rc<Self>,
        key: &LispSymbol,
        value: LispObject,
    ) -> Result<(), UnknownSymbol> {
        match self.find(key) {
            Some(frame) => {
                frame.set(key.clone(), value);
                Ok(())
            }
            None => Err(UnknownSymbol(key.0.clone())),
        }
    }
}

impl Default for Environment {
    /// The standard environment: every core primitive plus the math
    /// constants, in a single root frame.
    fn default() -> Self {
        let env = Environment {
            data: RefCell::new(HashMap::new()),
            outer: None,
        };
        for (&name, &func) in core::CORE.iter() {
            env.set(LispSymbol::from(name), LispObject::Primitive(func));
        }
        for &(name, value) in core::CONSTANTS.iter() {
            env.set(LispSymbol::from(name), LispObject::Float(value));
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Rc<Environment> {
        Rc::new(Environment {
            data: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    fn sym(name: &str) -> LispSymbol {
        LispSymbol::from(name)
    }

    #[test]
    fn permissive_zip_binds_pairwise() {
        let env = Environment::with_bindings(
            &[sym("a"), sym("b")],
            &[LispObject::Integer(1)],
            &root(),
        );
        assert_eq!(env.get(&sym("a")), Some(LispObject::Integer(1)));
        assert!(matches!(env.fetch(&sym("b")), Err(UnknownSymbol(_))));
    }

    #[test]
    fn extra_arguments_are_dropped() {
        let env = Environment::with_bindings(
            &[sym("a")],
            &[LispObject::Integer(1), LispObject::Integer(2)],
            &root(),
        );
        assert_eq!(env.get(&sym("a")), Some(LispObject::Integer(1)));
    }

    #[test]
    fn find_returns_the_innermost_owning_frame() {
        let outer = root();
        outer.set(sym("x"), LispObject::Integer(1));
        let inner = Environment::spawn_from(&outer);

        let frame = inner.find(&sym("x")).unwrap();
        assert!(Rc::ptr_eq(&frame, &outer));

        inner.set(sym("x"), LispObject::Integer(2));
        let frame = inner.find(&sym("x")).unwrap();
        assert!(Rc::ptr_eq(&frame, &inner));
        // The outer binding is shadowed, not modified.
        assert_eq!(outer.get(&sym("x")), Some(LispObject::Integer(1)));
    }

    #[test]
    fn assign_mutates_through_the_chain() {
        let outer = root();
        outer.set(sym("x"), LispObject::Integer(1));
        let inner = Environment::spawn_from(&outer);

        inner.assign(&sym("x"), LispObject::Integer(2)).unwrap();
        assert_eq!(outer.get(&sym("x")), Some(LispObject::Integer(2)));

        assert!(inner.assign(&sym("y"), LispObject::Integer(0)).is_err());
    }

    #[test]
    fn default_environment_has_the_standard_bindings() {
        let env = Environment::default();
        assert!(env.get(&sym("+")).is_some());
        assert!(env.get(&sym("car")).is_some());
        assert!(matches!(
            env.get(&sym("pi")),
            Some(LispObject::Float(f)) if (f - std::f64::consts::PI).abs() < 1e-12
        ));
    }
}
