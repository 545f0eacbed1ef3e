//! Native functions visible to Monkey programs.
//!
//! [`CATALOGUE`] lists every built‑in the crate ships. An [`Interpreter`]
//! does not read it directly: it owns a [`Builtins`] table built from the
//! catalogue, so an embedder can hand it a restricted set.
//!
//! [`Interpreter`]: crate::interpreter::Interpreter

use std::collections::HashMap;

use log::{debug, info};
use phf::phf_map;

use crate::error::{EvalResult, RuntimeError};
use crate::object::{Builtin, Object};

static CATALOGUE: phf::Map<&'static str, Builtin> = phf_map! {
    "len"   => Builtin { name: "len",   func: len },
    "first" => Builtin { name: "first", func: first },
    "last"  => Builtin { name: "last",  func: last },
    "rest"  => Builtin { name: "rest",  func: rest },
    "push"  => Builtin { name: "push",  func: push },
    "print" => Builtin { name: "print", func: print },
    "puts"  => Builtin { name: "puts",  func: print },
};

/// Immutable name → built‑in lookup table.
#[derive(Debug, Clone)]
pub struct Builtins {
    table: HashMap<&'static str, Builtin>,
}

impl Builtins {
    /// Every built‑in in the catalogue.
    pub fn standard() -> Self {
        let table: HashMap<_, _> = CATALOGUE.entries().map(|(k, v)| (*k, *v)).collect();

        info!("Built‑in table created with {} entries", table.len());

        Self { table }
    }

    /// Only the named built‑ins; unknown names are ignored.
    pub fn only(names: &[&str]) -> Self {
        let table: HashMap<_, _> = names
            .iter()
            .filter_map(|name| CATALOGUE.get_entry(*name))
            .map(|(k, v)| (*k, *v))
            .collect();

        info!("Restricted built‑in table created with {} entries", table.len());

        Self { table }
    }

    /// No built‑ins at all.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.table.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

// ───────────────────────────── implementations ─────────────────────────────

fn expect_arity(args: &[Object], want: usize) -> EvalResult<()> {
    if args.len() != want {
        return Err(RuntimeError::arity(args.len(), want));
    }

    Ok(())
}

fn len(args: &[Object]) -> EvalResult<Object> {
    expect_arity(args, 1)?;

    match &args[0] {
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
        other => Err(RuntimeError::ArgumentNotSupported {
            builtin: "len",
            got: other.object_type(),
        }),
    }
}

fn first(args: &[Object]) -> EvalResult<Object> {
    expect_arity(args, 1)?;

    match &args[0] {
        Object::Array(elements) => Ok(elements.first().cloned().unwrap_or(Object::Null)),
        other => Err(RuntimeError::ArgumentNotSupported {
            builtin: "first",
            got: other.object_type(),
        }),
    }
}

fn last(args: &[Object]) -> EvalResult<Object> {
    expect_arity(args, 1)?;

    match &args[0] {
        Object::Array(elements) => Ok(elements.last().cloned().unwrap_or(Object::Null)),
        other => Err(RuntimeError::ArgumentNotSupported {
            builtin: "last",
            got: other.object_type(),
        }),
    }
}

fn rest(args: &[Object]) -> EvalResult<Object> {
    expect_arity(args, 1)?;

    match &args[0] {
        Object::Array(elements) if !elements.is_empty() => {
            Ok(Object::array(elements[1..].to_vec()))
        }
        _ => Ok(Object::Null),
    }
}

fn push(args: &[Object]) -> EvalResult<Object> {
    if args.len() < 2 {
        return Err(RuntimeError::arity_at_least(args.len(), 2));
    }

    match &args[0] {
        Object::Array(elements) => {
            let mut pushed = Vec::with_capacity(elements.len() + args.len() - 1);
            pushed.extend(elements.iter().cloned());
            pushed.extend(args[1..].iter().cloned());

            Ok(Object::array(pushed))
        }
        other => Err(RuntimeError::ArgumentNotSupported {
            builtin: "push",
            got: other.object_type(),
        }),
    }
}

fn print(args: &[Object]) -> EvalResult<Object> {
    debug!("Printing {} argument(s)", args.len());

    for arg in args {
        println!("{}", arg);
    }

    Ok(Object::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Object]) -> EvalResult<Object> {
        let builtin = Builtins::standard()
            .get(name)
            .unwrap_or_else(|| panic!("missing builtin {}", name));

        (builtin.func)(args)
    }

    #[test]
    fn test_standard_table_has_every_entry() {
        let builtins = Builtins::standard();

        for name in ["len", "first", "last", "rest", "push", "print", "puts"] {
            assert!(builtins.get(name).is_some(), "{} missing", name);
        }

        assert_eq!(builtins.len(), 7);
    }

    #[test]
    fn test_restricted_tables() {
        let only_len = Builtins::only(&["len", "no_such_builtin"]);
        assert_eq!(only_len.len(), 1);
        assert!(only_len.get("len").is_some());
        assert!(only_len.get("puts").is_none());

        assert!(Builtins::empty().is_empty());
    }

    #[test]
    fn test_push_leaves_original_untouched() {
        let original = Object::array(vec![Object::Integer(1)]);
        let pushed = call("push", &[original.clone(), Object::Integer(2), Object::Integer(3)])
            .expect("push failed");

        assert_eq!(original.to_string(), "[1]");
        assert_eq!(pushed.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_push_arity() {
        let err = call("push", &[Object::array(vec![])]).unwrap_err();

        assert_eq!(err.to_string(), "wrong number of arguments. got=1, want=2+");
    }

    #[test]
    fn test_rest_of_non_array_is_null() {
        assert!(call("rest", &[Object::Integer(1)]).unwrap().is_null());
        assert!(call("rest", &[Object::array(vec![])]).unwrap().is_null());
    }

    #[test]
    fn test_print_returns_null() {
        assert!(call("puts", &[Object::from("hi"), Object::Integer(1)])
            .unwrap()
            .is_null());
    }
}
