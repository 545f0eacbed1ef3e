//! Runtime values produced by evaluation.
//!
//! Scalars (`Integer`, `Boolean`, `String`, `Null`) are held inline.
//! Containers and functions sit behind `Rc` so that cloning an [`Object`] is
//! cheap and so that `==` on them can fall back to identity.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Env;
use crate::error::EvalResult;

/// Type tag of an [`Object`]; its `Display` form appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOL",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
        })
    }
}

/// Content‑derived identity of a hashable value. Equal for two values of the
/// same kind and content; the `tag` keeps kinds apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub tag: ObjectType,
    pub value: u64,
}

/// Entry of a hash object: the original key is kept for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Backing store of `Object::Hash`, in insertion order.
pub type HashObject = IndexMap<HashKey, HashPair>;

/// A user function together with the environment it was defined in.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

impl fmt::Debug for Function {
    // The closure environment may (through a recursive binding) contain this
    // very function, so it is left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Signature of a native function.
pub type BuiltinFn = fn(&[Object]) -> EvalResult<Object>;

/// A native function exposed to programs under `name`.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Rc<Vec<Object>>),
    Hash(Rc<HashObject>),
    Function(Rc<Function>),
    Builtin(Builtin),
}

impl Object {
    pub const TRUE: Object = Object::Boolean(true);
    pub const FALSE: Object = Object::Boolean(false);

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// `None` for kinds that cannot key a hash.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(n) => *n as u64,
            Object::Boolean(b) => u64::from(*b),
            Object::String(s) => {
                let mut hasher = DefaultHasher::new();
                s.as_bytes().hash(&mut hasher);
                hasher.finish()
            }
            _ => return None,
        };

        Some(HashKey {
            tag: self.object_type(),
            value,
        })
    }

    pub fn array(elements: Vec<Object>) -> Self {
        Object::Array(Rc::new(elements))
    }

    pub fn hash(pairs: HashObject) -> Self {
        Object::Hash(Rc::new(pairs))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Rendering of a value nested inside an array or hash: strings quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::String(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(value.to_owned())
    }
}

impl PartialEq for Object {
    /// Scalars compare by value; containers and functions by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b),
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Object::Boolean(b) => write!(f, "{}", b),

            Object::String(s) => f.write_str(s),

            Object::Null => f.write_str("null"),

            Object::Array(elements) => {
                f.write_str("[")?;

                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    element.fmt_nested(f)?;
                }

                f.write_str("]")
            }

            Object::Hash(pairs) => {
                f.write_str("{")?;

                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    pair.key.fmt_nested(f)?;
                    f.write_str(": ")?;
                    pair.value.fmt_nested(f)?;
                }

                f.write_str("}")
            }

            Object::Function(function) => {
                f.write_str("fn(")?;

                for (i, param) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    write!(f, "{}", param)?;
                }

                write!(f, ") {{ {} }}", function.body)
            }

            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
        }
    }
}
