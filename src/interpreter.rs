//! Tree‑walking evaluator.
//!
//! `eval(node, env)` dispatches on the node variant. Failures travel as
//! `Err(RuntimeError)` and stop evaluation at the first one raised; `return`
//! travels as [`Flow::Return`] until a function call or the program root
//! unwraps it.

use std::rc::Rc;

use log::{debug, info};

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::builtins::Builtins;
use crate::environment::{Env, Environment};
use crate::error::{EvalResult, MonkeyError, Result, RuntimeError};
use crate::object::{Function, HashObject, HashPair, Object};
use crate::parser::Parser;

/// Outcome of evaluating a statement or expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Evaluation completed normally with this value.
    Value(Object),

    /// A `return` is unwinding with this payload.
    Return(Object),
}

impl Flow {
    /// The carried object, whichever way it is travelling.
    pub fn into_object(self) -> Object {
        match self {
            Flow::Value(object) | Flow::Return(object) => object,
        }
    }
}

/// Evaluate a sub‑expression; a `return` unwinding out of it (through an `if`
/// block) leaves the enclosing evaluation immediately.
macro_rules! value {
    ($flow:expr) => {
        match $flow? {
            Flow::Value(object) => object,
            ret @ Flow::Return(_) => return Ok(ret),
        }
    };
}

pub struct Interpreter {
    builtins: Builtins,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter with the standard built‑in table.
    pub fn new() -> Self {
        Self::with_builtins(Builtins::standard())
    }

    /// Interpreter restricted to `builtins`.
    pub fn with_builtins(builtins: Builtins) -> Self {
        info!("Initializing Interpreter with {} builtins", builtins.len());

        Self { builtins }
    }

    /// Scan, parse and evaluate `source` against `env`.
    pub fn eval_source(&self, source: &str, env: &Env) -> Result<Object> {
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            debug!("Skipping evaluation: {} parse error(s)", parser.errors().len());

            return Err(MonkeyError::Parse(parser.into_errors()));
        }

        Ok(self.eval_program(&program, env)?)
    }

    /// Evaluate a whole program. A top‑level `return` stops evaluation and
    /// yields its payload; an empty program yields `null`.
    pub fn eval_program(&self, program: &Program, env: &Env) -> EvalResult<Object> {
        debug!("Interpreting {} statements", program.statements.len());

        let mut result = Object::Null;

        for statement in &program.statements {
            match self.eval_statement(statement, env)? {
                Flow::Value(object) => result = object,
                Flow::Return(object) => {
                    debug!("Top-level return with {}", object);
                    return Ok(object);
                }
            }
        }

        info!("Interpretation completed successfully");

        Ok(result)
    }

    /// Evaluate a block in `env` (blocks do not open a scope). A `return`
    /// is passed through still wrapped.
    pub fn eval_block(&self, block: &BlockStatement, env: &Env) -> EvalResult<Flow> {
        let mut result = Object::Null;

        for statement in &block.statements {
            match self.eval_statement(statement, env)? {
                Flow::Value(object) => result = object,
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }

        Ok(Flow::Value(result))
    }

    pub fn eval_statement(&self, statement: &Statement, env: &Env) -> EvalResult<Flow> {
        match statement {
            Statement::Let { name, value, .. } => {
                debug!("Defining variable '{}'", name);

                let value = value!(self.eval_expression(value, env));
                env.borrow_mut().set(&name.name, value);

                Ok(Flow::Value(Object::Null))
            }

            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expression) => value!(self.eval_expression(expression, env)),
                    None => Object::Null,
                };

                debug!("Returning value: {}", value);

                Ok(Flow::Return(value))
            }

            Statement::Expression { expression, .. } => self.eval_expression(expression, env),

            Statement::Block(block) => self.eval_block(block, env),
        }
    }

    pub fn eval_expression(&self, expression: &Expression, env: &Env) -> EvalResult<Flow> {
        let object = match expression {
            Expression::Identifier(ident) => self.eval_identifier(ident, env)?,

            Expression::Integer { value, .. } => Object::Integer(*value),

            Expression::Boolean { value, .. } => Object::Boolean(*value),

            Expression::Str { value, .. } => Object::String(value.clone()),

            Expression::Array { elements, .. } => {
                let mut objects = Vec::with_capacity(elements.len());

                for element in elements {
                    objects.push(value!(self.eval_expression(element, env)));
                }

                Object::array(objects)
            }

            Expression::Hash { pairs, .. } => {
                let mut map = HashObject::with_capacity(pairs.len());

                for (key_expr, value_expr) in pairs {
                    let key = value!(self.eval_expression(key_expr, env));
                    let hash_key = key
                        .hash_key()
                        .ok_or(RuntimeError::UnusableHashKey(key.object_type()))?;
                    let value = value!(self.eval_expression(value_expr, env));

                    map.insert(hash_key, HashPair { key, value });
                }

                Object::hash(map)
            }

            Expression::Prefix {
                operator, right, ..
            } => {
                let right = value!(self.eval_expression(right, env));
                eval_prefix(*operator, right)?
            }

            Expression::Infix {
                operator,
                left,
                right,
                ..
            } => {
                let left = value!(self.eval_expression(left, env));
                let right = value!(self.eval_expression(right, env));
                eval_infix(*operator, left, right)?
            }

            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = value!(self.eval_expression(condition, env));

                return if condition.is_truthy() {
                    debug!("Condition is truthy; evaluating consequence");
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    debug!("Condition is falsy; evaluating alternative");
                    self.eval_block(alternative, env)
                } else {
                    Ok(Flow::Value(Object::Null))
                };
            }

            Expression::Function {
                parameters, body, ..
            } => Object::Function(Rc::new(Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            })),

            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let callee = value!(self.eval_expression(function, env));
                let mut args = Vec::with_capacity(arguments.len());

                for argument in arguments {
                    args.push(value!(self.eval_expression(argument, env)));
                }

                self.apply_function(callee, &args)?
            }

            Expression::Index { left, index, .. } => {
                let left = value!(self.eval_expression(left, env));
                let index = value!(self.eval_expression(index, env));
                eval_index(left, index)?
            }
        };

        Ok(Flow::Value(object))
    }

    /// Environment chain first, then the built‑in table.
    fn eval_identifier(&self, ident: &Identifier, env: &Env) -> EvalResult<Object> {
        if let Some(value) = env.borrow().get(&ident.name) {
            return Ok(value);
        }

        if let Some(builtin) = self.builtins.get(&ident.name) {
            return Ok(Object::Builtin(builtin));
        }

        debug!("Identifier '{}' not found", ident.name);

        Err(RuntimeError::IdentifierNotFound(ident.name.clone()))
    }

    /// Invoke a user function or built‑in with already evaluated arguments.
    pub fn apply_function(&self, callee: Object, args: &[Object]) -> EvalResult<Object> {
        match callee {
            Object::Function(function) => {
                if args.len() != function.parameters.len() {
                    return Err(RuntimeError::arity(args.len(), function.parameters.len()));
                }

                let call_env = Environment::new_enclosed(Rc::clone(&function.env));

                for (param, arg) in function.parameters.iter().zip(args) {
                    call_env.borrow_mut().set(&param.name, arg.clone());
                }

                debug!("Executing function body with {} argument(s)", args.len());

                let result = self.eval_block(&function.body, &call_env)?.into_object();

                debug!("Function returned: {}", result);

                Ok(result)
            }

            Object::Builtin(builtin) => {
                debug!("Calling native function '{}'", builtin.name);

                (builtin.func)(args)
            }

            other => Err(RuntimeError::NotAFunction(other.object_type())),
        }
    }
}

fn eval_prefix(operator: PrefixOperator, right: Object) -> EvalResult<Object> {
    match (operator, right) {
        (PrefixOperator::Bang, right) => Ok(Object::Boolean(!right.is_truthy())),

        (PrefixOperator::Minus, Object::Integer(n)) => Ok(Object::Integer(n.wrapping_neg())),

        (PrefixOperator::Minus, right) => Err(RuntimeError::UnknownPrefixOperator {
            operator,
            right: right.object_type(),
        }),
    }
}

fn eval_infix(operator: InfixOperator, left: Object, right: Object) -> EvalResult<Object> {
    match (&left, &right) {
        (Object::Integer(a), Object::Integer(b)) => eval_integer_infix(operator, *a, *b),

        (Object::String(a), Object::String(b)) => match operator {
            InfixOperator::Plus => Ok(Object::String(format!("{}{}", a, b))),
            InfixOperator::Equal => Ok(Object::Boolean(a == b)),
            InfixOperator::NotEqual => Ok(Object::Boolean(a != b)),
            _ => Err(unknown_infix(operator, &left, &right)),
        },

        _ if left.object_type() != right.object_type() => Err(RuntimeError::TypeMismatch {
            left: left.object_type(),
            operator,
            right: right.object_type(),
        }),

        _ => match operator {
            InfixOperator::Equal => Ok(Object::Boolean(left == right)),
            InfixOperator::NotEqual => Ok(Object::Boolean(left != right)),
            _ => Err(unknown_infix(operator, &left, &right)),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, a: i64, b: i64) -> EvalResult<Object> {
    let object = match operator {
        InfixOperator::Plus => Object::Integer(a.wrapping_add(b)),
        InfixOperator::Minus => Object::Integer(a.wrapping_sub(b)),
        InfixOperator::Multiply => Object::Integer(a.wrapping_mul(b)),
        InfixOperator::Divide => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }

            Object::Integer(a.wrapping_div(b))
        }
        InfixOperator::Less => Object::Boolean(a < b),
        InfixOperator::Greater => Object::Boolean(a > b),
        InfixOperator::LessEqual => Object::Boolean(a <= b),
        InfixOperator::GreaterEqual => Object::Boolean(a >= b),
        InfixOperator::Equal => Object::Boolean(a == b),
        InfixOperator::NotEqual => Object::Boolean(a != b),
    };

    Ok(object)
}

fn unknown_infix(operator: InfixOperator, left: &Object, right: &Object) -> RuntimeError {
    RuntimeError::UnknownInfixOperator {
        left: left.object_type(),
        operator,
        right: right.object_type(),
    }
}

fn eval_index(left: Object, index: Object) -> EvalResult<Object> {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Object::Null)),

        (Object::Hash(pairs), _) => {
            let key = index
                .hash_key()
                .ok_or(RuntimeError::UnusableHashKey(index.object_type()))?;

            Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null))
        }

        _ => Err(RuntimeError::IndexNotSupported {
            left: left.object_type(),
            index: index.object_type(),
        }),
    }
}
