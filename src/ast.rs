//! **Abstract‑Syntax‑Tree** for Monkey.
//!
//! Two closed node families, [`Statement`] and [`Expression`], rooted at a
//! [`Program`]. Every node owns its children; tokens are kept only so
//! diagnostics can point back at the source.
//!
//! `Display` produces the canonical rendering: every prefix and infix
//! expression is fully parenthesised, so the grouping the parser chose is
//! visible in the output (`-a * b` renders as `((-a) * b)`).

use std::fmt;

use crate::token::Token;

/// Root of a parsed source unit: an ordered sequence of top‑level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    /// Literal of the first statement's token, or `""` for an empty program.
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or("")
    }
}

/// A name reference: a `let` target, a function parameter or a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let name = token.literal.clone();

        Self { token, name }
    }
}

/// Brace‑delimited statement sequence used by `if` branches and function bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The opening `{`.
    pub token: Token,
    pub statements: Vec<Statement>,
}

/// Executable constructs.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },

    /// `return <value>;`, where a bare `return;` carries no value.
    Return {
        token: Token,
        value: Option<Expression>,
    },

    /// An expression evaluated for its value; the trailing `;` is optional.
    Expression {
        token: Token,
        expression: Expression,
    },

    Block(BlockStatement),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let { token, .. }
            | Statement::Return { token, .. }
            | Statement::Expression { token, .. } => &token.literal,

            Statement::Block(block) => &block.token.literal,
        }
    }
}

/// Prefix operators: `!x`, `-x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

/// Binary operators, in the order of the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOperator::Bang => "!",
            PrefixOperator::Minus => "-",
        })
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::LessEqual => "<=",
            InfixOperator::GreaterEqual => ">=",
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
        })
    }
}

/// Value‑producing constructs.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),

    Integer {
        token: Token,
        value: i64,
    },

    Boolean {
        token: Token,
        value: bool,
    },

    Str {
        token: Token,
        value: String,
    },

    /// `[e1, e2, ...]`
    Array {
        token: Token,
        elements: Vec<Expression>,
    },

    /// `{k1: v1, ...}`; pairs keep their source order.
    Hash {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },

    Prefix {
        token: Token,
        operator: PrefixOperator,
        right: Box<Expression>,
    },

    Infix {
        token: Token,
        operator: InfixOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },

    /// `fn(p1, p2) { body }`
    Function {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },

    /// `function(arg1, arg2)`; `token` is the `(`.
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// `left[index]`; `token` is the `[`.
    Index {
        token: Token,
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(ident) => &ident.token.literal,

            Expression::Integer { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::Str { token, .. }
            | Expression::Array { token, .. }
            | Expression::Hash { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. }
            | Expression::Function { token, .. }
            | Expression::Call { token, .. }
            | Expression::Index { token, .. } => &token.literal,
        }
    }
}

// ─────────────────────────── canonical rendering ───────────────────────────

/// Write `items` separated by `", "`.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }

        write!(f, "{}", item)?;
    }

    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }

        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }

            write!(f, "{}", statement)?;
        }

        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value, .. } => write!(f, "let {} = {};", name, value),

            Statement::Return { value: Some(value), .. } => write!(f, "return {};", value),

            Statement::Return { value: None, .. } => f.write_str("return;"),

            Statement::Expression { expression, .. } => write!(f, "{}", expression),

            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),

            Expression::Integer { value, .. } => write!(f, "{}", value),

            Expression::Boolean { value, .. } => write!(f, "{}", value),

            Expression::Str { value, .. } => write!(f, "\"{}\"", value),

            Expression::Array { elements, .. } => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }

            Expression::Hash { pairs, .. } => {
                f.write_str("{")?;

                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    write!(f, "{}: {}", key, value)?;
                }

                f.write_str("}")
            }

            Expression::Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),

            Expression::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),

            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {} {{ {} }}", condition, consequence)?;

                if let Some(alternative) = alternative {
                    write!(f, " else {{ {} }}", alternative)?;
                }

                Ok(())
            }

            Expression::Function {
                parameters, body, ..
            } => {
                f.write_str("fn(")?;
                write_list(f, parameters)?;
                write!(f, ") {{ {} }}", body)
            }

            Expression::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{}(", function)?;
                write_list(f, arguments)?;
                f.write_str(")")
            }

            Expression::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
        }
    }
}
