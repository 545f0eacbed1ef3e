/*!
Pratt parser for Monkey
=======================

The parser pulls tokens one at a time from a [`TokenSource`] and keeps two of
them in view: `current` and `peek`. Statements are parsed by plain recursive
descent; expressions by **precedence climbing** over per‑token prefix and
infix handlers.

Malformed input never aborts the parse. Each problem is recorded as a
human‑readable message in [`Parser::errors`] and the parser keeps advancing,
so a caller sees every diagnostic in the unit at once. The returned
[`Program`] is only trustworthy when that list is empty.

### Precedence (lowest → highest)

| Level         | Tokens                 |
|---------------|------------------------|
| `Equals`      | `==` `!=`              |
| `LessGreater` | `<` `>` `<=` `>=`      |
| `Sum`         | `+` `-`                |
| `Product`     | `*` `/`                |
| `Prefix`      | `!x` `-x`              |
| `Call`        | `f(...)` `a[i]`        |

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse_program` | `info` | Lifecycle milestones.                   |
| statement / expression entry | `debug`| Descent into grammar branches.            |
| Error paths                  | `debug`| Context before recording a diagnostic.    |

--------------------------------------------------------------------------------
Grammar
--------------------------------------------------------

```text
program     → statement* EOF ;
statement   → letStmt | returnStmt | exprStmt ;
letStmt     → "let" IDENT "=" expression ";"? ;
returnStmt  → "return" expression? ";"? ;
exprStmt    → expression ";"? ;
block       → "{" statement* "}" ;
expression  → prefix ( infix )* ;
prefix      → IDENT | INTEGER | STRING | "true" | "false"
            | ( "!" | "-" ) expression
            | "(" expression ")"
            | "if" "(" expression ")" block ( "else" block )?
            | "fn" "(" parameters? ")" block
            | "[" list? "]"
            | "{" ( expression ":" expression ( "," … )* )? "}" ;
infix       → binop expression | "(" list? ")" | "[" expression "]" ;
```
*/

use log::{debug, info};

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::scanner::{Scanner, TokenSource};
use crate::token::{Token, TokenKind};

/// Binding power of operators. Derived `Ord` follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

impl Precedence {
    /// Infix binding power of `kind`; tokens that never continue an
    /// expression get `Lowest`.
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::EQUAL_EQUAL | TokenKind::BANG_EQUAL => Precedence::Equals,

            TokenKind::LESS
            | TokenKind::GREATER
            | TokenKind::LESS_EQUAL
            | TokenKind::GREATER_EQUAL => Precedence::LessGreater,

            TokenKind::PLUS | TokenKind::MINUS => Precedence::Sum,

            TokenKind::STAR | TokenKind::SLASH => Precedence::Product,

            TokenKind::LEFT_PAREN | TokenKind::LEFT_BRACKET => Precedence::Call,

            _ => Precedence::Lowest,
        }
    }
}

/// Which infix handler applies to a token kind. Kinds with no entry cannot
/// continue an expression.
#[derive(Debug, Clone, Copy)]
enum Infix {
    Binary(InfixOperator),
    Call,
    Index,
}

fn infix_handler(kind: TokenKind) -> Option<Infix> {
    let op = match kind {
        TokenKind::LEFT_PAREN => return Some(Infix::Call),
        TokenKind::LEFT_BRACKET => return Some(Infix::Index),

        TokenKind::EQUAL_EQUAL => InfixOperator::Equal,
        TokenKind::BANG_EQUAL => InfixOperator::NotEqual,
        TokenKind::LESS => InfixOperator::Less,
        TokenKind::GREATER => InfixOperator::Greater,
        TokenKind::LESS_EQUAL => InfixOperator::LessEqual,
        TokenKind::GREATER_EQUAL => InfixOperator::GreaterEqual,
        TokenKind::PLUS => InfixOperator::Plus,
        TokenKind::MINUS => InfixOperator::Minus,
        TokenKind::STAR => InfixOperator::Multiply,
        TokenKind::SLASH => InfixOperator::Divide,

        _ => return None,
    };

    Some(Infix::Binary(op))
}

/// Top‑level parser over a pull‑based token source.
pub struct Parser<S> {
    source: S,
    current: Token,
    peek: Token,
    errors: Vec<String>,
}

impl<'a> Parser<Scanner<'a>> {
    /// Parser over a fresh [`Scanner`] for `src`.
    pub fn from_source(src: &'a str) -> Self {
        Self::new(Scanner::new(src))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Construct a new parser, priming `current` and `peek`.
    pub fn new(mut source: S) -> Self {
        let current = source.next_token();
        let peek = source.next_token();

        info!(
            "Parser created; first tokens {} / {}",
            current.kind, peek.kind
        );

        Self {
            source,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Diagnostics accumulated so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consume the parser, keeping only its diagnostics.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Parse the whole token stream into a [`Program`].
    pub fn parse_program(&mut self) -> Program {
        info!("Beginning parse phase");

        let mut program = Program::default();

        while self.current.kind != TokenKind::EOF {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }

            self.next_token();
        }

        info!(
            "Parsed {} statement(s) with {} error(s)",
            program.statements.len(),
            self.errors.len()
        );

        program
    }

    // ───────────────────────── statement rules ────────────────────

    fn parse_statement(&mut self) -> Option<Statement> {
        debug!("Entering statement at {}", self.current);

        match self.current.kind {
            TokenKind::LET => self.parse_let_statement(),
            TokenKind::RETURN => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::IDENTIFIER) {
            return None;
        }

        let name = Identifier::new(self.current.clone());

        if !self.expect_peek(TokenKind::EQUAL) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::SEMICOLON) {
            self.next_token();
        }

        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        let value = match self.peek.kind {
            TokenKind::SEMICOLON | TokenKind::RIGHT_BRACE | TokenKind::EOF => None,
            _ => {
                self.next_token();
                Some(self.parse_expression(Precedence::Lowest)?)
            }
        };

        if self.peek_is(TokenKind::SEMICOLON) {
            self.next_token();
        }

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::SEMICOLON) {
            self.next_token();
        }

        Some(Statement::Expression { token, expression })
    }

    /// Parse `{ statement* }` with `current` on the `{`. Leaves `current` on
    /// the closing `}` (or on `EOF`, which is reported).
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.next_token();

        while self.current.kind != TokenKind::RIGHT_BRACE && self.current.kind != TokenKind::EOF {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }

            self.next_token();
        }

        if self.current.kind == TokenKind::EOF {
            debug!("Block opened on line {} never closed", token.line);

            self.errors.push(format!(
                "expected next token to be {}, got {}",
                TokenKind::RIGHT_BRACE,
                TokenKind::EOF
            ));
        }

        BlockStatement { token, statements }
    }

    // ─────────────────────── expression rules (Pratt) ─────────────

    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        debug!(
            "Parsing expression at {} (min precedence {:?})",
            self.current, precedence
        );

        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::SEMICOLON) && precedence < self.peek_precedence() {
            let Some(handler) = infix_handler(self.peek.kind) else {
                return Some(left);
            };

            self.next_token();
            left = self.parse_infix(handler, left)?;
        }

        Some(left)
    }

    /// Dispatch on `current` to the prefix handler for its kind.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::IDENTIFIER => Some(Expression::Identifier(Identifier::new(
                self.current.clone(),
            ))),

            TokenKind::INTEGER => self.parse_integer_literal(),

            TokenKind::STRING => Some(Expression::Str {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            }),

            TokenKind::TRUE | TokenKind::FALSE => Some(Expression::Boolean {
                token: self.current.clone(),
                value: self.current.kind == TokenKind::TRUE,
            }),

            TokenKind::BANG => self.parse_prefix_expression(PrefixOperator::Bang),

            TokenKind::MINUS => self.parse_prefix_expression(PrefixOperator::Minus),

            TokenKind::LEFT_PAREN => self.parse_grouped_expression(),

            TokenKind::IF => self.parse_if_expression(),

            TokenKind::FN => self.parse_function_literal(),

            TokenKind::LEFT_BRACKET => {
                let token = self.current.clone();
                let elements = self.parse_expression_list(TokenKind::RIGHT_BRACKET)?;

                Some(Expression::Array { token, elements })
            }

            TokenKind::LEFT_BRACE => self.parse_hash_literal(),

            kind => {
                debug!("No prefix handler for {}", self.current);

                self.errors
                    .push(format!("no prefix parse function for {} found", kind));

                None
            }
        }
    }

    /// Fold `left` into a larger expression; `current` is the infix token.
    fn parse_infix(&mut self, handler: Infix, left: Expression) -> Option<Expression> {
        let token = self.current.clone();

        match handler {
            Infix::Binary(operator) => {
                let precedence = self.current_precedence();
                self.next_token();
                let right = self.parse_expression(precedence)?;

                Some(Expression::Infix {
                    token,
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }

            Infix::Call => {
                let arguments = self.parse_expression_list(TokenKind::RIGHT_PAREN)?;

                Some(Expression::Call {
                    token,
                    function: Box::new(left),
                    arguments,
                })
            }

            Infix::Index => {
                self.next_token();
                let index = self.parse_expression(Precedence::Lowest)?;

                if !self.expect_peek(TokenKind::RIGHT_BRACKET) {
                    return None;
                }

                Some(Expression::Index {
                    token,
                    left: Box::new(left),
                    index: Box::new(index),
                })
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer { token, value }),
            Err(e) => {
                debug!("Integer literal {} rejected: {}", token.literal, e);

                self.errors
                    .push(format!("could not parse {:?} as integer", token.literal));

                None
            }
        }
    }

    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> Option<Expression> {
        let token = self.current.clone();

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RIGHT_PAREN) {
            return None;
        }

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LEFT_PAREN) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RIGHT_PAREN) {
            return None;
        }

        if !self.expect_peek(TokenKind::LEFT_BRACE) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::ELSE) {
            self.next_token();

            if !self.expect_peek(TokenKind::LEFT_BRACE) {
                return None;
            }

            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LEFT_PAREN) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LEFT_BRACE) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::Function {
            token,
            parameters,
            body,
        })
    }

    /// `current` is the `(`; leaves `current` on the `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RIGHT_PAREN) {
            self.next_token();
            return Some(parameters);
        }

        if !self.expect_peek(TokenKind::IDENTIFIER) {
            return None;
        }

        parameters.push(Identifier::new(self.current.clone()));

        while self.peek_is(TokenKind::COMMA) {
            self.next_token();

            if !self.expect_peek(TokenKind::IDENTIFIER) {
                return None;
            }

            parameters.push(Identifier::new(self.current.clone()));
        }

        if !self.expect_peek(TokenKind::RIGHT_PAREN) {
            return None;
        }

        Some(parameters)
    }

    /// Comma‑separated expressions up to `end`. `current` is the opening
    /// delimiter; leaves `current` on `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::COMMA) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RIGHT_BRACE) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::COLON) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RIGHT_BRACE) && !self.expect_peek(TokenKind::COMMA) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RIGHT_BRACE) {
            return None;
        }

        Some(Expression::Hash { token, pairs })
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn next_token(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    #[inline(always)]
    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance iff `peek` has kind `kind`; otherwise record a diagnostic.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            return true;
        }

        debug!("Expected {} after {}, found {}", kind, self.current, self.peek);

        self.errors.push(format!(
            "expected next token to be {}, got {}",
            kind, self.peek.kind
        ));

        false
    }

    #[inline(always)]
    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    #[inline(always)]
    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }
}
