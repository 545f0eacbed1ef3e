//! Module `scanner` implements a one‑pass, streaming UTF‑8 lexer for the Monkey language.
//!
//! It transforms a source string (`&str`) into a sequence of [`Token`]s, skipping whitespace
//! and comments. Two consumption styles are offered:
//!
//! - [`TokenSource::next_token`], the pull interface the parser drives. Once input is
//!   exhausted it keeps returning `EOF`.
//! - `impl Iterator for Scanner`, which yields exactly one `EOF` token and then `None`.
//!   Designed as a `FusedIterator`, it can be chained safely with other iterator adapters.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `[`, `]`, `,`, `:`, `;`, `+`, `-`, `*`, `/`.
//! - Two‑character operators: `!=`, `==`, `<=`, `>=` (one character of lookahead).
//! - String literals: `"` … `"`, no escapes. An unterminated literal becomes `INVALID`.
//! - Integer literals: ASCII digit runs.
//! - Identifiers/keywords: Unicode letters or `_`, continuing with letters, `_`, or
//!   numerics; keywords resolved via a perfect‑hash `KEYWORDS` map.
//! - Comments: `//` to end of line, skipped via `memchr`.
//! - Anything else yields an `INVALID` token carrying the offending character.
//!
//! # Example
//!
//! ```rust
//! use monkey::scanner::Scanner;
//!
//! for token in Scanner::new("let x = 5;") {
//!     println!("{}", token);
//! }
//! ```

use crate::token::{Token, TokenKind};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "fn"     => TokenKind::FN,
    "let"    => TokenKind::LET,
    "true"   => TokenKind::TRUE,
    "false"  => TokenKind::FALSE,
    "if"     => TokenKind::IF,
    "else"   => TokenKind::ELSE,
    "return" => TokenKind::RETURN,
};

/// Pull interface between a token producer and the parser.
pub trait TokenSource {
    /// Produce the next token. After the input is exhausted this returns an
    /// `EOF` token on every call.
    fn next_token(&mut self) -> Token;
}

/// A single pass **scanner / lexer** over borrowed source text.
pub struct Scanner<'a> {
    src: &'a str, // entire source text
    start: usize, // byte index of the *first* character of the current lexeme
    curr: usize,  // byte index *one past* the last character examined
    line: usize,  // 1‑based line counter (\n increments)
    done: bool,   // iterator already yielded EOF
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            done: false,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    /// Are we at (or past) the end of input?
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    /// Peek at the current character without consuming it.
    #[inline(always)]
    fn peek(&self) -> Option<char> {
        self.src[self.curr..].chars().next()
    }

    /// Consume the current character. Callers guard with [`Self::peek`].
    #[inline(always)]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.curr += c.len_utf8();

        if c == '\n' {
            self.line += 1;
        }

        Some(c)
    }

    /// Conditionally consume a character **iff** it matches `expected`.
    #[inline(always)]
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The text of the lexeme currently being scanned.
    #[inline(always)]
    fn lexeme(&self) -> &'a str {
        &self.src[self.start..self.curr]
    }

    /// Skip whitespace and `//` comments.
    fn skip_insignificant(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }

                Some('/') if self.src[self.curr..].starts_with("//") => {
                    // Comment bodies never contain the newline, so the line
                    // counter is bumped when the loop consumes it.
                    match memchr(b'\n', &self.src.as_bytes()[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.src.len(),
                    }
                }

                _ => return,
            }
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a single token. Whitespace has already been skipped.
    fn scan_token(&mut self) -> Token {
        self.start = self.curr;
        let line = self.line;

        let Some(c) = self.advance() else {
            return Token::eof(line);
        };

        let kind = match c {
            // ── single‑character punctuators ──────────────────────────────
            '(' => TokenKind::LEFT_PAREN,
            ')' => TokenKind::RIGHT_PAREN,
            '{' => TokenKind::LEFT_BRACE,
            '}' => TokenKind::RIGHT_BRACE,
            '[' => TokenKind::LEFT_BRACKET,
            ']' => TokenKind::RIGHT_BRACKET,
            ',' => TokenKind::COMMA,
            ':' => TokenKind::COLON,
            ';' => TokenKind::SEMICOLON,
            '+' => TokenKind::PLUS,
            '-' => TokenKind::MINUS,
            '*' => TokenKind::STAR,
            '/' => TokenKind::SLASH,

            // ── two‑character operators (!=, ==, <=, >=) ─────────────────
            '!' => {
                if self.match_char('=') {
                    TokenKind::BANG_EQUAL
                } else {
                    TokenKind::BANG
                }
            }

            '=' => {
                if self.match_char('=') {
                    TokenKind::EQUAL_EQUAL
                } else {
                    TokenKind::EQUAL
                }
            }

            '<' => {
                if self.match_char('=') {
                    TokenKind::LESS_EQUAL
                } else {
                    TokenKind::LESS
                }
            }

            '>' => {
                if self.match_char('=') {
                    TokenKind::GREATER_EQUAL
                } else {
                    TokenKind::GREATER
                }
            }

            // ── string literal " … " ─────────────────────────────────────
            '"' => return self.scan_string(line),

            // ── integer literal ──────────────────────────────────────────
            c if c.is_ascii_digit() => {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }

                TokenKind::INTEGER
            }

            // ── identifiers / keywords ───────────────────────────────────
            c if is_identifier_start(c) => {
                while self.peek().is_some_and(is_identifier_continue) {
                    self.advance();
                }

                KEYWORDS
                    .get(self.lexeme())
                    .copied()
                    .unwrap_or(TokenKind::IDENTIFIER)
            }

            // ── unexpected character ─────────────────────────────────────
            _ => {
                debug!("Unexpected character {:?} on line {}", c, line);

                TokenKind::INVALID
            }
        };

        Token::new(kind, self.lexeme(), line)
    }

    /// Scan a double‑quoted string literal. `self.start` points at the opening
    /// quote, which has already been consumed.
    fn scan_string(&mut self, line: usize) -> Token {
        let body_start = self.curr;

        match memchr(b'"', &self.src.as_bytes()[body_start..]) {
            Some(pos) => {
                let body = &self.src[body_start..body_start + pos];
                self.line += body.matches('\n').count();
                self.curr = body_start + pos + 1; // past the closing quote

                Token::new(TokenKind::STRING, body, line)
            }

            None => {
                let rest = &self.src[body_start..];
                debug!("Unterminated string starting on line {}", line);
                self.line += rest.matches('\n').count();
                self.curr = self.src.len();

                Token::new(TokenKind::INVALID, rest, line)
            }
        }
    }
}

#[inline(always)]
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline(always)]
fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl TokenSource for Scanner<'_> {
    fn next_token(&mut self) -> Token {
        self.skip_insignificant();

        if self.is_at_end() {
            return Token::eof(self.line);
        }

        self.scan_token()
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.next_token();

        if token.kind == TokenKind::EOF {
            self.done = true;
        }

        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}
