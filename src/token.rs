use log::debug;
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the Monkey scanner.
///
/// The set is closed: every character sequence the scanner sees maps to
/// exactly one of these, with `INVALID` standing in for anything the
/// language does not know about.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// End‑of‑input marker
    EOF,

    /// A character (or unterminated literal) the language does not recognise
    INVALID,

    /// A user‑defined identifier
    IDENTIFIER,

    /// An integer literal (digits only, conversion happens in the parser)
    INTEGER,

    /// A string literal (contents without quotes)
    STRING,

    /// '='
    EQUAL,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '!'
    BANG,

    /// '*'
    STAR,

    /// '/'
    SLASH,

    /// '=='
    EQUAL_EQUAL,

    /// '!='
    BANG_EQUAL,

    /// '<'
    LESS,

    /// '>'
    GREATER,

    /// '<='
    LESS_EQUAL,

    /// '>='
    GREATER_EQUAL,

    /// ','
    COMMA,

    /// ':'
    COLON,

    /// ';'
    SEMICOLON,

    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// '['
    LEFT_BRACKET,

    /// ']'
    RIGHT_BRACKET,

    /// 'fn'
    FN,

    /// 'let'
    LET,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,

    /// 'if'
    IF,

    /// 'else'
    ELSE,

    /// 'return'
    RETURN,
}

impl TokenKind {
    /// Variant name as used in diagnostics and the `tokenize` output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::INVALID => "INVALID",
            TokenKind::IDENTIFIER => "IDENTIFIER",
            TokenKind::INTEGER => "INTEGER",
            TokenKind::STRING => "STRING",
            TokenKind::EQUAL => "EQUAL",
            TokenKind::PLUS => "PLUS",
            TokenKind::MINUS => "MINUS",
            TokenKind::BANG => "BANG",
            TokenKind::STAR => "STAR",
            TokenKind::SLASH => "SLASH",
            TokenKind::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenKind::BANG_EQUAL => "BANG_EQUAL",
            TokenKind::LESS => "LESS",
            TokenKind::GREATER => "GREATER",
            TokenKind::LESS_EQUAL => "LESS_EQUAL",
            TokenKind::GREATER_EQUAL => "GREATER_EQUAL",
            TokenKind::COMMA => "COMMA",
            TokenKind::COLON => "COLON",
            TokenKind::SEMICOLON => "SEMICOLON",
            TokenKind::LEFT_PAREN => "LEFT_PAREN",
            TokenKind::RIGHT_PAREN => "RIGHT_PAREN",
            TokenKind::LEFT_BRACE => "LEFT_BRACE",
            TokenKind::RIGHT_BRACE => "RIGHT_BRACE",
            TokenKind::LEFT_BRACKET => "LEFT_BRACKET",
            TokenKind::RIGHT_BRACKET => "RIGHT_BRACKET",
            TokenKind::FN => "FN",
            TokenKind::LET => "LET",
            TokenKind::TRUE => "TRUE",
            TokenKind::FALSE => "FALSE",
            TokenKind::IF => "IF",
            TokenKind::ELSE => "ELSE",
            TokenKind::RETURN => "RETURN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its kind, the exact source text that produced it, and
/// the line it was found on.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Token {
    /// The category of this token.
    pub kind: TokenKind,

    /// The source text of the token. String literals store their contents
    /// without the surrounding quotes.
    pub literal: String,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl Token {
    /// Create a new Token with the given kind, literal, and line.
    pub fn new<S: Into<String>>(kind: TokenKind, literal: S, line: usize) -> Self {
        let literal: String = literal.into();

        debug!(
            "Creating new token: kind={:?}, literal={}, line={}",
            kind, literal, line
        );

        Self {
            kind,
            literal,
            line,
        }
    }

    /// The end‑of‑input token for `line`.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::EOF, "", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::STRING => write!(f, "{} \"{}\"", self.kind, self.literal),
            _ => write!(f, "{} {}", self.kind, self.literal),
        }
    }
}
