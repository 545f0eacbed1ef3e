#[cfg(test)]
mod scanner_tests {
    use monkey::scanner::*;
    use monkey::token::*;
    use pretty_assertions::assert_eq;

    fn assert_token_sequence(source: &str, expected: &[(TokenKind, &str)]) {
        let tokens: Vec<_> = Scanner::new(source).collect();
        let actual: Vec<_> = tokens
            .iter()
            .map(|t| (t.kind, t.literal.as_str()))
            .collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_scanner_symbols() {
        assert_token_sequence(
            "=+(){}[],:;",
            &[
                (TokenKind::EQUAL, "="),
                (TokenKind::PLUS, "+"),
                (TokenKind::LEFT_PAREN, "("),
                (TokenKind::RIGHT_PAREN, ")"),
                (TokenKind::LEFT_BRACE, "{"),
                (TokenKind::RIGHT_BRACE, "}"),
                (TokenKind::LEFT_BRACKET, "["),
                (TokenKind::RIGHT_BRACKET, "]"),
                (TokenKind::COMMA, ","),
                (TokenKind::COLON, ":"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_two_character_operators() {
        assert_token_sequence(
            "== != <= >= < > ! = - / *",
            &[
                (TokenKind::EQUAL_EQUAL, "=="),
                (TokenKind::BANG_EQUAL, "!="),
                (TokenKind::LESS_EQUAL, "<="),
                (TokenKind::GREATER_EQUAL, ">="),
                (TokenKind::LESS, "<"),
                (TokenKind::GREATER, ">"),
                (TokenKind::BANG, "!"),
                (TokenKind::EQUAL, "="),
                (TokenKind::MINUS, "-"),
                (TokenKind::SLASH, "/"),
                (TokenKind::STAR, "*"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_program_fragment() {
        let source = r#"let five = 5;
let add = fn(x, y) {
  x + y;
};
let result = add(five, 10);
if (5 < 10) { return true; } else { return false; }
"foo bar"
{"foo": "bar"}
"#;

        assert_token_sequence(
            source,
            &[
                (TokenKind::LET, "let"),
                (TokenKind::IDENTIFIER, "five"),
                (TokenKind::EQUAL, "="),
                (TokenKind::INTEGER, "5"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::LET, "let"),
                (TokenKind::IDENTIFIER, "add"),
                (TokenKind::EQUAL, "="),
                (TokenKind::FN, "fn"),
                (TokenKind::LEFT_PAREN, "("),
                (TokenKind::IDENTIFIER, "x"),
                (TokenKind::COMMA, ","),
                (TokenKind::IDENTIFIER, "y"),
                (TokenKind::RIGHT_PAREN, ")"),
                (TokenKind::LEFT_BRACE, "{"),
                (TokenKind::IDENTIFIER, "x"),
                (TokenKind::PLUS, "+"),
                (TokenKind::IDENTIFIER, "y"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::RIGHT_BRACE, "}"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::LET, "let"),
                (TokenKind::IDENTIFIER, "result"),
                (TokenKind::EQUAL, "="),
                (TokenKind::IDENTIFIER, "add"),
                (TokenKind::LEFT_PAREN, "("),
                (TokenKind::IDENTIFIER, "five"),
                (TokenKind::COMMA, ","),
                (TokenKind::INTEGER, "10"),
                (TokenKind::RIGHT_PAREN, ")"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::IF, "if"),
                (TokenKind::LEFT_PAREN, "("),
                (TokenKind::INTEGER, "5"),
                (TokenKind::LESS, "<"),
                (TokenKind::INTEGER, "10"),
                (TokenKind::RIGHT_PAREN, ")"),
                (TokenKind::LEFT_BRACE, "{"),
                (TokenKind::RETURN, "return"),
                (TokenKind::TRUE, "true"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::RIGHT_BRACE, "}"),
                (TokenKind::ELSE, "else"),
                (TokenKind::LEFT_BRACE, "{"),
                (TokenKind::RETURN, "return"),
                (TokenKind::FALSE, "false"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::RIGHT_BRACE, "}"),
                (TokenKind::STRING, "foo bar"),
                (TokenKind::LEFT_BRACE, "{"),
                (TokenKind::STRING, "foo"),
                (TokenKind::COLON, ":"),
                (TokenKind::STRING, "bar"),
                (TokenKind::RIGHT_BRACE, "}"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_token_sequence(
            "let größe = 1; ñame2",
            &[
                (TokenKind::LET, "let"),
                (TokenKind::IDENTIFIER, "größe"),
                (TokenKind::EQUAL, "="),
                (TokenKind::INTEGER, "1"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::IDENTIFIER, "ñame2"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_unexpected_chars_become_invalid_tokens() {
        assert_token_sequence(
            ",$(#",
            &[
                (TokenKind::COMMA, ","),
                (TokenKind::INVALID, "$"),
                (TokenKind::LEFT_PAREN, "("),
                (TokenKind::INVALID, "#"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        assert_token_sequence(
            "let s = \"abc",
            &[
                (TokenKind::LET, "let"),
                (TokenKind::IDENTIFIER, "s"),
                (TokenKind::EQUAL, "="),
                (TokenKind::INVALID, "abc"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_comments_and_line_numbers() {
        let tokens: Vec<_> = Scanner::new("a // ignored\n\"x\ny\" b").collect();

        let summary: Vec<_> = tokens
            .iter()
            .map(|t| (t.kind, t.literal.as_str(), t.line))
            .collect();

        assert_eq!(
            summary,
            vec![
                (TokenKind::IDENTIFIER, "a", 1),
                (TokenKind::STRING, "x\ny", 2),
                (TokenKind::IDENTIFIER, "b", 3),
                (TokenKind::EOF, "", 3),
            ]
        );
    }

    #[test]
    fn test_next_token_keeps_returning_eof() {
        let mut scanner = Scanner::new("x");

        assert_eq!(scanner.next_token().kind, TokenKind::IDENTIFIER);

        for _ in 0..3 {
            assert_eq!(scanner.next_token(), Token::eof(1));
        }
    }

    #[test]
    fn test_iterator_is_fused_after_eof() {
        let mut scanner = Scanner::new("");

        assert_eq!(scanner.next().map(|t| t.kind), Some(TokenKind::EOF));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }
}
