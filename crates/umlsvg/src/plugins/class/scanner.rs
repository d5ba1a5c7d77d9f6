//! Class diagram scanner
//!
//! Converts source text into an ordered token sequence in one left-to-right pass.
//! The scan never fails: characters no rule accepts and unterminated string
//! literals become diagnostics, and the sequence always ends with a single
//! end-of-input token.

use tracing::{debug, span, trace, warn, Level};

use super::token::{keyword, Token, TokenKind};
use crate::core::{Diagnostic, DiagnosticKind};

/// Result of scanning a source text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Scanned {
    /// Token kinds in order, end-of-input included
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

/// Scan `source` into tokens
pub fn scan(source: &str) -> Scanned {
    Scanner::new(source).scan_tokens()
}

/// Single-pass scanner over the code points of a source text
pub struct Scanner {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Consume the whole source
    pub fn scan_tokens(mut self) -> Scanned {
        let scan_span = span!(Level::DEBUG, "scan", input_len = self.chars.len());
        let _enter = scan_span.enter();

        while !self.is_at_end() {
            self.scan_token();
        }
        let eof = Token::new(TokenKind::Eof, "", self.line, self.column);
        self.tokens.push(eof);

        debug!(
            token_count = self.tokens.len(),
            diagnostic_count = self.diagnostics.len(),
            "Scanning completed"
        );

        Scanned {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn scan_token(&mut self) {
        let line = self.line;
        let column = self.column;
        let c = self.advance();

        match c {
            '{' => self.push(TokenKind::OpenBrace, "{", line, column),
            '}' => self.push(TokenKind::CloseBrace, "}", line, column),
            '(' => self.push(TokenKind::OpenParen, "(", line, column),
            ')' => self.push(TokenKind::CloseParen, ")", line, column),
            ':' => self.push(TokenKind::Colon, ":", line, column),
            ',' => self.push(TokenKind::Comma, ",", line, column),
            '+' => self.push(TokenKind::Public, "+", line, column),
            '#' => self.push(TokenKind::Protected, "#", line, column),
            '~' => self.push(TokenKind::Package, "~", line, column),
            '>' => self.push(TokenKind::GreaterThan, ">", line, column),

            '\'' => {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            }

            '-' => {
                if self.matches('>') {
                    self.push(TokenKind::Association, "->", line, column);
                } else if self.matches('-') {
                    if self.matches('>') {
                        self.push(TokenKind::Association, "-->", line, column);
                    } else {
                        self.push(TokenKind::Link, "--", line, column);
                    }
                } else {
                    self.push(TokenKind::Private, "-", line, column);
                }
            }

            '<' => self.arrow_head(line, column),

            'o' if self.continues_with(&['-', '-']) => {
                self.advance_by(2);
                self.push(TokenKind::Aggregation, "o--", line, column);
            }

            '*' if self.continues_with(&['-', '-']) => {
                self.advance_by(2);
                self.push(TokenKind::Composition, "*--", line, column);
            }

            ' ' | '\r' | '\t' => {}

            '\n' => {
                self.push(TokenKind::Newline, "\n", line, column);
                self.line += 1;
                self.column = 1;
            }

            '"' => self.string_literal(line, column),

            c if is_identifier_start(c) => self.identifier(c, line, column),

            c => {
                let message = format!("unexpected character '{}'", c);
                warn!(line, column, "{}", message);
                self.diagnostics.push(Diagnostic::at(
                    DiagnosticKind::UnexpectedCharacter,
                    message,
                    line,
                    column,
                ));
            }
        }
    }

    /// `<|--` and `<|..`; any other use of `<` is dropped without a token
    fn arrow_head(&mut self, line: usize, column: usize) {
        if self.continues_with(&['|', '-', '-']) {
            self.advance_by(3);
            self.push(TokenKind::Inheritance, "<|--", line, column);
        } else if self.continues_with(&['|', '.', '.']) {
            self.advance_by(3);
            self.push(TokenKind::Realization, "<|..", line, column);
        } else if self.matches('|') {
            trace!(line, column, "Ignoring incomplete '<|' operator");
        } else {
            trace!(line, column, "Ignoring '<'");
        }
    }

    fn string_literal(&mut self, line: usize, column: usize) {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            self.advance();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            let message = "unterminated string literal".to_string();
            warn!(line, column, "{}", message);
            self.diagnostics.push(Diagnostic::at(
                DiagnosticKind::UnterminatedString,
                message,
                line,
                column,
            ));
            return;
        }

        // closing quote
        self.advance();
        self.push(TokenKind::StringLiteral, value, line, column);
    }

    fn identifier(&mut self, first: char, line: usize, column: usize) {
        let mut text = String::from(first);
        while let Some(c) = self.peek().filter(|&c| is_identifier_continue(c)) {
            self.advance();
            text.push(c);
        }

        let kind = keyword(&text).unwrap_or(TokenKind::Identifier);
        self.push(kind, text, line, column);
    }

    fn push(&mut self, kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) {
        let token = Token::new(kind, lexeme, line, column);
        trace!(kind = ?token.kind, lexeme = %token.lexeme, line, column, "Token");
        self.tokens.push(token);
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    /// Whether the upcoming characters are exactly `expected`, without consuming them
    fn continues_with(&self, expected: &[char]) -> bool {
        self.chars
            .get(self.current..self.current + expected.len())
            .is_some_and(|window| window == expected)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '@'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
