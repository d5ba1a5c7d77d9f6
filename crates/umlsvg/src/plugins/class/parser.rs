//! Class diagram parser
//!
//! Recursive-descent parser from the scanner's token sequence to a [`Diagram`].
//!
//! ```text
//! Program          := START-MARKER Declaration* END-MARKER
//! Declaration      := ClassDecl | TitleDecl | RelationshipDecl | NEWLINE
//! ClassDecl        := 'abstract'? 'class' ID ( '{' NEWLINE? Member* '}' )? NEWLINE?
//! Member           := Visibility? WORD ( MethodTail | AttributeTail ) NEWLINE?
//! MethodTail       := '(' <tokens-until-')'> ')' ( ':' WORD )?
//! AttributeTail    := ( ':' WORD )?
//! WORD             := ID | 'class' | 'abstract' | 'title'
//! RelationshipDecl := ID RelOperator ID ( ':' <tokens-until-NEWLINE> )? NEWLINE?
//! TitleDecl        := 'title' <tokens-until-NEWLINE> NEWLINE?
//! ```
//!
//! A missing required token is a [`SyntaxError`] and ends the parse. A line that
//! starts no declaration is reported as a diagnostic and its first token skipped.

use tracing::{debug, error, span, trace, warn, Level};

use super::database::{Attribute, ClassEntity, Diagram, Method, Relationship};
use super::token::{Token, TokenKind};
use crate::core::{Diagnostic, DiagnosticKind, SyntaxError};

/// Result of a successful parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub diagram: Diagram,
    /// Recovered problems: unrecognized declarations and content after the end marker
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a token sequence into a diagram
pub fn parse(tokens: &[Token]) -> Result<Parsed, SyntaxError> {
    ClassParser::new(tokens).parse()
}

/// Recursive-descent parser owning its cursor over a token slice
pub struct ClassParser<'t> {
    tokens: &'t [Token],
    current: usize,
    title: Option<String>,
    classes: Vec<ClassEntity>,
    relationships: Vec<Relationship>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> ClassParser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            title: None,
            classes: Vec::new(),
            relationships: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the parse to completion or to the first structural error
    pub fn parse(mut self) -> Result<Parsed, SyntaxError> {
        let parse_span = span!(Level::DEBUG, "parse", token_count = self.tokens.len());
        let _enter = parse_span.enter();

        if let Err(err) = self.program() {
            error!(line = err.line, column = err.column, "{}", err.message);
            return Err(err);
        }

        debug!(
            classes = self.classes.len(),
            relationships = self.relationships.len(),
            diagnostics = self.diagnostics.len(),
            "Parsing completed"
        );

        Ok(Parsed {
            diagram: Diagram::new(self.title, self.classes, self.relationships),
            diagnostics: self.diagnostics,
        })
    }

    fn program(&mut self) -> Result<(), SyntaxError> {
        self.skip_newlines();
        self.expect(TokenKind::StartUml, "expected '@startuml'")?;

        while !self.check(TokenKind::EndUml) && !self.is_at_end() {
            self.declaration()?;
        }

        self.expect(TokenKind::EndUml, "expected '@enduml'")?;
        self.trailing_content();
        Ok(())
    }

    fn declaration(&mut self) -> Result<(), SyntaxError> {
        match self.peek().kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Class => {
                self.advance();
                self.class_declaration(false)
            }
            TokenKind::Abstract => {
                self.advance();
                self.matches(TokenKind::Class);
                self.class_declaration(true)
            }
            TokenKind::Title => self.title_declaration(),
            TokenKind::Identifier if self.peek_next().kind.is_relationship() => {
                self.relationship_declaration()
            }
            _ => {
                self.unrecognized_declaration();
                Ok(())
            }
        }
    }

    fn class_declaration(&mut self, is_abstract: bool) -> Result<(), SyntaxError> {
        let name = self.expect(TokenKind::Identifier, "expected class name")?;
        let mut class = ClassEntity::new(name.lexeme.as_str()).with_abstract(is_abstract);
        trace!(class = %class.name, is_abstract, "Class declaration");

        if self.matches(TokenKind::OpenBrace) {
            self.class_body(&mut class)?;
        }
        self.matches(TokenKind::Newline);

        self.classes.push(class);
        Ok(())
    }

    fn class_body(&mut self, class: &mut ClassEntity) -> Result<(), SyntaxError> {
        loop {
            self.skip_newlines();

            if self.matches(TokenKind::CloseBrace) {
                return Ok(());
            }
            if self.is_at_end() || self.check(TokenKind::EndUml) {
                return Err(self.error_at_current(&format!(
                    "expected '}}' to close class '{}'",
                    class.name
                )));
            }

            self.member(class)?;
        }
    }

    fn member(&mut self, class: &mut ClassEntity) -> Result<(), SyntaxError> {
        let visibility = self.peek().kind.visibility();
        if visibility.is_some() {
            self.advance();
        }

        let name = self.member_word("expected member name")?;

        if self.matches(TokenKind::OpenParen) {
            // Parameter lists are not modeled
            while !self.check(TokenKind::CloseParen) {
                if self.is_at_end() {
                    return Err(self.error_at_current(&format!(
                        "expected ')' to close parameters of '{}'",
                        name.lexeme
                    )));
                }
                self.advance();
            }
            self.advance();

            let mut method = Method::new(name.lexeme.as_str());
            method.visibility = visibility;
            if self.matches(TokenKind::Colon) {
                let return_type = self.member_word("expected return type")?;
                method.return_type = return_type.lexeme.clone();
            }
            trace!(class = %class.name, method = %method.name, "Method");
            class.methods.push(method);
        } else {
            let mut attribute = Attribute::new(name.lexeme.as_str());
            attribute.visibility = visibility;
            if self.matches(TokenKind::Colon) {
                let declared_type = self.member_word("expected attribute type")?;
                attribute.declared_type = declared_type.lexeme.clone();
            }
            trace!(class = %class.name, attribute = %attribute.name, "Attribute");
            class.attributes.push(attribute);
        }

        self.matches(TokenKind::Newline);
        Ok(())
    }

    fn relationship_declaration(&mut self) -> Result<(), SyntaxError> {
        let source = self.advance();
        let operator = self.advance();
        let Some(kind) = operator.kind.relationship_kind() else {
            return Err(SyntaxError::new(
                format!("expected relationship operator, found {}", operator),
                operator.line,
                operator.column,
            ));
        };

        let target = self.expect(
            TokenKind::Identifier,
            &format!("expected target class after '{}'", operator.lexeme),
        )?;

        let label = if self.matches(TokenKind::Colon) {
            self.rest_of_line()
        } else {
            String::new()
        };
        self.matches(TokenKind::Newline);

        let relationship =
            Relationship::new(source.lexeme.as_str(), target.lexeme.as_str(), kind).with_label(label);
        trace!(relationship = %relationship, label = %relationship.label, "Relationship");
        self.relationships.push(relationship);
        Ok(())
    }

    fn title_declaration(&mut self) -> Result<(), SyntaxError> {
        self.advance();
        let title = self.rest_of_line();
        self.matches(TokenKind::Newline);

        if let Some(previous) = &self.title {
            debug!(previous = %previous, title = %title, "Replacing diagram title");
        }
        self.title = if title.is_empty() { None } else { Some(title) };
        Ok(())
    }

    fn unrecognized_declaration(&mut self) {
        let token = self.advance();
        let message = format!("unrecognized declaration starting with {}", token);
        warn!(line = token.line, column = token.column, "{}", message);
        self.diagnostics.push(Diagnostic::at(
            DiagnosticKind::UnrecognizedDeclaration,
            message,
            token.line,
            token.column,
        ));
    }

    fn trailing_content(&mut self) {
        self.skip_newlines();
        if self.is_at_end() {
            return;
        }

        let token = self.peek();
        let message = format!("content after '@enduml' is ignored, starting with {}", token);
        warn!(line = token.line, column = token.column, "{}", message);
        self.diagnostics.push(Diagnostic::at(
            DiagnosticKind::TrailingContent,
            message,
            token.line,
            token.column,
        ));
    }

    /// Free-form text up to the next newline: lexemes joined by single spaces
    fn rest_of_line(&mut self) -> String {
        let mut parts = Vec::new();
        while !self.check(TokenKind::Newline) && !self.is_at_end() {
            parts.push(self.advance().lexeme.as_str());
        }
        parts.join(" ").trim().to_string()
    }

    fn skip_newlines(&mut self) {
        while self.matches(TokenKind::Newline) {}
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<&'t Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn member_word(&mut self, message: &str) -> Result<&'t Token, SyntaxError> {
        if self.peek().kind.is_member_word() {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn error_at_current(&self, message: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(
            format!("{}, found {}", message, token),
            token.line,
            token.column,
        )
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    fn peek(&self) -> &'t Token {
        self.tokens.get(self.current).unwrap_or(&MISSING_EOF)
    }

    fn peek_next(&self) -> &'t Token {
        self.tokens.get(self.current + 1).unwrap_or(&MISSING_EOF)
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }
}

/// Read past the end of a sequence lacking its end-of-input token
static MISSING_EOF: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    line: 1,
    column: 1,
};
