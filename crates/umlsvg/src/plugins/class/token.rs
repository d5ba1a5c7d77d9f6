//! Token types produced by the scanner

use std::fmt;

use super::database::{RelationshipKind, Visibility};

/// Every kind of token the scanner can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural keywords
    StartUml,
    EndUml,
    Class,
    Abstract,
    Title,

    // Punctuation
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Colon,
    Comma,
    GreaterThan,

    // Visibility marks
    Public,
    Private,
    Protected,
    Package,

    // Relationship operators
    Inheritance,
    Realization,
    Association,
    Aggregation,
    Composition,
    Link,

    Identifier,
    StringLiteral,
    Newline,
    Eof,
}

impl TokenKind {
    /// The relationship an operator token denotes, if it is one
    pub fn relationship_kind(self) -> Option<RelationshipKind> {
        match self {
            TokenKind::Inheritance => Some(RelationshipKind::Inheritance),
            TokenKind::Realization => Some(RelationshipKind::Realization),
            TokenKind::Association => Some(RelationshipKind::Association),
            TokenKind::Aggregation => Some(RelationshipKind::Aggregation),
            TokenKind::Composition => Some(RelationshipKind::Composition),
            TokenKind::Link => Some(RelationshipKind::Link),
            _ => None,
        }
    }

    pub fn is_relationship(self) -> bool {
        self.relationship_kind().is_some()
    }

    /// Whether the token can stand for a member name or type inside a class body
    ///
    /// Body keywords have no structural meaning there, so `+title : String`
    /// declares an attribute named `title`.
    pub fn is_member_word(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Class | TokenKind::Abstract | TokenKind::Title
        )
    }

    /// The visibility a marker token denotes, if it is one
    pub fn visibility(self) -> Option<Visibility> {
        match self {
            TokenKind::Public => Some(Visibility::Public),
            TokenKind::Private => Some(Visibility::Private),
            TokenKind::Protected => Some(Visibility::Protected),
            TokenKind::Package => Some(Visibility::Package),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::StartUml => "'@startuml'",
            TokenKind::EndUml => "'@enduml'",
            TokenKind::Class => "'class'",
            TokenKind::Abstract => "'abstract'",
            TokenKind::Title => "'title'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::GreaterThan => "'>'",
            TokenKind::Public => "'+'",
            TokenKind::Private => "'-'",
            TokenKind::Protected => "'#'",
            TokenKind::Package => "'~'",
            TokenKind::Inheritance => "'<|--'",
            TokenKind::Realization => "'<|..'",
            TokenKind::Association => "'-->'",
            TokenKind::Aggregation => "'o--'",
            TokenKind::Composition => "'*--'",
            TokenKind::Link => "'--'",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{}", name)
    }
}

/// Reserved words, looked up after an identifier has been scanned
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("@startuml", TokenKind::StartUml),
    ("@enduml", TokenKind::EndUml),
    ("class", TokenKind::Class),
    ("abstract", TokenKind::Abstract),
    ("title", TokenKind::Title),
];

/// Look up a lexeme in the keyword table
pub fn keyword(lexeme: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == lexeme)
        .map(|&(_, kind)| kind)
}

/// A single lexical token with its 1-based source position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::StringLiteral => {
                write!(f, "{} '{}'", self.kind, self.lexeme)
            }
            kind => write!(f, "{}", kind),
        }
    }
}
