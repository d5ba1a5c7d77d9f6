//! Non-fatal diagnostics
//!
//! Every stage reports problems it can recover from as [`Diagnostic`] values instead of
//! failing. The plain-text form expected by callers is the `Display` output.

use std::fmt;

/// A 1-based line/column position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Pipeline stage that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexical => write!(f, "lexical"),
            Stage::Syntax => write!(f, "syntax"),
            Stage::Semantic => write!(f, "semantic"),
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A character no scanner rule accepts; it is skipped
    UnexpectedCharacter,
    /// A `"` with no closing quote before end of input
    UnterminatedString,
    /// A line that matches no declaration; its first token is skipped
    UnrecognizedDeclaration,
    /// Tokens after the end marker
    TrailingContent,
    /// A class name declared more than once
    DuplicateClass,
    /// A relationship endpoint naming no declared class
    UndefinedClass,
}

impl DiagnosticKind {
    pub fn stage(self) -> Stage {
        match self {
            DiagnosticKind::UnexpectedCharacter | DiagnosticKind::UnterminatedString => {
                Stage::Lexical
            }
            DiagnosticKind::UnrecognizedDeclaration | DiagnosticKind::TrailingContent => {
                Stage::Syntax
            }
            DiagnosticKind::DuplicateClass | DiagnosticKind::UndefinedClass => Stage::Semantic,
        }
    }
}

/// A human-readable report of a recoverable problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub position: Option<Position>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
        }
    }

    pub fn at(kind: DiagnosticKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            position: Some(Position::new(line, column)),
        }
    }

    pub fn stage(&self) -> Stage {
        self.kind.stage()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}: {}", position, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let d = Diagnostic::at(
            DiagnosticKind::UnexpectedCharacter,
            "unexpected character '$'",
            2,
            7,
        );
        assert_eq!(d.to_string(), "line 2, column 7: unexpected character '$'");
    }

    #[test]
    fn test_display_without_position() {
        let d = Diagnostic::new(DiagnosticKind::DuplicateClass, "class 'A' is declared more than once");
        assert_eq!(d.to_string(), "class 'A' is declared more than once");
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(DiagnosticKind::UnexpectedCharacter.stage(), Stage::Lexical);
        assert_eq!(DiagnosticKind::UnterminatedString.stage(), Stage::Lexical);
        assert_eq!(DiagnosticKind::UnrecognizedDeclaration.stage(), Stage::Syntax);
        assert_eq!(DiagnosticKind::TrailingContent.stage(), Stage::Syntax);
        assert_eq!(DiagnosticKind::DuplicateClass.stage(), Stage::Semantic);
        assert_eq!(DiagnosticKind::UndefinedClass.stage(), Stage::Semantic);
        assert_eq!(Stage::Semantic.to_string(), "semantic");
    }
}
