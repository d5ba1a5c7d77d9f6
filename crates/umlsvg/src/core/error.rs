//! Core error types for diagram processing
//!
//! This module defines the error types used throughout the diagram processing pipeline.
//! Only a structural syntax error aborts a compilation; everything else is reported
//! through [`Diagnostic`](super::Diagnostic) values.

use thiserror::Error;

/// A fatal grammar violation raised by the parser
///
/// The parser stops at the first one of these; declarations after the failing
/// position are never parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Syntax error: {message} at line {line}, column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Diagram rejected: {count} semantic diagnostic(s)")]
    Rejected { count: usize },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new syntax error
    pub fn syntax_error(message: String, line: usize, column: usize) -> Self {
        Self::Syntax {
            message,
            line,
            column,
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: String) -> Self {
        Self::Layout { message }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::Render { message }
    }

    /// Create a rejection for a diagram carrying `count` semantic diagnostics
    pub fn rejected(count: usize) -> Self {
        Self::Rejected { count }
    }
}

impl From<SyntaxError> for DiagramError {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax {
            message: err.message,
            line: err.line,
            column: err.column,
        }
    }
}
