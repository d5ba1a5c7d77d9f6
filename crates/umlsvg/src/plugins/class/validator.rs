//! Semantic checks over a parsed class diagram

use std::collections::HashSet;

use tracing::{debug, span, warn, Level};

use super::database::Diagram;
use crate::core::{Diagnostic, DiagnosticKind};

/// Outcome of validating a diagram
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// True when no semantic diagnostics were produced
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Check class-name uniqueness and relationship endpoints.
///
/// Diagnostics are ordered: duplicates in declaration order, then undefined
/// endpoints in relationship order (source before target). Both endpoints
/// of one relationship are reported separately.
pub fn validate(diagram: &Diagram) -> ValidationResult {
    let validate_span = span!(
        Level::DEBUG,
        "validate",
        classes = diagram.class_count(),
        relationships = diagram.relationship_count()
    );
    let _enter = validate_span.enter();

    let mut diagnostics = Vec::new();
    let mut declared: HashSet<&str> = HashSet::new();

    for class in diagram.classes() {
        if !declared.insert(class.name.as_str()) {
            let message = format!("class '{}' is declared more than once", class.name);
            warn!("{}", message);
            diagnostics.push(Diagnostic::new(DiagnosticKind::DuplicateClass, message));
        }
    }

    for relationship in diagram.relationships() {
        for endpoint in [&relationship.source, &relationship.target] {
            if !declared.contains(endpoint.as_str()) {
                let message = format!(
                    "relationship '{}' references an undefined class '{}'",
                    relationship, endpoint
                );
                warn!("{}", message);
                diagnostics.push(Diagnostic::new(DiagnosticKind::UndefinedClass, message));
            }
        }
    }

    debug!(diagnostics = diagnostics.len(), "Validation completed");
    ValidationResult { diagnostics }
}
