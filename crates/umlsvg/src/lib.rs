//! umlsvg - Compile PlantUML class diagrams to SVG
//!
//! A small compiler pipeline for a constrained PlantUML class diagram dialect:
//! a hand-written scanner, a recursive-descent parser producing an immutable
//! [`Diagram`](plugins::class::Diagram), a validator checking class names and
//! relationship endpoints, and a radial-layout SVG renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use umlsvg::render;
//!
//! let input = "@startuml\nclass Car\nclass Wheel\nCar *-- Wheel : has\n@enduml\n";
//! let svg = render(input).unwrap();
//! assert!(svg.contains("Wheel"));
//! ```
//!
//! # Advanced Usage
//!
//! Each stage can be run on its own:
//!
//! ```rust
//! use umlsvg::prelude::*;
//!
//! let scanned = scan("@startuml\nclass A\nA --> B\n@enduml");
//! let parsed = parse(&scanned.tokens).unwrap();
//! assert_eq!(parsed.diagram.class_count(), 1);
//!
//! // B is never declared
//! let validation = validate(&parsed.diagram);
//! assert_eq!(validation.diagnostics.len(), 1);
//!
//! // Rendering proceeds despite semantic diagnostics
//! let svg = SvgRenderer::new().render(&parsed.diagram).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Diagnostic, DiagnosticKind, DiagramError, PipelineOptions, RenderConfig,
        Renderer, Stage, SyntaxError,
    };
    pub use crate::plugins::class::{
        parse, scan, validate, ClassEntity, ClassLayoutAlgorithm, Diagram, Relationship,
        RelationshipKind, SvgRenderer, Token, TokenKind,
    };
    pub use crate::plugins::orchestrator::{Compilation, Orchestrator};
}

/// Compile class diagram source to an SVG document
///
/// Semantic diagnostics are logged and do not prevent rendering.
///
/// # Example
/// ```rust
/// use umlsvg::render;
///
/// let svg = render("@startuml\nclass Order\n@enduml").unwrap();
/// assert!(svg.contains("Order"));
/// ```
pub fn render(input: &str) -> anyhow::Result<String> {
    let compilation = plugins::orchestrator::Orchestrator::new().process(input)?;
    compilation
        .svg
        .ok_or_else(|| anyhow::anyhow!("pipeline produced no SVG output"))
}

/// Scan, parse and validate without rendering
///
/// # Example
/// ```rust
/// use umlsvg::compile;
///
/// let compilation = compile("@startuml\nA --> B\n@enduml").unwrap();
/// assert_eq!(compilation.semantic_count(), 2);
/// ```
pub fn compile(input: &str) -> Result<plugins::orchestrator::Compilation, DiagramError> {
    plugins::orchestrator::Orchestrator::new().compile(input)
}

/// Parse class diagram source into a diagram, ignoring recovered diagnostics
///
/// # Example
/// ```rust
/// use umlsvg::parse;
/// use umlsvg::prelude::Database;
///
/// let diagram = parse("@startuml\nclass A\nclass B\nA <|-- B\n@enduml").unwrap();
/// assert_eq!(diagram.node_count(), 2);
/// assert_eq!(diagram.edge_count(), 1);
/// ```
pub fn parse(input: &str) -> Result<plugins::class::Diagram, DiagramError> {
    let scanned = plugins::class::scan(input);
    let parsed = plugins::class::parse(&scanned.tokens)?;
    Ok(parsed.diagram)
}
