//! Class diagram plugin
//!
//! Scanner → Parser → Validator front end for the PlantUML class diagram
//! dialect, plus the radial layout and SVG renderer that consume its output.

mod database;
mod layout;
mod parser;
mod renderer;
mod scanner;
mod token;
mod validator;

pub use database::{
    Attribute, ClassEntity, Diagram, Method, Relationship, RelationshipKind, Visibility,
    DEFAULT_ATTRIBUTE_TYPE, DEFAULT_RETURN_TYPE,
};
pub use layout::{
    ClassLayoutAlgorithm, ClassLayoutResult, PositionedClass, PositionedRelationship,
};
pub use parser::{parse, ClassParser, Parsed};
pub use renderer::{marker_for, SvgRenderer};
pub use scanner::{scan, Scanned, Scanner};
pub use token::{keyword, Token, TokenKind};
pub use validator::{validate, ValidationResult};
