//! Core renderer trait for diagram output
//!
//! This trait defines the interface for rendering diagram data
//! into an output format.

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// A renderer consumes a database read-only. Any layout it needs is computed on
/// renderer-owned values, never written back into the database.
///
/// # Example
/// ```
/// use umlsvg::core::Renderer;
/// use umlsvg::plugins::class::{Diagram, SvgRenderer};
///
/// let diagram = Diagram::default();
/// let svg = SvgRenderer::new().render(&diagram).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
