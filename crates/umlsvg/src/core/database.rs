//! Core database trait for diagram data
//!
//! This trait defines a read-only view over a parsed diagram model. Each diagram
//! type implements it with its own node and edge data types.

/// Core trait for diagram databases
///
/// A database is built once by a parser and only read afterwards, so the trait
/// exposes no mutators. Layout and rendering stages consume it through this view.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
