//! Plugin implementations
//!
//! The class diagram plugin and the orchestrator that runs it end to end.

pub mod class;
pub mod orchestrator;

pub use class::*;
pub use orchestrator::*;
