//! Core abstractions for diagram processing
//!
//! This module defines the traits shared by every pipeline stage together with
//! the ambient infrastructure: errors, diagnostics, logging and configuration.

mod database;
mod diagnostic;
mod error;
pub mod logging;
mod renderer;
mod types;

pub use database::*;
pub use diagnostic::*;
pub use error::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
