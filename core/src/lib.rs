//! semgraft core types
//!
//! This crate provides the foundational types used throughout semgraft:
//! - Identity types (NodeId, EdgeId) and sentence positions
//! - Entity structures (Node, Edge) and dependency relations
//! - Attribute maps
//! - Graph error types
//! - Diagnostic sinks passed explicitly into compile/match/apply calls

mod attrs;
mod diagnostics;
mod entity;
mod error;
mod id;
mod relation;

pub use attrs::*;
pub use diagnostics::*;
pub use entity::*;
pub use error::*;
pub use id::*;
pub use relation::*;
