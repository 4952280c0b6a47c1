//! semgraft graph storage
//!
//! This crate provides the dependency graph that patterns run against and
//! edits mutate:
//! - Arena node and edge storage addressed by stable ids
//! - Adjacency index: find edges from/to a node
//! - Roots, sentence comments and multiword spans
//! - Primary-edge closures that stay finite on cyclic graphs
//! - The bracketed compact text form used in tests and diagnostics

mod compact;
mod graph;
mod index;

pub use graph::*;
