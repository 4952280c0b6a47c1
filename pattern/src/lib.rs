//! semgraft pattern
//!
//! Compile pattern text, match it against dependency graphs.
//!
//! Responsibilities:
//! - Compile the parsed syntax tree into a flat list of search operations
//! - Validate capture names (node vs edge roles, backreferences)
//! - Evaluate node predicates and relation label filters
//! - Enumerate matches lazily with a backtracking, cycle-safe search
//! - Support transitive relations (`>>`, `<<`) and negated relations

mod binding;
mod config;
mod error;
mod matcher;
mod pattern;
mod predicate;

pub use binding::Match;
pub use config::PatternConfig;
pub use error::{CaptureRole, CompileError, CompileResult};
pub use matcher::{Matcher, Matches};
pub use pattern::{compile, compile_with, CompiledPattern, PatternOp};
pub use predicate::{LabelFilter, NodePredicate, ValueMatcher};
