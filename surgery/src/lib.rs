//! semgraft surgery
//!
//! Apply ordered edit lists to every match of a pattern.
//!
//! Responsibilities:
//! - Validate edit references against the pattern's captures
//! - Deep-copy the input graph once per match
//! - Run edits in order, rebinding names introduced by earlier edits
//! - Report per-match failures without aborting other matches
//! - Read and write the line-oriented edit-script format
//!
//! # Module Structure
//!
//! - `executor` - SurgeryScript, which matches and applies edits
//! - `ops/` - Individual edit implementations (remove/add edge, add dependent, delete, relabel)
//! - `names` - Capture names resolved against one graph copy
//! - `validation` - Construction-time reference checks
//! - `script` - Edit-script text format
//! - `error` - Error types for surgery failures
//! - `result` - Outcomes of single edits and whole derivations

mod config;
mod edit;
mod error;
mod executor;
mod names;
mod ops;
mod result;
mod script;
mod validation;

pub use config::SurgeryConfig;
pub use edit::{EdgeSelector, EditOp, NodePlacement};
pub use error::{SurgeryError, SurgeryResult};
pub use executor::{apply, SurgeryScript};
pub use names::NameTable;
pub use result::{Derivation, EditOutcome};
pub use script::{format_edits, parse_edits};
pub use validation::validate_edits;
