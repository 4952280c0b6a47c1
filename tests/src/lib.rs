//! semgraft Integration Test Framework
//!
//! Provides a fluent API for writing scenario tests against semgraft.
//!
//! # Structure
//!
//! - **fixtures/conllu/** - Input sentences in CoNLL-U
//! - **fixtures/operations/** - Patterns and edit scripts, one step per `--#` marker
//! - **tests/** - Test orchestration (Rust: graph + operations + assertions)
//!
//! A step whose body is a single pattern line is a match step. A step with
//! edit lines after the pattern is a surgery step; its first successful
//! derivation becomes the graph for the steps after it.
//!
//! # Example
//!
//! ```ignore
//! use semgraft_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("copula")
//!         .compact("[mixed nsubj>[Joe appos>[bartender det>the]] dobj>[drink det>a]]")
//!         .operations("operations/appositive.sg")
//!         .step("find_appositive", |a| a.matches(1).binds("a1", "Joe"))
//!         .step("appositive_to_copula", |a| a.renders("[bartender cop>is nsubj>Joe det>the]"))
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod assertion;
mod error;
mod loader;
mod runner;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder, StepOutcome};
pub use error::{ScenarioError, ScenarioResult};
pub use loader::{Operations, StepSource};
pub use scenario::{fixtures_root, GraphSource, Scenario};

/// Install a `tracing` subscriber filtered by `RUST_LOG`, once per process.
///
/// Scenario runs forward compile, match and surgery diagnostics to
/// `tracing`, so `RUST_LOG=debug cargo test` shows them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder, StepOutcome};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::init_tracing;
    pub use crate::scenario::Scenario;
}
