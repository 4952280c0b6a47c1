//! semgraft pattern parser
//!
//! This crate turns pattern text into a syntax tree:
//! - Node descriptions (`{tag:/VB.*/;lemma:!be}=V`, `{$}`, `{}`)
//! - Relation operators (`>`, `<`, `>>`, `<<`, negated `!>`) with optional
//!   label filters and edge captures (`>nsubj=e1`)
//! - Parenthesised groups for nested structure
//! - Error handling with location information
//!
//! Semantic checks (capture roles, regex validity) happen when the
//! pattern crate compiles the tree.

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{parse_pattern, Parser};
