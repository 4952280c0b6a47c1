//! semgraft CoNLL-U codec
//!
//! Read and write dependency graphs in the ten-column CoNLL-U format.
//!
//! Responsibilities:
//! - Split a stream into sentences at blank lines
//! - Map ordinary, multiword and empty-node rows onto the graph model
//! - Turn HEAD/DEPREL into primary edges and DEPS into extra edges
//! - Write graphs back so that reading then writing is the identity on
//!   tab-normalized text

mod error;
mod fields;
mod reader;
mod writer;

pub use error::{FormatError, FormatResult};
pub use fields::{DEPREL_ATTR, DEPS_ROOT_ATTR, FEATS_ATTR, MISC_ATTR, UPOS_ATTR};
pub use reader::{read_str, read_str_with, Reader};
pub use writer::{write_graph, write_str, Writer};
