//! Column layout shared by the reader and the writer.

use semgraft_core::Position;

/// Attribute holding the UPOS column.
pub const UPOS_ATTR: &str = "upos";
/// Attribute holding the FEATS column.
pub const FEATS_ATTR: &str = "feats";
/// Attribute holding the MISC column.
pub const MISC_ATTR: &str = "misc";
/// DEPREL of a root node, which has no primary edge to carry it.
pub const DEPREL_ATTR: &str = "deprel";
/// `|`-separated relations of `0:rel` DEPS entries.
pub const DEPS_ROOT_ATTR: &str = "deps_root";

pub(crate) const FIELD_COUNT: usize = 10;
pub(crate) const NONE: &str = "_";

pub(crate) const ID: usize = 0;
pub(crate) const FORM: usize = 1;
pub(crate) const LEMMA: usize = 2;
pub(crate) const UPOS: usize = 3;
pub(crate) const XPOS: usize = 4;
pub(crate) const FEATS: usize = 5;
pub(crate) const HEAD: usize = 6;
pub(crate) const DEPREL: usize = 7;
pub(crate) const DEPS: usize = 8;
pub(crate) const MISC: usize = 9;

/// The ID column of a token row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowId {
    /// `n` or `a.b`.
    Node(Position),
    /// `a-b`.
    Range(u32, u32),
}

impl RowId {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        if let Some((first, last)) = value.split_once('-') {
            let first: u32 = first.parse().ok()?;
            let last: u32 = last.parse().ok()?;
            return (0 < first && first < last).then_some(RowId::Range(first, last));
        }
        let position: Position = value.parse().ok()?;
        (position.word > 0 || position.is_empty_node()).then_some(RowId::Node(position))
    }
}

/// Split a row on runs of tabs and spaces.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c| c == '\t' || c == ' ')
        .filter(|f| !f.is_empty())
        .collect()
}

/// `_` is an absent value.
pub(crate) fn optional(field: &str) -> Option<&str> {
    (field != NONE).then_some(field)
}
