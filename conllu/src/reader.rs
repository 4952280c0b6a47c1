//! Reading CoNLL-U sentences into graphs.

use crate::fields::*;
use crate::{FormatError, FormatResult};
use semgraft_core::{DiagnosticSink, NodeId, NodeSpec, Position, Stage};
use semgraft_graph::{Graph, MultiwordSpan, DEFAULT_WEIGHT};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Streaming sentence reader. Yields one graph per blank-line separated
/// block and stops after the first error.
pub struct Reader<R> {
    inner: R,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_no: 0,
            failed: false,
        }
    }

    /// Read the next sentence, or `None` at end of input.
    pub fn read_sentence(&mut self) -> FormatResult<Option<Graph>> {
        let mut block = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.inner.read_line(&mut buf)? == 0 {
                break;
            }
            self.line_no += 1;
            let line = buf.trim_end_matches(&['\n', '\r'][..]);
            if line.trim().is_empty() {
                if block.is_empty() {
                    continue;
                }
                break;
            }
            block.push((self.line_no, line.to_string()));
        }

        if block.is_empty() {
            return Ok(None);
        }
        build_sentence(&block).map(Some)
    }

    /// Lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = FormatResult<Graph>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_sentence() {
            Ok(Some(graph)) => Some(Ok(graph)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Read every sentence in `text`. Any malformed sentence fails the whole read.
pub fn read_str(text: &str) -> FormatResult<Vec<Graph>> {
    Reader::new(text.as_bytes()).collect()
}

pub fn read_str_with(text: &str, sink: &mut dyn DiagnosticSink) -> FormatResult<Vec<Graph>> {
    let mut reader = Reader::new(text.as_bytes());
    let mut graphs = Vec::new();
    loop {
        let start = reader.line_number() + 1;
        match reader.read_sentence() {
            Ok(Some(graph)) => {
                sink.debug(Stage::Codec, || {
                    format!("sentence after line {}: {} nodes, {} edges", start, graph.node_count(), graph.edge_count())
                });
                graphs.push(graph);
            }
            Ok(None) => break,
            Err(err) => {
                sink.warning(Stage::Codec, || err.to_string());
                return Err(err);
            }
        }
    }
    sink.info(Stage::Codec, || format!("read {} sentences", graphs.len()));
    Ok(graphs)
}

/// A node row, kept until every node of the sentence exists.
struct TokenRow<'a> {
    line: usize,
    position: Position,
    fields: Vec<&'a str>,
}

fn build_sentence(block: &[(usize, String)]) -> FormatResult<Graph> {
    let mut graph = Graph::new();
    let mut tokens: Vec<TokenRow<'_>> = Vec::new();
    let mut spans = Vec::new();

    for (line, text) in block {
        let line = *line;
        if text.starts_with('#') {
            if !tokens.is_empty() || !spans.is_empty() {
                return Err(FormatError::malformed(line, "comment after token lines"));
            }
            graph.add_comment(text.as_str());
            continue;
        }

        let fields = split_fields(text);
        if fields.len() != FIELD_COUNT {
            return Err(FormatError::field_count(line, fields.len()));
        }
        match RowId::parse(fields[ID]) {
            Some(RowId::Node(position)) => tokens.push(TokenRow {
                line,
                position,
                fields,
            }),
            Some(RowId::Range(first, last)) => spans.push(read_span(line, first, last, &fields)?),
            None => return Err(FormatError::invalid_id(line, fields[ID])),
        }
    }

    let ids = assign_ids(&tokens)?;
    for token in &tokens {
        graph
            .insert_node(ids[&token.position], node_spec(token))
            .map_err(|e| FormatError::malformed(token.line, e.to_string()))?;
    }
    for token in &tokens {
        add_primary_edge(&mut graph, &ids, token)?;
    }
    for token in &tokens {
        add_enhanced_edges(&mut graph, &ids, token)?;
    }

    for span in spans {
        let covered = ids
            .range(Position::word(span.first)..=Position::word(span.last))
            .filter(|(position, _)| !position.is_empty_node());
        for (_, id) in covered {
            if let Some(node) = graph.node_mut(*id) {
                node.original_text = span.form.clone();
            }
        }
        graph.add_span(span);
    }
    Ok(graph)
}

fn read_span(line: usize, first: u32, last: u32, fields: &[&str]) -> FormatResult<MultiwordSpan> {
    if fields[LEMMA..MISC].iter().any(|f| *f != NONE) {
        return Err(FormatError::malformed(line, "multiword token rows carry only FORM and MISC"));
    }
    let mut span = MultiwordSpan::new(first, last, fields[FORM]);
    span.misc = optional(fields[MISC]).map(str::to_string);
    span.line = Some(line);
    Ok(span)
}

/// Ordinary words keep their word number as id. Empty nodes take ids after
/// the largest word, in row order. Word numbers may not exceed the number of
/// word rows, which keeps ids dense.
fn assign_ids(tokens: &[TokenRow<'_>]) -> FormatResult<BTreeMap<Position, NodeId>> {
    let word_rows = tokens.iter().filter(|t| !t.position.is_empty_node()).count();
    if let Some(token) = tokens
        .iter()
        .find(|t| usize::try_from(t.position.word).map_or(true, |w| w > word_rows))
    {
        return Err(FormatError::invalid_id(token.line, token.position.to_string()));
    }

    let max_word = tokens
        .iter()
        .filter(|t| !t.position.is_empty_node())
        .map(|t| t.position.word)
        .max()
        .unwrap_or(0);

    let mut ids = BTreeMap::new();
    let mut next_empty = max_word + 1;
    for token in tokens {
        let id = if token.position.is_empty_node() {
            next_empty += 1;
            NodeId::new(next_empty - 1)
        } else {
            NodeId::new(token.position.word)
        };
        if ids.insert(token.position, id).is_some() {
            return Err(FormatError::malformed(
                token.line,
                format!("duplicate ID {}", token.position),
            ));
        }
    }
    Ok(ids)
}

fn node_spec(token: &TokenRow<'_>) -> NodeSpec {
    let fields = &token.fields;
    let mut spec = NodeSpec::new(fields[FORM])
        .position(token.position)
        .line(token.line);
    spec.lemma = optional(fields[LEMMA]).map(str::to_string);
    spec.tag = optional(fields[XPOS]).map(str::to_string);
    for (key, column) in [(UPOS_ATTR, UPOS), (FEATS_ATTR, FEATS), (MISC_ATTR, MISC)] {
        if let Some(value) = optional(fields[column]) {
            spec = spec.attr(key, value);
        }
    }
    spec
}

fn resolve_head(
    ids: &BTreeMap<Position, NodeId>,
    line: usize,
    value: &str,
) -> FormatResult<NodeId> {
    value
        .parse::<Position>()
        .ok()
        .and_then(|p| ids.get(&p).copied())
        .ok_or_else(|| FormatError::invalid_head(line, value))
}

fn add_primary_edge(
    graph: &mut Graph,
    ids: &BTreeMap<Position, NodeId>,
    token: &TokenRow<'_>,
) -> FormatResult<()> {
    let node = ids[&token.position];
    let (head, deprel) = (token.fields[HEAD], optional(token.fields[DEPREL]));

    match head {
        NONE => {}
        "0" => {
            graph
                .add_root(node)
                .map_err(|e| FormatError::malformed(token.line, e.to_string()))?;
            if let Some(deprel) = deprel {
                if let Some(n) = graph.node_mut(node) {
                    n.set_attr(DEPREL_ATTR, deprel);
                }
            }
        }
        _ => {
            let gov = resolve_head(ids, token.line, head)?;
            let relation =
                deprel.ok_or_else(|| FormatError::malformed(token.line, "HEAD without DEPREL"))?;
            graph
                .add_edge(gov, node, relation, DEFAULT_WEIGHT, false)
                .map_err(|e| FormatError::malformed(token.line, e.to_string()))?;
        }
    }
    Ok(())
}

fn add_enhanced_edges(
    graph: &mut Graph,
    ids: &BTreeMap<Position, NodeId>,
    token: &TokenRow<'_>,
) -> FormatResult<()> {
    let Some(deps) = optional(token.fields[DEPS]) else {
        return Ok(());
    };
    let node = ids[&token.position];

    let mut root_relations = Vec::new();
    for entry in deps.split('|') {
        let (head, relation) = entry
            .split_once(':')
            .filter(|(_, r)| !r.is_empty())
            .ok_or_else(|| FormatError::malformed(token.line, format!("invalid DEPS entry '{}'", entry)))?;
        if head == "0" {
            root_relations.push(relation);
            continue;
        }
        let gov = resolve_head(ids, token.line, head)?;
        graph
            .add_edge(gov, node, relation, DEFAULT_WEIGHT, true)
            .map_err(|e| FormatError::malformed(token.line, e.to_string()))?;
    }

    if !root_relations.is_empty() {
        if let Some(n) = graph.node_mut(node) {
            n.set_attr(DEPS_ROOT_ATTR, root_relations.join("|"));
        }
    }
    Ok(())
}
