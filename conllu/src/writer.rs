//! Writing graphs as CoNLL-U sentences.

use crate::fields::*;
use crate::FormatResult;
use semgraft_core::Node;
use semgraft_graph::Graph;
use std::io::Write;

/// Sentence writer over any byte sink.
pub struct Writer<W> {
    inner: W,
    sentences: usize,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            sentences: 0,
        }
    }

    /// Write one sentence followed by a blank line.
    pub fn write_graph(&mut self, graph: &Graph) -> FormatResult<()> {
        self.inner.write_all(write_graph(graph).as_bytes())?;
        self.sentences += 1;
        Ok(())
    }

    pub fn sentences_written(&self) -> usize {
        self.sentences
    }

    pub fn flush(&mut self) -> FormatResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Render one sentence, terminated by a blank line.
pub fn write_graph(graph: &Graph) -> String {
    let mut out = String::new();
    for comment in graph.comments() {
        out.push_str(comment);
        out.push('\n');
    }

    let mut spans: Vec<_> = graph.spans().iter().collect();
    spans.sort_by_key(|s| (s.first, s.last));
    let mut spans = spans.into_iter().peekable();

    for node in graph.nodes_in_order() {
        if !node.position.is_empty_node() {
            while let Some(span) = spans.next_if(|s| s.first <= node.position.word) {
                let mut row = vec![NONE.to_string(); FIELD_COUNT];
                row[ID] = format!("{}-{}", span.first, span.last);
                row[FORM] = span.form.clone();
                if let Some(misc) = &span.misc {
                    row[MISC] = misc.clone();
                }
                push_row(&mut out, &row);
            }
        }
        push_row(&mut out, &node_row(graph, node));
    }
    out.push('\n');
    out
}

/// Render every graph in order.
pub fn write_str(graphs: &[Graph]) -> String {
    graphs.iter().map(write_graph).collect()
}

fn push_row(out: &mut String, row: &[String]) {
    out.push_str(&row.join("\t"));
    out.push('\n');
}

fn or_none(value: Option<&str>) -> String {
    value.unwrap_or(NONE).to_string()
}

fn node_row(graph: &Graph, node: &Node) -> Vec<String> {
    let position_of = |id| graph.node(id).map(|n| n.position.to_string());

    let (head, deprel) = match graph.primary_parent(node.id) {
        Some(edge) => (
            position_of(edge.gov).unwrap_or_else(|| NONE.to_string()),
            edge.relation.to_string(),
        ),
        None if graph.is_root(node.id) => ("0".to_string(), or_none(node.get_attr(DEPREL_ATTR))),
        None => (NONE.to_string(), NONE.to_string()),
    };

    let mut deps: Vec<String> = node
        .get_attr(DEPS_ROOT_ATTR)
        .map(|roots| roots.split('|').map(|r| format!("0:{}", r)).collect())
        .unwrap_or_default();
    for edge in graph.incoming(node.id).filter(|e| e.extra) {
        if let Some(gov) = position_of(edge.gov) {
            deps.push(format!("{}:{}", gov, edge.relation));
        }
    }

    let mut row = Vec::with_capacity(FIELD_COUNT);
    row.push(node.position.to_string());
    row.push(node.word.clone());
    row.push(or_none(node.lemma.as_deref()));
    row.push(or_none(node.get_attr(UPOS_ATTR)));
    row.push(or_none(node.tag.as_deref()));
    row.push(or_none(node.get_attr(FEATS_ATTR)));
    row.push(head);
    row.push(deprel);
    row.push(if deps.is_empty() { NONE.to_string() } else { deps.join("|") });
    row.push(or_none(node.get_attr(MISC_ATTR)));
    row
}
