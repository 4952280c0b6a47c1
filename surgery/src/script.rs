//! Line-oriented edit-script format.
//!
//! One edit per line; blank lines and lines starting with `#` are skipped.
//! Values containing whitespace are written in double quotes.
//!
//! ```text
//! removeEdge -edge e1
//! removeEdge -gov a -dep b [-reln r]
//! addEdge -gov a -dep b -reln r [-weight w] [-extra]
//! addDep -gov a -reln r -word w [-lemma l] [-tag t] [-attr k=v]... [-name n] [-position before|end]
//! delete -node a
//! relabelEdge -edge e -reln r
//! relabelEdge -gov a -dep b -reln r
//! ```

use crate::{EdgeSelector, EditOp, NodePlacement, SurgeryError, SurgeryResult};
use semgraft_core::{NodeSpec, Relation};
use semgraft_graph::DEFAULT_WEIGHT;
use std::collections::BTreeMap;
use std::fmt;

/// Parse an edit script.
pub fn parse_edits(text: &str) -> SurgeryResult<Vec<EditOp>> {
    let mut edits = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let words = split_words(trimmed).map_err(|m| SurgeryError::script(line_no, m))?;
        edits.push(parse_line(&words).map_err(|m| SurgeryError::script(line_no, m))?);
    }
    Ok(edits)
}

/// Render edits as a script `parse_edits` reads back.
pub fn format_edits(edits: &[EditOp]) -> String {
    let mut out = String::new();
    for edit in edits {
        out.push_str(&edit.to_string());
        out.push('\n');
    }
    out
}

fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut word = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some(escaped) => word.push(escaped),
                        None => return Err("unterminated escape".to_string()),
                    },
                    Some(other) => word.push(other),
                    None => return Err("unterminated quoted value".to_string()),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                word.push(c);
                chars.next();
            }
        }
        words.push(word);
    }
    Ok(words)
}

/// Options of one command line.
#[derive(Default)]
struct Options {
    values: BTreeMap<&'static str, String>,
    attrs: Vec<(String, String)>,
    extra: bool,
}

impl Options {
    fn take(&mut self, key: &'static str) -> Option<String> {
        self.values.remove(key)
    }

    fn require(&mut self, key: &'static str) -> Result<String, String> {
        self.take(key).ok_or_else(|| format!("missing -{}", key))
    }

    /// Reject options the command did not consume.
    fn finish(self, command: &str) -> Result<(), String> {
        if let Some(key) = self.values.keys().next() {
            return Err(format!("{} does not take -{}", command, key));
        }
        if self.extra {
            return Err(format!("{} does not take -extra", command));
        }
        if !self.attrs.is_empty() {
            return Err(format!("{} does not take -attr", command));
        }
        Ok(())
    }
}

const VALUE_OPTIONS: &[&str] = &[
    "attr", "dep", "edge", "gov", "lemma", "name", "node", "position", "reln", "tag", "weight", "word",
];

fn parse_options(words: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = words.iter();

    while let Some(word) = iter.next() {
        let key = word
            .strip_prefix('-')
            .ok_or_else(|| format!("expected an option, found '{}'", word))?;
        if key == "extra" {
            options.extra = true;
            continue;
        }
        let key = VALUE_OPTIONS
            .iter()
            .copied()
            .find(|k| *k == key)
            .ok_or_else(|| format!("unknown option -{}", key))?;
        let value = iter.next().ok_or_else(|| format!("-{} needs a value", key))?.clone();

        if key == "attr" {
            let (k, v) = value
                .split_once('=')
                .ok_or_else(|| format!("-attr expects key=value, found '{}'", value))?;
            options.attrs.push((k.to_string(), v.to_string()));
        } else if options.values.insert(key, value).is_some() {
            return Err(format!("-{} given twice", key));
        }
    }
    Ok(options)
}

fn parse_line(words: &[String]) -> Result<EditOp, String> {
    let (command, rest) = words.split_first().ok_or("empty command")?;
    let mut options = parse_options(rest)?;

    let edit = match command.as_str() {
        "removeEdge" => EditOp::RemoveEdge(parse_selector(&mut options, true)?),
        "addEdge" => {
            let weight = match options.take("weight") {
                Some(w) => w.parse::<f64>().map_err(|_| format!("invalid weight '{}'", w))?,
                None => DEFAULT_WEIGHT,
            };
            let extra = std::mem::take(&mut options.extra);
            EditOp::AddEdge {
                gov: options.require("gov")?,
                dep: options.require("dep")?,
                relation: Relation::new(options.require("reln")?),
                weight,
                extra,
            }
        }
        "addDep" => {
            let mut node = NodeSpec::new(options.require("word")?);
            node.lemma = options.take("lemma");
            node.tag = options.take("tag");
            for (key, value) in std::mem::take(&mut options.attrs) {
                node = node.attr(key, value);
            }
            let placement = match options.take("position").as_deref() {
                None => None,
                Some("before") => Some(NodePlacement::BeforeSubtree),
                Some("end") => Some(NodePlacement::End),
                Some(other) => return Err(format!("unknown position '{}'", other)),
            };
            EditOp::AddDependentNode {
                gov: options.require("gov")?,
                relation: Relation::new(options.require("reln")?),
                node,
                placement,
                name: options.take("name"),
            }
        }
        "delete" => EditOp::DeleteSubgraph {
            node: options.require("node")?,
        },
        "relabelEdge" => {
            let relation = Relation::new(options.require("reln")?);
            EditOp::RelabelEdge {
                edge: parse_selector(&mut options, false)?,
                relation,
            }
        }
        other => return Err(format!("unknown command '{}'", other)),
    };

    options.finish(command)?;
    Ok(edit)
}

/// `-edge name` or `-gov a -dep b`, the latter optionally with `-reln`.
fn parse_selector(options: &mut Options, with_relation: bool) -> Result<EdgeSelector, String> {
    if let Some(name) = options.take("edge") {
        return Ok(EdgeSelector::Named(name));
    }
    let relation = if with_relation {
        options.take("reln").map(Relation::new)
    } else {
        None
    };
    Ok(EdgeSelector::Between {
        gov: options.require("gov")?,
        dep: options.require("dep")?,
        relation,
    })
}

fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && !value.starts_with('"')
        && !value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\');
    if plain {
        return value.to_string();
    }
    let mut out = String::from("\"");
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn write_selector(f: &mut fmt::Formatter<'_>, selector: &EdgeSelector) -> fmt::Result {
    match selector {
        EdgeSelector::Named(name) => write!(f, " -edge {}", quote(name)),
        EdgeSelector::Between { gov, dep, relation } => {
            write!(f, " -gov {} -dep {}", quote(gov), quote(dep))?;
            if let Some(relation) = relation {
                write!(f, " -reln {}", quote(relation.as_str()))?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        match self {
            EditOp::RemoveEdge(selector) => write_selector(f, selector),
            EditOp::AddEdge {
                gov,
                dep,
                relation,
                weight,
                extra,
            } => {
                write!(f, " -gov {} -dep {} -reln {}", quote(gov), quote(dep), quote(relation.as_str()))?;
                if *weight != DEFAULT_WEIGHT {
                    write!(f, " -weight {}", weight)?;
                }
                if *extra {
                    write!(f, " -extra")?;
                }
                Ok(())
            }
            EditOp::AddDependentNode {
                gov,
                relation,
                node,
                placement,
                name,
            } => {
                write!(f, " -gov {} -reln {} -word {}", quote(gov), quote(relation.as_str()), quote(&node.word))?;
                if let Some(lemma) = &node.lemma {
                    write!(f, " -lemma {}", quote(lemma))?;
                }
                if let Some(tag) = &node.tag {
                    write!(f, " -tag {}", quote(tag))?;
                }
                for (key, value) in &node.attributes {
                    write!(f, " -attr {}", quote(&format!("{}={}", key, value)))?;
                }
                if let Some(name) = name {
                    write!(f, " -name {}", quote(name))?;
                }
                if let Some(placement) = placement {
                    write!(f, " -position {}", placement.keyword())?;
                }
                Ok(())
            }
            EditOp::DeleteSubgraph { node } => write!(f, " -node {}", quote(node)),
            EditOp::RelabelEdge { edge, relation } => {
                write_selector(f, edge)?;
                write!(f, " -reln {}", quote(relation.as_str()))
            }
        }
    }
}
