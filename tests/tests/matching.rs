//! Match-only scenarios over CoNLL-U fixtures.

use semgraft_graph::Graph;
use semgraft_pattern::{compile, Matcher};
use semgraft_tests::fixtures_root;
use semgraft_tests::prelude::*;

fn sentence(index: usize) -> Graph {
    let text = std::fs::read_to_string(fixtures_root().join("conllu/sentences.conllu")).unwrap();
    semgraft_conllu::read_str(&text).unwrap().remove(index)
}

fn count(pattern: &str, graph: &Graph) -> usize {
    let pattern = compile(pattern).unwrap();
    Matcher::new(&pattern, graph).find_all().len()
}

mod dog_sentence {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("dog_sentence")
            .conllu_sentence("conllu/sentences.conllu", 1)
            .operations("operations/matching.sg")
            .step("nsubj_ancestors", |a| a.matches(2).binds("A", "My").binds("B", "likes"))
            .step("any_descendant", |a| a.matches(6))
            .step("possessed_subject", |a| {
                a.matches(1).binds("n", "dog").binds("p", "My").binds("v", "likes")
            })
            .step("subject_by_lemma", |a| a.matches(1).binds("s", "dog"))
            .step("no_such_relation", |a| a.no_matches())
            .step("verbs_without_objects", |a| a.matches(1).binds("v", "likes"))
    }

    #[test]
    fn test_dog_sentence() {
        init_tracing();
        scenario().run().unwrap();
    }
}

// ========== TEST: transitive search terminates on cycles ==========

#[test]
fn test_enhanced_cycle_terminates() {
    // GIVEN the relative clause, whose enhanced edges form man > left > man
    let graph = sentence(2);

    // WHEN searching through the cycle
    // THEN the far node is reached once and the source never counts
    assert_eq!(count("{word:left} >> {word:man}", &graph), 1);
    assert_eq!(count("{word:man} >> {word:left}", &graph), 1);
    assert_eq!(count("{word:man} >> {word:man}", &graph), 0);
    assert_eq!(count("{word:man} << {word:man}", &graph), 0);
}

// ========== TEST: enhanced edges are ordinary edges to the matcher ==========

#[test]
fn test_enhanced_edges_are_matched() {
    // GIVEN the relative clause
    let graph = sentence(2);

    // WHEN matching the enhanced subject edge left > man
    let pattern = compile("{word:left}=v >nsubj {}=s").unwrap();
    let found = Matcher::new(&pattern, &graph).find_all();

    // THEN both the primary subject (who) and the enhanced one (man) are found
    let subjects: Vec<&str> = found
        .iter()
        .filter_map(|m| m.node("s"))
        .filter_map(|id| graph.node(id))
        .map(|n| n.word.as_str())
        .collect();
    assert_eq!(subjects, vec!["man", "who"]);
}

// ========== TEST: empty nodes take part in matching ==========

#[test]
fn test_empty_node_is_matchable() {
    // GIVEN the elided verb 5.1
    let graph = sentence(3);

    // WHEN matching verbs with an object
    // THEN the overt verb and the empty copy both qualify
    assert_eq!(count("{lemma:like} >obj {}", &graph), 2);
    assert_eq!(count("{lemma:like}=v >nsubj {word:Bill}", &graph), 1);
}

// ========== TEST: root-only predicate ==========

#[test]
fn test_root_predicate() {
    // GIVEN the haven't sentence
    let graph = sentence(0);

    // WHEN matching the root and its dependents
    // THEN only the declared root qualifies
    assert_eq!(count("{$}", &graph), 1);
    assert_eq!(count("{$} > {}", &graph), 4);
    assert_eq!(count("{$;tag:NN}", &graph), 0);
}
