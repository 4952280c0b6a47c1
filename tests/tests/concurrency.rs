//! Compiled patterns and scripts shared across threads.

use semgraft_graph::Graph;
use semgraft_pattern::{compile, Matcher};
use semgraft_surgery::SurgeryScript;

fn graphs() -> Vec<Graph> {
    [
        "[ran nsubj>dogs advmod>fast]",
        "[barked nsubj>[dog det>the]]",
        "[saw nsubj>I dobj>[man det>the]]",
        "[mixed nsubj>[Joe appos>[bartender det>the]] dobj>[drink det>a]]",
    ]
    .iter()
    .map(|text| Graph::from_compact(text).unwrap())
    .collect()
}

// ========== TEST: one compiled pattern, many matching threads ==========

#[test]
fn test_shared_pattern_across_threads() {
    // GIVEN one compiled pattern and several graphs
    let pattern = compile("{}=h >nsubj {}=s").unwrap();
    let graphs = graphs();

    // WHEN each graph is matched on its own thread
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = graphs
            .iter()
            .map(|graph| {
                let pattern = &pattern;
                scope.spawn(move || Matcher::new(pattern, graph).find_all().len())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // THEN every thread sees the same results as a sequential run
    let sequential: Vec<usize> = graphs
        .iter()
        .map(|graph| Matcher::new(&pattern, graph).find_all().len())
        .collect();
    assert_eq!(counts, sequential);
    assert_eq!(counts, vec![1, 1, 1, 1]);
}

// ========== TEST: one script, many rewriting threads ==========

#[test]
fn test_shared_script_across_threads() {
    // GIVEN a script removing every determiner
    let script = SurgeryScript::parse("{}=h >det=e {}=d", "delete -node d").unwrap();
    let graphs = graphs();

    // WHEN the script runs over each graph on its own thread
    let rendered: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = graphs
            .iter()
            .map(|graph| {
                let script = &script;
                scope.spawn(move || {
                    script
                        .apply(graph)
                        .iter()
                        .filter_map(|d| d.graph())
                        .map(Graph::to_compact_string)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // THEN each derivation drops one determiner and the inputs are untouched
    assert_eq!(rendered[0], Vec::<String>::new());
    assert_eq!(rendered[1], vec!["[barked nsubj>dog]".to_string()]);
    assert_eq!(rendered[2], vec!["[saw nsubj>I dobj>man]".to_string()]);
    assert_eq!(rendered[3].len(), 2);
    assert_eq!(graphs[1].to_compact_string(), "[barked nsubj>[dog det>the]]");
}
