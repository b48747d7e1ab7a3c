use dumpscope_api::models::{NodeKind, Tree, TreeStatus};
use dumpscope_core::{Analyzer, ContainerPredicate, DumpscopeConfig, OpenerSet, TreeBuilder};

const MAIN_FN: &str = "Crate {\n  Fn {\n    ident: main\n  }\n}\n";

#[test]
fn crate_with_main_function() {
    let analyzer = Analyzer::default();
    let tree = analyzer.build_tree(MAIN_FN);

    let root = tree.root();
    assert_eq!(root.kind.as_str(), "crate");
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].kind.as_str(), "fn");
    assert!(root.children[0].label.contains("main"));

    let graph = analyzer.project(&tree);
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, root.id);
    assert_eq!(graph.edges[0].target, root.children[0].id);
}

#[test]
fn literal_line_mode_keeps_fields_and_closers() {
    let mut config = DumpscopeConfig::default();
    config.parse.skip_closers = false;
    config.parse.fold_fields = false;
    let tree = Analyzer::new(config).build_tree(MAIN_FN);

    let labels: Vec<_> = tree.root().walk().map(|(n, _)| n.label.as_str()).collect();
    assert_eq!(labels, vec!["Crate {", "Fn {", "ident: main", "}", "}"]);
}

#[test]
fn blank_only_input_is_the_empty_sentinel() {
    let analyzer = Analyzer::default();
    let text = "\n   \n\t\n";
    let tree = analyzer.build_tree(text);

    assert_eq!(tree.status, TreeStatus::Empty);
    assert_eq!(tree.root().label, Tree::EMPTY_LABEL);
    assert!(tree.root().children.is_empty());
    assert_eq!(analyzer.collect_stats(text).non_empty_lines, 0);
}

#[test]
fn empty_string_stats() {
    let stats = Analyzer::default().collect_stats("");
    assert_eq!(stats.total_lines, 1);
    assert_eq!(stats.non_empty_lines, 0);
    assert_eq!(stats.max_indent_level, 0);
    assert_eq!(stats.approx_node_count, 0);
}

#[test]
fn two_functions_in_order() {
    let symbols = Analyzer::default().extract_symbols("Fn { ident: foo }\nFn { ident: bar }");
    assert_eq!(symbols.functions, vec!["foo", "bar"]);
}

#[test]
fn faulty_container_predicate_yields_error_tree() {
    let builder = TreeBuilder::default().with_container(|line: &str| -> bool {
        if line.starts_with("Boom") {
            panic!("cannot classify {}", line);
        }
        OpenerSet::default().is_container(line)
    });
    let analyzer = Analyzer::default().with_builder(builder);

    let analysis = analyzer.analyze("Crate {\n  Boom {\n  }\n}\nFn { ident: still_found }");
    assert_eq!(analysis.tree.status, TreeStatus::Failed);
    assert_eq!(analysis.tree.root().kind, NodeKind::Error);
    assert_eq!(analysis.tree.root().label, "parse failed");
    assert_eq!(analysis.tree.root().children[0].label, "cannot classify Boom {");
    assert_eq!(analysis.symbols.functions, vec!["still_found"]);
    assert_eq!(analysis.graph.nodes.len(), 2);
}

#[test]
fn structured_input_is_analyzed_like_text() {
    let json = r#"{
        "label": "Crate",
        "type": "crate",
        "children": [
            { "id": "f", "label": "Fn: main", "type": "fn", "fullText": "Fn { ident: main }" }
        ]
    }"#;
    let analysis = Analyzer::default().analyze(json);

    assert_eq!(analysis.tree.status, TreeStatus::Structured);
    assert_eq!(analysis.tree.root().children[0].id, "f");
    assert!(analysis.tree.root().has_id());
    assert_eq!(analysis.graph.edges.len(), 1);
    assert_eq!(analysis.symbols.functions, vec!["main"]);
}

#[test]
fn analysis_serializes_with_wire_names() {
    let analysis = Analyzer::default().analyze(MAIN_FN);
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["tree"]["status"], "parsed");
    assert_eq!(json["stats"]["totalLines"], 6);
    assert_eq!(json["graph"]["nodes"][0]["labelStyle"]["fontSize"], 12);
    assert_eq!(json["symbols"]["functions"][0], "main");
}
