mod common;

use common::{corpus, generate_dump, simplified_bounds};
use dumpscope_api::models::{NodeKind, TreeStatus};
use dumpscope_core::{
    Analyzer, GraphProjector, ParseOptions, SequentialIds, SimplifyOptions, TreeBuilder,
    TreeSimplifier,
};

fn first_non_blank(text: &str) -> &str {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .find(|l| !l.trim().is_empty())
        .unwrap()
}

#[test]
fn builder_is_total_on_generated_input() {
    let builder = TreeBuilder::default();
    for text in corpus() {
        let tree = builder.build(&text);
        assert_eq!(tree.status, TreeStatus::Parsed, "input:\n{}", text);
    }
}

#[test]
fn builder_is_total_on_arbitrary_bytes() {
    let builder = TreeBuilder::default();
    let samples = [
        "\u{0}\u{1}\u{2}",
        "}}}}}",
        "    \t  Fn {\n\t\tident:",
        "[[[[[[",
        "{\"label\": 3}",
        "\r\r\r",
        "ident: x\n  symbol: \"\"\n",
    ];
    for text in samples {
        let tree = builder.build(text);
        assert!(!tree.is_failed(), "input {:?}", text);
    }
}

#[test]
fn root_comes_from_the_first_non_blank_line() {
    let options = ParseOptions {
        structured_input: false,
        ..ParseOptions::default()
    };
    for builder in [
        TreeBuilder::new(options.clone()),
        TreeBuilder::new(ParseOptions {
            skip_closers: false,
            fold_fields: false,
            ..options
        }),
    ] {
        for text in corpus().map(|t| format!("\n\n{}", t)) {
            let tree = builder.build(&text);
            assert_eq!(tree.root().source_line, first_non_blank(&text));
        }
    }
}

#[test]
fn building_twice_gives_the_same_tree() {
    let builder = TreeBuilder::default();
    for text in corpus() {
        assert_eq!(builder.build(&text), builder.build(&text));

        let mut a = SequentialIds::new("a");
        let mut b = SequentialIds::new("b");
        let first = builder.build_with_ids(&text, &mut a);
        let second = builder.build_with_ids(&text, &mut b);
        let shape = |t: &dumpscope_api::models::Tree| {
            t.root()
                .walk()
                .map(|(n, d)| (n.label.clone(), n.kind.clone(), d, n.children.len()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&first), shape(&second));
        assert_eq!(a.issued(), b.issued());
    }
}

#[test]
fn node_ids_are_unique() {
    let builder = TreeBuilder::default();
    for text in corpus() {
        let tree = builder.build(&text);
        let mut ids: Vec<_> = tree.root().walk().map(|(n, _)| n.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}

#[test]
fn simplifier_respects_its_bounds() {
    let builder = TreeBuilder::default();
    for (max_depth, max_children) in [(0, 0), (1, 1), (2, 3), (5, 10), (8, 2)] {
        let simplifier = TreeSimplifier::new(SimplifyOptions {
            max_depth,
            max_children,
        });
        for text in corpus() {
            let tree = builder.build(&text);
            let simplified = simplifier.simplify_tree(&tree);
            let (widest, deepest) = simplified_bounds(&simplified);
            assert!(widest <= max_children + 1);
            assert!(deepest <= max_depth);
        }
    }
}

#[test]
fn graph_has_one_edge_per_non_root_node() {
    let builder = TreeBuilder::default();
    let projector = GraphProjector::default();
    for text in corpus() {
        let tree = builder.build(&text);
        let view = projector.project_tree(&tree);
        assert_eq!(view.nodes.len(), tree.node_count());
        assert_eq!(view.edges.len(), view.nodes.len() - 1);
        assert_eq!(view.to_digraph().edge_count(), view.edges.len());
    }
}

#[test]
fn stats_agree_with_the_text() {
    let analyzer = Analyzer::default();
    for seed in 0..50 {
        let text = generate_dump(seed);
        let stats = analyzer.collect_stats(&text);
        assert_eq!(stats.raw_byte_size, text.len());
        assert_eq!(stats.total_lines, text.split('\n').count());
        assert!(stats.non_empty_lines <= stats.total_lines);
        assert!(stats.approx_node_count >= 1);
    }
}

#[test]
fn kinds_are_lower_cased_tags() {
    let tree = TreeBuilder::default().build(&generate_dump(7));
    for (node, _) in tree.root().walk() {
        let tag = node.kind.as_str();
        assert_eq!(tag, tag.to_lowercase());
    }
    assert_eq!(tree.root().kind, NodeKind::Crate);
}
