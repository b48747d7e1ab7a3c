use dumpscope_api::models::{KindCategory, Node, Stats, SymbolSummary};
use nu_ansi_term::{Color, Style};
use tabled::settings::Style as TableStyle;
use tabled::{Table, Tabled};

/// One extracted name per row
#[derive(Tabled)]
pub struct SymbolRow {
    pub category: &'static str,
    pub name: String,
}

#[derive(Tabled)]
pub struct StatRow {
    pub metric: &'static str,
    pub value: usize,
}

pub fn symbols_table(symbols: &SymbolSummary) -> String {
    let groups = [
        ("functions", &symbols.functions),
        ("variables", &symbols.variables),
        ("literals", &symbols.literals),
        ("structures", &symbols.structures),
    ];
    let rows: Vec<SymbolRow> = groups
        .iter()
        .flat_map(|&(category, names)| {
            names.iter().map(move |name| SymbolRow {
                category,
                name: name.clone(),
            })
        })
        .collect();

    if rows.is_empty() {
        return "No symbols found.".to_string();
    }
    Table::new(rows).with(TableStyle::psql()).to_string()
}

pub fn stats_table(stats: &Stats) -> String {
    let rows = vec![
        StatRow {
            metric: "total lines",
            value: stats.total_lines,
        },
        StatRow {
            metric: "non-empty lines",
            value: stats.non_empty_lines,
        },
        StatRow {
            metric: "max indent level",
            value: stats.max_indent_level,
        },
        StatRow {
            metric: "approx nodes",
            value: stats.approx_node_count,
        },
        StatRow {
            metric: "bytes",
            value: stats.raw_byte_size,
        },
    ];
    Table::new(rows).with(TableStyle::psql()).to_string()
}

/// Indented outline of the tree, two spaces per level, kind tag in brackets.
pub fn render_tree(root: &Node, color: bool) -> String {
    root.walk()
        .map(|(node, depth)| {
            let indent = "  ".repeat(depth);
            let tag = format!("[{}]", node.kind);
            if color {
                let style = kind_style(KindCategory::from(&node.kind));
                format!("{}{} {}", indent, node.label, style.paint(tag))
            } else {
                format!("{}{} {}", indent, node.label, tag)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn kind_style(category: KindCategory) -> Style {
    match category {
        KindCategory::Crate => Color::Purple.bold(),
        KindCategory::Item => Color::Cyan.bold(),
        KindCategory::Block => Style::new().fg(Color::Green),
        KindCategory::Statement => Style::new().fg(Color::Yellow),
        KindCategory::Literal => Style::new().fg(Color::Red),
        KindCategory::Other => Style::new().fg(Color::LightGray),
    }
}
