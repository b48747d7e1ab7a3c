use crate::util::collapse_whitespace;
use dumpscope_api::models::{Node, NodeKind};
use once_cell::sync::Lazy;
use regex::Regex;

static KIND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z]*").expect("kind pattern is valid"));
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ident:\s*([^,}\s]+)").expect("ident pattern is valid"));
static LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"symbol:\s*"([^"]+)""#).expect("literal pattern is valid"));

/// What a single dump line says about the node it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    /// Leading type name as written, `Unknown` when absent
    pub type_name: String,
    pub kind: NodeKind,
    pub ident: Option<String>,
    pub literal: Option<String>,
    pub label: String,
    pub source_line: String,
}

impl ClassifiedLine {
    pub fn into_node(self, id: String) -> Node {
        Node::new(id, self.label, self.kind, self.source_line)
    }
}

/// Best-effort reading of one line: a capitalised type name, an `ident:` value,
/// a `symbol: "..."` literal and a display label.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    label_limit: usize,
}

impl LineClassifier {
    pub fn new(label_limit: usize) -> Self {
        Self { label_limit }
    }

    /// `line` may still carry its indentation; it is stripped before matching.
    pub fn classify(&self, line: &str) -> ClassifiedLine {
        let content = line.trim();

        let type_name = KIND_RE
            .find(content)
            .map(|m| m.as_str())
            .unwrap_or("Unknown");
        let ident = capture(&IDENT_RE, content);
        let literal = capture(&LITERAL_RE, content);

        let collapsed = collapse_whitespace(content);
        let label = if collapsed.chars().count() < self.label_limit {
            collapsed
        } else if let Some(ident) = &ident {
            format!("{}: {}", type_name, ident)
        } else if let Some(literal) = &literal {
            format!("{}: \"{}\"", type_name, literal)
        } else {
            type_name.to_string()
        };

        ClassifiedLine {
            type_name: type_name.to_string(),
            kind: NodeKind::from(type_name),
            ident,
            literal,
            label,
            source_line: line.to_string(),
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(50)
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
