//! Deterministic dump generator shared by the integration tests.

use dumpscope_api::models::SimplifiedNode;

const KINDS: &[&str] = &[
    "Crate", "Item", "Fn", "Block", "Stmt", "Expr", "Lit", "Struct", "Enum", "Local", "Pat",
    "ExprKind", "Path",
];

/// Small linear congruential generator; enough to vary shapes reproducibly.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// A dump-like document: nested `Kind {` lines, `ident:`/`symbol:` fields,
/// closers, blank lines, stray indentation and the odd CRLF.
#[allow(dead_code)]
pub fn generate_dump(seed: u64) -> String {
    let mut rng = Lcg::new(seed);
    let crlf = rng.below(5) == 0;
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0usize;

    lines.push("Crate {".to_string());
    let target = 5 + rng.below(60) as usize;
    while lines.len() < target {
        let indent = "  ".repeat(depth + 1);
        match rng.below(10) {
            0 | 1 | 2 => {
                let kind = KINDS[rng.below(KINDS.len() as u64) as usize];
                lines.push(format!("{}{} {{", indent, kind));
                depth += 1;
            }
            3 => lines.push(format!("{}ident: name{}", indent, rng.below(100))),
            4 => lines.push(format!("{}symbol: \"lit{}\",", indent, rng.below(100))),
            5 if depth > 0 => {
                depth -= 1;
                lines.push(format!("{}}},", "  ".repeat(depth + 1)));
            }
            6 => lines.push(String::new()),
            7 => {
                let stray = " ".repeat(rng.below(12) as usize);
                lines.push(format!("{}span: src/main.rs:{}:1", stray, rng.below(50)));
            }
            8 => lines.push(format!("{}items: [", indent)),
            _ => lines.push(format!(
                "{}Lit {{ kind: Str, symbol: \"s{}\", suffix: None, span: src/lib.rs:1:1: 1:9 }}",
                indent,
                rng.below(10)
            )),
        }
    }
    while depth > 0 {
        depth -= 1;
        lines.push(format!("{}}}", "  ".repeat(depth + 1)));
    }
    lines.push("}".to_string());

    lines.join(if crlf { "\r\n" } else { "\n" })
}

#[allow(dead_code)]
pub fn corpus() -> impl Iterator<Item = String> {
    (0..200).map(generate_dump)
}

/// Largest child count and deepest `depth` field anywhere in `node`.
#[allow(dead_code)]
pub fn simplified_bounds(node: &SimplifiedNode) -> (usize, usize) {
    let mut widest = 0;
    let mut deepest = 0;
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        widest = widest.max(current.children.len());
        deepest = deepest.max(current.depth);
        stack.extend(current.children.iter());
    }
    (widest, deepest)
}
