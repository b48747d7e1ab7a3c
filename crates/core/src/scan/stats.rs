use crate::parser::IndentTracker;
use crate::util::split_lines;
use dumpscope_api::models::Stats;
use once_cell::sync::Lazy;
use regex::Regex;

static NODE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-zA-Z]*\s*[{\[]").expect("node start pattern is valid"));

/// Size and shape figures for a dump, computed from the text alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCollector {
    indent: IndentTracker,
}

impl StatsCollector {
    pub fn new(indent: IndentTracker) -> Self {
        Self { indent }
    }

    /// An empty string is one empty line. Every line, whitespace-only ones
    /// included, counts toward `max_indent_level`.
    pub fn collect(&self, text: &str) -> Stats {
        let mut stats = Stats {
            raw_byte_size: text.len(),
            ..Stats::default()
        };

        for line in split_lines(text) {
            stats.total_lines += 1;
            stats.max_indent_level = stats.max_indent_level.max(self.indent.level(line));
            if line.trim().is_empty() {
                continue;
            }
            stats.non_empty_lines += 1;
            if NODE_START_RE.is_match(line) {
                stats.approx_node_count += 1;
            }
        }

        stats
    }
}
