use super::{SymbolCategory, SymbolScanner};
use dumpscope_api::models::SymbolSummary;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Fn\s*\{(?s:.*?)ident:\s*([^,\s}]+)").expect("function pattern is valid")
});

// Best effort. The outer fragment ends at the first `}` after `Ident`, and the
// binding is read as the first argument of `Ident(..)` after an optional
// binding mode like `ByValue(Not)`. Modes with braces or nested parentheses
// are missed rather than misread.
static LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Local\s*\{(?s:.*?)pat:\s*Pat\s*\{(?s:.*?)Ident(?s:.*?)([^,\s}]+)[^}]*?\}")
        .expect("local pattern is valid")
});
static LOCAL_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Ident\(\s*(?:[A-Za-z:]+(?:\([^()]*\))?\s*,\s*)?([A-Za-z_][A-Za-z0-9_]*(?:#\d+)?)\s*[,)]",
    )
    .expect("local name pattern is valid")
});

static LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"symbol:\s*"([^"]+)""#).expect("literal pattern is valid"));

static STRUCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Struct|Enum|Trait|Impl)\s*\{(?s:.*?)ident:\s*([^,\s}]+)")
        .expect("structure pattern is valid")
});
static STRUCT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Struct|Enum|Trait|Impl)[^}]*ident:\s*([^,\s}]+)")
        .expect("structure name pattern is valid")
});

/// `Fn { … ident: X` yields `X`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionScanner;

impl SymbolScanner for FunctionScanner {
    fn category(&self) -> SymbolCategory {
        SymbolCategory::Functions
    }

    fn scan(&self, text: &str) -> Vec<String> {
        FN_RE
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// `Local { … pat: Pat { … Ident(…, Y, …) … }` yields `Y`.
///
/// Best effort only; see the pattern notes above for the known misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableScanner;

impl SymbolScanner for VariableScanner {
    fn category(&self) -> SymbolCategory {
        SymbolCategory::Variables
    }

    fn scan(&self, text: &str) -> Vec<String> {
        LOCAL_RE
            .find_iter(text)
            .filter_map(|fragment| {
                let name = LOCAL_NAME_RE
                    .captures(fragment.as_str())
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string());
                if name.is_none() {
                    debug!("Skipping local without a readable binding at byte {}", fragment.start());
                }
                name
            })
            .collect()
    }
}

/// `symbol: "Z"` yields `Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralScanner;

impl SymbolScanner for LiteralScanner {
    fn category(&self) -> SymbolCategory {
        SymbolCategory::Literals
    }

    fn scan(&self, text: &str) -> Vec<String> {
        LITERAL_RE
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// `Struct|Enum|Trait|Impl { … ident: W` yields `"{Kind}: W"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureScanner;

impl SymbolScanner for StructureScanner {
    fn category(&self) -> SymbolCategory {
        SymbolCategory::Structures
    }

    fn scan(&self, text: &str) -> Vec<String> {
        STRUCT_RE
            .find_iter(text)
            .filter_map(|fragment| {
                let caps = STRUCT_NAME_RE.captures(fragment.as_str())?;
                Some(format!("{}: {}", caps.get(1)?.as_str(), caps.get(2)?.as_str()))
            })
            .collect()
    }
}

/// Runs a set of scanners over the same text and files each result under
/// its category. Scanners sharing a category append in registration order.
pub struct SymbolExtractor {
    scanners: Vec<Box<dyn SymbolScanner>>,
}

impl SymbolExtractor {
    /// An extractor with no scanners; see [`Default`] for the standard set.
    pub fn empty() -> Self {
        Self {
            scanners: Vec::new(),
        }
    }

    pub fn with_scanner<S: SymbolScanner + 'static>(mut self, scanner: S) -> Self {
        self.scanners.push(Box::new(scanner));
        self
    }

    pub fn extract(&self, text: &str) -> SymbolSummary {
        let mut summary = SymbolSummary::default();
        for scanner in &self.scanners {
            let found = scanner.scan(text);
            debug!("{} scanner found {} entries", scanner.category(), found.len());
            let target = match scanner.category() {
                SymbolCategory::Functions => &mut summary.functions,
                SymbolCategory::Variables => &mut summary.variables,
                SymbolCategory::Literals => &mut summary.literals,
                SymbolCategory::Structures => &mut summary.structures,
            };
            target.extend(found);
        }
        summary
    }
}

impl Default for SymbolExtractor {
    fn default() -> Self {
        Self::empty()
            .with_scanner(FunctionScanner)
            .with_scanner(VariableScanner)
            .with_scanner(LiteralScanner)
            .with_scanner(StructureScanner)
    }
}

impl std::fmt::Debug for SymbolExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.scanners.iter().map(|s| s.category()))
            .finish()
    }
}
