//! Tunables for every stage of the pipeline.
//!
//! All structs are `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names.

use crate::error::{DumpscopeError, Result};
use dumpscope_api::models::{EdgeStyle, KindCategory};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParseOptions {
    /// Leading whitespace characters per nesting level. 0 is treated as 1.
    pub indent_width: usize,
    /// Collapsed lines shorter than this (in chars) are used verbatim as labels.
    pub label_limit: usize,
    /// A line containing any of these may own the lines indented below it.
    pub container_openers: Vec<char>,
    /// Try to read input starting with `{` or `[` as a JSON tree first.
    pub structured_input: bool,
    /// Lines made only of closing delimiters (`}`, `],`, ...) produce no node.
    pub skip_closers: bool,
    /// A type-less, non-container line carrying `ident:` or `symbol:` is merged
    /// into its parent instead of becoming a child.
    pub fold_fields: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            label_limit: 50,
            container_openers: vec!['{', '['],
            structured_input: true,
            skip_closers: true,
            fold_fields: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SimplifyOptions {
    pub max_depth: usize,
    pub max_children: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_children: 10,
        }
    }
}

/// Fill/stroke colour per kind category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    #[serde(rename = "crate")]
    pub krate: String,
    pub item: String,
    pub block: String,
    pub statement: String,
    pub literal: String,
    pub other: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            krate: "#722ed1".to_string(),
            item: "#13c2c2".to_string(),
            block: "#52c41a".to_string(),
            statement: "#fa8c16".to_string(),
            literal: "#f5222d".to_string(),
            other: "#1890ff".to_string(),
        }
    }
}

impl Palette {
    pub fn color(&self, category: KindCategory) -> &str {
        match category {
            KindCategory::Crate => &self.krate,
            KindCategory::Item => &self.item,
            KindCategory::Block => &self.block,
            KindCategory::Statement => &self.statement,
            KindCategory::Literal => &self.literal,
            KindCategory::Other => &self.other,
        }
    }
}

/// Visual constants used by the graph projector. Cosmetic, not a contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GraphStyle {
    pub palette: Palette,
    pub node_shape: String,
    pub base_size: u32,
    pub size_step: u32,
    pub min_size: u32,
    pub base_font_size: u32,
    pub font_step: u32,
    pub min_font_size: u32,
    pub label_color: String,
    pub edge: EdgeStyle,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            node_shape: "circle".to_string(),
            base_size: 32,
            size_step: 4,
            min_size: 8,
            base_font_size: 12,
            font_step: 1,
            min_font_size: 6,
            label_color: "#fff".to_string(),
            edge: EdgeStyle {
                stroke: "#8c8c8c".to_string(),
                line_width: 1.0,
                opacity: 0.6,
            },
        }
    }
}

impl GraphStyle {
    /// Node diameter at `depth`, clamped to `min_size`.
    pub fn node_size(&self, depth: usize) -> u32 {
        shrink(self.base_size, self.size_step, depth).max(self.min_size)
    }

    pub fn font_size(&self, depth: usize) -> u32 {
        shrink(self.base_font_size, self.font_step, depth).max(self.min_font_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(DumpscopeError::Config("min_size must be positive".to_string()));
        }
        if self.min_font_size == 0 {
            return Err(DumpscopeError::Config(
                "min_font_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.edge.opacity) {
            return Err(DumpscopeError::Config(format!(
                "edge opacity {} is outside 0..=1",
                self.edge.opacity
            )));
        }
        Ok(())
    }
}

fn shrink(base: u32, step: u32, depth: usize) -> u32 {
    let depth = u32::try_from(depth).unwrap_or(u32::MAX);
    base.saturating_sub(step.saturating_mul(depth))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DumpscopeConfig {
    pub parse: ParseOptions,
    pub simplify: SimplifyOptions,
    pub style: GraphStyle,
}

impl DumpscopeConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DumpscopeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parse.container_openers.is_empty() {
            tracing::warn!("No container openers configured; every line after the root will be a leaf");
        }
        self.style.validate()
    }
}
