use crate::util::leading_whitespace;

/// Maps a line's leading whitespace to a nesting level: `floor(count / width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentTracker {
    width: usize,
}

impl IndentTracker {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn level(&self, raw_line: &str) -> usize {
        leading_whitespace(raw_line) / self.width
    }
}

impl Default for IndentTracker {
    fn default() -> Self {
        Self::new(2)
    }
}
