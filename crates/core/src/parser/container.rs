/// Decides whether a line may own the more-indented lines that follow it.
pub trait ContainerPredicate: Send + Sync {
    fn is_container(&self, line: &str) -> bool;
}

/// A line is a container when it contains any of the opener characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenerSet {
    openers: Vec<char>,
}

impl OpenerSet {
    pub fn new(openers: impl Into<Vec<char>>) -> Self {
        Self {
            openers: openers.into(),
        }
    }
}

impl Default for OpenerSet {
    fn default() -> Self {
        Self::new(vec!['{', '['])
    }
}

impl ContainerPredicate for OpenerSet {
    fn is_container(&self, line: &str) -> bool {
        line.contains(self.openers.as_slice())
    }
}

impl<F> ContainerPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_container(&self, line: &str) -> bool {
        self(line)
    }
}
