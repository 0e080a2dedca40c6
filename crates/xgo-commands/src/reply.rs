use serde::Serialize;

/// Lines a command sends back to the player who issued it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    /// An empty reply. Successful teleports say nothing.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
