/// Name of the rule a parse starts from unless configured otherwise.
pub const ENTRY_RULE: &str = "ENTRY";

/// Settings for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    entry_rule: String,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule a parse starts from.
    pub fn with_entry_rule<S: Into<String>>(mut self, name: S) -> Self {
        self.entry_rule = name.into();
        self
    }

    pub fn entry_rule(&self) -> &str {
        &self.entry_rule
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            entry_rule: ENTRY_RULE.to_string(),
        }
    }
}
