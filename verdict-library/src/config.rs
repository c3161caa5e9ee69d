//! Registry configuration

/// Options applied when the standard registry is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Namespace prepended to every standard function name
    pub prefix: String,
    /// Whether `emit` hands out inline forms; when off, callers always evaluate
    pub inline: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            prefix: "m.".to_string(),
            inline: true,
        }
    }
}

impl LibraryConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn without_inline(mut self) -> Self {
        self.inline = false;
        self
    }

    pub fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}
