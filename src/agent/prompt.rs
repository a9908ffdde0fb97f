//! Structured prompt building.
//!
//! Stage prompts mix fixed instruction text with user- and provider-supplied
//! content (generated code, capability schemas, fetched pages). The builder
//! keeps the two apart: instruction text is authored here, interpolated
//! content is appended as an opaque value and never re-parsed for template
//! syntax. Braces and any other markup in the content survive verbatim, so
//! no escaping pass exists anywhere in the pipeline.

/// A fully built stage prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builder for a [`Prompt`].
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system: String,
    user: String,
}

impl PromptBuilder {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: String::new(),
        }
    }

    /// Append a line of fixed instruction text.
    pub fn line(mut self, text: &str) -> Self {
        self.user.push_str(text);
        self.user.push('\n');
        self
    }

    /// Append a labeled opaque value: `label: content.` The content is taken
    /// verbatim; it is never scanned for placeholders.
    pub fn value(mut self, label: &str, content: &str) -> Self {
        self.user.push_str(label);
        self.user.push_str(": ");
        self.user.push_str(content);
        self.user.push_str(".\n");
        self
    }

    /// Append a labeled sequence of opaque values, comma-joined.
    pub fn values(self, label: &str, items: &[String]) -> Self {
        self.value(label, &items.join(", "))
    }

    pub fn build(self) -> Prompt {
        Prompt {
            system: self.system,
            user: self.user,
        }
    }
}
