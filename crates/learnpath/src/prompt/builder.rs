//! Section-based prompt assembly.

/// Builder for multi-section prompts.
///
/// Sections are joined with double newlines. Sections with empty content
/// are silently skipped.
///
/// # Example
///
/// ```
/// use learnpath::prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new("You are a curriculum architect.")
///     .section("Learner", "Goal: 'Learn Rust'")
///     .section("Missing", "")
///     .raw("Output JSON only.")
///     .build();
///
/// assert!(prompt.contains("## Learner"));
/// assert!(!prompt.contains("## Missing"));
/// assert!(prompt.ends_with("Output JSON only."));
/// ```
pub struct PromptBuilder {
    sections: Vec<String>,
}

impl PromptBuilder {
    /// Create a new builder with an initial preamble section.
    ///
    /// The preamble is included as-is. Sections added via `section()` get
    /// `## ` prefixed headings.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            sections: vec![preamble.into()],
        }
    }

    /// Append a named section with a markdown heading. Skipped if `content`
    /// is empty.
    pub fn section(mut self, heading: &str, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.sections.push(format!("## {heading}\n\n{content}"));
        }
        self
    }

    /// Append a numbered list as a section.
    pub fn numbered(self, heading: &str, items: &[String]) -> Self {
        let body = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {item}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        self.section(heading, body)
    }

    /// Append raw text without a heading. Skipped if `content` is empty.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.sections.push(content);
        }
        self
    }

    /// Join all sections with double newlines.
    pub fn build(self) -> String {
        self.sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_only() {
        assert_eq!(PromptBuilder::new("Hello.").build(), "Hello.");
    }

    #[test]
    fn sections_are_joined_in_order() {
        let prompt = PromptBuilder::new("Intro")
            .section("A", "first")
            .raw("middle")
            .section("B", "second")
            .build();
        assert_eq!(prompt, "Intro\n\n## A\n\nfirst\n\nmiddle\n\n## B\n\nsecond");
    }

    #[test]
    fn numbered_list() {
        let prompt = PromptBuilder::new("Intro")
            .numbered("Rules", &["one".to_string(), "two".to_string()])
            .build();
        assert!(prompt.contains("## Rules\n\n1. one\n2. two"));
    }

    #[test]
    fn empty_content_is_skipped() {
        let prompt = PromptBuilder::new("Intro").raw("").numbered("None", &[]).build();
        assert_eq!(prompt, "Intro");
    }
}
