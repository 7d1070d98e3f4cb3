//! Markdown rendering for blog posts
//!
//! Posts use a small subset of markdown: `#` and `##` headings, `**bold**`,
//! `*italic*` and hard line breaks. Rendering is a fixed pipeline of
//! substitutions; the order is part of the output contract (headings before
//! emphasis, bold before italic, line breaks last).
//!
//! The source is trusted author content and is not HTML-escaped. Nested or
//! unbalanced asterisks beyond one level render incorrectly.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule::new(r"(?m)^# (.*)$", "<h1>$1</h1>"),
        Rule::new(r"(?m)^## (.*)$", "<h2>$1</h2>"),
        Rule::new(r"\*\*(.*?)\*\*", "<b>$1</b>"),
        Rule::new(r"\*(.*?)\*", "<i>$1</i>"),
        Rule::new(r"\n", "<br>"),
    ];
}

/// A single substitution step
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("markdown rule pattern"),
            replacement,
        }
    }
}

/// Markdown renderer for the supported subset
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut html = markdown.replace("\r\n", "\n");
        for rule in RULES.iter() {
            html = rule
                .pattern
                .replace_all(&html, rule.replacement)
                .into_owned();
        }
        html
    }
}
