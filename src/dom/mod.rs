//! Page documents and their mount points
//!
//! A [`Document`] wraps the HTML of one page and lets the assembler replace
//! the contents of elements looked up by `id`, with the same rules as
//! `getElementById`: the page is parsed by html5ever (through `scraper`),
//! attribute names are case-insensitive, unquoted values are accepted,
//! markup inside comments is not an element, and the first element in
//! document order wins.
//!
//! The page is kept as text and parsed for each lookup or change. A page
//! that is never changed is returned byte for byte; a changed page is
//! re-serialized from the parsed tree.

use scraper::{ElementRef, Html};
use std::fmt;

use crate::helpers::html_escape;

/// Well-known mount point ids
pub mod ids {
    pub const HEADER: &str = "header";
    pub const FOOTER: &str = "footer";
    pub const SITE_TITLE: &str = "siteTitle";
    pub const POST_LIST: &str = "postList";
    pub const POST_CONTAINER: &str = "postContainer";
    pub const POST_TITLE: &str = "postTitle";
    pub const WEBGL_LIST: &str = "webglList";
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A pending change to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Replace the element's children with raw HTML
    InnerHtml { id: String, html: String },
    /// Replace the element's children with escaped text
    Text { id: String, text: String },
}

impl Patch {
    pub fn inner_html(id: &str, html: impl Into<String>) -> Self {
        Patch::InnerHtml {
            id: id.to_string(),
            html: html.into(),
        }
    }

    pub fn text(id: &str, text: impl Into<String>) -> Self {
        Patch::Text {
            id: id.to_string(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Patch::InnerHtml { id, .. } | Patch::Text { id, .. } => id,
        }
    }
}

/// An HTML page being assembled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn parse(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    fn tree(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Whether an element with this id exists
    pub fn has(&self, id: &str) -> bool {
        find(&self.tree(), id).is_some()
    }

    /// Serialized children of the element
    pub fn inner_html(&self, id: &str) -> Option<String> {
        find(&self.tree(), id).map(|el| el.inner_html())
    }

    /// Replace the element's children; false when the element is missing
    pub fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        let mut tree = self.tree();
        let target = match find(&tree, id) {
            None => return false,
            Some(el) if VOID_ELEMENTS.contains(&el.value().name()) => {
                tracing::warn!("#{} is a void element, cannot set its content", id);
                return false;
            }
            Some(el) => (*el).id(),
        };

        let Some(mut node) = tree.tree.get_mut(target) else {
            return false;
        };
        while let Some(mut child) = node.first_child() {
            child.detach();
        }

        // Copy the parsed fragment's nodes under the target
        let fragment = Html::parse_fragment(html);
        let mut pending = vec![(target, (*fragment.root_element()).id())];
        while let Some((dest, source)) = pending.pop() {
            let Some(source) = fragment.tree.get(source) else {
                continue;
            };
            for child in source.children() {
                let Some(mut parent) = tree.tree.get_mut(dest) else {
                    break;
                };
                let copied = parent.append(child.value().clone()).id();
                pending.push((copied, child.id()));
            }
        }

        self.html = tree.html();
        true
    }

    /// Replace the element's children with text
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.set_inner_html(id, &html_escape(text))
    }

    pub fn apply(&mut self, patch: &Patch) -> bool {
        match patch {
            Patch::InnerHtml { id, html } => self.set_inner_html(id, html),
            Patch::Text { id, text } => self.set_text(id, text),
        }
    }
}

/// First element in document order carrying `id`
fn find<'a>(tree: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    tree.tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().id() == Some(id))
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}
