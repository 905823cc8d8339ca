//! Rendering pipeline: document tree → synchronized text / chapter /
//! HTML-fragment outputs.
//!
//! Every renderer returns a [`RenderResult`]; the body/section walker
//! additionally produces chapter entries. HTML is accumulated as a flat
//! fragment stream and only assembled into a document by the
//! post-processor in [`html`].

mod assemble;
mod body;
mod html;
mod inline;
mod links;
mod meta;

pub(crate) use assemble::Assembled;
pub(crate) use html::build_html;
pub use links::inline_html;

use crate::locale::Catalog;
use crate::xml::{Document, NodeId};

/// The universal return shape of every renderer: CRLF-terminated plain text
/// plus the HTML fragments covering the same content.
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub text: String,
    pub html: Vec<HtmlFragment>,
}

impl RenderResult {
    pub fn new() -> RenderResult {
        RenderResult::default()
    }

    /// Append another result in document order.
    pub fn append(&mut self, other: RenderResult) {
        self.text.push_str(&other.text);
        self.html.extend(other.html);
    }
}

/// Anchor semantics of a fragment, resolved by the HTML post-processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// No anchor; the content is wrapped in its tag as-is.
    None,
    /// A heading eligible for sequential anchor-id assignment and a table
    /// of contents entry.
    AutoTarget,
    /// The target side of a footnote pair: `name="bunch_{id}"`, jumping
    /// back via `href="#return_{id}"`.
    BackRef(String),
    /// The citation side of a footnote pair: `name="return_{id}"`, jumping
    /// via `href="#bunch_{id}"`. Kept for contract completeness; no
    /// renderer currently constructs it.
    ForwardRef(String),
}

/// One flat HTML fragment.
///
/// `tag == None` means `content` is already-rendered HTML and is emitted
/// verbatim; otherwise `content` is wrapped as `<tag>content</tag>` with
/// the anchor treatment applied.
#[derive(Debug, Clone)]
pub struct HtmlFragment {
    pub tag: Option<&'static str>,
    pub content: String,
    pub anchor: Anchor,
}

impl HtmlFragment {
    /// Pre-rendered raw HTML, emitted verbatim.
    pub fn raw(content: impl Into<String>) -> HtmlFragment {
        HtmlFragment {
            tag: None,
            content: content.into(),
            anchor: Anchor::None,
        }
    }

    /// Content wrapped in a tag, no anchor semantics.
    pub fn tagged(tag: &'static str, content: impl Into<String>) -> HtmlFragment {
        HtmlFragment {
            tag: Some(tag),
            content: content.into(),
            anchor: Anchor::None,
        }
    }

    /// A heading that participates in anchor assignment and the TOC.
    pub fn heading(tag: &'static str, content: impl Into<String>) -> HtmlFragment {
        HtmlFragment {
            tag: Some(tag),
            content: content.into(),
            anchor: Anchor::AutoTarget,
        }
    }

    /// Content wrapped in a tag and the bunch/return anchor pair.
    pub fn back_ref(
        tag: &'static str,
        content: impl Into<String>,
        id: impl Into<String>,
    ) -> HtmlFragment {
        HtmlFragment {
            tag: Some(tag),
            content: content.into(),
            anchor: Anchor::BackRef(id.into()),
        }
    }
}

/// Shared context for all renderers: the tree and the locale catalog.
pub(crate) struct Renderer<'a> {
    pub(crate) doc: &'a Document,
    pub(crate) catalog: &'a Catalog,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(doc: &'a Document, catalog: &'a Catalog) -> Renderer<'a> {
        Renderer { doc, catalog }
    }
}

/// True for text runs that carry non-whitespace content.
pub(crate) fn is_content_text(doc: &Document, id: NodeId) -> bool {
    doc.text_run(id).is_some_and(|t| !t.trim().is_empty())
}
