//! Leaf and inline-container renderers.
//!
//! Each takes one node and returns a [`RenderResult`] whose text ends with
//! a CRLF. Containers walk their recognized children in document order;
//! anything outside the container's content model contributes nothing.

use crate::error::{Error, Result};
use crate::kind::NodeKind;
use crate::xml::{NodeId, escape_xml};

use super::links::inline_html;
use super::{HtmlFragment, RenderResult, Renderer, is_content_text};

/// A rendered `title` element: its content plus the plain display text used
/// for the enclosing heading.
pub(crate) struct TitleRender {
    pub result: RenderResult,
    pub heading: String,
}

impl Renderer<'_> {
    /// A paragraph-like element or bare text run: one text line plus a
    /// `<p>` fragment.
    pub(crate) fn render_line(&self, id: NodeId) -> RenderResult {
        let (text, html) = match self.doc.text_run(id) {
            Some(run) => {
                let trimmed = run.trim();
                (trimmed.to_string(), escape_xml(trimmed))
            }
            None => (
                self.doc.text(id).trim().to_string(),
                inline_html(self.doc, id),
            ),
        };
        RenderResult {
            text: format!("{text}\r\n"),
            html: vec![HtmlFragment::tagged("p", html)],
        }
    }

    /// A blank text line and a raw `<br/>`.
    pub(crate) fn render_empty_line(&self) -> RenderResult {
        RenderResult {
            text: "\r\n".to_string(),
            html: vec![HtmlFragment::raw("<br/>")],
        }
    }

    /// An `<h5>` fragment; an `id` attribute adds the bunch/return anchor
    /// pair, same convention as section headings.
    pub(crate) fn render_subtitle(&self, id: NodeId) -> RenderResult {
        let text = self.doc.text(id).trim().to_string();
        let content = inline_html(self.doc, id);
        let fragment = match self.doc.attribute(id, "id") {
            Some(anchor) if !anchor.is_empty() => HtmlFragment::back_ref("h5", content, anchor),
            _ => HtmlFragment::tagged("h5", content),
        };
        RenderResult {
            text: format!("{text}\r\n"),
            html: vec![fragment],
        }
    }

    /// Tab-separated cell text per row; HTML is the verbatim serialized
    /// subtree. Fails when the table has no rows.
    pub(crate) fn render_table(&self, id: NodeId) -> Result<RenderResult> {
        let rows = self.doc.descendants(id, NodeKind::TableRow);
        if rows.is_empty() {
            return Err(Error::element("tr"));
        }

        let mut text = String::new();
        for row in rows {
            let cells: Vec<String> = self
                .doc
                .children(row)
                .iter()
                .filter(|&&cell| {
                    matches!(
                        self.doc.kind(cell),
                        Some(NodeKind::TableHeader) | Some(NodeKind::TableCell)
                    )
                })
                .map(|&cell| self.doc.text(cell).trim().to_string())
                .collect();
            text.push_str(&cells.join("\t"));
            text.push_str("\r\n");
        }

        Ok(RenderResult {
            text,
            html: vec![HtmlFragment::raw(self.doc.serialize(id))],
        })
    }

    /// A citation: recognized children bracketed by `<blockquote>` markers.
    pub(crate) fn render_cite(&self, id: NodeId) -> Result<RenderResult> {
        let mut result = RenderResult::new();
        for &child in self.doc.children(id) {
            let Some(kind) = self.doc.kind(child) else {
                if is_content_text(self.doc, child) {
                    result.append(self.render_line(child));
                }
                continue;
            };
            match kind {
                NodeKind::Paragraph => result.append(self.render_line(child)),
                NodeKind::Subtitle => result.append(self.render_subtitle(child)),
                NodeKind::EmptyLine => result.append(self.render_empty_line()),
                NodeKind::Poem => result.append(self.render_poem(child)?),
                NodeKind::Table => result.append(self.render_table(child)?),
                NodeKind::TextAuthor => result.append(self.render_line(child)),
                // not part of a citation's content model
                _ => {}
            }
        }
        Ok(blockquote(result))
    }

    /// An epigraph: same bracketing as a citation, slightly different
    /// content model.
    pub(crate) fn render_epigraph(&self, id: NodeId) -> Result<RenderResult> {
        let mut result = RenderResult::new();
        for &child in self.doc.children(id) {
            let Some(kind) = self.doc.kind(child) else {
                if is_content_text(self.doc, child) {
                    result.append(self.render_line(child));
                }
                continue;
            };
            match kind {
                NodeKind::Paragraph => result.append(self.render_line(child)),
                NodeKind::Poem => result.append(self.render_poem(child)?),
                NodeKind::Cite => result.append(self.render_cite(child)?),
                NodeKind::EmptyLine => result.append(self.render_empty_line()),
                NodeKind::TextAuthor => result.append(self.render_line(child)),
                _ => {}
            }
        }
        Ok(blockquote(result))
    }

    /// A poem. Without any stanza it degrades to generic text rendering of
    /// the whole node.
    pub(crate) fn render_poem(&self, id: NodeId) -> Result<RenderResult> {
        if self.doc.first_descendant(id, NodeKind::Stanza).is_none() {
            return Ok(self.render_line(id));
        }

        let mut result = RenderResult::new();
        for &child in self.doc.children(id) {
            match self.doc.kind(child) {
                Some(NodeKind::Title) => result.append(self.render_title(child).result),
                Some(NodeKind::Epigraph) => result.append(self.render_epigraph(child)?),
                Some(NodeKind::Stanza) => result.append(self.render_stanza(child)),
                Some(NodeKind::TextAuthor) => result.append(self.render_line(child)),
                Some(NodeKind::Date) => result.append(self.render_line(child)),
                _ => {}
            }
        }
        result.text.push_str("\r\n");
        Ok(result)
    }

    /// A stanza: its lines wrapped in a leading and trailing blank line.
    pub(crate) fn render_stanza(&self, id: NodeId) -> RenderResult {
        let mut result = RenderResult::new();
        for &child in self.doc.children(id) {
            match self.doc.kind(child) {
                Some(NodeKind::Title) => result.append(self.render_title(child).result),
                Some(NodeKind::Subtitle) => result.append(self.render_subtitle(child)),
                Some(NodeKind::Verse) => result.append(self.render_line(child)),
                _ => {}
            }
        }
        result.text = format!("\r\n{}\r\n", result.text);
        result
    }

    /// A `title` element: its lines, plus the plain heading text for the
    /// enclosing body/section.
    pub(crate) fn render_title(&self, id: NodeId) -> TitleRender {
        let mut result = RenderResult::new();
        let mut heading_parts: Vec<String> = Vec::new();
        for &child in self.doc.children(id) {
            let Some(kind) = self.doc.kind(child) else {
                if is_content_text(self.doc, child) {
                    let line = self.render_line(child);
                    heading_parts.push(line.text.trim().to_string());
                    result.append(line);
                }
                continue;
            };
            match kind {
                NodeKind::Paragraph => {
                    let line = self.render_line(child);
                    heading_parts.push(line.text.trim().to_string());
                    result.append(line);
                }
                NodeKind::EmptyLine => result.append(self.render_empty_line()),
                _ => {}
            }
        }
        result.text.push_str("\r\n");
        TitleRender {
            result,
            heading: heading_parts.join(" "),
        }
    }

    /// An annotation: a restricted leaf set, no recursion into nested
    /// annotations or sections.
    pub(crate) fn render_annotation(&self, id: NodeId) -> Result<RenderResult> {
        let mut result = RenderResult::new();
        for &child in self.doc.children(id) {
            let Some(kind) = self.doc.kind(child) else {
                if is_content_text(self.doc, child) {
                    result.append(self.render_line(child));
                }
                continue;
            };
            match kind {
                NodeKind::Paragraph => result.append(self.render_line(child)),
                NodeKind::Poem => result.append(self.render_poem(child)?),
                NodeKind::Cite => result.append(self.render_cite(child)?),
                NodeKind::Subtitle => result.append(self.render_subtitle(child)),
                NodeKind::EmptyLine => result.append(self.render_empty_line()),
                NodeKind::Table => result.append(self.render_table(child)?),
                _ => {}
            }
        }
        Ok(result)
    }
}

/// Bracket rendered content in blockquote markers and terminate the text.
fn blockquote(mut result: RenderResult) -> RenderResult {
    result.text.push_str("\r\n");
    let mut html = Vec::with_capacity(result.html.len() + 2);
    html.push(HtmlFragment::raw("<blockquote>"));
    html.extend(result.html);
    html.push(HtmlFragment::raw("</blockquote>"));
    result.html = html;
    result
}
