//! Body and section walker.
//!
//! The walker produces three synchronized views of a body: the running
//! plain text, the chapter-split list (one entry per top-level section,
//! with any preceding preamble prepended to the first chapter), and the
//! flat HTML fragment stream.
//!
//! Content that precedes a nested section belongs to the enclosing
//! section's narrative flow, so it is prepended to the nested call's first
//! chapter entry at the text level instead of becoming a chapter of its
//! own. Reading order is preserved without spurious empty chapters.

use std::mem;

use crate::error::{Error, Result};
use crate::kind::NodeKind;
use crate::xml::{NodeId, escape_xml};

use super::{HtmlFragment, Renderer, is_content_text};

/// Recursion guard for adversarially nested sections.
const MAX_SECTION_DEPTH: usize = 128;

/// A rendered body: running text, chapter list, fragment stream.
#[derive(Debug)]
pub(crate) struct BodyRender {
    pub text: String,
    pub chapters: Vec<String>,
    pub html: Vec<HtmlFragment>,
}

/// A rendered section subtree: chapter entries and fragments.
#[derive(Debug)]
pub(crate) struct SectionRender {
    pub chapters: Vec<String>,
    pub html: Vec<HtmlFragment>,
}

impl Renderer<'_> {
    /// Render one `body` element.
    pub(crate) fn render_body(&self, id: NodeId) -> Result<BodyRender> {
        let mut text = String::new();
        let mut chapters: Vec<String> = Vec::new();
        let mut html: Vec<HtmlFragment> = Vec::new();

        match self.doc.attribute(id, "name") {
            Some(name) if !name.is_empty() => {
                html.push(HtmlFragment::heading("h2", escape_xml(name)));
                text.push_str(name);
                text.push_str("\r\n\r\n");
            }
            // An unnamed body still gets a heading line, but it is not a
            // TOC candidate.
            _ => html.push(HtmlFragment::tagged("h2", "---")),
        }

        // Preamble buffer: title/epigraph text accumulated until the first
        // section, then prepended to that section's first chapter.
        let mut element = text.clone();

        for &child in self.doc.children(id) {
            match self.doc.kind(child) {
                Some(NodeKind::Title) => {
                    let title = self.render_title(child);
                    text.push_str(&title.result.text);
                    element.push_str(&title.result.text);
                    html.extend(title.result.html);
                }
                Some(NodeKind::Epigraph) => {
                    let epigraph = self.render_epigraph(child)?;
                    text.push_str(&epigraph.text);
                    element.push_str(&epigraph.text);
                    html.extend(epigraph.html);
                }
                Some(NodeKind::Section) => {
                    let section = self.render_section(child, 1)?;
                    text.push_str(&section.chapters.concat());
                    html.extend(section.html);
                    if !section.chapters.is_empty() {
                        let mut section_chapters = section.chapters;
                        section_chapters[0] =
                            format!("{}{}", mem::take(&mut element), section_chapters[0]);
                        chapters.extend(section_chapters);
                    }
                }
                _ => {}
            }
        }

        // Residual preamble: a body without sections, or trailing content.
        if !element.is_empty() {
            if chapters.is_empty() {
                chapters.push(String::new());
            }
            if let Some(last) = chapters.last_mut() {
                last.push_str(&element);
            }
        }

        Ok(BodyRender {
            text,
            chapters: normalize_chapters(chapters),
            html,
        })
    }

    /// Render one `section` element, recursively.
    ///
    /// The section's own heading fragment is built last, using the display
    /// text from the `title` child found during the walk, and prepended to
    /// the fragment list.
    pub(crate) fn render_section(&self, id: NodeId, depth: usize) -> Result<SectionRender> {
        if depth > MAX_SECTION_DEPTH {
            return Err(Error::NestingTooDeep(depth));
        }

        let mut chapters: Vec<String> = Vec::new();
        let mut html: Vec<HtmlFragment> = Vec::new();
        let mut element = String::new();
        let mut heading: Option<String> = None;

        for &child in self.doc.children(id) {
            let Some(kind) = self.doc.kind(child) else {
                if is_content_text(self.doc, child) {
                    let line = self.render_line(child);
                    element.push_str(&line.text);
                    html.extend(line.html);
                }
                continue;
            };
            match kind {
                NodeKind::Title => {
                    let title = self.render_title(child);
                    element.push_str(&title.result.text);
                    heading = Some(title.heading);
                }
                NodeKind::Epigraph => {
                    let rendered = self.render_epigraph(child)?;
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                NodeKind::Annotation => {
                    let rendered = self.render_annotation(child)?;
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                NodeKind::Section => {
                    let nested = self.render_section(child, depth + 1)?;
                    html.extend(nested.html);
                    let mut nested_chapters = nested.chapters;
                    if nested_chapters.is_empty() {
                        nested_chapters.push(String::new());
                    }
                    nested_chapters[0] =
                        format!("{}{}", mem::take(&mut element), nested_chapters[0]);
                    chapters.extend(nested_chapters);
                }
                NodeKind::Paragraph => {
                    let line = self.render_line(child);
                    element.push_str(&line.text);
                    html.extend(line.html);
                }
                NodeKind::Poem => {
                    let rendered = self.render_poem(child)?;
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                NodeKind::Subtitle => {
                    let rendered = self.render_subtitle(child);
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                NodeKind::Cite => {
                    let rendered = self.render_cite(child)?;
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                NodeKind::EmptyLine => {
                    let rendered = self.render_empty_line();
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                NodeKind::Table => {
                    let rendered = self.render_table(child)?;
                    element.push_str(&rendered.text);
                    html.extend(rendered.html);
                }
                // Not section content; skipped wherever encountered.
                NodeKind::FictionBook
                | NodeKind::Description
                | NodeKind::TitleInfo
                | NodeKind::SrcTitleInfo
                | NodeKind::PublishInfo
                | NodeKind::Genre
                | NodeKind::Author
                | NodeKind::Translator
                | NodeKind::Sequence
                | NodeKind::BookTitle
                | NodeKind::Date
                | NodeKind::Lang
                | NodeKind::SrcLang
                | NodeKind::Publisher
                | NodeKind::City
                | NodeKind::Year
                | NodeKind::Body
                | NodeKind::Stanza
                | NodeKind::TextAuthor
                | NodeKind::Verse
                | NodeKind::TableRow
                | NodeKind::TableHeader
                | NodeKind::TableCell
                | NodeKind::FirstName
                | NodeKind::MiddleName
                | NodeKind::LastName
                | NodeKind::Nickname
                | NodeKind::HomePage
                | NodeKind::Email => {}
            }
        }

        if chapters.is_empty() {
            chapters.push(String::new());
        }
        if let Some(last) = chapters.last_mut() {
            last.push_str(&element);
        }

        let title_text = heading.unwrap_or_else(|| "---".to_string());
        let heading_fragment = match self.doc.attribute(id, "id") {
            Some(anchor) if !anchor.is_empty() => HtmlFragment::heading(
                "h3",
                format!(
                    "<a name=\"bunch_{id}\" href=\"#return_{id}\">{}</a>",
                    escape_xml(&title_text),
                    id = escape_xml(anchor)
                ),
            ),
            _ => HtmlFragment::heading("h3", escape_xml(&title_text)),
        };
        html.insert(0, heading_fragment);

        Ok(SectionRender {
            chapters: normalize_chapters(chapters),
            html,
        })
    }
}

/// Drop whitespace-only chapter entries and normalize the tail of each
/// surviving entry to exactly one CRLF.
fn normalize_chapters(chapters: Vec<String>) -> Vec<String> {
    chapters
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("{}\r\n", c.trim_end()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Catalog;
    use crate::xml::Document;

    fn render(raw: &str) -> (Document, Catalog) {
        (Document::parse(raw).unwrap(), Catalog::builtin())
    }

    fn render_body(raw: &str) -> BodyRender {
        let (doc, catalog) = render(raw);
        let renderer = Renderer::new(&doc, &catalog);
        let body = doc.children(crate::xml::NodeId::ROOT)[0];
        renderer.render_body(body).unwrap()
    }

    #[test]
    fn single_section() {
        let body = render_body("<body><section><p>Hello</p></section></body>");
        assert_eq!(body.chapters, vec!["Hello\r\n".to_string()]);
        assert_eq!(body.text, "Hello\r\n");
    }

    #[test]
    fn named_body_prefixes_text_and_first_chapter() {
        let body = render_body("<body name=\"Notes\"><section><p>n1</p></section></body>");
        assert_eq!(body.chapters, vec!["Notes\r\n\r\nn1\r\n".to_string()]);
        assert!(body.text.starts_with("Notes\r\n\r\n"));
        assert_eq!(body.html[0].tag, Some("h2"));
        assert_eq!(body.html[0].anchor, crate::render::Anchor::AutoTarget);
    }

    #[test]
    fn unnamed_body_heading_is_not_a_toc_candidate() {
        let body = render_body("<body><section><p>x</p></section></body>");
        assert_eq!(body.html[0].content, "---");
        assert_eq!(body.html[0].anchor, crate::render::Anchor::None);
    }

    #[test]
    fn preamble_prepends_to_first_chapter() {
        let body = render_body(
            "<body>\
               <title><p>Book One</p></title>\
               <section><p>First</p></section>\
               <section><p>Second</p></section>\
             </body>",
        );
        assert_eq!(
            body.chapters,
            vec![
                "Book One\r\n\r\nFirst\r\n".to_string(),
                "Second\r\n".to_string()
            ]
        );
    }

    #[test]
    fn body_without_sections_is_one_chapter() {
        let body = render_body("<body><title><p>Only title</p></title></body>");
        assert_eq!(body.chapters, vec!["Only title\r\n".to_string()]);
    }

    #[test]
    fn whitespace_only_chapters_are_dropped() {
        let body = render_body(
            "<body>\
               <section><empty-line/></section>\
               <section><p>Real</p></section>\
             </body>",
        );
        assert_eq!(body.chapters.len(), 1);
        assert_eq!(body.chapters[0], "Real\r\n");
    }

    #[test]
    fn nested_sections_split_chapters_at_top_level_only() {
        let body = render_body(
            "<body>\
               <section>\
                 <p>intro</p>\
                 <section><p>inner one</p></section>\
                 <section><p>inner two</p></section>\
               </section>\
             </body>",
        );
        // One top-level section; its nested sections merge into its
        // chapter list with the intro prepended to the first.
        assert_eq!(body.chapters.len(), 2);
        assert_eq!(body.chapters[0], "intro\r\ninner one\r\n");
        assert_eq!(body.chapters[1], "inner two\r\n");
    }

    #[test]
    fn trailing_content_joins_last_chapter() {
        let body = render_body(
            "<body>\
               <section>\
                 <section><p>inner</p></section>\
                 <p>coda</p>\
               </section>\
             </body>",
        );
        assert_eq!(body.chapters, vec!["inner\r\ncoda\r\n".to_string()]);
    }

    #[test]
    fn section_heading_fragment_is_first_and_auto_target() {
        let body = render_body(
            "<body><section><title><p>Chapter 1</p></title><p>x</p></section></body>",
        );
        // body heading, then section heading, then paragraph
        assert_eq!(body.html[1].tag, Some("h3"));
        assert_eq!(body.html[1].content, "Chapter 1");
        assert_eq!(body.html[1].anchor, crate::render::Anchor::AutoTarget);
    }

    #[test]
    fn section_id_wraps_heading_in_anchor_pair() {
        let body = render_body(
            "<body><section id=\"n1\"><title><p>Note</p></title><p>x</p></section></body>",
        );
        assert_eq!(
            body.html[1].content,
            "<a name=\"bunch_n1\" href=\"#return_n1\">Note</a>"
        );
        assert_eq!(body.html[1].anchor, crate::render::Anchor::AutoTarget);
    }

    #[test]
    fn untitled_section_uses_placeholder_heading() {
        let body = render_body("<body><section><p>x</p></section></body>");
        assert_eq!(body.html[1].content, "---");
    }

    #[test]
    fn depth_guard_rejects_runaway_nesting() {
        let mut raw = String::from("<body>");
        for _ in 0..(MAX_SECTION_DEPTH + 1) {
            raw.push_str("<section>");
        }
        raw.push_str("<p>deep</p>");
        for _ in 0..(MAX_SECTION_DEPTH + 1) {
            raw.push_str("</section>");
        }
        raw.push_str("</body>");

        let (doc, catalog) = render(&raw);
        let renderer = Renderer::new(&doc, &catalog);
        let body = doc.children(crate::xml::NodeId::ROOT)[0];
        match renderer.render_body(body) {
            Err(Error::NestingTooDeep(_)) => {}
            other => panic!("expected depth error, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_children_contribute_nothing() {
        let body = render_body(
            "<body><section><p>kept</p><image href=\"x\"/><mystery>gone</mystery></section></body>",
        );
        assert_eq!(body.chapters, vec!["kept\r\n".to_string()]);
    }

    proptest::proptest! {
        #[test]
        fn prop_whitespace_sections_never_add_chapters(real in 1usize..6, padding in 0usize..6) {
            let mut raw = String::from("<body>");
            for i in 0..real {
                raw.push_str(&format!("<section><p>chapter {i}</p></section>"));
                for _ in 0..padding {
                    raw.push_str("<section><empty-line/></section>");
                }
            }
            raw.push_str("</body>");

            let body = render_body(&raw);
            proptest::prop_assert_eq!(body.chapters.len(), real);
        }
    }
}
