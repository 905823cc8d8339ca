//! Document assembler.
//!
//! Combines all descriptions and bodies into the final text, the
//! structure list, and the fragment stream handed to the HTML
//! post-processor. The book title is threaded through explicitly: the
//! first primary title-info produces it, the HTML builder consumes it.

use crate::error::Result;
use crate::locale::Message;
use crate::model::ParsedDocument;
use crate::xml::escape_xml;

use super::{HtmlFragment, Renderer};

/// The fully assembled document, ready for any output mode.
#[derive(Debug)]
pub(crate) struct Assembled {
    /// Flat plain text: metadata block, then bodies separated by a blank
    /// line, ending with exactly one CRLF.
    pub text: String,
    /// `[metadata block] + one entry per non-empty chapter`.
    pub structure: Vec<String>,
    /// Flat fragment stream: metadata, `<hr/>`, bodies.
    pub html: Vec<HtmlFragment>,
    /// Fragment index where metadata ended; the TOC insertion point.
    pub toc_index: usize,
    /// Book title for the HTML skeleton; `---` when none was given.
    pub book_title: String,
}

impl Renderer<'_> {
    pub(crate) fn assemble(&self, parsed: &ParsedDocument) -> Result<Assembled> {
        let mut meta_text = String::new();
        let mut html: Vec<HtmlFragment> = Vec::new();
        let mut book_title: Option<String> = None;

        for description in &parsed.descriptions {
            for info in &description.title_infos {
                let primary = book_title.is_none();
                let (rendered, title) = self.render_title_info(info, primary)?;
                if primary {
                    book_title = title;
                }
                meta_text.push_str(&rendered.text);
                meta_text.push_str("\r\n");
                html.extend(rendered.html);
            }

            for info in &description.src_title_infos {
                let (rendered, _) = self.render_title_info(info, false)?;
                let label = self.catalog.message(Message::OriginalMetadata);
                meta_text.push_str(&format!("{label}: \r\n"));
                meta_text.push_str(&rendered.text);
                meta_text.push_str("\r\n");
                html.push(HtmlFragment::tagged("p", format!("{}: ", escape_xml(label))));
                html.extend(rendered.html);
            }

            for &publish_info in &description.publish_infos {
                let rendered = self.render_publish_info(publish_info);
                let label = self.catalog.message(Message::EditionInformation);
                meta_text.push_str(&format!("{label}: \r\n"));
                meta_text.push_str(&rendered.text);
                meta_text.push_str("\r\n");
                html.push(HtmlFragment::tagged("p", format!("{}: ", escape_xml(label))));
                html.extend(rendered.html);
            }
        }

        let toc_index = html.len();
        html.push(HtmlFragment::raw("<hr/>"));

        let mut structure = vec![meta_text.clone()];
        let mut body_texts: Vec<String> = Vec::new();
        for &body in &parsed.bodies {
            let rendered = self.render_body(body)?;
            body_texts.push(rendered.text);
            structure.extend(rendered.chapters);
            html.extend(rendered.html);
        }

        let mut text = meta_text;
        text.push_str(&body_texts.join("\r\n\r\n"));
        let text = match text.trim_end() {
            "" => String::new(),
            trimmed => format!("{trimmed}\r\n"),
        };

        Ok(Assembled {
            text,
            structure,
            html,
            toc_index,
            book_title: book_title.unwrap_or_else(|| "---".to_string()),
        })
    }
}
