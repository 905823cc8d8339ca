//! HTML post-processor.
//!
//! A single left-to-right pass over the assembled fragment stream:
//! auto-anchor headings receive sequential `section_{n}` ids and a table
//! of contents entry; footnote-pair fragments render their stored id
//! pair; everything else wraps or passes through. The TOC block is then
//! inserted at the recorded metadata boundary and the whole stream is
//! wrapped in a minimal document skeleton.

use crate::locale::{Catalog, Message};
use crate::xml::escape_xml;

use super::{Anchor, Assembled};

/// Build the final single-page HTML document.
pub(crate) fn build_html(assembled: &Assembled, catalog: &Catalog) -> String {
    let mut rendered: Vec<String> = Vec::with_capacity(assembled.html.len() + 1);
    let mut contents: Vec<(String, String)> = Vec::new();
    let mut section_index = 0usize;

    for fragment in &assembled.html {
        let item = match fragment.tag {
            None => fragment.content.clone(),
            Some(tag) => match &fragment.anchor {
                Anchor::None => format!("<{tag}>{}</{tag}>", fragment.content),
                Anchor::AutoTarget => {
                    let anchor = format!("section_{section_index}");
                    section_index += 1;
                    contents.push((display_text(&fragment.content), anchor.clone()));
                    format!(
                        "<{tag}><a name=\"{anchor}\">{}</a></{tag}>",
                        fragment.content
                    )
                }
                Anchor::BackRef(id) => format!(
                    "<{tag}><a name=\"bunch_{id}\" href=\"#return_{id}\">{}</a></{tag}>",
                    fragment.content
                ),
                Anchor::ForwardRef(id) => format!(
                    "<{tag}><a name=\"return_{id}\" href=\"#bunch_{id}\">{}</a></{tag}>",
                    fragment.content
                ),
            },
        };
        rendered.push(item);
    }

    let toc_items: Vec<String> = contents
        .iter()
        .map(|(text, anchor)| format!("<li><a href=\"#{anchor}\">{text}</a></li>"))
        .collect();
    let toc = format!(
        "<h1>{}</h1>\r\n<ul style=\"list-style: none;\">\r\n{}\r\n</ul>",
        escape_xml(catalog.message(Message::Contents)),
        toc_items.join("\r\n")
    );
    rendered.insert(assembled.toc_index.min(rendered.len()), toc);

    format!(
        "<html>\r\n<head>\r\n<meta charset=\"UTF-8\"/>\r\n<title>{}</title>\r\n</head>\r\n<body>\r\n{}\r\n</body>\r\n</html>",
        escape_xml(&assembled.book_title),
        rendered.join("\r\n")
    )
}

/// TOC display text: fragment content with markup and line breaks
/// stripped.
fn display_text(content: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '\r' | '\n' => {}
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlFragment;

    fn assembled(html: Vec<HtmlFragment>, toc_index: usize) -> Assembled {
        Assembled {
            text: String::new(),
            structure: Vec::new(),
            html,
            toc_index,
            book_title: "Book".to_string(),
        }
    }

    #[test]
    fn auto_targets_get_sequential_anchors() {
        let doc = build_html(
            &assembled(
                vec![
                    HtmlFragment::heading("h2", "One"),
                    HtmlFragment::tagged("p", "text"),
                    HtmlFragment::heading("h3", "Two"),
                ],
                0,
            ),
            &Catalog::builtin(),
        );
        assert!(doc.contains("<h2><a name=\"section_0\">One</a></h2>"));
        assert!(doc.contains("<h3><a name=\"section_1\">Two</a></h3>"));
        assert!(doc.contains("<li><a href=\"#section_0\">One</a></li>"));
        assert!(doc.contains("<li><a href=\"#section_1\">Two</a></li>"));
    }

    #[test]
    fn toc_is_inserted_at_recorded_index() {
        let doc = build_html(
            &assembled(
                vec![
                    HtmlFragment::tagged("h1", "Meta"),
                    HtmlFragment::raw("<hr/>"),
                    HtmlFragment::heading("h2", "Body"),
                ],
                1,
            ),
            &Catalog::builtin(),
        );
        let meta = doc.find("<h1>Meta</h1>").unwrap();
        let toc = doc.find("<h1>Contents</h1>").unwrap();
        let hr = doc.find("<hr/>").unwrap();
        assert!(meta < toc && toc < hr, "{doc}");
    }

    #[test]
    fn back_ref_renders_bunch_pair() {
        let doc = build_html(
            &assembled(vec![HtmlFragment::back_ref("h5", "note", "x")], 0),
            &Catalog::builtin(),
        );
        assert!(doc.contains("<h5><a name=\"bunch_x\" href=\"#return_x\">note</a></h5>"));
        // Back-references are not TOC candidates
        assert!(!doc.contains("<li><a href=\"#bunch_x\""));
    }

    #[test]
    fn forward_ref_renders_return_pair() {
        let doc = build_html(
            &assembled(
                vec![HtmlFragment {
                    tag: Some("p"),
                    content: "see note".to_string(),
                    anchor: crate::render::Anchor::ForwardRef("x".to_string()),
                }],
                0,
            ),
            &Catalog::builtin(),
        );
        assert!(doc.contains("<p><a name=\"return_x\" href=\"#bunch_x\">see note</a></p>"));
    }

    #[test]
    fn skeleton_carries_escaped_title() {
        let mut a = assembled(vec![], 0);
        a.book_title = "War & Peace".to_string();
        let doc = build_html(&a, &Catalog::builtin());
        assert!(doc.starts_with("<html>"));
        assert!(doc.contains("<title>War &amp; Peace</title>"));
        assert!(doc.ends_with("</html>"));
    }

    #[test]
    fn display_text_strips_markup_and_breaks() {
        assert_eq!(
            display_text("<a name=\"bunch_1\" href=\"#return_1\">Note\r\n1</a>"),
            "Note1"
        );
        assert_eq!(display_text("plain"), "plain");
    }
}
