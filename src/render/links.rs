//! Inline serialization with cross-reference rewriting.
//!
//! FB2 hyperlinks use namespaced attributes (`l:href`, `xlink:href`). When
//! inline content is re-serialized for HTML output, every attribute whose
//! name ends in `href` is renamed to a plain `href`; fragment references
//! (`#x`) additionally become the two-sided footnote convention: the
//! citation point is named `return_x` and jumps to `#bunch_x` at the
//! footnote heading.

use crate::xml::{Document, NodeId, escape_xml};

/// Serialize the children of `id` as a single run of inline HTML, applying
/// the cross-reference rewrite. Plain text runs come out escaped.
pub fn inline_html(doc: &Document, id: NodeId) -> String {
    enum Step {
        Enter(NodeId),
        Close(NodeId),
    }

    let mut out = String::new();
    let mut stack: Vec<Step> = doc.children(id).iter().rev().map(|&c| Step::Enter(c)).collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(current) => {
                if let Some(text) = doc.text_run(current) {
                    out.push_str(&escape_xml(text));
                    continue;
                }
                let name = doc.name(current).unwrap_or("");
                out.push('<');
                out.push_str(name);
                for (key, value) in doc.attributes(current) {
                    write_attr(&mut out, key, value);
                }
                if doc.children(current).is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    stack.push(Step::Close(current));
                    for &child in doc.children(current).iter().rev() {
                        stack.push(Step::Enter(child));
                    }
                }
            }
            Step::Close(current) => {
                out.push_str("</");
                out.push_str(doc.name(current).unwrap_or(""));
                out.push('>');
            }
        }
    }

    out.trim().to_string()
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    if key.ends_with("href") {
        if let Some(id) = value.strip_prefix('#') {
            out.push_str(&format!(
                " name=\"return_{id}\" href=\"#bunch_{id}\"",
                id = escape_xml(id)
            ));
        } else {
            out.push_str(&format!(" href=\"{}\"", escape_xml(value)));
        }
    } else {
        out.push_str(&format!(" {key}=\"{}\"", escape_xml(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inline(raw: &str) -> String {
        let doc = Document::parse(raw).unwrap();
        let wrapper = doc.children(NodeId::ROOT)[0];
        inline_html(&doc, wrapper)
    }

    #[test]
    fn plain_text_is_escaped() {
        assert_eq!(inline("<p>a &lt; b</p>"), "a &lt; b");
    }

    #[test]
    fn markup_passes_through() {
        assert_eq!(
            inline("<p>see <strong>this</strong>!</p>"),
            "see <strong>this</strong>!"
        );
    }

    #[test]
    fn fragment_href_becomes_return_bunch_pair() {
        assert_eq!(
            inline(r##"<p><a l:href="#n1">1</a></p>"##),
            r##"<a name="return_n1" href="#bunch_n1">1</a>"##
        );
    }

    #[test]
    fn external_href_is_renamed_only() {
        assert_eq!(
            inline(r#"<p><a xlink:href="http://x/">x</a></p>"#),
            r#"<a href="http://x/">x</a>"#
        );
    }

    #[test]
    fn non_href_attributes_are_kept() {
        assert_eq!(
            inline(r#"<p><style name="bold">x</style></p>"#),
            r#"<style name="bold">x</style>"#
        );
    }

    proptest! {
        #[test]
        fn prop_non_fragment_hrefs_survive(path in "[a-z0-9/._-]{1,24}") {
            let url = format!("http://example.com/{path}");
            let out = inline(&format!(r#"<p><a l:href="{url}">x</a></p>"#));
            prop_assert!(out.contains(&format!(r#"href="{url}""#)), "got: {out}");
            prop_assert!(!out.contains("l:href"));
        }

        #[test]
        fn prop_fragment_hrefs_become_pairs(id in "[A-Za-z0-9_-]{1,16}") {
            let out = inline(&format!(r##"<p><a l:href="#{id}">x</a></p>"##));
            prop_assert!(out.contains(&format!(r#"name="return_{id}""#)), "return name missing");
            prop_assert!(out.contains(&format!(r##"href="#bunch_{id}""##)), "bunch href missing");
        }
    }
}
