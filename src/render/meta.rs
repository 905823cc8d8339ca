//! Metadata renderers: title-info, publish-info, people.

use crate::error::Result;
use crate::kind::NodeKind;
use crate::locale::Message;
use crate::model::{Person, Sequence, TitleInfo};
use crate::xml::{NodeId, escape_xml};

use super::{HtmlFragment, RenderResult, Renderer};

/// A rendered author/translator: CRLF-joined text lines and the inline
/// fragments for the HTML name list.
pub(crate) struct PersonRender {
    pub text: String,
    pub html: Vec<HtmlFragment>,
}

impl Renderer<'_> {
    /// Render one title-info or src-title-info block.
    ///
    /// When `primary` is set, the returned option carries the book title
    /// (or its `---` placeholder) out to the assembler; the title is never
    /// stored anywhere else.
    pub(crate) fn render_title_info(
        &self,
        info: &TitleInfo,
        primary: bool,
    ) -> Result<(RenderResult, Option<String>)> {
        let mut result = RenderResult::new();
        let book_title = primary.then(|| {
            info.book_title
                .clone()
                .unwrap_or_else(|| "---".to_string())
        });

        if let Some(title) = &info.book_title {
            result.text.push_str(title);
            result.text.push_str("\r\n");
            result.html.push(HtmlFragment::tagged("h1", escape_xml(title)));
        }

        if let Some(seq) = &info.sequence {
            let display = sequence_display(seq);
            result.text.push_str(&display);
            result.text.push_str("\r\n");
            result
                .html
                .push(HtmlFragment::tagged("p", escape_xml(&display)));
        }

        if !info.authors.is_empty() {
            self.append_people(&mut result, &info.authors);
        }

        if !info.translators.is_empty() {
            let label = if info.translators.len() > 1 {
                self.catalog.message(Message::Translators)
            } else {
                self.catalog.message(Message::Translator)
            };
            result.text.push_str(&format!("{label}: \r\n"));
            result
                .html
                .push(HtmlFragment::tagged("p", format!("{}: ", escape_xml(label))));
            self.append_people(&mut result, &info.translators);
        }

        if !info.genres.is_empty() {
            let labels: Vec<String> = info
                .genres
                .iter()
                .map(|entry| {
                    let label = crate::genre::genre_label(&entry.code)
                        .map(|l| self.catalog.translate(l))
                        .unwrap_or(&entry.code);
                    match &entry.match_percent {
                        Some(percent) => format!("{label} ({percent}%)"),
                        None => label.to_string(),
                    }
                })
                .collect();
            let genres = labels.join(", ");
            result.text.push_str(&format!("\r\n{genres}\r\n"));
            result
                .html
                .push(HtmlFragment::tagged("p", escape_xml(&genres)));
        }

        let mut labeled = |message: Message, value: &Option<String>| {
            if let Some(value) = value {
                let label = self.catalog.message(message);
                result.text.push_str(&format!("{label}: {value}\r\n"));
                result.html.push(HtmlFragment::tagged(
                    "p",
                    format!("{}: {}", escape_xml(label), escape_xml(value)),
                ));
            }
        };
        labeled(Message::Language, &info.lang);
        labeled(Message::OriginalLanguage, &info.src_lang);
        labeled(Message::Date, &info.date);

        if let Some(annotation) = info.annotation {
            let rendered = self.render_annotation(annotation)?;
            let label = self.catalog.message(Message::Annotation);
            result
                .text
                .push_str(&format!("{label}: \r\n{}\r\n", rendered.text));
            result
                .html
                .push(HtmlFragment::tagged("h1", escape_xml(label)));
            result.html.extend(rendered.html);
        }

        Ok((result, book_title))
    }

    /// Render one publish-info block: publisher + sequence on one line,
    /// city + year on another; empty lines are omitted.
    pub(crate) fn render_publish_info(&self, id: NodeId) -> RenderResult {
        let mut result = RenderResult::new();

        let value = |kind: NodeKind| {
            self.doc
                .first_descendant(id, kind)
                .and_then(|n| self.doc.text_value(n))
        };

        let mut publisher_line: Vec<String> = Vec::new();
        if let Some(publisher) = value(NodeKind::Publisher) {
            publisher_line.push(publisher);
        }
        if let Some(seq) = self
            .doc
            .first_descendant(id, NodeKind::Sequence)
            .and_then(|n| Sequence::parse(self.doc, n))
        {
            publisher_line.push(sequence_display(&seq));
        }
        let publisher_line = publisher_line.join(", ");
        if !publisher_line.is_empty() {
            result.text.push_str(&format!("{publisher_line}\r\n"));
            result
                .html
                .push(HtmlFragment::tagged("p", escape_xml(&publisher_line)));
        }

        let mut city_line: Vec<String> = Vec::new();
        if let Some(city) = value(NodeKind::City) {
            city_line.push(city);
        }
        if let Some(year) = value(NodeKind::Year) {
            city_line.push(year);
        }
        let city_line = city_line.join(", ");
        if !city_line.is_empty() {
            result.text.push_str(&format!("{city_line}\r\n"));
            result
                .html
                .push(HtmlFragment::tagged("p", escape_xml(&city_line)));
        }

        result
    }

    /// Render an author or translator per the display-name convention.
    pub(crate) fn render_person(&self, person: &Person) -> PersonRender {
        let name = person.display_name();
        let mut lines: Vec<String> = Vec::new();
        let mut html: Vec<HtmlFragment> = Vec::new();

        if !name.is_empty() {
            lines.push(name.clone());
            match person.home_page.as_deref() {
                Some(home_page) => html.push(HtmlFragment::raw(format!(
                    "<a href=\"{}\">{}</a>",
                    escape_xml(home_page),
                    escape_xml(&name)
                ))),
                None => html.push(HtmlFragment::raw(escape_xml(&name))),
            }
        }

        if let Some(home_page) = person.home_page.as_deref() {
            lines.push(home_page.to_string());
            if name.is_empty() {
                html.push(HtmlFragment::raw(format!(
                    "<a href=\"{href}\">{href}</a>",
                    href = escape_xml(home_page)
                )));
            }
        }

        if let Some(email) = person.email.as_deref() {
            lines.push(email.to_string());
            let link = format!(
                "<a href=\"mailto:{addr}\">{addr}</a>",
                addr = escape_xml(email)
            );
            if html.is_empty() {
                html.push(HtmlFragment::raw(link));
            } else {
                html.push(HtmlFragment::raw(" "));
                html.push(HtmlFragment::raw(format!("({link})")));
            }
        }

        PersonRender {
            text: lines.join("\r\n"),
            html,
        }
    }

    /// Append a people list: names CRLF-joined in text, comma-joined in
    /// HTML, closed with a line break.
    fn append_people(&self, result: &mut RenderResult, people: &[Person]) {
        let renders: Vec<PersonRender> = people.iter().map(|p| self.render_person(p)).collect();

        let text = renders
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\r\n");
        result.text.push_str(&text);
        result.text.push_str("\r\n");

        for (i, render) in renders.into_iter().enumerate() {
            if i > 0 {
                result.html.push(HtmlFragment::raw(", "));
            }
            result.html.extend(render.html);
        }
        result.html.push(HtmlFragment::raw("<br/>"));
    }
}

/// `name #number` display form of a sequence.
fn sequence_display(seq: &Sequence) -> String {
    match &seq.number {
        Some(number) => format!("{} #{}", seq.name, number),
        None => seq.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Catalog;
    use crate::model::ParsedDocument;
    use crate::xml::Document;

    fn render_first_title_info(raw: &str) -> (RenderResult, Option<String>) {
        let doc = Document::parse(raw).unwrap();
        let parsed = ParsedDocument::parse(&doc).unwrap();
        let catalog = Catalog::builtin();
        let renderer = Renderer::new(&doc, &catalog);
        renderer
            .render_title_info(&parsed.descriptions[0].title_infos[0], true)
            .unwrap()
    }

    fn book(title_info_body: &str) -> String {
        format!(
            "<FictionBook><description><title-info>{title_info_body}</title-info></description><body/></FictionBook>"
        )
    }

    #[test]
    fn person_name_only() {
        let catalog = Catalog::builtin();
        let doc = Document::parse("<a/>").unwrap();
        let renderer = Renderer::new(&doc, &catalog);

        let person = Person {
            last_name: Some("Doe".into()),
            first_name: Some("Jane".into()),
            ..Person::default()
        };
        let render = renderer.render_person(&person);
        assert_eq!(render.text, "Doe Jane");
        assert_eq!(render.html.len(), 1);
        assert_eq!(render.html[0].content, "Doe Jane");
    }

    #[test]
    fn person_home_page_links_name() {
        let catalog = Catalog::builtin();
        let doc = Document::parse("<a/>").unwrap();
        let renderer = Renderer::new(&doc, &catalog);

        let person = Person {
            last_name: Some("Doe".into()),
            first_name: Some("Jane".into()),
            home_page: Some("http://x".into()),
            ..Person::default()
        };
        let render = renderer.render_person(&person);
        assert_eq!(render.text, "Doe Jane\r\nhttp://x");
        assert_eq!(render.html[0].content, "<a href=\"http://x\">Doe Jane</a>");
    }

    #[test]
    fn person_email_is_parenthesized() {
        let catalog = Catalog::builtin();
        let doc = Document::parse("<a/>").unwrap();
        let renderer = Renderer::new(&doc, &catalog);

        let person = Person {
            last_name: Some("Doe".into()),
            email: Some("doe@x".into()),
            ..Person::default()
        };
        let render = renderer.render_person(&person);
        assert_eq!(render.text, "Doe\r\ndoe@x");
        let joined: String = render.html.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(joined, "Doe (<a href=\"mailto:doe@x\">doe@x</a>)");
    }

    #[test]
    fn title_info_basic_block() {
        let (result, title) =
            render_first_title_info(&book("<book-title>Test</book-title>"));
        assert_eq!(result.text, "Test\r\n");
        assert_eq!(title.as_deref(), Some("Test"));
        assert_eq!(result.html.len(), 1);
        assert_eq!(result.html[0].tag, Some("h1"));
    }

    #[test]
    fn title_placeholder_when_missing() {
        let (result, title) = render_first_title_info(&book("<lang>en</lang>"));
        assert_eq!(title.as_deref(), Some("---"));
        assert_eq!(result.text, "Language: en\r\n");
    }

    #[test]
    fn translator_label_switches_on_count() {
        let one = book("<translator><last-name>A</last-name></translator>");
        let (result, _) = render_first_title_info(&one);
        assert!(result.text.contains("Translator: \r\n"), "{}", result.text);

        let two = book(
            "<translator><last-name>A</last-name></translator>\
             <translator><last-name>B</last-name></translator>",
        );
        let (result, _) = render_first_title_info(&two);
        assert!(result.text.contains("Translators: \r\n"), "{}", result.text);
        assert!(result.text.contains("A\r\nB\r\n"), "{}", result.text);
    }

    #[test]
    fn genres_resolve_and_pass_through() {
        let (result, _) = render_first_title_info(&book(
            "<genre>sf</genre><genre match=\"75\">poetry</genre><genre>zzz_custom</genre>",
        ));
        assert!(
            result
                .text
                .contains("Science Fiction, Poetry (75%), zzz_custom"),
            "{}",
            result.text
        );
    }

    #[test]
    fn publish_info_lines() {
        let doc = Document::parse(
            "<publish-info>\
               <publisher>Acme</publisher>\
               <sequence name=\"Saga\" number=\"2\"/>\
               <city>Riga</city>\
               <year>1925</year>\
             </publish-info>",
        )
        .unwrap();
        let catalog = Catalog::builtin();
        let renderer = Renderer::new(&doc, &catalog);
        let info = doc.children(crate::xml::NodeId::ROOT)[0];
        let result = renderer.render_publish_info(info);
        assert_eq!(result.text, "Acme, Saga #2\r\nRiga, 1925\r\n");
        assert_eq!(result.html.len(), 2);
    }

    #[test]
    fn publish_info_omits_empty_lines() {
        let doc = Document::parse("<publish-info><year>1925</year></publish-info>").unwrap();
        let catalog = Catalog::builtin();
        let renderer = Renderer::new(&doc, &catalog);
        let info = doc.children(crate::xml::NodeId::ROOT)[0];
        let result = renderer.render_publish_info(info);
        assert_eq!(result.text, "1925\r\n");
    }
}
