//! Parsed document model.
//!
//! [`ParsedDocument::parse`] performs the all-or-nothing extraction of
//! metadata from the tree: the first missing mandatory element aborts the
//! whole operation. Everything optional is simply absent from the model.
//! Body content stays as tree nodes; the walker renders it on demand.

use crate::error::{Error, Result};
use crate::kind::NodeKind;
use crate::xml::{Document, NodeId};

/// A parsed FictionBook: metadata descriptions plus body nodes, both in
/// document order.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub descriptions: Vec<Description>,
    pub bodies: Vec<NodeId>,
}

/// One `description` element.
#[derive(Debug, Clone)]
pub struct Description {
    pub title_infos: Vec<TitleInfo>,
    pub src_title_infos: Vec<TitleInfo>,
    pub publish_infos: Vec<NodeId>,
}

/// A `title-info` or `src-title-info` block.
///
/// Optional fields are present only when the source node carried non-empty
/// text.
#[derive(Debug, Clone, Default)]
pub struct TitleInfo {
    pub book_title: Option<String>,
    pub genres: Vec<GenreEntry>,
    pub authors: Vec<Person>,
    pub translators: Vec<Person>,
    pub sequence: Option<Sequence>,
    /// Rendered lazily; annotations may contain tables, which can fail.
    pub annotation: Option<NodeId>,
    pub date: Option<String>,
    pub lang: Option<String>,
    pub src_lang: Option<String>,
}

/// A genre code with the optional `match` percentage attribute.
#[derive(Debug, Clone)]
pub struct GenreEntry {
    pub code: String,
    pub match_percent: Option<String>,
}

/// An author or translator.
#[derive(Debug, Clone, Default)]
pub struct Person {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub home_page: Option<String>,
    pub email: Option<String>,
}

/// A series membership: `name #number`.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub name: String,
    pub number: Option<String>,
}

impl ParsedDocument {
    /// Extract the document model, validating mandatory elements.
    pub fn parse(doc: &Document) -> Result<ParsedDocument> {
        let fb = doc
            .first_descendant(NodeId::ROOT, NodeKind::FictionBook)
            .ok_or_else(|| Error::element("FictionBook"))?;

        if doc.first_descendant(fb, NodeKind::Description).is_none() {
            return Err(Error::element("description"));
        }
        if doc.first_descendant(fb, NodeKind::Body).is_none() {
            return Err(Error::element("body"));
        }

        let mut descriptions = Vec::new();
        let mut bodies = Vec::new();
        for &child in doc.children(fb) {
            match doc.kind(child) {
                Some(NodeKind::Description) => descriptions.push(Description::parse(doc, child)?),
                Some(NodeKind::Body) => bodies.push(child),
                _ => {}
            }
        }

        Ok(ParsedDocument {
            descriptions,
            bodies,
        })
    }
}

impl Description {
    fn parse(doc: &Document, id: NodeId) -> Result<Description> {
        if doc.first_descendant(id, NodeKind::TitleInfo).is_none() {
            return Err(Error::element("title-info"));
        }

        let mut title_infos = Vec::new();
        let mut src_title_infos = Vec::new();
        let mut publish_infos = Vec::new();
        for &child in doc.children(id) {
            match doc.kind(child) {
                Some(NodeKind::TitleInfo) => title_infos.push(TitleInfo::parse(doc, child)),
                Some(NodeKind::SrcTitleInfo) => src_title_infos.push(TitleInfo::parse(doc, child)),
                Some(NodeKind::PublishInfo) => publish_infos.push(child),
                _ => {}
            }
        }

        Ok(Description {
            title_infos,
            src_title_infos,
            publish_infos,
        })
    }
}

impl TitleInfo {
    fn parse(doc: &Document, id: NodeId) -> TitleInfo {
        let mut info = TitleInfo::default();
        for &child in doc.children(id) {
            match doc.kind(child) {
                Some(NodeKind::Genre) => {
                    if let Some(code) = doc.text_value(child) {
                        info.genres.push(GenreEntry {
                            code,
                            match_percent: doc.attribute(child, "match").map(str::to_string),
                        });
                    }
                }
                Some(NodeKind::Author) => info.authors.push(Person::parse(doc, child)),
                Some(NodeKind::Translator) => info.translators.push(Person::parse(doc, child)),
                Some(NodeKind::Annotation) => info.annotation = Some(child),
                Some(NodeKind::Sequence) => info.sequence = Sequence::parse(doc, child),
                Some(NodeKind::BookTitle) => info.book_title = doc.text_value(child),
                Some(NodeKind::Date) => info.date = doc.text_value(child),
                Some(NodeKind::Lang) => info.lang = doc.text_value(child),
                Some(NodeKind::SrcLang) => info.src_lang = doc.text_value(child),
                _ => {}
            }
        }
        info
    }
}

impl Person {
    fn parse(doc: &Document, id: NodeId) -> Person {
        let value = |kind: NodeKind| {
            doc.first_descendant(id, kind)
                .and_then(|n| doc.text_value(n))
        };
        Person {
            first_name: value(NodeKind::FirstName),
            middle_name: value(NodeKind::MiddleName),
            last_name: value(NodeKind::LastName),
            nickname: value(NodeKind::Nickname),
            home_page: value(NodeKind::HomePage),
            email: value(NodeKind::Email),
        }
    }

    /// Display name: last, first, middle name joined with spaces, plus the
    /// nickname in parentheses. Empty when no name parts are present.
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(last) = self.last_name.as_deref() {
            parts.push(last);
        }
        if let Some(first) = self.first_name.as_deref() {
            parts.push(first);
        }
        if let Some(middle) = self.middle_name.as_deref() {
            parts.push(middle);
        }
        let mut name = parts.join(" ");
        if let Some(nick) = self.nickname.as_deref() {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push('(');
            name.push_str(nick);
            name.push(')');
        }
        name
    }
}

impl Sequence {
    pub(crate) fn parse(doc: &Document, id: NodeId) -> Option<Sequence> {
        let name = doc.attribute(id, "name")?.to_string();
        let number = doc
            .attribute(id, "number")
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Some(Sequence { name, number })
    }
}
