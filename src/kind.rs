//! The recognized FB2 element vocabulary.
//!
//! Rendering dispatches on this closed enum rather than on raw tag names, so
//! adding a kind without handling it everywhere fails to compile instead of
//! silently dropping content.

/// A recognized FB2 element kind.
///
/// Elements outside this vocabulary are skipped wherever they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FictionBook,
    Description,
    TitleInfo,
    SrcTitleInfo,
    PublishInfo,
    Genre,
    Author,
    Translator,
    Sequence,
    Annotation,
    BookTitle,
    Date,
    Lang,
    SrcLang,
    Publisher,
    City,
    Year,
    Body,
    Title,
    Epigraph,
    Section,
    Paragraph,
    Subtitle,
    Cite,
    Poem,
    Stanza,
    TextAuthor,
    Verse,
    EmptyLine,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    FirstName,
    MiddleName,
    LastName,
    Nickname,
    HomePage,
    Email,
}

impl NodeKind {
    /// Map a namespace-local tag name to its kind.
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        let kind = match tag {
            "FictionBook" => NodeKind::FictionBook,
            "description" => NodeKind::Description,
            "title-info" => NodeKind::TitleInfo,
            "src-title-info" => NodeKind::SrcTitleInfo,
            "publish-info" => NodeKind::PublishInfo,
            "genre" => NodeKind::Genre,
            "author" => NodeKind::Author,
            "translator" => NodeKind::Translator,
            "sequence" => NodeKind::Sequence,
            "annotation" => NodeKind::Annotation,
            "book-title" => NodeKind::BookTitle,
            "date" => NodeKind::Date,
            "lang" => NodeKind::Lang,
            "src-lang" => NodeKind::SrcLang,
            "publisher" => NodeKind::Publisher,
            "city" => NodeKind::City,
            "year" => NodeKind::Year,
            "body" => NodeKind::Body,
            "title" => NodeKind::Title,
            "epigraph" => NodeKind::Epigraph,
            "section" => NodeKind::Section,
            "p" => NodeKind::Paragraph,
            "subtitle" => NodeKind::Subtitle,
            "cite" => NodeKind::Cite,
            "poem" => NodeKind::Poem,
            "stanza" => NodeKind::Stanza,
            "text-author" => NodeKind::TextAuthor,
            "v" => NodeKind::Verse,
            "empty-line" => NodeKind::EmptyLine,
            "table" => NodeKind::Table,
            "tr" => NodeKind::TableRow,
            "th" => NodeKind::TableHeader,
            "td" => NodeKind::TableCell,
            "first-name" => NodeKind::FirstName,
            "middle-name" => NodeKind::MiddleName,
            "last-name" => NodeKind::LastName,
            "nickname" => NodeKind::Nickname,
            "home-page" => NodeKind::HomePage,
            "email" => NodeKind::Email,
            _ => return None,
        };
        Some(kind)
    }

    /// The canonical tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::FictionBook => "FictionBook",
            NodeKind::Description => "description",
            NodeKind::TitleInfo => "title-info",
            NodeKind::SrcTitleInfo => "src-title-info",
            NodeKind::PublishInfo => "publish-info",
            NodeKind::Genre => "genre",
            NodeKind::Author => "author",
            NodeKind::Translator => "translator",
            NodeKind::Sequence => "sequence",
            NodeKind::Annotation => "annotation",
            NodeKind::BookTitle => "book-title",
            NodeKind::Date => "date",
            NodeKind::Lang => "lang",
            NodeKind::SrcLang => "src-lang",
            NodeKind::Publisher => "publisher",
            NodeKind::City => "city",
            NodeKind::Year => "year",
            NodeKind::Body => "body",
            NodeKind::Title => "title",
            NodeKind::Epigraph => "epigraph",
            NodeKind::Section => "section",
            NodeKind::Paragraph => "p",
            NodeKind::Subtitle => "subtitle",
            NodeKind::Cite => "cite",
            NodeKind::Poem => "poem",
            NodeKind::Stanza => "stanza",
            NodeKind::TextAuthor => "text-author",
            NodeKind::Verse => "v",
            NodeKind::EmptyLine => "empty-line",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tr",
            NodeKind::TableHeader => "th",
            NodeKind::TableCell => "td",
            NodeKind::FirstName => "first-name",
            NodeKind::MiddleName => "middle-name",
            NodeKind::LastName => "last-name",
            NodeKind::Nickname => "nickname",
            NodeKind::HomePage => "home-page",
            NodeKind::Email => "email",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_round_trips() {
        for tag in [
            "FictionBook",
            "title-info",
            "src-title-info",
            "section",
            "p",
            "empty-line",
            "v",
            "tr",
        ] {
            let kind = NodeKind::from_tag(tag).expect(tag);
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn unrecognized_tags_are_none() {
        assert_eq!(NodeKind::from_tag("image"), None);
        assert_eq!(NodeKind::from_tag("binary"), None);
        assert_eq!(NodeKind::from_tag(""), None);
        // Matching is case-sensitive, like the schema.
        assert_eq!(NodeKind::from_tag("fictionbook"), None);
    }
}
