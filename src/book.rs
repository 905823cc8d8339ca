//! The `FictionBook` handle: parse once, render in any mode.

use crate::error::Result;
use crate::locale::Catalog;
use crate::model::ParsedDocument;
use crate::render::{Assembled, Renderer, build_html};
use crate::util::{decode_text, strip_bom};
use crate::xml::Document;

/// A parsed FictionBook document.
///
/// Parsing is all-or-nothing: a missing mandatory element fails
/// construction. The handle is immutable afterwards, so every render call
/// is deterministic: identical input and catalog produce byte-identical
/// output.
pub struct FictionBook {
    doc: Document,
    parsed: ParsedDocument,
    catalog: Catalog,
}

impl FictionBook {
    /// Parse FB2 markup.
    pub fn parse(raw: &str, catalog: Catalog) -> Result<FictionBook> {
        let doc = Document::parse(raw)?;
        let parsed = ParsedDocument::parse(&doc)?;
        Ok(FictionBook {
            doc,
            parsed,
            catalog,
        })
    }

    /// Parse raw bytes, detecting the encoding from the XML declaration
    /// (real FB2 files are frequently windows-1251).
    pub fn from_bytes(bytes: &[u8], catalog: Catalog) -> Result<FictionBook> {
        let text = decode_text(strip_bom(bytes));
        FictionBook::parse(&text, catalog)
    }

    /// The underlying element tree.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The extracted metadata model.
    pub fn parsed(&self) -> &ParsedDocument {
        &self.parsed
    }

    /// The catalog used for fixed labels.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The book title from the first title-info carrying one.
    pub fn title(&self) -> Option<&str> {
        self.parsed
            .descriptions
            .iter()
            .flat_map(|d| d.title_infos.iter())
            .find_map(|info| info.book_title.as_deref())
    }

    /// Flat plain text with CRLF line breaks.
    pub fn to_text(&self) -> Result<String> {
        Ok(self.assemble()?.text)
    }

    /// The metadata block followed by one entry per chapter.
    pub fn to_structure(&self) -> Result<Vec<String>> {
        Ok(self.assemble()?.structure)
    }

    /// A single-page HTML document with anchors and a table of contents.
    pub fn to_html(&self) -> Result<String> {
        let assembled = self.assemble()?;
        Ok(build_html(&assembled, &self.catalog))
    }

    fn assemble(&self) -> Result<Assembled> {
        Renderer::new(&self.doc, &self.catalog).assemble(&self.parsed)
    }
}
