//! # fikcio
//!
//! A fast, lightweight library for converting FictionBook (FB2) documents
//! into plain text, a chapter-split structure list, or a single-page HTML
//! document.
//!
//! ## Features
//!
//! - Plain-text rendering with CRLF-normalized line breaks
//! - Chapter splitting at top-level section boundaries ("structure" mode)
//! - HTML output with auto-generated anchors, a table of contents, and
//!   two-sided footnote links (`bunch_{id}` / `return_{id}`)
//! - Localized fixed labels via per-locale string tables
//! - Encoding detection for the windows-1251 files common in the wild
//!
//! ## Quick Start
//!
//! ```
//! use fikcio::{Catalog, FictionBook};
//!
//! let raw = r#"<FictionBook>
//!   <description>
//!     <title-info><book-title>Test</book-title></title-info>
//!   </description>
//!   <body><section><p>Hello</p></section></body>
//! </FictionBook>"#;
//!
//! let book = FictionBook::parse(raw, Catalog::builtin())?;
//!
//! assert_eq!(book.to_text()?, "Test\r\n\r\nHello\r\n");
//! assert_eq!(book.to_structure()?.len(), 2);
//! assert!(book.to_html()?.contains("<title>Test</title>"));
//! # Ok::<(), fikcio::Error>(())
//! ```
//!
//! Parsing is all-or-nothing: missing mandatory elements (`FictionBook`,
//! `description`, `body`, `title-info`) fail with a structured
//! [`Error::ElementNotFound`]. Optional metadata, unrecognized elements,
//! and empty text are silently tolerated.

pub mod error;
pub mod genre;
pub mod kind;
pub mod locale;
pub mod model;
pub mod render;
pub mod xml;

mod book;
mod util;

pub use book::FictionBook;
pub use error::{Error, Result};
pub use kind::NodeKind;
pub use locale::{Catalog, Message};
pub use model::{Description, GenreEntry, ParsedDocument, Person, Sequence, TitleInfo};
pub use render::{Anchor, HtmlFragment, RenderResult};
pub use util::decode_text;
