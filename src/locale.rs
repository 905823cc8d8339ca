//! Localized fixed labels.
//!
//! Renderers never format label text themselves; they go through an injected
//! [`Catalog`]. A catalog is a per-locale string table loaded from disk,
//! falling back to the built-in English defaults when no table exists for
//! the requested locale, so rendering always succeeds.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// The fixed message identifiers used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Translator,
    Translators,
    Language,
    OriginalLanguage,
    Date,
    Annotation,
    OriginalMetadata,
    EditionInformation,
    Contents,
}

impl Message {
    /// The identifier used as the lookup key in locale tables.
    pub fn key(self) -> &'static str {
        match self {
            Message::Translator => "translator",
            Message::Translators => "translators",
            Message::Language => "language",
            Message::OriginalLanguage => "original_language",
            Message::Date => "date",
            Message::Annotation => "annotation",
            Message::OriginalMetadata => "original_metadata",
            Message::EditionInformation => "edition_information",
            Message::Contents => "contents",
        }
    }

    /// The built-in English text.
    pub fn default_text(self) -> &'static str {
        match self {
            Message::Translator => "Translator",
            Message::Translators => "Translators",
            Message::Language => "Language",
            Message::OriginalLanguage => "Original language",
            Message::Date => "Date",
            Message::Annotation => "Annotation",
            Message::OriginalMetadata => "Original metadata",
            Message::EditionInformation => "Edition information",
            Message::Contents => "Contents",
        }
    }
}

/// A locale string table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// The built-in English catalog.
    pub fn builtin() -> Catalog {
        Catalog::default()
    }

    /// Parse a catalog from a JSON object of `identifier: text` pairs.
    pub fn from_json(json: &str) -> Result<Catalog> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load `{dir}/{lang}.json`. A missing or unreadable table falls back
    /// to the built-in defaults.
    pub fn load(dir: impl AsRef<Path>, lang: &str) -> Catalog {
        let path = dir.as_ref().join(format!("{lang}.json"));
        match fs::read_to_string(&path) {
            Ok(json) => Catalog::from_json(&json).unwrap_or_default(),
            Err(_) => Catalog::builtin(),
        }
    }

    /// The localized text for a fixed message.
    pub fn message(&self, message: Message) -> &str {
        self.messages
            .get(message.key())
            .map(String::as_str)
            .unwrap_or_else(|| message.default_text())
    }

    /// Translate an arbitrary display string (genre labels); identity when
    /// the catalog has no entry for it.
    pub fn translate<'a>(&'a self, text: &'a str) -> &'a str {
        self.messages.get(text).map(String::as_str).unwrap_or(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.message(Message::Contents), "Contents");
        assert_eq!(catalog.message(Message::OriginalLanguage), "Original language");
        assert_eq!(catalog.translate("Science Fiction"), "Science Fiction");
    }

    #[test]
    fn table_overrides_individual_messages() {
        let catalog =
            Catalog::from_json(r#"{"contents": "Inhalt", "Science Fiction": "SF"}"#).unwrap();
        assert_eq!(catalog.message(Message::Contents), "Inhalt");
        // Unlisted ids keep their defaults
        assert_eq!(catalog.message(Message::Date), "Date");
        assert_eq!(catalog.translate("Science Fiction"), "SF");
        assert_eq!(catalog.translate("Poetry"), "Poetry");
    }

    #[test]
    fn missing_locale_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(dir.path(), "xx");
        assert_eq!(catalog.message(Message::Translator), "Translator");
    }

    #[test]
    fn load_reads_locale_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("de.json"), r#"{"translator": "Übersetzer"}"#).unwrap();
        let catalog = Catalog::load(dir.path(), "de");
        assert_eq!(catalog.message(Message::Translator), "Übersetzer");
        assert_eq!(catalog.message(Message::Translators), "Translators");
    }
}
