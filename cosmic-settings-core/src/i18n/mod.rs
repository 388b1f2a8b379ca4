//! Internationalization (i18n)
//!
//! Panels only ever carry message keys (`label.*`, `message.*`). A [`Localizer`] turns them
//! into display text; unknown keys come back unchanged so a missing translation is visible
//! instead of blank.

use std::borrow::Cow;

mod en_us;
pub mod keys;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// English (United States)
    #[default]
    EnUs,
}

impl Language {
    /// BCP 47 language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
        }
    }

    /// Parse a language code
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en-US" | "en" => Some(Language::EnUs),
            _ => None,
        }
    }
}

/// Resolves message keys to display text.
pub trait Localizer: Send + Sync {
    /// Text for `key`, or the key itself when there is no translation.
    fn text<'a>(&self, key: &'a str) -> Cow<'a, str>;
}

/// Built-in English catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl Localizer for EnglishCatalog {
    fn text<'a>(&self, key: &'a str) -> Cow<'a, str> {
        en_us::lookup(key).map_or(Cow::Borrowed(key), Cow::Borrowed)
    }
}

/// Localizer for a configured language code.
///
/// Unknown codes fall back to English with a warning.
pub fn localizer_for(code: &str) -> Box<dyn Localizer> {
    match Language::from_code(code) {
        Some(Language::EnUs) => Box::new(EnglishCatalog),
        None => {
            log::warn!("Unsupported language '{code}', falling back to en-US");
            Box::new(EnglishCatalog)
        }
    }
}
