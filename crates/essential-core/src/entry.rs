//! # Collection Entries
//!
//! Frames are stored in the `essential` collection, one entry per record,
//! keyed by a slug of the form `<lang>/<local-name>`. The slug is opaque:
//! it is never normalized, and locale membership is a plain prefix test.

use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameType};

/// Name of the collection frame records are registered under.
pub const ESSENTIAL_COLLECTION: &str = "essential";

/// Locale tag of the pre-built English predicate.
pub const ENGLISH: &str = "en";

/// Locale-prefixed identifier of a collection entry, e.g. `en/Person`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntrySlug(String);

impl EntrySlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The locale segment: everything before the first `/`.
    ///
    /// Returns `None` for slugs without a separator.
    pub fn lang(&self) -> Option<&str> {
        self.0.split_once('/').map(|(lang, _)| lang)
    }

    /// The slug with its locale segment removed.
    ///
    /// Slugs without a separator are returned whole.
    pub fn local_name(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(_, rest)| rest)
    }
}

impl std::fmt::Display for EntrySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntrySlug {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntrySlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EntrySlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One validated record of the `essential` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssentialEntry {
    pub slug: EntrySlug,
    pub data: Frame,
}

impl EssentialEntry {
    pub fn new(slug: impl Into<EntrySlug>, data: Frame) -> Self {
        Self {
            slug: slug.into(),
            data,
        }
    }

    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    pub fn frametype(&self) -> FrameType {
        self.data.frametype()
    }

    /// Returns true iff the slug starts with `<lang>/`.
    pub fn has_lang(&self, lang: &str) -> bool {
        has_lang_prefix(self.slug(), lang)
    }
}

pub fn is_class_entry(entry: &EssentialEntry) -> bool {
    entry.data.is_class()
}

pub fn is_slot_entry(entry: &EssentialEntry) -> bool {
    entry.data.is_slot()
}

pub fn is_facet_entry(entry: &EssentialEntry) -> bool {
    entry.data.is_facet()
}

pub fn is_simple_instance_entry(entry: &EssentialEntry) -> bool {
    entry.data.is_simple_instance()
}

/// Exact, case-sensitive test that `slug` begins with `lang` followed
/// immediately by `/`.
pub fn has_lang_prefix(slug: &str, lang: &str) -> bool {
    slug.strip_prefix(lang).is_some_and(|rest| rest.starts_with('/'))
}

/// Build a predicate that accepts slugs in the `lang` locale.
///
/// ```
/// use essential_core::create_is_lang_entry;
///
/// let is_german = create_is_lang_entry("de");
/// assert!(is_german("de/Person"));
/// assert!(!is_german("deu/Person"));
/// ```
pub fn create_is_lang_entry(lang: &str) -> impl Fn(&str) -> bool + Clone + Send + Sync + 'static {
    let lang = lang.to_string();
    move |slug: &str| has_lang_prefix(slug, &lang)
}

/// Predicate for the `en` locale.
pub fn is_english_entry(slug: &str) -> bool {
    has_lang_prefix(slug, ENGLISH)
}
