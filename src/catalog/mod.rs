use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::Path,
};

use serde::Deserialize;
use strum::Display;
use tracing::{debug, trace};

use crate::{CompileError, strings::StringsTable};

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

/// A parsed `.xcstrings` string catalog.
///
/// Only the parts needed to produce flat `.strings` tables are kept. Unknown fields
/// (`version`, `comment`, `extractionState`, ...) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default = "default_source_language")]
    source_language: String,

    #[serde(default)]
    strings: BTreeMap<String, Entry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    localizations: HashMap<String, Localization>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    string_unit: Option<StringUnit>,

    /// Plural/device variations. These have no flat representation.
    variations: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StringUnit {
    #[serde(default)]
    state: Option<TranslationState>,
    value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TranslationState {
    New,
    Translated,
    NeedsReview,
    Stale,
    #[serde(other)]
    Other,
}

impl Catalog {
    pub fn from_slice(bytes: &[u8]) -> Result<Catalog, CompileError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Reads a catalog from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, CompileError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CompileError::InputNotFound(path.to_owned()));
        }

        let bytes = fs::read(path).map_err(CompileError::io(path))?;

        Catalog::from_slice(&bytes)
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.strings.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Every language that needs a table: the source language plus any language with a
    /// localization for at least one key.
    pub fn languages(&self) -> BTreeSet<&str> {
        let mut languages = BTreeSet::from([self.source_language.as_str()]);

        self.strings.values().for_each(|entry| {
            languages.extend(entry.languages());
        });

        languages
    }

    pub fn resolve<'a>(&'a self, key: &'a str, entry: &'a Entry, language: &str) -> &'a str {
        resolve_value(key, entry, language, &self.source_language)
    }

    /// Builds the flat table for `language`, one line per key in the catalog.
    pub fn table(&self, language: &str) -> StringsTable {
        self.entries()
            .map(|(key, entry)| (key.to_string(), self.resolve(key, entry, language).to_string()))
            .collect()
    }
}

impl Entry {
    pub fn localization(&self, language: &str) -> Option<&Localization> {
        self.localizations.get(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.localizations.keys().map(String::as_str)
    }

    /// The usable value for `language`, if the localization has one.
    pub fn value(&self, language: &str) -> Option<&str> {
        self.localization(language).and_then(Localization::value)
    }
}

impl Localization {
    pub fn value(&self) -> Option<&str> {
        let Some(unit) = &self.string_unit else {
            if self.variations.is_some() {
                debug!("Localization only has variations, which cannot be flattened");
            }

            return None;
        };

        unit.value.as_deref()
    }

    pub fn state(&self) -> Option<TranslationState> {
        self.string_unit.as_ref().and_then(|unit| unit.state)
    }
}

impl TranslationState {
    pub fn is_final(&self) -> bool {
        matches!(self, TranslationState::Translated)
    }
}

/// Picks the value emitted for `key` in `language`.
///
/// Tries the target language, then the source language, then falls back to the key
/// itself, so every key always produces a line.
pub fn resolve_value<'a>(
    key: &'a str,
    entry: &'a Entry,
    language: &str,
    source_language: &str,
) -> &'a str {
    if let Some(value) = entry.value(language) {
        if let Some(state) = entry.localization(language).and_then(Localization::state)
            && !state.is_final()
        {
            trace!(key, language, %state, "Using value that is not marked translated");
        }

        return value;
    }

    if let Some(value) = entry.value(source_language) {
        debug!(key, language, source_language, "Falling back to source language");
        return value;
    }

    debug!(key, language, "No value found, falling back to key");
    key
}
