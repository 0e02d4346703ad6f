//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! In-memory translation catalog
//!
//! A [`Catalog`] is an ordered list of [`Entry`] values. Order follows the
//! source file so that a decode/encode cycle produces a readable diff; it
//! has no effect on lookups.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Separator between context and msgid in a lookup key
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// A single translatable string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Original string (msgid)
    pub original: String,
    /// Translation (msgstr); empty means untranslated
    pub translation: String,
    /// Disambiguating context (msgctxt)
    pub context: Option<String>,
}

impl Entry {
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Entry {
            original: original.into(),
            translation: translation.into(),
            context: None,
        }
    }

    /// Set the context. An empty context is the same as none.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into()).filter(|c| !c.is_empty());
        self
    }

    /// Key used in binary catalogs: `context \x04 original`, or just `original`.
    pub fn lookup_key(&self) -> Cow<'_, str> {
        match self.context.as_deref() {
            Some(ctx) if !ctx.is_empty() => {
                Cow::Owned(format!("{}{}{}", ctx, CONTEXT_SEPARATOR, self.original))
            }
            _ => Cow::Borrowed(&self.original),
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    /// Header entries have an empty original and never appear in a catalog.
    pub fn is_header(&self) -> bool {
        self.original.trim().is_empty()
    }

    fn matches(&self, context: Option<&str>, original: &str) -> bool {
        self.original == original
            && self.context.as_deref().filter(|c| !c.is_empty())
                == context.filter(|c| !c.is_empty())
    }
}

/// Translated/untranslated counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub translated: usize,
    pub untranslated: usize,
}

/// Ordered collection of catalog entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Append an entry. Header entries are ignored and an empty context
    /// is stored as `None`.
    ///
    /// Duplicate keys are not rejected; map-based consumers keep the last one.
    pub fn push(&mut self, mut entry: Entry) {
        if entry.is_header() {
            return;
        }
        if entry.context.as_deref() == Some("") {
            entry.context = None;
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `(context, original)`; the last duplicate wins.
    pub fn get(&self, context: Option<&str>, original: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.matches(context, original))
    }

    /// Translation for `(context, original)`, if present and non-empty.
    pub fn translation(&self, context: Option<&str>, original: &str) -> Option<&str> {
        self.get(context, original)
            .filter(|e| e.is_translated())
            .map(|e| e.translation.as_str())
    }

    /// Set the translation of an existing entry.
    ///
    /// Returns false if no entry has this key.
    pub fn set_translation(
        &mut self,
        context: Option<&str>,
        original: &str,
        translation: impl Into<String>,
    ) -> bool {
        match self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.matches(context, original))
        {
            Some(entry) => {
                entry.translation = translation.into();
                true
            }
            None => false,
        }
    }

    /// Set the translation, appending a new entry when the key is unknown.
    pub fn upsert(&mut self, context: Option<&str>, original: &str, translation: &str) {
        if !self.set_translation(context, original, translation) {
            let mut entry = Entry::new(original, translation);
            entry.context = context.map(str::to_string);
            self.push(entry);
        }
    }

    /// Reset every translation to empty, keeping the originals (template use).
    pub fn clear_translations(&mut self) {
        for entry in &mut self.entries {
            entry.translation.clear();
        }
    }

    /// Entries that carry a translation, in catalog order.
    pub fn translated(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_translated())
    }

    pub fn stats(&self) -> CatalogStats {
        let translated = self.translated().count();
        CatalogStats {
            total: self.entries.len(),
            translated,
            untranslated: self.entries.len() - translated,
        }
    }

    /// Plain `{key -> translation}` mapping of translated entries.
    ///
    /// Contextless entries are keyed by their original text; entries with a
    /// context use the lookup key so they do not shadow each other.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.translated()
            .map(|e| (e.lookup_key().into_owned(), e.translation.clone()))
            .collect()
    }
}

impl FromIterator<Entry> for Catalog {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for entry in iter {
            catalog.push(entry);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
