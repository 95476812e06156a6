//! Studio registry - precomputed, read-only catalog lookup
//!
//! Built once per operation from catalog entries. Every derived view the
//! notation engine needs (flat catalog, per-sub-space catalogs, display
//! label, label index) is computed up front so lookups never touch the
//! entries again and the registry can be shared across threads.

use std::collections::HashMap;

use crate::catalog::{split_sub_space, CatalogError, CatalogFile, StudioCatalogEntry};
use crate::notation::format_areas;

/// A studio with its derived area catalogs
#[derive(Debug, Clone)]
pub struct StudioProfile {
    entry: StudioCatalogEntry,
    /// Unprefixed labels in catalog order
    flat: Vec<String>,
    /// Sub-space tag to prefix-stripped labels, tags in first-seen order
    sub_spaces: Vec<(char, Vec<String>)>,
}

impl StudioProfile {
    fn new(entry: StudioCatalogEntry) -> Self {
        let mut flat = Vec::new();
        let mut sub_spaces: Vec<(char, Vec<String>)> = Vec::new();

        for area in &entry.areas {
            match split_sub_space(area) {
                Some((tag, local)) => match sub_spaces.iter_mut().find(|(t, _)| *t == tag) {
                    Some((_, areas)) => areas.push(local.to_string()),
                    None => sub_spaces.push((tag, vec![local.to_string()])),
                },
                None => flat.push(area.clone()),
            }
        }

        Self {
            entry,
            flat,
            sub_spaces,
        }
    }

    /// Canonical studio name
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Label written in notation (abbreviation, else name)
    pub fn label(&self) -> &str {
        self.entry.label()
    }

    pub fn entry(&self) -> &StudioCatalogEntry {
        &self.entry
    }

    pub fn is_allocatable(&self) -> bool {
        self.entry.allocatable
    }

    /// Full catalog as stored, prefixes included
    pub fn catalog(&self) -> &[String] {
        &self.entry.areas
    }

    /// Unprefixed area labels
    pub fn flat_catalog(&self) -> &[String] {
        &self.flat
    }

    /// Prefix-stripped labels for one sub-space (empty if unknown)
    pub fn sub_catalog(&self, sub_space: char) -> &[String] {
        self.sub_spaces
            .iter()
            .find(|(tag, _)| *tag == sub_space)
            .map(|(_, areas)| areas.as_slice())
            .unwrap_or(&[])
    }

    /// Sub-space tags in catalog order
    pub fn sub_space_tags(&self) -> impl Iterator<Item = char> + '_ {
        self.sub_spaces.iter().map(|(tag, _)| *tag)
    }

    pub fn has_sub_spaces(&self) -> bool {
        !self.sub_spaces.is_empty()
    }

    /// Check membership of a raw catalog label
    pub fn has_area(&self, label: &str) -> bool {
        self.entry.areas.iter().any(|a| a == label)
    }
}

/// Studio registry - central read-only store of studio catalogs
#[derive(Debug, Clone, Default)]
pub struct StudioRegistry {
    /// Profiles sorted by name
    studios: Vec<StudioProfile>,
    /// Canonical name to profile index
    by_name: HashMap<String, usize>,
    /// Abbreviation to profile index
    by_abbreviation: HashMap<String, usize>,
}

impl StudioRegistry {
    /// Build a registry from catalog entries, validating catalog order
    pub fn new(entries: Vec<StudioCatalogEntry>) -> Result<Self, CatalogError> {
        let file = CatalogFile { studios: entries };
        file.check()?;
        Ok(Self::build(file.studios))
    }

    /// Build from an already-checked catalog file
    pub fn from_catalog(catalog: CatalogFile) -> Self {
        Self::build(catalog.studios)
    }

    fn build(mut entries: Vec<StudioCatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut by_name = HashMap::new();
        let mut by_abbreviation = HashMap::new();
        let studios: Vec<StudioProfile> = entries.into_iter().map(StudioProfile::new).collect();

        for (i, profile) in studios.iter().enumerate() {
            by_name.insert(profile.name().to_string(), i);
            if let Some(abbreviation) = &profile.entry.abbreviation {
                by_abbreviation.insert(abbreviation.clone(), i);
            }
            tracing::debug!(studio = %profile.name(), areas = profile.catalog().len(), "Registered studio");
        }

        Self {
            studios,
            by_name,
            by_abbreviation,
        }
    }

    /// Get a studio by canonical name
    pub fn get(&self, name: &str) -> Option<&StudioProfile> {
        self.by_name.get(name).map(|&i| &self.studios[i])
    }

    /// Resolve a notation label: abbreviation first, then full name
    pub fn resolve(&self, label: &str) -> Option<&StudioProfile> {
        self.by_abbreviation
            .get(label)
            .or_else(|| self.by_name.get(label))
            .map(|&i| &self.studios[i])
    }

    /// Check if a studio is registered under its canonical name
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Check if a label is any studio's name or abbreviation
    pub fn is_known_label(&self, label: &str) -> bool {
        self.by_name.contains_key(label) || self.by_abbreviation.contains_key(label)
    }

    /// Every name and abbreviation, for token disambiguation
    pub fn known_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .by_name
            .keys()
            .chain(self.by_abbreviation.keys())
            .cloned()
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Notation label for a studio, falling back to the stored name
    pub fn label_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map(StudioProfile::label).unwrap_or(name)
    }

    /// All profiles sorted by name
    pub fn studios(&self) -> impl Iterator<Item = &StudioProfile> {
        self.studios.iter()
    }

    pub fn len(&self) -> usize {
        self.studios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studios.is_empty()
    }

    /// Full-capacity notation over allocatable studios.
    ///
    /// Flat studios contribute their label; sub-spaced studios contribute
    /// `label:T` for every sub-space tag, plus their unprefixed areas if any.
    pub fn standard_notation(&self) -> String {
        let mut tokens: Vec<String> = Vec::new();
        for profile in self.studios.iter().filter(|p| p.is_allocatable()) {
            if profile.has_sub_spaces() {
                let flat = profile.flat_catalog();
                if !flat.is_empty() {
                    tokens.push(format!("{}{}", profile.label(), format_areas(flat, flat)));
                }
                tokens.extend(
                    profile
                        .sub_space_tags()
                        .map(|tag| format!("{}:{}", profile.label(), tag)),
                );
            } else {
                tokens.push(profile.label().to_string());
            }
        }
        tokens.sort();
        tokens.join(" ")
    }
}
