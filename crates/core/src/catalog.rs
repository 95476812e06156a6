//! Studio catalog schema and loader
//!
//! Defines the TOML-parseable catalog of studios and their ordered area
//! labels. Catalogs are validated at load time: area ranges expand by
//! catalog position, so every catalog must already be in physical order.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::models::compare_areas;

/// One studio as supplied by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioCatalogEntry {
    /// Full studio name
    pub name: String,
    /// Short label used in notation, if any
    #[serde(default)]
    pub abbreviation: Option<String>,
    /// Ordered area labels; either a TOML array or a comma-joined string
    #[serde(default, deserialize_with = "deserialize_areas")]
    pub areas: Vec<String>,
    /// Whether the studio counts toward standard live-show capacity
    #[serde(default = "default_allocatable")]
    pub allocatable: bool,
}

fn default_allocatable() -> bool {
    true
}

impl StudioCatalogEntry {
    pub fn new(name: impl Into<String>, areas: &[&str]) -> Self {
        Self {
            name: name.into(),
            abbreviation: None,
            areas: areas.iter().map(|a| a.to_string()).collect(),
            allocatable: true,
        }
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn not_allocatable(mut self) -> Self {
        self.allocatable = false;
        self
    }

    /// Label used when writing notation
    pub fn label(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAreas {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_areas<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawAreas::deserialize(deserializer)? {
        RawAreas::Joined(joined) => parse_area_catalog(&joined),
        RawAreas::List(list) => list
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect(),
    })
}

/// Split a comma-joined area catalog (`"P1,P2,C1"`) into labels
pub fn parse_area_catalog(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a sub-spaced area label (`P1`) into its tag and local label.
/// Returns `None` for flat labels (`1`, `3b`).
pub fn split_sub_space(label: &str) -> Option<(char, &str)> {
    let mut chars = label.chars();
    let tag = chars.next()?;
    let rest = chars.as_str();
    if tag.is_ascii_alphabetic() && !rest.is_empty() {
        Some((tag, rest))
    } else {
        None
    }
}

/// Catalog file loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(rename = "studio", default)]
    pub studios: Vec<StudioCatalogEntry>,
}

/// Error type for catalog loading
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Catalog file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Studio name must not be empty")]
    EmptyName,
    #[error("Studio label '{0}' is declared more than once")]
    DuplicateStudio(String),
    #[error("Studio '{studio}' lists area '{area}' more than once")]
    DuplicateArea { studio: String, area: String },
    #[error("Studio '{studio}' area '{area}' is out of order after '{previous}'")]
    OutOfOrder {
        studio: String,
        area: String,
        previous: String,
    },
}

impl CatalogFile {
    /// Load a catalog from a TOML file
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&content)?;
        tracing::info!(studios = catalog.studios.len(), "Loaded studio catalog");
        Ok(catalog)
    }

    /// Load a catalog directly from TOML content
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: CatalogFile = toml::from_str(content)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Reject duplicate labels and catalogs stored out of physical order
    pub fn check(&self) -> Result<(), CatalogError> {
        let mut labels = HashSet::new();
        for entry in &self.studios {
            check_entry(entry)?;
            if !labels.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateStudio(entry.name.clone()));
            }
            if let Some(abbreviation) = entry.abbreviation.as_deref() {
                if abbreviation != entry.name && !labels.insert(abbreviation) {
                    return Err(CatalogError::DuplicateStudio(abbreviation.to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Check one entry's flat and per-sub-space catalogs are strictly increasing
pub fn check_entry(entry: &StudioCatalogEntry) -> Result<(), CatalogError> {
    if entry.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }

    // Last label seen per sub-space; `None` key is the flat catalog
    let mut previous: Vec<(Option<char>, &str)> = Vec::new();
    for area in &entry.areas {
        let (tag, local) = match split_sub_space(area) {
            Some((tag, local)) => (Some(tag), local),
            None => (None, area.as_str()),
        };
        match previous.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, last)) => {
                match compare_areas(*last, local) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Err(CatalogError::DuplicateArea {
                            studio: entry.name.clone(),
                            area: area.clone(),
                        })
                    }
                    Ordering::Greater => {
                        return Err(CatalogError::OutOfOrder {
                            studio: entry.name.clone(),
                            area: area.clone(),
                            previous: last.to_string(),
                        })
                    }
                }
                *last = local;
            }
            None => previous.push((tag, local)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_catalog() {
        let toml = r#"
[[studio]]
name = "A"
"#;
        let catalog = CatalogFile::from_toml(toml).unwrap();
        assert_eq!(catalog.studios.len(), 1);
        assert!(catalog.studios[0].areas.is_empty());
        assert!(catalog.studios[0].allocatable);
        assert_eq!(catalog.studios[0].label(), "A");
    }

    #[test]
    fn test_parse_joined_and_listed_areas() {
        let toml = r#"
[[studio]]
name = "A"
areas = "1, 2,3,,4"

[[studio]]
name = "Omega"
abbreviation = "O"
areas = ["P1", "P2", "P3", "C1"]
allocatable = false
"#;
        let catalog = CatalogFile::from_toml(toml).unwrap();
        assert_eq!(catalog.studios[0].areas, vec!["1", "2", "3", "4"]);
        assert_eq!(catalog.studios[1].areas, vec!["P1", "P2", "P3", "C1"]);
        assert_eq!(catalog.studios[1].label(), "O");
        assert!(!catalog.studios[1].allocatable);
    }

    #[test]
    fn test_out_of_order_catalog_rejected() {
        let toml = r#"
[[studio]]
name = "A"
areas = "1,3,2"
"#;
        let err = CatalogFile::from_toml(toml).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfOrder { .. }));
    }

    #[test]
    fn test_sub_spaces_ordered_independently() {
        let entry = StudioCatalogEntry::new("O", &["P1", "P2", "C1", "P3", "C2"]);
        assert!(check_entry(&entry).is_ok());

        let entry = StudioCatalogEntry::new("O", &["P2", "C1", "P1"]);
        assert!(matches!(
            check_entry(&entry),
            Err(CatalogError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        let entry = StudioCatalogEntry::new("A", &["1", "2", "2"]);
        assert!(matches!(
            check_entry(&entry),
            Err(CatalogError::DuplicateArea { .. })
        ));

        let toml = r#"
[[studio]]
name = "A"

[[studio]]
name = "Annex"
abbreviation = "A"
"#;
        assert!(matches!(
            CatalogFile::from_toml(toml),
            Err(CatalogError::DuplicateStudio(label)) if label == "A"
        ));
    }

    #[test]
    fn test_split_sub_space() {
        assert_eq!(split_sub_space("P1"), Some(('P', "1")));
        assert_eq!(split_sub_space("1"), None);
        assert_eq!(split_sub_space("3b"), None);
        assert_eq!(split_sub_space("P"), None);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("studios.toml");
        std::fs::write(&path, "[[studio]]\nname = \"B\"\nareas = \"1,2,3\"\n").unwrap();

        let catalog = CatalogFile::load(&path).unwrap();
        assert_eq!(catalog.studios[0].name, "B");

        let missing = CatalogFile::load(&temp.path().join("missing.toml"));
        assert!(matches!(missing, Err(CatalogError::FileNotFound(_))));
    }
}
