//! Token resolution - turns raw tokens into structured allocations

use crate::error::{Error, Result};
use crate::models::{AreaSelection, StudioSpace};
use crate::registry::StudioRegistry;

/// Expand an area list (`1,3-4`) against an ordered catalog.
///
/// Ranges are resolved by catalog position, not by numeric value. Both
/// endpoints and every single label must exist in the catalog.
pub fn expand_areas(list: &str, catalog: &[String]) -> Result<Vec<String>> {
    let position = |label: &str| {
        catalog
            .iter()
            .position(|a| a == label)
            .ok_or_else(|| Error::AreaNotFound(label.to_string()))
    };

    let mut areas: Vec<String> = Vec::new();
    for piece in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let expanded: &[String] = match piece.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (start.trim(), end.trim());
                let from = position(start)?;
                let to = position(end)?;
                if from > to {
                    return Err(Error::InvalidRange {
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                &catalog[from..=to]
            }
            None => {
                let at = position(piece)?;
                &catalog[at..=at]
            }
        };

        for area in expanded {
            if !areas.contains(area) {
                areas.push(area.clone());
            }
        }
    }
    Ok(areas)
}

/// Resolve one raw token into an allocation
pub fn resolve_token(token: &str, registry: &StudioRegistry) -> Result<StudioSpace> {
    let token = token.trim();

    if let Some((label, area)) = token.split_once(':') {
        let profile = registry
            .resolve(label)
            .ok_or_else(|| Error::NotFound(format!("Could not find space {}", label)))?;

        let mut chars = area.chars();
        let sub_space = chars.next().ok_or_else(|| {
            Error::InvalidNotationState(format!("Token {} has no sub-space after ':'", token))
        })?;
        if !sub_space.is_ascii_alphabetic() {
            return Err(Error::InvalidNotationState(format!(
                "Token {} has sub-space {:?}, expected a letter",
                token, sub_space
            )));
        }
        let areas = expand_areas(chars.as_str(), profile.sub_catalog(sub_space))?;

        return Ok(StudioSpace {
            space: profile.name().to_string(),
            areas: Some(AreaSelection::SubSpaced { sub_space, areas }),
        });
    }

    let Some(split) = token.find(|c: char| c.is_ascii_digit()) else {
        // Bare studio name: the whole studio
        let space = registry
            .resolve(token)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| token.to_string());
        return Ok(StudioSpace::whole(space));
    };

    let label = token[..split].trim();
    let profile = registry
        .resolve(label)
        .ok_or_else(|| Error::NotFound(format!("Cannot find studio {}", label)))?;
    let areas = expand_areas(&token[split..], profile.flat_catalog())?;

    Ok(StudioSpace {
        space: profile.name().to_string(),
        areas: Some(AreaSelection::Flat(areas)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StudioCatalogEntry;

    fn catalog(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn registry() -> StudioRegistry {
        StudioRegistry::new(vec![
            StudioCatalogEntry::new("A", &["1", "2", "3", "4", "5"]),
            StudioCatalogEntry::new("B", &["1", "2", "3"]),
            StudioCatalogEntry::new("Omega", &["P1", "P2", "P3", "C1"]).with_abbreviation("O"),
            StudioCatalogEntry::new("Mezzanine", &[]).with_abbreviation("Mez"),
        ])
        .unwrap()
    }

    #[test]
    fn test_expand_ranges_and_lists() {
        let cat = catalog(&["1", "2", "3", "4", "5"]);
        assert_eq!(expand_areas("1,3-4", &cat).unwrap(), vec!["1", "3", "4"]);
        assert_eq!(expand_areas("2-2", &cat).unwrap(), vec!["2"]);
        assert_eq!(expand_areas("1-3,2", &cat).unwrap(), vec!["1", "2", "3"]);
        assert!(expand_areas("", &cat).unwrap().is_empty());
        assert_eq!(expand_areas("1,,2", &cat).unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_expand_uses_catalog_position() {
        let cat = catalog(&["8", "9", "10", "11"]);
        assert_eq!(expand_areas("9-10", &cat).unwrap(), vec!["9", "10"]);

        let cat = catalog(&["1", "2", "2b", "3"]);
        assert_eq!(expand_areas("2-3", &cat).unwrap(), vec!["2", "2b", "3"]);
    }

    #[test]
    fn test_expand_errors() {
        let cat = catalog(&["1", "2", "3"]);
        assert!(matches!(
            expand_areas("3-1", &cat),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            expand_areas("1-7", &cat),
            Err(Error::AreaNotFound(area)) if area == "7"
        ));
        assert!(matches!(
            expand_areas("9", &cat),
            Err(Error::AreaNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_flat_token() {
        let space = resolve_token("A1,3-4", &registry()).unwrap();
        assert_eq!(space, StudioSpace::flat("A", ["1", "3", "4"]));
    }

    #[test]
    fn test_resolve_sub_spaced_token() {
        let registry = registry();
        let space = resolve_token("O:P1-3", &registry).unwrap();
        assert_eq!(space, StudioSpace::sub_spaced("Omega", 'P', ["1", "2", "3"]));

        // Full name also resolves
        let space = resolve_token("Omega:C1", &registry).unwrap();
        assert_eq!(space, StudioSpace::sub_spaced("Omega", 'C', ["1"]));

        // Bare sub-space label
        let space = resolve_token("O:P", &registry).unwrap();
        assert_eq!(space, StudioSpace::sub_spaced("Omega", 'P', Vec::<String>::new()));
    }

    #[test]
    fn test_resolve_bare_names() {
        let registry = registry();
        assert_eq!(resolve_token("Mez", &registry).unwrap(), StudioSpace::whole("Mezzanine"));
        assert_eq!(resolve_token("B", &registry).unwrap(), StudioSpace::whole("B"));
        // Unknown names are kept for the validator to flag
        assert_eq!(
            resolve_token("Control Room", &registry).unwrap(),
            StudioSpace::whole("Control Room")
        );
    }

    #[test]
    fn test_resolve_failures() {
        let registry = registry();
        assert!(matches!(resolve_token("Z1", &registry), Err(Error::NotFound(_))));
        assert!(matches!(resolve_token("Z:P1", &registry), Err(Error::NotFound(_))));
        assert!(matches!(
            resolve_token("O:", &registry),
            Err(Error::InvalidNotationState(_))
        ));
        assert!(matches!(
            resolve_token("O:1", &registry),
            Err(Error::InvalidNotationState(_))
        ));
        assert!(matches!(
            resolve_token("O:P4", &registry),
            Err(Error::AreaNotFound(_))
        ));
        // Sub-spaced studio has no flat areas
        assert!(matches!(
            resolve_token("O1", &registry),
            Err(Error::AreaNotFound(_))
        ));
    }
}
