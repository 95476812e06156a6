//! Studio space model - one allocation over part or all of a studio

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The area portion of an allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AreaSelection {
    /// Unprefixed area labels. An empty list is an explicitly empty selection,
    /// which is not the same thing as the whole studio.
    Flat(Vec<String>),
    /// Areas local to one lettered sub-space, prefix stripped.
    /// An empty list is the bare sub-space label (`O:P`), i.e. the whole sub-space.
    SubSpaced {
        #[serde(rename = "subSpace")]
        sub_space: char,
        areas: Vec<String>,
    },
}

impl AreaSelection {
    /// Area labels regardless of shape
    pub fn areas(&self) -> &[String] {
        match self {
            AreaSelection::Flat(areas) => areas,
            AreaSelection::SubSpaced { areas, .. } => areas,
        }
    }

    /// Sub-space tag, if this is a sub-spaced selection
    pub fn sub_space(&self) -> Option<char> {
        match self {
            AreaSelection::Flat(_) => None,
            AreaSelection::SubSpaced { sub_space, .. } => Some(*sub_space),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.areas().is_empty()
    }
}

/// An allocation: a claim over part or all of one studio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioSpace {
    /// Canonical studio name
    pub space: String,
    /// `None` means the entire studio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas: Option<AreaSelection>,
}

impl StudioSpace {
    /// The entire studio
    pub fn whole(space: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            areas: None,
        }
    }

    pub fn flat<I, S>(space: impl Into<String>, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            space: space.into(),
            areas: Some(AreaSelection::Flat(
                areas.into_iter().map(Into::into).collect(),
            )),
        }
    }

    pub fn sub_spaced<I, S>(space: impl Into<String>, sub_space: char, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            space: space.into(),
            areas: Some(AreaSelection::SubSpaced {
                sub_space,
                areas: areas.into_iter().map(Into::into).collect(),
            }),
        }
    }

    /// Sub-space tag, if any
    pub fn sub_space(&self) -> Option<char> {
        self.areas.as_ref().and_then(AreaSelection::sub_space)
    }

    /// Whether two allocations occupy the same slot.
    ///
    /// A whole-studio allocation matches every slot of its studio; flat
    /// selections match each other; sub-spaced selections match only
    /// when their tags agree.
    pub fn same_slot(&self, other: &StudioSpace) -> bool {
        if self.space != other.space {
            return false;
        }
        match (&self.areas, &other.areas) {
            (None, _) | (_, None) => true,
            (Some(AreaSelection::Flat(_)), Some(AreaSelection::Flat(_))) => true,
            (
                Some(AreaSelection::SubSpaced { sub_space: a, .. }),
                Some(AreaSelection::SubSpaced { sub_space: b, .. }),
            ) => a == b,
            _ => false,
        }
    }

    /// Ordering used by allocation sets: studio name, then sub-space tag
    pub fn slot_cmp(&self, other: &StudioSpace) -> Ordering {
        self.space
            .cmp(&other.space)
            .then_with(|| self.sub_space().cmp(&other.sub_space()))
    }
}

impl fmt::Display for StudioSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.areas {
            None => write!(f, "{}", self.space),
            Some(AreaSelection::Flat(areas)) => write!(f, "{}{{{}}}", self.space, areas.join(",")),
            Some(AreaSelection::SubSpaced { sub_space, areas }) => {
                write!(f, "{}:{}{{{}}}", self.space, sub_space, areas.join(","))
            }
        }
    }
}

/// Natural ordering for area labels: leading number, then suffix (`1 < 3 < 3b < 10`).
/// Labels without a leading number sort after numbered ones.
pub fn compare_areas(a: &str, b: &str) -> Ordering {
    area_sort_key(a).cmp(&area_sort_key(b))
}

fn area_sort_key(label: &str) -> (bool, u64, &str, &str) {
    let digits = label
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(label.len());
    if digits == 0 {
        return (true, 0, label, label);
    }
    let number = label[..digits].parse::<u64>().unwrap_or(u64::MAX);
    (false, number, &label[digits..], label)
}

/// Sort and deduplicate area labels in natural order
pub fn sort_areas(areas: &mut Vec<String>) {
    areas.sort_by(|a, b| compare_areas(a, b));
    areas.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_slot_whole_studio_matches_everything() {
        let whole = StudioSpace::whole("O");
        assert!(whole.same_slot(&StudioSpace::sub_spaced("O", 'P', ["1"])));
        assert!(whole.same_slot(&StudioSpace::flat("O", ["1"])));
        assert!(!whole.same_slot(&StudioSpace::whole("A")));
    }

    #[test]
    fn test_same_slot_sub_spaces() {
        let p = StudioSpace::sub_spaced("O", 'P', ["1"]);
        let c = StudioSpace::sub_spaced("O", 'C', ["1"]);
        assert!(p.same_slot(&StudioSpace::sub_spaced("O", 'P', ["2"])));
        assert!(!p.same_slot(&c));
        assert!(!p.same_slot(&StudioSpace::flat("O", ["1"])));
    }

    #[test]
    fn test_natural_area_order() {
        let mut areas: Vec<String> = ["10", "3b", "2", "3", "1", "2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_areas(&mut areas);
        assert_eq!(areas, vec!["1", "2", "3", "3b", "10"]);
    }

    #[test]
    fn test_slot_order_puts_flat_before_sub_spaces() {
        let whole = StudioSpace::whole("O");
        let p = StudioSpace::sub_spaced("O", 'P', ["1"]);
        let c = StudioSpace::sub_spaced("O", 'C', ["1"]);
        assert_eq!(whole.slot_cmp(&c), Ordering::Less);
        assert_eq!(c.slot_cmp(&p), Ordering::Less);
    }
}
