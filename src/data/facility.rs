//! Facility records as supplied by the data collaborator

use crate::{core::geo::LatLng, prelude::HashSet, MapError, Result};
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, path::Path, str::FromStr};

/// Identifier of a facility record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub u64);

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A care facility. The map core reads only the coordinate, id and name;
/// everything else rides along for the list and detail collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(alias = "type")]
    pub category: String,
    #[serde(default, alias = "beds")]
    pub capacity: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(flatten)]
    pub position: LatLng,
}

impl Facility {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        category: impl Into<String>,
        position: LatLng,
    ) -> Self {
        Self {
            id: FacilityId(id),
            name: name.into(),
            address: String::new(),
            category: category.into(),
            capacity: 0,
            phone: String::new(),
            departments: Vec::new(),
            position,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    /// First `limit` departments joined with commas, noting how many were left out
    pub fn departments_summary(&self, limit: usize) -> String {
        let shown = self
            .departments
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let hidden = self.departments.len().saturating_sub(limit);
        if hidden > 0 {
            format!("{shown} +{hidden} more")
        } else {
            shown
        }
    }
}

/// Parses a JSON array of facility records
pub fn facilities_from_json(json: &str) -> Result<Vec<Facility>> {
    let facilities: Vec<Facility> = serde_json::from_str(json)?;
    if let Some(bad) = facilities.iter().find(|f| !f.position.is_valid()) {
        return Err(MapError::InvalidCoordinates(format!(
            "facility {} ({}) at {:?}",
            bad.id, bad.name, bad.position
        )));
    }
    let mut seen = HashSet::default();
    if let Some(dup) = facilities.iter().find(|f| !seen.insert(f.id)) {
        return Err(MapError::Data(format!(
            "duplicate facility id {} ({})",
            dup.id, dup.name
        )));
    }
    Ok(facilities)
}

pub fn facilities_from_file(path: impl AsRef<Path>) -> Result<Vec<Facility>> {
    let text = std::fs::read_to_string(path)?;
    facilities_from_json(&text)
}

/// Which facility categories are shown on the map and in the list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    pub fn matches(&self, facility: &Facility) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => facility.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Category(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => f.write_str(category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_with_aliases() {
        let json = r#"[{
            "id": 3,
            "name": "Seoul General",
            "address": "101 Daehak-ro",
            "type": "general",
            "beds": 1800,
            "phone": "02-000-0000",
            "departments": ["Emergency", "Cardiology"],
            "lat": 37.5796,
            "lng": 126.999
        }]"#;
        let facilities = facilities_from_json(json).unwrap();
        assert_eq!(facilities.len(), 1);
        let facility = &facilities[0];
        assert_eq!(facility.id, FacilityId(3));
        assert_eq!(facility.category, "general");
        assert_eq!(facility.capacity, 1800);
        assert_eq!(facility.position, LatLng::new(37.5796, 126.999));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            { "id": 1, "name": "First", "category": "clinic", "lat": 37.5665, "lng": 126.978 },
            { "id": 1, "name": "Second", "category": "clinic", "lat": 35.1796, "lng": 129.0756 }
        ]"#;
        let err = facilities_from_json(json).unwrap_err();
        assert!(matches!(err, MapError::Data(message) if message.contains("Second")));
    }

    #[test]
    fn test_out_of_range_coordinate_rejected() {
        let json = r#"[
            { "id": 1, "name": "Nowhere", "category": "clinic", "lat": 95.0, "lng": 0.0 }
        ]"#;
        assert!(matches!(
            facilities_from_json(json),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            " clinic ".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::category("clinic")
        );
    }

    #[test]
    fn test_filter_matching() {
        let facility = Facility::new(1, "A", "clinic", LatLng::new(37.0, 127.0));
        assert!(CategoryFilter::All.matches(&facility));
        assert!(CategoryFilter::category("clinic").matches(&facility));
        assert!(!CategoryFilter::category("general").matches(&facility));
    }

    #[test]
    fn test_departments_summary() {
        let facility = Facility::new(1, "A", "clinic", LatLng::default())
            .with_departments(["Emergency", "Surgery", "Pediatrics", "Radiology"]);
        assert_eq!(
            facility.departments_summary(3),
            "Emergency, Surgery, Pediatrics +1 more"
        );
        assert_eq!(
            facility.departments_summary(4),
            "Emergency, Surgery, Pediatrics, Radiology"
        );
    }
}
