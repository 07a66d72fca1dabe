//! Region model and ordered catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider-specific coordinates. Opaque to the recommendation engine; each
/// forecast provider requires the addressing scheme it understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coords {
    /// Numeric forecast-grid cell (village forecast)
    Grid { x: i32, y: i32 },
    /// Geographic coordinates (air-quality forecast)
    LatLon { lat: f64, lon: f64 },
}

/// One entry in a region catalog. Immutable once loaded.
///
/// Regions from the remote tree carry no coordinates; they are addressed by
/// name by the providers that accept names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub coords: Option<Coords>,
}

impl Region {
    pub fn grid(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            coords: Some(Coords::Grid { x, y }),
        }
    }

    pub fn lat_lon(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            coords: Some(Coords::LatLon { lat, lon }),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coords: None,
        }
    }
}

/// Catalog lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown region: \"{0}\"")]
    NotFound(String),

    #[error("Region list could not be loaded: {0}")]
    Load(String),
}

/// An insertion-ordered, read-only collection of regions.
///
/// The order regions were added is load-bearing: rankings break score ties by
/// this order, so it must be stable across the life of the process.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All region names, in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }

    /// Exact-name lookup, used with the small built-in catalogs.
    pub fn find_exact(&self, name: &str) -> Result<&Region, CatalogError> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// First region whose name contains `text`, in catalog order. Used with
    /// the large remotely loaded catalog where users type partial names.
    pub fn find_substring(&self, text: &str) -> Result<&Region, CatalogError> {
        if text.is_empty() {
            return Err(CatalogError::NotFound(text.to_string()));
        }
        self.regions
            .iter()
            .find(|r| r.name.contains(text))
            .ok_or_else(|| CatalogError::NotFound(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RegionCatalog {
        RegionCatalog::new(vec![
            Region::grid("Seoul", 60, 127),
            Region::grid("Busan", 97, 74),
            Region::named("Busanjin-gu"),
        ])
    }

    #[test]
    fn test_find_exact_hits() {
        let catalog = catalog();
        let region = catalog.find_exact("Busan").unwrap();
        assert_eq!(region.coords, Some(Coords::Grid { x: 97, y: 74 }));
    }

    #[test]
    fn test_find_exact_misses_substring() {
        let catalog = catalog();
        assert!(matches!(
            catalog.find_exact("Busa"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_substring_returns_first_in_catalog_order() {
        let catalog = catalog();
        // Both "Busan" and "Busanjin-gu" match; the earlier entry wins.
        let region = catalog.find_substring("Busan").unwrap();
        assert_eq!(region.name, "Busan");
    }

    #[test]
    fn test_find_substring_rejects_empty_query() {
        let catalog = catalog();
        assert!(catalog.find_substring("").is_err());
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let names = catalog().names().join(",");
        assert_eq!(names, "Seoul,Busan,Busanjin-gu");
    }
}
