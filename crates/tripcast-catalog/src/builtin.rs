//! Built-in static catalogs.
//!
//! Loaded at process start and never mutated. The entry order here is the
//! tie-break order rankings use, so keep it stable.

use crate::region::{Region, RegionCatalog};

/// Grid-addressed catalog for the village forecast provider.
pub fn grid_catalog() -> RegionCatalog {
    RegionCatalog::new(vec![
        Region::grid("Seoul", 60, 127),
        Region::grid("Incheon", 55, 124),
        Region::grid("Chuncheon", 67, 115),
        Region::grid("Gangneung", 92, 132),
        Region::grid("Cheongju", 69, 107),
        Region::grid("Daejeon", 67, 100),
        Region::grid("Jeonju", 63, 89),
        Region::grid("Gwangju", 58, 74),
        Region::grid("Daegu", 89, 90),
        Region::grid("Busan", 97, 74),
        Region::grid("Ulsan", 102, 84),
        Region::grid("Jeju", 52, 38),
    ])
}

/// Geographic catalog for the air-quality provider.
pub fn latlon_catalog() -> RegionCatalog {
    RegionCatalog::new(vec![
        Region::lat_lon("Seoul", 37.5665, 126.9780),
        Region::lat_lon("Busan", 35.1796, 129.0756),
        Region::lat_lon("Incheon", 37.4563, 126.7052),
        Region::lat_lon("Daegu", 35.8714, 128.6014),
        Region::lat_lon("Gwangju", 35.1595, 126.8526),
        Region::lat_lon("Ulsan", 35.5384, 129.3114),
        Region::lat_lon("Jeju", 33.4996, 126.5312),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_catalog_is_grid_addressed() {
        let catalog = grid_catalog();
        assert!(!catalog.is_empty());
        for region in catalog.iter() {
            assert!(matches!(
                region.coords,
                Some(crate::region::Coords::Grid { .. })
            ));
        }
    }

    #[test]
    fn test_latlon_catalog_is_geo_addressed() {
        let catalog = latlon_catalog();
        assert!(!catalog.is_empty());
        for region in catalog.iter() {
            assert!(matches!(
                region.coords,
                Some(crate::region::Coords::LatLon { .. })
            ));
        }
    }

    #[test]
    fn test_catalogs_start_with_seoul() {
        assert_eq!(grid_catalog().names()[0], "Seoul");
        assert_eq!(latlon_catalog().names()[0], "Seoul");
    }
}
