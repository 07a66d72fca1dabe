//! Region catalogs for Tripcast.
//!
//! A catalog is loaded once at startup and read-only afterwards; its
//! insertion order is the deterministic tie-break order for rankings.

pub mod builtin;
pub mod region;
pub mod remote;

pub use builtin::{grid_catalog, latlon_catalog};
pub use region::{CatalogError, Coords, Region, RegionCatalog};
pub use remote::RegionTreeLoader;
