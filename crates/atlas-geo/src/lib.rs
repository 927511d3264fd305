//! Atlas Geo - Département boundaries, representative points and choropleth output
//!
//! This crate reads the département boundary GeoJSON, locates a point inside
//! each département for labelling, and decorates boundaries with the result
//! of a pipeline query.

pub mod boundaries;
pub mod centroids;
pub mod choropleth;
#[cfg(feature = "geometry")]
pub mod geometry;

pub use boundaries::{dept_code, load_boundaries, parse_boundaries, BoundaryReport};
pub use centroids::{compute_centroids, DeptCentroid};
pub use choropleth::decorate_boundaries;
