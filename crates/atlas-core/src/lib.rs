//! Atlas Core - Reference tables, query pipeline, and configuration
//!
//! This crate joins the département zone table against the altitude rule
//! table and derives everything a choropleth renderer needs: one labelled row
//! per département, a legend ordering, a colour per label and coverage
//! statistics.

pub mod config;
pub mod details;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod tables;
pub mod validation;

pub use error::{AtlasError, Result};
pub use pipeline::{AtlasPipeline, QueryResult};
