//! Parameter types, sector tables, and data models for yfin-mcp.
//!
//! This crate defines the closed parameter sets accepted by the tools, the
//! static sector to industry table, and the records shared by the provider
//! adapter and the control plane.

pub mod models;
pub mod params;
pub mod sectors;

pub use models::*;
pub use params::*;
