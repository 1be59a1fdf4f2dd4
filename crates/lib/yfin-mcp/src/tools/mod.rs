//! MCP tool modules.
//!
//! Tools are grouped by domain: single-ticker lookups, market-wide search and
//! rankings, and price history.

pub mod history;
pub mod market;
pub mod ticker;
