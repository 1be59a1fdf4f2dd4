//! Core services for yfin-mcp.
//!
//! This crate owns the market-data provider contract and its Yahoo Finance
//! implementation, the normalizers that turn provider payloads into stable
//! text and JSON, and the control plane that backs every tool.

pub mod calc;
pub mod control;
pub mod normalize;
pub mod provider;
