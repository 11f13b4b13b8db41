//! Shared types and calculations for Kitchen Ledger
//!
//! This crate contains the domain types and pure costing functions shared
//! between the backend and the browser (via WASM).

pub mod costing;
pub mod types;
pub mod validation;

pub use costing::*;
pub use types::*;
pub use validation::*;
