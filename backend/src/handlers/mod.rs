//! HTTP handlers for Kitchen Ledger

pub mod budgets;
pub mod cashflow;
pub mod fixed_costs;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod reports;
pub mod settings;

pub use budgets::*;
pub use cashflow::*;
pub use fixed_costs::*;
pub use health::*;
pub use ingredients::*;
pub use recipes::*;
pub use reports::*;
pub use settings::*;
