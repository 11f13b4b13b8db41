//! Business logic services for Kitchen Ledger

pub mod budget;
pub mod cashflow;
pub mod fixed_cost;
pub mod ingredient;
pub mod recipe;
pub mod reporting;
pub mod settings;

pub use budget::BudgetService;
pub use cashflow::CashflowService;
pub use fixed_cost::FixedCostService;
pub use ingredient::IngredientService;
pub use recipe::RecipeService;
pub use reporting::ReportingService;
pub use settings::SettingsService;
