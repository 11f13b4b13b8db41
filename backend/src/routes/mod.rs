//! Route definitions for Kitchen Ledger

use axum::{
    routing::{get, patch},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ingredients", ingredient_routes())
        .nest("/recipes", recipe_routes())
        .nest("/fixed-costs", fixed_cost_routes())
        .nest("/budgets", budget_routes())
        .nest("/cashflow", cashflow_routes())
        .nest("/settings", settings_routes())
        .nest("/reports", report_routes())
}

/// Ingredient routes
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:ingredient_id",
            get(handlers::get_ingredient)
                .put(handlers::update_ingredient)
                .delete(handlers::delete_ingredient),
        )
}

/// Recipe routes
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/:recipe_id",
            get(handlers::get_recipe)
                .put(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route(
            "/:recipe_id/budget-inclusion",
            patch(handlers::set_budget_inclusion),
        )
}

/// Fixed cost routes
fn fixed_cost_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_fixed_costs).post(handlers::create_fixed_cost),
        )
        .route(
            "/:cost_id",
            get(handlers::get_fixed_cost)
                .put(handlers::update_fixed_cost)
                .delete(handlers::delete_fixed_cost),
        )
}

/// Budget routes
fn budget_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route(
            "/:budget_id",
            get(handlers::get_budget)
                .put(handlers::update_budget)
                .delete(handlers::delete_budget),
        )
}

/// Cashflow routes
fn cashflow_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_cashflow).post(handlers::create_cashflow_entry),
        )
        .route("/export", get(handlers::export_cashflow))
        .route(
            "/:entry_id",
            get(handlers::get_cashflow_entry)
                .put(handlers::update_cashflow_entry)
                .delete(handlers::delete_cashflow_entry),
        )
}

/// Settings routes
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_settings))
        .route(
            "/:key",
            get(handlers::get_setting)
                .put(handlers::put_setting)
                .delete(handlers::delete_setting),
        )
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route(
            "/recipes/:recipe_id/profitability",
            get(handlers::get_recipe_profitability),
        )
}
