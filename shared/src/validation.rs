//! Validation helpers for Kitchen Ledger records

use rust_decimal::Decimal;

/// A single ingredient line as submitted with a recipe
#[derive(Debug, Clone)]
pub struct RecipeLineCheck<'a> {
    pub ingredient_name: Option<&'a str>,
    pub has_ingredient_id: bool,
    pub quantity: Decimal,
}

/// Validate the core recipe invariants: non-empty name, positive yield,
/// at least one ingredient line.
pub fn validate_recipe(
    name: &str,
    yield_units: Decimal,
    lines: &[RecipeLineCheck<'_>],
) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Recipe name is required");
    }
    if yield_units <= Decimal::ZERO {
        return Err("Recipe yield must be positive");
    }
    if lines.is_empty() {
        return Err("Recipe must have at least one ingredient");
    }
    for line in lines {
        if !line.has_ingredient_id
            && line.ingredient_name.map_or(true, |n| n.trim().is_empty())
        {
            return Err("Each ingredient line needs an id or a name");
        }
        if line.quantity <= Decimal::ZERO {
            return Err("Ingredient quantities must be positive");
        }
    }
    Ok(())
}

/// Validate an ingredient record: non-empty name and positive package quantity.
pub fn validate_ingredient(name: &str, package_qty: Decimal) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Ingredient name is required");
    }
    if package_qty <= Decimal::ZERO {
        return Err("Package quantity must be positive");
    }
    Ok(())
}

/// Validate a cashflow amount: must be positive regardless of direction.
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

/// Validate a settings key: non-empty, lowercase alphanumeric with
/// underscores and dashes.
pub fn validate_setting_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Setting key is required");
    }
    if key.len() > 64 {
        return Err("Setting key must be at most 64 characters");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err("Setting key must be lowercase alphanumeric, '_' or '-'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(qty: &str) -> RecipeLineCheck<'static> {
        RecipeLineCheck {
            ingredient_name: Some("Flour"),
            has_ingredient_id: false,
            quantity: dec(qty),
        }
    }

    #[test]
    fn test_valid_recipe() {
        assert!(validate_recipe("Sourdough", dec("12"), &[line("0.5")]).is_ok());
    }

    #[test]
    fn test_recipe_empty_name() {
        assert!(validate_recipe("", dec("12"), &[line("0.5")]).is_err());
        assert!(validate_recipe("   ", dec("12"), &[line("0.5")]).is_err());
    }

    #[test]
    fn test_recipe_nonpositive_yield() {
        assert!(validate_recipe("Sourdough", Decimal::ZERO, &[line("0.5")]).is_err());
        assert!(validate_recipe("Sourdough", dec("-3"), &[line("0.5")]).is_err());
    }

    #[test]
    fn test_recipe_empty_lines() {
        assert!(validate_recipe("Sourdough", dec("12"), &[]).is_err());
    }

    #[test]
    fn test_recipe_line_without_reference() {
        let bad = RecipeLineCheck {
            ingredient_name: None,
            has_ingredient_id: false,
            quantity: dec("1"),
        };
        assert!(validate_recipe("Sourdough", dec("12"), &[bad]).is_err());
    }

    #[test]
    fn test_ingredient_validation() {
        assert!(validate_ingredient("Flour", dec("25")).is_ok());
        assert!(validate_ingredient("", dec("25")).is_err());
        assert!(validate_ingredient("Flour", Decimal::ZERO).is_err());
    }

    #[test]
    fn test_setting_key() {
        assert!(validate_setting_key("currency").is_ok());
        assert!(validate_setting_key("dashboard-toggles_v2").is_ok());
        assert!(validate_setting_key("").is_err());
        assert!(validate_setting_key("Currency").is_err());
        assert!(validate_setting_key(&"k".repeat(65)).is_err());
    }
}
