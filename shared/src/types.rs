//! Common domain types used across the platform

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a fixed cost is spread across production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    Monthly,
    PerHour,
    PerBatch,
    PerUnit,
    OneTime,
}

impl AllocationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationMethod::Monthly => "monthly",
            AllocationMethod::PerHour => "per_hour",
            AllocationMethod::PerBatch => "per_batch",
            AllocationMethod::PerUnit => "per_unit",
            AllocationMethod::OneTime => "one_time",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(AllocationMethod::Monthly),
            "per_hour" => Some(AllocationMethod::PerHour),
            "per_batch" => Some(AllocationMethod::PerBatch),
            "per_unit" => Some(AllocationMethod::PerUnit),
            "one_time" => Some(AllocationMethod::OneTime),
            _ => None,
        }
    }
}

/// Fixed cost classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostType {
    Fixed,
    Indirect,
}

impl CostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::Fixed => "fixed",
            CostType::Indirect => "indirect",
        }
    }
}

/// Direction of a cashflow entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Inflow,
    Outflow,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Inflow => "inflow",
            EntryType::Outflow => "outflow",
        }
    }
}

/// Outcome of resolving a recipe line to an ingredient record
///
/// Distinguishes an existing ingredient from one created as a side effect
/// of saving a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "resolution", content = "id")]
pub enum IngredientResolution {
    Found(Uuid),
    Created(Uuid),
}

impl IngredientResolution {
    pub fn id(&self) -> Uuid {
        match self {
            IngredientResolution::Found(id) | IngredientResolution::Created(id) => *id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, IngredientResolution::Created(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_method_round_trip() {
        for method in [
            AllocationMethod::Monthly,
            AllocationMethod::PerHour,
            AllocationMethod::PerBatch,
            AllocationMethod::PerUnit,
            AllocationMethod::OneTime,
        ] {
            assert_eq!(AllocationMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(AllocationMethod::parse("weekly"), None);
    }

    #[test]
    fn test_resolution_id() {
        let id = Uuid::new_v4();
        assert_eq!(IngredientResolution::Found(id).id(), id);
        assert!(IngredientResolution::Created(id).was_created());
        assert!(!IngredientResolution::Found(id).was_created());
    }
}
