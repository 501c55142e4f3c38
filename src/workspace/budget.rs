use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::component::PlacedComponent;

/// One row of the bill of materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub catalog_id: String,
    pub name: String,
    pub quantity: usize,
    pub price: f64,
}

/// Derived cost summary handed to the persistence gateway on save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total: f64,
    pub items: Vec<BudgetLine>,
}

/// Coerce a raw price to a number. Numeric strings are parsed; anything else is 0.
pub fn coerce_price(price: &Value) -> f64 {
    let value = match price {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_finite() { value } else { 0.0 }
}

/// Aggregate placements into a total and one line per catalog item.
///
/// Lines keep first-seen order and take name and price from the first placement
/// of their catalog item.
pub fn project_budget(components: &[PlacedComponent]) -> BudgetSummary {
    let mut items: Vec<BudgetLine> = Vec::new();
    let mut rows: HashMap<&str, usize> = HashMap::new();
    let mut total = 0.0;

    for component in components {
        let price = coerce_price(&component.price);
        total += price;

        match rows.get(component.catalog_id.as_str()) {
            Some(&row) => items[row].quantity += 1,
            None => {
                rows.insert(component.catalog_id.as_str(), items.len());
                items.push(BudgetLine {
                    catalog_id: component.catalog_id.clone(),
                    name: component.name.clone(),
                    quantity: 1,
                    price,
                });
            }
        }
    }

    BudgetSummary { total, items }
}
