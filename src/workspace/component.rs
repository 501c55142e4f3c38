use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-process counter appended to generated instance ids.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier of one placement on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub String);

impl InstanceId {
    /// Mint a fresh id for a placement of `catalog_id`.
    ///
    /// The counter makes ids unique within the process; the timestamp keeps them
    /// apart from ids persisted by earlier sessions.
    pub fn generate(catalog_id: &str) -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        let sequence = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}-{:x}", catalog_id, nanos, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Electrical attributes attached to a catalog item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpecs {
    #[serde(default)]
    pub power: Vec<String>,
    #[serde(default)]
    pub resistance: Vec<String>,
    #[serde(default)]
    pub tolerance: Vec<String>,
}

/// Library definition a placement is instantiated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Kept as raw JSON; the budget projection coerces it to a number.
    #[serde(default)]
    pub price: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<ComponentSpecs>,
    /// Any other fields the catalog carries (category, datasheet url, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            specs: None,
            extra: Map::new(),
        }
    }

    /// Instantiate this item at a position under the given instance id
    pub fn place(&self, instance_id: InstanceId, x: f64, y: f64) -> PlacedComponent {
        PlacedComponent {
            catalog_id: self.id.clone(),
            instance_id,
            x,
            y,
            name: self.name.clone(),
            price: self.price.clone(),
            specs: self.specs.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// A placed instance of a catalog item.
///
/// Everything except `instance_id`, `x` and `y` is copied from the catalog item
/// and carried untouched through every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedComponent {
    pub catalog_id: String,
    pub instance_id: InstanceId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<ComponentSpecs>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<InstanceId> = (0..1000).map(|_| InstanceId::generate("R1")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_has_catalog_prefix() {
        let id = InstanceId::generate("LED-5mm");
        assert!(id.as_str().starts_with("LED-5mm-"));
    }

    #[test]
    fn test_place_copies_catalog_fields() {
        let mut item = CatalogItem::new("R1", "Resistor 10k", 0.25);
        item.specs = Some(ComponentSpecs {
            power: vec!["0.25W".to_string()],
            resistance: vec!["10k".to_string()],
            tolerance: vec!["1%".to_string()],
        });
        item.extra
            .insert("package".to_string(), Value::String("0805".to_string()));

        let placed = item.place(InstanceId::from("r1-a"), 12.0, -4.5);

        assert_eq!(placed.catalog_id, "R1");
        assert_eq!(placed.instance_id, InstanceId::from("r1-a"));
        assert_eq!(placed.x, 12.0);
        assert_eq!(placed.y, -4.5);
        assert_eq!(placed.name, "Resistor 10k");
        assert_eq!(placed.price, serde_json::json!(0.25));
        assert_eq!(placed.specs, item.specs);
        assert_eq!(placed.extra.get("package"), Some(&serde_json::json!("0805")));
    }

    #[test]
    fn test_placed_component_uses_camel_case_keys() {
        let item = CatalogItem::new("C1", "Capacitor", 2);
        let placed = item.place(InstanceId::from("c1-a"), 1.0, 2.0);
        let json = serde_json::to_value(&placed).unwrap();

        assert_eq!(json["catalogId"], "C1");
        assert_eq!(json["instanceId"], "c1-a");
        assert!(json.get("specs").is_none());
    }

    #[test]
    fn test_placed_component_keeps_unknown_fields() {
        let json = r#"{
            "catalogId": "U1",
            "instanceId": "u1-a",
            "x": 5.0,
            "y": 6.0,
            "name": "ATmega328P",
            "price": "3.10",
            "footprint": "DIP-28",
            "specs": { "power": ["5V"] }
        }"#;

        let placed: PlacedComponent = serde_json::from_str(json).unwrap();
        assert_eq!(placed.extra.get("footprint"), Some(&serde_json::json!("DIP-28")));
        assert_eq!(placed.price, serde_json::json!("3.10"));

        let specs = placed.specs.unwrap();
        assert_eq!(specs.power, vec!["5V".to_string()]);
        assert!(specs.resistance.is_empty());
    }
}
