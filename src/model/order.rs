use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Storage temperature of an order.
///
/// Every order declares one of three temperatures, and each temperature has a
/// dedicated shelf in the pick-up area (plus a shared overflow shelf that
/// accepts any temperature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Hot => write!(f, "hot"),
            Temperature::Cold => write!(f, "cold"),
            Temperature::Frozen => write!(f, "frozen"),
        }
    }
}

/// A customer order flowing through the pipeline.
///
/// Orders are created by an order source, cooked and routed by the kitchen,
/// and finally either delivered or discarded. The two flags are derived state
/// set only by the kitchen:
///
/// - `cooked` is attached when the kitchen accepts the order.
/// - `pickup_successful` is attached when a courier's pickup finds the order
///   still on a shelf.
///
/// Any attributes beyond `id` and `temp` (the sample order records carry
/// `name`, `shelfLife`, and `decayRate`) are preserved opaquely in
/// `attributes` and travel with the order end-to-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub temp: Temperature,

    #[serde(default)]
    pub cooked: bool,

    #[serde(default)]
    pub pickup_successful: bool,

    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Order {
    /// Creates a bare order with no extra attributes.
    pub fn new(id: impl Into<String>, temp: Temperature) -> Self {
        Self {
            id: id.into(),
            temp,
            cooked: false,
            pickup_successful: false,
            attributes: serde_json::Map::new(),
        }
    }

    /// Marks the order as cooked. Cooking is a pure label: no time passes.
    pub fn cook(mut self) -> Self {
        self.cooked = true;
        self
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_record_with_opaque_attributes() {
        let record = json!({
            "id": "a8cfcb76-7f24-4420-a5ba-d46dd77bdffd",
            "name": "Banana Split",
            "temp": "frozen",
            "shelfLife": 20,
            "decayRate": 0.63
        });

        let order: Order = serde_json::from_value(record).unwrap();
        assert_eq!(order.id, "a8cfcb76-7f24-4420-a5ba-d46dd77bdffd");
        assert_eq!(order.temp, Temperature::Frozen);
        assert!(!order.cooked);
        assert!(!order.pickup_successful);
        assert_eq!(order.attributes["name"], json!("Banana Split"));
        assert_eq!(order.attributes["shelfLife"], json!(20));
    }

    #[test]
    fn attributes_survive_a_round_trip() {
        let record = json!({"id": "x", "temp": "hot", "name": "Ramen"});
        let order: Order = serde_json::from_value(record).unwrap();
        let emitted = serde_json::to_value(order.clone().cook()).unwrap();
        assert_eq!(emitted["name"], json!("Ramen"));
        assert_eq!(emitted["cooked"], json!(true));
    }

    #[test]
    fn rejects_unknown_temperature() {
        let record = json!({"id": "x", "temp": "lukewarm"});
        assert!(serde_json::from_value::<Order>(record).is_err());
    }

    #[test]
    fn rejects_record_without_id() {
        let record = json!({"temp": "hot"});
        assert!(serde_json::from_value::<Order>(record).is_err());
    }

    #[test]
    fn cook_sets_the_flag_only() {
        let order = Order::new("a", Temperature::Hot).cook();
        assert!(order.cooked);
        assert!(!order.pickup_successful);
    }
}
