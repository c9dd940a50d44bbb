//! Service fee listings and the provider abstraction that fetches them.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_SERVICE: &str = "Unknown Service";
pub const UNKNOWN_FEE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFeeEntry {
    pub category: String,
    pub service: String,
    pub fee: String,
    pub description: String,
}

impl ServiceFeeEntry {
    pub fn new(category: &str, service: &str, fee: &str, description: &str) -> Self {
        Self {
            category: category.to_string(),
            service: service.to_string(),
            fee: fee.to_string(),
            description: description.to_string(),
        }
    }
}

/// A remote fee listing flattened per audience.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeListing {
    pub customer: Vec<ServiceFeeEntry>,
    pub business: Vec<ServiceFeeEntry>,
}

impl FeeListing {
    /// Flattens `{Customer?: {category: [item]}, Business?: {...}}`.
    ///
    /// Categories keep their document order, items keep their order within a
    /// category. Any other shape yields no entries for that audience.
    pub fn from_json(value: &Value) -> Self {
        Self {
            customer: flatten_audience(value.get("Customer")),
            business: flatten_audience(value.get("Business")),
        }
    }
}

fn flatten_audience(audience: Option<&Value>) -> Vec<ServiceFeeEntry> {
    let Some(categories) = audience.and_then(Value::as_object) else {
        return Vec::new();
    };

    categories
        .iter()
        .filter_map(|(category, items)| items.as_array().map(|items| (category, items)))
        .flat_map(|(category, items)| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(move |item| ServiceFeeEntry {
                    category: category.clone(),
                    service: text_field(item.get("Service"))
                        .unwrap_or_else(|| UNKNOWN_SERVICE.to_string()),
                    fee: text_field(item.get("Fee")).unwrap_or_else(|| UNKNOWN_FEE.to_string()),
                    description: text_field(item.get("Description")).unwrap_or_default(),
                })
        })
        .collect()
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[async_trait]
pub trait FeeListingProvider: Send + Sync {
    async fn fetch_listing(&self) -> Result<FeeListing>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_preserves_category_then_item_order() {
        let value = json!({
            "Customer": {
                "Transfers": [
                    {"Service": "Local", "Fee": "FREE", "Description": "Same bank"},
                    {"Service": "Wire", "Fee": "1%", "Description": "SWIFT"}
                ],
                "Cards": [
                    {"Service": "Virtual Card", "Fee": "$2", "Description": "Issuance"}
                ]
            }
        });

        let listing = FeeListing::from_json(&value);
        let services: Vec<_> = listing
            .customer
            .iter()
            .map(|e| e.service.as_str())
            .collect();
        assert_eq!(services, vec!["Local", "Wire", "Virtual Card"]);
        assert_eq!(listing.customer[2].category, "Cards");
        assert!(listing.business.is_empty());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let value = json!({
            "Business": {"Payouts": [{}, {"Fee": 2.5}, "not an object"]}
        });

        let listing = FeeListing::from_json(&value);
        assert_eq!(listing.business.len(), 2);
        assert_eq!(
            listing.business[0],
            ServiceFeeEntry::new("Payouts", UNKNOWN_SERVICE, UNKNOWN_FEE, "")
        );
        assert_eq!(listing.business[1].fee, "2.5");
    }

    #[test]
    fn test_unexpected_shapes_yield_no_entries() {
        for value in [
            json!({}),
            json!([]),
            json!({"Customer": []}),
            json!({"Customer": {"Transfers": "none"}}),
        ] {
            let listing = FeeListing::from_json(&value);
            assert!(listing.customer.is_empty(), "unexpected entries for {value}");
            assert!(listing.business.is_empty());
        }
    }
}
