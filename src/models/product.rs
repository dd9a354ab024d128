use serde::{Deserialize, Serialize};

use crate::entity::EntityRecord;
use crate::models::{Category, Size};

/// A product in the catalogue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Image location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Units in stock, never negative on the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<Size>>,
}

impl EntityRecord for Product {
    const NAME: &'static str = "product";
    const RESOURCE: &'static str = "products";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_nested_relationships() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Runner",
            "price": 89.9,
            "image": "runner.png",
            "productSize": 42,
            "quantity": null,
            "category": { "id": 1, "name": "Sneakers" },
            "sizes": [{ "id": 7, "name": "EU 42" }]
        }))
        .unwrap();

        assert_eq!(product.product_size, Some(42));
        assert_eq!(product.quantity, None);
        assert_eq!(
            product.category.and_then(|c| c.name).as_deref(),
            Some("Sneakers")
        );
        assert_eq!(product.sizes.map(|s| s.len()), Some(1));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let product = Product {
            id: Some(3),
            price: Some(10.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({ "id": 3, "price": 10.0 })
        );
    }
}
