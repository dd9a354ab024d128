use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::EntityRecord;
use crate::models::Product;

/// A bill over one or more products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

impl EntityRecord for Bill {
    const NAME: &'static str = "bill";
    const RESOURCE: &'static str = "bills";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
