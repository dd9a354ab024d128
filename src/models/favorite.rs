use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::EntityRecord;
use crate::models::{Product, User};

/// A product a user marked as favorite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl EntityRecord for Favorite {
    const NAME: &'static str = "favorite";
    const RESOURCE: &'static str = "favorites";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
