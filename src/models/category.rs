use serde::{Deserialize, Serialize};

use crate::entity::EntityRecord;

/// A product category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityRecord for Category {
    const NAME: &'static str = "category";
    const RESOURCE: &'static str = "categories";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
