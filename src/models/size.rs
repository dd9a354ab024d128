use serde::{Deserialize, Serialize};

use crate::entity::EntityRecord;

/// A shoe size, e.g. `EU 42`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Size {
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
        }
    }
}

impl EntityRecord for Size {
    const NAME: &'static str = "size";
    const RESOURCE: &'static str = "sizes";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
