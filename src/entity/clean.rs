//! Preparation of record bodies for mutation requests

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// Serialize a record and drop the fields the server should not see.
///
/// Null fields are removed, and so are nested relationship objects whose `id`
/// is missing, null, `""` or `-1`. Arrays are sent as given, an empty array
/// clears a many-to-many relation.
pub fn clean_entity<T: Serialize>(record: &T) -> Result<Value, Error> {
    let value = serde_json::to_value(record)?;
    match value {
        Value::Object(fields) => Ok(Value::Object(clean_fields(fields))),
        other => Err(Error::invalid_parameters(format!(
            "record must serialize to a JSON object, got {}",
            other
        ))),
    }
}

fn clean_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, value)| match value {
            Value::Null => false,
            Value::Object(nested) => has_reference_id(nested),
            _ => true,
        })
        .collect()
}

fn has_reference_id(nested: &Map<String, Value>) -> bool {
    match nested.get("id") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_i64() != Some(-1),
        Some(_) => true,
    }
}
