use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a relation reference that may be a bare id, a numeric string, or a
/// populated entity (`{"id": 7, ...}`). Anything else, including `0`, is `None`.
pub fn deserialize_relation_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(relation_id(&value))
}

pub fn relation_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("id").and_then(relation_id),
        _ => None,
    };
    id.filter(|id| *id > 0)
}
