//! Record to transport conversion

use serde_json::{Map, Value};

use crate::models::UnitMeasure;

/// Convert a record into a `{id, name}` object
pub fn serialize(record: &UnitMeasure) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::from(record.id));
    map.insert("name".to_string(), Value::from(record.name.clone()));
    Value::Object(map)
}

/// Convert records into a JSON array, preserving order
pub fn serialize_many(records: &[UnitMeasure]) -> Value {
    Value::Array(records.iter().map(serialize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_has_exactly_id_and_name() {
        let value = serialize(&UnitMeasure {
            id: 1,
            name: "kg".to_string(),
        });
        assert_eq!(value, json!({"id": 1, "name": "kg"}));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "name"]);
    }

    #[test]
    fn test_serialize_many_keeps_order() {
        let records = vec![
            UnitMeasure {
                id: 2,
                name: "g".to_string(),
            },
            UnitMeasure {
                id: 5,
                name: "mg".to_string(),
            },
        ];
        assert_eq!(
            serialize_many(&records),
            json!([{"id": 2, "name": "g"}, {"id": 5, "name": "mg"}])
        );
        assert_eq!(serialize_many(&[]), json!([]));
    }
}
