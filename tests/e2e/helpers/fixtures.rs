use serde_json::{json, Value};

/// Station entities named "Station 1".."Station n"
pub fn stations(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| json!({ "id": i, "text": format!("Station {}", i) }))
        .collect()
}

#[allow(dead_code)]
pub fn station(id: i64, text: &str) -> Value {
    json!({ "id": id, "text": text })
}

pub fn station_run(entities: Vec<Value>) -> Value {
    json!({ "kind": "station", "entities": entities })
}
