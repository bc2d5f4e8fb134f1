//! JSON data loading into a single render context.
use serde_json::{Map, Value};
use std::path::Path;

use crate::logging::Log;

/// Read `<data_dir>/<name>.json` for each name into one mapping keyed by name.
///
/// Never fails: a missing, unreadable or malformed file contributes an empty
/// mapping under its key and logs a warning.
pub fn load_context(data_dir: &Path, names: &[String], log: &dyn Log) -> Value {
    let mut context = Map::new();
    for name in names {
        let path = data_dir.join(format!("{name}.json"));
        let value = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => {
                    log.debug(&format!("loaded data: {}", path.display()));
                    value
                }
                Err(e) => {
                    log.warn(&format!("malformed JSON in {}: {e}", path.display()));
                    Value::Object(Map::new())
                }
            },
            Err(e) => {
                log.warn(&format!("cannot read data file {}: {e}", path.display()));
                Value::Object(Map::new())
            }
        };
        context.insert(name.clone(), value);
    }
    Value::Object(context)
}
