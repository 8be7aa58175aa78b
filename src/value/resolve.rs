use crate::value::value_model::Value;

/// Reads `key` off a source object.
///
/// Maps are looked up by key, objects are asked through [`Model::read`].
/// `None` means the source does not expose `key` at all, which is distinct
/// from exposing it with a null value.
///
/// [`Model::read`]: crate::model::model::Model::read
pub fn resolve(source: Option<&Value>, key: &str) -> Option<Value> {
    match source? {
        Value::Map(map) => map.get(key).cloned(),
        Value::Object(model) => model.read(key),
        _ => None,
    }
}

/// Like [`resolve`] but collapses "not exposed" into `Value::Null`.
pub fn resolve_or_null(source: Option<&Value>, key: &str) -> Value {
    resolve(source, key).unwrap_or_default()
}
