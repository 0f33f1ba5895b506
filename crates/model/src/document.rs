//! Raw document representation.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ModelError, Result};

/// A document body: an insertion-ordered JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Decodes a typed view out of a raw document.
pub fn decode<T: DeserializeOwned>(kind: &'static str, doc: &Document) -> Result<T> {
	serde_json::from_value(Value::Object(doc.clone())).map_err(|source| ModelError::Decode { kind, source })
}

/// Renders a field value as plain text.
///
/// Strings are returned verbatim, `null` yields `None`, and every other value
/// is rendered as its JSON text.
pub fn value_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}
