use serde_json::Value;

/// One field mutation applied by [`DocumentStore::update`](crate::DocumentStore::update).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
	/// Sets a top-level field to a value.
	Set { field: String, value: Value },
	/// Removes a top-level field. Removing an absent field is a no-op.
	Delete { field: String },
	/// Sets a top-level field to the backend's current time.
	ServerTimestamp { field: String },
}

impl FieldUpdate {
	pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Set {
			field: field.into(),
			value: value.into(),
		}
	}

	pub fn delete(field: impl Into<String>) -> Self {
		Self::Delete { field: field.into() }
	}

	pub fn server_timestamp(field: impl Into<String>) -> Self {
		Self::ServerTimestamp { field: field.into() }
	}

	/// Name of the field this update touches.
	pub fn field(&self) -> &str {
		match self {
			Self::Set { field, .. } | Self::Delete { field } | Self::ServerTimestamp { field } => field,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_variant_names_its_field() {
		assert_eq!(FieldUpdate::set("processed", true).field(), "processed");
		assert_eq!(FieldUpdate::delete("fcmToken").field(), "fcmToken");
		assert_eq!(FieldUpdate::server_timestamp("processedAt").field(), "processedAt");
	}
}
