//! Dropdown option entries and the remote list shape they are mapped from.

// self
use crate::_prelude::*;

/// A `(label, value)` pair used to populate a select.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionEntry {
	/// Display label.
	pub name: String,
	/// Identifier stored when the option is picked.
	pub value: i64,
}
impl OptionEntry {
	/// Creates a new option.
	pub fn new(name: impl Into<String>, value: i64) -> Self {
		Self { name: name.into(), value }
	}
}

/// Team or workspace record as returned by the CF2 API.
///
/// Unknown fields are ignored. Missing or mistyped `id`/`name` fields are decode errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
	/// Remote identifier.
	pub id: i64,
	/// Human-readable name.
	pub name: String,
}
impl From<RemoteRecord> for OptionEntry {
	fn from(record: RemoteRecord) -> Self {
		Self { name: record.name, value: record.id }
	}
}

/// Maps remote records into options, preserving response order.
pub fn into_options(records: Vec<RemoteRecord>) -> Vec<OptionEntry> {
	records.into_iter().map(OptionEntry::from).collect()
}

/// Decodes a `[{id, name}, ...]` body and maps it into options.
pub fn decode_options(body: &[u8]) -> Result<Vec<OptionEntry>> {
	let mut de = serde_json::Deserializer::from_slice(body);
	let records: Vec<RemoteRecord> =
		serde_path_to_error::deserialize(&mut de).map_err(|source| Error::Decode { source })?;

	Ok(into_options(records))
}
