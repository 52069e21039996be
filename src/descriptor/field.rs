// self
use crate::{_prelude::*, resolver::LoadOptionsMethod};

/// Field names used by the CF2 credential form.
pub mod field_names {
	/// Workspace subdomain (free text).
	pub const WORKSPACE: &str = "workspace";
	/// API key (masked).
	pub const API_KEY: &str = "apiKey";
	/// Team select, populated by `getTeams`.
	pub const TEAM_ID: &str = "teamId";
	/// Workspace select, populated by `getWorkspaces` once a team is chosen.
	pub const WORKSPACE_ID: &str = "workspaceId";
}

/// Input widget declared for a credential field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
	/// Free text.
	String,
	/// Masked secret text.
	Password,
	/// Single-select whose options are fetched from the remote API.
	Options {
		/// Resolver the host calls to populate the select.
		#[serde(rename = "loadOptionsMethod")]
		load_options: LoadOptionsMethod,
		/// Fields whose changes must trigger a reload of this select.
		#[serde(rename = "loadOptionsDependsOn", default, skip_serializing_if = "Vec::is_empty")]
		depends_on: Vec<String>,
	},
}

/// Host-facing description of a single credential field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
	/// Label shown next to the input.
	pub display_name: String,
	/// Key under which the host stores the value.
	pub name: String,
	/// Widget type and dynamic-option wiring.
	#[serde(flatten)]
	pub kind: FieldKind,
	/// Initial value.
	#[serde(default)]
	pub default: String,
	/// Hint rendered inside an empty input.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
	/// Help text rendered under the input.
	#[serde(default)]
	pub description: String,
}
impl FieldDescriptor {
	/// Free-text field.
	pub fn string(name: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self::with_kind(name, display_name, FieldKind::String)
	}

	/// Masked secret field.
	pub fn password(name: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self::with_kind(name, display_name, FieldKind::Password)
	}

	/// Remote-populated single-select.
	pub fn options(
		name: impl Into<String>,
		display_name: impl Into<String>,
		load_options: LoadOptionsMethod,
	) -> Self {
		Self::with_kind(
			name,
			display_name,
			FieldKind::Options { load_options, depends_on: Vec::new() },
		)
	}

	fn with_kind(name: impl Into<String>, display_name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			display_name: display_name.into(),
			name: name.into(),
			kind,
			default: String::new(),
			placeholder: None,
			description: String::new(),
		}
	}

	/// Sets the help text.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();

		self
	}

	/// Sets the placeholder.
	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());

		self
	}

	/// Declares that this select must be reloaded when `field` changes.
	///
	/// Has no effect on non-select fields.
	pub fn depends_on(mut self, field: impl Into<String>) -> Self {
		if let FieldKind::Options { depends_on, .. } = &mut self.kind {
			depends_on.push(field.into());
		}

		self
	}

	/// Loader that populates this field, if it is a remote select.
	pub fn load_options(&self) -> Option<LoadOptionsMethod> {
		match &self.kind {
			FieldKind::Options { load_options, .. } => Some(*load_options),
			_ => None,
		}
	}

	/// Fields this select depends on; empty for non-select fields.
	pub fn dependencies(&self) -> &[String] {
		match &self.kind {
			FieldKind::Options { depends_on, .. } => depends_on,
			_ => &[],
		}
	}

	/// Returns true when the input is masked.
	pub fn is_secret(&self) -> bool {
		matches!(self.kind, FieldKind::Password)
	}
}
