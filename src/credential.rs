//! Credential record entered by the user and the in-progress form state it is read from.
//!
//! Hosts hand values over as loosely typed JSON; [`CredentialRecord::from_values`] turns them into
//! validated identifiers once, so the resolvers and request signers only deal with typed data.

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, TeamId, WorkspaceId, WorkspaceSubdomain},
	descriptor::{ApiEndpoint, field_names},
	error::ConfigError,
};

/// Values the user supplied for the CF2 credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
	/// Workspace subdomain used to build the API host.
	pub workspace: WorkspaceSubdomain,
	/// API key sent as a bearer token.
	pub api_key: ApiKey,
	/// Selected team, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub team_id: Option<TeamId>,
	/// Selected workspace within `team_id`, if any.
	///
	/// Only meaningful once `team_id` is set. The host enforces that ordering through the
	/// declared field dependency; the record does not.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub workspace_id: Option<WorkspaceId>,
}
impl CredentialRecord {
	/// Creates a record with no team or workspace selected.
	pub fn new(workspace: WorkspaceSubdomain, api_key: ApiKey) -> Self {
		Self { workspace, api_key, team_id: None, workspace_id: None }
	}

	/// Sets the selected team.
	pub fn with_team(mut self, team_id: TeamId) -> Self {
		self.team_id = Some(team_id);

		self
	}

	/// Sets the selected workspace.
	pub fn with_workspace(mut self, workspace_id: WorkspaceId) -> Self {
		self.workspace_id = Some(workspace_id);

		self
	}

	/// Builds a record from raw host values keyed by field name.
	pub fn from_values(values: &FormState) -> Result<Self> {
		let workspace = WorkspaceSubdomain::new(values.required_str(field_names::WORKSPACE)?)?;
		let api_key = ApiKey::new(values.required_str(field_names::API_KEY)?);

		Ok(Self {
			workspace,
			api_key,
			team_id: values.team_id()?,
			workspace_id: values.workspace_id()?,
		})
	}

	/// Value of the `Authorization` header attached to every request.
	pub fn authorization_value(&self) -> String {
		format!("Bearer {}", self.api_key.expose())
	}

	/// API root for this credential, e.g. `https://acme.myclickfunnels.com/api/v2`.
	pub fn base_url(&self, endpoint: &ApiEndpoint) -> Result<Url> {
		endpoint.base_url(&self.workspace)
	}
}

/// In-progress form values, keyed by field name.
///
/// This is what the host currently shows in the credential form, which may differ from the
/// persisted [`CredentialRecord`] (the user may have picked a new team without saving yet).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, serde_json::Value>);
impl FormState {
	/// Creates an empty form.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a raw field value.
	pub fn with(mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.0.insert(field.into(), value.into());

		self
	}

	/// Sets a raw field value in place.
	pub fn set(&mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) {
		self.0.insert(field.into(), value.into());
	}

	/// Returns the raw value of `field`.
	pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
		self.0.get(field)
	}

	/// Currently selected team, or `None` while the select is still on its empty default.
	pub fn team_id(&self) -> Result<Option<TeamId>, ConfigError> {
		Ok(self.optional_id(field_names::TEAM_ID)?.map(TeamId::new))
	}

	/// Currently selected workspace, or `None` while the select is still on its empty default.
	pub fn workspace_id(&self) -> Result<Option<WorkspaceId>, ConfigError> {
		Ok(self.optional_id(field_names::WORKSPACE_ID)?.map(WorkspaceId::new))
	}

	fn required_str(&self, field: &'static str) -> Result<&str, ConfigError> {
		match self.0.get(field) {
			None | Some(serde_json::Value::Null) => Err(ConfigError::MissingField { field }),
			Some(serde_json::Value::String(s)) if s.is_empty() =>
				Err(ConfigError::MissingField { field }),
			Some(serde_json::Value::String(s)) => Ok(s),
			Some(other) => Err(ConfigError::InvalidFieldValue {
				field,
				reason: format!("expected a string, found {}", json_kind(other)),
			}),
		}
	}

	fn optional_id(&self, field: &'static str) -> Result<Option<i64>, ConfigError> {
		match self.0.get(field) {
			None | Some(serde_json::Value::Null) => Ok(None),
			Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
			Some(serde_json::Value::String(s)) => s.parse().map(Some).map_err(|e| {
				ConfigError::InvalidFieldValue { field, reason: format!("`{s}` is not an id ({e})") }
			}),
			Some(serde_json::Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
				ConfigError::InvalidFieldValue { field, reason: format!("{n} is not an integer id") }
			}),
			Some(other) => Err(ConfigError::InvalidFieldValue {
				field,
				reason: format!("expected a number or numeric string, found {}", json_kind(other)),
			}),
		}
	}
}
impl FromIterator<(String, serde_json::Value)> for FormState {
	fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "a boolean",
		serde_json::Value::Number(_) => "a number",
		serde_json::Value::String(_) => "a string",
		serde_json::Value::Array(_) => "an array",
		serde_json::Value::Object(_) => "an object",
	}
}
