// self
use crate::{_prelude::*, credential::CredentialRecord, descriptor::field_names};

/// Header whose value is a fixed prefix followed by a credential field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderTemplate {
	/// Header name, e.g. `Authorization`.
	pub name: String,
	/// Literal text placed before the field value, e.g. `Bearer `.
	pub prefix: String,
	/// Credential field spliced after the prefix.
	pub field: String,
}
impl HeaderTemplate {
	/// Host expression form, e.g. `={{"Bearer " + $credentials.apiKey}}`.
	pub fn expression(&self) -> String {
		format!("={{{{{:?} + $credentials.{}}}}}", self.prefix, self.field)
	}

	/// Renders the header value for `record`. Unset fields render as empty text.
	pub fn render(&self, record: &CredentialRecord) -> String {
		let mut value = self.prefix.clone();

		match self.field.as_str() {
			field_names::API_KEY => value.push_str(record.api_key.expose()),
			field_names::WORKSPACE => value.push_str(&record.workspace),
			field_names::TEAM_ID =>
				if let Some(id) = record.team_id {
					value.push_str(&id.to_string());
				},
			field_names::WORKSPACE_ID =>
				if let Some(id) = record.workspace_id {
					value.push_str(&id.to_string());
				},
			_ => {},
		}

		value
	}
}

/// Generic authentication: headers injected into every request made with the credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticateTemplate {
	/// Headers to attach, in declaration order.
	pub headers: Vec<HeaderTemplate>,
}
impl AuthenticateTemplate {
	/// `Authorization: Bearer {apiKey}`.
	pub fn bearer_api_key() -> Self {
		Self {
			headers: vec![HeaderTemplate {
				name: "Authorization".into(),
				prefix: "Bearer ".into(),
				field: field_names::API_KEY.into(),
			}],
		}
	}

	/// Renders every header for `record`.
	pub fn render(&self, record: &CredentialRecord) -> Vec<(String, String)> {
		self.headers.iter().map(|h| (h.name.clone(), h.render(record))).collect()
	}

	/// Returns true if any rendered header carries the API key.
	pub fn uses_secret(&self) -> bool {
		self.headers.iter().any(|h| h.field == field_names::API_KEY)
	}
}
impl Default for AuthenticateTemplate {
	fn default() -> Self {
		Self::bearer_api_key()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::{ApiKey, TeamId, WorkspaceSubdomain};

	fn record() -> CredentialRecord {
		CredentialRecord::new(
			WorkspaceSubdomain::new("acme").expect("Subdomain fixture should be valid."),
			ApiKey::new("key-123"),
		)
	}

	#[test]
	fn bearer_template_renders_exact_header() {
		let headers = AuthenticateTemplate::bearer_api_key().render(&record());

		assert_eq!(headers, vec![("Authorization".to_owned(), "Bearer key-123".to_owned())]);
	}

	#[test]
	fn expression_matches_host_syntax() {
		let template = AuthenticateTemplate::bearer_api_key();

		assert_eq!(template.headers[0].expression(), "={{\"Bearer \" + $credentials.apiKey}}");
	}

	#[test]
	fn unset_fields_render_empty() {
		let header =
			HeaderTemplate { name: "X-Team".into(), prefix: "team:".into(), field: "teamId".into() };

		assert_eq!(header.render(&record()), "team:");
		assert_eq!(header.render(&record().with_team(TeamId::new(5))), "team:5");
	}

	#[test]
	fn secret_usage_tracks_api_key_headers() {
		assert!(AuthenticateTemplate::bearer_api_key().uses_secret());

		let team_only = AuthenticateTemplate {
			headers: vec![HeaderTemplate {
				name: "X-Team".into(),
				prefix: String::new(),
				field: field_names::TEAM_ID.into(),
			}],
		};

		assert!(!team_only.uses_secret());
	}
}
