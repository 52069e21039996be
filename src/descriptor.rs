//! Credential descriptor data structures consumed by workflow hosts.
//!
//! A [`CredentialDescriptor`] declares which fields the user fills in, how those fields
//! authenticate outbound requests, which base URL consumers should target, and which resolver
//! populates each remote select. Hosts render it (it serializes to camelCase JSON) and dispatch
//! option loading through [`crate::resolver`].

/// Authentication header templates.
pub mod authenticate;
/// Builder API for assembling descriptors.
pub mod builder;
/// API endpoint layout.
pub mod endpoint;
/// Field descriptors and field names.
pub mod field;

pub use authenticate::*;
pub use builder::*;
pub use endpoint::*;
pub use field::*;

// self
use crate::{_prelude::*, resolver::LoadOptionsMethod};

/// Host-facing description of the CF2 API credential.
///
/// Deserialization runs [`CredentialDescriptor::validate`] and rejects a `baseUrl` that does not
/// match `endpoint`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "builder::RawCredentialDescriptor")]
pub struct CredentialDescriptor {
	/// Internal credential type name.
	pub name: String,
	/// Name shown to users.
	pub display_name: String,
	/// Link to user documentation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub documentation_url: Option<Url>,
	/// Ordered field list.
	pub properties: Vec<FieldDescriptor>,
	/// Headers injected into every request made with this credential.
	pub authenticate: AuthenticateTemplate,
	/// Base URL template exposed to consumers; always [`ApiEndpoint::template`] of `endpoint`.
	pub base_url: String,
	/// Resolved endpoint layout used to build request URLs.
	pub endpoint: ApiEndpoint,
}
impl CredentialDescriptor {
	/// Credential type name registered with hosts.
	pub const NAME: &'static str = "cf2Api";
	/// Display name registered with hosts.
	pub const DISPLAY_NAME: &'static str = "CF2 API";

	/// Creates a new builder for the provided type name.
	pub fn builder(name: impl Into<String>) -> CredentialDescriptorBuilder {
		CredentialDescriptorBuilder::new(name)
	}

	/// Builder seeded with the canonical CF2 fields, so callers can swap the endpoint or
	/// documentation link and keep the rest.
	pub fn cf2_builder() -> CredentialDescriptorBuilder {
		Self::builder(Self::NAME)
			.display_name(Self::DISPLAY_NAME)
			.field(
				FieldDescriptor::string(field_names::WORKSPACE, "Workspace Subdomain")
					.placeholder("your-workspace")
					.description(
						"The workspace subdomain to use in the API URL (e.g., workspacevalue in \
						 workspacevalue.myclickfunnels.com)",
					),
			)
			.field(
				FieldDescriptor::password(field_names::API_KEY, "API Key")
					.description("The API Key to authenticate requests."),
			)
			.field(
				FieldDescriptor::options(field_names::TEAM_ID, "Team", LoadOptionsMethod::GetTeams)
					.description("Select a team to use for the request."),
			)
			.field(
				FieldDescriptor::options(
					field_names::WORKSPACE_ID,
					"Workspace",
					LoadOptionsMethod::GetWorkspaces,
				)
				.depends_on(field_names::TEAM_ID)
				.description("Select a workspace after choosing a team."),
			)
			.authenticate(AuthenticateTemplate::bearer_api_key())
	}

	/// The canonical CF2 descriptor.
	pub fn cf2() -> Self {
		Self::cf2_builder().assemble()
	}

	/// Looks up a field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.properties.iter().find(|field| field.name == name)
	}

	/// Fields whose options must be reloaded when `name` changes.
	pub fn dependents_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldDescriptor> {
		self.properties.iter().filter(move |field| field.dependencies().iter().any(|dep| dep == name))
	}

	/// Remote selects and the loader each one uses, in field order.
	pub fn load_options_fields(&self) -> impl Iterator<Item = (&FieldDescriptor, LoadOptionsMethod)> {
		self.properties.iter().filter_map(|field| field.load_options().map(|method| (field, method)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn cf2_descriptor_declares_fields_in_order() {
		let descriptor = CredentialDescriptor::cf2();
		let names = descriptor.properties.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();

		assert_eq!(names, ["workspace", "apiKey", "teamId", "workspaceId"]);
		assert!(descriptor.field("apiKey").expect("apiKey should be declared.").is_secret());
		assert_eq!(descriptor.base_url, "https://{workspace}.myclickfunnels.com/api/v2");
		assert_eq!(descriptor.name, "cf2Api");
		assert_eq!(descriptor.display_name, "CF2 API");
	}

	#[test]
	fn cf2_descriptor_passes_validation() {
		let built =
			CredentialDescriptor::cf2_builder().build().expect("Canonical descriptor should validate.");

		assert_eq!(built, CredentialDescriptor::cf2());
	}

	#[test]
	fn workspace_select_depends_on_team() {
		let descriptor = CredentialDescriptor::cf2();
		let dependents = descriptor.dependents_of("teamId").map(|f| f.name.as_str()).collect::<Vec<_>>();

		assert_eq!(dependents, ["workspaceId"]);
		assert_eq!(descriptor.dependents_of("workspaceId").count(), 0);

		let loaders = descriptor
			.load_options_fields()
			.map(|(field, method)| (field.name.as_str(), method))
			.collect::<Vec<_>>();

		assert_eq!(
			loaders,
			[("teamId", LoadOptionsMethod::GetTeams), ("workspaceId", LoadOptionsMethod::GetWorkspaces)]
		);
	}

	#[test]
	fn descriptor_serializes_host_shape() {
		let json =
			serde_json::to_value(CredentialDescriptor::cf2()).expect("Descriptor should serialize.");
		let workspace_field = &json["properties"][3];

		assert_eq!(json["displayName"], "CF2 API");
		assert_eq!(json["properties"][1]["type"], "password");
		assert_eq!(workspace_field["type"], "options");
		assert_eq!(workspace_field["loadOptionsMethod"], "getWorkspaces");
		assert_eq!(workspace_field["loadOptionsDependsOn"], serde_json::json!(["teamId"]));
		assert_eq!(workspace_field["default"], "");

		let back: CredentialDescriptor =
			serde_json::from_value(json).expect("Descriptor should deserialize.");

		assert_eq!(back, CredentialDescriptor::cf2());
	}
}
