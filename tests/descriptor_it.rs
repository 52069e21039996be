// self
use cf2_credentials::{
	descriptor::{
		ApiEndpoint, AuthenticateTemplate, CredentialDescriptor, DescriptorError, FieldDescriptor,
		HeaderTemplate, field_names,
	},
	resolver::LoadOptionsMethod,
	url::Url,
};

fn team_select() -> FieldDescriptor {
	FieldDescriptor::options(field_names::TEAM_ID, "Team", LoadOptionsMethod::GetTeams)
}

#[test]
fn builder_defaults_display_name_to_type_name() {
	let descriptor = CredentialDescriptor::builder("cf2Sandbox")
		.field(FieldDescriptor::password(field_names::API_KEY, "API Key"))
		.build()
		.expect("Minimal descriptor should validate.");

	assert_eq!(descriptor.display_name, "cf2Sandbox");
	assert_eq!(descriptor.base_url, "https://{workspace}.myclickfunnels.com/api/v2");
}

#[test]
fn builder_rejects_blank_names_and_empty_field_lists() {
	let blank = CredentialDescriptor::builder("cf2 api")
		.field(FieldDescriptor::password(field_names::API_KEY, "API Key"))
		.build()
		.expect_err("Whitespace in the type name should fail.");

	assert_eq!(blank, DescriptorError::InvalidName);

	let empty = CredentialDescriptor::builder("cf2Api")
		.build()
		.expect_err("A descriptor without fields should fail.");

	assert_eq!(empty, DescriptorError::NoFields);
}

#[test]
fn builder_rejects_duplicate_fields() {
	let err = CredentialDescriptor::cf2_builder()
		.field(FieldDescriptor::string(field_names::WORKSPACE, "Workspace again"))
		.build()
		.expect_err("Repeated field names should fail.");

	assert_eq!(err, DescriptorError::DuplicateField { name: "workspace".into() });
}

#[test]
fn builder_requires_parents_before_dependents() {
	let err = CredentialDescriptor::builder("cf2Api")
		.field(FieldDescriptor::password(field_names::API_KEY, "API Key"))
		.field(
			FieldDescriptor::options(
				field_names::WORKSPACE_ID,
				"Workspace",
				LoadOptionsMethod::GetWorkspaces,
			)
			.depends_on(field_names::TEAM_ID),
		)
		.field(team_select())
		.build()
		.expect_err("A select declared before its parent should fail.");

	assert_eq!(
		err,
		DescriptorError::UnknownDependency {
			field: "workspaceId".into(),
			depends_on: "teamId".into(),
		}
	);
}

#[test]
fn builder_checks_authentication_headers() {
	let unknown = CredentialDescriptor::builder("cf2Api")
		.field(FieldDescriptor::string(field_names::WORKSPACE, "Workspace"))
		.build()
		.expect_err("The default bearer header needs an apiKey field.");

	assert_eq!(
		unknown,
		DescriptorError::UnknownTemplateField {
			header: "Authorization".into(),
			field: "apiKey".into(),
		}
	);

	let unnamed = CredentialDescriptor::cf2_builder()
		.authenticate(AuthenticateTemplate {
			headers: vec![HeaderTemplate {
				name: String::new(),
				prefix: "Token ".into(),
				field: field_names::API_KEY.into(),
			}],
		})
		.build()
		.expect_err("Empty header names should fail.");

	assert_eq!(unnamed, DescriptorError::EmptyHeaderName);
}

#[test]
fn builder_enforces_https_endpoints() {
	let insecure = CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::Fixed(
			Url::parse("http://proxy.example.com").expect("Proxy URL should parse."),
		))
		.build()
		.expect_err("Plain HTTP to a remote host should fail.");

	assert!(matches!(insecure, DescriptorError::InsecureEndpoint { endpoint: "api", .. }));

	CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::Fixed(Url::parse("http://127.0.0.1:8080").expect("URL should parse.")))
		.build()
		.expect("Loopback HTTP should be allowed.");

	let docs = CredentialDescriptor::cf2_builder()
		.documentation_url(Url::parse("http://docs.example.com/cf2").expect("URL should parse."))
		.build()
		.expect_err("Plain HTTP documentation links should fail.");

	assert!(matches!(docs, DescriptorError::InsecureEndpoint { endpoint: "documentation", .. }));
}

#[test]
fn builder_validates_custom_domains() {
	let descriptor = CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::subdomain("staging.myclickfunnels.com"))
		.build()
		.expect("Nested parent domain should validate.");

	assert_eq!(descriptor.base_url, "https://{workspace}.staging.myclickfunnels.com/api/v2");

	let err = CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::subdomain(".myclickfunnels.com"))
		.build()
		.expect_err("Leading dots should fail.");

	assert_eq!(err, DescriptorError::InvalidDomain { domain: ".myclickfunnels.com".into() });
}

#[test]
fn fixed_endpoint_template_points_at_the_proxy() {
	let descriptor = CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::Fixed(
			Url::parse("https://proxy.example.com/cf2/").expect("Proxy URL should parse."),
		))
		.build()
		.expect("HTTPS proxy should validate.");

	assert_eq!(descriptor.base_url, "https://proxy.example.com/cf2/api/v2");
}

#[test]
fn deserialization_rejects_a_tampered_base_url() {
	let mut json =
		serde_json::to_value(CredentialDescriptor::cf2()).expect("Descriptor should serialize.");

	json["baseUrl"] = "https://{workspace}.attacker.example/api/v2".into();

	let err = serde_json::from_value::<CredentialDescriptor>(json)
		.expect_err("A base URL that disagrees with the endpoint should fail.");

	assert!(err.to_string().contains("does not match the endpoint template"));
}

#[test]
fn deserialization_validates_the_endpoint() {
	let mut json =
		serde_json::to_value(CredentialDescriptor::cf2()).expect("Descriptor should serialize.");

	json["endpoint"] = serde_json::json!({ "fixed": "http://proxy.example.com/" });
	json["baseUrl"] = "http://proxy.example.com/api/v2".into();

	let err = serde_json::from_value::<CredentialDescriptor>(json)
		.expect_err("Plain HTTP to a remote host should fail on load.");

	assert!(err.to_string().contains("must use HTTPS"));
}

#[test]
fn deserialization_derives_a_missing_base_url() {
	let mut json =
		serde_json::to_value(CredentialDescriptor::cf2()).expect("Descriptor should serialize.");

	json.as_object_mut().expect("Descriptor should serialize as an object.").remove("baseUrl");

	let descriptor = serde_json::from_value::<CredentialDescriptor>(json)
		.expect("baseUrl should be derived from the endpoint.");

	assert_eq!(descriptor, CredentialDescriptor::cf2());
}
