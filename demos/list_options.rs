//! Demonstrates the cascading CF2 selects: load the teams, pick one, then load its workspaces.
//!
//! A local mock server stands in for `https://{workspace}.myclickfunnels.com` so the demo runs
//! offline.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use cf2_credentials::{
	credential::FormState,
	descriptor::{ApiEndpoint, CredentialDescriptor, field_names},
	http::ReqwestHttpClient,
	reqwest::Client,
	resolver::{Cf2Client, LoadOptionsContext, LoadOptionsMethod},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let teams_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/teams").header("authorization", "Bearer demo-key");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":1,"name":"Growth"},{"id":2,"name":"Support"}]"#);
		})
		.await;
	let workspaces_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/teams/1/workspaces");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":10,"name":"Main Funnel"},{"id":11,"name":"Webinars"}]"#);
		})
		.await;
	let descriptor = CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::Fixed(Url::parse(&server.base_url())?))
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = <Cf2Client<ReqwestHttpClient>>::new(descriptor, http_client);
	let mut form =
		FormState::new().with(field_names::WORKSPACE, "acme").with(field_names::API_KEY, "demo-key");
	let teams = client
		.load_options(LoadOptionsMethod::GetTeams, &LoadOptionsContext::from_form(form.clone())?)
		.await?;

	for team in &teams {
		println!("Team option: {} ({}).", team.name, team.value);
	}

	if let Some(team) = teams.first() {
		form.set(field_names::TEAM_ID, team.value);
	}

	let workspaces = client
		.load_options(LoadOptionsMethod::GetWorkspaces, &LoadOptionsContext::from_form(form)?)
		.await?;

	for workspace in &workspaces {
		println!("Workspace option: {} ({}).", workspace.name, workspace.value);
	}

	teams_mock.assert_async().await;
	workspaces_mock.assert_async().await;

	Ok(())
}
