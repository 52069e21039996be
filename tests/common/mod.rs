//! Helpers shared by the integration tests.

#![allow(dead_code)]

// crates.io
use cf2_credentials::{
	descriptor::{ApiEndpoint, CredentialDescriptor},
	http::ReqwestHttpClient,
	reqwest::Client,
	resolver::{Cf2Client, ReqwestCf2Client},
	url::Url,
};

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Constructs a [`Cf2Client`] whose descriptor points at `server_root` instead of the
/// per-workspace production host.
pub fn build_reqwest_test_client(server_root: &str) -> ReqwestCf2Client {
	let root = Url::parse(server_root).expect("Mock server root should parse as a URL.");
	let descriptor = CredentialDescriptor::cf2_builder()
		.endpoint(ApiEndpoint::Fixed(root))
		.build()
		.expect("Test descriptor should pass validation.");

	Cf2Client::new(descriptor, test_reqwest_http_client())
}
