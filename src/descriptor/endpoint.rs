// std
use std::net::IpAddr;
// crates.io
use url::Host;
// self
use crate::{_prelude::*, auth::WorkspaceSubdomain, error::ConfigError};

/// Domain that hosts every CF2 workspace.
pub const DEFAULT_API_DOMAIN: &str = "myclickfunnels.com";
/// Path of the v2 API below the workspace host.
pub const API_PATH: &str = "/api/v2";

/// Where API calls for a credential are sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiEndpoint {
	/// `https://{workspace}.{domain}/api/v2`; the production layout.
	Subdomain {
		/// Parent domain of the workspace host.
		domain: String,
	},
	/// `{root}/api/v2` regardless of the workspace; used for proxies and local mock servers.
	Fixed(Url),
}
impl ApiEndpoint {
	/// Endpoint under a custom parent domain.
	pub fn subdomain(domain: impl Into<String>) -> Self {
		Self::Subdomain { domain: domain.into() }
	}

	/// Resolves the API root for `workspace`.
	pub fn base_url(&self, workspace: &WorkspaceSubdomain) -> Result<Url> {
		match self {
			Self::Subdomain { domain } => {
				let raw = format!("https://{workspace}.{domain}{API_PATH}");

				Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source }.into())
			},
			Self::Fixed(root) => {
				let mut url = root.clone();
				let path = format!("{}{API_PATH}", root.path().trim_end_matches('/'));

				url.set_path(&path);
				url.set_query(None);
				url.set_fragment(None);

				Ok(url)
			},
		}
	}

	/// Host-facing base URL template, e.g. `https://{workspace}.myclickfunnels.com/api/v2`.
	pub fn template(&self) -> String {
		match self {
			Self::Subdomain { domain } => format!("https://{{workspace}}.{domain}{API_PATH}"),
			Self::Fixed(root) => format!("{}{API_PATH}", root.as_str().trim_end_matches('/')),
		}
	}

	pub(crate) fn validate(&self) -> Result<(), super::DescriptorError> {
		match self {
			Self::Subdomain { domain } => {
				let valid = !domain.is_empty()
					&& matches!(Host::parse(domain), Ok(Host::Domain(_)))
					&& !domain.starts_with('.')
					&& !domain.ends_with('.');

				if valid {
					Ok(())
				} else {
					Err(super::DescriptorError::InvalidDomain { domain: domain.clone() })
				}
			},
			Self::Fixed(root) => validate_https("api", root),
		}
	}
}
impl Default for ApiEndpoint {
	fn default() -> Self {
		Self::subdomain(DEFAULT_API_DOMAIN)
	}
}

/// Requires HTTPS, except for loopback hosts where plain HTTP is accepted.
pub(crate) fn validate_https(
	name: &'static str,
	url: &Url,
) -> Result<(), super::DescriptorError> {
	let secure = match url.scheme() {
		"https" => true,
		"http" => is_loopback(url),
		_ => false,
	};

	if secure {
		Ok(())
	} else {
		Err(super::DescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
		Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn workspace() -> WorkspaceSubdomain {
		WorkspaceSubdomain::new("acme").expect("Subdomain fixture should be valid.")
	}

	#[test]
	fn subdomain_endpoint_builds_workspace_host() {
		let url = ApiEndpoint::default().base_url(&workspace()).expect("Base URL should build.");

		assert_eq!(url.as_str(), "https://acme.myclickfunnels.com/api/v2");
		assert_eq!(ApiEndpoint::default().template(), "https://{workspace}.myclickfunnels.com/api/v2");
	}

	#[test]
	fn base_url_matches_the_stored_subdomain() {
		let workspace = WorkspaceSubdomain::new("ACME").expect("Mixed case should be accepted.");
		let url = ApiEndpoint::default().base_url(&workspace).expect("Base URL should build.");

		assert_eq!(url.as_str(), format!("https://{workspace}.myclickfunnels.com/api/v2"));
		assert_eq!(url.as_str(), "https://acme.myclickfunnels.com/api/v2");
	}

	#[test]
	fn fixed_endpoint_ignores_workspace() {
		let root = Url::parse("http://127.0.0.1:8080/proxy/?debug=1").expect("Root should parse.");
		let url = ApiEndpoint::Fixed(root).base_url(&workspace()).expect("Base URL should build.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/api/v2");
	}

	#[test]
	fn validation_rejects_plain_http_off_loopback() {
		let remote = Url::parse("http://example.com").expect("URL should parse.");

		assert!(ApiEndpoint::Fixed(remote).validate().is_err());

		let local = Url::parse("http://localhost:9000").expect("URL should parse.");

		assert!(ApiEndpoint::Fixed(local).validate().is_ok());
		assert!(ApiEndpoint::subdomain("").validate().is_err());
		assert!(ApiEndpoint::subdomain("bad domain").validate().is_err());
		assert!(ApiEndpoint::default().validate().is_ok());
	}
}
