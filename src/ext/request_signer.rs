//! Request signing contracts that let downstream crates attach credential headers to arbitrary
//! HTTP clients.

// self
use crate::{
	_prelude::*,
	credential::CredentialRecord,
	descriptor::{AuthenticateTemplate, CredentialDescriptor, field_names},
	error::ConfigError,
	http::{ApiRequest, HeaderName, HeaderValue},
};

/// Describes how to attach a [`CredentialRecord`] to an outbound request without constraining
/// the HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects the credential's authentication headers.
	fn attach_credentials(&self, request: Request, record: &CredentialRecord)
	-> Result<Request, Error>;
}

/// Applies a descriptor's [`AuthenticateTemplate`] (for CF2, `Authorization: Bearer {apiKey}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialSigner {
	template: AuthenticateTemplate,
}
impl CredentialSigner {
	/// Signs with an explicit template.
	pub fn new(template: AuthenticateTemplate) -> Self {
		Self { template }
	}

	/// Signs with the template declared by `descriptor`.
	pub fn for_descriptor(descriptor: &CredentialDescriptor) -> Self {
		Self::new(descriptor.authenticate.clone())
	}

	/// Template applied by this signer.
	pub fn template(&self) -> &AuthenticateTemplate {
		&self.template
	}

	/// Renders the template for `record` into typed headers.
	///
	/// Headers carrying the API key are marked sensitive so `Debug` output and HTTP/2 header
	/// compression leave them out.
	pub fn headers(
		&self,
		record: &CredentialRecord,
	) -> Result<Vec<(HeaderName, HeaderValue)>, ConfigError> {
		self.template
			.headers
			.iter()
			.map(|header| {
				let invalid = || ConfigError::InvalidHeader { name: header.name.clone() };
				let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(|_| invalid())?;
				let mut value =
					HeaderValue::from_str(&header.render(record)).map_err(|_| invalid())?;

				value.set_sensitive(header.field == field_names::API_KEY);

				Ok::<_, ConfigError>((name, value))
			})
			.collect()
	}
}
impl Default for CredentialSigner {
	fn default() -> Self {
		Self::new(AuthenticateTemplate::bearer_api_key())
	}
}
impl RequestSignerExt<ApiRequest, ConfigError> for CredentialSigner {
	fn attach_credentials(
		&self,
		mut request: ApiRequest,
		record: &CredentialRecord,
	) -> Result<ApiRequest, ConfigError> {
		for (name, value) in self.headers(record)? {
			request.headers.insert(name, value);
		}

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, ConfigError> for CredentialSigner {
	fn attach_credentials(
		&self,
		mut request: reqwest::RequestBuilder,
		record: &CredentialRecord,
	) -> Result<reqwest::RequestBuilder, ConfigError> {
		for (name, value) in self.headers(record)? {
			request = request.header(name, value);
		}

		Ok(request)
	}
}
