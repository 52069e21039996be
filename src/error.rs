//! Crate-level error types shared by the descriptor, the credential record, and the resolvers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or input problem; nothing was sent upstream.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The request never produced an HTTP response.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Identifier supplied by the host failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),

	/// Remote API answered with a non-success status.
	#[error("CF2 API responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Leading portion of the response body, for display in the host's load-error UI.
		body_preview: Option<String>,
		/// `Retry-After` from the response, surfaced for the host; this crate never retries.
		retry_after: Option<Duration>,
	},
	/// Response body did not have the expected `[{id, name}]` shape.
	#[error("CF2 API returned a malformed option list.")]
	Decode {
		/// Structured parsing failure, including the JSON path that broke.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration and input validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The default transport failed to initialize (TLS backend, resolver).
	#[error("Failed to build the HTTP transport for CF2 API calls.")]
	HttpClientBuild {
		/// Builder failure reported by the transport.
		#[source]
		source: BoxError,
	},
	/// Descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::descriptor::DescriptorError),
	/// Request URL could not be assembled from the endpoint and credential.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// URL text that failed to parse.
		url: String,
		/// Why the URL was rejected.
		#[source]
		source: url::ParseError,
	},
	/// A header value contains characters HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: String,
	},
	/// Required credential field was not supplied.
	#[error("Credential field `{field}` is required.")]
	MissingField {
		/// Field name.
		field: &'static str,
	},
	/// A field value has the wrong JSON type or cannot be parsed.
	#[error("Credential field `{field}` has an invalid value: {reason}.")]
	InvalidFieldValue {
		/// Field name.
		field: &'static str,
		/// Human-readable reason.
		reason: String,
	},
	/// Options for a dependent field were requested before its parent was selected.
	#[error("Select `{field}` before loading options for `{dependent}`.")]
	MissingDependency {
		/// Parent field that must be set first.
		field: &'static str,
		/// Field whose options were requested.
		dependent: &'static str,
	},
	/// Host asked for a loader this credential does not register.
	#[error("Unknown load-options method `{method}`.")]
	UnknownLoadOptionsMethod {
		/// Method name supplied by the host.
		method: String,
	},
}
impl ConfigError {
	/// Boxes a transport builder failure.
	pub fn http_client_build(source: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(source) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures reported by an [`ApiHttpClient`](crate::http::ApiHttpClient) before any status
/// line was received.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// DNS, connect, TLS, or read failure, as reported by the transport.
	#[error("Could not reach the CF2 API.")]
	Network {
		/// The transport's own error value.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Boxes a transport failure.
	pub fn network(source: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(source) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
