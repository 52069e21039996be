//! Transport primitives for CF2 API calls.
//!
//! The module exposes [`ApiHttpClient`] so hosts can route requests through their own HTTP
//! stack (proxies, recorded fixtures, a shared connection pool). [`ApiRequest`] and
//! [`ApiResponse`] are built on the `http` crate's types, so implementations never depend on
//! reqwest.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, header};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::_prelude::*;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type ApiFuture<'a, E> = Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute a single API request.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// resolver call, and the returned future must be `Send` so hosts can drive it on any executor.
/// Implementations report only transport failures; non-2xx responses are returned as
/// [`ApiResponse`] values and classified by the caller.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response body.
	fn execute(&self, request: ApiRequest) -> ApiFuture<'_, Self::TransportError>;
}

/// Outbound request handed to an [`ApiHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Request headers. Values carrying the API key are marked sensitive.
	pub headers: HeaderMap,
}
impl ApiRequest {
	/// Creates a request without headers.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new() }
	}

	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Sets a header, replacing any existing values with the same name.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Returns the first value of `name` if it is visible ASCII.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}
}

/// Buffered response returned by an [`ApiHttpClient`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Leading portion of the body as lossy UTF-8, or `None` when the body is blank.
	pub fn body_preview(&self) -> Option<String> {
		let text = String::from_utf8_lossy(&self.body);
		let trimmed = text.trim();

		if trimmed.is_empty() {
			return None;
		}

		Some(trimmed.chars().take(Self::BODY_PREVIEW_LIMIT).collect())
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, proxies, and TLS roots are whatever the wrapped client was built with.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with reqwest's defaults.
	pub fn try_default() -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> ApiFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.request(request.method, request.url).headers(request.headers).send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok::<_, ReqwestError>(ApiResponse { status, retry_after, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(header::RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return i64::try_from(secs).ok().map(Duration::seconds);
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://acme.myclickfunnels.com/api/v2/teams").expect("URL should parse.")
	}

	#[test]
	fn header_replaces_existing_value() {
		let request = ApiRequest::get(url())
			.header(header::ACCEPT, HeaderValue::from_static("text/plain"))
			.header(header::ACCEPT, HeaderValue::from_static("application/json"));

		assert_eq!(request.method, Method::GET);
		assert_eq!(request.headers.len(), 1);
		assert_eq!(request.header_value("ACCEPT"), Some("application/json"));
		assert_eq!(request.header_value("authorization"), None);
	}

	#[test]
	fn body_preview_trims_and_truncates() {
		let blank = ApiResponse { status: 500, retry_after: None, body: b"  \n".to_vec() };

		assert_eq!(blank.body_preview(), None);

		let long = ApiResponse { status: 500, retry_after: None, body: vec![b'x'; 1024] };

		assert_eq!(long.body_preview().map(|p| p.len()), Some(ApiResponse::BODY_PREVIEW_LIMIT));
		assert!(!long.is_success());
		assert!(ApiResponse { status: 204, ..ApiResponse::default() }.is_success());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn retry_after_accepts_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(header::RETRY_AFTER, HeaderValue::from_static("30"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(30)));
		assert_eq!(parse_retry_after(&HeaderMap::new()), None);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn retry_after_beyond_duration_range_is_ignored() {
		let mut headers = HeaderMap::new();

		headers.insert(header::RETRY_AFTER, HeaderValue::from_static("18446744073709551615"));

		assert_eq!(parse_retry_after(&headers), None);
	}
}
