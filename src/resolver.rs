//! Dynamic option resolvers for the team and workspace selects.
//!
//! Hosts populate a remote select by calling [`Cf2Client::load_options`] with the
//! [`LoadOptionsMethod`] declared on the field and a [`LoadOptionsContext`] holding the stored
//! credentials plus the in-progress form values. Each call re-issues its request: there is no
//! cache, no in-flight de-duplication, no retry, and only the first page the API returns is
//! mapped. Discarding stale results when the user re-selects quickly is the host's job.

// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	auth::TeamId,
	credential::{CredentialRecord, FormState},
	descriptor::{CredentialDescriptor, field_names},
	error::{ConfigError, TransportError},
	ext::{CredentialSigner, RequestSignerExt},
	http::{ApiHttpClient, ApiRequest, HeaderValue, header},
	obs::{self, LoadOutcome, LoadSpan},
	options::{self, OptionEntry},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed future returned by [`OptionsResolver`] methods.
pub type OptionsFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<OptionEntry>>> + 'a + Send>>;

/// Loaders a field can reference to populate its options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadOptionsMethod {
	/// Lists the teams visible to the API key.
	#[serde(rename = "getTeams")]
	GetTeams,
	/// Lists the workspaces of the currently selected team.
	#[serde(rename = "getWorkspaces")]
	GetWorkspaces,
}
impl LoadOptionsMethod {
	/// Every registered loader.
	pub const ALL: [LoadOptionsMethod; 2] =
		[LoadOptionsMethod::GetTeams, LoadOptionsMethod::GetWorkspaces];

	/// Returns the host-facing loader name.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoadOptionsMethod::GetTeams => "getTeams",
			LoadOptionsMethod::GetWorkspaces => "getWorkspaces",
		}
	}
}
impl Display for LoadOptionsMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for LoadOptionsMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|method| method.as_str() == s)
			.ok_or_else(|| ConfigError::UnknownLoadOptionsMethod { method: s.to_owned() })
	}
}

/// Everything a resolver needs, passed explicitly on each call.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptionsContext {
	/// Credentials as currently stored by the host.
	pub credentials: CredentialRecord,
	/// Values currently shown in the form, which may be ahead of the stored credentials.
	pub form: FormState,
}
impl LoadOptionsContext {
	/// Creates a context.
	pub fn new(credentials: CredentialRecord, form: FormState) -> Self {
		Self { credentials, form }
	}

	/// Builds both the credentials and the form from the in-progress values alone.
	pub fn from_form(form: FormState) -> Result<Self> {
		Ok(Self { credentials: CredentialRecord::from_values(&form)?, form })
	}
}

/// Explicit resolver interface hosts register instead of looking loaders up by name.
pub trait OptionsResolver
where
	Self: Send + Sync,
{
	/// Options for the team select.
	fn list_teams<'a>(&'a self, credentials: &'a CredentialRecord) -> OptionsFuture<'a>;

	/// Options for the workspace select of `team_id`.
	fn list_workspaces<'a>(
		&'a self,
		credentials: &'a CredentialRecord,
		team_id: Option<TeamId>,
	) -> OptionsFuture<'a>;

	/// Dispatches `method` against `ctx`. `GetWorkspaces` reads the team from the form state.
	fn load_options<'a>(
		&'a self,
		method: LoadOptionsMethod,
		ctx: &'a LoadOptionsContext,
	) -> OptionsFuture<'a> {
		match method {
			LoadOptionsMethod::GetTeams => self.list_teams(&ctx.credentials),
			LoadOptionsMethod::GetWorkspaces => match ctx.form.team_id() {
				Ok(team_id) => self.list_workspaces(&ctx.credentials, team_id),
				Err(e) => Box::pin(async move { Err::<Vec<OptionEntry>, Error>(e.into()) }),
			},
		}
	}

	/// Dispatches by host-facing loader name.
	fn load_options_by_name<'a>(
		&'a self,
		method: &str,
		ctx: &'a LoadOptionsContext,
	) -> OptionsFuture<'a> {
		match method.parse::<LoadOptionsMethod>() {
			Ok(method) => self.load_options(method, ctx),
			Err(e) => Box::pin(async move { Err::<Vec<OptionEntry>, Error>(e.into()) }),
		}
	}
}

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestCf2Client = Cf2Client<ReqwestHttpClient>;

/// CF2 API client that resolves select options for one credential descriptor.
pub struct Cf2Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Descriptor supplying the endpoint layout and authentication template.
	pub descriptor: CredentialDescriptor,
	/// HTTP transport used for every request.
	pub http_client: Arc<C>,
	signer: CredentialSigner,
}
impl<C> Cf2Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that signs requests with the descriptor's authentication template.
	pub fn new(descriptor: CredentialDescriptor, http_client: impl Into<Arc<C>>) -> Self {
		let signer = CredentialSigner::for_descriptor(&descriptor);

		Self { descriptor, http_client: http_client.into(), signer }
	}

	/// `GET {base}/teams`, mapped to options in response order.
	pub async fn list_teams(&self, credentials: &CredentialRecord) -> Result<Vec<OptionEntry>> {
		self.observe(LoadOptionsMethod::GetTeams, "list_teams", credentials, async move {
			let url = self.teams_url(credentials)?;

			self.fetch_options(credentials, url).await
		})
		.await
	}

	/// `GET {base}/teams/{team_id}/workspaces`, mapped to options in response order.
	///
	/// Without a team the call fails with [`ConfigError::MissingDependency`] and no request is
	/// sent.
	pub async fn list_workspaces(
		&self,
		credentials: &CredentialRecord,
		team_id: Option<TeamId>,
	) -> Result<Vec<OptionEntry>> {
		self.observe(LoadOptionsMethod::GetWorkspaces, "list_workspaces", credentials, async move {
			let team_id = team_id.ok_or(ConfigError::MissingDependency {
				field: field_names::TEAM_ID,
				dependent: field_names::WORKSPACE_ID,
			})?;
			let url = self.workspaces_url(credentials, team_id)?;

			self.fetch_options(credentials, url).await
		})
		.await
	}

	/// Dispatches `method` against `ctx`.
	pub async fn load_options(
		&self,
		method: LoadOptionsMethod,
		ctx: &LoadOptionsContext,
	) -> Result<Vec<OptionEntry>> {
		match method {
			LoadOptionsMethod::GetTeams => self.list_teams(&ctx.credentials).await,
			LoadOptionsMethod::GetWorkspaces =>
				self.list_workspaces(&ctx.credentials, ctx.form.team_id()?).await,
		}
	}

	/// URL of the team list for `credentials`.
	pub fn teams_url(&self, credentials: &CredentialRecord) -> Result<Url> {
		self.endpoint_url(credentials, "teams")
	}

	/// URL of the workspace list of `team_id` for `credentials`.
	pub fn workspaces_url(&self, credentials: &CredentialRecord, team_id: TeamId) -> Result<Url> {
		self.endpoint_url(credentials, &format!("teams/{team_id}/workspaces"))
	}

	fn endpoint_url(&self, credentials: &CredentialRecord, path: &str) -> Result<Url> {
		let base = credentials.base_url(&self.descriptor.endpoint)?;
		let raw = format!("{}/{path}", base.as_str().trim_end_matches('/'));

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source }.into())
	}

	async fn fetch_options(
		&self,
		credentials: &CredentialRecord,
		url: Url,
	) -> Result<Vec<OptionEntry>> {
		let request = ApiRequest::get(url)
			.header(header::ACCEPT, HeaderValue::from_static("application/json"));
		let request = self.signer.attach_credentials(request, credentials)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(
			url = %request.url,
			headers = ?request.headers,
			"Requesting CF2 option list."
		);

		let response = self.http_client.execute(request).await.map_err(TransportError::network)?;

		if !response.is_success() {
			return Err(Error::Status {
				status: response.status,
				body_preview: response.body_preview(),
				retry_after: response.retry_after,
			});
		}

		options::decode_options(&response.body)
	}

	async fn observe<Fut>(
		&self,
		method: LoadOptionsMethod,
		stage: &'static str,
		credentials: &CredentialRecord,
		fut: Fut,
	) -> Result<Vec<OptionEntry>>
	where
		Fut: Future<Output = Result<Vec<OptionEntry>>>,
	{
		let span = LoadSpan::new(method, stage, &credentials.workspace);
		let started = Instant::now();

		obs::record_load_outcome(method, LoadOutcome::Attempt);

		let result = span.instrument(fut).await;
		let (outcome, count) = match &result {
			Ok(options) => {
				#[cfg(feature = "tracing")]
				tracing::debug!(method = method.as_str(), count = options.len(), "Options loaded.");

				(LoadOutcome::Success, Some(options.len()))
			},
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(method = method.as_str(), error = %_e, "Loading options failed.");

				(LoadOutcome::Failure, None)
			},
		};

		span.finish(outcome, count);
		obs::record_load_outcome(method, outcome);
		obs::record_load_latency(method, outcome, started.elapsed());

		result
	}
}
#[cfg(feature = "reqwest")]
impl Cf2Client<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn with_default_transport(descriptor: CredentialDescriptor) -> Result<Self> {
		Ok(Self::new(descriptor, ReqwestHttpClient::try_default()?))
	}
}
impl<C> Clone for Cf2Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			descriptor: self.descriptor.clone(),
			http_client: Arc::clone(&self.http_client),
			signer: self.signer.clone(),
		}
	}
}
impl<C> Debug for Cf2Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Cf2Client").field("descriptor", &self.descriptor.name).finish()
	}
}
impl<C> OptionsResolver for Cf2Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn list_teams<'a>(&'a self, credentials: &'a CredentialRecord) -> OptionsFuture<'a> {
		Box::pin(Cf2Client::list_teams(self, credentials))
	}

	fn list_workspaces<'a>(
		&'a self,
		credentials: &'a CredentialRecord,
		team_id: Option<TeamId>,
	) -> OptionsFuture<'a> {
		Box::pin(Cf2Client::list_workspaces(self, credentials, team_id))
	}
}
