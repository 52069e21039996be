// std
use std::collections::BTreeSet;
// self
use crate::{
	_prelude::*,
	descriptor::{
		ApiEndpoint, AuthenticateTemplate, CredentialDescriptor, FieldDescriptor,
		endpoint::validate_https,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum DescriptorError {
	/// Type name must be a non-empty token.
	#[error("Descriptor name must be non-empty and contain no whitespace.")]
	InvalidName,
	/// At least one field must be declared.
	#[error("Descriptor must declare at least one field.")]
	NoFields,
	/// Field names must be unique.
	#[error("Field `{name}` is declared more than once.")]
	DuplicateField {
		/// Repeated field name.
		name: String,
	},
	/// A select depends on a field that is not declared before it.
	#[error("Field `{field}` depends on `{depends_on}`, which is not declared before it.")]
	UnknownDependency {
		/// Dependent field.
		field: String,
		/// Missing or later-declared parent field.
		depends_on: String,
	},
	/// Endpoints must use HTTPS (loopback hosts excepted).
	#[error("The {endpoint} URL must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which URL failed validation.
		endpoint: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// Parent domain of the workspace host is not a valid DNS name.
	#[error("API domain `{domain}` is not a valid host name.")]
	InvalidDomain {
		/// Rejected domain.
		domain: String,
	},
	/// A serialized `baseUrl` disagrees with the endpoint it was stored next to.
	#[error("Base URL `{declared}` does not match the endpoint template `{expected}`.")]
	BaseUrlMismatch {
		/// Value found in the input.
		declared: String,
		/// Template derived from the endpoint.
		expected: String,
	},
	/// An authentication header has an empty name.
	#[error("Authentication header names cannot be empty.")]
	EmptyHeaderName,
	/// An authentication header references a field the descriptor does not declare.
	#[error("Authentication header `{header}` references undeclared field `{field}`.")]
	UnknownTemplateField {
		/// Header name.
		header: String,
		/// Referenced field.
		field: String,
	},
}

/// Builder for [`CredentialDescriptor`] values.
#[derive(Debug)]
pub struct CredentialDescriptorBuilder {
	/// Internal credential type name.
	pub name: String,
	/// Display name; defaults to `name`.
	pub display_name: Option<String>,
	/// Optional documentation link.
	pub documentation_url: Option<Url>,
	/// Ordered fields.
	pub properties: Vec<FieldDescriptor>,
	/// Authentication headers.
	pub authenticate: AuthenticateTemplate,
	/// Endpoint layout.
	pub endpoint: ApiEndpoint,
}
impl CredentialDescriptorBuilder {
	/// Creates a new builder seeded with the provided type name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			display_name: None,
			documentation_url: None,
			properties: Vec::new(),
			authenticate: AuthenticateTemplate::default(),
			endpoint: ApiEndpoint::default(),
		}
	}

	/// Sets the display name.
	pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = Some(display_name.into());

		self
	}

	/// Sets the documentation link.
	pub fn documentation_url(mut self, url: Url) -> Self {
		self.documentation_url = Some(url);

		self
	}

	/// Appends a field.
	pub fn field(mut self, field: FieldDescriptor) -> Self {
		self.properties.push(field);

		self
	}

	/// Appends multiple fields.
	pub fn fields<I>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = FieldDescriptor>,
	{
		self.properties.extend(fields);

		self
	}

	/// Overrides the authentication headers.
	pub fn authenticate(mut self, authenticate: AuthenticateTemplate) -> Self {
		self.authenticate = authenticate;

		self
	}

	/// Overrides the endpoint layout.
	pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<CredentialDescriptor, DescriptorError> {
		let descriptor = self.assemble();

		descriptor.validate()?;

		Ok(descriptor)
	}

	pub(crate) fn assemble(self) -> CredentialDescriptor {
		let display_name = self.display_name.unwrap_or_else(|| self.name.clone());

		CredentialDescriptor {
			base_url: self.endpoint.template(),
			name: self.name,
			display_name,
			documentation_url: self.documentation_url,
			properties: self.properties,
			authenticate: self.authenticate,
			endpoint: self.endpoint,
		}
	}
}

/// Wire shape accepted when deserializing a [`CredentialDescriptor`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCredentialDescriptor {
	name: String,
	display_name: String,
	#[serde(default)]
	documentation_url: Option<Url>,
	properties: Vec<FieldDescriptor>,
	authenticate: AuthenticateTemplate,
	#[serde(default)]
	base_url: Option<String>,
	endpoint: ApiEndpoint,
}
impl TryFrom<RawCredentialDescriptor> for CredentialDescriptor {
	type Error = DescriptorError;

	fn try_from(raw: RawCredentialDescriptor) -> Result<Self, Self::Error> {
		let expected = raw.endpoint.template();

		match raw.base_url {
			Some(declared) if declared != expected =>
				return Err(DescriptorError::BaseUrlMismatch { declared, expected }),
			_ => {},
		}

		let descriptor = Self {
			name: raw.name,
			display_name: raw.display_name,
			documentation_url: raw.documentation_url,
			properties: raw.properties,
			authenticate: raw.authenticate,
			base_url: expected,
			endpoint: raw.endpoint,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl CredentialDescriptor {
	/// Validates invariants for the descriptor.
	pub fn validate(&self) -> Result<(), DescriptorError> {
		if self.name.is_empty() || self.name.chars().any(char::is_whitespace) {
			return Err(DescriptorError::InvalidName);
		}
		if self.properties.is_empty() {
			return Err(DescriptorError::NoFields);
		}

		let mut seen = BTreeSet::new();

		for field in &self.properties {
			for dep in field.dependencies() {
				if !seen.contains(dep.as_str()) {
					return Err(DescriptorError::UnknownDependency {
						field: field.name.clone(),
						depends_on: dep.clone(),
					});
				}
			}

			if !seen.insert(field.name.as_str()) {
				return Err(DescriptorError::DuplicateField { name: field.name.clone() });
			}
		}

		for header in &self.authenticate.headers {
			if header.name.is_empty() {
				return Err(DescriptorError::EmptyHeaderName);
			}
			if !seen.contains(header.field.as_str()) {
				return Err(DescriptorError::UnknownTemplateField {
					header: header.name.clone(),
					field: header.field.clone(),
				});
			}
		}

		if let Some(url) = self.documentation_url.as_ref() {
			validate_https("documentation", url)?;
		}

		self.endpoint.validate()
	}
}
