//! Strongly typed identifiers used by the CF2 credential.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_numeric_id {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(i64);
		impl $name {
			/// Wraps a raw remote identifier.
			pub const fn new(value: i64) -> Self {
				Self(value)
			}

			/// Returns the raw remote identifier.
			pub const fn get(self) -> i64 {
				self.0
			}
		}
		impl From<i64> for $name {
			fn from(value: i64) -> Self {
				Self(value)
			}
		}
		impl From<$name> for i64 {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!(stringify!($name), "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
		impl FromStr for $name {
			type Err = std::num::ParseIntError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.parse().map(Self)
			}
		}
	};
}

def_numeric_id! { TeamId, "Identifier of a CF2 team, as returned by `GET /teams`." }
def_numeric_id! {
	WorkspaceId,
	"Identifier of a CF2 workspace, as returned by `GET /teams/{id}/workspaces`."
}

const SUBDOMAIN_MAX_LEN: usize = 63;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier.
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// The identifier contains a character that cannot appear in a DNS label.
	#[error("{kind} identifier contains the invalid character {ch:?}.")]
	InvalidCharacter {
		/// Kind of identifier.
		kind: &'static str,
		/// Offending character.
		ch: char,
	},
	/// The identifier starts or ends with a hyphen.
	#[error("{kind} identifier cannot start or end with a hyphen.")]
	InvalidHyphen {
		/// Kind of identifier.
		kind: &'static str,
	},
}

/// Workspace subdomain, e.g. `acme` in `acme.myclickfunnels.com`.
///
/// Values must form a single DNS label so that the subdomain can be spliced into the API host
/// without escaping. Host names are case-insensitive, so the label is stored in lowercase and
/// `ACME` yields the same base URL as `acme`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceSubdomain(String);
impl WorkspaceSubdomain {
	const KIND: &'static str = "Workspace subdomain";

	/// Creates a new subdomain after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_label(Self::KIND, view)?;

		Ok(Self(view.to_ascii_lowercase()))
	}
}
impl Deref for WorkspaceSubdomain {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for WorkspaceSubdomain {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for WorkspaceSubdomain {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<WorkspaceSubdomain> for String {
	fn from(value: WorkspaceSubdomain) -> Self {
		value.0
	}
}
impl TryFrom<String> for WorkspaceSubdomain {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for WorkspaceSubdomain {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "WorkspaceSubdomain({})", self.0)
	}
}
impl Display for WorkspaceSubdomain {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for WorkspaceSubdomain {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_label(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > SUBDOMAIN_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: SUBDOMAIN_MAX_LEN });
	}
	if let Some(ch) = view.chars().find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-')) {
		return Err(IdentifierError::InvalidCharacter { kind, ch });
	}
	if view.starts_with('-') || view.ends_with('-') {
		return Err(IdentifierError::InvalidHyphen { kind });
	}

	Ok(())
}
