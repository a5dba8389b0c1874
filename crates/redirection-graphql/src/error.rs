//! Error types for the redirection GraphQL extension.
//!
//! A missing dependency is not an error: the extension reports it through an
//! admin notice and skips registration.

use thiserror::Error;

/// Result type for extension operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// Result type for redirect provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for schema registry operations.
pub type GraphQLResult<T> = Result<T, GraphQLError>;

/// Capabilities the extension depends on, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
	/// The GraphQL schema registry.
	GraphQL,
	/// The redirect-data provider.
	Redirection,
}

impl Dependency {
	/// All dependencies in check order.
	pub const ALL: [Dependency; 2] = [Dependency::GraphQL, Dependency::Redirection];

	/// Human-readable capability name, as shown in admin notices.
	pub fn name(&self) -> &'static str {
		match self {
			Self::GraphQL => "GraphQL",
			Self::Redirection => "Redirection",
		}
	}
}

impl std::fmt::Display for Dependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Errors reported by a redirect provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
	/// The backing store could not be read.
	#[error("redirect store unavailable: {0}")]
	Unavailable(String),

	/// A stored record could not be interpreted.
	#[error("redirect {id} is malformed: {reason}")]
	Malformed {
		/// Record identifier.
		id: u64,
		/// What was wrong with it.
		reason: String,
	},
}

/// Errors raised while assembling a schema from the registry.
#[derive(Debug, Error)]
pub enum GraphQLError {
	/// The registered types do not form a valid schema.
	#[error("Schema error: {0}")]
	Schema(String),

	/// The query text is larger than the registry accepts.
	#[error("Query size {size} bytes exceeds maximum of {max} bytes")]
	QueryTooLarge { size: usize, max: usize },
}

/// Crate-level error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtensionError {
	/// The redirect provider failed.
	#[error(transparent)]
	Provider(#[from] ProviderError),

	/// Schema assembly failed.
	#[error(transparent)]
	GraphQL(#[from] GraphQLError),

	/// Plugin configuration could not be parsed.
	#[error("configuration error: {0}")]
	Config(String),
}

impl From<toml::de::Error> for ExtensionError {
	fn from(err: toml::de::Error) -> Self {
		Self::Config(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Dependency::GraphQL, "GraphQL")]
	#[case(Dependency::Redirection, "Redirection")]
	fn test_dependency_display(#[case] dependency: Dependency, #[case] expected: &str) {
		assert_eq!(dependency.to_string(), expected);
	}

	#[rstest]
	fn test_dependency_check_order() {
		assert_eq!(
			Dependency::ALL,
			[Dependency::GraphQL, Dependency::Redirection]
		);
	}

	#[rstest]
	fn test_provider_error_is_transparent() {
		let err: ExtensionError = ProviderError::Unavailable("table locked".to_string()).into();
		assert_eq!(err.to_string(), "redirect store unavailable: table locked");
	}

	#[rstest]
	fn test_graphql_error_is_transparent() {
		let err: ExtensionError = GraphQLError::QueryTooLarge { size: 40, max: 32 }.into();
		assert_eq!(
			err.to_string(),
			"Query size 40 bytes exceeds maximum of 32 bytes"
		);
	}

	#[rstest]
	fn test_malformed_error_display() {
		let err = ProviderError::Malformed {
			id: 12,
			reason: "unknown action type".to_string(),
		};
		assert_eq!(err.to_string(), "redirect 12 is malformed: unknown action type");
	}

	#[rstest]
	fn test_toml_error_converts_to_config() {
		let parse: Result<toml::Table, _> = toml::from_str("admin_notices = ");
		let err: ExtensionError = parse.unwrap_err().into();
		assert!(matches!(err, ExtensionError::Config(_)));
	}
}
