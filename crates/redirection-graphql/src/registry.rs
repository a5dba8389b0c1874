//! GraphQL schema registry.
//!
//! Extensions register object types and root query fields by name; the host
//! builds an executable schema from whatever has been registered. Types and
//! fields are kept as factories so the schema can be rebuilt, and
//! registering a name again replaces the previous entry.

use crate::error::{GraphQLError, GraphQLResult};
use async_graphql::dynamic::{Field, Object, Schema};
use async_graphql::{Request, Response};
use async_graphql::extensions::Analyzer;
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::Arc;

/// Name of the root query type.
pub const ROOT_QUERY: &str = "RootQuery";

/// Default maximum query depth limit.
///
/// Limits how deeply nested a query can be to prevent resource exhaustion
/// from deeply nested selections.
pub const DEFAULT_MAX_QUERY_DEPTH: usize = 10;

/// Default maximum query complexity limit.
pub const DEFAULT_MAX_QUERY_COMPLEXITY: usize = 100;

/// Default maximum query size in bytes.
pub const DEFAULT_MAX_QUERY_SIZE: usize = 32_768; // 32 KB

/// Builds an object type on demand.
pub type ObjectFactory = Arc<dyn Fn() -> Object + Send + Sync>;

/// Builds a root query field on demand.
pub type FieldFactory = Arc<dyn Fn() -> Field + Send + Sync>;

/// Configuration for GraphQL query protection limits.
///
/// # Examples
///
/// ```
/// use redirection_graphql::registry::QueryLimits;
///
/// let limits = QueryLimits::default();
/// assert_eq!(limits.max_depth, 10);
/// assert_eq!(limits.max_complexity, 100);
///
/// let limits: QueryLimits = toml::from_str("max_depth = 4").unwrap();
/// assert_eq!(limits.max_depth, 4);
/// assert_eq!(limits.max_complexity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
	/// Maximum allowed query depth
	pub max_depth: usize,
	/// Maximum allowed query complexity
	pub max_complexity: usize,
	/// Maximum allowed query string size in bytes
	pub max_query_size: usize,
}

impl QueryLimits {
	/// Create a new `QueryLimits` with custom depth and complexity values.
	pub fn new(max_depth: usize, max_complexity: usize) -> Self {
		Self {
			max_depth,
			max_complexity,
			..Self::default()
		}
	}
}

impl Default for QueryLimits {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_QUERY_DEPTH,
			max_complexity: DEFAULT_MAX_QUERY_COMPLEXITY,
			max_query_size: DEFAULT_MAX_QUERY_SIZE,
		}
	}
}

/// Checks a query string against the size limit.
pub fn validate_query(query: &str, limits: &QueryLimits) -> GraphQLResult<()> {
	if query.len() > limits.max_query_size {
		return Err(GraphQLError::QueryTooLarge {
			size: query.len(),
			max: limits.max_query_size,
		});
	}
	Ok(())
}

/// Host-side registry of GraphQL types and root query fields.
pub struct SchemaRegistry {
	limits: QueryLimits,
	object_types: RwLock<Vec<(String, ObjectFactory)>>,
	root_fields: RwLock<Vec<(String, FieldFactory)>>,
}

impl SchemaRegistry {
	/// Creates an empty registry with default query limits.
	pub fn new() -> Self {
		Self::with_limits(QueryLimits::default())
	}

	/// Creates an empty registry with custom query limits.
	pub fn with_limits(limits: QueryLimits) -> Self {
		Self {
			limits,
			object_types: RwLock::new(Vec::new()),
			root_fields: RwLock::new(Vec::new()),
		}
	}

	/// Query limits applied to built schemas.
	pub fn limits(&self) -> &QueryLimits {
		&self.limits
	}

	/// Registers an object type, replacing any type with the same name.
	pub fn register_object_type<F>(&self, name: impl Into<String>, factory: F)
	where
		F: Fn() -> Object + Send + Sync + 'static,
	{
		upsert(&self.object_types, name.into(), Arc::new(factory), "type");
	}

	/// Registers a root query field, replacing any field with the same name.
	pub fn register_field<F>(&self, name: impl Into<String>, factory: F)
	where
		F: Fn() -> Field + Send + Sync + 'static,
	{
		upsert(&self.root_fields, name.into(), Arc::new(factory), "field");
	}

	/// Whether an object type with this name is registered.
	pub fn has_type(&self, name: &str) -> bool {
		self.object_types.read().iter().any(|(n, _)| n == name)
	}

	/// Whether a root query field with this name is registered.
	pub fn has_root_field(&self, name: &str) -> bool {
		self.root_fields.read().iter().any(|(n, _)| n == name)
	}

	/// Names of the registered root query fields, in registration order.
	pub fn root_field_names(&self) -> Vec<String> {
		self.root_fields
			.read()
			.iter()
			.map(|(name, _)| name.clone())
			.collect()
	}

	/// Number of registered object types.
	pub fn type_count(&self) -> usize {
		self.object_types.read().len()
	}

	/// Builds an executable schema from the registered types and fields.
	pub fn build(&self) -> GraphQLResult<Schema> {
		let mut root = Object::new(ROOT_QUERY);
		for (_, factory) in self.root_fields.read().iter() {
			root = root.field(factory());
		}

		let mut builder = Schema::build(ROOT_QUERY, None, None).register(root);
		for (_, factory) in self.object_types.read().iter() {
			builder = builder.register(factory());
		}

		builder
			.limit_depth(self.limits.max_depth)
			.limit_complexity(self.limits.max_complexity)
			.extension(Analyzer)
			.finish()
			.map_err(|e| GraphQLError::Schema(e.to_string()))
	}

	/// Checks the query size, then builds the schema and runs the request.
	///
	/// Oversized queries are rejected before any schema is built.
	pub async fn execute(&self, request: impl Into<Request>) -> GraphQLResult<Response> {
		let request = request.into();
		validate_query(&request.query, &self.limits)?;
		let schema = self.build()?;
		Ok(schema.execute(request).await)
	}
}

impl Default for SchemaRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for SchemaRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SchemaRegistry")
			.field("limits", &self.limits)
			.field(
				"object_types",
				&self
					.object_types
					.read()
					.iter()
					.map(|(n, _)| n.clone())
					.collect::<Vec<_>>(),
			)
			.field("root_fields", &self.root_field_names())
			.finish()
	}
}

fn upsert<T>(entries: &RwLock<Vec<(String, T)>>, name: String, value: T, kind: &str) {
	let mut entries = entries.write();
	match entries.iter_mut().find(|(n, _)| *n == name) {
		Some(entry) => {
			tracing::debug!("replacing registered GraphQL {} '{}'", kind, name);
			entry.1 = value;
		}
		None => entries.push((name, value)),
	}
}
