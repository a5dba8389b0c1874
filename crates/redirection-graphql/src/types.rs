//! GraphQL type definitions

use crate::record::{QueryMatch, RedirectRecord};
use async_graphql::Value;
use async_graphql::dynamic::TypeRef;
use serde::Serialize;

/// Format used for `last_access` in responses.
pub const LAST_ACCESS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Primitive GraphQL types a registered field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
	Integer,
	String,
	Boolean,
}

impl ScalarType {
	/// Name of the scalar in the schema.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Integer => TypeRef::INT,
			Self::String => TypeRef::STRING,
			Self::Boolean => TypeRef::BOOLEAN,
		}
	}

	/// Nullable type reference for this scalar.
	pub fn type_ref(&self) -> TypeRef {
		TypeRef::named(self.type_name())
	}
}

/// Static declaration of an object field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
	pub name: &'static str,
	pub ty: ScalarType,
	pub description: &'static str,
}

const fn field(name: &'static str, ty: ScalarType, description: &'static str) -> FieldDef {
	FieldDef {
		name,
		ty,
		description,
	}
}

/// Fields of the `Redirect` object type, in declaration order.
pub const REDIRECT_FIELDS: &[FieldDef] = &[
	field("id", ScalarType::Integer, "Redirect ID"),
	field("url", ScalarType::String, "Source URL"),
	field("match_url", ScalarType::String, "Match URL"),
	field(
		"flag_query",
		ScalarType::String,
		"Which query parameter matching to use. Allowed values: \"ignore\", \"exact\", \"pass\"",
	),
	field(
		"flag_case",
		ScalarType::Boolean,
		"true for case insensitive matches, false otherwise",
	),
	field(
		"flag_trailing",
		ScalarType::Boolean,
		"true to ignore trailing slashes, false otherwise",
	),
	field(
		"flag_regex",
		ScalarType::Boolean,
		"true for regular expression in the source URL string, false otherwise",
	),
	field("action_code", ScalarType::String, "The HTTP code to return"),
	field(
		"action_type",
		ScalarType::String,
		"What to do when the URL is matched",
	),
	field(
		"action_data",
		ScalarType::String,
		"Any data associated with the action_type. For example, the target URL",
	),
	field("match_type", ScalarType::String, "What URL matching to use"),
	field("title", ScalarType::String, "Optional redirect title"),
	field("hits", ScalarType::Integer, "Number of hits"),
	field("regex", ScalarType::Boolean, "Whether the redirect uses regex"),
	field("group_id", ScalarType::Integer, "Redirects group"),
	field(
		"position",
		ScalarType::Integer,
		"Position in the redirect list, for determining precedence",
	),
	field("last_access", ScalarType::String, "Date last accessed"),
	field("enabled", ScalarType::Boolean, "Whether redirect is enabled"),
];

/// A redirect as exposed through GraphQL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Redirect {
	pub id: u64,
	pub url: String,
	pub match_url: String,
	pub match_type: String,
	pub flag_query: QueryMatch,
	pub flag_case: bool,
	pub flag_trailing: bool,
	pub flag_regex: bool,
	pub action_code: String,
	pub action_type: String,
	pub action_data: String,
	pub title: Option<String>,
	pub hits: u64,
	pub regex: bool,
	pub group_id: u64,
	pub position: u64,
	pub last_access: Option<String>,
	pub enabled: bool,
}

impl Redirect {
	/// Builds the output for `record`.
	///
	/// `action_data` comes from the record's resolved action data and the
	/// four flags from the `source` entry of its match configuration.
	pub fn from_record(record: &RedirectRecord) -> Self {
		let source = &record.match_data().source;
		Self {
			id: record.id,
			url: record.url.clone(),
			match_url: record.match_url.clone(),
			match_type: record.match_type.clone(),
			flag_query: source.flag_query,
			flag_case: source.flag_case,
			flag_trailing: source.flag_trailing,
			flag_regex: source.flag_regex,
			action_code: record.action_code.to_string(),
			action_type: record.action_type.clone(),
			action_data: record.action_data(),
			title: record.title.clone(),
			hits: record.hits,
			regex: record.regex,
			group_id: record.group_id,
			position: record.position,
			last_access: record
				.last_access
				.map(|at| at.format(LAST_ACCESS_FORMAT).to_string()),
			enabled: record.enabled,
		}
	}

	/// Value of a `Redirect` field by schema name. `None` for null or
	/// unknown fields.
	///
	/// `Int` fields saturate at `i32::MAX`.
	pub fn field_value(&self, name: &str) -> Option<Value> {
		let value = match name {
			"id" => Value::from(graphql_int(self.id)),
			"url" => Value::from(self.url.as_str()),
			"match_url" => Value::from(self.match_url.as_str()),
			"match_type" => Value::from(self.match_type.as_str()),
			"flag_query" => Value::from(self.flag_query.as_str()),
			"flag_case" => Value::from(self.flag_case),
			"flag_trailing" => Value::from(self.flag_trailing),
			"flag_regex" => Value::from(self.flag_regex),
			"action_code" => Value::from(self.action_code.as_str()),
			"action_type" => Value::from(self.action_type.as_str()),
			"action_data" => Value::from(self.action_data.as_str()),
			"title" => Value::from(self.title.as_deref()?),
			"hits" => Value::from(graphql_int(self.hits)),
			"regex" => Value::from(self.regex),
			"group_id" => Value::from(graphql_int(self.group_id)),
			"position" => Value::from(graphql_int(self.position)),
			"last_access" => Value::from(self.last_access.as_deref()?),
			"enabled" => Value::from(self.enabled),
			_ => return None,
		};
		Some(value)
	}
}

/// Clamps a counter into the range of the GraphQL `Int` scalar.
fn graphql_int(value: u64) -> i32 {
	i32::try_from(value).unwrap_or(i32::MAX)
}
