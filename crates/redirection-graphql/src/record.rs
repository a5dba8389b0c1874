//! Redirect records as supplied by a redirect provider.
//!
//! Records are owned by the provider. This crate only reads them: the
//! default serialization, the computed action data and the nested match
//! configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the query string takes part in URL matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMatch {
	/// Query parameters must match exactly.
	#[default]
	Exact,
	/// Query parameters are ignored.
	Ignore,
	/// Query parameters are ignored and passed through to the target.
	Pass,
}

impl QueryMatch {
	/// Wire name of the flag.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Exact => "exact",
			Self::Ignore => "ignore",
			Self::Pass => "pass",
		}
	}
}

impl std::fmt::Display for QueryMatch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Source matching flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFlags {
	/// Query-string handling.
	pub flag_query: QueryMatch,
	/// Case-insensitive matching.
	pub flag_case: bool,
	/// Ignore trailing slashes.
	pub flag_trailing: bool,
	/// Source URL is a regular expression.
	pub flag_regex: bool,
}

/// Matching options that do not affect the source URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
	/// Matched requests are not written to the redirect log.
	pub log_exclude: bool,
}

/// Nested match configuration of a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchData {
	/// Flags applied to the source URL.
	pub source: SourceFlags,
	/// Other options.
	pub options: MatchOptions,
}

/// Stored action payload.
///
/// URL-style match types store the target directly. Conditional match types
/// (login state, referrer, user agent, ...) store a target for each outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionData {
	/// Target URL.
	Url(String),
	/// Targets for a conditional match.
	Conditional {
		/// Target when the condition matches.
		url_from: String,
		/// Target when the condition does not match.
		url_notfrom: String,
	},
	/// No payload.
	#[default]
	Empty,
}

/// A redirect rule as held by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectRecord {
	pub id: u64,
	pub url: String,
	pub match_url: String,
	pub match_type: String,
	#[serde(default)]
	pub match_data: MatchData,
	#[serde(default)]
	pub regex: bool,
	pub action_code: u16,
	pub action_type: String,
	#[serde(default)]
	pub action_data: ActionData,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub hits: u64,
	#[serde(default)]
	pub group_id: u64,
	#[serde(default)]
	pub position: u64,
	#[serde(default)]
	pub last_access: Option<DateTime<Utc>>,
	pub enabled: bool,
}

impl RedirectRecord {
	/// Creates an enabled 301 URL redirect from `url` to `target`.
	///
	/// # Examples
	///
	/// ```
	/// use redirection_graphql::record::RedirectRecord;
	///
	/// let record = RedirectRecord::new(1, "/old", "/new");
	/// assert_eq!(record.action_code, 301);
	/// assert_eq!(record.action_data(), "/new");
	/// ```
	pub fn new(id: u64, url: impl Into<String>, target: impl Into<String>) -> Self {
		let url = url.into();
		Self {
			id,
			match_url: url.clone(),
			url,
			match_type: "url".to_string(),
			match_data: MatchData::default(),
			regex: false,
			action_code: 301,
			action_type: "url".to_string(),
			action_data: ActionData::Url(target.into()),
			title: None,
			hits: 0,
			group_id: 1,
			position: 0,
			last_access: None,
			enabled: true,
		}
	}

	/// Default serialized form of the record.
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::json!({
			"id": self.id,
			"url": self.url,
			"match_url": self.match_url,
			"match_type": self.match_type,
			"match_data": self.match_data,
			"regex": self.regex,
			"action_code": self.action_code,
			"action_type": self.action_type,
			"action_data": self.action_data,
			"title": self.title,
			"hits": self.hits,
			"group_id": self.group_id,
			"position": self.position,
			"last_access": self.last_access,
			"enabled": self.enabled,
		})
	}

	/// Resolved action data.
	///
	/// Conditional payloads are returned JSON-encoded; an empty payload
	/// resolves to the empty string.
	pub fn action_data(&self) -> String {
		match &self.action_data {
			ActionData::Url(url) => url.clone(),
			ActionData::Conditional {
				url_from,
				url_notfrom,
			} => serde_json::json!({
				"url_from": url_from,
				"url_notfrom": url_notfrom,
			})
			.to_string(),
			ActionData::Empty => String::new(),
		}
	}

	/// Nested match configuration.
	pub fn match_data(&self) -> &MatchData {
		&self.match_data
	}
}
