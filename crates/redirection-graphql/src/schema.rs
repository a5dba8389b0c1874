//! `Redirect` type and `redirects` root field.

use crate::error::ProviderResult;
use crate::provider::RedirectProvider;
use crate::registry::SchemaRegistry;
use crate::types::{FieldDef, REDIRECT_FIELDS, Redirect};
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, TypeRef};
use std::sync::Arc;

/// Name of the redirect object type.
pub const REDIRECT_TYPE: &str = "Redirect";

/// Name of the root query field.
pub const REDIRECTS_FIELD: &str = "redirects";

/// Arguments of the `redirects` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectsArgs {
	/// Restrict the result to the redirect with this id.
	pub id: Option<String>,
}

impl RedirectsArgs {
	/// Arguments selecting a single redirect.
	pub fn by_id(id: impl Into<String>) -> Self {
		Self { id: Some(id.into()) }
	}
}

/// Resolves the `redirects` field.
///
/// With an id, returns at most that one redirect. The id is read up to its
/// first non-digit, so `"5abc"` selects redirect 5; an id that is unknown or
/// has no leading digits yields an empty list. Without an id, returns every
/// redirect in the order the provider returns them.
pub fn resolve_redirects(
	provider: &dyn RedirectProvider,
	args: &RedirectsArgs,
) -> ProviderResult<Vec<Redirect>> {
	let records = match args.id.as_deref() {
		Some(id) => match parse_id(id) {
			Some(id) => provider.get_by_id(id)?.into_iter().collect(),
			None => Vec::new(),
		},
		None => provider.get_all()?,
	};

	let redirects: Vec<Redirect> = records.iter().map(Redirect::from_record).collect();
	tracing::debug!(id = ?args.id, count = redirects.len(), "resolved redirects");
	Ok(redirects)
}

/// Leading integer of `id`, after whitespace and an optional `+`.
fn parse_id(id: &str) -> Option<u64> {
	let id = id.trim_start();
	let id = id.strip_prefix('+').unwrap_or(id);
	let end = id.find(|c: char| !c.is_ascii_digit()).unwrap_or(id.len());
	id[..end].parse().ok()
}

/// Registers the `Redirect` type and the `redirects` root field.
///
/// Safe to call more than once; later calls replace the earlier
/// registrations.
pub fn register(registry: &SchemaRegistry, provider: Arc<dyn RedirectProvider>) {
	registry.register_object_type(REDIRECT_TYPE, redirect_object);
	registry.register_field(REDIRECTS_FIELD, move || {
		redirects_field(Arc::clone(&provider))
	});
}

fn redirect_object() -> Object {
	REDIRECT_FIELDS.iter().fold(
		Object::new(REDIRECT_TYPE).description("Redirection 301 redirects"),
		|object, def| object.field(redirect_field(def)),
	)
}

fn redirect_field(def: &'static FieldDef) -> Field {
	let name = def.name;
	Field::new(name, def.ty.type_ref(), move |ctx| {
		FieldFuture::new(async move {
			let redirect = ctx.parent_value.try_downcast_ref::<Redirect>()?;
			Ok(redirect.field_value(name))
		})
	})
	.description(def.description)
}

fn redirects_field(provider: Arc<dyn RedirectProvider>) -> Field {
	Field::new(
		REDIRECTS_FIELD,
		TypeRef::named_list(REDIRECT_TYPE),
		move |ctx| {
			let provider = Arc::clone(&provider);
			FieldFuture::new(async move {
				let id = match ctx.args.get("id") {
					Some(value) if !value.is_null() => Some(value.string()?.to_string()),
					_ => None,
				};
				let redirects = resolve_redirects(provider.as_ref(), &RedirectsArgs { id })?;
				Ok(Some(FieldValue::list(
					redirects.into_iter().map(FieldValue::owned_any),
				)))
			})
		},
	)
	.description("Return list of redirects from the redirect provider")
	.argument(
		InputValue::new("id", TypeRef::named(TypeRef::STRING)).description("The ID of the redirect"),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ProviderError;
	use crate::provider::InMemoryRedirectProvider;
	use crate::record::{ActionData, QueryMatch, RedirectRecord};
	use rstest::*;

	struct FailingProvider;

	impl RedirectProvider for FailingProvider {
		fn get_by_id(&self, _id: u64) -> ProviderResult<Option<RedirectRecord>> {
			Err(ProviderError::Unavailable("connection reset".to_string()))
		}

		fn get_all(&self) -> ProviderResult<Vec<RedirectRecord>> {
			Err(ProviderError::Unavailable("connection reset".to_string()))
		}
	}

	#[fixture]
	fn provider() -> InMemoryRedirectProvider {
		let mut conditional = RedirectRecord::new(5, "/members", "");
		conditional.match_type = "login".to_string();
		conditional.action_data = ActionData::Conditional {
			url_from: "/dashboard".to_string(),
			url_notfrom: "/login".to_string(),
		};

		InMemoryRedirectProvider::with_records([
			RedirectRecord::new(9, "/z", "/z2"),
			conditional,
			RedirectRecord::new(2, "/b", "/b2"),
		])
	}

	#[rstest]
	fn test_resolve_empty_provider() {
		let provider = InMemoryRedirectProvider::new();

		let redirects = resolve_redirects(&provider, &RedirectsArgs::default()).unwrap();

		assert!(redirects.is_empty());
	}

	#[rstest]
	fn test_resolve_all_preserves_provider_order(provider: InMemoryRedirectProvider) {
		let redirects = resolve_redirects(&provider, &RedirectsArgs::default()).unwrap();

		let ids: Vec<u64> = redirects.iter().map(|r| r.id).collect();
		assert_eq!(ids, vec![9, 5, 2]);
	}

	#[rstest]
	fn test_resolve_by_id_uses_computed_action_data(provider: InMemoryRedirectProvider) {
		// Act
		let redirects = resolve_redirects(&provider, &RedirectsArgs::by_id("5")).unwrap();

		// Assert
		assert_eq!(redirects.len(), 1);
		let record = provider.get_by_id(5).unwrap().unwrap();
		assert_eq!(redirects[0].action_data, record.action_data());
		assert_ne!(
			serde_json::Value::String(redirects[0].action_data.clone()),
			record.to_json()["action_data"]
		);
	}

	#[rstest]
	#[case("999")]
	#[case("abc")]
	#[case("-1")]
	#[case("")]
	fn test_resolve_unknown_id_is_empty(provider: InMemoryRedirectProvider, #[case] id: &str) {
		let redirects = resolve_redirects(&provider, &RedirectsArgs::by_id(id)).unwrap();
		assert!(redirects.is_empty());
	}

	#[rstest]
	#[case("5", Some(5))]
	#[case(" 5 ", Some(5))]
	#[case("+5", Some(5))]
	#[case("5abc", Some(5))]
	#[case("12.7", Some(12))]
	#[case("abc", None)]
	#[case("-1", None)]
	#[case("", None)]
	#[case("99999999999999999999999", None)]
	fn test_parse_id(#[case] id: &str, #[case] expected: Option<u64>) {
		assert_eq!(parse_id(id), expected);
	}

	#[rstest]
	fn test_resolve_id_with_trailing_text(provider: InMemoryRedirectProvider) {
		let redirects = resolve_redirects(&provider, &RedirectsArgs::by_id("5abc")).unwrap();

		let ids: Vec<u64> = redirects.iter().map(|r| r.id).collect();
		assert_eq!(ids, vec![5]);
	}

	#[rstest]
	fn test_flags_come_from_match_data(provider: InMemoryRedirectProvider) {
		// Arrange: top-level regex disagrees with the nested source flag
		let mut record = RedirectRecord::new(11, "^/blog/(.*)$", "/news/$1");
		record.regex = false;
		record.match_data.source.flag_regex = true;
		record.match_data.source.flag_query = QueryMatch::Pass;
		provider.insert(record);

		// Act
		let redirects = resolve_redirects(&provider, &RedirectsArgs::by_id("11")).unwrap();

		// Assert
		assert!(redirects[0].flag_regex);
		assert!(!redirects[0].regex);
		assert_eq!(redirects[0].flag_query, QueryMatch::Pass);
	}

	#[rstest]
	fn test_provider_errors_propagate() {
		assert!(resolve_redirects(&FailingProvider, &RedirectsArgs::default()).is_err());
		assert!(resolve_redirects(&FailingProvider, &RedirectsArgs::by_id("1")).is_err());
	}

	#[rstest]
	fn test_register_is_idempotent(provider: InMemoryRedirectProvider) {
		// Arrange
		let registry = SchemaRegistry::new();
		let shared: Arc<dyn RedirectProvider> = Arc::new(provider);

		// Act
		register(&registry, Arc::clone(&shared));
		register(&registry, shared);

		// Assert
		assert_eq!(registry.type_count(), 1);
		assert_eq!(registry.root_field_names(), vec![REDIRECTS_FIELD.to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_schema_resolves_redirects(provider: InMemoryRedirectProvider) {
		// Arrange
		let registry = SchemaRegistry::new();
		register(&registry, Arc::new(provider));
		let schema = registry.build().unwrap();

		// Act
		let result = schema
			.execute(r#"{ redirects(id: "5") { id match_type action_data flag_query title } }"#)
			.await;

		// Assert
		assert!(result.errors.is_empty(), "{:?}", result.errors);
		let data = result.data.into_json().unwrap();
		let redirect = &data["redirects"][0];
		assert_eq!(redirect["id"], 5);
		assert_eq!(redirect["match_type"], "login");
		assert_eq!(redirect["flag_query"], "exact");
		assert!(redirect["title"].is_null());
		assert!(redirect["action_data"].as_str().unwrap().contains("/dashboard"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_schema_reports_provider_failure() {
		let registry = SchemaRegistry::new();
		register(&registry, Arc::new(FailingProvider));
		let schema = registry.build().unwrap();

		let result = schema.execute("{ redirects { id } }").await;

		assert_eq!(result.errors.len(), 1);
		assert!(result.errors[0].message.contains("connection reset"));
	}
}
