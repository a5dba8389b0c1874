//! Redirect data providers.
//!
//! The provider is an external collaborator: it owns the redirect rules and
//! their ordering. Hosts hand one to the extension wrapped in a
//! [`RedirectSource`] service.

use crate::error::ProviderResult;
use crate::record::RedirectRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Read access to redirect records.
///
/// # Examples
///
/// ```
/// use redirection_graphql::error::ProviderResult;
/// use redirection_graphql::provider::RedirectProvider;
/// use redirection_graphql::record::RedirectRecord;
///
/// struct Fixed(Vec<RedirectRecord>);
///
/// impl RedirectProvider for Fixed {
///     fn get_by_id(&self, id: u64) -> ProviderResult<Option<RedirectRecord>> {
///         Ok(self.0.iter().find(|r| r.id == id).cloned())
///     }
///
///     fn get_all(&self) -> ProviderResult<Vec<RedirectRecord>> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait RedirectProvider: Send + Sync + 'static {
	/// Fetch a single record. `Ok(None)` when no record has this id.
	fn get_by_id(&self, id: u64) -> ProviderResult<Option<RedirectRecord>>;

	/// Fetch every record, in the provider's order.
	fn get_all(&self) -> ProviderResult<Vec<RedirectRecord>>;
}

impl<P: RedirectProvider + ?Sized> RedirectProvider for Arc<P> {
	fn get_by_id(&self, id: u64) -> ProviderResult<Option<RedirectRecord>> {
		(**self).get_by_id(id)
	}

	fn get_all(&self) -> ProviderResult<Vec<RedirectRecord>> {
		(**self).get_all()
	}
}

/// Redirect provider service registered in the host context.
#[derive(Clone)]
pub struct RedirectSource {
	provider: Arc<dyn RedirectProvider>,
}

impl RedirectSource {
	/// Wraps a provider.
	pub fn new(provider: impl RedirectProvider) -> Self {
		Self {
			provider: Arc::new(provider),
		}
	}

	/// Wraps an already shared provider.
	pub fn from_arc(provider: Arc<dyn RedirectProvider>) -> Self {
		Self { provider }
	}

	/// Shared handle to the provider.
	pub fn provider(&self) -> Arc<dyn RedirectProvider> {
		Arc::clone(&self.provider)
	}
}

impl std::fmt::Debug for RedirectSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RedirectSource").finish_non_exhaustive()
	}
}

/// In-memory provider that keeps records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRedirectProvider {
	records: RwLock<Vec<RedirectRecord>>,
}

impl InMemoryRedirectProvider {
	/// Creates an empty provider.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a provider holding `records` in the given order.
	pub fn with_records(records: impl IntoIterator<Item = RedirectRecord>) -> Self {
		let provider = Self::new();
		for record in records {
			provider.insert(record);
		}
		provider
	}

	/// Adds a record, or replaces the record with the same id in place.
	pub fn insert(&self, record: RedirectRecord) {
		let mut records = self.records.write();
		match records.iter_mut().find(|r| r.id == record.id) {
			Some(existing) => *existing = record,
			None => records.push(record),
		}
	}

	/// Removes a record, returning it if it existed.
	pub fn remove(&self, id: u64) -> Option<RedirectRecord> {
		let mut records = self.records.write();
		let index = records.iter().position(|r| r.id == id)?;
		Some(records.remove(index))
	}

	/// Number of records held.
	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	/// Whether the provider holds no records.
	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}
}

impl RedirectProvider for InMemoryRedirectProvider {
	fn get_by_id(&self, id: u64) -> ProviderResult<Option<RedirectRecord>> {
		Ok(self.records.read().iter().find(|r| r.id == id).cloned())
	}

	fn get_all(&self) -> ProviderResult<Vec<RedirectRecord>> {
		Ok(self.records.read().clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[fixture]
	fn provider() -> InMemoryRedirectProvider {
		InMemoryRedirectProvider::with_records([
			RedirectRecord::new(3, "/c", "/c2"),
			RedirectRecord::new(1, "/a", "/a2"),
			RedirectRecord::new(2, "/b", "/b2"),
		])
	}

	#[rstest]
	fn test_get_all_keeps_insertion_order(provider: InMemoryRedirectProvider) {
		let ids: Vec<u64> = provider.get_all().unwrap().iter().map(|r| r.id).collect();
		assert_eq!(ids, vec![3, 1, 2]);
	}

	#[rstest]
	fn test_get_by_id(provider: InMemoryRedirectProvider) {
		let record = provider.get_by_id(1).unwrap().unwrap();
		assert_eq!(record.url, "/a");
		assert!(provider.get_by_id(99).unwrap().is_none());
	}

	#[rstest]
	fn test_insert_replaces_in_place(provider: InMemoryRedirectProvider) {
		// Arrange
		let mut updated = RedirectRecord::new(1, "/a", "/elsewhere");
		updated.hits = 10;

		// Act
		provider.insert(updated);

		// Assert
		let records = provider.get_all().unwrap();
		assert_eq!(records.len(), 3);
		assert_eq!(records[1].id, 1);
		assert_eq!(records[1].action_data(), "/elsewhere");
		assert_eq!(records[1].hits, 10);
	}

	#[rstest]
	fn test_remove(provider: InMemoryRedirectProvider) {
		assert_eq!(provider.remove(3).map(|r| r.url), Some("/c".to_string()));
		assert_eq!(provider.remove(3), None);
		assert_eq!(provider.len(), 2);
	}

	#[rstest]
	fn test_source_shares_provider() {
		// Arrange
		let shared = Arc::new(InMemoryRedirectProvider::new());
		let source = RedirectSource::from_arc(shared.clone());

		// Act
		shared.insert(RedirectRecord::new(5, "/five", "/5"));

		// Assert
		assert_eq!(source.provider().get_all().unwrap().len(), 1);
		assert!(!shared.is_empty());
	}
}
