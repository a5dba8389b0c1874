//! Host context for lifecycle hooks.
//!
//! The context is what the host hands to the extension when plugins have
//! loaded. It provides:
//! - services registered by other components (schema registry, redirect source)
//! - this extension's configuration table
//! - the user the request runs as
//! - the admin notice board

use crate::notice::NoticeBoard;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Capability that grants access to site settings.
pub const MANAGE_OPTIONS: &str = "manage_options";

/// The user on whose behalf the host runs the hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
	pub login: Option<String>,
	capabilities: HashSet<String>,
}

impl CurrentUser {
	/// A visitor with no capabilities.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// A logged-in user holding `capabilities`.
	pub fn new<I, S>(login: impl Into<String>, capabilities: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			login: Some(login.into()),
			capabilities: capabilities.into_iter().map(Into::into).collect(),
		}
	}

	/// A site administrator.
	pub fn administrator(login: impl Into<String>) -> Self {
		Self::new(login, [MANAGE_OPTIONS])
	}

	/// Whether the user holds `capability`.
	pub fn can(&self, capability: &str) -> bool {
		self.capabilities.contains(capability)
	}
}

/// Context passed to the extension by the host.
///
/// Cloning is cheap; clones share services, configuration and notices.
#[derive(Clone, Default)]
pub struct HostContext {
	/// Extension configuration values.
	config: Arc<RwLock<HashMap<String, toml::Value>>>,

	/// Type-erased services registry.
	services: Arc<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>,

	current_user: CurrentUser,

	notices: NoticeBoard,
}

impl HostContext {
	/// Creates an empty context for an anonymous user.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a context builder.
	pub fn builder() -> HostContextBuilder {
		HostContextBuilder::default()
	}

	/// The user the hook runs as.
	pub fn current_user(&self) -> &CurrentUser {
		&self.current_user
	}

	/// Pending admin notices.
	pub fn notices(&self) -> &NoticeBoard {
		&self.notices
	}

	/// Configuration as a TOML table.
	pub fn config_table(&self) -> toml::Table {
		self.config
			.read()
			.iter()
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect()
	}

	/// Registers a service in the context.
	///
	/// Services are stored by their type; registering the same type again
	/// replaces the previous instance.
	pub fn register_service<T: Any + Send + Sync>(&self, service: Arc<T>) {
		let type_id = TypeId::of::<T>();
		self.services.write().insert(type_id, service);
	}

	/// Gets a registered service by type.
	pub fn get_service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		let type_id = TypeId::of::<T>();
		self.services
			.read()
			.get(&type_id)
			.and_then(|service| service.clone().downcast::<T>().ok())
	}
}

/// Builder for HostContext.
#[derive(Default)]
pub struct HostContextBuilder {
	config: HashMap<String, toml::Value>,
	services: Vec<(TypeId, Arc<dyn Any + Send + Sync>)>,
	current_user: CurrentUser,
	notices: Option<NoticeBoard>,
}

impl HostContextBuilder {
	/// Adds a configuration value.
	pub fn config(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
		self.config.insert(key.into(), value.into());
		self
	}

	/// Adds a service.
	pub fn service<T: Any + Send + Sync>(mut self, service: Arc<T>) -> Self {
		let service: Arc<dyn Any + Send + Sync> = service;
		self.services.push((TypeId::of::<T>(), service));
		self
	}

	/// Sets the current user.
	pub fn user(mut self, user: CurrentUser) -> Self {
		self.current_user = user;
		self
	}

	/// Uses an existing notice board instead of a fresh one.
	pub fn notices(mut self, notices: NoticeBoard) -> Self {
		self.notices = Some(notices);
		self
	}

	/// Builds the HostContext.
	pub fn build(self) -> HostContext {
		HostContext {
			config: Arc::new(RwLock::new(self.config)),
			services: Arc::new(RwLock::new(self.services.into_iter().collect())),
			current_user: self.current_user,
			notices: self.notices.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, PartialEq)]
	struct Clock(u32);

	#[rstest]
	fn test_service_registration_replaces_by_type() {
		let ctx = HostContext::new();
		assert!(ctx.get_service::<Clock>().is_none());

		ctx.register_service(Arc::new(Clock(3)));
		ctx.register_service(Arc::new(Clock(4)));

		assert_eq!(ctx.get_service::<Clock>().as_deref(), Some(&Clock(4)));
	}

	#[rstest]
	fn test_builder() {
		let ctx = HostContext::builder()
			.config("admin_notices", false)
			.service(Arc::new(Clock(1)))
			.user(CurrentUser::administrator("admin"))
			.build();

		assert_eq!(
			ctx.config_table().get("admin_notices"),
			Some(&toml::Value::Boolean(false))
		);
		assert_eq!(ctx.get_service::<Clock>().as_deref(), Some(&Clock(1)));
		assert!(ctx.current_user().can(MANAGE_OPTIONS));
		assert_eq!(ctx.config_table().len(), 1);
	}

	#[rstest]
	fn test_clones_share_services() {
		let ctx = HostContext::new();
		let clone = ctx.clone();

		ctx.register_service(Arc::new(Clock(7)));

		assert!(clone.get_service::<Clock>().is_some());
	}

	#[rstest]
	#[case(CurrentUser::anonymous(), false)]
	#[case(CurrentUser::new("editor", ["edit_posts"]), false)]
	#[case(CurrentUser::administrator("admin"), true)]
	fn test_user_capabilities(#[case] user: CurrentUser, #[case] can_manage: bool) {
		assert_eq!(user.can(MANAGE_OPTIONS), can_manage);
	}
}
