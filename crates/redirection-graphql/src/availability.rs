//! Dependency gate run when plugins have loaded.

use crate::context::HostContext;
use crate::error::Dependency;
use crate::notice::Notice;
use crate::provider::RedirectSource;
use crate::registry::SchemaRegistry;
use crate::settings::ExtensionSettings;
use std::sync::Arc;

/// Checks that both capabilities are present.
///
/// The schema registry is checked first; the first missing capability is
/// returned.
///
/// # Examples
///
/// ```
/// use redirection_graphql::availability::check_availability;
/// use redirection_graphql::error::Dependency;
/// use redirection_graphql::registry::SchemaRegistry;
///
/// let registry = SchemaRegistry::new();
/// assert_eq!(check_availability(None, None), Err(Dependency::GraphQL));
/// assert_eq!(
///     check_availability(Some(&registry), None),
///     Err(Dependency::Redirection)
/// );
/// ```
pub fn check_availability(
	registry: Option<&SchemaRegistry>,
	provider: Option<&RedirectSource>,
) -> Result<(), Dependency> {
	if registry.is_none() {
		return Err(Dependency::GraphQL);
	}
	if provider.is_none() {
		return Err(Dependency::Redirection);
	}
	Ok(())
}

/// Looks both capabilities up in the host context.
///
/// Returns the handles when both are registered, otherwise the first
/// missing dependency. The provider is not looked up when the registry is
/// missing.
pub fn check_context(
	ctx: &HostContext,
) -> Result<(Arc<SchemaRegistry>, Arc<RedirectSource>), Dependency> {
	let registry = ctx
		.get_service::<SchemaRegistry>()
		.ok_or(Dependency::GraphQL)?;
	let source = ctx
		.get_service::<RedirectSource>()
		.ok_or(Dependency::Redirection)?;
	Ok((registry, source))
}

/// Notice shown when `dependency` is missing.
pub fn missing_dependency_notice(dependency: Dependency) -> Notice {
	Notice::error(format!(
		"{} plugin must be active for the Redirection GraphQL extension to work.",
		dependency
	))
}

/// Queues the missing-dependency notice for administrators.
///
/// Returns whether a notice was queued. Users without the configured
/// administrative capability get nothing.
pub fn report_missing(
	ctx: &HostContext,
	dependency: Dependency,
	settings: &ExtensionSettings,
) -> bool {
	if !settings.admin_notices || !ctx.current_user().can(&settings.admin_capability) {
		return false;
	}
	ctx.notices().add(missing_dependency_notice(dependency));
	true
}
