//! Extension settings.
//!
//! Settings live in the extension's section of the host configuration:
//!
//! ```toml
//! [plugin_config.redirection-graphql]
//! admin_capability = "manage_options"
//! admin_notices = true
//! ```

use crate::context::{HostContext, MANAGE_OPTIONS};
use crate::error::ExtensionResult;
use serde::Deserialize;

/// Settings controlling how the extension reports problems.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionSettings {
	/// Capability a user needs to see admin notices.
	pub admin_capability: String,
	/// Whether admin notices are queued at all.
	pub admin_notices: bool,
}

impl Default for ExtensionSettings {
	fn default() -> Self {
		Self {
			admin_capability: MANAGE_OPTIONS.to_string(),
			admin_notices: true,
		}
	}
}

impl ExtensionSettings {
	/// Parses settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use redirection_graphql::settings::ExtensionSettings;
	///
	/// let settings = ExtensionSettings::from_toml_str("admin_notices = false").unwrap();
	/// assert!(!settings.admin_notices);
	/// assert_eq!(settings.admin_capability, "manage_options");
	/// ```
	pub fn from_toml_str(source: &str) -> ExtensionResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from the host context's configuration table.
	pub fn from_context(ctx: &HostContext) -> ExtensionResult<Self> {
		Ok(toml::Value::Table(ctx.config_table()).try_into()?)
	}
}
