//! Plugin descriptor and lifecycle hook.

use crate::availability::{check_context, report_missing};
use crate::context::HostContext;
use crate::error::{Dependency, ExtensionResult};
use crate::schema;
use crate::settings::ExtensionSettings;
use semver::Version;

/// Plugin identifier.
pub const PLUGIN_NAME: &str = "redirection-graphql";

/// Plugin metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
	/// Unique plugin identifier.
	pub name: String,
	/// Plugin version following Semantic Versioning 2.0.0.
	pub version: Version,
	/// Human-readable description of the plugin.
	pub description: String,
	/// Plugin author(s).
	pub authors: Vec<String>,
	/// License identifier (SPDX format).
	pub license: String,
	/// Capabilities required from other plugins.
	pub requires: Vec<Dependency>,
}

/// Result of the plugins-loaded hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
	/// The `Redirect` type and `redirects` field were registered.
	Registered,
	/// A dependency was missing; nothing was registered.
	Skipped(Dependency),
}

/// Exposes redirects through the GraphQL schema registry.
#[derive(Debug, Clone)]
pub struct RedirectionGraphqlPlugin {
	metadata: PluginMetadata,
}

impl RedirectionGraphqlPlugin {
	pub fn new() -> Self {
		Self {
			metadata: PluginMetadata {
				name: PLUGIN_NAME.to_string(),
				version: Version::new(0, 9, 0),
				description: "Expose redirects set up in the redirect provider to the GraphQL API"
					.to_string(),
				authors: vec!["urbaninsight".to_string(), "bcupham".to_string()],
				license: "GPL-2.0-or-later".to_string(),
				requires: Dependency::ALL.to_vec(),
			},
		}
	}

	pub fn metadata(&self) -> &PluginMetadata {
		&self.metadata
	}

	/// Runs once the host has loaded its plugins.
	///
	/// When both the schema registry and the redirect source are present the
	/// `Redirect` type and `redirects` field are registered. Otherwise the
	/// missing dependency is reported to administrators and the hook returns
	/// [`LoadOutcome::Skipped`].
	pub fn on_plugins_loaded(&self, ctx: &HostContext) -> ExtensionResult<LoadOutcome> {
		let settings = ExtensionSettings::from_context(ctx)?;

		match check_context(ctx) {
			Ok((registry, source)) => {
				schema::register(&registry, source.provider());
				tracing::info!(
					plugin = %self.metadata.name,
					version = %self.metadata.version,
					"registered {} field",
					schema::REDIRECTS_FIELD
				);
				Ok(LoadOutcome::Registered)
			}
			Err(dependency) => {
				tracing::warn!(
					plugin = %self.metadata.name,
					"{} is not available, redirects will not be exposed",
					dependency
				);
				report_missing(ctx, dependency, &settings);
				Ok(LoadOutcome::Skipped(dependency))
			}
		}
	}
}

impl Default for RedirectionGraphqlPlugin {
	fn default() -> Self {
		Self::new()
	}
}
