//! Redirection GraphQL extension
//!
//! Republishes redirect rules held by a redirect provider as a `Redirect`
//! type and a `redirects(id: String): [Redirect]` root field in a GraphQL
//! schema registry. The extension is read-only: it never matches URLs,
//! stores records or issues redirects.
//!
//! # Quick Start
//!
//! ```
//! use redirection_graphql::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(SchemaRegistry::new());
//! let provider = InMemoryRedirectProvider::with_records([
//!     RedirectRecord::new(1, "/old-page", "/new-page"),
//! ]);
//!
//! let ctx = HostContext::builder()
//!     .service(registry.clone())
//!     .service(Arc::new(RedirectSource::new(provider)))
//!     .build();
//!
//! let outcome = RedirectionGraphqlPlugin::new().on_plugins_loaded(&ctx).unwrap();
//! assert_eq!(outcome, LoadOutcome::Registered);
//!
//! let schema = registry.build().unwrap();
//! ```
//!
//! When either the registry or the redirect source is missing the hook
//! returns [`plugin::LoadOutcome::Skipped`] and, for administrators, queues a
//! notice on the context's [`notice::NoticeBoard`].
//!
//! # Architecture
//!
//! ```text
//! HostContext ──► RedirectionGraphqlPlugin::on_plugins_loaded
//!                        │
//!                 availability gate ──(missing)──► NoticeBoard
//!                        │
//!                 schema::register ──► SchemaRegistry ──► dynamic Schema
//!                                                            │
//!                                   RedirectProvider ◄── redirects resolver
//! ```

pub mod availability;
pub mod context;
pub mod error;
pub mod notice;
pub mod plugin;
pub mod provider;
pub mod record;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod types;

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::availability::{check_availability, check_context, report_missing};
	pub use crate::context::{CurrentUser, HostContext, HostContextBuilder};
	pub use crate::error::{
		Dependency, ExtensionError, ExtensionResult, GraphQLError, ProviderError, ProviderResult,
	};
	pub use crate::notice::{Level, Notice, NoticeBoard};
	pub use crate::plugin::{LoadOutcome, PluginMetadata, RedirectionGraphqlPlugin};
	pub use crate::provider::{InMemoryRedirectProvider, RedirectProvider, RedirectSource};
	pub use crate::record::{ActionData, MatchData, QueryMatch, RedirectRecord, SourceFlags};
	pub use crate::registry::{QueryLimits, SchemaRegistry};
	pub use crate::schema::{RedirectsArgs, register, resolve_redirects};
	pub use crate::settings::ExtensionSettings;
	pub use crate::types::Redirect;
}
