//! One-time admin notices.
//!
//! Notices are queued while the extension loads and drained by the host when
//! it renders its administration screens.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
	Info,
	Warning,
	Error,
}

impl Level {
	/// CSS class used when rendering.
	pub fn tag(&self) -> &'static str {
		match self {
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Error => "error",
		}
	}
}

/// A single admin notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: Level,
	pub message: String,
}

impl Notice {
	pub fn new(level: Level, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(Level::Error, message)
	}

	/// Renders the notice as an admin-screen HTML fragment.
	///
	/// # Examples
	///
	/// ```
	/// use redirection_graphql::notice::Notice;
	///
	/// let html = Notice::error("Redirection <b>missing</b>").render_html();
	/// assert_eq!(
	///     html,
	///     "<div class=\"error notice\"><p>Redirection &lt;b&gt;missing&lt;/b&gt;</p></div>"
	/// );
	/// ```
	pub fn render_html(&self) -> String {
		format!(
			"<div class=\"{} notice\"><p>{}</p></div>",
			self.level.tag(),
			escape_html(&self.message)
		)
	}
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(ch),
		}
	}
	escaped
}

/// Shared queue of pending notices.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
	notices: Arc<Mutex<VecDeque<Notice>>>,
}

impl NoticeBoard {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a notice.
	pub fn add(&self, notice: Notice) {
		self.notices.lock().push_back(notice);
	}

	/// Removes and returns every pending notice.
	pub fn drain(&self) -> Vec<Notice> {
		self.notices.lock().drain(..).collect()
	}

	pub fn len(&self) -> usize {
		self.notices.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.notices.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_notices_are_one_time() {
		let board = NoticeBoard::new();

		board.add(Notice::error("first"));
		board.add(Notice::new(Level::Info, "second"));
		assert_eq!(board.len(), 2);

		let drained = board.drain();
		assert_eq!(drained.len(), 2);
		assert_eq!(drained[0].message, "first");
		assert!(board.is_empty());
	}

	#[rstest]
	fn test_clones_share_the_queue() {
		let board = NoticeBoard::new();
		let host_view = board.clone();

		board.add(Notice::new(Level::Warning, "check settings"));

		assert_eq!(host_view.len(), 1);
		assert_eq!(host_view.drain()[0].level, Level::Warning);
		assert!(board.is_empty());
	}

	#[rstest]
	#[case(Level::Error, "<div class=\"error notice\"><p>a &amp; b</p></div>")]
	#[case(Level::Warning, "<div class=\"warning notice\"><p>a &amp; b</p></div>")]
	fn test_render_html(#[case] level: Level, #[case] expected: &str) {
		assert_eq!(Notice::new(level, "a & b").render_html(), expected);
	}

	#[rstest]
	fn test_levels_are_ordered() {
		assert!(Level::Error > Level::Warning);
		assert!(Level::Info < Level::Warning);
	}
}
