/*!
# HTMincer: Minification.

The [`Minifier`] ties everything together: the source is parsed into a
tree, the tree is rewritten by a series of passes, and the result is
serialized back into a string.
*/

mod attribute;
mod content;
mod document;
mod omission;
mod whitespace;

use crate::{
	CssMinifier,
	Diagnostic,
	diagnostic::Diagnostics,
	dom::{
		self,
		Node,
	},
	JsMinifier,
	JsonMinifier,
	LightningCssMinifier,
	NullJsMinifier,
	pool::BufferPool,
	ser,
	Settings,
};
use std::{
	fmt,
	sync::Arc,
	time::{
		Duration,
		Instant,
	},
};



#[derive(Clone)]
/// # Minifier.
///
/// A minifier couples immutable [`Settings`] with the CSS, JS, and JSON
/// delegates used for embedded code. It is `Send + Sync`; a single instance
/// can be shared freely between threads.
///
/// By default, CSS is handled by [`LightningCssMinifier`], JSON by
/// [`JsonMinifier`], and JavaScript is passed through unchanged
/// ([`NullJsMinifier`]).
///
/// ## Examples
///
/// ```
/// use htmincer::Minifier;
///
/// let res = Minifier::default().minify("<p id=\"\" class=\"\">Hello  World</p>");
/// assert_eq!(res.minified_content, "<p>Hello World");
/// assert!(res.warnings.is_empty());
/// assert!(res.errors.is_empty());
/// ```
pub struct Minifier {
	/// # Settings.
	settings: Settings,

	/// # CSS Delegate.
	css: Arc<dyn CssMinifier>,

	/// # JS Delegate.
	js: Arc<dyn JsMinifier>,

	/// # JSON Delegate.
	json: Arc<dyn JsMinifier>,

	/// # Scratch Buffers.
	pool: Arc<BufferPool>,
}

impl Default for Minifier {
	#[inline]
	fn default() -> Self { Self::new(Settings::default()) }
}

impl fmt::Debug for Minifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Minifier")
			.field("settings", &self.settings)
			.field("pool", &self.pool)
			.finish_non_exhaustive()
	}
}

impl Minifier {
	#[must_use]
	/// # New.
	pub fn new(settings: Settings) -> Self {
		Self {
			settings,
			css: Arc::new(LightningCssMinifier),
			js: Arc::new(NullJsMinifier),
			json: Arc::new(JsonMinifier),
			pool: Arc::new(BufferPool::default()),
		}
	}

	#[must_use]
	/// # With CSS Minifier.
	pub fn with_css_minifier<M: CssMinifier + 'static>(mut self, css: M) -> Self {
		self.css = Arc::new(css);
		self
	}

	#[must_use]
	/// # With JS Minifier.
	pub fn with_js_minifier<M: JsMinifier + 'static>(mut self, js: M) -> Self {
		self.js = Arc::new(js);
		self
	}

	#[must_use]
	/// # With JSON Minifier.
	pub fn with_json_minifier<M: JsMinifier + 'static>(mut self, json: M) -> Self {
		self.json = Arc::new(json);
		self
	}

	#[must_use]
	/// # Settings.
	pub const fn settings(&self) -> &Settings { &self.settings }
}

impl Minifier {
	#[must_use]
	/// # Minify!
	///
	/// Minify a document or fragment. This never fails; problems encountered
	/// along the way are reported through the result's `warnings` and
	/// `errors` instead.
	pub fn minify(&self, src: &str) -> MinificationResult {
		let now = Instant::now();
		let mut diag = Diagnostics::new(src);
		let minified_content = self.run(src, &mut diag);
		let (warnings, errors) = diag.into_parts();

		let statistics = Statistics {
			original_size: src.len(),
			minified_size: minified_content.len(),
			elapsed: now.elapsed(),
		};

		log::debug!(
			"Minified {} bytes down to {} in {:?} ({} warning(s), {} error(s)).",
			statistics.original_size,
			statistics.minified_size,
			statistics.elapsed,
			warnings.len(),
			errors.len(),
		);

		MinificationResult { minified_content, warnings, errors, statistics }
	}

	/// # Run the Pipeline.
	fn run(&self, src: &str, diag: &mut Diagnostics<'_>) -> String {
		let mut doc = dom::parse(src, diag);

		attribute::process(&mut doc.children, self, diag);
		content::process(&mut doc.children, self, diag);
		document::process(&mut doc.children, &self.settings);
		if self.settings.remove_tags_without_content() {
			document::contentless(&mut doc.children);
		}
		whitespace::process(&mut doc.children, &self.settings);
		omission::process(&mut doc.children, &self.settings);

		let mut buf = self.pool.acquire(src.len());
		ser::serialize(&doc.children, &self.settings, &mut buf);
		buf.as_str().to_owned()
	}
}



#[derive(Debug, Clone)]
/// # Minification Result.
pub struct MinificationResult {
	/// # Minified Content.
	pub minified_content: String,

	/// # Warnings.
	///
	/// Recoverable markup problems.
	pub warnings: Vec<Diagnostic>,

	/// # Errors.
	///
	/// Embedded code the delegates could not minify. The affected code is
	/// left as-is.
	pub errors: Vec<Diagnostic>,

	/// # Statistics.
	pub statistics: Statistics,
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Statistics.
pub struct Statistics {
	/// # Original Size (Bytes).
	pub original_size: usize,

	/// # Minified Size (Bytes).
	pub minified_size: usize,

	/// # Elapsed Time.
	pub elapsed: Duration,
}

impl Statistics {
	#[must_use]
	/// # Bytes Saved.
	pub const fn saved(&self) -> usize {
		self.original_size.saturating_sub(self.minified_size)
	}

	#[must_use]
	/// # Compression Ratio.
	///
	/// The minified size as a fraction of the original, e.g. `0.75`. An
	/// empty original has a ratio of `1.0`.
	pub fn ratio(&self) -> f64 {
		if self.original_size == 0 { 1.0 }
		else { self.minified_size as f64 / self.original_size as f64 }
	}
}



/// # Merge Adjacent Text.
///
/// Passes that remove nodes can leave text nodes next to one another; this
/// joins them back up.
fn merge_text(nodes: &mut Vec<Node>) {
	if nodes.len() < 2 { return; }
	let old = std::mem::take(nodes);
	nodes.reserve(old.len());
	for node in old { push_node(nodes, node); }
}

/// # Push Node.
///
/// Push a node, joining it with the previous one if both are text.
///
/// An `&` at the end of the first would start a character reference once
/// joined, so it is escaped.
fn push_node(nodes: &mut Vec<Node>, node: Node) {
	if
		let Node::Text(next) = &node &&
		let Some(Node::Text(prev)) = nodes.last_mut()
	{
		if
			prev.ends_with('&') &&
			next.as_bytes().first().is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'#')
		{
			prev.pop_back(1);
			prev.push_slice("&amp;");
		}
		prev.push_tendril(next);
		return;
	}

	nodes.push(node);
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::SettingsBuilder;
	use tendril::StrTendril;

	/// # Text Node.
	fn text(src: &str) -> Node { Node::Text(StrTendril::from_slice(src)) }

	#[test]
	fn t_statistics() {
		let stats = Statistics {
			original_size: 200,
			minified_size: 150,
			elapsed: Duration::ZERO,
		};
		assert_eq!(stats.saved(), 50);
		assert!((stats.ratio() - 0.75).abs() < f64::EPSILON);

		let stats = Statistics::default();
		assert_eq!(stats.saved(), 0);
		assert!((stats.ratio() - 1.0).abs() < f64::EPSILON);
	}

	#[test]
	fn t_merge_text() {
		let mut nodes = vec![
			text("AT"),
			text("&"),
			text("amp;T"),
			Node::Comment(StrTendril::from_slice("x")),
			text("&"),
			text(" "),
		];
		merge_text(&mut nodes);
		assert_eq!(nodes.len(), 3);
		assert_eq!(nodes[0].as_text(), Some("AT&amp;amp;T"));
		assert_eq!(nodes[2].as_text(), Some("& "));
	}

	#[test]
	fn t_minify() {
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("", ""),
			("Hello World", "Hello World"),
			("<p id=\"\" class=\"\" title=\"\n\" lang=\"\" dir=\"\">Some text…</p>", "<p>Some text…"),
			("<input disabled=\"disabled\">", "<input disabled>"),
			(
				"<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">\n<title>Hi</title>",
				"<!DOCTYPE html><title>Hi</title>",
			),
			(
				"<select><option>Moscow</option><option>St. Petersburg</option></select>",
				"<select><option>Moscow<option>St. Petersburg</select>",
			),
			(
				"<script type=\"application/json\">{ \"a\": 1 }</script>",
				"<script type=application/json>{\"a\":1}</script>",
			),
			("<div>\n  <p>  One  </p>\n  <p>Two</p>\n</div>", "<div><p>One<p>Two</div>"),
			("<ul>\n\t<li>One</li>\n\t<li>Two</li>\n</ul>", "<ul><li>One<li>Two</ul>"),
			("<!-- Hi --><b>Bold</b> <i>Italic</i>", "<b>Bold</b> <i>Italic</i>"),
			("<!--[if IE]><p>Old</p><![endif]-->", "<!--[if IE]><p>Old</p><![endif]-->"),
		] {
			let res = mini.minify(lhs);
			assert_eq!(res.minified_content, rhs, "{lhs}");
			assert!(res.errors.is_empty(), "{lhs}");
			assert_eq!(res.statistics.original_size, lhs.len());
			assert_eq!(res.statistics.minified_size, rhs.len());
		}
	}

	#[test]
	fn t_misnested() {
		// Browsers carry formatting closed out of turn over into what
		// follows, so end tags the source never had stay out.
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("<b><i>A</b>B", "<b><i>A</b>B"),
			("<b><i>A</b>B</i>C", "<b><i>A</b>B</i>C"),
			("<b><i>A</b></i>C", "<b><i>A</b></i>C"),
			("<p><b>A</p><p>B</p>", "<p><b>A<p>B"),
		] {
			let res = mini.minify(lhs);
			assert_eq!(res.minified_content, rhs, "{lhs}");
			assert_eq!(res.warnings.len(), 1, "{lhs}");
		}
	}

	#[test]
	fn t_redundant_method() {
		let mini = Minifier::new(
			SettingsBuilder::default()
				.with_remove_redundant_attributes(true)
				.build()
				.expect("Settings failed."),
		);
		for (lhs, rhs) in [
			("<form method=\"get\"><input name=q></form>", "<form><input name=q></form>"),
			("<form method=\"post\"><input name=q></form>", "<form method=post><input name=q></form>"),
		] {
			assert_eq!(mini.minify(lhs).minified_content, rhs);
		}
	}

	#[test]
	fn t_idempotent() {
		for settings in [
			SettingsBuilder::safe(),
			SettingsBuilder::default(),
			SettingsBuilder::aggressive(),
		] {
			let mini = Minifier::new(settings.build().expect("Settings failed."));
			for src in [
				"<div>\n  <p>  One <b> two </b> three </p>\n  <p>Two</p>\n</div>",
				"<table>\n<tr><td> A </td><td>B</td></tr>\n</table>",
				"<ul><li>One <li> Two </ul><p>After",
				"<dl><dt>Term<dd>Definition</dl>",
				"<p>A <br> B <img src=x.png alt=\"\"> C</p>",
				"<pre>\n  keep  me\n</pre><textarea> and  me </textarea>",
				"<p><b>One</p><p>Two <i>three</b> four</i> five",
			] {
				let once = mini.minify(src).minified_content;
				let twice = mini.minify(&once).minified_content;
				assert_eq!(once, twice, "{src}");
			}
		}
	}

	#[test]
	fn t_monotonic() {
		let src = "<div>\n  <p>  One <b> two </b>  three </p>\n  <span> x </span> <p>Two</p>\n</div>";
		let mut last = usize::MAX;
		for mode in [
			crate::WhitespaceMode::None,
			crate::WhitespaceMode::Safe,
			crate::WhitespaceMode::Medium,
			crate::WhitespaceMode::Aggressive,
		] {
			let mini = Minifier::new(
				SettingsBuilder::default()
					.with_whitespace_mode(mode)
					.build()
					.expect("Settings failed."),
			);
			let len = mini.minify(src).minified_content.len();
			assert!(len <= last, "{}", mode.as_str());
			last = len;
		}
	}

	#[test]
	fn t_fixture() {
		let src = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/skel/test-assets/sample.html"))
			.expect("Missing fixture.");

		let mut last = usize::MAX;
		for settings in [
			SettingsBuilder::safe(),
			SettingsBuilder::default(),
			SettingsBuilder::aggressive(),
		] {
			let res = Minifier::new(settings.build().expect("Settings failed.")).minify(&src);
			let out = &res.minified_content;
			assert!(res.errors.is_empty());
			assert!(res.statistics.saved() > 0);
			assert!(out.len() <= last);
			last = out.len();

			// Preformatted content is untouched.
			assert!(out.contains("<pre>\n  Preformatted   text\n    stays    put.\n</pre>"));
			assert!(out.contains("\n  Also   preformatted.\n</textarea>"));

			// So are form values.
			assert!(out.contains("\"  keep  me  \""));

			// Entities survive.
			assert!(out.contains("&copy; 2025 Sample &amp; Co."));

			// The special comments stay.
			assert!(out.contains("<!--noindex-->"));
			assert!(out.contains("<!--/noindex-->"));
		}

		// Most of the heavy lifting happens by default.
		let out = Minifier::default().minify(&src).minified_content;
		assert!(out.starts_with("<!DOCTYPE html>"));
		assert!(! out.contains("<!-- Styles. -->"));
		assert!(! out.contains("text/css"));
		assert!(! out.contains("text/javascript"));
		assert!(out.contains("<title>Sample Document</title>"));
		assert!(out.contains("{\"@context\":\"https://schema.org\",\"@type\":\"WebSite\",\"name\":\"Sample\"}"));
		assert!(out.contains("<input type=text id=q name=q value=\"  keep  me  \" disabled>"));
		assert!(out.contains("<option value=asc selected>Ascending<option value=desc>Descending</select>"));
		assert!(out.contains("<svg viewBox=\"0 0 10 10\" width=10 height=10><circle cx=5 cy=5 r=4 fill=red /></svg>"));
	}

	#[test]
	fn t_shared() {
		let mini = Minifier::default();
		std::thread::scope(|s| {
			for _ in 0..4 {
				let mini = &mini;
				s.spawn(move || for _ in 0..25 {
					assert_eq!(
						mini.minify("<p>  Hello  </p>").minified_content,
						"<p>Hello",
					);
				});
			}
		});
	}
}
