/*!
# HTMincer: Settings.

Minification behavior is controlled by an immutable [`Settings`] value,
assembled and validated once through [`SettingsBuilder`].
*/

use crate::SettingsError;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Whitespace Mode.
///
/// Each mode removes everything the previous one does, and then some.
pub enum WhitespaceMode {
	/// # Leave Whitespace Alone.
	None,

	/// # Collapse Only.
	///
	/// Runs are collapsed to a single space, and whitespace-only text is
	/// dropped where text is never rendered (tables, `<head>`, etc.).
	Safe,

	#[default]
	/// # Collapse and Trim Around Blocks.
	Medium,

	/// # Collapse, Trim Around Blocks, and Trim Inline Flow.
	Aggressive,
}

impl WhitespaceMode {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Safe => "safe",
			Self::Medium => "medium",
			Self::Aggressive => "aggressive",
		}
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Attribute Quotes Removal Mode.
pub enum AttributeQuotesMode {
	/// # Always Quote.
	///
	/// The original quote character is kept when possible.
	KeepQuotes,

	/// # HTML4 Rules.
	///
	/// Like [`AttributeQuotesMode::Html5`], but values with non-ASCII
	/// characters stay quoted.
	Html4,

	#[default]
	/// # HTML5 Rules.
	///
	/// Values without whitespace, quotes, `=`, `<`, `>`, or backticks are
	/// written unquoted.
	Html5,
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Empty (Void) Tag Render Mode.
pub enum EmptyTagRenderMode {
	#[default]
	/// # `<br>`
	NoSlash,

	/// # `<br/>`
	Slash,

	/// # `<br />`
	SpaceAndSlash,
}

impl EmptyTagRenderMode {
	#[must_use]
	/// # Closing Sequence.
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::NoSlash => ">",
			Self::Slash => "/>",
			Self::SpaceAndSlash => " />",
		}
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # New Line Style.
pub enum NewLineStyle {
	#[default]
	/// # Leave Line Breaks As-Is.
	Auto,

	/// # Platform Native.
	Native,

	/// # `\r\n`
	Windows,

	/// # `\r`
	Mac,

	/// # `\n`
	Unix,
}

impl NewLineStyle {
	#[must_use]
	/// # Line Break.
	///
	/// Return the break sequence to write, or `None` for passthrough.
	pub(crate) const fn line_break(self) -> Option<&'static str> {
		match self {
			Self::Auto => None,
			Self::Native =>
				if cfg!(windows) { Some("\r\n") }
				else { Some("\n") },
			Self::Windows => Some("\r\n"),
			Self::Mac => Some("\r"),
			Self::Unix => Some("\n"),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Attribute Selector.
///
/// One entry from a preservable attribute list: `tag[attr]`, `[attr]`,
/// `tag[attr=value]`, or `tag[attr="value" i]`.
pub(crate) struct AttributeSelector {
	/// # Tag Name (Lowercase).
	tag: Option<String>,

	/// # Attribute Name (Lowercase).
	attr: String,

	/// # Attribute Value.
	value: Option<String>,

	/// # Case-Insensitive Value Match?
	insensitive: bool,
}

impl AttributeSelector {
	/// # Parse.
	fn parse(raw: &str) -> Result<Self, SettingsError> {
		let err = || SettingsError::AttributeSelector(raw.to_owned());

		let (tag, rest) = raw.split_once('[').ok_or_else(err)?;
		let rest = rest.strip_suffix(']').ok_or_else(err)?;

		// The tag is optional.
		let tag = tag.trim();
		let tag =
			if tag.is_empty() { None }
			else if is_name(tag) { Some(tag.to_ascii_lowercase()) }
			else { return Err(err()); };

		// Split off the value, if any.
		let (attr, value, insensitive) = match rest.split_once('=') {
			Some((attr, value)) => {
				let (value, insensitive) = parse_selector_value(value.trim()).ok_or_else(err)?;
				(attr.trim(), Some(value), insensitive)
			},
			None => (rest.trim(), None, false),
		};

		if ! is_attr_name(attr) { return Err(err()); }

		Ok(Self {
			tag,
			attr: attr.to_ascii_lowercase(),
			value,
			insensitive,
		})
	}

	#[must_use]
	/// # Matches?
	///
	/// The tag and attribute names should already be lowercase.
	pub(crate) fn matches(&self, tag: &str, attr: &str, value: &str) -> bool {
		self.tag.as_deref().is_none_or(|t| t == tag) &&
		self.attr == attr &&
		self.value.as_deref().is_none_or(|v|
			if self.insensitive { v.eq_ignore_ascii_case(value) }
			else { v == value }
		)
	}
}

/// # Parse Selector Value.
///
/// Values may be bare, or quoted and optionally followed by an ` i` flag.
fn parse_selector_value(raw: &str) -> Option<(String, bool)> {
	match raw.as_bytes().first() {
		Some(&q @ (b'"' | b'\'')) => {
			let rest = &raw[1..];
			let end = rest.find(char::from(q))?;
			let value = rest[..end].to_owned();
			match rest[end + 1..].trim() {
				"" => Some((value, false)),
				"i" | "I" => Some((value, true)),
				_ => None,
			}
		},
		Some(_) =>
			if raw.bytes().any(|b| b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b'[' | b']')) { None }
			else { Some((raw.to_owned(), false)) },
		None => None,
	}
}



#[must_use]
/// # Valid Tag Name?
///
/// An ASCII letter followed by letters, digits, or hyphens.
fn is_name(raw: &str) -> bool {
	let mut bytes = raw.bytes();
	bytes.next().is_some_and(|b| b.is_ascii_alphabetic()) &&
	bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[must_use]
/// # Valid Attribute Name?
///
/// Attribute names are looser than tags, but can't contain whitespace,
/// quotes, or the characters that delimit selectors.
fn is_attr_name(raw: &str) -> bool {
	! raw.is_empty() &&
	raw.bytes().all(|b| ! b.is_ascii_whitespace() && ! b.is_ascii_control() && ! matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'/' | b'[' | b']'))
}

#[must_use]
/// # Valid MIME Type?
///
/// `type/subtype`, each made of RFC 6838 name characters.
fn is_mime(raw: &str) -> bool {
	let valid = |part: &str| {
		let mut bytes = part.bytes();
		bytes.next().is_some_and(|b| b.is_ascii_alphanumeric()) &&
		bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'!' | b'#' | b'$' | b'&' | b'-' | b'^' | b'_' | b'.' | b'+'))
	};
	raw.split_once('/').is_some_and(|(a, b)| valid(a) && valid(b))
}

/// # Split List.
///
/// Split a comma-separated list, trimming and skipping empty entries.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
	raw.split(',').map(str::trim).filter(|s| ! s.is_empty())
}

/// # Split Selector List.
///
/// Like [`split_list`], but commas inside quoted selector values don't
/// count.
fn split_selectors(raw: &str) -> Vec<&str> {
	let mut out = Vec::new();
	let mut quote: Option<char> = None;
	let mut start = 0;
	for (idx, c) in raw.char_indices() {
		match (quote, c) {
			(None, '"' | '\'') => { quote = Some(c); },
			(Some(q), c) if q == c => { quote = None; },
			(None, ',') => {
				out.push(raw[start..idx].trim());
				start = idx + 1;
			},
			_ => {},
		}
	}
	out.push(raw[start..].trim());
	out.retain(|s| ! s.is_empty());
	out
}



#[derive(Debug, Clone)]
/// # Settings.
///
/// Immutable once built. Use [`SettingsBuilder`] (or [`Settings::default`])
/// to create one.
///
/// ## Examples
///
/// ```
/// use htmincer::{Settings, WhitespaceMode};
///
/// let settings = Settings::builder()
///     .with_whitespace_mode(WhitespaceMode::Safe)
///     .with_remove_html_comments(false)
///     .with_preservable_attributes("input[value], [data-keep]")
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.whitespace_mode(), WhitespaceMode::Safe);
/// assert!(! settings.remove_html_comments());
/// ```
pub struct Settings {
	pub(crate) whitespace_mode: WhitespaceMode,
	pub(crate) attribute_quotes_removal_mode: AttributeQuotesMode,
	pub(crate) empty_tag_render_mode: EmptyTagRenderMode,
	pub(crate) new_line_style: NewLineStyle,

	pub(crate) preservable_attributes: Vec<AttributeSelector>,
	pub(crate) preservable_optional_tags: Vec<String>,
	pub(crate) processable_script_types: Vec<String>,

	pub(crate) preserve_new_lines: bool,
	pub(crate) remove_html_comments: bool,
	pub(crate) remove_html_comments_from_scripts_and_styles: bool,
	pub(crate) remove_cdata_sections_from_scripts_and_styles: bool,
	pub(crate) remove_optional_end_tags: bool,
	pub(crate) remove_optional_start_tags: bool,
	pub(crate) remove_tags_without_content: bool,
	pub(crate) remove_empty_attributes: bool,
	pub(crate) remove_redundant_attributes: bool,
	pub(crate) remove_js_type_attributes: bool,
	pub(crate) remove_css_type_attributes: bool,
	pub(crate) collapse_boolean_attributes: bool,
	pub(crate) use_short_doctype: bool,
	pub(crate) use_meta_charset_tag: bool,
	pub(crate) preserve_case: bool,
	pub(crate) remove_http_protocol_from_attributes: bool,
	pub(crate) remove_https_protocol_from_attributes: bool,
	pub(crate) remove_js_protocol_from_attributes: bool,
	pub(crate) normalize_class_attributes: bool,
	pub(crate) normalize_style_attributes: bool,
	pub(crate) trim_uri_attributes: bool,
	pub(crate) trim_numeric_attributes: bool,
	pub(crate) trim_event_attributes: bool,
	pub(crate) minify_embedded_css_code: bool,
	pub(crate) minify_inline_css_code: bool,
	pub(crate) minify_embedded_js_code: bool,
	pub(crate) minify_inline_js_code: bool,
	pub(crate) minify_embedded_json_data: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			whitespace_mode: WhitespaceMode::Medium,
			attribute_quotes_removal_mode: AttributeQuotesMode::Html5,
			empty_tag_render_mode: EmptyTagRenderMode::NoSlash,
			new_line_style: NewLineStyle::Auto,

			preservable_attributes: Vec::new(),
			preservable_optional_tags: Vec::new(),
			processable_script_types: Vec::new(),

			preserve_new_lines: false,
			remove_html_comments: true,
			remove_html_comments_from_scripts_and_styles: true,
			remove_cdata_sections_from_scripts_and_styles: true,
			remove_optional_end_tags: true,
			remove_optional_start_tags: false,
			remove_tags_without_content: false,
			remove_empty_attributes: true,
			remove_redundant_attributes: false,
			remove_js_type_attributes: true,
			remove_css_type_attributes: true,
			collapse_boolean_attributes: true,
			use_short_doctype: true,
			use_meta_charset_tag: true,
			preserve_case: false,
			remove_http_protocol_from_attributes: false,
			remove_https_protocol_from_attributes: false,
			remove_js_protocol_from_attributes: false,
			normalize_class_attributes: true,
			normalize_style_attributes: true,
			trim_uri_attributes: true,
			trim_numeric_attributes: true,
			trim_event_attributes: true,
			minify_embedded_css_code: true,
			minify_inline_css_code: true,
			minify_embedded_js_code: true,
			minify_inline_js_code: true,
			minify_embedded_json_data: true,
		}
	}
}

impl Settings {
	#[must_use]
	/// # Builder.
	pub fn builder() -> SettingsBuilder { SettingsBuilder::default() }

	#[must_use]
	/// # Whitespace Mode.
	pub const fn whitespace_mode(&self) -> WhitespaceMode { self.whitespace_mode }

	#[must_use]
	/// # Attribute Quotes Removal Mode.
	pub const fn attribute_quotes_removal_mode(&self) -> AttributeQuotesMode {
		self.attribute_quotes_removal_mode
	}

	#[must_use]
	/// # Empty Tag Render Mode.
	pub const fn empty_tag_render_mode(&self) -> EmptyTagRenderMode {
		self.empty_tag_render_mode
	}

	#[must_use]
	/// # New Line Style.
	pub const fn new_line_style(&self) -> NewLineStyle { self.new_line_style }

	#[must_use]
	/// # Preserve Optional Tag?
	///
	/// Returns `true` if the (lowercase) tag is on the preservable list.
	pub(crate) fn preserve_optional_tag(&self, tag: &str) -> bool {
		self.preservable_optional_tags.iter().any(|t| t == tag)
	}

	#[must_use]
	/// # Preserve (Empty) Attribute?
	pub(crate) fn preserve_attribute(&self, tag: &str, attr: &str, value: &str) -> bool {
		self.preservable_attributes.iter().any(|s| s.matches(tag, attr, value))
	}

	#[must_use]
	/// # Processable Script Type?
	///
	/// The type should already be lowercase.
	pub(crate) fn processable_script_type(&self, kind: &str) -> bool {
		self.processable_script_types.iter().any(|t| t == kind)
	}
}



#[derive(Debug, Clone, Default)]
/// # Settings Builder.
///
/// Chain the `with_*` setters, then call [`SettingsBuilder::build`]. The
/// list-type options are validated at that point.
pub struct SettingsBuilder {
	/// # Settings in Progress.
	inner: Settings,

	/// # Raw Preservable Attribute List.
	preservable_attributes: String,

	/// # Raw Preservable Optional Tag List.
	preservable_optional_tags: String,

	/// # Raw Processable Script Type List.
	processable_script_types: String,
}

/// # Helper: Boolean Options.
///
/// This generates a getter on `Settings` and a chainable setter on the
/// builder for each flag.
macro_rules! flags {
	( $( $field:ident $with:ident $doc:literal, )+ ) => (
		impl Settings {
			$(
				#[must_use]
				#[doc = concat!("# ", $doc)]
				pub const fn $field(&self) -> bool { self.$field }
			)+
		}

		impl SettingsBuilder {
			$(
				#[must_use]
				#[doc = concat!("# ", $doc)]
				pub fn $with(mut self, on: bool) -> Self {
					self.inner.$field = on;
					self
				}
			)+
		}
	);
}

flags! {
	preserve_new_lines with_preserve_new_lines "Preserve New Lines.",
	remove_html_comments with_remove_html_comments "Remove HTML Comments.",
	remove_html_comments_from_scripts_and_styles with_remove_html_comments_from_scripts_and_styles "Remove HTML Comments From Scripts and Styles.",
	remove_cdata_sections_from_scripts_and_styles with_remove_cdata_sections_from_scripts_and_styles "Remove CDATA Sections From Scripts and Styles.",
	remove_optional_end_tags with_remove_optional_end_tags "Remove Optional End Tags.",
	remove_optional_start_tags with_remove_optional_start_tags "Remove Optional Start Tags.",
	remove_tags_without_content with_remove_tags_without_content "Remove Tags Without Content.",
	remove_empty_attributes with_remove_empty_attributes "Remove Empty Attributes.",
	remove_redundant_attributes with_remove_redundant_attributes "Remove Redundant Attributes.",
	remove_js_type_attributes with_remove_js_type_attributes "Remove JS Type Attributes.",
	remove_css_type_attributes with_remove_css_type_attributes "Remove CSS Type Attributes.",
	collapse_boolean_attributes with_collapse_boolean_attributes "Collapse Boolean Attributes.",
	use_short_doctype with_use_short_doctype "Use Short Doctype.",
	use_meta_charset_tag with_use_meta_charset_tag "Use Meta Charset Tag.",
	preserve_case with_preserve_case "Preserve Case.",
	remove_http_protocol_from_attributes with_remove_http_protocol_from_attributes "Remove HTTP Protocol From Attributes.",
	remove_https_protocol_from_attributes with_remove_https_protocol_from_attributes "Remove HTTPS Protocol From Attributes.",
	remove_js_protocol_from_attributes with_remove_js_protocol_from_attributes "Remove JS Protocol From Attributes.",
	normalize_class_attributes with_normalize_class_attributes "Normalize Class Attributes.",
	normalize_style_attributes with_normalize_style_attributes "Normalize Style Attributes.",
	trim_uri_attributes with_trim_uri_attributes "Trim URI Attributes.",
	trim_numeric_attributes with_trim_numeric_attributes "Trim Numeric Attributes.",
	trim_event_attributes with_trim_event_attributes "Trim Event Attributes.",
	minify_embedded_css_code with_minify_embedded_css_code "Minify Embedded CSS Code.",
	minify_inline_css_code with_minify_inline_css_code "Minify Inline CSS Code.",
	minify_embedded_js_code with_minify_embedded_js_code "Minify Embedded JS Code.",
	minify_inline_js_code with_minify_inline_js_code "Minify Inline JS Code.",
	minify_embedded_json_data with_minify_embedded_json_data "Minify Embedded JSON Data.",
}

impl SettingsBuilder {
	#[must_use]
	/// # Safe Preset.
	///
	/// Whitespace is collapsed but never trimmed, comments are kept, and
	/// the markup structure (tags, quotes, doctype) is left as written.
	pub fn safe() -> Self {
		Self::default()
			.with_whitespace_mode(WhitespaceMode::Safe)
			.with_attribute_quotes_removal_mode(AttributeQuotesMode::KeepQuotes)
			.with_remove_html_comments(false)
			.with_remove_optional_end_tags(false)
			.with_remove_empty_attributes(false)
			.with_remove_js_type_attributes(false)
			.with_remove_css_type_attributes(false)
			.with_collapse_boolean_attributes(false)
			.with_use_short_doctype(false)
			.with_use_meta_charset_tag(false)
	}

	#[must_use]
	/// # Aggressive Preset.
	///
	/// Everything in the defaults, plus inline-flow whitespace trimming,
	/// redundant attribute removal, optional start tag removal, and
	/// `javascript:` stripping.
	pub fn aggressive() -> Self {
		Self::default()
			.with_whitespace_mode(WhitespaceMode::Aggressive)
			.with_remove_optional_start_tags(true)
			.with_remove_redundant_attributes(true)
			.with_remove_js_protocol_from_attributes(true)
	}

	#[must_use]
	/// # Whitespace Mode.
	pub const fn with_whitespace_mode(mut self, mode: WhitespaceMode) -> Self {
		self.inner.whitespace_mode = mode;
		self
	}

	#[must_use]
	/// # Attribute Quotes Removal Mode.
	pub const fn with_attribute_quotes_removal_mode(mut self, mode: AttributeQuotesMode) -> Self {
		self.inner.attribute_quotes_removal_mode = mode;
		self
	}

	#[must_use]
	/// # Empty Tag Render Mode.
	pub const fn with_empty_tag_render_mode(mut self, mode: EmptyTagRenderMode) -> Self {
		self.inner.empty_tag_render_mode = mode;
		self
	}

	#[must_use]
	/// # New Line Style.
	pub const fn with_new_line_style(mut self, style: NewLineStyle) -> Self {
		self.inner.new_line_style = style;
		self
	}

	#[must_use]
	/// # Preservable Attributes.
	///
	/// A comma-separated list of selectors (`tag[attr]`, `[attr]`,
	/// `tag[attr=value]`, `tag[attr="value" i]`) for attributes that should
	/// survive empty-attribute removal.
	pub fn with_preservable_attributes<S: Into<String>>(mut self, list: S) -> Self {
		self.preservable_attributes = list.into();
		self
	}

	#[must_use]
	/// # Preservable Optional Tags.
	///
	/// A comma-separated list of tag names whose optional tags should always
	/// be written.
	pub fn with_preservable_optional_tags<S: Into<String>>(mut self, list: S) -> Self {
		self.preservable_optional_tags = list.into();
		self
	}

	#[must_use]
	/// # Processable Script Types.
	///
	/// A comma-separated list of `<script>` MIME types whose bodies are
	/// markup templates, to be minified recursively.
	pub fn with_processable_script_types<S: Into<String>>(mut self, list: S) -> Self {
		self.processable_script_types = list.into();
		self
	}

	/// # Build.
	///
	/// ## Errors
	///
	/// This will return an error if any of the list options contain a
	/// malformed entry.
	pub fn build(self) -> Result<Settings, SettingsError> {
		let Self {
			mut inner,
			preservable_attributes,
			preservable_optional_tags,
			processable_script_types,
		} = self;

		inner.preservable_attributes = split_selectors(&preservable_attributes)
			.into_iter()
			.map(AttributeSelector::parse)
			.collect::<Result<_, _>>()?;

		inner.preservable_optional_tags = split_list(&preservable_optional_tags)
			.map(|t|
				if is_name(t) { Ok(t.to_ascii_lowercase()) }
				else { Err(SettingsError::TagName(t.to_owned())) }
			)
			.collect::<Result<_, _>>()?;

		inner.processable_script_types = split_list(&processable_script_types)
			.map(|t|
				if is_mime(t) { Ok(t.to_ascii_lowercase()) }
				else { Err(SettingsError::MimeType(t.to_owned())) }
			)
			.collect::<Result<_, _>>()?;

		Ok(inner)
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_defaults() {
		let settings = Settings::default();
		assert_eq!(settings.whitespace_mode(), WhitespaceMode::Medium);
		assert_eq!(settings.attribute_quotes_removal_mode(), AttributeQuotesMode::Html5);
		assert_eq!(settings.empty_tag_render_mode(), EmptyTagRenderMode::NoSlash);
		assert_eq!(settings.new_line_style(), NewLineStyle::Auto);
		assert!(settings.remove_html_comments());
		assert!(settings.remove_optional_end_tags());
		assert!(! settings.remove_optional_start_tags());
		assert!(! settings.remove_redundant_attributes());
		assert!(! settings.remove_tags_without_content());
		assert!(settings.collapse_boolean_attributes());
		assert!(settings.minify_embedded_json_data());

		// An empty builder should build the same thing.
		let built = SettingsBuilder::default().build().expect("Defaults failed.");
		assert_eq!(built.whitespace_mode(), settings.whitespace_mode());
		assert!(built.preservable_attributes.is_empty());
	}

	#[test]
	fn t_presets() {
		let safe = SettingsBuilder::safe().build().expect("Safe failed.");
		assert_eq!(safe.whitespace_mode(), WhitespaceMode::Safe);
		assert!(! safe.remove_optional_end_tags());

		let aggro = SettingsBuilder::aggressive().build().expect("Aggressive failed.");
		assert_eq!(aggro.whitespace_mode(), WhitespaceMode::Aggressive);
		assert!(aggro.remove_optional_start_tags());
		assert!(aggro.remove_redundant_attributes());
	}

	#[test]
	fn t_selectors() {
		let settings = Settings::builder()
			.with_preservable_attributes(r#"input[value], [data-x], a[rel=nofollow], Meta[NAME="Robots, Bots" i]"#)
			.build()
			.expect("Selectors failed.");
		assert_eq!(settings.preservable_attributes.len(), 4);

		assert!(settings.preserve_attribute("input", "value", ""));
		assert!(! settings.preserve_attribute("div", "value", ""));
		assert!(settings.preserve_attribute("div", "data-x", ""));
		assert!(settings.preserve_attribute("a", "rel", "nofollow"));
		assert!(! settings.preserve_attribute("a", "rel", "NOFOLLOW"));
		assert!(settings.preserve_attribute("meta", "name", "robots, bots"));

		for bad in [
			"input",
			"input[",
			"[]",
			"in put[value]",
			"a[rel=\"x]",
			"a[rel=\"x\" q]",
			"a[rel=x y]",
		] {
			let res = Settings::builder().with_preservable_attributes(bad).build();
			assert_eq!(
				res.err(),
				Some(SettingsError::AttributeSelector(bad.to_owned())),
				"{bad:?}",
			);
		}
	}

	#[test]
	fn t_tags() {
		let settings = Settings::builder()
			.with_preservable_optional_tags(" P, li ,")
			.build()
			.expect("Tags failed.");
		assert!(settings.preserve_optional_tag("p"));
		assert!(settings.preserve_optional_tag("li"));
		assert!(! settings.preserve_optional_tag("td"));

		let res = Settings::builder().with_preservable_optional_tags("p, <td>").build();
		assert_eq!(res.err(), Some(SettingsError::TagName("<td>".to_owned())));
	}

	#[test]
	fn t_script_types() {
		let settings = Settings::builder()
			.with_processable_script_types("text/html, text/x-Handlebars-Template")
			.build()
			.expect("Types failed.");
		assert!(settings.processable_script_type("text/html"));
		assert!(settings.processable_script_type("text/x-handlebars-template"));

		for bad in ["html", "text/", "/html", "text/ht ml"] {
			let res = Settings::builder().with_processable_script_types(bad).build();
			assert_eq!(res.err(), Some(SettingsError::MimeType(bad.to_owned())), "{bad:?}");
		}
	}
}
