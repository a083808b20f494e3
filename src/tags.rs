/*!
# HTMincer: Questions of Spec.

Element and attribute knowledge tables. Tag and attribute names passed to
these helpers are expected to be lowercase.
*/



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Namespace.
pub enum Namespace {
	#[default]
	/// # HTML.
	Html,

	/// # SVG.
	Svg,

	/// # MathML.
	MathMl,
}

impl Namespace {
	#[must_use]
	/// # Is HTML?
	pub const fn is_html(self) -> bool { matches!(self, Self::Html) }

	#[must_use]
	/// # Child Namespace.
	///
	/// Figure out the namespace for a `child` element opened inside `self`
	/// (whose own element is `parent`).
	///
	/// For `<annotation-xml>`, the caller should pass `html_annotation` when
	/// its `encoding` is `text/html` or `application/xhtml+xml`.
	pub fn child(self, parent: &str, child: &str, html_annotation: bool) -> Self {
		match self {
			Self::Html => match child {
				"svg" => Self::Svg,
				"math" => Self::MathMl,
				_ => Self::Html,
			},
			Self::Svg =>
				if is_svg_integration_point(parent) { Self::Html.child(parent, child, false) }
				else { Self::Svg },
			Self::MathMl => match parent {
				"mi" | "mo" | "mn" | "ms" | "mtext" =>
					if matches!(child, "mglyph" | "malignmark") { Self::MathMl }
					else { Self::Html.child(parent, child, false) },
				"annotation-xml" =>
					if child == "svg" { Self::Svg }
					else if html_annotation { Self::Html.child(parent, child, false) }
					else { Self::MathMl },
				_ => Self::MathMl,
			},
		}
	}
}

#[must_use]
/// # SVG HTML Integration Point?
const fn is_svg_integration_point(tag: &str) -> bool {
	matches!(tag.as_bytes(), b"desc" | b"foreignobject" | b"title")
}



#[must_use]
/// # Is Void HTML Element?
pub(crate) fn is_void(tag: &str) -> bool {
	matches!(
		tag,
		"area" | "base" | "basefont" | "bgsound" | "br" | "col" | "embed" |
		"frame" | "hr" | "img" | "input" | "keygen" | "link" | "meta" |
		"param" | "source" | "track" | "wbr"
	)
}

#[must_use]
/// # Is Raw Text HTML Element?
///
/// The content of these is scanned only for the matching end tag.
pub(crate) fn is_raw_text(tag: &str) -> bool {
	matches!(
		tag,
		"iframe" | "noembed" | "noframes" | "plaintext" | "script" | "style" |
		"textarea" | "title" | "xmp"
	)
}

#[must_use]
/// # Is Preformatted?
///
/// Whitespace within these elements is significant (or opaque) and is never
/// altered.
pub(crate) fn is_preformatted(tag: &str) -> bool {
	matches!(
		tag,
		"listing" | "plaintext" | "pre" | "script" | "style" | "textarea" | "xmp"
	)
}

#[must_use]
/// # Is Ruby?
///
/// Ruby annotations get internal collapsing only; their edges are never
/// trimmed.
pub(crate) fn is_ruby(tag: &str) -> bool {
	matches!(tag, "rb" | "rp" | "rt" | "rtc" | "ruby")
}

#[must_use]
/// # Text Never Rendered?
///
/// Whitespace-only text within these elements has no effect and can be
/// dropped outright.
pub(crate) fn drops_whitespace(tag: &str) -> bool {
	matches!(
		tag,
		"audio" | "colgroup" | "datalist" | "frameset" | "head" | "html" |
		"optgroup" | "picture" | "select" | "table" | "tbody" | "tfoot" |
		"thead" | "tr" | "video"
	)
}

#[must_use]
/// # SVG Containers.
///
/// Whitespace-only text directly inside these SVG elements is never
/// rendered.
pub(crate) fn svg_drops_whitespace(tag: &str) -> bool {
	matches!(tag, "defs" | "g" | "svg" | "symbol")
}

#[expect(clippy::too_many_lines, reason = "There are a lot of tags.")]
#[must_use]
/// # Is Block-Level?
///
/// Whitespace directly inside or around these elements is not rendered.
pub(crate) fn is_block(tag: &str) -> bool {
	matches!(
		tag,
		"address" |
		"article" |
		"aside" |
		"blockquote" |
		"body" |
		"caption" |
		"center" |
		"col" |
		"colgroup" |
		"dd" |
		"details" |
		"dialog" |
		"dir" |
		"div" |
		"dl" |
		"dt" |
		"fieldset" |
		"figcaption" |
		"figure" |
		"footer" |
		"form" |
		"frame" |
		"frameset" |
		"h1" |
		"h2" |
		"h3" |
		"h4" |
		"h5" |
		"h6" |
		"head" |
		"header" |
		"hgroup" |
		"hr" |
		"html" |
		"legend" |
		"li" |
		"listing" |
		"main" |
		"menu" |
		"nav" |
		"ol" |
		"optgroup" |
		"option" |
		"p" |
		"pre" |
		"search" |
		"section" |
		"summary" |
		"table" |
		"tbody" |
		"td" |
		"tfoot" |
		"th" |
		"thead" |
		"tr" |
		"ul"
	)
}

#[must_use]
/// # Is Atomic Inline?
///
/// Replaced or widget-like inline elements that render as content in their
/// own right.
pub(crate) fn is_atomic_inline(tag: &str) -> bool {
	matches!(
		tag,
		"audio" | "button" | "canvas" | "embed" | "iframe" | "img" | "input" |
		"keygen" | "math" | "meter" | "object" | "progress" | "rb" | "rp" |
		"rt" | "rtc" | "ruby" | "select" | "svg" | "textarea" | "video"
	)
}

#[must_use]
/// # Closes an Open `<p>`?
pub(crate) fn closes_p(tag: &str) -> bool {
	matches!(
		tag,
		"address" | "article" | "aside" | "blockquote" | "center" | "details" |
		"dialog" | "dir" | "div" | "dl" | "fieldset" | "figcaption" |
		"figure" | "footer" | "form" | "h1" | "h2" | "h3" | "h4" | "h5" |
		"h6" | "header" | "hgroup" | "hr" | "li" | "listing" | "main" |
		"menu" | "nav" | "ol" | "p" | "plaintext" | "pre" | "search" |
		"section" | "summary" | "table" | "ul" | "xmp" | "dd" | "dt"
	)
}

#[must_use]
/// # End Tag Optional?
///
/// Elements whose end tags may be left out (in at least some contexts).
pub(crate) fn optional_end(tag: &str) -> bool {
	matches!(
		tag,
		"body" | "caption" | "colgroup" | "dd" | "dt" | "head" | "html" |
		"li" | "optgroup" | "option" | "p" | "rb" | "rp" | "rt" | "rtc" |
		"tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
	)
}

#[must_use]
/// # Breaks Out of Foreign Content?
///
/// These HTML start tags pop open SVG/MathML elements. (`<font>` only does
/// so with `color`, `face`, or `size` attributes; the caller has to check
/// that part.)
pub(crate) fn breaks_foreign(tag: &str) -> bool {
	matches!(
		tag,
		"b" | "big" | "blockquote" | "body" | "br" | "center" | "code" |
		"dd" | "div" | "dl" | "dt" | "em" | "embed" | "h1" | "h2" | "h3" |
		"h4" | "h5" | "h6" | "head" | "hr" | "i" | "img" | "li" | "listing" |
		"menu" | "meta" | "nobr" | "ol" | "p" | "pre" | "ruby" | "s" |
		"small" | "span" | "strike" | "strong" | "sub" | "sup" | "table" |
		"tt" | "u" | "ul" | "var"
	)
}

#[must_use]
/// # Is Formatting Element?
///
/// Browsers remember these when they are closed out of turn, and recreate
/// them around the content that follows.
pub(crate) fn is_formatting(tag: &str) -> bool {
	matches!(
		tag,
		"a" | "b" | "big" | "code" | "em" | "font" | "i" | "nobr" | "s" |
		"small" | "strike" | "strong" | "tt" | "u"
	)
}

#[must_use]
/// # Fences Off Formatting?
///
/// Formatting elements closed out of turn outside one of these are never
/// recreated within it.
pub(crate) fn is_formatting_marker(tag: &str) -> bool {
	matches!(
		tag,
		"applet" | "caption" | "marquee" | "object" | "td" | "template" | "th"
	)
}

#[must_use]
/// # Is Heading?
pub(crate) fn is_heading(tag: &str) -> bool {
	matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

#[must_use]
/// # Belongs in `<head>`?
pub(crate) fn is_head_content(tag: &str) -> bool {
	matches!(
		tag,
		"base" | "basefont" | "bgsound" | "link" | "meta" | "noscript" |
		"script" | "style" | "template" | "title"
	)
}

#[must_use]
/// # Is Table Structure?
pub(crate) fn is_table_part(tag: &str) -> bool {
	matches!(
		tag,
		"caption" | "col" | "colgroup" | "table" | "tbody" | "td" | "tfoot" |
		"th" | "thead" | "tr"
	)
}

#[must_use]
/// # Keep When Empty?
///
/// Elements whose mere presence matters, even without content or
/// attributes.
pub(crate) fn keep_when_empty(tag: &str) -> bool {
	is_void(tag) ||
	is_raw_text(tag) ||
	is_table_part(tag) ||
	matches!(
		tag,
		"audio" | "body" | "button" | "canvas" | "datalist" | "dd" | "dt" |
		"head" | "html" | "li" | "map" | "meter" | "object" | "optgroup" |
		"option" | "output" | "picture" | "progress" | "select" | "slot" |
		"template" | "video"
	)
}



#[must_use]
/// # Is Boolean Attribute?
pub(crate) fn is_boolean_attr(attr: &str) -> bool {
	matches!(
		attr,
		"allowfullscreen" | "async" | "autofocus" | "autoplay" | "checked" |
		"compact" | "controls" | "declare" | "default" | "defaultchecked" |
		"defaultmuted" | "defaultselected" | "defer" | "disabled" |
		"enabled" | "formnovalidate" | "hidden" | "indeterminate" | "inert" |
		"ismap" | "itemscope" | "loop" | "multiple" | "muted" | "nohref" |
		"nomodule" | "noresize" | "noshade" | "novalidate" | "nowrap" |
		"open" | "pauseonexit" | "playsinline" | "readonly" | "required" |
		"reversed" | "scoped" | "seamless" | "selected" |
		"shadowrootclonable" | "shadowrootdelegatesfocus" |
		"shadowrootserializable" | "sortable" | "truespeed" |
		"typemustmatch" | "visible"
	)
}

#[must_use]
/// # Is URI Attribute?
pub(crate) fn is_uri_attr(tag: &str, attr: &str) -> bool {
	match attr {
		"action" | "background" | "cite" | "codebase" | "formaction" |
		"href" | "icon" | "longdesc" | "manifest" | "poster" | "profile" |
		"src" | "usemap" | "xmlns" => true,
		"classid" | "data" => tag == "object",
		_ => false,
	}
}

#[must_use]
/// # Is Numeric Attribute?
pub(crate) fn is_numeric_attr(tag: &str, attr: &str) -> bool {
	match attr {
		"border" | "cellpadding" | "cellspacing" | "colspan" | "frameborder" |
		"height" | "hspace" | "marginheight" | "marginwidth" | "maxlength" |
		"minlength" | "rowspan" | "tabindex" | "vspace" | "width" => true,
		"cols" | "rows" => matches!(tag, "frameset" | "textarea"),
		"size" => matches!(tag, "basefont" | "font" | "hr" | "input" | "select"),
		"span" => matches!(tag, "col" | "colgroup"),
		"start" => tag == "ol",
		_ => false,
	}
}

#[must_use]
/// # Is Event Handler?
///
/// `on` followed by at least one letter.
pub(crate) fn is_event_attr(attr: &str) -> bool {
	attr.len() > 2 &&
	attr.starts_with("on") &&
	attr.bytes().all(|b| b.is_ascii_alphabetic())
}

#[must_use]
/// # Removable When Empty?
pub(crate) fn removable_when_empty(attr: &str) -> bool {
	matches!(attr, "class" | "dir" | "id" | "lang" | "name" | "style" | "title") ||
	is_event_attr(attr)
}

#[must_use]
/// # Meaningful for Empty Elements?
///
/// An otherwise empty element with one of these attributes is presumed to
/// be targeted by scripts or styles.
pub(crate) fn meaningful_attr(attr: &str) -> bool {
	matches!(attr, "class" | "href" | "id" | "name" | "role" | "src" | "style") ||
	attr.starts_with("data-") ||
	attr.starts_with("aria-")
}



#[must_use]
/// # Is JavaScript MIME?
pub(crate) fn is_js_mime(kind: &str) -> bool {
	matches!(
		kind,
		"application/ecmascript" | "application/javascript" |
		"application/x-ecmascript" | "application/x-javascript" |
		"text/ecmascript" | "text/javascript" | "text/javascript1.0" |
		"text/javascript1.1" | "text/javascript1.2" | "text/javascript1.3" |
		"text/javascript1.4" | "text/javascript1.5" | "text/jscript" |
		"text/livescript" | "text/x-ecmascript" | "text/x-javascript"
	)
}

#[must_use]
/// # Is JSON Script Type?
pub(crate) fn is_json_type(kind: &str) -> bool {
	matches!(
		kind,
		"application/json" | "application/ld+json" | "application/manifest+json" |
		"importmap" | "speculationrules"
	)
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_child_namespace() {
		for (ns, parent, child, annotation, expected) in [
			(Namespace::Html, "div", "svg", false, Namespace::Svg),
			(Namespace::Html, "div", "math", false, Namespace::MathMl),
			(Namespace::Html, "div", "span", false, Namespace::Html),
			(Namespace::Svg, "svg", "g", false, Namespace::Svg),
			(Namespace::Svg, "g", "div", false, Namespace::Svg),
			(Namespace::Svg, "foreignobject", "div", false, Namespace::Html),
			(Namespace::Svg, "desc", "math", false, Namespace::MathMl),
			(Namespace::MathMl, "math", "mi", false, Namespace::MathMl),
			(Namespace::MathMl, "mi", "span", false, Namespace::Html),
			(Namespace::MathMl, "mi", "mglyph", false, Namespace::MathMl),
			(Namespace::MathMl, "annotation-xml", "svg", false, Namespace::Svg),
			(Namespace::MathMl, "annotation-xml", "div", false, Namespace::MathMl),
			(Namespace::MathMl, "annotation-xml", "div", true, Namespace::Html),
		] {
			assert_eq!(ns.child(parent, child, annotation), expected, "{parent} > {child}");
		}
	}

	#[test]
	fn t_preformatted() {
		// None of the preformatted elements should be eligible for
		// trimming or dropping.
		for tag in ["listing", "plaintext", "pre", "script", "style", "textarea", "xmp"] {
			assert!(is_preformatted(tag));
			assert!(! drops_whitespace(tag));
		}
	}

	#[test]
	fn t_event_attr() {
		for (lhs, rhs) in [
			("onclick", true),
			("onload", true),
			("on", false),
			("one-two", false),
			("online2", false),
			("class", false),
		] {
			assert_eq!(is_event_attr(lhs), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_formatting() {
		for (lhs, rhs) in [
			("b", true),
			("nobr", true),
			("a", true),
			("span", false),
			("p", false),
			("td", false),
		] {
			assert_eq!(is_formatting(lhs), rhs, "{lhs}");
		}

		// The two lists never overlap.
		for tag in ["applet", "caption", "marquee", "object", "td", "template", "th"] {
			assert!(is_formatting_marker(tag));
			assert!(! is_formatting(tag));
		}
	}

	#[test]
	fn t_numeric_attr() {
		assert!(is_numeric_attr("td", "colspan"));
		assert!(is_numeric_attr("textarea", "rows"));
		assert!(! is_numeric_attr("div", "rows"));
		assert!(is_numeric_attr("ol", "start"));
		assert!(! is_numeric_attr("video", "start"));
	}
}
