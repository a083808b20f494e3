/*!
# HTMincer: Raw Content.

The bodies of `<script>` and `<style>` elements are unwrapped from any
legacy comment or CDATA guards, then handed off to the appropriate
delegate. Script templates of a processable type are run back through the
full pipeline instead.
*/

use crate::{
	Category,
	CodeMinification,
	diagnostic::Diagnostics,
	dom::{
		Element,
		Node,
	},
	entities::decode,
	Minifier,
	Position,
	Settings,
	strtendril::is_ws,
	tags,
};
use tendril::StrTendril;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Content Kind.
enum Kind {
	/// # Stylesheet.
	Css,

	/// # JavaScript.
	Js,

	/// # JSON.
	Json,

	/// # Markup Template.
	Template,

	/// # Something Else.
	Other,
}

impl Kind {
	/// # From Element.
	fn new(el: &Element, settings: &Settings) -> Self {
		let kind = el.attr("type")
			.map(|a| decode(a.value()).trim().to_ascii_lowercase());

		if el.is("style") {
			return match kind.as_deref() {
				None | Some("" | "text/css") => Self::Css,
				_ => Self::Other,
			};
		}

		match kind.as_deref() {
			None | Some("") => {
				// Old-school language hints still count.
				let lang = el.attr("language")
					.map(|a| decode(a.value()).trim().to_ascii_lowercase())
					.unwrap_or_default();
				if lang.is_empty() || lang.starts_with("javascript") { Self::Js }
				else { Self::Other }
			},
			Some("module") => Self::Js,
			Some(k) if tags::is_js_mime(k) => Self::Js,
			Some(k) if tags::is_json_type(k) => Self::Json,
			Some(k) if settings.processable_script_type(k) => Self::Template,
			_ => Self::Other,
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Legacy Wrapper.
enum Wrapper {
	/// # HTML Comment.
	Comment,

	/// # CDATA Section.
	Cdata,

	/// # Both, Combined.
	Both,
}

impl Wrapper {
	/// # Comment?
	const fn comment(self) -> bool { matches!(self, Self::Comment | Self::Both) }

	/// # CDATA?
	const fn cdata(self) -> bool { matches!(self, Self::Cdata | Self::Both) }
}



/// # Process Raw Content.
pub(super) fn process(nodes: &mut [Node], mini: &Minifier, diag: &mut Diagnostics<'_>) {
	for node in nodes {
		if let Node::Element(el) = node {
			if el.is("script") || el.is("style") { element(el, mini, diag); }
			else { process(&mut el.children, mini, diag); }
		}
	}
}

/// # Process Script/Style.
fn element(el: &mut Element, mini: &Minifier, diag: &mut Diagnostics<'_>) {
	let settings = &mini.settings;
	let kind = Kind::new(el, settings);
	let Some(Node::Text(txt)) = el.children.first() else { return; };
	let txt = txt.clone();

	let out = match kind {
		Kind::Css | Kind::Js => {
			let css = kind == Kind::Css;
			let (wrapper, inner) = unwrap(&txt);
			let enabled =
				if css { settings.minify_embedded_css_code() }
				else { settings.minify_embedded_js_code() };

			// Nothing to do!
			if wrapper.is_none() && ! enabled { return; }

			let inner = trim(inner);
			let code =
				if enabled && ! inner.is_empty() {
					let res =
						if css { mini.css.minify(inner, false) }
						else { mini.js.minify(inner, false) };
					let category = if css { Category::Css } else { Category::Js };
					checked(res, inner, &el.local, category, el.pos, diag)
				}
				else { inner.to_owned() };

			rewrap(&code, wrapper, css, settings)
		},
		Kind::Json => {
			if ! settings.minify_embedded_json_data() { return; }
			let inner = trim(&txt);
			if inner.is_empty() { String::new() }
			else {
				let res = mini.json.minify(inner, false);
				checked(res, inner, &el.local, Category::Json, el.pos, diag)
			}
		},
		Kind::Template => {
			let res = mini.minify(&txt);
			let nested = res.warnings.into_iter().chain(res.errors).collect();
			diag.adopt(nested, el.inner);
			res.minified_content
		},
		Kind::Other => return,
	};

	if out.is_empty() { el.children.clear(); }
	else if out.as_str() != &*txt { el.children[0] = Node::Text(StrTendril::from(out)); }
}

/// # Check Delegate Result.
///
/// Return the minified code, or record the errors and return the original.
fn checked(
	res: CodeMinification,
	original: &str,
	tag: &str,
	category: Category,
	pos: Position,
	diag: &mut Diagnostics<'_>,
) -> String {
	if res.is_ok() {
		// Make sure the delegate didn't hand back something that would end
		// the element early.
		if ! closes_early(&res.code, tag) { return res.code; }
		diag.error(category, pos, format!("Minified <{tag}> content would close the element early."));
	}
	else {
		for e in res.errors {
			diag.error(category, pos, format!("Embedded <{tag}> content could not be minified: {e}"));
		}
	}

	log::debug!("{} fallback for <{tag}> at {pos}.", category.as_str());
	original.to_owned()
}

/// # Closes Early?
///
/// Returns `true` if `code` contains `</tag`, case-insensitively.
fn closes_early(code: &str, tag: &str) -> bool {
	let bytes = code.as_bytes();
	memchr::memmem::find_iter(bytes, b"</").any(|idx|
		bytes.get(idx + 2..idx + 2 + tag.len())
			.is_some_and(|b| b.eq_ignore_ascii_case(tag.as_bytes()))
	)
}



/// # Unwrap.
///
/// Strip a legacy comment and/or CDATA guard from the code, if present.
fn unwrap(code: &str) -> (Option<Wrapper>, &str) {
	let t = trim(code);

	if let Some(inner) = t.strip_prefix("<!--//--><![CDATA[//><!--")
		.and_then(|s| s.strip_suffix("//--><!]]>"))
	{
		return (Some(Wrapper::Both), inner);
	}

	for (open, close) in [
		("//<![CDATA[", "//]]>"),
		("/*<![CDATA[*/", "/*]]>*/"),
		("<![CDATA[", "]]>"),
	] {
		if let Some(inner) = t.strip_prefix(open).and_then(|s| s.strip_suffix(close)) {
			return (Some(Wrapper::Cdata), inner);
		}
	}

	if let Some(inner) = t.strip_prefix("<!--").and_then(|s| s.strip_suffix("-->")) {
		let inner = trim(inner);
		return (Some(Wrapper::Comment), inner.strip_suffix("//").unwrap_or(inner));
	}

	(None, code)
}

/// # Rewrap.
///
/// Put back whatever wrapper the settings say to keep, in canonical form.
fn rewrap(code: &str, wrapper: Option<Wrapper>, css: bool, settings: &Settings) -> String {
	let comment = wrapper.is_some_and(Wrapper::comment) &&
		! settings.remove_html_comments_from_scripts_and_styles();
	let cdata = wrapper.is_some_and(Wrapper::cdata) &&
		! settings.remove_cdata_sections_from_scripts_and_styles();

	match (comment, cdata, css) {
		(false, false, _) => code.to_owned(),
		(true, true, _) => format!("<!--//--><![CDATA[//><!--\n{code}\n//--><!]]>"),
		(true, false, false) => format!("<!--\n{code}\n//-->"),
		(true, false, true) => format!("<!--{code}-->"),
		(false, true, false) => format!("//<![CDATA[\n{code}\n//]]>"),
		(false, true, true) => format!("/*<![CDATA[*/{code}/*]]>*/"),
	}
}

/// # Trim Whitespace.
fn trim(src: &str) -> &str {
	src.trim_matches(|c: char| c.is_ascii() && is_ws(c as u8))
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		dom,
		SettingsBuilder,
	};

	/// # Process and Return Content.
	fn content(src: &str, mini: &Minifier) -> (String, usize) {
		let mut diag = Diagnostics::new(src);
		let mut doc = dom::parse(src, &mut diag);
		process(&mut doc.children, mini, &mut diag);

		fn find(nodes: &[Node]) -> Option<&Element> {
			for node in nodes {
				if let Node::Element(el) = node {
					if el.is("script") || el.is("style") { return Some(el); }
					if let Some(el) = find(&el.children) { return Some(el); }
				}
			}
			None
		}

		let txt = find(&doc.children)
			.and_then(|el| el.children.first())
			.and_then(Node::as_text)
			.unwrap_or_default()
			.to_owned();
		let (_, errors) = diag.into_parts();
		(txt, errors.len())
	}

	#[test]
	fn t_wrappers() {
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("<script><!--\nvar a = 1;\n//--></script>", "var a = 1;"),
			("<script>//<![CDATA[\nvar a = 1;\n//]]></script>", "var a = 1;"),
			("<script>/*<![CDATA[*/ var a = 1; /*]]>*/</script>", "var a = 1;"),
			("<script><!--//--><![CDATA[//><!--\nvar a = 1;\n//--><!]]></script>", "var a = 1;"),
			("<style><!-- p { color: red; } --></style>", "p{color:red}"),
			("<style>/*<![CDATA[*/ p { color: red; } /*]]>*/</style>", "p{color:red}"),
			("<script>  var a = 1;  </script>", "var a = 1;"),
		] {
			assert_eq!(content(lhs, &mini), (rhs.to_owned(), 0), "{lhs}");
		}

		// Keep them, normalized.
		let mini = Minifier::new(
			SettingsBuilder::default()
				.with_remove_html_comments_from_scripts_and_styles(false)
				.with_remove_cdata_sections_from_scripts_and_styles(false)
				.build()
				.expect("Settings failed."),
		);
		for (lhs, rhs) in [
			("<script><!--   var a = 1;   --></script>", "<!--\nvar a = 1;\n//-->"),
			("<script>//<![CDATA[\nvar a = 1;\n//]]></script>", "//<![CDATA[\nvar a = 1;\n//]]>"),
			("<style><![CDATA[p{color:red}]]></style>", "/*<![CDATA[*/p{color:red}/*]]>*/"),
			("<style><!-- p { color: red } --></style>", "<!--p{color:red}-->"),
			(
				"<script><!--//--><![CDATA[//><!--\nvar a = 1;\n//--><!]]></script>",
				"<!--//--><![CDATA[//><!--\nvar a = 1;\n//--><!]]>",
			),
		] {
			assert_eq!(content(lhs, &mini), (rhs.to_owned(), 0), "{lhs}");
		}
	}

	#[test]
	fn t_kinds() {
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("<script type=\"application/ld+json\">{ \"a\" : [1, 2] }</script>", "{\"a\":[1,2]}"),
			("<script type=\"text/template\">  <p> Hi </p>  </script>", "  <p> Hi </p>  "),
			("<script language=\"vbscript\">  x  </script>", "  x  "),
			("<style type=\"text/less\"> p { } </style>", " p { } "),
			("<style media=\"print\"> p { color: red } </style>", "p{color:red}"),
		] {
			assert_eq!(content(lhs, &mini), (rhs.to_owned(), 0), "{lhs}");
		}
	}

	#[test]
	fn t_template() {
		let mini = Minifier::new(
			SettingsBuilder::default()
				.with_processable_script_types("text/x-template")
				.build()
				.expect("Settings failed."),
		);
		let src = "<script type=\"text/x-template\">\n  <div>  <p id=\"\">  Hi  </p>  </div>\n</script>";
		assert_eq!(content(src, &mini), ("<div><p>Hi</div>".to_owned(), 0));

		// Nested diagnostics are anchored in the outer document.
		let src = "<div>\n<script type=\"text/x-template\"><p>\n<style>!!!{}</style></script>";
		let res = mini.minify(src);
		assert_eq!(res.errors.len(), 1);
		assert_eq!(res.errors[0].category(), Category::Template);
		assert_eq!(res.errors[0].position().line(), 3);
	}

	#[test]
	fn t_errors() {
		let mini = Minifier::default();
		for src in [
			"<style>!!! { color: red }</style>",
			"<script type=\"application/json\">{ nope }</script>",
		] {
			let (txt, errors) = content(src, &mini);
			assert_eq!(errors, 1, "{src}");
			assert!(src.contains(&txt), "{src}");
		}

		assert!(closes_early("a</SCRIPT>", "script"));
		assert!(! closes_early("a<\\/script>", "script"));
	}
}
