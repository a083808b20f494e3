/*!
# HTMincer: Attributes.

Attribute values are trimmed, collapsed, or dropped entirely according to
the settings. Everything here works on the source form of the value;
character references are only decoded for comparisons.
*/

use crate::{
	Category,
	diagnostic::Diagnostics,
	dom::{
		Attribute,
		Element,
		Node,
	},
	entities::decode,
	Minifier,
	strtendril::{
		self,
		is_whitespace,
		is_ws,
	},
	tags,
};
use tendril::StrTendril;



#[derive(Debug)]
/// # Element Context.
///
/// Details about the owning element some of the attribute rules need to
/// know.
struct Context {
	/// # Tag (Lowercase).
	tag: StrTendril,

	/// # HTML Namespace?
	html: bool,

	/// # Has `src`?
	has_src: bool,

	/// # Has `rel="external"`?
	external: bool,

	/// # The `id` Value, If Any.
	id: Option<String>,
}



/// # Process Attributes.
///
/// Recursively clean up the attributes of every element in the tree.
pub(super) fn process(nodes: &mut [Node], mini: &Minifier, diag: &mut Diagnostics<'_>) {
	for node in nodes {
		if let Node::Element(el) = node {
			element(el, mini, diag);
			process(&mut el.children, mini, diag);
		}
	}
}

/// # Process Element.
fn element(el: &mut Element, mini: &Minifier, diag: &mut Diagnostics<'_>) {
	let html = el.ns.is_html();

	if html && mini.settings.use_meta_charset_tag() && el.is("meta") {
		meta_charset(el);
	}

	let ctx = Context {
		tag: el.local.clone(),
		html,
		has_src: el.has_attr("src"),
		external: el.attr("rel").is_some_and(|a|
			decode(a.value()).split_ascii_whitespace().any(|t| t.eq_ignore_ascii_case("external"))
		),
		id: el.attr("id").map(|a| html_trim(&decode(a.value())).to_owned()),
	};

	el.attrs.retain_mut(|a| attribute(a, &ctx, mini, diag));

	// Fold the case of HTML names. (Namespaced names are left alone.)
	if html && ! mini.settings.preserve_case() {
		if ! el.name.contains(':') { el.name = el.local.clone(); }
		for a in &mut el.attrs {
			if ! a.name.contains(':') { a.name = a.local.clone(); }
		}
	}
}

/// # Process Attribute.
///
/// Returns `false` if the attribute should be removed.
fn attribute(
	a: &mut Attribute,
	ctx: &Context,
	mini: &Minifier,
	diag: &mut Diagnostics<'_>,
) -> bool {
	let settings = &mini.settings;
	let local = a.local.clone();
	let local: &str = &local;

	match local {
		"class" =>
			if settings.normalize_class_attributes() && let Some(v) = a.value.as_mut() {
				strtendril::collapse_whitespace(v, false);
				strtendril::trim(v);
			},
		"style" => {
			if settings.normalize_style_attributes() && let Some(v) = a.value.as_mut() {
				if let Some(new) = normalize_style(v) { *v = StrTendril::from(new); }
			}
			if settings.minify_inline_css_code() {
				delegate(a, Category::Css, diag, |code| mini.css.minify(code, true));
			}
		},
		_ =>
			if ctx.html && tags::is_uri_attr(&ctx.tag, local) { uri(a, ctx, mini); }
			else if ctx.html && tags::is_numeric_attr(&ctx.tag, local) {
				if
					settings.trim_numeric_attributes() &&
					let Some(v) = a.value.as_mut() &&
					is_numeric(html_trim(v))
				{
					strtendril::trim(v);
				}
			}
			else if tags::is_event_attr(local) { event(a, mini, diag); },
	}

	// Boolean attributes are true by presence alone. (`hidden` has one
	// special non-boolean value.)
	if
		ctx.html &&
		settings.collapse_boolean_attributes() &&
		tags::is_boolean_attr(local) &&
		! (local == "hidden" && html_trim(&decode(a.value())).eq_ignore_ascii_case("until-found"))
	{
		a.value = None;
	}

	let value = decode(a.value());
	if settings.preserve_attribute(&ctx.tag, local, &value) { return true; }

	if
		settings.remove_empty_attributes() &&
		tags::removable_when_empty(local) &&
		is_whitespace(&value)
	{
		return false;
	}

	! (ctx.html && redundant(ctx, local, html_trim(&value), mini))
}

/// # Is Redundant?
///
/// Returns `true` if the attribute merely restates a default.
fn redundant(ctx: &Context, local: &str, value: &str, mini: &Minifier) -> bool {
	let settings = &mini.settings;
	let tag: &str = &ctx.tag;

	if settings.remove_redundant_attributes() {
		let hit = match (tag, local) {
			("a", "name") => ctx.id.as_deref() == Some(value),
			("area", "shape") => value.eq_ignore_ascii_case("rect"),
			("button", "type") => value.eq_ignore_ascii_case("submit"),
			("form", "autocomplete") => value.eq_ignore_ascii_case("on"),
			("form", "enctype") => value.eq_ignore_ascii_case("application/x-www-form-urlencoded"),
			("form", "method") => value.eq_ignore_ascii_case("get"),
			("input", "type") => value.eq_ignore_ascii_case("text"),
			("link", "charset") => true,
			("script", "charset") => ! ctx.has_src,
			("script", "language") => value.eq_ignore_ascii_case("javascript"),
			("td" | "th", "colspan" | "rowspan") => value == "1",
			("textarea", "wrap") => value.eq_ignore_ascii_case("soft"),
			_ => false,
		};
		if hit { return true; }
	}

	if local == "type" {
		match tag {
			"script" if settings.remove_js_type_attributes() =>
				return value.is_empty() || tags::is_js_mime(&value.to_ascii_lowercase()),
			"link" | "style" if settings.remove_css_type_attributes() =>
				return value.eq_ignore_ascii_case("text/css"),
			_ => {},
		}
	}

	false
}



/// # URI Attribute.
fn uri(a: &mut Attribute, ctx: &Context, mini: &Minifier) {
	let settings = &mini.settings;
	let Some(v) = a.value.as_mut() else { return; };

	if settings.trim_uri_attributes() { strtendril::trim(v); }

	// Namespace URIs are identifiers, not links.
	if ctx.external || &*a.local == "xmlns" { return; }

	if settings.remove_http_protocol_from_attributes() && starts_with_ci(v, "http://") {
		v.pop_front(5);
	}
	else if settings.remove_https_protocol_from_attributes() && starts_with_ci(v, "https://") {
		v.pop_front(6);
	}
}

/// # Event Attribute.
fn event(a: &mut Attribute, mini: &Minifier, diag: &mut Diagnostics<'_>) {
	let settings = &mini.settings;
	let Some(v) = a.value.as_mut() else { return; };

	if settings.trim_event_attributes() {
		strtendril::trim(v);
		while v.ends_with(';') {
			v.pop_back(1);
			strtendril::trim_end(v);
		}
	}

	if settings.remove_js_protocol_from_attributes() && starts_with_ci(v, "javascript:") {
		v.pop_front(11);
		strtendril::trim_start(v);
	}

	if settings.minify_inline_js_code() {
		delegate(a, Category::Js, diag, |code| mini.js.minify(code, true));
	}
}

/// # Delegate Value.
///
/// Run the value through an inline CSS/JS minifier. Values with character
/// references are skipped, as are empty ones. Failures leave the value
/// as-was and are recorded as errors.
fn delegate<F>(a: &mut Attribute, category: Category, diag: &mut Diagnostics<'_>, cb: F)
where F: Fn(&str) -> crate::CodeMinification {
	let pos = a.pos;
	let Some(v) = a.value.as_mut() else { return; };
	if v.contains('&') || is_whitespace(v) { return; }

	let res = cb(v);
	if res.is_ok() {
		if res.code != **v { *v = StrTendril::from(res.code); }
	}
	else {
		for e in res.errors {
			diag.error(category, pos, format!("Inline {} could not be minified: {e}", category.as_str()));
		}
	}
}



/// # Meta Charset.
///
/// Rewrite `<meta http-equiv="content-type" content="…; charset=X">` as
/// `<meta charset="X">`. Any other attributes are left be.
fn meta_charset(el: &mut Element) {
	if el.has_attr("charset") || ! el.attr_is("http-equiv", "content-type") { return; }
	let Some(content) = el.attr("content") else { return; };
	let content = decode(content.value());

	// ASCII lowercasing keeps the byte offsets lined up.
	let Some(idx) = content.to_ascii_lowercase().find("charset=") else { return; };
	let charset = content[idx + 8..]
		.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '"' || c == '\'')
		.split(|c: char| c.is_ascii_whitespace() || matches!(c, '"' | '\'' | ';'))
		.next()
		.unwrap_or_default();
	if charset.is_empty() { return; }

	let charset = StrTendril::from_slice(charset);
	el.remove_attr("content");
	if let Some(a) = el.attrs.iter_mut().find(|a| &*a.local == "http-equiv") {
		*a = Attribute {
			name: StrTendril::from_slice("charset"),
			local: StrTendril::from_slice("charset"),
			value: Some(charset),
			quote: Some(b'"'),
			pos: a.pos,
		};
	}
}

#[must_use]
/// # Normalize Style.
///
/// Trim, collapse whitespace outside of strings, and drop any trailing
/// semicolons.
///
/// Returns `None` if nothing would change.
fn normalize_style(src: &str) -> Option<String> {
	let mut out = String::with_capacity(src.len());
	let mut quote: Option<char> = None;
	let mut escaped = false;
	let mut space = false;

	for c in src.chars() {
		if let Some(q) = quote {
			out.push(c);
			if escaped { escaped = false; }
			else if c == '\\' { escaped = true; }
			else if c == q { quote = None; }
			continue;
		}

		if c.is_ascii() && is_ws(c as u8) { space = true; }
		else {
			if space && ! out.is_empty() { out.push(' '); }
			space = false;
			if matches!(c, '"' | '\'') { quote = Some(c); }
			out.push(c);
		}
	}

	if quote.is_none() {
		while out.ends_with([';', ' ']) { out.pop(); }
	}

	if out == src { None }
	else { Some(out) }
}

#[must_use]
/// # HTML Trim.
fn html_trim(src: &str) -> &str {
	src.trim_matches(|c: char| c.is_ascii() && is_ws(c as u8))
}

#[must_use]
/// # Is Numeric?
///
/// Digits, possibly with a sign, decimal, or percentage.
fn is_numeric(src: &str) -> bool {
	src.bytes().any(|b| b.is_ascii_digit()) &&
	src.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'%' | b'+' | b'-' | b'.'))
}

#[must_use]
/// # Starts With (Case-Insensitive)?
fn starts_with_ci(src: &str, prefix: &str) -> bool {
	src.len() >= prefix.len() &&
	src.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		dom,
		SettingsBuilder,
	};

	/// # Attributes After Processing.
	fn attrs(src: &str, mini: &Minifier) -> Vec<(String, Option<String>)> {
		let mut diag = Diagnostics::new(src);
		let mut doc = dom::parse(src, &mut diag);
		process(&mut doc.children, mini, &mut diag);

		fn find(nodes: &[Node]) -> Option<&Element> {
			for node in nodes {
				if let Node::Element(el) = node {
					if ! el.flags.implied() { return Some(el); }
					if let Some(el) = find(&el.children) { return Some(el); }
				}
			}
			None
		}

		find(&doc.children)
			.map(|el| el.attrs.iter().map(|a| (
				a.name.to_string(),
				a.value.as_ref().map(|_| decode(a.value()).into_owned()),
			)).collect())
			.unwrap_or_default()
	}

	/// # Shorthand.
	fn kv(k: &str, v: Option<&str>) -> (String, Option<String>) {
		(k.to_owned(), v.map(str::to_owned))
	}

	#[test]
	fn t_empty() {
		let mini = Minifier::default();
		assert_eq!(
			attrs("<p id=\"\" class=\"\" title=\"\n\" lang=\"\" dir=\"\">Some text</p>", &mini),
			Vec::new(),
		);

		// Values matter.
		assert_eq!(
			attrs("<input value=\"\" alt=\"\">", &mini),
			vec![kv("value", Some("")), kv("alt", Some(""))],
		);

		// Unless preserved.
		let settings = SettingsBuilder::default()
			.with_preservable_attributes("p[title], [id]")
			.build()
			.expect("Settings failed.");
		let mini = Minifier::new(settings);
		assert_eq!(
			attrs("<p id=\"\" class=\"\" title=\"\">Hi</p>", &mini),
			vec![kv("id", Some("")), kv("title", Some(""))],
		);
	}

	#[test]
	fn t_boolean() {
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("<input disabled=\"disabled\">", vec![kv("disabled", None)]),
			("<input DISABLED=\"\">", vec![kv("disabled", None)]),
			("<div hidden=\"hidden\">", vec![kv("hidden", None)]),
			("<div hidden=\"until-found\">", vec![kv("hidden", Some("until-found"))]),
			("<input value=\"checked\">", vec![kv("value", Some("checked"))]),
		] {
			assert_eq!(attrs(lhs, &mini), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_normalize() {
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("<div class=\"  a\n\tb   c \">", vec![kv("class", Some("a b c"))]),
			("<div style=\" color : red ; \">", vec![kv("style", Some("color:red"))]),
			(
				"<div style='content: \"  ;  \";'>",
				vec![kv("style", Some("content:\"  ;  \""))],
			),
			("<a href=\" /foo \">", vec![kv("href", Some("/foo"))]),
			("<td colspan=\" 2 \">", vec![kv("colspan", Some("2"))]),
			("<td colspan=\" two \">", vec![kv("colspan", Some(" two "))]),
			("<a onclick=\" go(); ; \">", vec![kv("onclick", Some("go()"))]),
			("<div data-x=\"  a  \">", vec![kv("data-x", Some("  a  "))]),
		] {
			assert_eq!(attrs(lhs, &mini), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_redundant() {
		let mini = Minifier::new(SettingsBuilder::aggressive().build().expect("Settings failed."));
		for (lhs, rhs) in [
			("<form method=\"get\">", Vec::new()),
			("<form method=\"post\">", vec![kv("method", Some("post"))]),
			("<form autocomplete=on enctype=\"application/x-www-form-urlencoded\">", Vec::new()),
			("<input type=\"TEXT\">", Vec::new()),
			("<input type=\"email\">", vec![kv("type", Some("email"))]),
			("<button type=submit>", Vec::new()),
			("<script language=\"JavaScript\" charset=\"utf-8\">", Vec::new()),
			("<script src=\"a.js\" charset=\"utf-8\">", vec![kv("src", Some("a.js")), kv("charset", Some("utf-8"))]),
			("<a id=\"x\" name=\"x\">", vec![kv("id", Some("x"))]),
			("<a id=\"x\" name=\"y\">", vec![kv("id", Some("x")), kv("name", Some("y"))]),
			("<td colspan=1 rowspan=\"1\">", Vec::new()),
			("<textarea wrap=soft>", Vec::new()),
			("<area shape=rect>", Vec::new()),
		] {
			assert_eq!(attrs(lhs, &mini), rhs, "{lhs}");
		}

		// Redundancy is opt-in.
		let mini = Minifier::default();
		assert_eq!(attrs("<form method=\"get\">", &mini), vec![kv("method", Some("get"))]);
	}

	#[test]
	fn t_types() {
		let mini = Minifier::default();
		for (lhs, rhs) in [
			("<script type=\"text/javascript\">", Vec::new()),
			("<script type=\"module\">", vec![kv("type", Some("module"))]),
			("<script type=\"application/json\">", vec![kv("type", Some("application/json"))]),
			("<style type=\"text/css\">", Vec::new()),
			("<link rel=stylesheet type=\"text/css\">", vec![kv("rel", Some("stylesheet"))]),
		] {
			assert_eq!(attrs(lhs, &mini), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_protocols() {
		let settings = SettingsBuilder::default()
			.with_remove_http_protocol_from_attributes(true)
			.with_remove_https_protocol_from_attributes(true)
			.with_remove_js_protocol_from_attributes(true)
			.build()
			.expect("Settings failed.");
		let mini = Minifier::new(settings);
		for (lhs, rhs) in [
			("<a href=\"http://x.com/\">", vec![kv("href", Some("//x.com/"))]),
			("<img src=\"HTTPS://x.com/a.png\">", vec![kv("src", Some("//x.com/a.png"))]),
			(
				"<a rel=\"nofollow external\" href=\"http://x.com/\">",
				vec![kv("rel", Some("nofollow external")), kv("href", Some("http://x.com/"))],
			),
			("<a href=\"javascript:go()\">", vec![kv("href", Some("javascript:go()"))]),
			("<a onclick=\"javascript: go();\">", vec![kv("onclick", Some("go()"))]),
			(
				"<html xmlns=\"http://www.w3.org/1999/xhtml\">",
				vec![kv("xmlns", Some("http://www.w3.org/1999/xhtml"))],
			),
		] {
			assert_eq!(attrs(lhs, &mini), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_case() {
		let mini = Minifier::default();
		assert_eq!(
			attrs("<DIV CLASS=a xml:Lang=en>", &mini),
			vec![kv("class", Some("a")), kv("xml:Lang", Some("en"))],
		);
		assert_eq!(
			attrs("<svg viewBox=\"0 0 1 1\">", &mini),
			vec![kv("viewBox", Some("0 0 1 1"))],
		);

		let mini = Minifier::new(SettingsBuilder::default().with_preserve_case(true).build().expect("Settings failed."));
		assert_eq!(attrs("<DIV CLASS=a>", &mini), vec![kv("CLASS", Some("a"))]);
	}

	#[test]
	fn t_meta_charset() {
		let mini = Minifier::default();
		assert_eq!(
			attrs("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">", &mini),
			vec![kv("charset", Some("UTF-8"))],
		);
		assert_eq!(
			attrs("<meta http-equiv=content-type content=\"text/html; charset=utf-8\" id=x>", &mini),
			vec![kv("charset", Some("utf-8")), kv("id", Some("x"))],
		);
		assert_eq!(
			attrs("<meta data-a=1 content=\"text/html; charset=utf-8\" http-equiv=content-type>", &mini),
			vec![kv("data-a", Some("1")), kv("charset", Some("utf-8"))],
		);
		assert_eq!(
			attrs("<meta http-equiv=\"refresh\" content=\"5\">", &mini),
			vec![kv("http-equiv", Some("refresh")), kv("content", Some("5"))],
		);
	}

	#[test]
	fn t_inline_errors() {
		let src = "<div style=\"color: red; }\"></div>";
		let mini = Minifier::default();
		let mut diag = Diagnostics::new(src);
		let mut doc = dom::parse(src, &mut diag);
		process(&mut doc.children, &mini, &mut diag);
		let (warnings, errors) = diag.into_parts();
		assert!(warnings.is_empty());
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].category(), Category::Css);
	}

	#[test]
	fn t_normalize_style() {
		for (lhs, rhs) in [
			("color:red", None),
			("color: red;", Some("color: red")),
			("  a:b;;  ", Some("a:b")),
			("content: ' ; '", None),
			("content: ' ;", None),
		] {
			assert_eq!(normalize_style(lhs).as_deref(), rhs, "{lhs}");
		}
	}
}
