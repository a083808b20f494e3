/*!
# HTMincer: Document Cleanup.

Comments, doctypes, and (optionally) pointless empty elements.
*/

use crate::{
	dom::{
		Element,
		Node,
	},
	Settings,
	strtendril::is_whitespace,
	tags,
};
use super::{
	merge_text,
	push_node,
};
use tendril::StrTendril;



/// # Short Doctype.
const SHORT_DOCTYPE: &str = "DOCTYPE html";



/// # Clean Up Document Nodes.
///
/// Strip comments (other than the special ones) and shorten the doctype, as
/// the settings allow.
pub(super) fn process(nodes: &mut Vec<Node>, settings: &Settings) {
	let comments = settings.remove_html_comments();
	let doctype = settings.use_short_doctype();
	if ! comments && ! doctype { return; }

	if doctype {
		for node in nodes.iter_mut() {
			if let Node::Doctype(txt) = node && is_html_doctype(txt) && &**txt != SHORT_DOCTYPE {
				*txt = StrTendril::from_slice(SHORT_DOCTYPE);
			}
		}
	}

	if comments { strip_comments(nodes); }
}

/// # Strip Comments.
fn strip_comments(nodes: &mut Vec<Node>) {
	let before = nodes.len();
	nodes.retain(|n| match n {
		Node::Comment(txt) => keep_comment(txt),
		_ => true,
	});
	if nodes.len() != before { merge_text(nodes); }

	for node in nodes {
		if let Node::Element(el) = node { strip_comments(&mut el.children); }
	}
}

#[must_use]
/// # Keep Comment?
///
/// `<!--! … -->`, `<!--noindex-->`, and knockout's containerless binding
/// markers are always kept.
fn keep_comment(txt: &str) -> bool {
	if txt.starts_with('!') { return true; }

	let txt = txt.trim();
	txt.eq_ignore_ascii_case("noindex") ||
	txt.eq_ignore_ascii_case("/noindex") ||
	txt == "/ko" ||
	txt.starts_with("ko ")
}

#[must_use]
/// # Is HTML Doctype?
fn is_html_doctype(txt: &str) -> bool {
	txt.get(..7).is_some_and(|t| t.eq_ignore_ascii_case("doctype")) &&
	txt[7..].trim_start().get(..4).is_some_and(|t| t.eq_ignore_ascii_case("html"))
}



/// # Remove Contentless Tags.
///
/// Drop elements with no content and no meaningful attributes, deepest
/// first. Whitespace-only content is hoisted into the parent in their
/// place.
pub(super) fn contentless(nodes: &mut Vec<Node>) {
	let old = std::mem::take(nodes);
	nodes.reserve(old.len());

	for mut node in old {
		if let Node::Element(el) = &mut node {
			contentless(&mut el.children);
			if is_contentless(el) {
				for child in std::mem::take(&mut el.children) { push_node(nodes, child); }
				continue;
			}
		}
		push_node(nodes, node);
	}
}

#[must_use]
/// # Is Contentless?
fn is_contentless(el: &Element) -> bool {
	el.ns.is_html() &&
	! el.flags.implied() &&
	// Formatting closed out of turn lives on in what follows.
	! el.flags.misnested() &&
	! el.flags.reopened() &&
	! tags::keep_when_empty(&el.local) &&
	// Custom elements might be upgraded by script.
	! el.local.contains('-') &&
	el.attrs.iter().all(|a| ! tags::meaningful_attr(&a.local)) &&
	el.children.iter().all(|n| n.as_text().is_some_and(is_whitespace))
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		diagnostic::Diagnostics,
		dom,
	};

	/// # Outline.
	///
	/// A compact description of the tree: non-implied element names and text.
	fn outline(nodes: &[Node], out: &mut String) {
		for node in nodes {
			match node {
				Node::Element(el) => {
					if el.flags.implied() { outline(&el.children, out); }
					else {
						out.push_str(&el.local);
						out.push('(');
						outline(&el.children, out);
						out.push(')');
					}
				},
				Node::Text(txt) => out.push_str(txt),
				Node::Comment(txt) => {
					out.push_str("<!--");
					out.push_str(txt);
					out.push_str("-->");
				},
				Node::Doctype(txt) => {
					out.push('!');
					out.push_str(txt);
				},
				_ => out.push('?'),
			}
		}
	}

	/// # Parse and Run.
	fn run(src: &str, cb: fn(&mut Vec<Node>)) -> String {
		let mut diag = Diagnostics::new(src);
		let mut doc = dom::parse(src, &mut diag);
		cb(&mut doc.children);
		let mut out = String::new();
		outline(&doc.children, &mut out);
		out
	}

	#[test]
	fn t_comments() {
		let settings = Settings::default();
		for (lhs, rhs) in [
			("<p>A<!-- one -->B</p>", "p(AB)"),
			("<!--! Keep --><p>A</p>", "<!--! Keep -->p(A)"),
			("<!--noindex-->A<!--/noindex-->", "<!--noindex-->A<!--/noindex-->"),
			("<!-- ko if: x -->A<!-- /ko -->", "<!-- ko if: x -->A<!-- /ko -->"),
			("<!-- kodiak -->A", "A"),
			("<p>AT&<!-- x -->amp;T</p>", "p(AT&amp;amp;T)"),
			("<p>a <!-- x --> b</p>", "p(a  b)"),
			("<!--[if IE]>x<![endif]--><p>A", "?p(A)"),
		] {
			let mut diag = Diagnostics::new(lhs);
			let mut doc = dom::parse(lhs, &mut diag);
			process(&mut doc.children, &settings);
			let mut out = String::new();
			outline(&doc.children, &mut out);
			assert_eq!(out, rhs, "{lhs}");
		}
	}

	#[test]
	fn t_doctype() {
		for (lhs, rhs) in [
			("<!DOCTYPE html>", "!DOCTYPE html"),
			("<!doctype HTML>", "!DOCTYPE html"),
			(
				"<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">",
				"!DOCTYPE html",
			),
			("<!DOCTYPE svg>", "!DOCTYPE svg"),
		] {
			let out = run(lhs, |nodes| process(nodes, &Settings::default()));
			assert_eq!(out, rhs, "{lhs}");
		}
	}

	#[test]
	fn t_contentless() {
		for (lhs, rhs) in [
			("<p>A<span></span>B</p>", "p(AB)"),
			("<div><p> <b></b> </p></div>", "div(  )"),
			("<span id=x></span><i class=icon></i><a href=/></a>", "span()i()a()"),
			("<span title=x></span>", ""),
			("<my-widget></my-widget>", "my-widget()"),
			("<table><tr><td></td></tr></table>", "table(tr(td()))"),
			("<p><img src=x.png></p>", "p(img())"),
			("<ul><li></li></ul><textarea></textarea>", "ul(li())textarea()"),
			("<svg><path d=M0/></svg>", "svg(path())"),
		] {
			assert_eq!(run(lhs, contentless), rhs, "{lhs}");
		}
	}
}
