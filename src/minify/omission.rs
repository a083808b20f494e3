/*!
# HTMincer: Optional Tags.

The HTML spec allows a number of start and end tags to be left out when
the surrounding markup makes them obvious. This pass works out which ones
can go, and flags the elements accordingly for the serializer.

End tags that were never in the source are only ever put back when leaving
them out would change the meaning of the document.
*/

use crate::{
	dom::{
		Element,
		Node,
	},
	Settings,
	strtendril::starts_with_ws,
	tags,
};



#[derive(Debug, Clone, Copy)]
/// # Parent Context.
struct Parent<'a> {
	/// # Tag (Lowercase).
	tag: &'a str,

	/// # HTML Namespace?
	html: bool,
}



/// # Flag Optional Tags.
pub(super) fn process(nodes: &mut [Node], settings: &Settings) {
	children(nodes, None, settings);
}

/// # Process Children.
fn children(nodes: &mut [Node], parent: Option<Parent<'_>>, settings: &Settings) {
	for idx in 0..nodes.len() {
		let (before, rest) = nodes.split_at_mut(idx);
		let Some((node, after)) = rest.split_first_mut() else { break; };
		let Node::Element(el) = node else { continue; };

		let omit = omit_end(el, after, parent, settings);
		el.flags.set_omit_end(omit);

		let omit = omit_start(el, before, settings);
		el.flags.set_omit_start(omit);

		let parent = Parent { tag: &el.local, html: el.ns.is_html() };
		children(&mut el.children, Some(parent), settings);
	}
}



/// # Omit End Tag?
fn omit_end(el: &Element, after: &[Node], parent: Option<Parent<'_>>, settings: &Settings) -> bool {
	// Nothing to write in these cases.
	if
		el.flags.implied() ||
		el.flags.eof() ||
		el.flags.misnested() ||
		el.is_void()
	{
		return true;
	}
	if ! el.ns.is_html() { return false; }

	let allowed = end_optional(el, after, parent, settings);
	if el.flags.has_end() {
		allowed &&
		settings.remove_optional_end_tags() &&
		! settings.preserve_optional_tag(&el.local)
	}
	else { allowed }
}

/// # End Tag Optional?
///
/// This applies the spec rules for the element, given what follows it.
fn end_optional(
	el: &Element,
	after: &[Node],
	parent: Option<Parent<'_>>,
	settings: &Settings,
) -> bool {
	let tag: &str = &el.local;
	let next = next_sibling(after, skips_whitespace(tag));
	let next_is = |list: &[&str]| next.is_some_and(|n| is_any(n, list));

	match tag {
		"body" | "html" => ! next.is_some_and(Node::is_comment),
		"head" => match next {
			None => true,
			Some(Node::Element(body)) if body.is("body") =>
				! (body.flags.implied() || omit_start(body, &[], settings)) ||
				body_leads_cleanly(body),
			Some(Node::Text(txt)) => ! starts_with_ws(txt),
			Some(n) => ! n.is_comment(),
		},
		"caption" | "colgroup" => match next {
			None | Some(Node::Element(_)) => true,
			Some(_) => false,
		},
		"dd" => next.is_none() || next_is(&["dd", "dt"]),
		"dt" => next_is(&["dd", "dt"]),
		"li" => next.is_none() || next_is(&["li"]),
		"optgroup" => next.is_none() || next_is(&["hr", "optgroup"]),
		"option" => next.is_none() || next_is(&["hr", "optgroup", "option"]),
		"p" => match next {
			Some(n) => n.as_element().is_some_and(|e| e.ns.is_html() && closes_p(&e.local)),
			None => parent.is_none_or(|p|
				! p.html ||
				! (matches!(p.tag, "a" | "audio" | "del" | "ins" | "map" | "noscript" | "video") || p.tag.contains('-'))
			),
		},
		"rb" | "rp" | "rt" => next.is_none() || next_is(&["rb", "rp", "rt", "rtc"]),
		"rtc" => next.is_none() || next_is(&["rb", "rp", "rtc"]),
		"tbody" => next.is_none() || next_is(&["tbody", "tfoot"]),
		"td" | "th" => next.is_none() || next_is(&["td", "th"]),
		"tfoot" => next.is_none(),
		"thead" => next_is(&["tbody", "tfoot"]),
		"tr" => next.is_none() || next_is(&["tr"]),
		_ => false,
	}
}

/// # Omit Start Tag?
fn omit_start(el: &Element, before: &[Node], settings: &Settings) -> bool {
	if el.flags.implied() || el.flags.reopened() { return true; }
	if
		! settings.remove_optional_start_tags() ||
		! el.ns.is_html() ||
		! el.attrs.is_empty() ||
		settings.preserve_optional_tag(&el.local)
	{
		return false;
	}

	match &*el.local {
		"html" => ! first_child(el, true).is_some_and(Node::is_comment),
		"head" => first_child(el, false).is_none_or(|n| n.as_element().is_some()),
		"body" => body_leads_cleanly(el),
		"colgroup" =>
			el.flags.omit_end() &&
			first_child(el, true).is_some_and(|n| is_any(n, &["col"])) &&
			! prev_sibling(before).is_some_and(|n| omitted_end(n, &["colgroup"])),
		"tbody" =>
			el.flags.omit_end() &&
			first_child(el, true).is_some_and(|n| is_any(n, &["tr"])) &&
			! prev_sibling(before).is_some_and(|n| omitted_end(n, &["tbody", "tfoot", "thead"])),
		_ => false,
	}
}

/// # Body Leads Cleanly?
///
/// The `<body>` start tag can only be dropped if its content doesn't open
/// with something that would otherwise land in the `<head>`.
fn body_leads_cleanly(body: &Element) -> bool {
	match body.children.first() {
		None => true,
		Some(Node::Text(txt)) => ! starts_with_ws(txt),
		Some(Node::Element(e)) =>
			! e.ns.is_html() ||
			! matches!(&*e.local, "link" | "meta" | "noscript" | "script" | "style" | "template"),
		Some(n) => ! n.is_comment(),
	}
}



/// # Skips Whitespace?
///
/// Trailing whitespace inside these elements is never rendered, so
/// whitespace between them and their next sibling can be ignored.
fn skips_whitespace(tag: &str) -> bool {
	matches!(
		tag,
		"body" | "dd" | "dt" | "html" | "li" | "optgroup" | "option" | "p" |
		"tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
	)
}

/// # Closes Paragraph?
fn closes_p(tag: &str) -> bool {
	tags::closes_p(tag) || matches!(tag, "hr" | "p" | "table")
}

/// # Next Sibling.
fn next_sibling(after: &[Node], skip_ws: bool) -> Option<&Node> {
	after.iter().find(|n| ! (skip_ws && n.is_whitespace()))
}

/// # Previous Sibling.
///
/// Whitespace-only text is skipped.
fn prev_sibling(before: &[Node]) -> Option<&Node> {
	before.iter().rev().find(|n| ! n.is_whitespace())
}

/// # First Child.
fn first_child(el: &Element, skip_ws: bool) -> Option<&Node> {
	next_sibling(&el.children, skip_ws)
}

/// # Is HTML Element (One Of)?
fn is_any(node: &Node, list: &[&str]) -> bool {
	node.as_element().is_some_and(|e| e.ns.is_html() && list.contains(&&*e.local))
}

/// # Element (One Of) With Omitted End?
fn omitted_end(node: &Node, list: &[&str]) -> bool {
	node.as_element().is_some_and(|e| e.flags.omit_end()) && is_any(node, list)
}
