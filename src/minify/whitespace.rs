/*!
# HTMincer: Whitespace.

Text nodes are collapsed and trimmed according to the whitespace mode.
Every mode does everything the mode before it does:

* `Safe` collapses runs and drops whitespace-only text where text is never rendered;
* `Medium` trims whitespace touching block-level boundaries;
* `Aggressive` also trims redundant whitespace across inline elements;
*/

use crate::{
	dom::{
		Element,
		Node,
	},
	Settings,
	strtendril::{
		self,
		ends_with_ws,
		has_line_break,
		is_whitespace,
	},
	tags,
	WhitespaceMode,
};
use tendril::StrTendril;



#[derive(Debug, Clone, Copy)]
/// # Options.
struct Options {
	/// # Mode.
	mode: WhitespaceMode,

	/// # Preserve New Lines?
	newlines: bool,
}



#[derive(Debug, Clone, Copy)]
/// # Parent Context.
struct Parent<'a> {
	/// # Tag (Lowercase).
	tag: &'a str,

	/// # HTML Namespace?
	html: bool,
}

impl Parent<'_> {
	/// # Document Root.
	///
	/// Top-level text is treated the way `<html>` treats it.
	const ROOT: Self = Self { tag: "html", html: true };

	/// # Drops Whitespace-Only Text?
	fn drops(self) -> bool {
		if self.html { tags::drops_whitespace(self.tag) }
		else { tags::svg_drops_whitespace(self.tag) }
	}

	/// # Ruby?
	fn ruby(self) -> bool { self.html && tags::is_ruby(self.tag) }

	/// # Block Boundary?
	fn block(self) -> bool {
		self.html && (tags::is_block(self.tag) || self.tag == "title")
	}

	/// # Inline Flow Root?
	fn flow_root(self) -> bool {
		self.html &&
		! tags::is_ruby(self.tag) &&
		(tags::is_block(self.tag) || tags::is_atomic_inline(self.tag))
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Flow Behavior.
///
/// How an element affects the inline flow around it.
enum Flow {
	/// # Line Boundary.
	Boundary,

	/// # Renders as Content.
	Content,

	/// # Not Rendered.
	Hidden,

	/// # Inline; Look Inside.
	Inline,
}

impl Flow {
	/// # From Element.
	fn new(el: &Element) -> Self {
		if ! el.ns.is_html() { return Self::Content; }
		let tag: &str = &el.local;
		if tag == "br" || tags::is_block(tag) || matches!(tag, "plaintext" | "xmp") {
			Self::Boundary
		}
		else if tags::is_atomic_inline(tag) { Self::Content }
		else if
			(tags::is_head_content(tag) && tag != "noscript") ||
			matches!(
				tag,
				"area" | "datalist" | "noembed" | "noframes" | "param" |
				"source" | "template" | "track" | "wbr"
			)
		{
			Self::Hidden
		}
		else if el.is_void() { Self::Content }
		else { Self::Inline }
	}
}



/// # Process Whitespace.
pub(super) fn process(nodes: &mut Vec<Node>, settings: &Settings) {
	let mode = settings.whitespace_mode();
	if mode == WhitespaceMode::None { return; }

	let opts = Options { mode, newlines: settings.preserve_new_lines() };
	container(nodes, Parent::ROOT, opts);
	prune(nodes);
}

/// # Process Container.
fn container(nodes: &mut [Node], parent: Parent<'_>, opts: Options) {
	let drops = parent.drops();
	let ruby = parent.ruby();
	let medium = WhitespaceMode::Medium <= opts.mode && parent.html && ! ruby;
	let block = parent.block();
	let len = nodes.len();

	for idx in 0..len {
		if let Node::Text(txt) = &mut nodes[idx] {
			// Drop it?
			if drops && is_whitespace(txt) {
				drop_text(txt, opts.newlines);
				continue;
			}

			strtendril::collapse_whitespace(txt, opts.newlines);
		}
		else { continue; }

		if medium {
			let prev = if idx == 0 { block } else { is_block(&nodes[idx - 1]) };
			let next = if idx + 1 == len { block } else { is_block(&nodes[idx + 1]) };
			if let Node::Text(txt) = &mut nodes[idx] {
				if prev && txt.starts_with(' ') { txt.pop_front(1); }
				if next && txt.ends_with(' ') { txt.pop_back(1); }
			}
		}
	}

	// Recurse.
	for node in nodes.iter_mut() {
		if let Node::Element(el) = node && ! skip(el) {
			let parent = Parent { tag: &el.local, html: el.ns.is_html() };
			container(&mut el.children, parent, opts);
		}
	}

	// Inline flow.
	if opts.mode == WhitespaceMode::Aggressive && parent.flow_root() {
		let mut space = true;
		forward(nodes, &mut space);
		let mut space = true;
		backward(nodes, &mut space);
	}
}

/// # Drop Whitespace-Only Text.
///
/// The text is emptied (and later pruned), unless it held a line break that
/// should be kept.
fn drop_text(txt: &mut StrTendril, newlines: bool) {
	if newlines && has_line_break(txt) { *txt = StrTendril::from_slice("\n"); }
	else { txt.clear(); }
}

/// # Is Block Element?
fn is_block(node: &Node) -> bool {
	node.as_element().is_some_and(|el| el.ns.is_html() && tags::is_block(&el.local))
}

/// # Skip Element?
///
/// The content of these is left exactly as-is.
fn skip(el: &Element) -> bool {
	el.ns.is_html() && (
		tags::is_preformatted(&el.local) ||
		matches!(&*el.local, "iframe" | "noembed" | "noframes")
	)
}

/// # Forward Flow.
///
/// Trim leading whitespace from text that follows other rendered whitespace
/// or a line boundary.
fn forward(nodes: &mut [Node], space: &mut bool) {
	for node in nodes {
		match node {
			Node::Text(txt) => {
				if *space && txt.starts_with(' ') { txt.pop_front(1); }
				if ! txt.is_empty() { *space = ends_with_ws(txt); }
			},
			Node::Element(el) => match Flow::new(el) {
				Flow::Boundary => { *space = true; },
				Flow::Content => { *space = false; },
				Flow::Hidden => {},
				Flow::Inline => forward(&mut el.children, space),
			},
			_ => {},
		}
	}
}

/// # Backward Flow.
///
/// Trim trailing whitespace from text that precedes a line boundary.
fn backward(nodes: &mut [Node], space: &mut bool) {
	for node in nodes.iter_mut().rev() {
		match node {
			Node::Text(txt) => {
				if *space && txt.ends_with(' ') { txt.pop_back(1); }
				if ! txt.is_empty() { *space = false; }
			},
			Node::Element(el) => match Flow::new(el) {
				Flow::Boundary => { *space = true; },
				Flow::Content => { *space = false; },
				Flow::Hidden => {},
				Flow::Inline => backward(&mut el.children, space),
			},
			_ => {},
		}
	}
}

/// # Prune Empty Text.
fn prune(nodes: &mut Vec<Node>) {
	nodes.retain(|n| n.as_text().is_none_or(|t| ! t.is_empty()));
	for node in nodes {
		if let Node::Element(el) = node && ! skip(el) { prune(&mut el.children); }
	}
}
