/*!
# HTMincer: Tree Builder.

This assembles tokens into a tree, following (a simplified take on) the
HTML content model: implied end tags, synthesized `<html>`/`<head>`/`<body>`
wrappers, foreign-content islands, and the handful of browser quirks that
matter for faithful re-serialization.

Open elements live on a stack and are only attached to their parent once
closed, so the tree is owned outright with no reference counting.
*/

use crate::{
	Category,
	diagnostic::Diagnostics,
	dom::{
		Attribute,
		Document,
		Element,
		Node,
	},
	Namespace,
	Position,
	strtendril::is_whitespace,
	tags,
	tokenizer::{
		RawAttribute,
		StartTag,
		Token,
		Tokenizer,
	},
};
use tendril::StrTendril;



/// # Button Scope.
///
/// An open `<p>` isn't visible to implied closes from beyond these.
const BUTTON_SCOPE: &[&str] = &[
	"applet", "button", "caption", "html", "marquee", "object", "table",
	"td", "template", "th",
];

/// # Default Scope.
const DEFAULT_SCOPE: &[&str] = &[
	"applet", "caption", "html", "marquee", "object", "table", "td",
	"template", "th",
];

/// # List Item Scope.
const LIST_SCOPE: &[&str] = &[
	"applet", "caption", "html", "marquee", "object", "ol", "table", "td",
	"template", "th", "ul",
];

/// # Table Scope.
const TABLE_SCOPE: &[&str] = &["html", "table", "template"];



#[derive(Debug, Clone, Copy, Default, Eq, Ord, PartialEq, PartialOrd)]
/// # Insertion Mode.
///
/// Only the document-structure modes are tracked; everything past the
/// `<body>` is handled generically.
enum Mode {
	#[default]
	/// # Nothing Yet.
	Initial,

	/// # In `<html>`, Before `<head>`.
	BeforeHead,

	/// # In `<head>`.
	InHead,

	/// # After `</head>`.
	AfterHead,

	/// # In `<body>`.
	InBody,
}



#[must_use]
/// # Parse.
///
/// Parse the source into a document tree. This never fails; problems are
/// recorded as warnings and worked around.
pub(crate) fn parse(src: &str, diag: &mut Diagnostics<'_>) -> Document {
	let mut tokenizer = Tokenizer::new(src);
	let mut builder = TreeBuilder::default();

	loop {
		tokenizer.set_foreign(builder.in_foreign());
		let Some(token) = tokenizer.next_token(diag) else { break; };

		match token {
			Token::StartTag(tag) =>
				if builder.start_tag(tag, diag) &&
					let Some(el) = builder.stack.last()
				{
					tokenizer.enter_raw_text(&el.local);
				},
			Token::EndTag(name, pos) => builder.end_tag(name, pos, diag),
			Token::Text(txt, pos) => builder.text(txt, pos),
			Token::Comment(txt, _) => builder.insert(Node::Comment(StrTendril::from_slice(txt))),
			Token::Conditional(c, _) => builder.insert(Node::Conditional(c)),
			Token::Cdata(txt, _) => builder.insert(Node::Cdata(StrTendril::from_slice(txt))),
			Token::Doctype(txt, pos) => builder.doctype(txt, pos, diag),
			Token::XmlDeclaration(txt, _) => builder.insert(Node::XmlDeclaration(StrTendril::from_slice(txt))),
		}
	}

	builder.finish(diag)
}



#[derive(Debug, Default)]
/// # Tree Builder.
struct TreeBuilder {
	/// # Top-Level Nodes.
	root: Vec<Node>,

	/// # Open Elements.
	stack: Vec<Element>,

	/// # Insertion Mode.
	mode: Mode,

	/// # Formatting Elements to Reopen.
	///
	/// Browsers recreate formatting elements closed out of turn around the
	/// content that follows. `None` entries are markers; nothing before one
	/// is reopened until its element closes.
	reopen: Vec<Option<Element>>,
}

impl TreeBuilder {
	#[must_use]
	/// # In Foreign Content?
	///
	/// True if the current element is SVG or MathML, but not an HTML
	/// integration point.
	fn in_foreign(&self) -> bool {
		self.stack.last().is_some_and(|el| ! el.ns.is_html() && ! is_integration_point(el))
	}

	#[must_use]
	/// # Current Element Is?
	fn top_is(&self, tag: &str) -> bool {
		self.stack.last().is_some_and(|el| el.is(tag))
	}

	/// # Insert Node.
	///
	/// Append a node to the current element (or the document).
	fn insert(&mut self, node: Node) {
		let children = match self.stack.last_mut() {
			Some(el) => &mut el.children,
			None => &mut self.root,
		};

		// Merge adjacent text.
		if let Node::Text(ref txt) = node &&
			let Some(Node::Text(last)) = children.last_mut()
		{
			last.push_tendril(txt);
			return;
		}

		children.push(node);
	}

	/// # Pop.
	///
	/// Close the current element, attaching it to its parent.
	fn pop(&mut self) {
		if let Some(el) = self.stack.pop() {
			if el.ns.is_html() && tags::is_formatting_marker(&el.local) {
				self.clear_to_marker();
			}
			self.insert(Node::Element(el));
		}
	}

	/// # Pop (Implicitly).
	///
	/// Like `pop`, but the element had no end tag of its own; complain if
	/// one was required.
	///
	/// Formatting elements are flagged so no end tag gets written for them
	/// either, and queued up for reopening.
	fn pop_implied(&mut self, diag: &mut Diagnostics<'_>) {
		if let Some(el) = self.stack.last_mut() {
			if needs_end(el) {
				diag.warn(
					Category::Parse,
					el.pos,
					format!("Element <{}> was implicitly closed.", el.name),
				);
			}

			if el.ns.is_html() && tags::is_formatting(&el.local) {
				el.flags.set_misnested(true);
				let mut again = Element::new(&el.name, &el.local, Namespace::Html, el.pos);
				again.flags.set_reopened(true);
				self.reopen.push(Some(again));
			}
		}
		self.pop();
	}

	#[must_use]
	/// # Can Reopen Formatting?
	///
	/// Only within the body proper, and never directly inside raw text or
	/// table structure.
	fn can_reopen(&self) -> bool {
		self.mode == Mode::InBody &&
		! self.in_foreign() &&
		! self.stack.last().is_some_and(|el|
			el.is_raw_text() ||
			(el.ns.is_html() && matches!(&*el.local, "colgroup" | "table" | "tbody" | "tfoot" | "thead" | "tr"))
		)
	}

	/// # Reopen Formatting.
	///
	/// Push the pending formatting elements (since the last marker) back
	/// onto the stack, outermost first.
	fn reopen_formatting(&mut self) {
		let start = self.reopen.iter().rposition(Option::is_none).map_or(0, |n| n + 1);
		if start == self.reopen.len() { return; }

		let mut pending: Vec<Element> = self.reopen.drain(start..).flatten().collect();
		pending.sort_by_key(|el| el.pos);
		self.stack.extend(pending);
	}

	/// # Clear to Marker.
	fn clear_to_marker(&mut self) {
		while let Some(entry) = self.reopen.pop() {
			if entry.is_none() { break; }
		}
	}

	/// # Close Open Element.
	///
	/// Look down the stack for one of the `targets`, stopping early at any
	/// element matching `stop`. If found, everything above it is closed
	/// implicitly, followed by the target itself.
	///
	/// Returns `true` if a target was closed.
	fn close_open<F>(
		&mut self,
		targets: &[&str],
		stop: F,
		explicit: bool,
		diag: &mut Diagnostics<'_>,
	) -> bool
	where F: Fn(&Element) -> bool {
		let mut found = None;
		for (idx, el) in self.stack.iter().enumerate().rev() {
			if el.ns.is_html() && targets.contains(&&*el.local) {
				found = Some(idx);
				break;
			}
			if stop(el) { break; }
		}

		let Some(idx) = found else { return false; };
		while self.stack.len() > idx + 1 { self.pop_implied(diag); }
		if explicit && let Some(el) = self.stack.last_mut() {
			el.flags.set_has_end(true);
		}
		self.pop();
		true
	}

	/// # Close Head.
	fn close_head(&mut self, diag: &mut Diagnostics<'_>) {
		if self.mode == Mode::InHead {
			self.close_open(&["head"], |_| false, false, diag);
			self.mode = Mode::AfterHead;
		}
	}

	/// # Merge Attributes.
	///
	/// A repeated `<html>` or `<body>` adds any new attributes to the
	/// original.
	fn merge_attrs(&mut self, tag: &str, raw: StartTag<'_>, diag: &mut Diagnostics<'_>) {
		diag.warn(Category::Parse, raw.pos, format!("Duplicate <{tag}> start tag."));
		if let Some(el) = self.stack.iter_mut().find(|el| el.is(tag)) {
			for a in raw.attrs {
				let a = attribute(a);
				if ! el.has_attr(&a.local) { el.attrs.push(a); }
			}
		}
	}
}

impl TreeBuilder {
	/// # Start Tag.
	///
	/// Returns `true` if a raw-text element was opened.
	fn start_tag(&mut self, tag: StartTag<'_>, diag: &mut Diagnostics<'_>) -> bool {
		let lower = tag.name.to_ascii_lowercase();
		let lower = lower.as_str();

		// Foreign content keeps going unless an HTML tag breaks it.
		if self.in_foreign() {
			let font = lower == "font" && tag.attrs.iter().any(|a|
				["color", "face", "size"].iter().any(|n| a.name.eq_ignore_ascii_case(n))
			);
			if ! tags::breaks_foreign(lower) && ! font {
				return self.insert_element(tag, lower, diag);
			}

			diag.warn(Category::Parse, tag.pos, format!("<{}> closed the open foreign content.", tag.name));
			while self.in_foreign() { self.pop(); }
		}

		// Document structure.
		if self.mode == Mode::Initial {
			if lower == "html" {
				self.stack.push(element(tag, lower, Namespace::Html));
				self.mode = Mode::BeforeHead;
				return false;
			}
			self.stack.push(Element::implied("html"));
			self.mode = Mode::BeforeHead;
		}

		match lower {
			"html" => {
				self.merge_attrs("html", tag, diag);
				return false;
			},
			"head" if self.mode != Mode::BeforeHead => {
				diag.warn(Category::Parse, tag.pos, "Misplaced <head> ignored.");
				return false;
			},
			"body" if self.mode == Mode::InBody => {
				self.merge_attrs("body", tag, diag);
				return false;
			},
			_ => {},
		}

		if self.mode == Mode::BeforeHead {
			if lower == "head" {
				self.stack.push(element(tag, lower, Namespace::Html));
				self.mode = Mode::InHead;
				return false;
			}

			if tags::is_head_content(lower) {
				self.stack.push(Element::implied("head"));
				self.mode = Mode::InHead;
			}
			else { self.mode = Mode::AfterHead; }
		}

		if
			self.mode == Mode::InHead &&
			self.top_is("head") &&
			! tags::is_head_content(lower)
		{
			self.close_head(diag);
		}

		if self.mode == Mode::AfterHead {
			self.mode = Mode::InBody;
			if lower == "body" {
				self.stack.push(element(tag, lower, Namespace::Html));
				return false;
			}
			self.stack.push(Element::implied("body"));
		}

		self.insert_element(tag, lower, diag)
	}

	/// # Insert Element.
	///
	/// Returns `true` if a raw-text element was opened.
	fn insert_element(&mut self, tag: StartTag<'_>, lower: &str, diag: &mut Diagnostics<'_>) -> bool {
		let ns = self.child_ns(lower);
		if ns.is_html() { self.implied_end_tags(lower, diag); }

		let self_closing = tag.self_closing;
		let pos = tag.pos;
		let el = element(tag, lower, ns);

		// Foreign elements can self-close.
		if ! ns.is_html() {
			if self_closing { self.insert(Node::Element(el)); }
			else { self.stack.push(el); }
			return false;
		}

		if ! tags::is_block(lower) && ! tags::is_table_part(lower) && self.can_reopen() {
			self.reopen_formatting();
		}

		// Void elements never have children.
		if el.is_void() {
			self.insert(Node::Element(el));
			return false;
		}

		if self_closing {
			diag.warn(Category::Parse, pos, format!("Self-closing syntax on non-void <{}> ignored.", el.name));
		}

		if tags::is_formatting_marker(lower) { self.reopen.push(None); }
		let raw = el.is_raw_text();
		self.stack.push(el);
		raw
	}

	/// # Child Namespace.
	fn child_ns(&self, lower: &str) -> Namespace {
		match self.stack.last() {
			Some(parent) => parent.ns.child(&parent.local, lower, is_html_annotation(parent)),
			None => Namespace::Html.child("", lower, false),
		}
	}

	/// # Implied End Tags.
	///
	/// Close whatever a new HTML `tag` closes implicitly.
	fn implied_end_tags(&mut self, tag: &str, diag: &mut Diagnostics<'_>) {
		match tag {
			"li" => { self.close_open(&["li"], stops_list_item, false, diag); },
			"dd" | "dt" => { self.close_open(&["dd", "dt"], stops_list_item, false, diag); },
			"option" => if self.top_is("option") { self.pop(); },
			"optgroup" => {
				if self.top_is("option") { self.pop(); }
				if self.top_is("optgroup") { self.pop(); }
			},
			"caption" | "colgroup" | "tbody" | "tfoot" | "thead" => {
				self.close_open(
					&["caption", "colgroup", "tbody", "tfoot", "thead"],
					|el| in_scope(el, TABLE_SCOPE),
					false,
					diag,
				);
			},
			"tr" => {
				self.close_open(
					&["caption", "colgroup", "tr"],
					|el| in_scope(el, TABLE_SCOPE) || el.is("tbody") || el.is("thead") || el.is("tfoot"),
					false,
					diag,
				);
			},
			"td" | "th" => {
				self.close_open(
					&["caption", "colgroup", "td", "th"],
					|el| in_scope(el, TABLE_SCOPE) || el.is("tr"),
					false,
					diag,
				);
			},
			"rb" | "rtc" => {
				self.close_open(&["rb", "rp", "rt", "rtc"], |el| el.is("ruby"), false, diag);
			},
			"rp" | "rt" => {
				self.close_open(&["rb", "rp", "rt"], |el| el.is("ruby") || el.is("rtc"), false, diag);
			},
			_ => {},
		}

		// Columns are the only thing a <colgroup> can hold.
		if tag != "col" && tag != "template" && self.top_is("colgroup") { self.pop(); }

		if tags::closes_p(tag) {
			self.close_open(&["p"], |el| in_scope(el, BUTTON_SCOPE), false, diag);
		}

		if
			tags::is_heading(tag) &&
			self.stack.last().is_some_and(|el| el.ns.is_html() && tags::is_heading(&el.local))
		{
			self.pop_implied(diag);
		}
	}
}

impl TreeBuilder {
	/// # End Tag.
	fn end_tag(&mut self, name: &str, pos: Position, diag: &mut Diagnostics<'_>) {
		let lower = name.to_ascii_lowercase();
		match lower.as_str() {
			"html" | "body" => {
				if let Some(el) = self.stack.iter_mut().find(|el| el.is(&lower)) {
					el.flags.set_has_end(true);
				}
				else { unmatched(name, pos, diag); }
			},
			"head" =>
				if self.mode == Mode::InHead && self.top_is("head") {
					if let Some(el) = self.stack.last_mut() { el.flags.set_has_end(true); }
					self.pop();
					self.mode = Mode::AfterHead;
				}
				else { unmatched(name, pos, diag); },
			"p" =>
				if ! self.close_open(&["p"], |el| in_scope(el, BUTTON_SCOPE), true, diag) {
					// Browsers turn a stray </p> into an empty paragraph.
					diag.warn(Category::Parse, pos, "Unmatched </p> treated as <p></p>.");
					self.ensure_body(diag);
					let mut el = Element::new(name, "p", Namespace::Html, pos);
					el.flags.set_has_end(true);
					self.insert(Node::Element(el));
				},
			"br" => {
				// And a stray </br> into a line break.
				diag.warn(Category::Parse, pos, "Stray </br> treated as <br>.");
				self.ensure_body(diag);
				self.insert(Node::Element(Element::new(name, "br", Namespace::Html, pos)));
			},
			_ => {
				let lower = lower.as_str();

				// Closing a formatting element that is waiting to be
				// reopened just cancels it, but the end tag has to be kept
				// for the same to happen on the next read.
				if let Some(mut el) = self.take_pending(lower) {
					el.flags.set_has_end(true);
					self.insert(Node::Element(el));
					return;
				}

				let scope: &[&str] = match lower {
					"caption" | "colgroup" | "table" | "tbody" | "td" | "tfoot" |
					"th" | "thead" | "tr" => TABLE_SCOPE,
					"li" => LIST_SCOPE,
					_ => DEFAULT_SCOPE,
				};

				let mut found = None;
				for (idx, el) in self.stack.iter().enumerate().rev() {
					if &*el.local == lower {
						found = Some(idx);
						break;
					}
					if el.ns.is_html() && scope.contains(&&*el.local) { break; }
				}

				if let Some(idx) = found {
					while self.stack.len() > idx + 1 { self.pop_implied(diag); }
					if let Some(el) = self.stack.last_mut() { el.flags.set_has_end(true); }
					self.pop();
				}
				else { unmatched(name, pos, diag); }
			},
		}
	}

	/// # Take Pending Formatting.
	///
	/// Remove and return the most recent formatting element named `tag`
	/// waiting to be reopened, if any.
	fn take_pending(&mut self, tag: &str) -> Option<Element> {
		let idx = self.reopen.iter()
			.rposition(|e| e.as_ref().is_none_or(|el| &*el.local == tag))?;
		if self.reopen[idx].is_none() { return None; }
		self.reopen.remove(idx)
	}

	/// # Ensure Body.
	///
	/// Move past the document head, synthesizing a body if needed.
	fn ensure_body(&mut self, diag: &mut Diagnostics<'_>) {
		if self.mode == Mode::Initial {
			self.stack.push(Element::implied("html"));
			self.mode = Mode::AfterHead;
		}
		if self.mode == Mode::BeforeHead { self.mode = Mode::AfterHead; }
		if self.mode == Mode::InHead && self.top_is("head") { self.close_head(diag); }
		if self.mode == Mode::AfterHead {
			self.stack.push(Element::implied("body"));
			self.mode = Mode::InBody;
		}
	}

	/// # Text.
	fn text(&mut self, txt: &str, pos: Position) {
		let ws = is_whitespace(txt);
		match self.mode {
			Mode::Initial =>
				if ! ws {
					self.stack.push(Element::implied("html"));
					self.stack.push(Element::implied("body"));
					self.mode = Mode::InBody;
				},
			Mode::BeforeHead | Mode::AfterHead =>
				if ! ws {
					self.stack.push(Element::implied("body"));
					self.mode = Mode::InBody;
				},
			Mode::InHead =>
				if ! ws && self.top_is("head") {
					self.pop();
					self.stack.push(Element::implied("body"));
					self.mode = Mode::InBody;
				},
			Mode::InBody => {},
		}

		if self.can_reopen() { self.reopen_formatting(); }

		if
			let Some(el) = self.stack.last_mut() &&
			el.children.is_empty() &&
			el.is_raw_text()
		{
			el.inner = pos;
		}

		self.insert(Node::Text(StrTendril::from_slice(txt)));
	}

	/// # Doctype.
	fn doctype(&mut self, txt: &str, pos: Position, diag: &mut Diagnostics<'_>) {
		if self.stack.is_empty() {
			self.insert(Node::Doctype(StrTendril::from_slice(txt)));
		}
		else {
			diag.warn(Category::Parse, pos, "Misplaced doctype dropped.");
		}
	}

	/// # Finish.
	///
	/// Close anything still open and return the document.
	fn finish(mut self, diag: &mut Diagnostics<'_>) -> Document {
		while let Some(el) = self.stack.last_mut() {
			if ! el.flags.implied() && ! el.flags.has_end() {
				el.flags.set_eof(true);
				if needs_end(el) {
					diag.warn(
						Category::Parse,
						el.pos,
						format!("Element <{}> was not closed before the end of input.", el.name),
					);
				}
			}
			self.pop();
		}

		Document { children: self.root }
	}
}



#[must_use]
/// # Convert Attribute.
fn attribute(raw: RawAttribute<'_>) -> Attribute {
	Attribute {
		name: StrTendril::from_slice(raw.name),
		local: StrTendril::from(raw.name.to_ascii_lowercase()),
		value: raw.value.map(StrTendril::from_slice),
		quote: raw.quote,
		pos: raw.pos,
	}
}

#[must_use]
/// # New Element From Tag.
fn element(tag: StartTag<'_>, lower: &str, ns: Namespace) -> Element {
	let mut el = Element::new(tag.name, lower, ns, tag.pos);
	el.attrs = tag.attrs.into_iter().map(attribute).collect();
	el
}

#[must_use]
/// # Needs an End Tag?
fn needs_end(el: &Element) -> bool {
	! el.flags.implied() &&
	! el.flags.reopened() &&
	! el.is_void() &&
	! (el.ns.is_html() && tags::optional_end(&el.local))
}

#[must_use]
/// # Scope Boundary?
fn in_scope(el: &Element, scope: &[&str]) -> bool {
	! el.ns.is_html() || scope.contains(&&*el.local)
}

#[must_use]
/// # Stops List Item Search?
///
/// Block-ish elements other than `<address>`, `<div>`, and `<p>` shield
/// outer list items from implied closes.
fn stops_list_item(el: &Element) -> bool {
	! el.ns.is_html() ||
	(
		! matches!(&*el.local, "address" | "div" | "p") &&
		(tags::is_block(&el.local) || tags::is_table_part(&el.local) || matches!(&*el.local, "button" | "template"))
	)
}

#[must_use]
/// # HTML Integration Point?
fn is_integration_point(el: &Element) -> bool {
	match el.ns {
		Namespace::Html => false,
		Namespace::Svg => matches!(&*el.local, "foreignobject" | "desc" | "title"),
		Namespace::MathMl =>
			matches!(&*el.local, "mi" | "mo" | "mn" | "ms" | "mtext") ||
			is_html_annotation(el),
	}
}

#[must_use]
/// # HTML Annotation?
///
/// A MathML `<annotation-xml>` with an HTML encoding.
fn is_html_annotation(el: &Element) -> bool {
	matches!(el.ns, Namespace::MathMl) &&
	&*el.local == "annotation-xml" &&
	(el.attr_is("encoding", "text/html") || el.attr_is("encoding", "application/xhtml+xml"))
}

/// # Unmatched End Tag.
fn unmatched(name: &str, pos: Position, diag: &mut Diagnostics<'_>) {
	diag.warn(Category::Parse, pos, format!("Unmatched end tag </{name}> dropped."));
}
