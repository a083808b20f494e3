/*!
# HTMincer: Serialization.
*/

use crate::{
	AttributeQuotesMode,
	dom::{
		Attribute,
		ConditionalComment,
		Element,
		Node,
	},
	EmptyTagRenderMode,
	Settings,
	strtendril::is_ws,
};
use std::collections::VecDeque;



/// Back to HTML!
///
/// Serialize the (minified) tree into `out`, honoring the element omission
/// flags and the quoting, void tag, and line break settings.
pub(crate) fn serialize(nodes: &[Node], settings: &Settings, out: &mut String) {
	#[derive(Debug)]
	enum Stage<'a> {
		/// # Open Node (and Raw Text Parent?).
		Open(&'a Node, bool),

		/// # Close Tag.
		Close(&'a Element),
	}

	// What we're writing to.
	let mut serializer = Serializer {
		writer: out,
		quotes: settings.attribute_quotes_removal_mode(),
		void: settings.empty_tag_render_mode(),
	};

	// A stack to work with.
	let mut stack = VecDeque::new();
	stack.extend(nodes.iter().map(|n| Stage::Open(n, false)));

	while let Some(op) = stack.pop_front() {
		match op {
			Stage::Open(node, raw) => match node {
				Node::Element(el) => {
					let close = serializer.start_elem(el);
					if close { stack.push_front(Stage::Close(el)); }

					let raw = el.is_raw_text();
					for child in el.children.iter().rev() {
						stack.push_front(Stage::Open(child, raw));
					}
				},
				Node::Text(txt) =>
					if raw { serializer.writer.push_str(txt); }
					else { serializer.write_text(txt); },
				Node::Comment(txt) => {
					serializer.writer.push_str("<!--");
					serializer.writer.push_str(txt);
					serializer.writer.push_str("-->");
				},
				Node::Conditional(c) => serializer.write_conditional(c),
				Node::Cdata(txt) => {
					serializer.writer.push_str("<![CDATA[");
					serializer.writer.push_str(txt);
					serializer.writer.push_str("]]>");
				},
				Node::Doctype(txt) => {
					serializer.writer.push_str("<!");
					serializer.writer.push_str(txt);
					serializer.writer.push('>');
				},
				Node::XmlDeclaration(txt) => {
					serializer.writer.push_str("<?");
					serializer.writer.push_str(txt);
					serializer.writer.push('>');
				},
			},

			// Close it.
			Stage::Close(el) => { serializer.end_elem(el); },
		}
	}

	// Line breaks.
	if
		let Some(lb) = settings.new_line_style().line_break() &&
		let Some(new) = line_breaks(out, lb)
	{
		*out = new;
	}
}



#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
/// # Quote Type
///
/// If an attribute value contains the same character used for quoting, it has
/// to be encoded, jumping from one to five bytes per occurrence.
///
/// Space can often be saved in such cases by wrapping the value with single
/// quotes instead of the usual double.
enum QuoteKind {
	#[default]
	/// # Double (") Quotes.
	Double,

	/// # Single (') Quotes.
	Single,
}

impl QuoteKind {
	#[must_use]
	/// # For Attribute Value.
	///
	/// Use the original quote if the value doesn't contain it, otherwise
	/// whichever occurs less often.
	const fn for_value(original: Option<u8>, mut src: &[u8]) -> Self {
		let mut double = 0;
		let mut single = 0;

		while let [n, rest @ ..] = src {
			match *n {
				b'"' => { double += 1; },
				b'\'' => { single += 1; },
				_ => {},
			}
			src = rest;
		}

		match original {
			Some(b'\'') if single == 0 => Self::Single,
			Some(b'"') if double == 0 => Self::Double,
			// Prefer single if there are fewer of them.
			_ if single < double => Self::Single,
			// Otherwise stick with the default.
			_ => Self::Double,
		}
	}

	#[must_use]
	/// # As Char.
	const fn as_char(self) -> char {
		match self {
			Self::Double => '"',
			Self::Single => '\'',
		}
	}

	#[must_use]
	/// # Escaped.
	const fn escaped(self) -> &'static str {
		match self {
			Self::Double => "&#34;",
			Self::Single => "&#39;",
		}
	}
}



/// Minification Serializer.
struct Serializer<'a> {
	/// # Writer.
	writer: &'a mut String,

	/// # Quote Mode.
	quotes: AttributeQuotesMode,

	/// # Void Tag Mode.
	void: EmptyTagRenderMode,
}

impl Serializer<'_> {
	/// # Write Opening Tag.
	///
	/// Returns `true` if the element will need a closing tag.
	fn start_elem(&mut self, el: &Element) -> bool {
		let html = el.ns.is_html();
		let void = el.is_void();
		let self_closing = ! html && el.children.is_empty();
		let implied = el.flags.implied();

		if ! implied && ! el.flags.omit_start() {
			self.writer.push('<');
			self.writer.push_str(&el.name);

			let mut unquoted = false;
			for attr in &el.attrs { unquoted = self.write_attr(attr); }

			// A slash right after an unquoted value would join it.
			if self_closing {
				self.writer.push_str(if unquoted { " />" } else { "/>" });
			}
			else if void && unquoted && self.void == EmptyTagRenderMode::Slash {
				self.writer.push_str(" />");
			}
			else if void { self.writer.push_str(self.void.as_str()); }
			else { self.writer.push('>'); }
		}

		! implied && ! void && ! self_closing && ! el.flags.omit_end()
	}

	/// # Write Closing Tag.
	fn end_elem(&mut self, el: &Element) {
		self.writer.push_str("</");
		self.writer.push_str(&el.name);
		self.writer.push('>');
	}

	/// # Write Attribute.
	///
	/// Returns `true` if the value was written unquoted.
	fn write_attr(&mut self, attr: &Attribute) -> bool {
		self.writer.push(' ');
		self.writer.push_str(&attr.name);

		// Empty values can be dropped entirely.
		let value = attr.value();
		if value.is_empty() { return false; }

		self.writer.push('=');
		let unquoted = match self.quotes {
			AttributeQuotesMode::KeepQuotes => false,
			AttributeQuotesMode::Html4 => value.is_ascii() && can_unquote(value),
			AttributeQuotesMode::Html5 => can_unquote(value),
		};
		if unquoted {
			self.writer.push_str(value);
			return true;
		}

		let quote = QuoteKind::for_value(attr.quote, value.as_bytes());
		let q = quote.as_char();
		self.writer.push(q);
		let mut rest = value;
		while let Some(pos) = rest.find(q) {
			self.writer.push_str(&rest[..pos]);
			self.writer.push_str(quote.escaped());
			rest = &rest[pos + 1..];
		}
		self.writer.push_str(rest);
		self.writer.push(q);

		false
	}

	/// # Write Text.
	///
	/// Text is already in source form, so the only thing that needs escaping
	/// is a `<` that would now open markup.
	fn write_text(&mut self, txt: &str) {
		let bytes = txt.as_bytes();
		let mut last = 0;
		for pos in memchr::memchr_iter(b'<', bytes) {
			if bytes.get(pos + 1).is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?')) {
				self.writer.push_str(&txt[last..pos]);
				self.writer.push_str("&lt;");
				last = pos + 1;
			}
		}
		self.writer.push_str(&txt[last..]);
	}

	/// # Write Conditional Comment.
	fn write_conditional(&mut self, c: &ConditionalComment) {
		match c {
			ConditionalComment::Hidden { expr, payload } => {
				self.writer.push_str("<!--[if ");
				self.writer.push_str(expr);
				self.writer.push_str("]>");
				self.writer.push_str(payload);
				self.writer.push_str("<![endif]-->");
			},
			ConditionalComment::RevealedOpen { expr } => {
				self.writer.push_str("<![if ");
				self.writer.push_str(expr);
				self.writer.push_str("]>");
			},
			ConditionalComment::RevealedClose => { self.writer.push_str("<![endif]>"); },
			ConditionalComment::ValidatingOpen { expr } => {
				self.writer.push_str("<!--[if ");
				self.writer.push_str(expr);
				self.writer.push_str("]><!-->");
			},
			ConditionalComment::ValidatingOpenShort { expr } => {
				self.writer.push_str("<!--[if ");
				self.writer.push_str(expr);
				self.writer.push_str("]>-->");
			},
			ConditionalComment::ValidatingClose => { self.writer.push_str("<!--<![endif]-->"); },
		}
	}
}



#[must_use]
/// # Can Unquote?
///
/// Values with whitespace, quotes, `=`, `<`, `>`, or backticks need quotes,
/// as do values ending in a slash.
fn can_unquote(value: &str) -> bool {
	! value.is_empty() &&
	! value.ends_with('/') &&
	! value.bytes().any(|b| is_ws(b) || matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`'))
}

#[must_use]
/// # Normalize Line Breaks.
///
/// Replace each `\n`, `\r`, `\r\n`, or `\n\r` with `lb`. Returns `None` if
/// nothing changes.
fn line_breaks(src: &str, lb: &str) -> Option<String> {
	let bytes = src.as_bytes();
	let mut out = String::with_capacity(src.len());
	let mut last = 0;
	let mut idx = 0;
	while let Some(pos) = memchr::memchr2(b'\n', b'\r', &bytes[idx..]) {
		let pos = idx + pos;
		out.push_str(&src[last..pos]);
		out.push_str(lb);

		idx = match (bytes[pos], bytes.get(pos + 1)) {
			(b'\r', Some(b'\n')) | (b'\n', Some(b'\r')) => pos + 2,
			_ => pos + 1,
		};
		last = idx;
	}

	if last == 0 { return None; }
	out.push_str(&src[last..]);
	if out == src { None }
	else { Some(out) }
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		diagnostic::Diagnostics,
		dom,
		NewLineStyle,
		SettingsBuilder,
	};

	/// # Parse and Serialize.
	fn roundtrip(src: &str, settings: &Settings) -> String {
		let mut diag = Diagnostics::new(src);
		let doc = dom::parse(src, &mut diag);
		let mut out = String::new();
		serialize(&doc.children, settings, &mut out);
		out
	}

	#[test]
	fn t_quotes() {
		for (mode, lhs, rhs) in [
			(AttributeQuotesMode::Html5, "<a href=\"/x\" title='Hi'>A</a>", "<a href=/x title=Hi>A</a>"),
			(AttributeQuotesMode::Html5, "<a title=\"Hi there\">A</a>", "<a title=\"Hi there\">A</a>"),
			(AttributeQuotesMode::Html5, "<a title='Say \"Hi\"'>A</a>", "<a title='Say \"Hi\"'>A</a>"),
			(AttributeQuotesMode::Html5, "<a href=\"/x/\">A</a>", "<a href=\"/x/\">A</a>"),
			(AttributeQuotesMode::Html5, "<a title=\"Ünï\">A</a>", "<a title=Ünï>A</a>"),
			(AttributeQuotesMode::Html4, "<a title=\"Ünï\">A</a>", "<a title=\"Ünï\">A</a>"),
			(AttributeQuotesMode::Html4, "<a title=\"x\">A</a>", "<a title=x>A</a>"),
			(AttributeQuotesMode::KeepQuotes, "<a title='x' id=y>A</a>", "<a title='x' id=\"y\">A</a>"),
			(AttributeQuotesMode::KeepQuotes, "<a title=\"\" hidden>A</a>", "<a title hidden>A</a>"),
		] {
			let settings = SettingsBuilder::default()
				.with_attribute_quotes_removal_mode(mode)
				.build()
				.expect("Settings failed.");
			assert_eq!(roundtrip(lhs, &settings), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_quote_kind() {
		for (original, value, expected) in [
			(None, "abc", QuoteKind::Double),
			(Some(b'\''), "abc", QuoteKind::Single),
			(Some(b'"'), "a\"b", QuoteKind::Single),
			(Some(b'\''), "a'b\"c\"", QuoteKind::Single),
			(None, "a'b\"c", QuoteKind::Double),
		] {
			assert_eq!(QuoteKind::for_value(original, value.as_bytes()), expected, "{value}");
		}
	}

	#[test]
	fn t_void() {
		for (mode, lhs, rhs) in [
			(EmptyTagRenderMode::NoSlash, "<br><img src=\"a.png\">", "<br><img src=a.png>"),
			(EmptyTagRenderMode::Slash, "<br><img src=\"a.png\">", "<br/><img src=a.png />"),
			(EmptyTagRenderMode::Slash, "<img alt=\"a b\">", "<img alt=\"a b\"/>"),
			(EmptyTagRenderMode::SpaceAndSlash, "<br/>", "<br />"),
		] {
			let settings = SettingsBuilder::default()
				.with_empty_tag_render_mode(mode)
				.build()
				.expect("Settings failed.");
			assert_eq!(roundtrip(lhs, &settings), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_foreign() {
		let settings = Settings::default();
		for (lhs, rhs) in [
			("<svg><circle r=\"1\"></circle></svg>", "<svg><circle r=1 /></svg>"),
			("<svg viewBox=\"0 0 1 1\"><path d=\"M0 0\"/></svg>", "<svg viewBox=\"0 0 1 1\"><path d=\"M0 0\"/></svg>"),
			("<svg></svg>", "<svg/>"),
		] {
			assert_eq!(roundtrip(lhs, &settings), rhs, "{lhs}");
		}
	}

	#[test]
	fn t_text() {
		let mut out = String::new();
		let mut ser = Serializer {
			writer: &mut out,
			quotes: AttributeQuotesMode::Html5,
			void: EmptyTagRenderMode::NoSlash,
		};
		ser.write_text("a < b <c </d <!e <?f <");
		assert_eq!(out, "a < b &lt;c &lt;/d &lt;!e &lt;?f <");
	}

	#[test]
	fn t_conditional() {
		let settings = Settings::default();
		for src in [
			"<!--[if IE]><p>Old</p><![endif]-->",
			"<![if !IE]><p>New</p><![endif]>",
			"<!--[if !IE]><!--><p>New</p><!--<![endif]-->",
			"<!--[if !IE]>--><p>New</p><!--<![endif]-->",
		] {
			assert_eq!(roundtrip(src, &settings), src);
		}
	}

	#[test]
	fn t_line_breaks() {
		for (lhs, lb, rhs) in [
			("a\r\nb\rc\nd\n\re", "\n", Some("a\nb\nc\nd\ne")),
			("a\nb", "\r\n", Some("a\r\nb")),
			("a\nb", "\n", None),
			("ab", "\r", None),
			("a\n\nb", "\r", Some("a\r\rb")),
		] {
			assert_eq!(line_breaks(lhs, lb).as_deref(), rhs, "{lhs:?}");
		}

		let settings = SettingsBuilder::default()
			.with_new_line_style(NewLineStyle::Windows)
			.build()
			.expect("Settings failed.");
		assert_eq!(roundtrip("<pre>a\nb</pre>", &settings), "<pre>a\r\nb</pre>");
	}
}
