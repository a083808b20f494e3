/*!
# HTMincer: DOM Node.

The tree is plainly owned: every element holds its children directly. It
is built once per run, rewritten in place by the minification passes, and
then serialized.
*/

use crate::{
	Namespace,
	Position,
	tags,
};
use tendril::StrTendril;



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Element Flags.
pub(crate) struct ElementFlags(u8);

macro_rules! flags {
	( $($nice:ident $set:ident $k:ident $v:literal,)+ ) => (
		impl ElementFlags {
			$(
				/// # Flag.
				const $k: u8 = $v;

				#[must_use]
				/// # Getter.
				pub(crate) const fn $nice(self) -> bool {
					Self::$k == self.0 & Self::$k
				}

				/// # Setter.
				pub(crate) const fn $set(&mut self, on: bool) {
					if on { self.0 |= Self::$k; }
					else { self.0 &= ! Self::$k; }
				}
			)+
		}
	)
}

flags! {
	implied      set_implied      IMPLIED      0b0000_0001, // Synthesized; no start tag in source.
	has_end      set_has_end      HAS_END      0b0000_0010, // End tag present in source.
	eof          set_eof          EOF          0b0000_0100, // Closed by end of input.
	misnested    set_misnested    MISNESTED    0b0000_1000, // Formatting closed by an outer end tag.
	reopened     set_reopened     REOPENED     0b0001_0000, // Formatting recreated by the parser.
	omit_start   set_omit_start   OMIT_START   0b0010_0000, // Don't write the start tag.
	omit_end     set_omit_end     OMIT_END     0b0100_0000, // Don't write the end tag.
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Conditional Comment.
pub(crate) enum ConditionalComment {
	/// # Downlevel-Hidden.
	///
	/// `<!--[if expr]>payload<![endif]-->`
	Hidden {
		/// # Expression.
		expr: String,

		/// # Payload.
		payload: StrTendril,
	},

	/// # Downlevel-Revealed Start.
	///
	/// `<![if expr]>`
	RevealedOpen {
		/// # Expression.
		expr: String,
	},

	/// # Downlevel-Revealed End.
	///
	/// `<![endif]>`
	RevealedClose,

	/// # Revealed-Validating Start.
	///
	/// `<!--[if expr]><!-->`
	ValidatingOpen {
		/// # Expression.
		expr: String,
	},

	/// # Revealed-Validating Start (Short).
	///
	/// `<!--[if expr]>-->`
	ValidatingOpenShort {
		/// # Expression.
		expr: String,
	},

	/// # Revealed-Validating End.
	///
	/// `<!--<![endif]-->`
	ValidatingClose,
}



#[derive(Debug, Clone)]
/// # Attribute.
pub(crate) struct Attribute {
	/// # Name (As Written).
	pub(crate) name: StrTendril,

	/// # Name (Case-Folded).
	pub(crate) local: StrTendril,

	/// # Value (Source Form).
	///
	/// `None` for attributes written without `=`.
	pub(crate) value: Option<StrTendril>,

	/// # Original Quote.
	pub(crate) quote: Option<u8>,

	/// # Position.
	pub(crate) pos: Position,
}

impl Attribute {
	#[must_use]
	/// # Value (or Empty).
	pub(crate) fn value(&self) -> &str {
		self.value.as_deref().unwrap_or_default()
	}
}



#[derive(Debug, Clone)]
/// # Element.
pub(crate) struct Element {
	/// # Name (As Written).
	pub(crate) name: StrTendril,

	/// # Name (Case-Folded).
	///
	/// Always lowercase; `name` keeps the written form.
	pub(crate) local: StrTendril,

	/// # Namespace.
	pub(crate) ns: Namespace,

	/// # Attributes.
	pub(crate) attrs: Vec<Attribute>,

	/// # Children.
	pub(crate) children: Vec<Node>,

	/// # Flags.
	pub(crate) flags: ElementFlags,

	/// # Position.
	pub(crate) pos: Position,

	/// # Content Position.
	///
	/// Where the (raw) text content begins, if there is any.
	pub(crate) inner: Position,
}

impl Element {
	#[must_use]
	/// # New.
	pub(crate) fn new(name: &str, local: &str, ns: Namespace, pos: Position) -> Self {
		Self {
			name: StrTendril::from_slice(name),
			local: StrTendril::from_slice(local),
			ns,
			attrs: Vec::new(),
			children: Vec::new(),
			flags: ElementFlags::default(),
			pos,
			inner: Position::EMPTY,
		}
	}

	#[must_use]
	/// # Implied.
	///
	/// Synthesize a structural element (`html`, `head`, `body`).
	pub(crate) fn implied(local: &str) -> Self {
		let mut out = Self::new(local, local, Namespace::Html, Position::EMPTY);
		out.flags.set_implied(true);
		out
	}

	#[must_use]
	/// # Is HTML `tag`?
	pub(crate) fn is(&self, tag: &str) -> bool {
		self.ns.is_html() && &*self.local == tag
	}

	#[must_use]
	/// # Is Void?
	pub(crate) fn is_void(&self) -> bool {
		self.ns.is_html() && tags::is_void(&self.local)
	}

	#[must_use]
	/// # Is Raw Text?
	pub(crate) fn is_raw_text(&self) -> bool {
		self.ns.is_html() && tags::is_raw_text(&self.local)
	}

	#[must_use]
	/// # Get Attribute.
	pub(crate) fn attr(&self, local: &str) -> Option<&Attribute> {
		self.attrs.iter().find(|a| &*a.local == local)
	}

	#[must_use]
	/// # Has Attribute?
	pub(crate) fn has_attr(&self, local: &str) -> bool {
		self.attr(local).is_some()
	}

	#[must_use]
	/// # Attribute Value Equals?
	///
	/// Compare the (decoded, trimmed) value case-insensitively.
	pub(crate) fn attr_is(&self, local: &str, value: &str) -> bool {
		self.attr(local).is_some_and(|a|
			crate::entities::decode(a.value()).trim().eq_ignore_ascii_case(value)
		)
	}

	/// # Remove Attribute.
	pub(crate) fn remove_attr(&mut self, local: &str) {
		self.attrs.retain(|a| &*a.local != local);
	}
}



#[derive(Debug, Clone)]
/// # Node.
pub(crate) enum Node {
	/// # Element.
	Element(Element),

	/// # Text.
	Text(StrTendril),

	/// # Comment.
	Comment(StrTendril),

	/// # Conditional Comment.
	Conditional(ConditionalComment),

	/// # CDATA.
	Cdata(StrTendril),

	/// # Doctype.
	Doctype(StrTendril),

	/// # XML Declaration.
	XmlDeclaration(StrTendril),
}

impl Node {
	#[must_use]
	/// # As Element.
	pub(crate) const fn as_element(&self) -> Option<&Element> {
		if let Self::Element(el) = self { Some(el) }
		else { None }
	}

	#[must_use]
	/// # As Text.
	pub(crate) fn as_text(&self) -> Option<&str> {
		if let Self::Text(txt) = self { Some(&**txt) }
		else { None }
	}

	#[must_use]
	/// # Is Whitespace-Only Text?
	pub(crate) fn is_whitespace(&self) -> bool {
		self.as_text().is_some_and(crate::strtendril::is_whitespace)
	}

	#[must_use]
	/// # Is Comment-Ish?
	///
	/// Plain and conditional comments.
	pub(crate) const fn is_comment(&self) -> bool {
		matches!(self, Self::Comment(_) | Self::Conditional(_))
	}
}



#[derive(Debug, Clone, Default)]
/// # Document.
pub(crate) struct Document {
	/// # Top-Level Nodes.
	pub(crate) children: Vec<Node>,
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_flags() {
		let mut flags = ElementFlags::default();
		assert!(! flags.implied());
		flags.set_implied(true);
		flags.set_eof(true);
		assert!(flags.implied());
		assert!(flags.eof());
		assert!(! flags.has_end());
		flags.set_implied(false);
		assert!(! flags.implied());
		assert!(flags.eof());

		flags.set_misnested(true);
		flags.set_reopened(true);
		flags.set_omit_end(true);
		assert!(flags.misnested());
		assert!(flags.reopened());
		assert!(flags.omit_end());
		assert!(! flags.omit_start());
		assert!(flags.eof());
	}

	#[test]
	fn t_attr_is() {
		let mut el = Element::new("FORM", "form", Namespace::Html, Position::EMPTY);
		el.attrs.push(Attribute {
			name: StrTendril::from_slice("method"),
			local: StrTendril::from_slice("method"),
			value: Some(StrTendril::from_slice(" G&#69;T ")),
			quote: Some(b'"'),
			pos: Position::EMPTY,
		});
		assert!(el.attr_is("method", "get"));
		assert!(! el.attr_is("method", "post"));
		assert!(! el.attr_is("action", "get"));

		el.remove_attr("method");
		assert!(el.attrs.is_empty());
	}
}
