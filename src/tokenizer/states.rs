/*!
# HTMincer: Tokenizer States.
*/



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Tokenizer State.
///
/// The data states (`Text`, `ForeignContent`, `RawText`) persist between
/// tokens; the rest are only ever live while a single tag or declaration
/// is being read.
pub(crate) enum State {
	/// # HTML Data.
	Text,

	/// # SVG/MathML Data.
	///
	/// CDATA sections are allowed, and raw-text switching never happens.
	ForeignContent,

	/// # Raw Text.
	///
	/// Everything up to the matching end tag is opaque.
	RawText(&'static str),

	/// # Just Read `<`.
	TagOpen,

	/// # Just Read `</`.
	EndTagOpen,

	/// # Tag Name.
	TagName,

	/// # Before Attribute Name.
	BeforeAttributeName,

	/// # Attribute Name.
	AttributeName,

	/// # After Attribute Name.
	AfterAttributeName,

	/// # Before Attribute Value.
	BeforeAttributeValue,

	/// # Attribute Value (Quoted).
	AttributeValueQuoted(u8),

	/// # Attribute Value (Unquoted).
	AttributeValueUnquoted,

	/// # After Attribute Value (Quoted).
	AfterAttributeValueQuoted,

	/// # Self-Closing Start Tag.
	SelfClosingStartTag,

	/// # Just Read `<!`.
	MarkupDeclaration,

	/// # Just Read `<?`.
	ProcessingInstruction,
}

impl State {
	#[must_use]
	/// # Raw Text For Tag.
	///
	/// Return the raw-text state for an HTML element, if it is one.
	pub(crate) fn raw_text(tag: &str) -> Option<Self> {
		let tag: &'static str = match tag {
			"iframe" => "iframe",
			"noembed" => "noembed",
			"noframes" => "noframes",
			"plaintext" => "plaintext",
			"script" => "script",
			"style" => "style",
			"textarea" => "textarea",
			"title" => "title",
			"xmp" => "xmp",
			_ => return None,
		};
		Some(Self::RawText(tag))
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Byte Class.
///
/// Tag parsing only cares about a handful of distinct byte types.
pub(crate) enum Class {
	/// # Whitespace.
	Space,

	/// # `/`
	Slash,

	/// # `>`
	Gt,

	/// # `<`
	Lt,

	/// # `=`
	Eq,

	/// # `"` or `'`
	Quote(u8),

	/// # `` ` ``
	Backtick,

	/// # Anything Else.
	Other,
}

impl Class {
	#[must_use]
	/// # From Byte.
	pub(crate) const fn of(b: u8) -> Self {
		match b {
			b'\t' | b'\n' | b'\x0C' | b'\r' | b' ' => Self::Space,
			b'/' => Self::Slash,
			b'>' => Self::Gt,
			b'<' => Self::Lt,
			b'=' => Self::Eq,
			b'"' | b'\'' => Self::Quote(b),
			b'`' => Self::Backtick,
			_ => Self::Other,
		}
	}
}
