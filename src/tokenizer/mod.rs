/*!
# HTMincer: Tokenizer.

A tolerant, single-pass markup tokenizer. It never fails; anything odd is
recorded as a warning and a recovery rule is applied.

Tokens borrow their text straight from the source. Character references
are left alone, and names keep whatever case they were written in.

The tree builder drives the tokenizer, telling it when to switch into raw
text (after `<script>` and friends) and whether the current insertion point
is inside foreign content.
*/

mod states;

use crate::{
	Category,
	dom::ConditionalComment,
	Position,
	position::PositionTracker,
	diagnostic::Diagnostics,
	strtendril::is_ws,
};
use memchr::memmem;
use tendril::StrTendril;
use states::{
	Class,
	State,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Token.
pub(crate) enum Token<'a> {
	/// # Start Tag.
	StartTag(StartTag<'a>),

	/// # End Tag.
	EndTag(&'a str, Position),

	/// # Text.
	Text(&'a str, Position),

	/// # Comment.
	Comment(&'a str, Position),

	/// # Conditional Comment (or Marker).
	Conditional(ConditionalComment, Position),

	/// # CDATA Section (Foreign Content Only).
	Cdata(&'a str, Position),

	/// # Doctype.
	///
	/// The text between `<!` and `>`.
	Doctype(&'a str, Position),

	/// # XML Declaration or Processing Instruction.
	///
	/// The text between `<?` and `>`.
	XmlDeclaration(&'a str, Position),
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// # Start Tag.
pub(crate) struct StartTag<'a> {
	/// # Name (As Written).
	pub(crate) name: &'a str,

	/// # Attributes.
	///
	/// Duplicates have already been weeded out.
	pub(crate) attrs: Vec<RawAttribute<'a>>,

	/// # Self-Closing?
	pub(crate) self_closing: bool,

	/// # Position.
	pub(crate) pos: Position,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Attribute.
pub(crate) struct RawAttribute<'a> {
	/// # Name (As Written).
	pub(crate) name: &'a str,

	/// # Value (Source Form).
	///
	/// This is `None` if the attribute had no `=`.
	pub(crate) value: Option<&'a str>,

	/// # Quote Character.
	pub(crate) quote: Option<u8>,

	/// # Position.
	pub(crate) pos: Position,
}



/// # Tokenizer.
pub(crate) struct Tokenizer<'a> {
	/// # Source.
	src: &'a str,

	/// # Byte Offset.
	pos: usize,

	/// # Current State.
	state: State,

	/// # Foreign Content?
	foreign: bool,

	/// # Position Tracker.
	tracker: PositionTracker<'a>,
}

impl<'a> Tokenizer<'a> {
	#[must_use]
	/// # New.
	pub(crate) const fn new(src: &'a str) -> Self {
		Self {
			src,
			pos: 0,
			state: State::Text,
			foreign: false,
			tracker: PositionTracker::new(src),
		}
	}

	/// # Set Foreign.
	///
	/// Switch between the HTML and foreign data states. This has no effect
	/// while in raw text.
	pub(crate) const fn set_foreign(&mut self, foreign: bool) {
		self.foreign = foreign;
		if matches!(self.state, State::Text | State::ForeignContent) {
			self.state = self.data_state();
		}
	}

	/// # Enter Raw Text.
	///
	/// Called after a start tag for a (lowercase) HTML raw-text element.
	pub(crate) fn enter_raw_text(&mut self, tag: &str) {
		if let Some(state) = State::raw_text(tag) { self.state = state; }
	}

	/// # Position at Offset.
	fn position(&mut self, offset: usize) -> Position {
		self.tracker.position_at(offset)
	}

	/// # Data State.
	const fn data_state(&self) -> State {
		if self.foreign { State::ForeignContent }
		else { State::Text }
	}

	/// # Next Token.
	pub(crate) fn next_token(&mut self, diag: &mut Diagnostics<'_>) -> Option<Token<'a>> {
		loop {
			if self.pos >= self.src.len() { return None; }

			let token = match self.state {
				State::Text | State::ForeignContent => self.data(diag),
				State::RawText(tag) => self.raw_text(tag),
				State::TagOpen => self.tag_open(),
				State::EndTagOpen => self.end_tag_open(diag),
				State::MarkupDeclaration => self.markup_declaration(diag),
				State::ProcessingInstruction => self.processing_instruction(diag),
				State::TagName |
				State::BeforeAttributeName |
				State::AttributeName |
				State::AfterAttributeName |
				State::BeforeAttributeValue |
				State::AttributeValueQuoted(_) |
				State::AttributeValueUnquoted |
				State::AfterAttributeValueQuoted |
				State::SelfClosingStartTag => self.tag(false, diag),
			};

			if token.is_some() { return token; }
		}
	}
}

impl<'a> Tokenizer<'a> {
	/// # Starts Markup?
	///
	/// A `<` only opens markup if followed by a tag name, `/`, `!`, or `?`.
	fn starts_markup(&self, idx: usize) -> bool {
		let bytes = self.src.as_bytes();
		match bytes.get(idx + 1) {
			Some(b) if b.is_ascii_alphabetic() => true,
			Some(b'!' | b'?') => true,
			Some(b'/') => idx + 2 < bytes.len(),
			_ => false,
		}
	}

	/// # Data.
	///
	/// Read text up to the next bit of markup.
	fn data(&mut self, diag: &mut Diagnostics<'_>) -> Option<Token<'a>> {
		let src = self.src;
		let bytes = src.as_bytes();
		let start = self.pos;

		let mut end = bytes.len();
		let mut search = start;
		while let Some(idx) = memchr::memchr(b'<', &bytes[search..]).map(|n| n + search) {
			if self.starts_markup(idx) {
				end = idx;
				break;
			}

			let pos = self.position(idx);
			diag.warn(Category::Parse, pos, "Unescaped `<` treated as text.");
			search = idx + 1;
		}

		if start == end {
			self.state = State::TagOpen;
			return None;
		}

		let pos = self.position(start);
		self.pos = end;
		Some(Token::Text(&src[start..end], pos))
	}

	/// # Raw Text.
	///
	/// Everything up to the matching end tag, or end of input.
	fn raw_text(&mut self, tag: &'static str) -> Option<Token<'a>> {
		let src = self.src;
		let start = self.pos;
		let end =
			if tag == "plaintext" { src.len() }
			else { find_end_tag(src.as_bytes(), start, tag).unwrap_or(src.len()) };

		self.state = self.data_state();
		if start == end { return None; }

		let pos = self.position(start);
		self.pos = end;
		Some(Token::Text(&src[start..end], pos))
	}

	/// # Tag Open.
	///
	/// Figure out what kind of markup this `<` begins.
	fn tag_open(&mut self) -> Option<Token<'a>> {
		self.state = match self.src.as_bytes().get(self.pos + 1) {
			Some(b'!') => State::MarkupDeclaration,
			Some(b'?') => State::ProcessingInstruction,
			Some(b'/') => State::EndTagOpen,
			_ => State::TagName,
		};
		None
	}

	/// # End Tag Open.
	fn end_tag_open(&mut self, diag: &mut Diagnostics<'_>) -> Option<Token<'a>> {
		let open = self.pos;
		match self.src.as_bytes().get(open + 2) {
			Some(b) if b.is_ascii_alphabetic() => self.tag(true, diag),
			Some(b'>') => {
				let pos = self.position(open);
				diag.warn(Category::Parse, pos, "Empty end tag `</>` dropped.");
				self.pos = open + 3;
				self.state = self.data_state();
				None
			},
			_ => {
				let pos = self.position(open);
				diag.warn(Category::Parse, pos, "Invalid end tag treated as a comment.");
				Some(self.bogus_comment(open + 2, pos))
			},
		}
	}

	/// # Bogus Comment.
	///
	/// Malformed declarations run to the next `>`.
	fn bogus_comment(&mut self, start: usize, pos: Position) -> Token<'a> {
		let src = self.src;
		let bytes = src.as_bytes();
		let end = memchr::memchr(b'>', &bytes[start..]).map_or(bytes.len(), |n| n + start);
		self.pos = (end + 1).min(bytes.len());
		self.state = self.data_state();
		Token::Comment(&src[start..end], pos)
	}
}

impl<'a> Tokenizer<'a> {
	#[expect(clippy::too_many_lines, reason = "It's a state machine.")]
	/// # Tag.
	///
	/// Read a start or end tag, beginning with the `<`.
	fn tag(&mut self, closing: bool, diag: &mut Diagnostics<'_>) -> Option<Token<'a>> {
		let src = self.src;
		let bytes = src.as_bytes();
		let open = self.pos;
		let pos = self.position(open);
		let name_start = if closing { open + 2 } else { open + 1 };

		let mut state = State::TagName;
		let mut name = "";
		let mut attrs: Vec<RawAttribute<'a>> = Vec::new();
		let mut self_closing = false;

		// The attribute in progress.
		let mut attr_start = 0;
		let mut attr_pos = Position::EMPTY;
		let mut attr_name = "";
		let mut value_start = 0;

		let mut idx = name_start;
		loop {
			let Some(&b) = bytes.get(idx) else {
				diag.warn(Category::Parse, pos, "Unexpected end of input inside a tag; the tag was dropped.");
				self.pos = bytes.len();
				self.state = self.data_state();
				return None;
			};

			match (state, Class::of(b)) {
				(State::TagName, Class::Space) => {
					name = &src[name_start..idx];
					state = State::BeforeAttributeName;
				},
				(State::TagName, Class::Slash) => {
					name = &src[name_start..idx];
					state = State::SelfClosingStartTag;
				},
				(State::TagName, Class::Gt) => {
					name = &src[name_start..idx];
					break;
				},

				(State::BeforeAttributeName, Class::Space) => {},
				(State::BeforeAttributeName, Class::Slash) => { state = State::SelfClosingStartTag; },
				(State::BeforeAttributeName, Class::Gt) => break,
				(State::BeforeAttributeName, class) => {
					attr_pos = self.position(idx);
					if class == Class::Eq {
						diag.warn(Category::Parse, attr_pos, "Unexpected `=` before attribute name.");
					}
					attr_start = idx;
					state = State::AttributeName;
				},

				(State::AttributeName, Class::Space) => {
					attr_name = &src[attr_start..idx];
					state = State::AfterAttributeName;
				},
				(State::AttributeName, Class::Slash) => {
					push_attr(&mut attrs, &src[attr_start..idx], None, None, attr_pos, diag);
					state = State::SelfClosingStartTag;
				},
				(State::AttributeName, Class::Eq) if idx > attr_start => {
					attr_name = &src[attr_start..idx];
					state = State::BeforeAttributeValue;
				},
				(State::AttributeName, Class::Gt) => {
					push_attr(&mut attrs, &src[attr_start..idx], None, None, attr_pos, diag);
					break;
				},
				(State::AttributeName, Class::Quote(_) | Class::Lt) => {
					let pos = self.position(idx);
					diag.warn(Category::Parse, pos, "Unexpected character in attribute name.");
				},

				(State::AfterAttributeName, Class::Space) => {},
				(State::AfterAttributeName, Class::Slash) => {
					push_attr(&mut attrs, attr_name, None, None, attr_pos, diag);
					state = State::SelfClosingStartTag;
				},
				(State::AfterAttributeName, Class::Eq) => { state = State::BeforeAttributeValue; },
				(State::AfterAttributeName, Class::Gt) => {
					push_attr(&mut attrs, attr_name, None, None, attr_pos, diag);
					break;
				},
				(State::AfterAttributeName, _) => {
					push_attr(&mut attrs, attr_name, None, None, attr_pos, diag);
					attr_pos = self.position(idx);
					attr_start = idx;
					state = State::AttributeName;
				},

				(State::BeforeAttributeValue, Class::Space) => {},
				(State::BeforeAttributeValue, Class::Quote(q)) => {
					value_start = idx + 1;
					state = State::AttributeValueQuoted(q);
				},
				(State::BeforeAttributeValue, Class::Gt) => {
					let pos = self.position(idx);
					diag.warn(Category::Parse, pos, "Missing attribute value.");
					push_attr(&mut attrs, attr_name, Some(""), None, attr_pos, diag);
					break;
				},
				(State::BeforeAttributeValue, _) => {
					value_start = idx;
					state = State::AttributeValueUnquoted;
					continue;
				},

				(State::AttributeValueQuoted(q), _) => {
					// Jump straight to the closing quote.
					if let Some(end) = memchr::memchr(q, &bytes[idx..]).map(|n| n + idx) {
						push_attr(&mut attrs, attr_name, Some(&src[value_start..end]), Some(q), attr_pos, diag);
						idx = end + 1;
						state = State::AfterAttributeValueQuoted;
						continue;
					}

					// No closing quote; take it as unquoted up to the next
					// whitespace or `>`.
					let pos = self.position(value_start - 1);
					diag.warn(Category::Parse, pos, "Unterminated quoted attribute value.");
					let end = bytes[value_start..].iter()
						.position(|&b| is_ws(b) || b == b'>')
						.map_or(bytes.len(), |n| n + value_start);
					push_attr(&mut attrs, attr_name, Some(&src[value_start..end]), None, attr_pos, diag);
					idx = end;
					state = State::BeforeAttributeName;
					continue;
				},

				(State::AttributeValueUnquoted, Class::Space) => {
					push_attr(&mut attrs, attr_name, Some(&src[value_start..idx]), None, attr_pos, diag);
					state = State::BeforeAttributeName;
				},
				(State::AttributeValueUnquoted, Class::Gt) => {
					push_attr(&mut attrs, attr_name, Some(&src[value_start..idx]), None, attr_pos, diag);
					break;
				},
				(State::AttributeValueUnquoted, Class::Quote(_) | Class::Lt | Class::Eq | Class::Backtick) => {
					let pos = self.position(idx);
					diag.warn(Category::Parse, pos, "Unexpected character in unquoted attribute value.");
				},

				(State::AfterAttributeValueQuoted, Class::Space) => { state = State::BeforeAttributeName; },
				(State::AfterAttributeValueQuoted, Class::Slash) => { state = State::SelfClosingStartTag; },
				(State::AfterAttributeValueQuoted, Class::Gt) => break,
				(State::AfterAttributeValueQuoted, _) => {
					let pos = self.position(idx);
					diag.warn(Category::Parse, pos, "Missing whitespace between attributes.");
					state = State::BeforeAttributeName;
					continue;
				},

				(State::SelfClosingStartTag, Class::Gt) => {
					self_closing = true;
					break;
				},
				(State::SelfClosingStartTag, _) => {
					let pos = self.position(idx);
					diag.warn(Category::Parse, pos, "Unexpected `/` in tag.");
					state = State::BeforeAttributeName;
					continue;
				},

				// Everything else is just more of the same.
				_ => {},
			}

			idx += 1;
		}

		self.pos = idx + 1;
		self.state = self.data_state();

		if closing {
			if ! attrs.is_empty() || self_closing {
				diag.warn(Category::Parse, pos, "Attributes on end tags are ignored.");
			}
			Some(Token::EndTag(name, pos))
		}
		else {
			Some(Token::StartTag(StartTag { name, attrs, self_closing, pos }))
		}
	}
}

impl<'a> Tokenizer<'a> {
	/// # Markup Declaration.
	///
	/// Comments, conditional comments, CDATA, and doctypes.
	fn markup_declaration(&mut self, diag: &mut Diagnostics<'_>) -> Option<Token<'a>> {
		let src = self.src;
		let open = self.pos;
		let pos = self.position(open);
		let rest = &src[open + 2..];

		if rest.starts_with("--") { return Some(self.comment(diag)); }

		// Downlevel-revealed conditional markers.
		if starts_with_ci(rest, "[if") && rest.as_bytes().get(3).is_some_and(|&b| is_ws(b) || b == b'!') {
			if let Some(end) = rest.find("]>") {
				let expr = collapse_expr(&rest[3..end]);
				self.finish(open + 2 + end + 2);
				return Some(Token::Conditional(ConditionalComment::RevealedOpen { expr }, pos));
			}
		}
		else if starts_with_ci(rest, "[endif]>") {
			self.finish(open + 2 + 8);
			return Some(Token::Conditional(ConditionalComment::RevealedClose, pos));
		}

		// CDATA.
		if rest.starts_with("[CDATA[") {
			if self.foreign {
				let start = open + 9;
				let (end, next) = match memmem::find(&src.as_bytes()[start..], b"]]>") {
					Some(n) => (start + n, start + n + 3),
					None => {
						diag.warn(Category::Parse, pos, "Unclosed CDATA section.");
						(src.len(), src.len())
					},
				};
				self.finish(next);
				return Some(Token::Cdata(&src[start..end], pos));
			}

			diag.warn(Category::Parse, pos, "CDATA section outside foreign content treated as a comment.");
			return Some(self.bogus_comment(open + 2, pos));
		}

		// Doctype.
		if starts_with_ci(rest, "doctype") {
			let start = open + 2;
			let end = match memchr::memchr(b'>', &src.as_bytes()[start..]) {
				Some(n) => start + n,
				None => {
					diag.warn(Category::Parse, pos, "Unclosed doctype.");
					src.len()
				},
			};
			self.finish(end + 1);
			return Some(Token::Doctype(&src[start..end], pos));
		}

		diag.warn(Category::Parse, pos, "Malformed markup declaration treated as a comment.");
		Some(self.bogus_comment(open + 2, pos))
	}

	/// # Comment.
	///
	/// Regular comments, plus the conditional comment grammar that hides
	/// inside them.
	fn comment(&mut self, diag: &mut Diagnostics<'_>) -> Token<'a> {
		let src = self.src;
		let open = self.pos;
		let pos = self.position(open);
		let start = open + 4;
		let body = &src[start..];

		// Conditional comments and validating markers.
		if starts_with_ci(body, "[if") && let Some(end) = body.find("]>") {
			let expr = collapse_expr(&body[3..end]);
			let after = start + end + 2;
			let tail = &src[after..];

			if tail.starts_with("<!-->") {
				self.finish(after + 5);
				return Token::Conditional(ConditionalComment::ValidatingOpen { expr }, pos);
			}
			if tail.starts_with("-->") {
				self.finish(after + 3);
				return Token::Conditional(ConditionalComment::ValidatingOpenShort { expr }, pos);
			}
			if let Some(close) = memmem::find(tail.as_bytes(), b"<![endif]-->") {
				let payload = StrTendril::from_slice(&tail[..close]);
				self.finish(after + close + 12);
				return Token::Conditional(ConditionalComment::Hidden { expr, payload }, pos);
			}
		}
		if body.starts_with("<![endif]-->") {
			self.finish(start + 12);
			return Token::Conditional(ConditionalComment::ValidatingClose, pos);
		}

		// Abruptly closed empty comments.
		if body.starts_with('>') || body.starts_with("->") {
			diag.warn(Category::Parse, pos, "Abruptly closed empty comment.");
			self.finish(start + if body.starts_with('>') { 1 } else { 2 });
			return Token::Comment("", pos);
		}

		// The usual close is `-->`, but `--!>` works too.
		match comment_close(body.as_bytes()) {
			Some((end, len)) => {
				self.finish(start + end + len);
				Token::Comment(&src[start..start + end], pos)
			},
			None => {
				diag.warn(Category::Parse, pos, "Unclosed comment.");
				self.finish(src.len());
				Token::Comment(body, pos)
			},
		}
	}

	/// # Processing Instruction.
	///
	/// As in HTML proper, these run to the first `>`.
	fn processing_instruction(&mut self, diag: &mut Diagnostics<'_>) -> Option<Token<'a>> {
		let src = self.src;
		let open = self.pos;
		let pos = self.position(open);
		let start = open + 2;
		let end = match memchr::memchr(b'>', &src.as_bytes()[start..]) {
			Some(n) => start + n,
			None => {
				diag.warn(Category::Parse, pos, "Unclosed processing instruction.");
				src.len()
			},
		};
		self.finish(end + 1);
		Some(Token::XmlDeclaration(&src[start..end], pos))
	}

	/// # Finish.
	///
	/// Move to `next` and fall back to the data state.
	fn finish(&mut self, next: usize) {
		self.pos = next.min(self.src.len());
		self.state = self.data_state();
	}
}



/// # Push Attribute.
///
/// The first occurrence of a given name wins; later ones are dropped.
fn push_attr<'a>(
	attrs: &mut Vec<RawAttribute<'a>>,
	name: &'a str,
	value: Option<&'a str>,
	quote: Option<u8>,
	pos: Position,
	diag: &mut Diagnostics<'_>,
) {
	if attrs.iter().any(|a| a.name.eq_ignore_ascii_case(name)) {
		diag.warn(Category::Parse, pos, format!("Duplicate attribute `{name}` dropped."));
	}
	else {
		attrs.push(RawAttribute { name, value, quote, pos });
	}
}

#[must_use]
/// # Comment Close.
///
/// Return the offset and length of the first `-->` or `--!>` in `bytes`,
/// whichever comes first.
fn comment_close(bytes: &[u8]) -> Option<(usize, usize)> {
	let mut from = 0;
	while let Some(idx) = memchr::memchr(b'-', &bytes[from..]).map(|n| n + from) {
		let rest = &bytes[idx..];
		if rest.starts_with(b"-->") { return Some((idx, 3)); }
		if rest.starts_with(b"--!>") { return Some((idx, 4)); }
		from = idx + 1;
	}
	None
}

#[must_use]
/// # Find End Tag.
///
/// Find `</tag` (case-insensitively) followed by whitespace, `/`, `>`, or
/// end of input, starting from `from`.
fn find_end_tag(bytes: &[u8], from: usize, tag: &str) -> Option<usize> {
	let tag = tag.as_bytes();
	memmem::find_iter(&bytes[from..], b"</")
		.map(|n| n + from)
		.find(|&idx| {
			let name = idx + 2;
			bytes.get(name..name + tag.len()).is_some_and(|s| s.eq_ignore_ascii_case(tag)) &&
			bytes.get(name + tag.len()).is_none_or(|&b| is_ws(b) || matches!(b, b'/' | b'>'))
		})
}

#[must_use]
/// # Starts With (Case-Insensitive).
fn starts_with_ci(src: &str, prefix: &str) -> bool {
	src.as_bytes()
		.get(..prefix.len())
		.is_some_and(|s| s.eq_ignore_ascii_case(prefix.as_bytes()))
}

#[must_use]
/// # Collapse Conditional Expression.
fn collapse_expr(src: &str) -> String {
	src.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # Tokenize Everything.
	///
	/// Raw text is entered for the usual suspects, just as the tree
	/// builder would.
	fn tokenize(src: &str) -> (Vec<Token<'_>>, usize) {
		let mut diag = Diagnostics::new(src);
		let mut tokenizer = Tokenizer::new(src);
		let mut out = Vec::new();
		while let Some(token) = tokenizer.next_token(&mut diag) {
			if let Token::StartTag(ref t) = token {
				tokenizer.enter_raw_text(&t.name.to_ascii_lowercase());
			}
			out.push(token);
		}
		let (warnings, _) = diag.into_parts();
		(out, warnings.len())
	}

	#[test]
	fn t_tags() {
		let (tokens, warnings) = tokenize(r#"<p class="a" ID=b hidden>Hi</P>"#);
		assert_eq!(warnings, 0);
		assert_eq!(tokens.len(), 3);

		let Token::StartTag(ref tag) = tokens[0] else { panic!("Expected start tag."); };
		assert_eq!(tag.name, "p");
		assert_eq!(tag.attrs.len(), 3);
		assert_eq!(tag.attrs[0].name, "class");
		assert_eq!(tag.attrs[0].value, Some("a"));
		assert_eq!(tag.attrs[0].quote, Some(b'"'));
		assert_eq!(tag.attrs[1].name, "ID");
		assert_eq!(tag.attrs[1].value, Some("b"));
		assert_eq!(tag.attrs[1].quote, None);
		assert_eq!(tag.attrs[2].value, None);
		assert_eq!(tag.attrs[2].pos, Position::new(1, 19));

		assert_eq!(tokens[1], Token::Text("Hi", Position::new(1, 26)));
		assert_eq!(tokens[2], Token::EndTag("P", Position::new(1, 28)));
	}

	#[test]
	fn t_self_closing() {
		let (tokens, warnings) = tokenize("<br/><img src=x />");
		assert_eq!(warnings, 0);
		for t in &tokens {
			let Token::StartTag(tag) = t else { panic!("Expected start tag."); };
			assert!(tag.self_closing);
		}
	}

	#[test]
	fn t_duplicate_attrs() {
		let (tokens, warnings) = tokenize("<a href=one HREF=two>");
		assert_eq!(warnings, 1);
		let Token::StartTag(ref tag) = tokens[0] else { panic!("Expected start tag."); };
		assert_eq!(tag.attrs.len(), 1);
		assert_eq!(tag.attrs[0].value, Some("one"));
	}

	#[test]
	fn t_recovery() {
		// Literal less-thans.
		let (tokens, warnings) = tokenize("a < b <3");
		assert_eq!(tokens, vec![Token::Text("a < b <3", Position::new(1, 1))]);
		assert_eq!(warnings, 2);

		// Unterminated quoted value.
		let (tokens, warnings) = tokenize(r#"<p title="oops class=x>"#);
		assert_eq!(warnings, 1);
		let Token::StartTag(ref tag) = tokens[0] else { panic!("Expected start tag."); };
		assert_eq!(tag.attrs[0].value, Some("oops"));
		assert_eq!(tag.attrs[0].quote, None);
		assert_eq!(tag.attrs[1].name, "class");

		// Missing whitespace.
		let (tokens, warnings) = tokenize(r#"<p a="1"b="2">"#);
		assert_eq!(warnings, 1);
		let Token::StartTag(ref tag) = tokens[0] else { panic!("Expected start tag."); };
		assert_eq!(tag.attrs.len(), 2);

		// End of input inside a tag.
		let (tokens, warnings) = tokenize("x<div class=");
		assert_eq!(tokens.len(), 1);
		assert_eq!(warnings, 1);

		// Empty end tag.
		let (tokens, warnings) = tokenize("a</>b");
		assert_eq!(tokens.len(), 2);
		assert_eq!(warnings, 1);
	}

	#[test]
	fn t_raw_text() {
		let (tokens, _) = tokenize("<script>if (a<b) { x = '</p>'; }</script><p>");
		assert_eq!(tokens[1], Token::Text("if (a<b) { x = '</p>'; }", Position::new(1, 9)));
		assert!(matches!(tokens[2], Token::EndTag("script", _)));
		assert!(matches!(tokens[3], Token::StartTag(_)));

		// Unclosed runs to the end.
		let (tokens, _) = tokenize("<style>a{}</styles>");
		assert_eq!(tokens[1], Token::Text("a{}</styles>", Position::new(1, 8)));

		// Empty.
		let (tokens, _) = tokenize("<textarea></textarea>");
		assert_eq!(tokens.len(), 2);
	}

	#[test]
	fn t_comments() {
		for (src, expected) in [
			("<!-- hi -->", Token::Comment(" hi ", Position::new(1, 1))),
			("<!---->", Token::Comment("", Position::new(1, 1))),
			("<!-- a --!>", Token::Comment(" a ", Position::new(1, 1))),
			("<!-- a --->", Token::Comment(" a -", Position::new(1, 1))),
			("<!-- a - b -- c --!> -->", Token::Comment(" a - b -- c ", Position::new(1, 1))),
			("<!-- open", Token::Comment(" open", Position::new(1, 1))),
			("<!DOCTYPE html>", Token::Doctype("DOCTYPE html", Position::new(1, 1))),
			("<?xml version=\"1.0\"?>", Token::XmlDeclaration("xml version=\"1.0\"?", Position::new(1, 1))),
			("<!bogus>", Token::Comment("bogus", Position::new(1, 1))),
			("<![CDATA[x]]>", Token::Comment("[CDATA[x]]", Position::new(1, 1))),
		] {
			let (tokens, _) = tokenize(src);
			assert_eq!(tokens, vec![expected], "{src:?}");
		}
	}

	#[test]
	fn t_conditional() {
		for (src, expected) in [
			(
				"<!--[if  lt IE 9 ]><p>Old</p><![endif]-->",
				ConditionalComment::Hidden { expr: "lt IE 9".to_owned(), payload: StrTendril::from_slice("<p>Old</p>") },
			),
			("<![if  !IE ]>", ConditionalComment::RevealedOpen { expr: "!IE".to_owned() }),
			("<![endif]>", ConditionalComment::RevealedClose),
			("<!--[if !IE]><!-->", ConditionalComment::ValidatingOpen { expr: "!IE".to_owned() }),
			("<!--[if !IE]>-->", ConditionalComment::ValidatingOpenShort { expr: "!IE".to_owned() }),
			("<!--<![endif]-->", ConditionalComment::ValidatingClose),
		] {
			let (tokens, warnings) = tokenize(src);
			assert_eq!(warnings, 0);
			assert_eq!(tokens, vec![Token::Conditional(expected, Position::new(1, 1))], "{src:?}");
		}
	}

	#[test]
	fn t_foreign_cdata() {
		let src = "<svg><![CDATA[a<b]]></svg>";
		let mut diag = Diagnostics::new(src);
		let mut tokenizer = Tokenizer::new(src);
		assert!(matches!(tokenizer.next_token(&mut diag), Some(Token::StartTag(_))));
		tokenizer.set_foreign(true);
		assert_eq!(tokenizer.next_token(&mut diag), Some(Token::Cdata("a<b", Position::new(1, 6))));
		let (warnings, errors) = diag.into_parts();
		assert!(warnings.is_empty());
		assert!(errors.is_empty());
	}

	#[test]
	fn t_many_comments() {
		// Each comment close is found without rescanning the rest of the
		// document.
		let src = "<p>x<!--c-->".repeat(100_000);
		let now = std::time::Instant::now();
		let (tokens, warnings) = tokenize(&src);
		assert!(now.elapsed().as_secs() < 10, "Comment scanning is too slow.");
		assert_eq!(warnings, 0);
		assert_eq!(tokens.len(), 300_000);
		assert!(matches!(tokens[299_999], Token::Comment("c", _)));
	}
}
