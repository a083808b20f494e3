/*!
# HTMincer: Character References.

Text and attribute values are kept in their source form throughout, so
decoding is only ever needed to _compare_ a value against something, like
a default attribute value or a MIME type.

Only the handful of named references that turn up in such values are
recognized, along with well-formed numeric references. Anything else passes
through unchanged.
*/

use std::borrow::Cow;



/// # Named References.
const NAMED: [(&str, char); 6] = [
	("amp;", '&'),
	("apos;", '\''),
	("gt;", '>'),
	("lt;", '<'),
	("nbsp;", '\u{a0}'),
	("quot;", '"'),
];

/// # Max Digits (Hex).
const MAX_HEX: usize = 6;

/// # Max Digits (Decimal).
const MAX_DEC: usize = 7;



#[must_use]
/// # Decode.
///
/// Returns the value with recognized references replaced, borrowing when
/// there was nothing to do.
pub(crate) fn decode(src: &str) -> Cow<'_, str> {
	let Some(mut idx) = memchr::memchr(b'&', src.as_bytes()) else {
		return Cow::Borrowed(src);
	};

	let mut out = String::with_capacity(src.len());
	out.push_str(&src[..idx]);

	while idx < src.len() {
		let rest = &src[idx..];
		if let Some(after) = rest.strip_prefix('&') &&
			let Some((c, len)) = reference(after)
		{
			out.push(c);
			idx += 1 + len;
			continue;
		}

		// Copy through to the next ampersand.
		let next = memchr::memchr(b'&', &rest.as_bytes()[1..]).map_or(rest.len(), |n| n + 1);
		out.push_str(&rest[..next]);
		idx += next;
	}

	Cow::Owned(out)
}

/// # Parse Reference.
///
/// Parse the reference following an `&`, returning the character and the
/// number of bytes consumed (including the `;`).
fn reference(src: &str) -> Option<(char, usize)> {
	if let Some(num) = src.strip_prefix('#') {
		let (digits, radix, max, skip) = match num.as_bytes().first() {
			Some(b'x' | b'X') => (&num[1..], 16, MAX_HEX, 2),
			_ => (num, 10, MAX_DEC, 1),
		};

		let end = digits.find(';')?;
		if end == 0 || end > max { return None; }
		let code = u32::from_str_radix(&digits[..end], radix).ok()?;
		let c = char::from_u32(code)?;
		Some((c, skip + end + 1))
	}
	else {
		NAMED.iter().find_map(|(k, v)|
			if src.starts_with(k) { Some((*v, k.len())) }
			else { None }
		)
	}
}
