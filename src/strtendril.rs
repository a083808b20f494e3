/*!
# HTMincer: Tendril Helpers.

A few in-place string manipulations for `StrTendril`, used for text nodes and
attribute values.
*/

use dactyl::traits::SaturatingFrom;
use tendril::StrTendril;



#[must_use]
/// # Is HTML Whitespace?
///
/// Space, tab, line feed, form feed, and carriage return. The no-break space
/// is _not_ whitespace for these purposes.
pub(crate) const fn is_ws(b: u8) -> bool {
	matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

#[must_use]
/// # Is (Only) Whitespace?
///
/// Returns `true` if the text is empty or contains only whitespace.
pub(crate) const fn is_whitespace(txt: &str) -> bool {
	let mut bytes = txt.as_bytes();
	while let [b'\t' | b'\n' | b'\x0C' | b'\r' | b' ', rest @ ..] = bytes { bytes = rest; }
	bytes.is_empty()
}

#[must_use]
/// # Has Line Break?
pub(crate) fn has_line_break(txt: &str) -> bool {
	memchr::memchr2(b'\n', b'\r', txt.as_bytes()).is_some()
}

#[must_use]
/// # Starts With Whitespace?
pub(crate) fn starts_with_ws(txt: &str) -> bool {
	txt.as_bytes().first().is_some_and(|&b| is_ws(b))
}

#[must_use]
/// # Ends With Whitespace?
pub(crate) fn ends_with_ws(txt: &str) -> bool {
	txt.as_bytes().last().is_some_and(|&b| is_ws(b))
}

#[must_use]
/// # Collapse Whitespace.
///
/// Convert each contiguous run of whitespace to a single space. If `newlines`
/// is set and the run contained a line break, a single `\n` is used instead.
///
/// Returns `None` if nothing would change.
pub(crate) fn collapse(txt: &str, newlines: bool) -> Option<String> {
	let bytes = txt.as_bytes();

	// Find the first run that needs work: any non-space whitespace, or any
	// pair of whitespaces.
	let first = bytes.iter().enumerate().position(|(idx, &b)|
		(is_ws(b) && b != b' ') ||
		(b == b' ' && bytes.get(idx + 1).is_some_and(|&n| is_ws(n)))
	)?;

	let mut out = String::with_capacity(txt.len());
	out.push_str(&txt[..first]);

	let mut run: Option<bool> = None; // Some(has_break) while in a run.
	for c in txt[first..].chars() {
		match c {
			'\t' | '\n' | '\x0C' | '\r' | ' ' => {
				let brk = matches!(c, '\n' | '\r');
				run = Some(run.unwrap_or(false) || brk);
			},
			c => {
				if let Some(brk) = run.take() {
					out.push(if brk && newlines { '\n' } else { ' ' });
				}
				out.push(c);
			},
		}
	}
	if let Some(brk) = run {
		out.push(if brk && newlines { '\n' } else { ' ' });
	}

	if out == txt { None }
	else { Some(out) }
}

/// # Collapse (In Place).
pub(crate) fn collapse_whitespace(txt: &mut StrTendril, newlines: bool) {
	if let Some(new) = collapse(txt.as_ref(), newlines) {
		*txt = StrTendril::from(new);
	}
}

/// # Trim.
pub(crate) fn trim(txt: &mut StrTendril) {
	trim_start(txt);
	trim_end(txt);
}

/// # Trim Start.
pub(crate) fn trim_start(txt: &mut StrTendril) {
	let len = txt.as_bytes().iter().take_while(|&&b| is_ws(b)).count();
	if len != 0 { txt.pop_front(u32::saturating_from(len)); }
}

/// # Trim End.
pub(crate) fn trim_end(txt: &mut StrTendril) {
	let len = txt.as_bytes().iter().rev().take_while(|&&b| is_ws(b)).count();
	if len != 0 { txt.pop_back(u32::saturating_from(len)); }
}
