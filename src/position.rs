/*!
# HTMincer: Source Positions.

Diagnostics point back into the original document by line and column. Rather
than rescanning the source for every lookup, the tracker walks forward from
the last offset it was asked about, so a full tokenizer pass stays linear.
Excerpts are likewise cut from a line index built once per run.
*/

use std::fmt;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Position.
///
/// A one-based line/column pair. Columns count characters, not bytes.
///
/// [`Position::EMPTY`] (`0:0`) means "no position".
pub struct Position {
	/// # Line.
	line: usize,

	/// # Column.
	column: usize,
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

impl Position {
	/// # Empty.
	pub const EMPTY: Self = Self { line: 0, column: 0 };

	#[must_use]
	/// # New.
	pub const fn new(line: usize, column: usize) -> Self { Self { line, column } }

	#[must_use]
	/// # Line Number.
	pub const fn line(self) -> usize { self.line }

	#[must_use]
	/// # Column Number.
	pub const fn column(self) -> usize { self.column }

	#[must_use]
	/// # Is Empty?
	pub const fn is_empty(self) -> bool { self.line == 0 && self.column == 0 }

	#[must_use]
	/// # Rebase.
	///
	/// Positions reported for a snippet (e.g. the body of a template
	/// `<script>`) are relative to that snippet. This translates them into
	/// document positions given where the snippet itself begins.
	///
	/// Only the first snippet line shares a column offset with `base`.
	pub const fn rebase(self, base: Self) -> Self {
		if self.is_empty() { return base; }
		if base.is_empty() { return self; }
		if self.line == 1 {
			Self {
				line: base.line,
				column: base.column + self.column - 1,
			}
		}
		else {
			Self {
				line: base.line + self.line - 1,
				column: self.column,
			}
		}
	}
}



#[derive(Debug, Clone)]
/// # Position Tracker.
///
/// Translates byte offsets into [`Position`]s. Queries are expected to be
/// (mostly) increasing; a backwards query restarts the walk from the top.
///
/// Line breaks are recognized uniformly: `\n`, `\r`, `\r\n`, and `\n\r` each
/// count as a single logical break.
pub(crate) struct PositionTracker<'a> {
	/// # Source.
	src: &'a str,

	/// # Byte Offset Reached.
	offset: usize,

	/// # Line at Offset.
	line: usize,

	/// # Column at Offset.
	column: usize,

	/// # Last Break Character.
	///
	/// When the previous character was `\r` or `\n`, the opposite one
	/// immediately after it belongs to the same logical break.
	last_break: Option<u8>,
}

impl<'a> PositionTracker<'a> {
	#[must_use]
	/// # New.
	pub(crate) const fn new(src: &'a str) -> Self {
		Self {
			src,
			offset: 0,
			line: 1,
			column: 1,
			last_break: None,
		}
	}

	/// # Position At.
	///
	/// Return the position of the character beginning at byte `offset`.
	/// Offsets past the end are clamped; offsets inside a multi-byte
	/// character resolve to that character.
	pub(crate) fn position_at(&mut self, offset: usize) -> Position {
		let offset = offset.min(self.src.len());
		if offset < self.offset { self.reset(); }

		let bytes = self.src.as_bytes();
		while self.offset < offset {
			let b = bytes[self.offset];
			match b {
				b'\n' | b'\r' => {
					// The second half of a pair doesn't start a new line.
					if self.last_break.is_some_and(|last| last != b) {
						self.last_break = None;
					}
					else {
						self.line += 1;
						self.column = 1;
						self.last_break = Some(b);
					}
				},
				// UTF-8 continuation bytes don't begin a character.
				0x80..=0xBF => {},
				_ => {
					self.column += 1;
					self.last_break = None;
				},
			}
			self.offset += 1;
		}

		Position::new(self.line, self.column)
	}

	/// # Reset.
	const fn reset(&mut self) {
		self.offset = 0;
		self.line = 1;
		self.column = 1;
		self.last_break = None;
	}
}



#[derive(Debug, Clone)]
/// # Source Lines.
///
/// The source split into logical lines (using the same breaks the tracker
/// recognizes), so excerpts can be cut without rescanning the document.
pub(crate) struct SourceLines<'a>(Vec<&'a str>);

impl<'a> SourceLines<'a> {
	#[must_use]
	/// # New.
	pub(crate) fn new(src: &'a str) -> Self {
		let bytes = src.as_bytes();
		let mut out = Vec::new();
		let mut start = 0;
		let mut idx = 0;
		while let Some(next) = memchr::memchr2(b'\n', b'\r', &bytes[idx..]).map(|n| n + idx) {
			out.push(&src[start..next]);
			idx = next + 1;
			// Swallow the other half of a pair.
			if bytes.get(idx).is_some_and(|&b| matches!(b, b'\n' | b'\r') && b != bytes[next]) {
				idx += 1;
			}
			start = idx;
		}
		out.push(&src[start..]);
		Self(out)
	}

	#[must_use]
	/// # Source Fragment.
	///
	/// Build a short excerpt around `pos` for error reports: the previous
	/// line (if any), the offending line, a caret pointing at the column,
	/// and the next line (if any). Each line is prefixed with its number.
	///
	/// Returns an empty string for [`Position::EMPTY`] or out-of-range
	/// lines.
	pub(crate) fn fragment(&self, pos: Position) -> String {
		use std::fmt::Write;

		if pos.is_empty() { return String::new(); }

		let lines = self.0.as_slice();
		let Some(current) = lines.get(pos.line - 1) else { return String::new(); };

		// Line numbers are right-aligned to the widest one shown.
		let last = (pos.line + 1).min(lines.len());
		let width = last.to_string().len();

		let mut out = String::new();
		if pos.line > 1 {
			let _res = writeln!(out, "Line {:>width$}: {}", pos.line - 1, lines[pos.line - 2]);
		}
		let _res = writeln!(out, "Line {:>width$}: {}", pos.line, current);

		// The caret lines up beneath the column, accounting for the prefix.
		let pad = "Line : ".len() + width + pos.column.saturating_sub(1);
		out.push_str(&"-".repeat(pad));
		out.push_str("^\n");

		if pos.line < lines.len() {
			let _res = writeln!(out, "Line {:>width$}: {}", pos.line + 1, lines[pos.line]);
		}

		// Drop the final line break.
		out.pop();
		out
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_position_at() {
		let src = "ab\ncd\r\nef\n\rgh\rij";
		let mut tracker = PositionTracker::new(src);
		for (offset, line, column) in [
			(0, 1, 1),
			(1, 1, 2),
			(3, 2, 1),
			(4, 2, 2),
			(7, 3, 1),
			(11, 4, 1),
			(14, 5, 1),
			(15, 5, 2),
		] {
			assert_eq!(
				tracker.position_at(offset),
				Position::new(line, column),
				"Offset {offset}",
			);
		}

		// Backwards queries still work.
		assert_eq!(tracker.position_at(1), Position::new(1, 2));
	}

	#[test]
	fn t_position_multibyte() {
		let src = "√√x";
		let mut tracker = PositionTracker::new(src);
		assert_eq!(tracker.position_at(6), Position::new(1, 3));
	}

	#[test]
	fn t_rebase() {
		let base = Position::new(10, 5);
		assert_eq!(Position::new(1, 3).rebase(base), Position::new(10, 7));
		assert_eq!(Position::new(3, 3).rebase(base), Position::new(12, 3));
		assert_eq!(Position::EMPTY.rebase(base), base);
	}

	#[test]
	fn t_source_lines() {
		let lines = SourceLines::new("ab\ncd\r\nef\n\rgh\rij\n");
		assert_eq!(lines.0, ["ab", "cd", "ef", "gh", "ij", ""]);

		// Two breaks of the same kind are two lines.
		let lines = SourceLines::new("a\n\nb\r\r");
		assert_eq!(lines.0, ["a", "", "b", "", ""]);
	}

	#[test]
	fn t_source_fragment() {
		let lines = SourceLines::new("<p>\n<b x=\"1>\n</p>");
		assert_eq!(
			lines.fragment(Position::new(2, 4)),
			"Line 1: <p>\nLine 2: <b x=\"1>\n-----------^\nLine 3: </p>",
		);
		assert_eq!(
			lines.fragment(Position::new(1, 1)),
			"Line 1: <p>\n--------^\nLine 2: <b x=\"1>",
		);

		assert!(lines.fragment(Position::EMPTY).is_empty());
		assert!(lines.fragment(Position::new(9, 1)).is_empty());
	}
}
