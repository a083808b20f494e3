/*!
# HTMincer: Diagnostics.
*/

use crate::position::{
	Position,
	SourceLines,
};
use std::fmt;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Severity.
pub enum Severity {
	/// # Warning.
	///
	/// Something was off, but a recovery rule applied.
	Warning,

	/// # Error.
	///
	/// Something failed; the affected fragment was left as-was.
	Error,
}

impl Severity {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Warning => "Warning",
			Self::Error => "Error",
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Diagnostic Category.
pub enum Category {
	/// # Markup Parsing.
	Parse,

	/// # CSS Delegate.
	Css,

	/// # JS Delegate.
	Js,

	/// # JSON Delegate.
	Json,

	/// # Nested Template Markup.
	Template,
}

impl Category {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Parse => "HTML parsing",
			Self::Css => "CSS minification",
			Self::Js => "JS minification",
			Self::Json => "JSON minification",
			Self::Template => "Template minification",
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Diagnostic.
///
/// A warning or error bound to a source position.
pub struct Diagnostic {
	/// # Severity.
	severity: Severity,

	/// # Category.
	category: Category,

	/// # Message.
	message: String,

	/// # Position.
	position: Position,

	/// # Source Excerpt.
	fragment: String,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} {} ({}): {}",
			self.category.as_str(),
			self.severity.as_str().to_ascii_lowercase(),
			self.position,
			self.message,
		)?;
		if ! self.fragment.is_empty() {
			write!(f, "\n{}", self.fragment)?;
		}
		Ok(())
	}
}

impl Diagnostic {
	#[must_use]
	/// # Severity.
	pub const fn severity(&self) -> Severity { self.severity }

	#[must_use]
	/// # Category.
	pub const fn category(&self) -> Category { self.category }

	#[must_use]
	/// # Message.
	pub fn message(&self) -> &str { &self.message }

	#[must_use]
	/// # Position.
	pub const fn position(&self) -> Position { self.position }

	#[must_use]
	/// # Source Fragment.
	///
	/// The offending line (with its neighbors) and a caret under the column.
	pub fn source_fragment(&self) -> &str { &self.fragment }
}



#[derive(Debug)]
/// # Diagnostics Collector.
///
/// Collects warnings and errors for a single run. Recording never fails and
/// never interrupts the pipeline.
pub(crate) struct Diagnostics<'a> {
	/// # Source (For Fragments).
	src: &'a str,

	/// # Line Index.
	///
	/// This is built the first time a fragment is needed.
	lines: Option<SourceLines<'a>>,

	/// # Warnings.
	warnings: Vec<Diagnostic>,

	/// # Errors.
	errors: Vec<Diagnostic>,
}

impl<'a> Diagnostics<'a> {
	#[must_use]
	/// # New.
	pub(crate) const fn new(src: &'a str) -> Self {
		Self {
			src,
			lines: None,
			warnings: Vec::new(),
			errors: Vec::new(),
		}
	}

	/// # Add Warning.
	pub(crate) fn warn<S>(&mut self, category: Category, position: Position, message: S)
	where S: Into<String> {
		let d = self.build(Severity::Warning, category, position, message.into());
		self.warnings.push(d);
	}

	/// # Add Error.
	pub(crate) fn error<S>(&mut self, category: Category, position: Position, message: S)
	where S: Into<String> {
		let d = self.build(Severity::Error, category, position, message.into());
		self.errors.push(d);
	}

	/// # Adopt Nested Diagnostics.
	///
	/// Diagnostics from a recursive run over a snippet are re-anchored at
	/// `base` and re-excerpted from the full document.
	pub(crate) fn adopt(&mut self, nested: Vec<Diagnostic>, base: Position) {
		for d in nested {
			let position = d.position.rebase(base);
			let d = self.build(d.severity, Category::Template, position, d.message);
			match d.severity {
				Severity::Warning => self.warnings.push(d),
				Severity::Error => self.errors.push(d),
			}
		}
	}

	#[must_use]
	/// # Into Parts.
	///
	/// Return the warnings and errors, respectively, each in source order.
	pub(crate) fn into_parts(mut self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
		let key = |d: &Diagnostic| (d.position.line(), d.position.column());
		self.warnings.sort_by_key(key);
		self.errors.sort_by_key(key);
		(self.warnings, self.errors)
	}

	/// # Build.
	fn build(
		&mut self,
		severity: Severity,
		category: Category,
		position: Position,
		message: String,
	) -> Diagnostic {
		log::trace!("{} at {position}: {message}", severity.as_str());
		let src = self.src;
		let fragment = self.lines
			.get_or_insert_with(|| SourceLines::new(src))
			.fragment(position);
		Diagnostic {
			severity,
			category,
			message,
			position,
			fragment,
		}
	}
}
