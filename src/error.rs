/*!
# HTMincer: Errors.
*/

use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Settings Error.
///
/// Configuration problems are caught when `Settings` are built, before any
/// document is touched. Each variant carries the offending list entry.
pub enum SettingsError {
	/// # Malformed Attribute Selector.
	AttributeSelector(String),

	/// # Invalid MIME Type.
	MimeType(String),

	/// # Invalid Tag Name.
	TagName(String),
}

impl fmt::Display for SettingsError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {:?}", self.as_str(), self.entry())
	}
}

impl Error for SettingsError {}

impl SettingsError {
	#[must_use]
	/// # As Str.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::AttributeSelector(_) => "Malformed preservable attribute selector:",
			Self::MimeType(_) => "Invalid processable script type:",
			Self::TagName(_) => "Invalid preservable optional tag:",
		}
	}

	#[must_use]
	/// # Offending Entry.
	pub fn entry(&self) -> &str {
		match self {
			Self::AttributeSelector(s) | Self::MimeType(s) | Self::TagName(s) => s,
		}
	}
}
