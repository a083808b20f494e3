/*!
# HTMincer: Delegates.

Embedded CSS, JavaScript, and JSON are not minified by this crate directly;
that work is handed off to pluggable delegates implementing [`CssMinifier`]
or [`JsMinifier`].

A few simple implementations are provided out of the box:
* [`NullCssMinifier`] and [`NullJsMinifier`] return the code unchanged;
* [`LightningCssMinifier`] reprints CSS through `lightningcss`;
* [`JsonMinifier`] validates JSON and strips insignificant whitespace;
*/

use crate::strtendril::is_ws;
use lightningcss::stylesheet::{
	ParserOptions,
	PrinterOptions,
	StyleAttribute,
	StyleSheet,
};



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Code Minification Result.
pub struct CodeMinification {
	/// # Code.
	pub code: String,

	/// # Errors.
	///
	/// If non-empty, the code is considered broken and the original is kept.
	pub errors: Vec<String>,
}

impl CodeMinification {
	#[must_use]
	/// # Success.
	pub const fn ok(code: String) -> Self {
		Self { code, errors: Vec::new() }
	}

	#[must_use]
	/// # Failure.
	pub fn err<S: Into<String>>(code: &str, error: S) -> Self {
		Self {
			code: code.to_owned(),
			errors: vec![error.into()],
		}
	}

	#[must_use]
	/// # Is Ok?
	pub fn is_ok(&self) -> bool { self.errors.is_empty() }
}



/// # CSS Minifier.
///
/// `inline` is `true` for `style` attribute values, which hold declarations
/// only, and `false` for `<style>` element bodies.
pub trait CssMinifier: Send + Sync {
	/// # Minify.
	fn minify(&self, code: &str, inline: bool) -> CodeMinification;
}

/// # JavaScript Minifier.
///
/// `inline` is `true` for event handler attributes and `false` for
/// `<script>` element bodies.
pub trait JsMinifier: Send + Sync {
	/// # Minify.
	fn minify(&self, code: &str, inline: bool) -> CodeMinification;
}



#[derive(Debug, Clone, Copy, Default)]
/// # No-Op CSS Minifier.
pub struct NullCssMinifier;

impl CssMinifier for NullCssMinifier {
	#[inline]
	fn minify(&self, code: &str, _inline: bool) -> CodeMinification {
		CodeMinification::ok(code.to_owned())
	}
}

#[derive(Debug, Clone, Copy, Default)]
/// # No-Op JS Minifier.
pub struct NullJsMinifier;

impl JsMinifier for NullJsMinifier {
	#[inline]
	fn minify(&self, code: &str, _inline: bool) -> CodeMinification {
		CodeMinification::ok(code.to_owned())
	}
}



#[derive(Debug, Clone, Copy, Default)]
/// # Lightning CSS Minifier.
///
/// Stylesheets and `style` attribute declarations are parsed and reprinted
/// by [`lightningcss`] with minification enabled. Anything it cannot parse
/// is reported as an error, leaving the original code in place.
pub struct LightningCssMinifier;

impl CssMinifier for LightningCssMinifier {
	fn minify(&self, code: &str, inline: bool) -> CodeMinification {
		let res =
			if inline { minify_declarations(code) }
			else { minify_stylesheet(code) };

		match res {
			Ok(out) => CodeMinification::ok(out),
			Err(e) => CodeMinification::err(code, e),
		}
	}
}

/// # Minify Stylesheet.
fn minify_stylesheet(code: &str) -> Result<String, String> {
	let sheet = StyleSheet::parse(code, ParserOptions::default())
		.map_err(|e| e.to_string())?;
	sheet.to_css(printer())
		.map(|out| out.code)
		.map_err(|e| e.to_string())
}

/// # Minify Declarations.
fn minify_declarations(code: &str) -> Result<String, String> {
	let attr = StyleAttribute::parse(code, ParserOptions::default())
		.map_err(|e| e.to_string())?;
	attr.to_css(printer())
		.map(|out| out.code)
		.map_err(|e| e.to_string())
}

/// # Printer Options.
fn printer() -> PrinterOptions<'static> {
	PrinterOptions {
		minify: true,
		..PrinterOptions::default()
	}
}



#[derive(Debug, Clone, Copy, Default)]
/// # JSON Minifier.
///
/// The code is validated with `serde_json`, then whitespace outside of
/// strings is removed. Key order and number formatting are left exactly as
/// written.
pub struct JsonMinifier;

impl JsMinifier for JsonMinifier {
	fn minify(&self, code: &str, _inline: bool) -> CodeMinification {
		// Nothing is nothing.
		let trimmed = code.trim_matches(|c: char| c.is_ascii() && is_ws(c as u8));
		if trimmed.is_empty() { return CodeMinification::ok(String::new()); }

		if let Err(e) = serde_json::from_str::<serde_json::Value>(trimmed) {
			return CodeMinification::err(code, e.to_string());
		}

		let mut out = String::with_capacity(trimmed.len());
		let mut rest = trimmed;
		while let Some(ch) = rest.chars().next() {
			if ch == '"' {
				// Validation guarantees the string is closed.
				let len = string_len(rest).unwrap_or(rest.len());
				out.push_str(&rest[..len]);
				rest = &rest[len..];
				continue;
			}

			if ! (ch.is_ascii() && is_ws(ch as u8)) { out.push(ch); }
			rest = &rest[ch.len_utf8()..];
		}

		CodeMinification::ok(out)
	}
}



#[must_use]
/// # String Length.
///
/// Return the byte length of the quoted string at the start of `src`,
/// including both quotes, or `None` if it is never closed.
fn string_len(src: &str) -> Option<usize> {
	let bytes = src.as_bytes();
	let quote = *bytes.first()?;
	let mut idx = 1;
	while idx < bytes.len() {
		match bytes[idx] {
			b'\\' => { idx += 2; },
			b if b == quote => return Some(idx + 1),
			_ => { idx += 1; },
		}
	}
	None
}
