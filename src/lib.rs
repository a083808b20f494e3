/*!
# `HTMincer`

`HTMincer` is a configurable HTML minifier. It parses a document (or
fragment) into a tree with full error recovery, runs the tree through a
series of rewriting passes, and serializes the result back out, noting
anything questionable it ran into along the way.

```
use htmincer::{
	Minifier,
	SettingsBuilder,
	WhitespaceMode,
};

let settings = SettingsBuilder::default()
	.with_whitespace_mode(WhitespaceMode::Aggressive)
	.build()
	.unwrap();

let res = Minifier::new(settings).minify("<ul>\n\t<li> One </li>\n\t<li> Two </li>\n</ul>");
assert_eq!(res.minified_content, "<ul><li>One<li>Two</ul>");
```



## Minification

What gets done, and how hard, is controlled by [`Settings`]. Out of the
box:

* Whitespace is collapsed, and trimmed around block-level boundaries;
* Comments are removed, save for `<!--! … -->`, `noindex`, and knockout markers;
* Empty attributes, default `type` attributes, and boolean values are dropped;
* Attribute quotes are dropped where HTML5 allows;
* Optional end tags are dropped;
* The doctype is shortened to `<!DOCTYPE html>`;
* Embedded CSS and JSON are minified.

Content inside `<pre>`, `<textarea>`, and similar elements is never
touched.

The [`SettingsBuilder::safe`] and [`SettingsBuilder::aggressive`] presets
back off or turn things up, respectively.



## Embedded Code

CSS, JavaScript, and JSON are handed off to delegates implementing
[`CssMinifier`] and [`JsMinifier`]. The defaults are
[`LightningCssMinifier`], [`NullJsMinifier`] (a pass-through), and
[`JsonMinifier`]; bring your own for anything fancier. A delegate that
reports errors leaves the code as it was.



## Diagnostics

Minification never fails outright. Parse problems are collected as
warnings, delegate failures as errors, each with a line/column
[`Position`] and an excerpt of the offending source.
*/

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(unused_crate_dependencies)]



mod delegate;
mod diagnostic;
mod dom;
mod entities;
mod error;
mod minify;
mod pool;
mod position;
mod ser;
mod settings;
mod strtendril;
mod tags;
mod tokenizer;

pub use delegate::{
	CodeMinification,
	CssMinifier,
	JsMinifier,
	JsonMinifier,
	LightningCssMinifier,
	NullCssMinifier,
	NullJsMinifier,
};
pub use diagnostic::{
	Category,
	Diagnostic,
	Severity,
};
pub use error::SettingsError;
pub use minify::{
	MinificationResult,
	Minifier,
	Statistics,
};
pub use position::Position;
pub use settings::{
	AttributeQuotesMode,
	EmptyTagRenderMode,
	NewLineStyle,
	Settings,
	SettingsBuilder,
	WhitespaceMode,
};
pub use tags::Namespace;
