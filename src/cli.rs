/*!
# `HTMincer`: CLI Errors
*/

use fyi_msg::ProglessError;
use std::{
	error::Error,
	fmt,
};



/// # Help Text.
const HELP: &str = concat!(r"
     __,---.__
  ,-'         `-.__
&/           `._\ _\
/               ''._    ", "\x1b[38;5;199mHTMincer\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r#"
|   ,             (∞)   Configurable, in-place
|__,'`-..--|__|--''     HTML minification.

USAGE:
    htmincer [FLAGS] [OPTIONS] <PATH(S)>...

FLAGS:
    -a, --aggressive  Use the aggressive preset: inline-flow whitespace
                      trimming, redundant attribute removal, optional start
                      tag removal.
        --keep-comments
                      Do not strip HTML comments.
    -h, --help        Print help information and exit.
    -p, --progress    Show progress bar while minifying.
    -s, --safe        Use the safe preset: whitespace is collapsed but never
                      trimmed.
    -V, --version     Print program version and exit.
    -w, --warnings    Print parse warnings and delegate errors for each
                      document.

OPTIONS:
    -l, --list <FILE> Read (absolute) file and/or directory paths from this
                      text file, or STDIN if "-", one entry per line, instead
                      of or in addition to the trailing <PATH(S)>.

ARGS:
    <PATH(S)>...      One or more files or directories to compress.
"#);



#[expect(clippy::missing_docs_in_private_items, reason = "Self-explanatory.")]
#[derive(Debug, Copy, Clone)]
/// # Generic Error.
pub(super) enum CliError {
	ListFile,
	NoDocuments,
	Presets,
	Progress(ProglessError),
	Settings,
	PrintHelp,    // Not an error.
	PrintVersion, // Not an error.
}

impl AsRef<str> for CliError {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for CliError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Error for CliError {}

impl From<ProglessError> for CliError {
	#[inline]
	fn from(src: ProglessError) -> Self { Self::Progress(src) }
}

impl CliError {
	/// # As Str.
	pub(super) const fn as_str(self) -> &'static str {
		match self {
			Self::ListFile => "Unable to read the -l/--list file.",
			Self::NoDocuments => "No documents were found.",
			Self::Presets => "The -a/--aggressive and -s/--safe presets are mutually exclusive.",
			Self::Progress(e) => e.as_str(),
			Self::Settings => "Invalid minification settings.",
			Self::PrintHelp => HELP,
			Self::PrintVersion => concat!("HTMincer v", env!("CARGO_PKG_VERSION")),
		}
	}
}
