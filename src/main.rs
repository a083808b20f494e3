/*!
# `HTMincer`

`HTMincer` is an in-place HTML minifier for the command line. It crawls the
paths it is given for `.htm`/`.html` files and crunches each of them with
the `htmincer` library, in parallel.

Documents are only ever rewritten when minification actually saves
something. If a document is empty, is not valid UTF-8, or somehow comes out
bigger than it went in, it is left as-was.



## Use

For basic use, just toss one or more file or directory paths after the command,
like:
```bash
# Crunch one file.
htmincer /path/to/one.html

# Recursively crunch every .htm(l) file in a directory.
htmincer /path/to

# Do the same thing but with a progress bar.
htmincer -p /path/to

# Go hard, and see what the parser complained about.
htmincer -a -w /path/to

# For a full list of options, run help:
htmincer -h
```
*/

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::missing_docs_in_private_items)]
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

#![allow(clippy::module_name_repetitions)]
#![allow(unused_crate_dependencies)]



mod cli;

use argyle::Argument;
use cli::CliError;
use dactyl::NiceU64;
use dowser::{
	Dowser,
	Extension,
};
use fyi_msg::{
	Msg,
	Progless,
};
use htmincer::{
	Diagnostic,
	Minifier,
	Settings,
	SettingsBuilder,
};
use rayon::iter::{
	IntoParallelRefIterator,
	ParallelIterator,
};
use std::path::{
	Path,
	PathBuf,
};



include!(concat!(env!("OUT_DIR"), "/htmincer-extensions.rs"));



#[derive(Debug, Default)]
/// # Document Report.
struct Report {
	/// # Original Size.
	before: u64,

	/// # Final Size.
	after: u64,

	/// # Warnings and Errors.
	notes: Vec<Diagnostic>,
}



/// # Main.
fn main() {
	match main__() {
		Ok(()) => {},
		Err(e @ (CliError::PrintHelp | CliError::PrintVersion)) => {
			println!("{e}");
		},
		Err(e) => { Msg::error(e.as_str()).die(1); },
	}
}

#[inline]
/// # Actual Main.
fn main__() -> Result<(), CliError> {
	// Parse CLI arguments.
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut aggressive = false;
	let mut keep_comments = false;
	let mut progress = false;
	let mut safe = false;
	let mut warnings = false;
	let mut paths = Dowser::default();
	for arg in args {
		match arg {
			Argument::Key("-a" | "--aggressive") => { aggressive = true; },
			Argument::Key("--keep-comments") => { keep_comments = true; },
			Argument::Key("-h" | "--help") => return Err(CliError::PrintHelp),
			Argument::Key("-p" | "--progress") => { progress = true; },
			Argument::Key("-s" | "--safe") => { safe = true; },
			Argument::Key("-V" | "--version") => return Err(CliError::PrintVersion),
			Argument::Key("-w" | "--warnings") => { warnings = true; },

			Argument::KeyWithValue("-l" | "--list", s) => {
				paths.read_paths_from_file(&s).map_err(|_| CliError::ListFile)?;
			},

			// Assume paths.
			Argument::Other(s) => { paths = paths.with_path(s); },
			Argument::InvalidUtf8(s) => { paths = paths.with_path(s); },

			// Nothing else is expected.
			_ => {},
		}
	}

	// Sort out the settings.
	let settings = settings(aggressive, safe, keep_comments)?;
	let minifier = Minifier::new(settings);

	// Find the documents.
	let paths: Vec<PathBuf> = paths.filter(|p| is_html(p)).collect();
	if paths.is_empty() { return Err(CliError::NoDocuments); }

	// Sexy run-through.
	let reports: Vec<(&PathBuf, Report)> =
		if progress {
			// Boot up a progress bar.
			let progress = Progless::try_from(paths.len())?
				.with_title(Some(Msg::custom("HTMincer", 199, "Reticulating &splines;")));

			let out = paths.par_iter()
				.filter_map(|p| {
					let tmp = p.to_string_lossy();
					progress.add(&tmp);
					let res = crunch(p, &minifier, warnings);
					progress.remove(&tmp);
					res.map(|r| (p, r))
				})
				.collect();

			progress.finish();
			out
		}
		else {
			paths.par_iter()
				.filter_map(|p| crunch(p, &minifier, warnings).map(|r| (p, r)))
				.collect()
		};

	// Diagnostics?
	if warnings {
		for (path, report) in &reports {
			if report.notes.is_empty() { continue; }
			Msg::warning(path.to_string_lossy()).eprint();
			for note in &report.notes { eprintln!("{note}\n"); }
		}
	}

	// Summarize.
	if progress {
		let (before, after) = reports.iter().fold(
			(0_u64, 0_u64),
			|(b, a), (_, r)| (b + r.before, a + r.after),
		);
		Msg::crunched(format!(
			"{} documents, {} bytes saved.",
			NiceU64::from(reports.len() as u64),
			NiceU64::from(before.saturating_sub(after)),
		)).print();
	}

	Ok(())
}

/// # Settings.
fn settings(aggressive: bool, safe: bool, keep_comments: bool)
-> Result<Settings, CliError> {
	let builder = match (aggressive, safe) {
		(true, true) => return Err(CliError::Presets),
		(true, false) => SettingsBuilder::aggressive(),
		(false, true) => SettingsBuilder::safe(),
		(false, false) => SettingsBuilder::default(),
	};

	let builder =
		if keep_comments { builder.with_remove_html_comments(false) }
		else { builder };

	builder.build().map_err(|_| CliError::Settings)
}

/// # Is HTML?
fn is_html(path: &Path) -> bool {
	Extension::try_from4(path) == Some(E_HTML) ||
	Extension::try_from3(path) == Some(E_HTM)
}

/// # Crunch!
///
/// Minify the document at `path`, saving the result if it's smaller. The
/// sizes are returned either way, along with the diagnostics (if wanted),
/// unless the file could not be read at all.
fn crunch(path: &Path, minifier: &Minifier, warnings: bool) -> Option<Report> {
	let raw = std::fs::read(path).ok()?;
	let before = raw.len() as u64;
	let mut report = Report { before, after: before, notes: Vec::new() };
	if raw.is_empty() { return Some(report); }

	let Ok(src) = String::from_utf8(raw) else { return Some(report); };
	let res = minifier.minify(&src);

	let after = res.minified_content.len() as u64;
	if
		0 < after &&
		after < before &&
		write_atomic::write_file(path, res.minified_content.as_bytes()).is_ok()
	{
		report.after = after;
	}

	if warnings {
		report.notes = res.warnings;
		report.notes.extend(res.errors);
	}

	Some(report)
}
