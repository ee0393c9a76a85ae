//! apiviz is a small set of tools for making sense of library-call traces, such as the ones
//! produced by [drltrace]. A trace is just a long list of intercepted calls, one per line, and
//! reading a few hundred thousand of those top to bottom is not a great way to spot patterns.
//! apiviz turns them into pictures instead.
//!
//! The crate consists of two parts: the visualizer, which renders a trace into a color-coded
//! raster image plus an HTML legend, and the duplicate helpers, which thin out or summarize
//! pipe-delimited call logs. The visualizer lives in the [`visualize`] module (on top of the
//! trace parser in [`trace`]) and the `apiviz` binary; the helpers live in [`duplicates`] and the
//! `apiviz-remove-duplicates` and `apiviz-find-duplicates` binaries.
//!
//! # Command-line use
//!
//! ## Rendering a trace
//!
//! Each unique call name in the trace is assigned its own color, and every call in the trace
//! becomes one pixel in the output image, laid out row by row. Programs that behave similarly
//! produce images that look similarly, which makes it easy to eyeball differences between two
//! runs or two samples.
//!
//! ```console
//! $ drrun -t drltrace -logdir . -- calc.exe
//! $ apiviz -t drltrace.calc.exe.00532.000.log -i calc.png --html calc.html
//! ```
//!
//! This writes `calc.png`, a legend mapping colors back to call names in `legend_calc.png.html`,
//! and an inspectable HTML version of the image in `calc.html` where each block shows its call
//! name on hover.
//!
//! Colors are picked randomly, but from a fixed seed, so rendering the same trace twice gives
//! the same picture. Calls you care about (by default `GetProcAddress`) can be given a fixed
//! color with a marked-calls file:
//!
//! ```console
//! $ cat marked.txt
//! GetProcAddress
//! LoadLibraryA->rgb(0,0,255)
//! $ apiviz -t trace.log -i trace.png -m marked.txt
//! ```
//!
//! ## Thinning out logs
//!
//! ```console
//! $ apiviz-remove-duplicates calls.log > unique.log
//! $ apiviz-find-duplicates calls.log
//! ```
//!
//!   [drltrace]: https://github.com/mxmssh/drltrace

#![deny(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate log;

/// Parsing of library-call traces.
///
/// See the [crate-level documentation] for details.
///
///   [crate-level documentation]: ../index.html
pub mod trace;

/// Tools for rendering traces into images and HTML pages.
///
/// See the [crate-level documentation] for details.
///
///   [crate-level documentation]: ../index.html
pub mod visualize;

/// Deduplication and counting of pipe-delimited call logs.
///
/// See the [crate-level documentation] for details.
///
///   [crate-level documentation]: ../index.html
pub mod duplicates;
