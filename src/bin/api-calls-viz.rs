use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process;

use apiviz::visualize::{self, MarkedCalls, Options};
use clap::{ArgAction, Parser};
use env_logger::Env;

#[derive(Debug, Parser)]
#[clap(
    name = "apiviz",
    about,
    after_help = "\
[1] Every distinct call gets its own color, and every call in the trace becomes one pixel,
    laid out row by row. A legend is written next to the image as legend_<IMAGE>.html.
[2] Marked calls are listed one per line, either as a bare call name or as
    NAME->rgb(R,G,B). Bare names are drawn in red.
[3] -ht and -gr are accepted as short forms of --html and --grayscale.
    On failure a diagnostic is printed and apiviz exits with status 1.
    "
)]
struct Opt {
    // ************* //
    // *** FLAGS *** //
    // ************* //
    /// Generate the image in grayscale [3]
    #[clap(long = "grayscale", visible_alias = "gr")]
    grayscale: bool,

    /// Silence all log output
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Verbose logging mode (-v, -vv, -vvv)
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    // *************** //
    // *** OPTIONS *** //
    // *************** //
    /// Trace file with API calls in the format "library_name!api_call_name"
    #[clap(short = 't', long = "trace", value_name = "PATH")]
    trace: PathBuf,

    /// Image file to write; the image format follows the extension
    #[clap(
        short = 'i',
        long = "image",
        default_value = "tmp.jpeg",
        value_name = "PATH"
    )]
    image: PathBuf,

    /// Also write the image as an HTML page (heavy) [3]
    #[clap(long = "html", visible_alias = "ht", value_name = "PATH")]
    html: Option<PathBuf>,

    /// Calls to draw in a fixed color [2] [default: GetProcAddress in red]
    #[clap(short = 'm', long = "marked", value_name = "PATH")]
    marked: Option<PathBuf>,

    /// Seed for picking call colors
    #[clap(short = 's', long = "seed", default_value = "0", value_name = "UINT")]
    seed: u64,
}

impl Opt {
    fn into_parts(self) -> io::Result<(PathBuf, PathBuf, Option<PathBuf>, Options)> {
        let marked = match self.marked {
            Some(ref path) => MarkedCalls::from_file(path)?,
            None => MarkedCalls::default(),
        };
        Ok((
            self.trace,
            self.image,
            self.html,
            Options {
                grayscale: self.grayscale,
                seed: self.seed,
                marked,
            },
        ))
    }
}

fn run(opt: Opt) -> Result<(), visualize::Error> {
    let (trace, image, html, options) = opt.into_parts()?;
    visualize::from_files(&options, trace, image, html)
}

// Shorts are single characters in clap, so `-ht` and `-gr` have to become long flags before
// parsing. Everything after `--` is left alone.
fn expand_short_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut escaped = false;
    args.into_iter()
        .map(|arg| {
            if escaped {
                arg
            } else if arg == "--" {
                escaped = true;
                arg
            } else if arg == "-ht" {
                OsString::from("--html")
            } else if arg == "-gr" {
                OsString::from("--grayscale")
            } else {
                arg
            }
        })
        .collect()
}

fn main() {
    let opt = Opt::parse_from(expand_short_flags(env::args_os()));

    // Initialize logger
    if !opt.quiet {
        env_logger::Builder::from_env(Env::default().default_filter_or(match opt.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }))
        .format_timestamp(None)
        .init();
    }

    if let Err(e) = run(opt) {
        eprintln!("apiviz: {}", e);
        process::exit(1);
    }
}
