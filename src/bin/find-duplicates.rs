use std::io;
use std::path::PathBuf;

use apiviz::duplicates::find::{self, Options};
use clap::{ArgAction, Parser};
use env_logger::Env;

#[derive(Debug, Parser)]
#[clap(
    name = "apiviz-find-duplicates",
    about,
    after_help = "\
[1] Lines are keyed by their second |-separated field. Keys that repeat are printed with their
    count as \"COUNT\":\"KEY\", most frequent first. Lines without a | or with a # in them
    are skipped.
    "
)]
struct Opt {
    /// Silence all log output
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Verbose logging mode (-v, -vv, -vvv)
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only report keys seen at least this many times
    #[clap(long = "min-count", default_value = "2", value_name = "UINT")]
    min_count: usize,

    // ************ //
    // *** ARGS *** //
    // ************ //
    /// Pipe-delimited log file, or STDIN if not specified
    #[clap(value_name = "PATH")]
    infile: Option<PathBuf>,
}

impl Opt {
    fn into_parts(self) -> (Option<PathBuf>, Options) {
        (
            self.infile,
            Options {
                min_count: self.min_count,
            },
        )
    }
}

fn main() -> io::Result<()> {
    let opt = Opt::parse();

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

    let (infile, options) = opt.into_parts();
    let stdout = io::BufWriter::new(io::stdout().lock());
    find::from_file(&options, infile.as_ref(), stdout)
}
