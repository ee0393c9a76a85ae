use std::io;
use std::path::PathBuf;

use apiviz::duplicates::remove;
use clap::{ArgAction, Parser};
use env_logger::Env;

#[derive(Debug, Parser)]
#[clap(
    name = "apiviz-remove-duplicates",
    about,
    after_help = "\
[1] Lines are keyed by their second |-separated field, and only the first line for each key is
    printed. Lines without a | or with a # in them are always printed.
    "
)]
struct Opt {
    /// Silence all log output
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Verbose logging mode (-v, -vv, -vvv)
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    // ************ //
    // *** ARGS *** //
    // ************ //
    /// Pipe-delimited log file, or STDIN if not specified
    #[clap(value_name = "PATH")]
    infile: Option<PathBuf>,
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

    let stdout = io::BufWriter::new(io::stdout().lock());
    remove::from_file(opt.infile.as_ref(), stdout)
}
