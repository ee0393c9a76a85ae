//! Both helpers work on pipe-delimited logs, where the second field of a line identifies it:
//!
//! ```text
//! 1234|kernel32.dll!GetProcAddress|0x7ff812340000
//! ```
//!
//! Lines without a `|`, and lines containing a `#` (comments and headers), carry no key. What
//! happens to those depends on the helper.

/// Keep only the first line for each key.
pub mod remove;

/// Count how often each key repeats.
pub mod find;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const READER_CAPACITY: usize = 128 * 1024;

// Opens `infile`, or STDIN if there is none.
fn open<P>(infile: Option<P>) -> io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    Ok(match infile {
        Some(path) => Box::new(BufReader::with_capacity(
            READER_CAPACITY,
            File::open(path)?,
        )),
        None => Box::new(BufReader::with_capacity(
            READER_CAPACITY,
            io::stdin().lock(),
        )),
    })
}

// Strips the line terminator read_line leaves behind.
fn chomp(line: &str) -> &str {
    line.trim_end_matches(&['\r', '\n'][..])
}

// The second `|`-separated field of `line`, if the line is keyed at all.
fn key(line: &str) -> Option<&str> {
    if line.contains('#') {
        return None;
    }
    let mut fields = line.split('|');
    fields.next()?;
    fields.next()
}
