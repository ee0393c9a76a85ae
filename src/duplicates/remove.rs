use std::io::{self, BufRead, Write};
use std::path::Path;

use ahash::AHashSet;

use super::{chomp, key};

/// Copy `reader` to `writer`, leaving out every line whose key has been seen before.
///
/// The first line for each key is the one that is kept. Lines that carry no key are always
/// copied, so headers and comments survive.
pub fn from_reader<R, W>(mut reader: R, mut writer: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut seen = AHashSet::new();
    let mut dropped = 0;
    let mut line = String::new();
    loop {
        line.clear();

        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let line = chomp(&line);
        if let Some(key) = key(line) {
            if seen.contains(key) {
                dropped += 1;
                continue;
            }
            seen.insert(key.to_string());
        }
        writeln!(writer, "{}", line)?;
    }

    debug!(
        "Kept {} distinct keys, dropped {} duplicate lines",
        seen.len(),
        dropped
    );
    writer.flush()
}

/// Remove duplicate lines from a file (or from STDIN if `infile` is `None`).
///
/// See [`from_reader`] for which lines are kept.
pub fn from_file<P, W>(infile: Option<P>, writer: W) -> io::Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    from_reader(super::open(infile)?, writer)
}
