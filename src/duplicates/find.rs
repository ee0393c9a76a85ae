use std::io::{self, BufRead, Write};
use std::path::Path;

use ahash::AHashMap;

use super::{chomp, key};

/// Configure which repeated keys are reported.
#[derive(Debug, Clone)]
pub struct Options {
    /// Only report keys that occur at least this many times.
    ///
    /// Defaults to 2, that is, every key that occurs more than once.
    pub min_count: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { min_count: 2 }
    }
}

/// Count the keys of the lines in `reader` and write the repeated ones to `writer`.
///
/// Keys are written most frequent first, one per line, in the form `"<count>":"<key>", `. Ties
/// are broken by key, in descending order. Lines that carry no key are ignored.
pub fn from_reader<R, W>(opt: &Options, mut reader: R, mut writer: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut counts: AHashMap<String, usize> = AHashMap::new();
    let mut ignored = 0;
    let mut line = String::new();
    loop {
        line.clear();

        if reader.read_line(&mut line)? == 0 {
            break;
        }

        match key(chomp(&line)) {
            Some(key) => match counts.get_mut(key) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(key.to_string(), 1);
                }
            },
            None => ignored += 1,
        }
    }

    if ignored != 0 {
        debug!("Ignored {} lines without a key", ignored);
    }

    let mut repeated: Vec<(usize, &str)> = counts
        .iter()
        .filter(|&(_, &count)| count >= opt.min_count)
        .map(|(key, &count)| (count, key.as_str()))
        .collect();
    repeated.sort_unstable_by(|a, b| b.cmp(a));

    let mut count_buf = itoa::Buffer::new();
    for (count, key) in repeated {
        writer.write_all(b"\"")?;
        writer.write_all(count_buf.format(count).as_bytes())?;
        writer.write_all(b"\":\"")?;
        writer.write_all(key.as_bytes())?;
        writer.write_all(b"\", \n")?;
    }
    writer.flush()
}

/// Count repeated keys in a file (or in STDIN if `infile` is `None`).
///
/// See [`from_reader`] for the output format.
pub fn from_file<P, W>(opt: &Options, infile: Option<P>, writer: W) -> io::Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    from_reader(opt, super::open(infile)?, writer)
}
