use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use indexmap::IndexSet;

const READER_CAPACITY: usize = 128 * 1024;

// drltrace dumps arguments on their own indented lines, and return addresses as
// "and return to module id:N, offset:0x..." after them.
const ARG_MARKER: &str = "    arg";
const MODULE_ID_MARKER: &str = "module id";

/// An ordered log of the library calls made by a traced program.
///
/// Every call line of the input is kept, in order, in the call sequence. Call names are interned
/// into a set that preserves the order in which each name was first seen, so the sequence only
/// has to store indices into that set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trace {
    unique: IndexSet<String>,
    sequence: Vec<usize>,
}

impl Trace {
    /// Parses a trace from the lines given by `reader`.
    ///
    /// Each call line is expected to look like `library_name!api_call_name(arguments...)`,
    /// optionally prefixed with a thread marker such as `~~1234~~ `. The call name is whatever
    /// follows the first `!`, up to the first `(` or whitespace. Argument lines and return
    /// address lines are ignored, as is anything without a `!`.
    ///
    /// Note that an empty trace is not an error here; it is up to the caller to decide what to
    /// do with one.
    pub fn from_reader<R>(mut reader: R) -> io::Result<Self>
    where
        R: BufRead,
    {
        let mut trace = Trace::default();
        let mut line = String::new();
        loop {
            line.clear();

            if reader.read_line(&mut line)? == 0 {
                break;
            }

            match parse_line(&line) {
                Some(name) => trace.push(name),
                None => trace!("Skipping line: {}", line.trim_end()),
            }
        }

        Ok(trace)
    }

    /// Parses the trace stored in the file at `path`.
    ///
    /// See [`Trace::from_reader`] for the expected format.
    pub fn from_file<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let reader = io::BufReader::with_capacity(READER_CAPACITY, file);
        Trace::from_reader(reader)
    }

    /// Appends a call to the end of the trace.
    pub fn push(&mut self, name: &str) {
        let index = match self.unique.get_index_of(name) {
            Some(index) => index,
            None => self.unique.insert_full(name.to_string()).0,
        };
        self.sequence.push(index);
    }

    /// Number of calls in the trace.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the trace holds no calls at all.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The distinct call names of the trace, in order of first appearance.
    pub fn unique_calls(&self) -> &IndexSet<String> {
        &self.unique
    }

    /// Every call of the trace, in order.
    pub fn calls(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.sequence.iter().map(move |&i| self.unique[i].as_str())
    }
}

impl<'a> FromIterator<&'a str> for Trace {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trace = Trace::default();
        for name in iter {
            trace.push(name);
        }
        trace
    }
}

// Extract the call name from a single trace line, if it is a call line at all.
fn parse_line(line: &str) -> Option<&str> {
    if line.contains(ARG_MARKER) || line.contains(MODULE_ID_MARKER) {
        return None;
    }

    let line = match line.find('(') {
        Some(paren) => &line[..paren],
        None => line,
    };
    let bang = line.find('!')?;

    // grepable drltrace output puts arguments after the name as " {0: 0x...}"
    let name = line[bang + 1..].split(char::is_whitespace).next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
