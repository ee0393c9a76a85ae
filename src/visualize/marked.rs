use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use rgb::RGB8;

/// The color given to marked calls that don't ask for one in particular.
pub const MARKED_COLOR: RGB8 = RGB8 {
    r: 0xFF,
    g: 0x00,
    b: 0x00,
};

/// Calls that always get drawn in a fixed color, so they stand out from the randomly colored
/// rest of the trace.
///
/// The default list marks `GetProcAddress` in red.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedCalls(HashMap<String, RGB8, ahash::RandomState>);

impl Default for MarkedCalls {
    fn default() -> Self {
        let mut marked = MarkedCalls::empty();
        marked.insert("GetProcAddress", MARKED_COLOR);
        marked
    }
}

impl MarkedCalls {
    /// A list that marks nothing.
    pub fn empty() -> Self {
        MarkedCalls(HashMap::default())
    }

    /// Marks `name` with `color`, returning the color it was previously marked with, if any.
    pub fn insert(&mut self, name: &str, color: RGB8) -> Option<RGB8> {
        self.0.insert(name.to_string(), color)
    }

    /// Returns the fixed color for `name`, if it is marked.
    pub fn color_for(&self, name: &str) -> Option<RGB8> {
        self.0.get(name).copied()
    }

    /// Number of marked calls.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no call is marked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Provides an iterator over the marked calls and their colors.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RGB8)> {
        self.0.iter().map(|(name, color)| (name.as_str(), *color))
    }

    /// Builds a list of marked calls from the lines given by the reader.
    ///
    /// Each line holds one call name, optionally followed by the color to use for it:
    ///
    /// ```text
    /// GetProcAddress
    /// LoadLibraryA->rgb(0, 0, 255)
    /// ```
    ///
    /// Names without a color are drawn in [`MARKED_COLOR`]. Empty lines and lines starting with
    /// `#` are ignored. The result only contains what the reader provides; the default
    /// `GetProcAddress` entry is not added implicitly.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut marked = MarkedCalls::empty();
        let mut line = String::new();
        loop {
            line.clear();

            if reader.read_line(&mut line)? == 0 {
                break;
            }

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, color) = parse_line(line)?;
            if marked.insert(name, color).is_some() {
                warn!("{} is marked more than once; using the last color", name);
            }
        }

        Ok(marked)
    }

    /// Loads a list of marked calls from a file.
    ///
    /// See [`MarkedCalls::from_reader`] for the format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = BufReader::new(File::open(path)?);
        MarkedCalls::from_reader(file)
    }
}

fn parse_line(line: &str) -> io::Result<(&str, RGB8)> {
    let mut words = line.split("->");

    // split always yields at least one item
    let name = words.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(invalid(line));
    }

    let color = match words.next() {
        Some(color) => parse_rgb_string(color).ok_or_else(|| invalid(line))?,
        None => MARKED_COLOR,
    };

    if words.next().is_some() {
        return Err(invalid(line));
    }

    Ok((name, color))
}

fn parse_rgb_string(s: &str) -> Option<RGB8> {
    let s = s.trim();
    let s = s.strip_prefix("rgb(")?.strip_suffix(')')?;

    let mut components = s.split(',').map(|c| u8::from_str(c.trim()));
    let r = components.next()?.ok()?;
    let g = components.next()?.ok()?;
    let b = components.next()?.ok()?;
    if components.next().is_some() {
        return None;
    }

    Some(RGB8 { r, g, b })
}

fn invalid(line: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid marked call entry: {}", line),
    )
}
