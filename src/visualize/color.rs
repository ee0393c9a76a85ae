use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::index::{self, IndexVec};
use rand::SeedableRng;
use rgb::RGB8;

use super::{Error, Options};

/// Number of colors random picks are drawn from.
///
/// This is every 24-bit color below `0xEEFFFF`, which keeps random picks away from white so
/// they don't vanish against the page background.
pub const COLOR_SPACE: usize = 0x00EE_FFFF;

/// The color assigned to every distinct call of a trace.
///
/// Entries are kept in the order the calls were first seen in the trace, which is also the
/// order they are listed in the legend.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColorMap(IndexMap<String, RGB8>);

impl ColorMap {
    /// Assigns a color to each of the given call names.
    ///
    /// Calls in [`Options::marked`] get their fixed color unless [`Options::grayscale`] is set.
    /// All other calls get a distinct random color, drawn from a generator seeded with
    /// [`Options::seed`] so that the same input always gets the same colors.
    pub fn assign<'a, I>(names: I, opt: &Options) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: ExactSizeIterator,
    {
        let names = names.into_iter();
        let count = names.len();

        debug!("Generating random color for each of {} calls", count);
        // one pick per name, marked or not, so the unmarked picks don't shift when the marked
        // list changes
        let picks = pick(opt.seed, count, COLOR_SPACE)?;

        let mut colors = IndexMap::with_capacity(count);
        for (name, pick) in names.zip(picks.iter()) {
            let color = match opt.marked.color_for(name) {
                Some(color) if !opt.grayscale => {
                    debug!("Picked marked color for {}", name);
                    color
                }
                _ => from_u24(pick as u32),
            };
            colors.insert(name.to_string(), color);
        }

        Ok(ColorMap(colors))
    }

    /// Returns the color assigned to `name`.
    pub fn get(&self, name: &str) -> Option<RGB8> {
        self.0.get(name).copied()
    }

    /// Number of calls with an assigned color.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no color has been assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Provides an iterator over the calls and their colors, in assignment order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, RGB8)> {
        self.0.iter().map(|(name, color)| (name.as_str(), *color))
    }

    pub(super) fn get_full(&self, name: &str) -> Option<(usize, RGB8)> {
        self.0.get_full(name).map(|(i, _, color)| (i, *color))
    }

    pub(super) fn get_index(&self, index: usize) -> Option<(&str, RGB8)> {
        self.0
            .get_index(index)
            .map(|(name, color)| (name.as_str(), *color))
    }
}

// Draws `count` distinct values below `available`.
fn pick(seed: u64, count: usize, available: usize) -> Result<IndexVec, Error> {
    if count > available {
        return Err(Error::TooManyCalls {
            unique: count,
            available,
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(index::sample(&mut rng, available, count))
}

/// Splits a `0xRRGGBB` value into its channels.
pub fn from_u24(value: u32) -> RGB8 {
    RGB8 {
        r: ((value & 0x00FF_0000) >> 16) as u8,
        g: ((value & 0x0000_FF00) >> 8) as u8,
        b: (value & 0x0000_00FF) as u8,
    }
}

/// Converts a color to gray by averaging its channels.
pub fn to_gray(color: RGB8) -> RGB8 {
    let sum = u16::from(color.r) + u16::from(color.g) + u16::from(color.b);
    let gray = (sum / 3) as u8;
    RGB8::new(gray, gray, gray)
}

// Six lowercase hex digits, as used in CSS class names and color values.
pub(super) fn hex(color: RGB8) -> String {
    format!("{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}
