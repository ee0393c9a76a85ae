mod color;
mod html;
mod marked;
mod render;

pub use color::{from_u24, to_gray, ColorMap, COLOR_SPACE};
pub use marked::{MarkedCalls, MARKED_COLOR};
pub use render::{grid_side, Rendering};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use num_format::Locale;

use crate::trace::Trace;

/// Configure how a trace is drawn.
#[derive(Debug, Clone)]
pub struct Options {
    /// Draw every call in a shade of gray instead of in color.
    ///
    /// Marked calls lose their fixed color in grayscale, as the fixed color would not stand out
    /// anyway.
    pub grayscale: bool,

    /// Seed for the generator that picks call colors.
    ///
    /// Drawing the same trace with the same seed always gives the same image.
    pub seed: u64,

    /// Calls that are always drawn in a fixed color.
    pub marked: MarkedCalls,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            grayscale: false,
            seed: 0,
            marked: MarkedCalls::default(),
        }
    }
}

/// The ways in which drawing a trace can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The trace did not contain a single `library_name!api_name` line.
    #[error("failed to find any API calls matching the library_name!api_name pattern")]
    NoCalls,

    /// A call of the trace had no color assigned.
    #[error("failed to find color for {0}")]
    MissingColor(String),

    /// The trace has more distinct calls than there are colors to give them.
    #[error("{unique} distinct calls do not fit in {available} colors")]
    TooManyCalls {
        /// Number of distinct calls in the trace.
        unique: usize,
        /// Number of colors available.
        available: usize,
    },

    /// An HTML image page was written for a rendering that was not asked to keep one.
    #[error("the rendering was created without an HTML image page")]
    PageNotRendered,

    /// Reading the trace or writing an output failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Writing an HTML output failed.
    #[error(transparent)]
    Html(#[from] quick_xml::Error),

    /// Encoding or writing the image failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Draws `trace` to a raster image at `image`, with a color legend next to it.
///
/// The legend is written to the same directory as the image, and named after it: drawing to
/// `out/calc.png` gives a legend at `out/legend_calc.png.html`. If `page` is given, the trace is
/// also written there as an HTML page with one block per call.
///
/// Nothing is written if the trace is empty.
pub fn from_trace(
    opt: &Options,
    trace: &Trace,
    image: &Path,
    page: Option<&Path>,
) -> Result<(), Error> {
    if trace.is_empty() {
        error!("Failed to find any API calls matching dll_name!api_name pattern");
        return Err(Error::NoCalls);
    }
    // add thousands separators to the call count
    let mut calls_txt = num_format::Buffer::default();
    calls_txt.write_formatted(&trace.len(), &Locale::en);
    info!("Found {} api calls in the file", calls_txt.as_str());

    let colors = ColorMap::assign(trace.unique_calls().iter().map(String::as_str), opt)?;
    info!("Adding {} colors on image", calls_txt.as_str());
    let rendering = Rendering::new(&colors, trace, opt.grayscale, page.is_some())?;

    rendering.save_image(image)?;

    let legend = legend_path(image);
    info!("Generating legend in {}", legend.display());
    write_to(&legend, |w| rendering.write_legend(w))?;

    if let Some(page) = page {
        info!("Generating HTML image in {}", page.display());
        let title = page
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        write_to(page, |w| rendering.write_page(w, &title))?;
    }

    Ok(())
}

/// Reads the trace in `trace` and draws it as described in [`from_trace`].
pub fn from_files<P1, P2, P3>(
    opt: &Options,
    trace: P1,
    image: P2,
    page: Option<P3>,
) -> Result<(), Error>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    P3: AsRef<Path>,
{
    let trace = Trace::from_file(trace)?;
    from_trace(
        opt,
        &trace,
        image.as_ref(),
        page.as_ref().map(|p| p.as_ref()),
    )
}

/// Where the legend for an image at `image` goes.
pub fn legend_path(image: &Path) -> PathBuf {
    let name = image
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    image.with_file_name(format!("legend_{}.html", name))
}

fn write_to<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), Error>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
