use std::io::Write;
use std::path::Path;

use image::{Rgb, RgbImage};
use rgb::RGB8;

use super::color::{self, ColorMap};
use super::{html, Error};
use crate::trace::Trace;

/// Everything drawn from a single trace: one pixel per call, plus what the HTML outputs need.
///
/// A `Rendering` borrows the [`ColorMap`] it was drawn with, since both the legend and the HTML
/// image page are described in terms of it.
#[derive(Debug)]
pub struct Rendering<'a> {
    colors: &'a ColorMap,
    pixels: Vec<RGB8>,
    // index into `colors` for each call, kept only if an HTML image page was asked for
    page: Option<Vec<usize>>,
}

impl<'a> Rendering<'a> {
    /// Draws one pixel for every call in `trace`, in order.
    ///
    /// With `grayscale` set, every pixel is reduced to the average of its color's channels. With
    /// `with_page` set, the calls are also remembered so that [`Rendering::write_page`] can lay
    /// them out as HTML later on.
    ///
    /// Fails with [`Error::MissingColor`] if `colors` has no entry for one of the calls.
    pub fn new(
        colors: &'a ColorMap,
        trace: &Trace,
        grayscale: bool,
        with_page: bool,
    ) -> Result<Self, Error> {
        let mut pixels = Vec::with_capacity(trace.len());
        let mut page = if with_page {
            Some(Vec::with_capacity(trace.len()))
        } else {
            None
        };

        for name in trace.calls() {
            let (index, color) = match colors.get_full(name) {
                Some(entry) => entry,
                None => {
                    error!("Failed to find color for {}", name);
                    return Err(Error::MissingColor(name.to_string()));
                }
            };

            if let Some(ref mut page) = page {
                page.push(index);
            }

            pixels.push(if grayscale {
                color::to_gray(color)
            } else {
                color
            });
        }

        Ok(Rendering {
            colors,
            pixels,
            page,
        })
    }

    /// The colors this rendering was drawn with.
    pub fn colors(&self) -> &'a ColorMap {
        self.colors
    }

    /// The drawn pixels, one per call of the trace.
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Width and height of the image, in pixels.
    pub fn side(&self) -> u32 {
        grid_side(self.pixels.len())
    }

    /// Lays the pixels out row by row on a square canvas.
    ///
    /// Whatever is left over after the last pixel stays black.
    pub fn to_image(&self) -> RgbImage {
        let side = self.side();
        let mut image = RgbImage::new(side, side);
        for (cell, dot) in image.pixels_mut().zip(&self.pixels) {
            *cell = Rgb([dot.r, dot.g, dot.b]);
        }
        image
    }

    /// Writes the image to `path`, in the format implied by its extension.
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let side = self.side();
        info!("Generating picture {}x{}", side, side);
        self.to_image().save(path)?;
        Ok(())
    }

    /// Writes an HTML legend listing every call next to its color.
    pub fn write_legend<W: Write>(&self, writer: W) -> Result<(), Error> {
        html::write_legend(writer, self.colors)?;
        Ok(())
    }

    /// Writes the calls as a page of small HTML blocks, each showing its call name on hover.
    ///
    /// Fails with [`Error::PageNotRendered`] unless the rendering was created `with_page`.
    pub fn write_page<W: Write>(&self, writer: W, title: &str) -> Result<(), Error> {
        let page = self.page.as_ref().ok_or(Error::PageNotRendered)?;
        let colors = self.colors;
        let blocks = page.iter().filter_map(|&i| colors.get_index(i));
        html::write_page(writer, title, colors, blocks)?;
        Ok(())
    }
}

/// Width (and height) of the square image needed for `n` pixels.
///
/// This is always one more than the integer square root of `n`, so a perfect square still gets
/// an extra row and column.
pub fn grid_side(n: usize) -> u32 {
    let mut root = (n as f64).sqrt() as usize;
    // correct for float rounding on very large inputs
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    (root + 1) as u32
}
