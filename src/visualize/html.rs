use std::io::prelude::*;

use indexmap::IndexSet;
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use rgb::RGB8;

use super::color::{self, ColorMap};

const LEGEND_TITLE: &str = "Legend";

// swatch spacing, in pixels
const LEGEND_MARGIN: usize = 3;
const PAGE_MARGIN: usize = 1;

pub(super) fn write_legend<W>(writer: W, colors: &ColorMap) -> quick_xml::Result<()>
where
    W: Write,
{
    let mut html = Writer::new(writer);
    write_header(&mut html, LEGEND_TITLE, LEGEND_MARGIN, colors)?;
    for (name, color) in colors.iter() {
        html.write_event(Event::Text(BytesText::new(name)))?;
        write_swatch(&mut html, color, None)?;
        html.write_event(Event::Empty(BytesStart::new("br")))?;
        newline(&mut html)?;
    }
    write_footer(&mut html)
}

pub(super) fn write_page<'a, W, I>(
    writer: W,
    title: &str,
    colors: &ColorMap,
    blocks: I,
) -> quick_xml::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, RGB8)>,
{
    let mut html = Writer::new(writer);
    write_header(&mut html, title, PAGE_MARGIN, colors)?;
    for (name, color) in blocks {
        write_swatch(&mut html, color, Some(name))?;
        newline(&mut html)?;
    }
    write_footer(&mut html)
}

fn write_header<W>(
    html: &mut Writer<W>,
    title: &str,
    margin: usize,
    colors: &ColorMap,
) -> quick_xml::Result<()>
where
    W: Write,
{
    html.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    newline(html)?;
    html.write_event(Event::Start(BytesStart::new("html")))?;
    html.write_event(Event::Start(BytesStart::new("head")))?;
    newline(html)?;

    html.write_event(Event::Start(BytesStart::new("title")))?;
    html.write_event(Event::Text(BytesText::new(title)))?;
    html.write_event(Event::End(BytesEnd::new("title")))?;
    newline(html)?;

    html.write_event(Event::Start(BytesStart::new("style")))?;
    html.write_event(Event::Text(BytesText::from_escaped(stylesheet(margin, colors))))?;
    html.write_event(Event::End(BytesEnd::new("style")))?;
    newline(html)?;

    html.write_event(Event::End(BytesEnd::new("head")))?;
    html.write_event(Event::Start(BytesStart::new("body")))?;
    newline(html)
}

fn write_footer<W>(html: &mut Writer<W>) -> quick_xml::Result<()>
where
    W: Write,
{
    html.write_event(Event::End(BytesEnd::new("body")))?;
    html.write_event(Event::End(BytesEnd::new("html")))?;
    newline(html)
}

// A div is not a void element, so it must not be written as an empty tag.
fn write_swatch<W>(html: &mut Writer<W>, color: RGB8, title: Option<&str>) -> quick_xml::Result<()>
where
    W: Write,
{
    let class = format!("swatch name{}", color::hex(color));
    let mut div = BytesStart::new("div").with_attributes(std::iter::once(("class", &*class)));
    if let Some(title) = title {
        div.push_attribute(("title", title));
    }
    html.write_event(Event::Start(div))?;
    html.write_event(Event::End(BytesEnd::new("div")))
}

fn newline<W>(html: &mut Writer<W>) -> quick_xml::Result<()>
where
    W: Write,
{
    html.write_event(Event::Text(BytesText::from_escaped("\n")))
}

fn stylesheet(margin: usize, colors: &ColorMap) -> String {
    let mut css = format!(
        "\n.swatch {{ display: inline-block; width: 20px; height: 5px; margin: {}px; \
         border: 1px solid rgba(0, 0, 0, .2); }}\n",
        margin
    );

    // marked calls may share a color
    let distinct: IndexSet<RGB8> = colors.iter().map(|(_, color)| color).collect();
    for color in distinct {
        let hex = color::hex(color);
        css.push_str(&format!(".name{} {{ background: #{}; }}\n", hex, hex));
    }
    css
}
