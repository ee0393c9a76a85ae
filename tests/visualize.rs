#[macro_use]
extern crate pretty_assertions;

extern crate apiviz;

use std::fs;
use std::path::{Path, PathBuf};

use apiviz::trace::Trace;
use apiviz::visualize::{self, ColorMap, Error, MarkedCalls, Options, MARKED_COLOR};
use image::Rgb;
use log::Level;
use tempfile::TempDir;

const EXAMPLE: &str = "./tests/data/visualize/example.txt";
const CALC: &str = "./tests/data/visualize/calc.txt";
const NO_CALLS: &str = "./tests/data/visualize/no-calls.txt";
const MARKED: &str = "./tests/data/visualize/marked.txt";

fn visualize(opt: &Options, trace: &str, html: bool) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("trace.png");
    let page = dir.path().join("trace.html");
    visualize::from_files(opt, trace, &image, if html { Some(&page) } else { None }).unwrap();
    (dir, image)
}

#[test]
fn visualize_example() {
    let (dir, image) = visualize(&Options::default(), EXAMPLE, false);

    let image = image::open(image).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.get_pixel(0, 0), &Rgb([0xFF, 0x00, 0x00]));
    assert_ne!(image.get_pixel(1, 0), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(0, 1), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(1, 1), &Rgb([0, 0, 0]));

    let legend = fs::read_to_string(dir.path().join("legend_trace.png.html")).unwrap();
    assert!(legend.contains("GetProcAddress<div class=\"swatch nameff0000\"></div><br/>"));
    assert!(legend.contains("MessageBoxA<div class=\"swatch name"));

    assert!(!dir.path().join("trace.html").exists());
}

#[test]
fn visualize_calc_with_page() {
    let (dir, image) = visualize(&Options::default(), CALC, true);

    let image = image::open(image).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (4, 4));

    let page = fs::read_to_string(dir.path().join("trace.html")).unwrap();
    assert!(page.contains("<title>trace.html</title>"));
    assert_eq!(page.matches("<div ").count(), 10);
    assert_eq!(page.matches("title=\"GetProcAddress\"").count(), 2);
    assert_eq!(page.matches("title=\"RtlAllocateHeap\"").count(), 2);
    assert_eq!(
        page.matches("<div class=\"swatch nameff0000\" title=\"GetProcAddress\"></div>")
            .count(),
        2
    );

    let legend = fs::read_to_string(dir.path().join("legend_trace.png.html")).unwrap();
    assert_eq!(legend.matches("<div ").count(), 8);
}

#[test]
fn visualize_is_deterministic() {
    let (_first_dir, first) = visualize(&Options::default(), CALC, false);
    let (_second_dir, second) = visualize(&Options::default(), CALC, false);
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn visualize_grayscale() {
    let opt = Options {
        grayscale: true,
        ..Default::default()
    };
    let (_dir, image) = visualize(&opt, CALC, false);

    let image = image::open(image).unwrap().to_rgb8();
    for Rgb([r, g, b]) in image.pixels() {
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
    // marked calls are not highlighted in grayscale
    assert_ne!(image.get_pixel(1, 0), &Rgb([0xFF, 0x00, 0x00]));
}

#[test]
fn visualize_marked_from_file() {
    let opt = Options {
        marked: MarkedCalls::from_file(MARKED).unwrap(),
        ..Default::default()
    };
    let (_dir, image) = visualize(&opt, CALC, false);

    let image = image::open(image).unwrap().to_rgb8();
    // GetModuleHandleW, GetProcAddress, RtlAllocateHeap, GetProcAddress
    assert_ne!(image.get_pixel(0, 0), &Rgb([0xFF, 0x00, 0x00]));
    assert_eq!(image.get_pixel(1, 0), &Rgb([0xFF, 0x00, 0x00]));
    assert_eq!(image.get_pixel(2, 0), &Rgb([0x00, 0x00, 0xFF]));
    assert_eq!(image.get_pixel(3, 0), &Rgb([0xFF, 0x00, 0x00]));
}

#[test]
fn visualize_no_calls() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("trace.png");
    let page = dir.path().join("trace.html");

    let result = visualize::from_files(&Options::default(), NO_CALLS, &image, Some(&page));
    assert!(matches!(result, Err(Error::NoCalls)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn visualize_missing_trace() {
    let dir = tempfile::tempdir().unwrap();
    let result = visualize::from_files(
        &Options::default(),
        "./tests/data/visualize/does-not-exist.txt",
        dir.path().join("trace.png"),
        None::<&Path>,
    );
    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected a not found error, got {:?}", other),
    }
}

#[test]
fn visualize_logs() {
    testing_logger::setup();
    let _ = visualize(&Options::default(), CALC, false);
    testing_logger::validate(|captured_logs| {
        let found = captured_logs
            .iter()
            .filter(|log| log.body == "Found 10 api calls in the file" && log.level == Level::Info)
            .count();
        assert_eq!(found, 1);

        let picture = captured_logs
            .iter()
            .filter(|log| log.body == "Generating picture 4x4" && log.level == Level::Info)
            .count();
        assert_eq!(picture, 1);
    });
}

#[test]
fn every_call_has_a_color() {
    let trace = Trace::from_file(CALC).unwrap();
    assert_eq!(trace.len(), 10);
    assert_eq!(trace.unique_calls().len(), 8);

    let colors = ColorMap::assign(
        trace.unique_calls().iter().map(String::as_str),
        &Options::default(),
    )
    .unwrap();
    assert_eq!(colors.len(), trace.unique_calls().len());
    for call in trace.calls() {
        assert!(colors.get(call).is_some(), "{} has no color", call);
    }
    assert_eq!(colors.get("GetProcAddress"), Some(MARKED_COLOR));
}
