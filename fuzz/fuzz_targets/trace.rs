#![no_main]

use apiviz::trace::Trace;
use apiviz::visualize::{ColorMap, Options, Rendering};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let trace = match Trace::from_reader(data) {
        Ok(trace) => trace,
        Err(_) => return,
    };
    assert!(trace.unique_calls().len() <= trace.len());

    let colors = ColorMap::assign(
        trace.unique_calls().iter().map(String::as_str),
        &Options::default(),
    )
    .unwrap();
    let rendering = Rendering::new(&colors, &trace, false, true).unwrap();
    let side = rendering.side() as usize;
    assert!(side * side >= trace.len());
    rendering.write_legend(std::io::sink()).unwrap();
    rendering.write_page(std::io::sink(), "fuzz").unwrap();
});
