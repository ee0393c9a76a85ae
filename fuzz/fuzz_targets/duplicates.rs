#![no_main]

use apiviz::duplicates::{find, remove};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    remove::from_reader(data, std::io::sink()).ok();
    find::from_reader(&find::Options::default(), data, std::io::sink()).ok();
});
