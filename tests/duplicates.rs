extern crate apiviz;

mod common;

use std::fs::File;
use std::io::{BufReader, Cursor};

use apiviz::duplicates::{find, remove};

const CALLS: &str = "./tests/data/duplicates/calls.log";

#[test]
fn remove_duplicates_calls() {
    let expected_file = "./tests/data/duplicates/results/calls-removed.log";
    let mut result = Cursor::new(Vec::new());
    remove::from_file(Some(CALLS), &mut result).unwrap();
    result.set_position(0);

    let expected = BufReader::new(File::open(expected_file).unwrap());
    common::compare_results(result, expected, expected_file);
}

#[test]
fn find_duplicates_calls() {
    let expected_file = "./tests/data/duplicates/results/calls-found.txt";
    let mut result = Cursor::new(Vec::new());
    find::from_file(&find::Options::default(), Some(CALLS), &mut result).unwrap();
    result.set_position(0);

    let expected = BufReader::new(File::open(expected_file).unwrap());
    common::compare_results(result, expected, expected_file);
}

#[test]
fn find_duplicates_min_count() {
    let mut result = Vec::new();
    let opt = find::Options { min_count: 4 };
    find::from_file(&opt, Some(CALLS), &mut result).unwrap();
    assert!(result.is_empty());
}

#[test]
fn duplicates_missing_file() {
    let missing = "./tests/data/duplicates/does-not-exist.log";
    let err = remove::from_file(Some(missing), std::io::sink()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    let err = find::from_file(&Default::default(), Some(missing), std::io::sink()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
