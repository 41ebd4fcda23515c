use urlbuf::{Normalize, Url};
use std::str::FromStr;

pub fn parse_success(url: &str) {
    println!("> parse_success({:?})", url);
    let result = Url::from_str(url);
    match result {
        Ok(url_value) => assert_eq!(url_value.as_str(), url),
        Err(e) => panic!("{:?} failed to parse: {}", url, e),
    }
}

pub fn parse_failure(url: &str) {
    println!("> parse_failure({:?})", url);
    let result = Url::from_str(url);
    assert!(result.is_err(), "{:?} parsed unexpectedly", url);
}

pub fn parse_and_compare(url: &str, compare_to: &str) {
    println!("> parse_and_compare({:?} == {:?})", url, compare_to);
    let result = Url::from_str(url);
    assert!(result.is_ok());
    let url_value = result.unwrap();
    assert_eq!(url_value.to_string(), compare_to.to_string());
}

pub fn normalize_and_compare(url: &str, compare_to: &str) {
    println!("> normalize_and_compare({:?} == {:?})", url, compare_to);
    let result = Url::from_str(url);
    assert!(result.is_ok());
    let url_value = result.unwrap();
    let result = url_value.normalize();
    assert!(result.is_ok());
    let url_value = result.unwrap();
    assert_eq!(url_value.to_string(), compare_to.to_string());
}

pub fn resolve_and_compare(base: &str, reference: &str, compare_to: &str) {
    println!(
        "> resolve_and_compare({:?} + {:?} == {:?})",
        base, reference, compare_to
    );
    let base = Url::from_str(base).unwrap();
    let reference = Url::from_str(reference).unwrap();
    let result = base.resolve(&reference);
    assert!(result.is_ok());
    assert_eq!(result.unwrap().to_string(), compare_to.to_string());
}
