pub mod common;
pub use common::*;

use urlbuf::parse_authority;

// ------------------------------------------------------------------------------------------------
// API Tests
// ------------------------------------------------------------------------------------------------

fn check(s: &str, userinfo: &str, user: &str, password: &str) {
    println!("> check({:?})", s);
    let authority = parse_authority(s).unwrap();
    assert_eq!(authority.encoded_userinfo().as_str(), userinfo);
    assert_eq!(authority.user(), user);
    assert_eq!(authority.password(), password);
}

#[test]
fn test_userinfo_split() {
    check("x@h", "x", "x", "");
    check("x:@h", "x:", "x", "");
    check(":@h", ":", "", "");
    check("::@h", "::", "", ":");
    check(":x@h", ":x", "", "x");
    check("x:y@h", "x:y", "x", "y");
    check("xy:zz:@h", "xy:zz:", "xy", "zz:");
    check("%41%42:%43%44@h", "%41%42:%43%44", "AB", "CD");
}

#[test]
fn test_userinfo_grammar() {
    assert!(parse_authority("").is_ok());
    assert!(parse_authority("x").is_ok());
    assert!(parse_authority("x:").is_ok());
    assert!(parse_authority("x:y:z@h").is_ok());
    assert!(parse_authority("%41@h").is_ok());

    assert!(parse_authority("@@h").is_err());
    assert!(parse_authority("x y@h").is_err());
    assert!(parse_authority("%4@h").is_err());
}

#[test]
fn test_userinfo_decoded_equality() {
    let authority = parse_authority("%41%42:%43%44@h").unwrap();
    assert!(authority.encoded_user().decoded_eq("AB"));
    assert!(!authority.encoded_user().decoded_eq("ab"));
    assert_eq!(authority.encoded_user().decoded_len(), 2);
    assert_eq!(authority.encoded_password().decoded_len(), 2);
}
