use serde::Deserialize;
use urlbuf::Url;
use std::str::FromStr;

#[derive(Clone, Debug, Deserialize)]
#[allow(dead_code)]
struct Test {
    id: String,
    name: String,

    #[serde(default)]
    ignored: bool,

    #[serde(default)]
    does_not_parse: bool,

    // parse cases
    url: Option<String>,
    expect_url: Option<String>,
    // resolution cases
    base: Option<String>,
    rel: Option<String>,
    expect_rel: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[allow(dead_code)]
struct Group {
    name: String,
    desc: String,
    test: Vec<Test>,
}

#[derive(Clone, Debug, Deserialize)]
#[allow(dead_code)]
struct Tests {
    desc: String,
    group: Vec<Group>,
}

#[derive(Clone, Debug, Deserialize)]
struct AllTests {
    tests: Tests,
}

const JSON_SRC: &str = include_str!("resolution_corpus.json");

#[test]
fn test_all_corpus_cases() {
    let tests: AllTests = serde_json::from_str(JSON_SRC).unwrap();
    let tests = tests.tests;

    println!("# Corpus");
    println!();
    println!("*{}*", tests.desc);
    println!();

    test_groups(&tests.group)
}

fn test_groups(groups: &[Group]) {
    for group in groups {
        println!("## Group: {}", group.name);
        println!();
        println!("*{}*", group.desc);
        println!();

        test_tests(&group.test)
    }
}

fn test_tests(tests: &[Test]) {
    for test in tests {
        if test.ignored {
            println!("### Test: {} ({}) is ignored", test.name, test.id);
            println!();
        } else {
            println!("### Test: {} ({})", test.name, test.id);
            println!();

            if test.url.is_some() {
                test_simple_parse(test);
            } else if let (Some(_), Some(_), Some(_)) = (&test.base, &test.rel, &test.expect_rel) {
                test_base_rel_parse(test);
            }
        }
    }
}

fn test_simple_parse(test: &Test) {
    let test_url = test.url.as_ref().unwrap();
    println!("    let url = {:?};", test_url);
    println!();
    if test.does_not_parse {
        assert!(
            Url::from_str(test_url).is_err(),
            "{}: {:?} parsed unexpectedly",
            test.id,
            test_url
        );
    } else {
        let actual = Url::from_str(test_url).unwrap();
        let expected = test.expect_url.as_ref().unwrap();
        assert_eq!(&actual.to_string(), expected, "{}", test.id);
    }
}

fn test_base_rel_parse(test: &Test) {
    let base_url = test.base.as_ref().unwrap();
    let rel_url = test.rel.as_ref().unwrap();
    println!("    let base = {:?};", base_url);
    println!("    let rel = {:?};", rel_url);
    println!();
    let base = Url::from_str(base_url).unwrap();
    let rel = Url::from_str(rel_url).unwrap();
    let actual = base.resolve(&rel).unwrap();
    let expected = test.expect_rel.as_ref().unwrap();
    assert_eq!(&actual.to_string(), expected, "{}", test.id);
}
