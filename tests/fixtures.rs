// Fixture tests: input/expected HTML pairs under test-fixtures/.
//
// Each fixture directory contains:
//   index.html:    HTML input
//   expected.html: expected serializer output
//   index.json:    optional options
//
// These tests run the full pipeline: HTML string → tree → HTML string.

mod common;

use pretty_assertions::assert_eq;

fn fixture_test(name: &str) {
    let f = common::load_fixture(name);
    let result = htmltree::format_with(&f.html, &f.options).unwrap();
    assert_eq!(result, f.expected, "fixture: {}", name);
}

#[test]
fn fixture_formatted_nested() { fixture_test("formatted-nested"); }

#[test]
fn fixture_compact_whitespace() { fixture_test("compact-whitespace"); }

#[test]
fn fixture_pre_literal() { fixture_test("pre-literal"); }

#[test]
fn fixture_void_and_comments() { fixture_test("void-and-comments"); }

#[test]
fn fixture_script_raw() { fixture_test("script-raw"); }

#[test]
fn fixture_document() { fixture_test("document"); }

#[test]
fn fixture_tab_width() { fixture_test("tab-width"); }

#[test]
fn fixture_lenient_repair() { fixture_test("lenient-repair"); }

#[test]
fn fixture_attribute_quoting() { fixture_test("attribute-quoting"); }

/// Formatting is stable once whitespace text has been normalized away.
#[test]
fn fixture_compact_output_reparses_identically() {
    for name in ["formatted-nested", "void-and-comments", "attribute-quoting"] {
        let f = common::load_fixture(name);
        let options = htmltree::Options::new().with_formatted(false);
        let once = htmltree::format_with(&f.html, &options).unwrap();
        let twice = htmltree::format_with(&once, &options).unwrap();
        assert_eq!(once, twice, "fixture: {}", name);
    }
}
