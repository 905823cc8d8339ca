//! Parsing contract tests: mandatory elements, tolerance for everything
//! optional, and input decoding.

use fikcio::{Catalog, Error, FictionBook};

fn parse(raw: &str) -> Result<FictionBook, Error> {
    FictionBook::parse(raw, Catalog::builtin())
}

fn assert_element_not_found(result: Result<FictionBook, Error>, expected: &str) {
    match result {
        Err(Error::ElementNotFound(name)) => assert_eq!(name, expected),
        Err(other) => panic!("expected ElementNotFound({expected}), got {other:?}"),
        Ok(_) => panic!("expected ElementNotFound({expected}), got success"),
    }
}

// ============================================================================
// Mandatory elements
// ============================================================================

#[test]
fn missing_root_element() {
    assert_element_not_found(parse("<book><body/></book>"), "FictionBook");
}

#[test]
fn missing_description() {
    assert_element_not_found(
        parse("<FictionBook><body><section/></body></FictionBook>"),
        "description",
    );
}

#[test]
fn missing_body() {
    assert_element_not_found(
        parse("<FictionBook><description><title-info/></description></FictionBook>"),
        "body",
    );
}

#[test]
fn missing_title_info() {
    assert_element_not_found(
        parse("<FictionBook><description/><body/></FictionBook>"),
        "title-info",
    );
}

#[test]
fn table_without_rows_fails_on_render() {
    let book = parse(
        "<FictionBook>\
           <description><title-info/></description>\
           <body><section><table><unknown/></table></section></body>\
         </FictionBook>",
    )
    .unwrap();

    match book.to_text() {
        Err(Error::ElementNotFound(name)) => assert_eq!(name, "tr"),
        other => panic!("expected ElementNotFound(tr), got {other:?}"),
    }
    match book.to_structure() {
        Err(Error::ElementNotFound(name)) => assert_eq!(name, "tr"),
        other => panic!("expected ElementNotFound(tr), got {other:?}"),
    }
}

// ============================================================================
// Tolerance
// ============================================================================

#[test]
fn minimal_document_parses() {
    let book = parse(
        "<FictionBook><description><title-info/></description><body/></FictionBook>",
    )
    .unwrap();
    assert_eq!(book.title(), None);
}

#[test]
fn unrecognized_elements_are_skipped() {
    let book = parse(
        "<FictionBook>\
           <stylesheet>ignored</stylesheet>\
           <description><title-info><book-title>T</book-title></title-info></description>\
           <body><section><p>kept</p><image l:href=\"#pic\"/></section></body>\
           <binary id=\"pic\">AAAA</binary>\
         </FictionBook>",
    )
    .unwrap();

    let text = book.to_text().unwrap();
    assert!(text.contains("kept"));
    assert!(!text.contains("ignored"));
    assert!(!text.contains("AAAA"));
}

#[test]
fn namespaced_root_parses() {
    let book = parse(
        "<FictionBook xmlns=\"http://www.gribuser.ru/xml/fictionbook/2.0\" \
                      xmlns:l=\"http://www.w3.org/1999/xlink\">\
           <description><title-info><book-title>T</book-title></title-info></description>\
           <body><section><p>x</p></section></body>\
         </FictionBook>",
    )
    .unwrap();
    assert_eq!(book.title(), Some("T"));
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn windows_1251_input_decodes() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"<?xml version=\"1.0\" encoding=\"windows-1251\"?>");
    bytes.extend_from_slice(b"<FictionBook><description><title-info><book-title>");
    // "Тест" in windows-1251
    bytes.extend_from_slice(&[0xD2, 0xE5, 0xF1, 0xF2]);
    bytes.extend_from_slice(
        b"</book-title></title-info></description><body><section><p>x</p></section></body></FictionBook>",
    );

    let book = FictionBook::from_bytes(&bytes, Catalog::builtin()).unwrap();
    assert_eq!(book.title(), Some("Тест"));
}

#[test]
fn utf8_with_bom_decodes() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        "<FictionBook><description><title-info><book-title>Тест</book-title></title-info>\
         </description><body/></FictionBook>"
            .as_bytes(),
    );
    let book = FictionBook::from_bytes(&bytes, Catalog::builtin()).unwrap();
    assert_eq!(book.title(), Some("Тест"));
}
