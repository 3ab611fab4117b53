use chrono::{FixedOffset, TimeZone};
use lopdf::content::Content;
use lopdf::Object;
use pdfscribe::{Document, DocumentOptions};

/// Helper: find a byte pattern in a buffer.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

/// Helper: check that a byte pattern exists in the buffer.
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle).is_some()
}

fn fixed_date() -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2021, 6, 1, 12, 30, 0)
        .unwrap()
}

/// The classic hello-world document: one A4 page, Helvetica-Bold 18,
/// two lines of text and the usual Info entries.
fn hello_document(options: DocumentOptions) -> Vec<u8> {
    let mut doc = Document::with_options(options.with_creation_date(fixed_date()));
    doc.set_metadata("Creator", "hello.rs").unwrap();
    doc.set_metadata("Author", "Thomas Merz").unwrap();
    doc.set_metadata("Title", "Hello, world (Rust)!").unwrap();

    let font = doc.find_font("Helvetica-Bold", "default").unwrap();
    doc.add_page(595.0, 842.0)
        .unwrap()
        .set_text(&font, 18.0, 50.0, 700.0)
        .unwrap()
        .show("Hello world!")
        .unwrap()
        .continue_text("(says Rust)")
        .unwrap();
    doc.save().unwrap()
}

fn number(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => f64::from(*r),
        other => panic!("expected number, got {:?}", other),
    }
}

fn string(obj: &Object) -> Vec<u8> {
    match obj {
        Object::String(bytes, _) => bytes.clone(),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn hello_world_structure() {
    let bytes = hello_document(DocumentOptions::default());

    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));

    assert!(contains_bytes(&bytes, b"/Type /Catalog"));
    assert!(contains_bytes(&bytes, b"/Type /Pages"));
    assert!(contains_bytes(&bytes, b"/MediaBox [0 0 595 842]"));
    assert!(contains_bytes(
        &bytes,
        b"/Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"
    ));

    assert!(contains_bytes(&bytes, b"/F1 18 Tf"));
    assert!(contains_bytes(&bytes, b"1 0 0 1 50 700 Tm"));
    assert!(contains_bytes(&bytes, b"(Hello world!) Tj"));
    assert!(contains_bytes(&bytes, b"(\\(says Rust\\)) '"));

    assert!(contains_bytes(&bytes, b"/Author (Thomas Merz)"));
    assert!(contains_bytes(&bytes, b"/CreationDate (D:20210601123000+01'00')"));
    assert!(contains_bytes(&bytes, b"/Fit]"));
}

#[test]
fn hello_world_round_trips_through_lopdf() {
    let bytes = hello_document(DocumentOptions::default());
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();

    let pages = pdf.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.get(&1).unwrap();

    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_dictionary(info_id).unwrap();
    assert_eq!(string(info.get(b"Author").unwrap()), b"Thomas Merz");
    assert_eq!(string(info.get(b"Creator").unwrap()), b"hello.rs");

    let content = Content::decode(&pdf.get_page_content(page_id).unwrap()).unwrap();
    let ops: Vec<&str> = content
        .operations
        .iter()
        .map(|op| op.operator.as_str())
        .collect();
    assert_eq!(ops, vec!["BT", "Tf", "TL", "Tm", "Tj", "'", "ET"]);

    assert_eq!(number(&content.operations[1].operands[1]), 18.0);
    // The second line sits one leading (18) below the first.
    assert_eq!(number(&content.operations[2].operands[0]), 18.0);
    let tm = &content.operations[3].operands;
    assert_eq!(number(&tm[4]), 50.0);
    assert_eq!(number(&tm[5]), 700.0);
    assert_eq!(string(&content.operations[4].operands[0]), b"Hello world!");
    assert_eq!(string(&content.operations[5].operands[0]), b"(says Rust)");
}

#[test]
fn compressed_content_decodes_to_same_operators() {
    let plain = hello_document(DocumentOptions::default());
    let packed = hello_document(DocumentOptions::default().with_compression(true));
    assert!(contains_bytes(&packed, b"/Filter /FlateDecode"));
    assert!(!contains_bytes(&packed, b"(Hello world!) Tj"));

    let decode = |bytes: &[u8]| {
        let pdf = lopdf::Document::load_mem(bytes).unwrap();
        let page_id = *pdf.get_pages().get(&1).unwrap();
        pdf.get_page_content(page_id).unwrap()
    };
    assert_eq!(decode(&plain), decode(&packed));
}

#[test]
fn output_is_deterministic_with_fixed_date() {
    let a = hello_document(DocumentOptions::default());
    let b = hello_document(DocumentOptions::default());
    assert_eq!(a, b);
}

#[test]
fn empty_document_gets_placeholder_page() {
    let mut doc = Document::new();
    let bytes = doc.save().unwrap();
    assert!(contains_bytes(&bytes, b"/Count 1"));
    assert!(contains_bytes(&bytes, b"/MediaBox [0 0 100 100]"));
    assert!(contains_bytes(&bytes, b"/Length 0"));

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[test]
fn non_latin_metadata_written_as_utf16() {
    let mut doc = Document::new();
    doc.set_metadata("Title", "Привет").unwrap();
    doc.add_page(200.0, 200.0).unwrap();
    let bytes = doc.save().unwrap();
    assert!(contains_bytes(&bytes, b"/Title <FEFF041F04400438043204350442>"));

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let title = string(pdf.get_dictionary(info_id).unwrap().get(b"Title").unwrap());
    assert_eq!(&title[..2], &[0xFE, 0xFF]);
}

#[test]
fn pages_list_only_their_own_fonts() {
    let mut doc = Document::new();
    let helv = doc.find_font("Helvetica", "default").unwrap();
    let times = doc.find_font("Times-Roman", "default").unwrap();
    doc.add_page(300.0, 300.0)
        .unwrap()
        .set_text(&helv, 12.0, 10.0, 10.0)
        .unwrap()
        .show("one")
        .unwrap();
    doc.add_page(300.0, 300.0)
        .unwrap()
        .set_text(&times, 12.0, 10.0, 10.0)
        .unwrap()
        .show("two")
        .unwrap();
    let bytes = doc.save().unwrap();

    let first = find_bytes(&bytes, b"/Font << /F1 1 0 R >>").unwrap();
    let second = find_bytes(&bytes, b"/Font << /F2 2 0 R >>").unwrap();
    assert!(first < second);
    assert!(!contains_bytes(&bytes, b"/F1 1 0 R /F2"));
}

#[test]
fn text_matrix_round_trips_through_lopdf() {
    let mut doc = Document::new();
    let font = doc.find_font("Times-Roman", "default").unwrap();
    doc.add_page(612.0, 792.0)
        .unwrap()
        .set_font(&font, 24.0)
        .unwrap()
        .set_text_matrix([0.0, 1.0, -1.0, 0.0, 100.0, 200.0])
        .unwrap()
        .show("Sideways")
        .unwrap();
    let bytes = doc.save().unwrap();

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = *pdf.get_pages().get(&1).unwrap();
    let content = Content::decode(&pdf.get_page_content(page_id).unwrap()).unwrap();
    let tm = content
        .operations
        .iter()
        .find(|op| op.operator == "Tm")
        .unwrap();
    let operands: Vec<f64> = tm.operands.iter().map(number).collect();
    assert_eq!(operands, vec![0.0, 1.0, -1.0, 0.0, 100.0, 200.0]);
}
