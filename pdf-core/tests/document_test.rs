use std::io::{self, Write};

use pdfscribe::{Document, DocumentOptions, Error, PdfReader};

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn add_page_rejects_bad_sizes() {
    let mut doc = Document::new();
    for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (10.0, f64::INFINITY)] {
        assert!(matches!(
            doc.add_page(w, h),
            Err(Error::InvalidPageSize { .. })
        ));
    }
    assert_eq!(doc.page_count(), 0);
}

#[test]
fn page_handles_can_be_reopened() {
    let mut doc = Document::new();
    let font = doc.find_font("Courier", "default").unwrap();
    doc.add_page(200.0, 200.0).unwrap();
    doc.add_page(300.0, 300.0).unwrap();

    let mut first = doc.page(0).unwrap();
    assert_eq!(first.width(), 200.0);
    first.set_text(&font, 10.0, 5.0, 5.0).unwrap().show("late").unwrap();
    assert!(matches!(doc.page(2), Err(Error::PageNotFound(2))));

    let bytes = doc.save().unwrap();
    assert!(contains_bytes(&bytes, b"(late) Tj"));
}

#[test]
fn operations_after_save_fail() {
    let mut doc = Document::new();
    let font = doc.find_font("Helvetica", "default").unwrap();
    doc.add_page(100.0, 100.0).unwrap();
    doc.save().unwrap();
    assert!(doc.is_saved());

    assert!(matches!(
        doc.add_page(100.0, 100.0),
        Err(Error::DocumentClosed { operation: "add_page" })
    ));
    assert!(matches!(
        doc.set_metadata("Title", "late"),
        Err(Error::DocumentClosed { .. })
    ));
    assert!(matches!(
        doc.find_font("Helvetica", "default"),
        Err(Error::DocumentClosed { .. })
    ));
    assert!(matches!(doc.page(0), Err(Error::DocumentClosed { .. })));
    assert!(matches!(doc.save(), Err(Error::DocumentClosed { operation: "save" })));
    // Font handles outlive the document but cannot reach it.
    assert_eq!(font.resource_name(), "F1");
}

#[test]
fn unknown_font_and_encoding() {
    let mut doc = Document::new();
    let err = doc.find_font("", "default").unwrap_err();
    assert!(matches!(err, Error::UnknownFont(ref name) if name.is_empty()));
    assert_eq!(err.exit_code(), 3);

    let err = doc.find_font("Helvetica", "latin9").unwrap_err();
    assert!(matches!(err, Error::UnknownEncoding { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(doc.object_count(), 0);
}

#[test]
fn find_font_is_interned() {
    let mut doc = Document::new();
    let a = doc.find_font("Times-Bold", "default").unwrap();
    let b = doc.find_font("Times-Bold", "winansi").unwrap();
    let c = doc.find_font("Times-Bold", "pdfdoc").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(doc.object_count(), 2);
}

#[test]
fn font_from_another_document_is_rejected() {
    let mut other = Document::new();
    other.find_font("Helvetica", "default").unwrap();
    let foreign = other.find_font("Courier", "default").unwrap();

    let mut doc = Document::new();
    doc.find_font("Helvetica", "default").unwrap();
    let mut page = doc.add_page(100.0, 100.0).unwrap();
    assert!(matches!(
        page.set_font(&foreign, 12.0),
        Err(Error::ForeignFont { resource: 2 })
    ));
}

#[test]
fn show_without_font_names_operation() {
    let mut doc = Document::new();
    let mut page = doc.add_page(100.0, 100.0).unwrap();
    let err = page.continue_text("orphan").unwrap_err();
    assert!(matches!(err, Error::NoActiveFont { operation: "continue_text" }));
    assert!(err.to_string().contains("continue_text"));
}

#[test]
fn text_not_representable_is_rejected() {
    let mut doc = Document::new();
    let font = doc.find_font("Helvetica", "builtin").unwrap();
    let mut page = doc.add_page(100.0, 100.0).unwrap();
    page.set_font(&font, 12.0).unwrap();
    let err = page.show("naïve").unwrap_err();
    assert!(matches!(err, Error::InvalidEncoding { ch: 'ï', .. }));
    assert!(err.to_string().contains("U+00EF"));
}

#[test]
fn metadata_last_write_wins() {
    let mut doc = Document::new();
    doc.set_metadata("Subject", "first").unwrap();
    doc.set_metadata("Subject", "second").unwrap();
    doc.set_metadata("Department", "Docs").unwrap();
    assert_eq!(doc.metadata("Subject"), Some("second"));
    assert!(matches!(
        doc.set_metadata("", "x"),
        Err(Error::InvalidParameter { .. })
    ));

    let bytes = doc.save().unwrap();
    assert!(contains_bytes(&bytes, b"/Subject (second)"));
    assert!(!contains_bytes(&bytes, b"(first)"));
    assert!(contains_bytes(&bytes, b"/Department (Docs)"));
}

#[test]
fn producer_option_and_override() {
    let mut doc = Document::with_options(DocumentOptions::default().with_producer("acme 2"));
    let bytes = doc.save().unwrap();
    assert!(contains_bytes(&bytes, b"/Producer (acme 2)"));

    let mut doc = Document::new();
    doc.set_metadata("Producer", "hand made").unwrap();
    let bytes = doc.save().unwrap();
    assert!(contains_bytes(&bytes, b"/Producer (hand made)"));
    assert!(!contains_bytes(&bytes, b"/Producer (pdfscribe"));
}

#[test]
fn save_to_writer_returns_writer() {
    let mut doc = Document::new();
    doc.add_page(100.0, 100.0).unwrap();
    let out = doc.save_to_writer(Vec::new()).unwrap();
    assert!(out.starts_with(b"%PDF-"));
}

#[test]
fn failed_write_closes_document() {
    #[derive(Debug)]
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let mut doc = Document::new();
    let err = doc.save_to_writer(Broken).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(doc.is_saved());
}

#[test]
fn save_to_path_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut doc = Document::new();
    doc.add_page(612.0, 792.0).unwrap();
    doc.save_to_path(&path).unwrap();

    let reader = PdfReader::open(&path).unwrap();
    assert_eq!(reader.page_count(), 1);
    assert!(reader.verify_offsets().is_empty());
}

#[test]
fn atomic_save_leaves_no_temporary_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atomic.pdf");

    let mut doc = Document::with_options(DocumentOptions::default().with_atomic_save(true));
    doc.add_page(100.0, 100.0).unwrap();
    doc.save_to_path(&path).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("atomic.pdf")]);
    assert_eq!(PdfReader::open(&path).unwrap().page_count(), 1);
}

#[test]
fn unopenable_path_keeps_document_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");

    let mut doc = Document::new();
    doc.add_page(100.0, 100.0).unwrap();
    let err = doc.save_to_path(&path).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(!doc.is_saved());

    let retry = dir.path().join("out.pdf");
    doc.save_to_path(&retry).unwrap();
    assert!(doc.is_saved());
}

#[test]
fn many_pages_in_order() {
    let mut doc = Document::new();
    let font = doc.find_font("Times-Roman", "default").unwrap();
    for i in 0..25 {
        doc.add_page(400.0, 600.0)
            .unwrap()
            .set_text(&font, 11.0, 72.0, 500.0)
            .unwrap()
            .show(&format!("page {}", i + 1))
            .unwrap();
    }
    let bytes = doc.save().unwrap();
    let reader = PdfReader::from_bytes(bytes.clone()).unwrap();
    assert_eq!(reader.page_count(), 25);

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    for (number, page_id) in pdf.get_pages() {
        let content = pdf.get_page_content(page_id).unwrap();
        let expected = format!("(page {}) Tj", number);
        assert!(contains_bytes(&content, expected.as_bytes()));
    }
}
