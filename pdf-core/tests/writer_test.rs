use pdfscribe::objects::{ObjId, ObjectStore, PdfObject};
use pdfscribe::writer::PdfWriter;

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

/// Catalog, pages tree and one empty page, filled the way the document
/// builder does it: the pages tree is reserved first.
fn small_store() -> (ObjectStore, ObjId) {
    let mut store = ObjectStore::new();
    let pages = store.reserve();
    let content = store.allocate(PdfObject::stream(vec![], b"BT ET".to_vec()));
    let page = store.allocate(PdfObject::dict(vec![
        ("Type", PdfObject::name("Page")),
        ("Parent", PdfObject::Reference(pages)),
        ("Contents", PdfObject::Reference(content)),
    ]));
    store
        .set(
            pages,
            PdfObject::dict(vec![
                ("Type", PdfObject::name("Pages")),
                ("Kids", PdfObject::array(vec![PdfObject::Reference(page)])),
                ("Count", PdfObject::Integer(1)),
            ]),
        )
        .unwrap();
    let catalog = store.allocate(PdfObject::dict(vec![
        ("Type", PdfObject::name("Catalog")),
        ("Pages", PdfObject::Reference(pages)),
    ]));
    (store, catalog)
}

fn write(store: &ObjectStore, root: ObjId) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_document(store, root, None).unwrap();
    buf
}

#[test]
fn write_dictionary() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    let obj = PdfObject::dict(vec![
        ("Type", PdfObject::name("Catalog")),
        ("Pages", PdfObject::reference(2, 0)),
    ]);
    w.write_object(ObjId(1, 0), &obj).unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert_eq!(output, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");
}

#[test]
fn write_array() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    let obj = PdfObject::array(vec![PdfObject::reference(3, 0), PdfObject::name("Fit")]);
    w.write_object(ObjId(1, 0), &obj).unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("[3 0 R /Fit]"));
}

#[test]
fn write_stream() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    let data = b"BT /F1 12 Tf ET".to_vec();
    let obj = PdfObject::stream(vec![("Filter", PdfObject::name("FlateDecode"))], data);
    w.write_object(ObjId(4, 0), &obj).unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("<< /Filter /FlateDecode /Length 15 >>\nstream\n"));
    assert!(output.contains("BT /F1 12 Tf ET\nendstream"));
}

#[test]
fn write_literal_string_escaped() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    let obj = PdfObject::literal_string("a(b)c\\d");
    w.write_object(ObjId(1, 0), &obj).unwrap();
    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("(a\\(b\\)c\\\\d)"));
}

#[test]
fn objects_written_in_id_order() {
    let (store, root) = small_store();
    let buf = write(&store, root);
    let positions: Vec<usize> = (1..=4)
        .map(|n| find_bytes(&buf, format!("\n{} 0 obj\n", n).as_bytes()).unwrap())
        .collect();
    assert!(positions.windows(2).all(|p| p[0] < p[1]));
}

#[test]
fn xref_offsets_point_at_objects() {
    let (store, root) = small_store();
    let buf = write(&store, root);

    let xref_pos = find_bytes(&buf, b"xref\n0 5\n").unwrap();
    let entries = &buf[xref_pos + b"xref\n0 5\n".len()..];
    assert_eq!(&entries[..20], b"0000000000 65535 f\r\n");
    for n in 1..=4usize {
        let entry = &entries[n * 20..(n + 1) * 20];
        assert_eq!(&entry[18..], b"\r\n");
        assert_eq!(&entry[10..18], b" 00000 n");
        let offset: usize = std::str::from_utf8(&entry[..10]).unwrap().parse().unwrap();
        let header = format!("{} 0 obj", n);
        assert!(buf[offset..].starts_with(header.as_bytes()), "object {}", n);
    }
}

#[test]
fn startxref_points_at_xref_keyword() {
    let (store, root) = small_store();
    let buf = write(&store, root);
    let sx = find_bytes(&buf, b"startxref\n").unwrap();
    let tail = std::str::from_utf8(&buf[sx + b"startxref\n".len()..]).unwrap();
    let offset: usize = tail.lines().next().unwrap().parse().unwrap();
    assert!(buf[offset..].starts_with(b"xref\n"));
    assert!(buf.ends_with(b"%%EOF\n"));
}

#[test]
fn trailer_has_required_keys() {
    let mut store = ObjectStore::new();
    let cat = store.allocate(PdfObject::dict(vec![("Type", PdfObject::name("Catalog"))]));
    let info = store.allocate(PdfObject::dict(vec![(
        "Creator",
        PdfObject::literal_string("test"),
    )]));
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_document(&store, cat, Some(info)).unwrap();

    let output = String::from_utf8_lossy(&buf);
    assert!(output.contains("trailer\n<< /Size 3 /Root 1 0 R /Info 2 0 R >>\n"));
}

#[test]
fn current_offset_tracks_bytes() {
    let mut buf = Vec::new();
    let mut w = PdfWriter::new(&mut buf);
    w.write_header().unwrap();
    assert_eq!(w.current_offset(), 15);
    w.write_object(ObjId(1, 0), &PdfObject::Null).unwrap();
    let written = w.current_offset();
    let inner = w.into_inner().unwrap();
    assert_eq!(written, inner.len());
}
