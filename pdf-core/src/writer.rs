use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{debug, warn};

use crate::objects::{ObjId, ObjectStore, PdfObject};

/// Version written in the `%PDF-` header.
pub const PDF_VERSION: &str = "1.7";

/// Low-level PDF binary writer. Serializes PDF objects to any
/// `Write` target while tracking byte offsets for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref_entries: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref_entries: Vec::new(),
        }
    }

    /// Write raw bytes, tracking the byte offset.
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write the header line and binary comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary comment: 4 bytes >= 128 for binary detection.
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")?;
        Ok(())
    }

    /// Write an indirect object, recording its byte offset for xref.
    pub fn write_object(
        &mut self,
        id: ObjId,
        obj: &PdfObject,
    ) -> io::Result<()> {
        self.xref_entries.push((id.0, self.offset));
        self.write_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.write_pdf_object(obj)?;
        self.write_str("\nendobj\n")?;
        Ok(())
    }

    /// Write header, every object of `store` in ascending id order,
    /// then the xref table and trailer.
    pub fn write_document(
        &mut self,
        store: &ObjectStore,
        root_id: ObjId,
        info_id: Option<ObjId>,
    ) -> io::Result<()> {
        self.write_header()?;
        for (id, obj) in store.iter() {
            match obj {
                Some(obj) => self.write_object(id, obj)?,
                None => {
                    warn!("object {} allocated but never filled; writing null", id.0);
                    self.write_object(id, &PdfObject::Null)?;
                }
            }
        }
        self.write_xref_and_trailer(root_id, info_id)?;
        debug!(
            "wrote {} objects, {} bytes",
            store.len(),
            self.offset
        );
        Ok(())
    }

    /// Serialize a PdfObject to its PDF text representation.
    fn write_pdf_object(
        &mut self,
        obj: &PdfObject,
    ) -> io::Result<()> {
        match obj {
            PdfObject::Null => self.write_str("null"),
            PdfObject::Boolean(b) => {
                self.write_str(if *b { "true" } else { "false" })
            }
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_number(*f)),
            PdfObject::Name(name) => self.write_str(&escape_pdf_name(name)),
            PdfObject::LiteralString(s) => {
                self.write_str("(")?;
                self.write_bytes(&escape_pdf_string(s))?;
                self.write_str(")")
            }
            PdfObject::HexString(bytes) => {
                self.write_str("<")?;
                for b in bytes {
                    self.write_str(&format!("{:02X}", b))?;
                }
                self.write_str(">")
            }
            PdfObject::Array(items) => {
                self.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write_str(" ")?;
                    }
                    self.write_pdf_object(item)?;
                }
                self.write_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.write_str("<<")?;
                self.write_dict_entries(entries)?;
                self.write_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.write_str("<<")?;
                self.write_dict_entries(dict)?;
                self.write_str(" /Length ")?;
                self.write_str(&data.len().to_string())?;
                self.write_str(" >>\nstream\n")?;
                self.write_bytes(data)?;
                self.write_str("\nendstream")
            }
            PdfObject::Reference(id) => self.write_str(&id.to_string()),
        }
    }

    fn write_dict_entries(
        &mut self,
        entries: &[(String, PdfObject)],
    ) -> io::Result<()> {
        for (key, val) in entries {
            self.write_str(" ")?;
            self.write_str(&escape_pdf_name(key))?;
            self.write_str(" ")?;
            self.write_pdf_object(val)?;
        }
        Ok(())
    }

    /// Current byte offset in the output.
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Write xref table, trailer, startxref, and %%EOF.
    pub fn write_xref_and_trailer(
        &mut self,
        root_id: ObjId,
        info_id: Option<ObjId>,
    ) -> io::Result<()> {
        let xref_offset = self.offset;

        self.xref_entries.sort_by_key(|&(num, _)| num);

        let max_obj = self
            .xref_entries
            .last()
            .map(|&(num, _)| num)
            .unwrap_or(0);
        let size = max_obj + 1;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", size))?;

        // Object 0: free entry head (exactly 20 bytes).
        self.write_bytes(b"0000000000 65535 f\r\n")?;

        let mut entries = std::mem::take(&mut self.xref_entries).into_iter().peekable();
        for obj_num in 1..size {
            match entries.next_if(|&(num, _)| num == obj_num) {
                Some((_, off)) => {
                    let entry = format!("{:010} {:05} n\r\n", off, 0);
                    self.write_bytes(entry.as_bytes())?;
                }
                // Free entry for gaps.
                None => self.write_bytes(b"0000000000 00000 f\r\n")?,
            }
        }

        self.write_str("trailer\n")?;
        self.write_str(&format!("<< /Size {} /Root {}", size, root_id))?;
        if let Some(info) = info_id {
            self.write_str(&format!(" /Info {}", info))?;
        }
        self.write_str(" >>\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer, consuming this PdfWriter.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Escape a literal string body: backslash, parens, and line-end
/// bytes that readers would otherwise normalise.
pub fn escape_pdf_string(s: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(s.len());
    for &b in s {
        match b {
            b'\\' => result.extend_from_slice(b"\\\\"),
            b'(' => result.extend_from_slice(b"\\("),
            b')' => result.extend_from_slice(b"\\)"),
            b'\r' => result.extend_from_slice(b"\\r"),
            b'\n' => result.extend_from_slice(b"\\n"),
            _ => result.push(b),
        }
    }
    result
}

/// Render a name with its leading slash, `#xx`-escaping bytes that
/// are not regular characters.
pub fn escape_pdf_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push('/');
    for &b in name.as_bytes() {
        let delimiter = matches!(
            b,
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#'
        );
        if (0x21..=0x7E).contains(&b) && !delimiter {
            out.push(b as char);
        } else {
            out.push_str(&format!("#{:02X}", b));
        }
    }
    out
}

/// Format a number for PDF output: at most four decimals, trailing
/// zeros trimmed, never scientific notation. Integral values print
/// without a decimal point.
pub fn format_number(v: f64) -> String {
    if v.abs() < 0.00005 {
        return "0".to_string();
    }
    if v == v.floor() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Zlib-compress stream data for `/FlateDecode`.
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(obj: &PdfObject) -> String {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_pdf_object(obj).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn header_bytes() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_header().unwrap();
        assert!(buf.starts_with(b"%PDF-1.7\n"));
        assert_eq!(buf[9], b'%');
        assert!(buf[10..14].iter().all(|&b| b >= 128));
    }

    #[test]
    fn scalar_objects() {
        assert_eq!(render(&PdfObject::Null), "null");
        assert_eq!(render(&PdfObject::Boolean(false)), "false");
        assert_eq!(render(&PdfObject::Integer(-3)), "-3");
        assert_eq!(render(&PdfObject::Real(595.0)), "595");
        assert_eq!(render(&PdfObject::Real(0.5)), "0.5");
        assert_eq!(render(&PdfObject::reference(4, 0)), "4 0 R");
    }

    #[test]
    fn hex_string_uppercase() {
        let obj = PdfObject::HexString(vec![0xFE, 0xFF, 0x00, 0x41]);
        assert_eq!(render(&obj), "<FEFF0041>");
    }

    #[test]
    fn name_escaping() {
        assert_eq!(escape_pdf_name("Type"), "/Type");
        assert_eq!(escape_pdf_name("My Key"), "/My#20Key");
        assert_eq!(escape_pdf_name("a#b(c)"), "/a#23b#28c#29");
    }

    #[test]
    fn write_stream_counts_raw_bytes() {
        let obj = PdfObject::stream(vec![], vec![0xFF, 0x00, b'x']);
        let out = render(&obj);
        assert!(out.contains("/Length 3"));
    }

    #[test]
    fn escape_special_chars() {
        assert_eq!(escape_pdf_string(b"hello"), b"hello".to_vec());
        assert_eq!(escape_pdf_string(b"a(b)c"), b"a\\(b\\)c".to_vec());
        assert_eq!(escape_pdf_string(b"back\\slash"), b"back\\\\slash".to_vec());
        assert_eq!(escape_pdf_string(b"x\ry"), b"x\\ry".to_vec());
    }

    #[test]
    fn format_number_is_bounded() {
        assert_eq!(format_number(612.0), "612");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(0.00001), "0");
        assert_eq!(format_number(-0.00004), "0");
    }

    #[test]
    fn unfilled_slot_written_as_null() {
        let mut store = ObjectStore::new();
        let root = store.allocate(PdfObject::dict(vec![("Type", PdfObject::name("Catalog"))]));
        store.reserve();
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_document(&store, root, None).unwrap();
        let out = String::from_utf8_lossy(&buf);
        assert!(out.contains("2 0 obj\nnull\nendobj"));
        assert!(out.contains("/Size 3"));
    }

    #[test]
    fn deflate_round_trips_through_flate2() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let data = b"BT /F1 12 Tf (Hello) Tj ET".repeat(10);
        let packed = deflate(&data).unwrap();
        assert!(packed.len() < data.len());
        let mut unpacked = Vec::new();
        ZlibDecoder::new(&packed[..]).read_to_end(&mut unpacked).unwrap();
        assert_eq!(unpacked, data);
    }
}
