use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;

use crate::encoding::Encoding;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur when reading a PDF file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("not a PDF file")]
    NotAPdf,
    #[error("startxref not found")]
    StartxrefNotFound,
    #[error("malformed or missing xref table")]
    MalformedXref,
    #[error("malformed or missing trailer")]
    MalformedTrailer,
    #[error("cross-reference streams are not supported")]
    XrefStreamNotSupported,
    #[error("cannot resolve object {0}")]
    UnresolvableObject(u32),
    #[error("malformed page tree")]
    MalformedPageTree,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type ReadResult<T> = std::result::Result<T, ReadError>;

// ── Public API ─────────────────────────────────────────────────────────────────

/// Structural view of a PDF file with a classic xref table.
///
/// Parses the header, `startxref`, the xref table and the trailer, then
/// follows the catalog to the page tree. Enough to check what the
/// writer produced without a full object parser.
#[derive(Debug)]
pub struct PdfReader {
    data: Vec<u8>,
    /// In-use entries: object number → (byte offset, generation).
    xref: BTreeMap<u32, (usize, u16)>,
    version: String,
    size: u32,
    root: u32,
    info: Option<u32>,
    page_count: usize,
}

impl PdfReader {
    /// Open a PDF from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> ReadResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Parse a PDF from raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> ReadResult<Self> {
        let version = parse_version(&data)?;
        let xref_offset = find_startxref(&data)?;
        let (xref, trailer) = parse_xref_and_trailer(&data, xref_offset)?;

        let size = match trailer.get("Size") {
            Some(RawValue::Token(s)) => s.parse().map_err(|_| ReadError::MalformedTrailer)?,
            _ => return Err(ReadError::MalformedTrailer),
        };
        let root = match trailer.get("Root") {
            Some(RawValue::Ref(n, _)) => *n,
            _ => return Err(ReadError::MalformedTrailer),
        };
        let info = match trailer.get("Info") {
            Some(RawValue::Ref(n, _)) => Some(*n),
            _ => None,
        };
        let page_count = resolve_page_count(&data, &xref, root)?;

        Ok(PdfReader {
            data,
            xref,
            version,
            size,
            root,
            info,
            page_count,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// PDF version string (e.g. `"1.7"`).
    pub fn pdf_version(&self) -> &str {
        &self.version
    }

    /// Trailer `/Size`: one more than the highest object number.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of in-use xref entries.
    pub fn object_count(&self) -> usize {
        self.xref.len()
    }

    /// Object number of the catalog.
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Byte offset recorded in the xref table for object `num`.
    pub fn object_offset(&self, num: u32) -> Option<usize> {
        self.xref.get(&num).map(|&(offset, _)| offset)
    }

    /// Text value of an `/Info` entry, decoded from PDFDocEncoding or
    /// UTF-16BE. `None` when the file has no Info dictionary, the key
    /// is absent or the value is not a string.
    pub fn info(&self, key: &str) -> Option<String> {
        let info = self.info?;
        let dict = resolve_dict(&self.data, &self.xref, info).ok()?;
        match dict.get(key)? {
            RawValue::Bytes(bytes) => decode_text_string(bytes),
            _ => None,
        }
    }

    /// Check that every in-use xref entry points exactly at its
    /// `"<n> <g> obj"` header. Returns the object numbers that do not.
    pub fn verify_offsets(&self) -> Vec<u32> {
        self.xref
            .iter()
            .filter(|&(&num, &(offset, gen))| {
                let header = format!("{} {} obj", num, gen);
                self.data
                    .get(offset..)
                    .map_or(true, |rest| !rest.starts_with(header.as_bytes()))
            })
            .map(|(&num, _)| num)
            .collect()
    }
}

// ── Internal parsing ───────────────────────────────────────────────────────────

/// A dictionary value as far as this reader cares.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    /// Number, name (with its slash) or keyword.
    Token(String),
    /// Indirect reference `N G R`.
    Ref(u32, u16),
    /// Literal or hex string, escapes resolved.
    Bytes(Vec<u8>),
    /// Nested dictionary or array.
    Skipped,
}

type RawDict = HashMap<String, RawValue>;

/// Extract the PDF version from the `%PDF-x.y` header.
fn parse_version(data: &[u8]) -> ReadResult<String> {
    if data.len() < 8 || !data.starts_with(b"%PDF-") {
        return Err(ReadError::NotAPdf);
    }
    let rest = &data[5..];
    let end = rest
        .iter()
        .position(|&b| b == b'\n' || b == b'\r' || b == b' ')
        .unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end])
        .map(str::to_string)
        .map_err(|_| ReadError::NotAPdf)
}

/// Scan the last kilobyte for `startxref` and read the offset after it.
fn find_startxref(data: &[u8]) -> ReadResult<usize> {
    let search_start = data.len().saturating_sub(1024);
    let tail = &data[search_start..];

    let keyword = b"startxref";
    let pos = tail
        .windows(keyword.len())
        .rposition(|w| w == keyword)
        .ok_or(ReadError::StartxrefNotFound)?;

    let (offset_str, _) =
        next_token(&tail[pos + keyword.len()..]).ok_or(ReadError::StartxrefNotFound)?;
    let offset: usize = offset_str
        .parse()
        .map_err(|_| ReadError::StartxrefNotFound)?;

    if offset >= data.len() {
        return Err(ReadError::StartxrefNotFound);
    }
    Ok(offset)
}

fn parse_xref_and_trailer(
    data: &[u8],
    xref_offset: usize,
) -> ReadResult<(BTreeMap<u32, (usize, u16)>, RawDict)> {
    let section = &data[xref_offset..];
    if !section.starts_with(b"xref") {
        // Either an xref stream ("N 0 obj") or a wrong offset.
        return if skip_obj_header(section).is_some() {
            Err(ReadError::XrefStreamNotSupported)
        } else {
            Err(ReadError::MalformedXref)
        };
    }

    let (xref, after) = parse_xref_table(section)?;
    let after = skip_ascii_whitespace(after);
    if !after.starts_with(b"trailer") {
        return Err(ReadError::MalformedTrailer);
    }
    let trailer = parse_dict_bytes(&after[b"trailer".len()..]).ok_or(ReadError::MalformedTrailer)?;
    Ok((xref, trailer))
}

/// Parse the classic xref table. Each subsection has a header line
/// `{first_obj} {count}` followed by 20-byte entries
/// `{offset:010} {gen:05} {n|f}\r\n`.
fn parse_xref_table(section: &[u8]) -> ReadResult<(BTreeMap<u32, (usize, u16)>, &[u8])> {
    const ENTRY_SIZE: usize = 20;
    let mut map = BTreeMap::new();
    let mut cursor = &section[b"xref".len()..];

    loop {
        let trimmed = skip_ascii_whitespace(cursor);
        if trimmed.is_empty() || trimmed.starts_with(b"trailer") {
            return Ok((map, trimmed));
        }

        let (first_str, rest) = next_token(trimmed).ok_or(ReadError::MalformedXref)?;
        let first_obj: u32 = first_str.parse().map_err(|_| ReadError::MalformedXref)?;
        let (count_str, rest) = next_token(rest).ok_or(ReadError::MalformedXref)?;
        let count: usize = count_str.parse().map_err(|_| ReadError::MalformedXref)?;

        let entries = skip_line(rest);
        let needed = count
            .checked_mul(ENTRY_SIZE)
            .ok_or(ReadError::MalformedXref)?;
        if entries.len() < needed {
            return Err(ReadError::MalformedXref);
        }

        for (i, entry) in entries[..needed].chunks_exact(ENTRY_SIZE).enumerate() {
            if !entry.ends_with(b"\r\n") && !entry.ends_with(b" \n") && !entry.ends_with(b" \r") {
                return Err(ReadError::MalformedXref);
            }
            if entry[17] != b'n' {
                continue;
            }
            let offset = parse_ascii::<usize>(&entry[..10]).ok_or(ReadError::MalformedXref)?;
            let gen = parse_ascii::<u16>(&entry[11..16]).ok_or(ReadError::MalformedXref)?;
            let obj_num = first_obj
                .checked_add(i as u32)
                .ok_or(ReadError::MalformedXref)?;
            if obj_num > 0 {
                map.insert(obj_num, (offset, gen));
            }
        }

        cursor = &entries[needed..];
    }
}

/// Follow the catalog to the pages tree and read its `/Count`.
fn resolve_page_count(
    data: &[u8],
    xref: &BTreeMap<u32, (usize, u16)>,
    catalog: u32,
) -> ReadResult<usize> {
    let catalog_dict = resolve_dict(data, xref, catalog)?;
    let pages = match catalog_dict.get("Pages") {
        Some(RawValue::Ref(n, _)) => *n,
        _ => return Err(ReadError::MalformedPageTree),
    };
    let pages_dict = resolve_dict(data, xref, pages)?;
    match pages_dict.get("Count") {
        Some(RawValue::Token(count)) => count.parse().map_err(|_| ReadError::MalformedPageTree),
        _ => Err(ReadError::MalformedPageTree),
    }
}

/// Resolve an indirect object by number and parse its body as a
/// dictionary.
fn resolve_dict(
    data: &[u8],
    xref: &BTreeMap<u32, (usize, u16)>,
    obj_num: u32,
) -> ReadResult<RawDict> {
    let &(offset, _) = xref
        .get(&obj_num)
        .ok_or(ReadError::UnresolvableObject(obj_num))?;
    let slice = data
        .get(offset..)
        .ok_or(ReadError::UnresolvableObject(obj_num))?;
    let body = skip_obj_header(slice).ok_or(ReadError::UnresolvableObject(obj_num))?;
    parse_dict_bytes(body).ok_or(ReadError::UnresolvableObject(obj_num))
}

/// Decode a text string: UTF-16BE when it starts with a byte-order
/// mark, PDFDocEncoding otherwise.
fn decode_text_string(bytes: &[u8]) -> Option<String> {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        if body.len() % 2 != 0 {
            return None;
        }
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }
    bytes
        .iter()
        .map(|&b| Encoding::PdfDoc.decode_byte(b))
        .collect()
}

// ── Token / byte utilities ─────────────────────────────────────────────────────

/// Parse `<<...>>` into a flat key → value map. Nested dictionaries
/// and arrays are recorded as [`RawValue::Skipped`].
fn parse_dict_bytes(data: &[u8]) -> Option<RawDict> {
    let data = skip_ascii_whitespace(data);
    let mut cursor = data.strip_prefix(b"<<")?;
    let mut map = HashMap::new();

    loop {
        cursor = skip_ascii_whitespace(cursor);
        if cursor.starts_with(b">>") {
            return Some(map);
        }
        let rest = cursor.strip_prefix(b"/")?;
        let (key, after_key) = next_token(rest)?;
        let (value, after_value) = parse_value(skip_ascii_whitespace(after_key))?;
        map.insert(key.to_string(), value);
        cursor = after_value;
    }
}

fn parse_value(data: &[u8]) -> Option<(RawValue, &[u8])> {
    if data.starts_with(b"<<") {
        return Some((RawValue::Skipped, skip_nested_dict(data)?));
    }
    if data.starts_with(b"[") {
        return Some((RawValue::Skipped, skip_array(data)?));
    }
    if data.starts_with(b"(") {
        let (bytes, rest) = parse_literal_string(data)?;
        return Some((RawValue::Bytes(bytes), rest));
    }
    if data.starts_with(b"<") {
        let (bytes, rest) = parse_hex_string(data)?;
        return Some((RawValue::Bytes(bytes), rest));
    }
    if let Some(name) = data.strip_prefix(b"/") {
        let (token, rest) = next_token(name)?;
        return Some((RawValue::Token(format!("/{}", token)), rest));
    }

    let (val, rest) = next_token(data)?;
    // `N G R` is an indirect reference.
    if let Some((gen, after_gen)) = next_token(rest) {
        if let Some(("R", after_r)) = next_token(after_gen) {
            if let (Ok(num), Ok(gen)) = (val.parse::<u32>(), gen.parse::<u16>()) {
                return Some((RawValue::Ref(num, gen), after_r));
            }
        }
    }
    Some((RawValue::Token(val.to_string()), rest))
}

/// Skip over a `<<...>>` block (with nested dicts), returning bytes after `>>`.
fn skip_nested_dict(data: &[u8]) -> Option<&[u8]> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < data.len() {
        if data[i..].starts_with(b"<<") {
            depth += 1;
            i += 2;
        } else if data[i..].starts_with(b">>") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Some(&data[i..]);
            }
        } else if data[i] == b'(' {
            let rest = parse_literal_string(&data[i..])?.1;
            i = data.len() - rest.len();
        } else {
            i += 1;
        }
    }
    None
}

/// Skip over a `[...]` array (with nested arrays), returning bytes after `]`.
fn skip_array(data: &[u8]) -> Option<&[u8]> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&data[i + 1..]);
                }
            }
            b'(' => {
                let rest = parse_literal_string(&data[i..])?.1;
                i = data.len() - rest.len();
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Parse a `(...)` literal string, resolving escapes. Returns the
/// bytes and the remainder after the closing paren.
fn parse_literal_string(data: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    let mut out = Vec::new();
    let mut depth = 1usize;
    let mut i = 1;
    while i < data.len() {
        let b = data[i];
        i += 1;
        match b {
            b'\\' => {
                let esc = *data.get(i)?;
                i += 1;
                match esc {
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0C),
                    b'0'..=b'7' => {
                        let mut value = u32::from(esc - b'0');
                        for _ in 0..2 {
                            match data.get(i) {
                                Some(&d @ b'0'..=b'7') => {
                                    value = value * 8 + u32::from(d - b'0');
                                    i += 1;
                                }
                                _ => break,
                            }
                        }
                        out.push(value as u8);
                    }
                    // Line continuation.
                    b'\r' => {
                        if data.get(i) == Some(&b'\n') {
                            i += 1;
                        }
                    }
                    b'\n' => {}
                    other => out.push(other),
                }
            }
            b'(' => {
                depth += 1;
                out.push(b);
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((out, &data[i..]));
                }
                out.push(b);
            }
            _ => out.push(b),
        }
    }
    None
}

/// Parse a `<...>` hex string. An odd trailing digit is padded with 0.
fn parse_hex_string(data: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    let end = data.iter().position(|&b| b == b'>')?;
    let digits: Vec<u8> = data[1..end]
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|&b| (b as char).to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    let bytes = digits
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect();
    Some((bytes, &data[end + 1..]))
}

/// Skip "N G obj" indirect object header, returning bytes after "obj".
fn skip_obj_header(data: &[u8]) -> Option<&[u8]> {
    let (num, rest) = next_token(data)?;
    let (gen, rest) = next_token(rest)?;
    let (keyword, rest) = next_token(rest)?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if keyword != "obj" || !numeric(num) || !numeric(gen) {
        return None;
    }
    Some(rest)
}

/// Return a sub-slice starting at the first non-whitespace byte.
fn skip_ascii_whitespace(data: &[u8]) -> &[u8] {
    let pos = data
        .iter()
        .position(|&b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[pos..]
}

/// Skip to the start of the next line.
fn skip_line(data: &[u8]) -> &[u8] {
    match data.iter().position(|&b| b == b'\n') {
        Some(pos) => &data[pos + 1..],
        None => &data[data.len()..],
    }
}

fn parse_ascii<T: std::str::FromStr>(bytes: &[u8]) -> Option<T> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'[' | b']' | b'(' | b')' | b'/' | b'{' | b'}' | b'%')
}

/// Read the next whitespace- or delimiter-terminated token.
/// Returns `(token_str, remaining_bytes)` or `None` if at end.
fn next_token(data: &[u8]) -> Option<(&str, &[u8])> {
    let data = skip_ascii_whitespace(data);
    if data.is_empty() {
        return None;
    }
    let end = data
        .iter()
        .position(|&b| b.is_ascii_whitespace() || is_delimiter(b))
        .unwrap_or(data.len());
    let end = end.max(1);
    let token = std::str::from_utf8(&data[..end]).ok()?;
    Some((token, &data[end..]))
}
