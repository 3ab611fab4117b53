use std::fmt;

use crate::encoding::Encoding;
use crate::error::{Error, Result};

/// Object identifier: (object_number, generation_number).
/// Generation is always 0 for new documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32, pub u16);

impl ObjId {
    pub fn number(self) -> u32 {
        self.0
    }

    pub fn generation(self) -> u16 {
        self.1
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.0, self.1)
    }
}

/// Represents PDF object types per PDF 32000-1:2008 Section 7.3.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// PDF name object (stored without the leading `/`).
    Name(String),
    /// PDF literal string, already in its target byte encoding
    /// (stored without the enclosing parens).
    LiteralString(Vec<u8>),
    /// PDF hexadecimal string (raw bytes, written as `<...>`).
    HexString(Vec<u8>),
    Array(Vec<PdfObject>),
    /// Key-value pairs. Uses Vec for deterministic output order.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    /// Literal string from ASCII/byte-transparent text.
    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.as_bytes().to_vec())
    }

    /// Text string for document-level values (Info entries):
    /// PDFDocEncoding when every character fits, UTF-16BE with a
    /// byte-order mark otherwise.
    pub fn text_string(s: &str) -> Self {
        match Encoding::PdfDoc.encode(s) {
            Ok(bytes) => PdfObject::LiteralString(bytes),
            Err(_) => {
                let mut bytes = vec![0xFE, 0xFF];
                for unit in s.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_be_bytes());
                }
                PdfObject::HexString(bytes)
            }
        }
    }

    pub fn reference(obj_num: u32, gen: u16) -> Self {
        PdfObject::Reference(ObjId(obj_num, gen))
    }

    pub fn array(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    pub fn stream(
        dict_entries: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
    ) -> Self {
        PdfObject::Stream {
            dict: dict_entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            data,
        }
    }

    /// Look up a key in a dictionary or stream dictionary.
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        let entries = match self {
            PdfObject::Dictionary(entries) => entries,
            PdfObject::Stream { dict, .. } => dict,
            _ => return None,
        };
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Append-only store of indirect objects.
///
/// Ids are handed out contiguously from 1 and never reused. A slot
/// may be reserved before its payload is known so that objects can
/// refer to a parent that is assembled later (the pages tree).
#[derive(Debug, Default)]
pub struct ObjectStore {
    slots: Vec<Option<PdfObject>>,
}

impl ObjectStore {
    pub fn new() -> Self {
        ObjectStore { slots: Vec::new() }
    }

    /// Store `obj` under the next free id.
    pub fn allocate(&mut self, obj: PdfObject) -> ObjId {
        self.slots.push(Some(obj));
        ObjId(self.slots.len() as u32, 0)
    }

    /// Claim the next id without a payload; fill it with `set`.
    pub fn reserve(&mut self) -> ObjId {
        self.slots.push(None);
        ObjId(self.slots.len() as u32, 0)
    }

    /// Fill (or replace) the payload of an allocated id.
    pub fn set(&mut self, id: ObjId, obj: PdfObject) -> Result<()> {
        let slot = self
            .slot_index(id)
            .ok_or(Error::NotFound(id.0))?;
        self.slots[slot] = Some(obj);
        Ok(())
    }

    /// Payload of an allocated id. A reserved id that has not been
    /// filled yet reports `NotFound` as well.
    pub fn get(&self, id: ObjId) -> Result<&PdfObject> {
        self.slot_index(id)
            .and_then(|i| self.slots[i].as_ref())
            .ok_or(Error::NotFound(id.0))
    }

    /// Number of allocated ids (reserved slots included).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every allocated id in ascending order with its payload, if filled.
    pub fn iter(&self) -> impl Iterator<Item = (ObjId, Option<&PdfObject>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (ObjId(i as u32 + 1, 0), slot.as_ref()))
    }

    fn slot_index(&self, id: ObjId) -> Option<usize> {
        if id.0 == 0 || id.1 != 0 {
            return None;
        }
        let index = id.0 as usize - 1;
        (index < self.slots.len()).then_some(index)
    }
}
