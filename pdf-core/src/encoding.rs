//! Single-byte text encodings usable with the standard Type 1 fonts.

use std::fmt;

/// Character encoding applied to a font resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Encoding {
    /// The font's own encoding. For the text fonts only printable
    /// ASCII is accepted; Symbol and ZapfDingbats take raw codes.
    Builtin,
    WinAnsi,
    MacRoman,
    PdfDoc,
}

/// WinAnsiEncoding codes 0x80..=0x9F. Zero marks an unused code.
const WIN_ANSI_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0,
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// MacRomanEncoding codes 0x80..=0xFF.
const MAC_ROMAN_HIGH: [u16; 128] = [
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1,
    0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8,
    0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3,
    0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC,
    0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
    0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0, 0x00C6, 0x00D8,
    0, 0x00B1, 0, 0, 0x00A5, 0x00B5, 0, 0,
    0, 0, 0, 0x00AA, 0x00BA, 0, 0x00E6, 0x00F8,
    0x00BF, 0x00A1, 0x00AC, 0, 0x0192, 0, 0, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153,
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0,
    0x00FF, 0x0178, 0x2044, 0x00A4, 0x2039, 0x203A, 0xFB01, 0xFB02,
    0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1,
    0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
    0, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC,
    0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
];

/// PDFDocEncoding codes 0x18..=0x1F.
const PDF_DOC_ACCENTS: [u16; 8] = [
    0x02D8, 0x02C7, 0x02C6, 0x02D9, 0x02DD, 0x02DB, 0x02DA, 0x02DC,
];

/// PDFDocEncoding codes 0x80..=0xA0.
const PDF_DOC_HIGH: [u16; 33] = [
    0x2022, 0x2020, 0x2021, 0x2026, 0x2014, 0x2013, 0x0192, 0x2044,
    0x2039, 0x203A, 0x2212, 0x2030, 0x201E, 0x201C, 0x201D, 0x2018,
    0x2019, 0x201A, 0x2122, 0xFB01, 0xFB02, 0x0141, 0x0152, 0x0160,
    0x0178, 0x017D, 0x0131, 0x0142, 0x0153, 0x0161, 0x017E, 0,
    0x20AC,
];

impl Encoding {
    /// Parse an encoding name as accepted by font resolution.
    /// `default` selects WinAnsi.
    pub fn from_name(name: &str) -> Option<Encoding> {
        match name {
            "builtin" => Some(Encoding::Builtin),
            "winansi" | "default" => Some(Encoding::WinAnsi),
            "macroman" => Some(Encoding::MacRoman),
            "pdfdoc" => Some(Encoding::PdfDoc),
            _ => None,
        }
    }

    /// Value of the font dictionary's `/Encoding` entry, if any.
    pub fn pdf_name(&self) -> Option<&'static str> {
        match self {
            Encoding::Builtin => None,
            Encoding::WinAnsi => Some("WinAnsiEncoding"),
            Encoding::MacRoman => Some("MacRomanEncoding"),
            Encoding::PdfDoc => Some("PDFDocEncoding"),
        }
    }

    /// Byte code for `ch`, or None if the encoding has no slot for it.
    pub fn encode_char(&self, ch: char) -> Option<u8> {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            return Some(code as u8);
        }
        match self {
            Encoding::Builtin => None,
            Encoding::WinAnsi => {
                if (0xA0..=0xFF).contains(&code) {
                    Some(code as u8)
                } else {
                    lookup(&WIN_ANSI_HIGH, code, 0x80)
                }
            }
            Encoding::MacRoman => lookup(&MAC_ROMAN_HIGH, code, 0x80),
            Encoding::PdfDoc => {
                if (0xA1..=0xFF).contains(&code) && code != 0xAD {
                    Some(code as u8)
                } else {
                    lookup(&PDF_DOC_ACCENTS, code, 0x18)
                        .or_else(|| lookup(&PDF_DOC_HIGH, code, 0x80))
                }
            }
        }
    }

    /// Encode a whole string; on failure returns the first character
    /// without a code.
    pub fn encode(&self, text: &str) -> std::result::Result<Vec<u8>, char> {
        text.chars()
            .map(|ch| self.encode_char(ch).ok_or(ch))
            .collect()
    }

    /// Character for a byte code; inverse of [`Encoding::encode_char`].
    pub fn decode_byte(&self, byte: u8) -> Option<char> {
        if (0x20..=0x7E).contains(&byte) {
            return Some(byte as char);
        }
        let code = match self {
            Encoding::Builtin => return None,
            Encoding::WinAnsi => match byte {
                0xA0..=0xFF => u32::from(byte),
                0x80..=0x9F => u32::from(WIN_ANSI_HIGH[usize::from(byte - 0x80)]),
                _ => 0,
            },
            Encoding::MacRoman => match byte {
                0x80..=0xFF => u32::from(MAC_ROMAN_HIGH[usize::from(byte - 0x80)]),
                _ => 0,
            },
            Encoding::PdfDoc => match byte {
                0x18..=0x1F => u32::from(PDF_DOC_ACCENTS[usize::from(byte - 0x18)]),
                0x80..=0xA0 => u32::from(PDF_DOC_HIGH[usize::from(byte - 0x80)]),
                0xAD => 0,
                0xA1..=0xFF => u32::from(byte),
                _ => 0,
            },
        };
        if code == 0 {
            None
        } else {
            char::from_u32(code)
        }
    }
}

fn lookup(table: &[u16], code: u32, first: u8) -> Option<u8> {
    if code == 0 {
        return None;
    }
    table
        .iter()
        .position(|&c| c as u32 == code)
        .map(|i| first + i as u8)
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Builtin => "builtin",
            Encoding::WinAnsi => "winansi",
            Encoding::MacRoman => "macroman",
            Encoding::PdfDoc => "pdfdoc",
        };
        f.write_str(name)
    }
}
