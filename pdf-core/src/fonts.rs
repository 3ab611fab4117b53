//! The 14 standard Type 1 fonts: names, compiled-in metrics and the
//! per-document font resource registry.

use log::{debug, warn};

use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::objects::{ObjId, ObjectStore, PdfObject};

/// Font identifier for the 14 standard PDF fonts.
/// These fonts are guaranteed available in all PDF viewers
/// without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 14] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::HelveticaBoldOblique,
        BuiltinFont::TimesRoman,
        BuiltinFont::TimesBold,
        BuiltinFont::TimesItalic,
        BuiltinFont::TimesBoldItalic,
        BuiltinFont::Courier,
        BuiltinFont::CourierBold,
        BuiltinFont::CourierOblique,
        BuiltinFont::CourierBoldOblique,
        BuiltinFont::Symbol,
        BuiltinFont::ZapfDingbats,
    ];

    /// Returns the PDF BaseFont name (e.g. "Helvetica",
    /// "Times-Roman").
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::TimesBold => "Times-Bold",
            BuiltinFont::TimesItalic => "Times-Italic",
            BuiltinFont::TimesBoldItalic => "Times-BoldItalic",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
            BuiltinFont::Symbol => "Symbol",
            BuiltinFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Look up a font by its exact BaseFont name. No aliases and no
    /// substitution: anything else is None.
    pub fn from_name(name: &str) -> Option<BuiltinFont> {
        Self::ALL.into_iter().find(|f| f.base_name() == name)
    }

    /// Symbol and ZapfDingbats carry their own glyph sets and cannot
    /// be re-encoded.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, BuiltinFont::Symbol | BuiltinFont::ZapfDingbats)
    }

    pub fn metrics(&self) -> &'static FontMetrics {
        match self {
            BuiltinFont::Helvetica => &HELVETICA,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD,
            BuiltinFont::HelveticaOblique => &HELVETICA_OBLIQUE,
            BuiltinFont::HelveticaBoldOblique => &HELVETICA_BOLD_OBLIQUE,
            BuiltinFont::TimesRoman => &TIMES_ROMAN,
            BuiltinFont::TimesBold => &TIMES_BOLD,
            BuiltinFont::TimesItalic => &TIMES_ITALIC,
            BuiltinFont::TimesBoldItalic => &TIMES_BOLD_ITALIC,
            BuiltinFont::Courier => &COURIER,
            BuiltinFont::CourierBold => &COURIER_BOLD,
            BuiltinFont::CourierOblique => &COURIER_OBLIQUE,
            BuiltinFont::CourierBoldOblique => &COURIER_BOLD_OBLIQUE,
            BuiltinFont::Symbol => &SYMBOL,
            BuiltinFont::ZapfDingbats => &ZAPF_DINGBATS,
        }
    }
}

/// Glyph advance source for a font.
#[derive(Debug)]
enum Widths {
    /// Latin text font, looked up by character: ASCII 32..=126,
    /// Latin-1 U+00A0..=U+00FF, then [`SPECIAL_GLYPHS`].
    Text {
        ascii: &'static [u16; 95],
        latin1: &'static [u16; 96],
        special: &'static [u16; 40],
    },
    /// Monospaced.
    Uniform(u16),
    /// Symbolic font, looked up by raw code 32..=255.
    Coded(&'static [u16; 224]),
}

/// Static AFM-derived metrics for one standard font. Values are in
/// 1/1000 em; shared read-only by every document.
#[derive(Debug)]
pub struct FontMetrics {
    widths: Widths,
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    /// llx, lly, urx, ury.
    pub bbox: [i16; 4],
}

/// Width for characters the font has no glyph for (1/1000 em).
const DEFAULT_WIDTH: u16 = 278;

/// Glyphs of the Latin text fonts outside ASCII and Latin-1 that the
/// supported encodings can reach: the WinAnsi 0x80..=0x9F block, then
/// the MacRoman and PDFDoc extras.
const SPECIAL_GLYPHS: [char; 40] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}', '\u{02C6}',
    '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}', '\u{2019}', '\u{201C}',
    '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}',
    '\u{0153}', '\u{017E}', '\u{0178}', '\u{0131}', '\u{FB01}', '\u{FB02}', '\u{2044}', '\u{02D8}',
    '\u{02D9}', '\u{02DA}', '\u{02DD}', '\u{02DB}', '\u{02C7}', '\u{0141}', '\u{0142}', '\u{2212}',
];

impl FontMetrics {
    /// Returns the width of a character in 1/1000 em units. For
    /// Symbol and ZapfDingbats `ch` is the raw code as a char.
    pub fn char_width(&self, ch: char) -> u16 {
        let code = ch as u32;
        match self.widths {
            Widths::Uniform(w) => w,
            Widths::Coded(table) => match code {
                32..=255 => table[(code - 32) as usize],
                _ => DEFAULT_WIDTH,
            },
            Widths::Text {
                ascii,
                latin1,
                special,
            } => match code {
                32..=126 => ascii[(code - 32) as usize],
                0xA0..=0xFF => latin1[(code - 0xA0) as usize],
                _ => SPECIAL_GLYPHS
                    .iter()
                    .position(|&g| g == ch)
                    .map_or(DEFAULT_WIDTH, |i| special[i]),
            },
        }
    }

    /// Width of `text` in points at `font_size`, without spacing
    /// adjustments.
    pub fn string_width(&self, text: &str, font_size: f64) -> f64 {
        let total: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        total as f64 * font_size / 1000.0
    }

    /// Default baseline-to-baseline distance (1.2x the size).
    pub fn line_height(&self, font_size: f64) -> f64 {
        font_size * 1.2
    }
}

// Source: Adobe Core14 AFM data.

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584,
    278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722,
    722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556,
    556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584,
    278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722,
    722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611,
    611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 278, 278, 564, 564, 564, 444, 921, 722, 667, 667,
    722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333,
    278, 333, 469, 500, 333, 444, 500, 444, 500, 444, 333, 500,
    500, 278, 278, 500, 278, 778, 500, 500, 500, 500, 333, 389,
    278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 333, 333, 570, 570, 570, 500, 930, 722, 667, 722,
    722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333,
    278, 333, 581, 500, 333, 500, 556, 444, 556, 444, 333, 500,
    556, 278, 333, 556, 278, 833, 556, 500, 556, 556, 444, 389,
    333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 333, 333, 675, 675, 675, 500, 920, 611, 611, 667,
    722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389,
    278, 389, 422, 500, 333, 500, 500, 444, 500, 444, 278, 500,
    500, 278, 278, 444, 278, 722, 500, 500, 500, 500, 389, 389,
    278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570,
    250, 333, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 333, 333, 570, 570, 570, 500, 832, 667, 667, 667,
    722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333,
    278, 333, 570, 500, 333, 500, 500, 444, 500, 444, 333, 500,
    556, 278, 278, 500, 278, 778, 556, 500, 556, 556, 389, 389,
    278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

// Latin-1 U+00A0..=U+00FF, indexed from U+00A0.

const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556,
    584, 333, 737, 333, 400, 584, 333, 333, 333, 556, 537, 278,
    333, 333, 365, 556, 834, 834, 834, 611, 667, 667, 667, 667,
    667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722,
    722, 667, 667, 611, 556, 556, 556, 556, 556, 556, 889, 500,
    556, 556, 556, 556, 278, 278, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556,
    584, 333, 737, 333, 400, 584, 333, 333, 333, 611, 556, 278,
    333, 333, 365, 556, 834, 834, 834, 611, 722, 722, 722, 722,
    722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722,
    722, 667, 667, 611, 556, 556, 556, 556, 556, 556, 889, 556,
    556, 556, 556, 556, 278, 278, 278, 278, 611, 611, 611, 611,
    611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

const TIMES_ROMAN_LATIN1: [u16; 96] = [
    250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500,
    564, 333, 760, 333, 400, 564, 300, 300, 333, 500, 453, 250,
    333, 300, 310, 500, 750, 750, 750, 444, 722, 722, 722, 722,
    722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722,
    722, 722, 556, 500, 444, 444, 444, 444, 444, 444, 667, 444,
    444, 444, 444, 444, 278, 278, 278, 278, 500, 500, 500, 500,
    500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
];

const TIMES_BOLD_LATIN1: [u16; 96] = [
    250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500,
    570, 333, 747, 333, 400, 570, 300, 300, 333, 556, 540, 250,
    333, 300, 330, 500, 750, 750, 750, 500, 722, 722, 722, 722,
    722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
    722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722,
    722, 722, 611, 556, 500, 500, 500, 500, 500, 500, 722, 444,
    444, 444, 444, 444, 278, 278, 278, 278, 500, 556, 500, 500,
    500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
];

const TIMES_ITALIC_LATIN1: [u16; 96] = [
    250, 389, 500, 500, 500, 500, 275, 500, 333, 760, 276, 500,
    675, 333, 760, 333, 400, 675, 300, 300, 333, 500, 523, 250,
    333, 300, 310, 500, 750, 750, 750, 500, 611, 611, 611, 611,
    611, 611, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
    722, 667, 722, 722, 722, 722, 722, 675, 722, 722, 722, 722,
    722, 556, 611, 500, 500, 500, 500, 500, 500, 500, 667, 444,
    444, 444, 444, 444, 278, 278, 278, 278, 500, 500, 500, 500,
    500, 500, 500, 675, 500, 500, 500, 500, 500, 444, 500, 444,
];

const TIMES_BOLD_ITALIC_LATIN1: [u16; 96] = [
    250, 389, 500, 500, 500, 500, 220, 500, 333, 747, 266, 500,
    606, 333, 747, 333, 400, 570, 300, 300, 333, 576, 500, 250,
    333, 300, 300, 500, 750, 750, 750, 500, 667, 667, 667, 667,
    667, 667, 944, 667, 667, 667, 667, 667, 389, 389, 389, 389,
    722, 722, 722, 722, 722, 722, 722, 570, 722, 722, 722, 722,
    722, 611, 611, 500, 500, 500, 500, 500, 500, 500, 722, 444,
    444, 444, 444, 444, 278, 278, 278, 278, 500, 556, 500, 500,
    500, 500, 500, 570, 500, 556, 556, 556, 556, 444, 500, 444,
];

// In SPECIAL_GLYPHS order.

const HELVETICA_SPECIAL: [u16; 40] = [
    556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000,
    611, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333,
    944, 500, 667, 278, 500, 500, 167, 333, 333, 333, 333, 333,
    333, 556, 222, 584,
];

const HELVETICA_BOLD_SPECIAL: [u16; 40] = [
    556, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000,
    611, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333,
    944, 500, 667, 278, 611, 611, 167, 333, 333, 333, 333, 333,
    333, 611, 278, 584,
];

const TIMES_ROMAN_SPECIAL: [u16; 40] = [
    500, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889,
    611, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333,
    722, 444, 722, 278, 556, 556, 167, 333, 333, 333, 333, 333,
    333, 611, 278, 564,
];

const TIMES_BOLD_SPECIAL: [u16; 40] = [
    500, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000,
    667, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333,
    722, 444, 722, 278, 556, 556, 167, 333, 333, 333, 333, 333,
    333, 667, 278, 570,
];

const TIMES_ITALIC_SPECIAL: [u16; 40] = [
    500, 333, 500, 556, 889, 500, 500, 333, 1000, 500, 333, 944,
    556, 333, 333, 556, 556, 350, 500, 889, 333, 980, 389, 333,
    667, 389, 556, 278, 500, 500, 167, 333, 333, 333, 333, 333,
    333, 556, 278, 675,
];

const TIMES_BOLD_ITALIC_SPECIAL: [u16; 40] = [
    500, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 944,
    611, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333,
    722, 389, 611, 278, 556, 556, 167, 333, 333, 333, 333, 333,
    333, 611, 278, 606,
];

// Codes 32..=255; 0 marks codes with no glyph.

const SYMBOL_WIDTHS: [u16; 224] = [
    250, 333, 713, 500, 549, 833, 778, 439, 333, 333, 500, 549,
    250, 549, 250, 278, 500, 500, 500, 500, 500, 500, 500, 500,
    500, 500, 278, 278, 549, 549, 549, 444, 549, 722, 667, 722,
    612, 611, 763, 603, 722, 333, 631, 722, 686, 889, 722, 722,
    768, 741, 556, 592, 611, 690, 439, 768, 645, 795, 611, 333,
    863, 333, 658, 500, 500, 631, 549, 549, 494, 439, 521, 411,
    603, 329, 603, 549, 549, 576, 521, 549, 549, 521, 549, 603,
    439, 576, 713, 686, 493, 686, 494, 480, 200, 480, 549, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 750, 620, 247, 549,
    167, 713, 500, 753, 753, 753, 753, 1042, 987, 603, 987, 603,
    400, 549, 411, 549, 549, 713, 494, 460, 549, 549, 549, 549,
    1000, 603, 1000, 658, 823, 686, 795, 987, 768, 768, 823, 768,
    768, 713, 713, 713, 713, 713, 713, 713, 768, 713, 790, 790,
    890, 823, 549, 250, 713, 603, 603, 1042, 987, 603, 987, 603,
    494, 329, 790, 790, 786, 713, 384, 384, 384, 384, 384, 384,
    494, 494, 494, 494, 0, 329, 274, 686, 686, 686, 384, 384,
    384, 384, 384, 384, 494, 494, 494, 0,
];

const ZAPF_DINGBATS_WIDTHS: [u16; 224] = [
    278, 974, 961, 974, 980, 719, 789, 790, 791, 690, 960, 939,
    549, 855, 911, 933, 911, 945, 974, 755, 846, 762, 761, 571,
    677, 763, 760, 759, 754, 494, 552, 537, 577, 692, 786, 788,
    788, 790, 793, 794, 816, 823, 789, 841, 823, 833, 816, 831,
    923, 744, 723, 749, 790, 792, 695, 776, 768, 792, 759, 707,
    708, 682, 701, 826, 815, 789, 789, 707, 687, 696, 689, 786,
    787, 713, 791, 785, 791, 873, 761, 762, 762, 759, 759, 892,
    892, 788, 784, 438, 138, 277, 415, 392, 392, 668, 668, 0,
    390, 390, 317, 317, 276, 276, 509, 509, 410, 410, 234, 234,
    334, 334, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 732, 544, 544,
    910, 667, 760, 760, 776, 595, 694, 626, 788, 788, 788, 788,
    788, 788, 788, 788, 788, 788, 788, 788, 788, 788, 788, 788,
    788, 788, 788, 788, 788, 788, 788, 788, 788, 788, 788, 788,
    788, 788, 788, 788, 788, 788, 788, 788, 788, 788, 788, 788,
    894, 838, 1016, 458, 748, 924, 748, 918, 927, 928, 928, 834,
    873, 828, 924, 924, 917, 930, 931, 463, 883, 836, 836, 867,
    867, 696, 696, 874, 0, 874, 760, 946, 771, 865, 771, 888,
    967, 888, 831, 873, 927, 970, 918, 0,
];

macro_rules! metrics {
    ($name:ident, $widths:expr, $asc:expr, $desc:expr, $cap:expr, $bbox:expr) => {
        static $name: FontMetrics = FontMetrics {
            widths: $widths,
            ascender: $asc,
            descender: $desc,
            cap_height: $cap,
            bbox: $bbox,
        };
    };
}

macro_rules! text_widths {
    ($ascii:ident, $latin1:ident, $special:ident) => {
        Widths::Text {
            ascii: &$ascii,
            latin1: &$latin1,
            special: &$special,
        }
    };
}

metrics!(HELVETICA, text_widths!(HELVETICA_WIDTHS, HELVETICA_LATIN1, HELVETICA_SPECIAL), 718, -207, 718, [-166, -225, 1000, 931]);
metrics!(HELVETICA_BOLD, text_widths!(HELVETICA_BOLD_WIDTHS, HELVETICA_BOLD_LATIN1, HELVETICA_BOLD_SPECIAL), 718, -207, 718, [-170, -228, 1003, 962]);
metrics!(HELVETICA_OBLIQUE, text_widths!(HELVETICA_WIDTHS, HELVETICA_LATIN1, HELVETICA_SPECIAL), 718, -207, 718, [-170, -225, 1116, 931]);
metrics!(HELVETICA_BOLD_OBLIQUE, text_widths!(HELVETICA_BOLD_WIDTHS, HELVETICA_BOLD_LATIN1, HELVETICA_BOLD_SPECIAL), 718, -207, 718, [-174, -228, 1114, 962]);
metrics!(TIMES_ROMAN, text_widths!(TIMES_ROMAN_WIDTHS, TIMES_ROMAN_LATIN1, TIMES_ROMAN_SPECIAL), 683, -217, 662, [-168, -218, 1000, 898]);
metrics!(TIMES_BOLD, text_widths!(TIMES_BOLD_WIDTHS, TIMES_BOLD_LATIN1, TIMES_BOLD_SPECIAL), 683, -217, 676, [-168, -218, 1000, 935]);
metrics!(TIMES_ITALIC, text_widths!(TIMES_ITALIC_WIDTHS, TIMES_ITALIC_LATIN1, TIMES_ITALIC_SPECIAL), 683, -217, 653, [-169, -217, 1010, 883]);
metrics!(TIMES_BOLD_ITALIC, text_widths!(TIMES_BOLD_ITALIC_WIDTHS, TIMES_BOLD_ITALIC_LATIN1, TIMES_BOLD_ITALIC_SPECIAL), 683, -217, 669, [-200, -218, 996, 921]);
metrics!(COURIER, Widths::Uniform(600), 629, -157, 562, [-23, -250, 715, 805]);
metrics!(COURIER_BOLD, Widths::Uniform(600), 629, -157, 562, [-113, -250, 749, 801]);
metrics!(COURIER_OBLIQUE, Widths::Uniform(600), 629, -157, 562, [-27, -250, 849, 805]);
metrics!(COURIER_BOLD_OBLIQUE, Widths::Uniform(600), 629, -157, 562, [-57, -250, 869, 801]);
metrics!(SYMBOL, Widths::Coded(&SYMBOL_WIDTHS), 1010, -293, 1010, [-180, -293, 1090, 1010]);
metrics!(ZAPF_DINGBATS, Widths::Coded(&ZAPF_DINGBATS_WIDTHS), 820, -143, 820, [-1, -143, 981, 820]);

/// A font resource resolved within one document. Cheap to copy and
/// valid on every page of the document that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle {
    font: BuiltinFont,
    encoding: Encoding,
    resource: u32,
    id: ObjId,
}

impl FontHandle {
    pub fn font(&self) -> BuiltinFont {
        self.font
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Resource number `n` of the `/Fn` name used in content streams.
    pub fn resource(&self) -> u32 {
        self.resource
    }

    /// Resource name without the leading slash, e.g. "F1".
    pub fn resource_name(&self) -> String {
        format!("F{}", self.resource)
    }

    /// Id of the font dictionary in the object store.
    pub fn id(&self) -> ObjId {
        self.id
    }

    /// Encode `text` into this font's single-byte codes.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        if self.font.is_symbolic() && self.encoding == Encoding::Builtin {
            return text
                .chars()
                .map(|ch| match ch as u32 {
                    code @ 0x20..=0xFF => Ok(code as u8),
                    _ => Err(Error::InvalidEncoding {
                        ch,
                        encoding: self.encoding,
                    }),
                })
                .collect();
        }
        self.encoding.encode(text).map_err(|ch| Error::InvalidEncoding {
            ch,
            encoding: self.encoding,
        })
    }

    /// Width of `text` in points at `font_size`.
    pub fn string_width(&self, text: &str, font_size: f64) -> f64 {
        self.font.metrics().string_width(text, font_size)
    }
}

/// Interns font resources per (font, encoding) pair for one document.
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: Vec<FontHandle>,
}

impl FontRegistry {
    pub fn new() -> Self {
        FontRegistry { fonts: Vec::new() }
    }

    /// Resolve a font by name and encoding name, allocating the font
    /// dictionary on first use. Resource numbers are handed out in
    /// resolution order and are unique across the whole document.
    pub fn resolve(
        &mut self,
        store: &mut ObjectStore,
        name: &str,
        encoding: &str,
    ) -> Result<FontHandle> {
        let font = BuiltinFont::from_name(name)
            .ok_or_else(|| Error::UnknownFont(name.to_string()))?;
        let mut enc = Encoding::from_name(encoding).ok_or_else(|| {
            Error::UnknownEncoding {
                font: name.to_string(),
                encoding: encoding.to_string(),
            }
        })?;
        if font.is_symbolic() && enc != Encoding::Builtin {
            warn!("cannot re-encode symbolic font {} with {}; using builtin", name, enc);
            enc = Encoding::Builtin;
        }

        if let Some(handle) = self
            .fonts
            .iter()
            .find(|h| h.font == font && h.encoding == enc)
        {
            return Ok(*handle);
        }

        let mut dict = vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("Type1")),
            ("BaseFont", PdfObject::name(font.base_name())),
        ];
        if let Some(enc_name) = enc.pdf_name() {
            dict.push(("Encoding", PdfObject::name(enc_name)));
        }
        let id = store.allocate(PdfObject::dict(dict));
        let handle = FontHandle {
            font,
            encoding: enc,
            resource: self.fonts.len() as u32 + 1,
            id,
        };
        debug!(
            "font {} ({}) resolved as /{} in object {}",
            name,
            enc,
            handle.resource_name(),
            id.0
        );
        self.fonts.push(handle);
        Ok(handle)
    }

    /// Whether `handle` was minted by this registry.
    pub fn contains(&self, handle: &FontHandle) -> bool {
        self.fonts.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
