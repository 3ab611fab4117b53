use std::collections::BTreeMap;

use crate::content::{ContentStream, TextState};
use crate::error::{Error, Result};
use crate::fonts::{FontHandle, FontRegistry};
use crate::objects::{ObjId, ObjectStore};

/// Everything the document keeps about one page until save time.
#[derive(Debug)]
pub(crate) struct PageData {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) content: ContentStream,
    /// Fonts selected on this page, by resource number.
    pub(crate) fonts: BTreeMap<u32, ObjId>,
}

impl PageData {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        PageData {
            width,
            height,
            content: ContentStream::new(),
            fonts: BTreeMap::new(),
        }
    }
}

/// Mutable handle to one page of a [`Document`](crate::Document).
///
/// Holds the document borrowed, so it cannot outlive a call to
/// `save`. Coordinates use PDF's default bottom-left origin, in
/// points.
#[derive(Debug)]
pub struct Page<'a> {
    pub(crate) index: usize,
    pub(crate) data: &'a mut PageData,
    pub(crate) fonts: &'a mut FontRegistry,
    pub(crate) store: &'a mut ObjectStore,
}

impl<'a> Page<'a> {
    /// Zero-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> f64 {
        self.data.width
    }

    pub fn height(&self) -> f64 {
        self.data.height
    }

    pub fn content(&self) -> &ContentStream {
        &self.data.content
    }

    pub fn text_state(&self) -> &TextState {
        self.data.content.text_state()
    }

    /// Resolve a standard font for use on any page of this document.
    pub fn find_font(&mut self, name: &str, encoding: &str) -> Result<FontHandle> {
        self.fonts.resolve(self.store, name, encoding)
    }

    /// Make `font` current at `size` and list it in this page's
    /// resources.
    pub fn set_font(&mut self, font: &FontHandle, size: f64) -> Result<&mut Self> {
        if !self.fonts.contains(font) {
            return Err(Error::ForeignFont {
                resource: font.resource(),
            });
        }
        self.data.content.set_font(font, size)?;
        self.data.fonts.insert(font.resource(), font.id());
        Ok(self)
    }

    /// Absolute text position for the next `show`.
    pub fn set_text_pos(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        self.data.content.move_to(x, y)?;
        Ok(self)
    }

    /// General `a b c d e f Tm`: rotate, scale or skew the text that
    /// follows, with (e, f) as the new line start.
    pub fn set_text_matrix(&mut self, matrix: [f64; 6]) -> Result<&mut Self> {
        self.data.content.set_text_matrix(matrix)?;
        Ok(self)
    }

    /// Select `font` at `size` and position the text cursor at (x, y).
    pub fn set_text(
        &mut self,
        font: &FontHandle,
        size: f64,
        x: f64,
        y: f64,
    ) -> Result<&mut Self> {
        self.set_font(font, size)?;
        self.set_text_pos(x, y)
    }

    pub fn show(&mut self, text: &str) -> Result<&mut Self> {
        self.data.content.show(text)?;
        Ok(self)
    }

    /// Show `text` on the next line, one leading below the current
    /// line start.
    pub fn continue_text(&mut self, text: &str) -> Result<&mut Self> {
        self.data.content.show_next_line(text)?;
        Ok(self)
    }

    pub fn show_xy(&mut self, text: &str, x: f64, y: f64) -> Result<&mut Self> {
        self.set_text_pos(x, y)?;
        self.show(text)
    }

    pub fn set_leading(&mut self, leading: f64) -> Result<&mut Self> {
        self.data.content.set_leading(leading)?;
        Ok(self)
    }

    pub fn set_char_spacing(&mut self, spacing: f64) -> Result<&mut Self> {
        self.data.content.set_char_spacing(spacing)?;
        Ok(self)
    }

    pub fn set_word_spacing(&mut self, spacing: f64) -> Result<&mut Self> {
        self.data.content.set_word_spacing(spacing)?;
        Ok(self)
    }

    pub fn set_horiz_scaling(&mut self, scale: f64) -> Result<&mut Self> {
        self.data.content.set_horiz_scaling(scale)?;
        Ok(self)
    }

    pub fn set_text_rise(&mut self, rise: f64) -> Result<&mut Self> {
        self.data.content.set_text_rise(rise)?;
        Ok(self)
    }

    pub fn set_text_rendering(&mut self, mode: u8) -> Result<&mut Self> {
        self.data.content.set_text_rendering(mode)?;
        Ok(self)
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.data.content.begin_text();
        self
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.data.content.end_text();
        self
    }

    /// Width of `text` in points for `font` at `size`.
    pub fn string_width(&self, text: &str, font: &FontHandle, size: f64) -> f64 {
        font.string_width(text, size)
    }
}
