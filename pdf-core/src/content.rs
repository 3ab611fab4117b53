//! Page content streams: text operators and the text state they
//! imply.

use crate::error::{ensure_finite, Error, Result};
use crate::fonts::FontHandle;
use crate::writer::{escape_pdf_string, format_number};

/// A single content-stream operator with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// `BT`
    BeginText,
    /// `ET`
    EndText,
    /// `/Fn size Tf`
    SetFont { resource: String, size: f64 },
    /// `l TL`
    SetLeading(f64),
    /// `1 0 0 1 x y Tm`
    SetTextPosition { x: f64, y: f64 },
    /// `a b c d e f Tm`
    SetTextMatrix([f64; 6]),
    /// `(..) Tj`
    Show(Vec<u8>),
    /// `(..) '`
    NextLineShow(Vec<u8>),
    /// `c Tc`
    SetCharSpacing(f64),
    /// `w Tw`
    SetWordSpacing(f64),
    /// `s Tz`
    SetHorizScaling(f64),
    /// `r Ts`
    SetTextRise(f64),
    /// `m Tr`
    SetTextRendering(u8),
}

impl Operator {
    /// Append this operator and its operands as one line.
    pub fn encode(&self, out: &mut Vec<u8>) {
        let line = match self {
            Operator::BeginText => "BT".to_string(),
            Operator::EndText => "ET".to_string(),
            Operator::SetFont { resource, size } => {
                format!("/{} {} Tf", resource, format_number(*size))
            }
            Operator::SetLeading(l) => format!("{} TL", format_number(*l)),
            Operator::SetTextPosition { x, y } => {
                format!("1 0 0 1 {} {} Tm", format_number(*x), format_number(*y))
            }
            Operator::SetTextMatrix(m) => {
                let operands: Vec<String> = m.iter().map(|v| format_number(*v)).collect();
                format!("{} Tm", operands.join(" "))
            }
            Operator::Show(text) => return encode_string(out, text, "Tj"),
            Operator::NextLineShow(text) => return encode_string(out, text, "'"),
            Operator::SetCharSpacing(c) => format!("{} Tc", format_number(*c)),
            Operator::SetWordSpacing(w) => format!("{} Tw", format_number(*w)),
            Operator::SetHorizScaling(s) => format!("{} Tz", format_number(*s)),
            Operator::SetTextRise(r) => format!("{} Ts", format_number(*r)),
            Operator::SetTextRendering(m) => format!("{} Tr", m),
        };
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
}

fn encode_string(out: &mut Vec<u8>, text: &[u8], op: &str) {
    out.push(b'(');
    out.extend_from_slice(&escape_pdf_string(text));
    out.extend_from_slice(b") ");
    out.extend_from_slice(op.as_bytes());
    out.push(b'\n');
}

/// Text state carried across operators within one content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub font: Option<FontHandle>,
    pub size: f64,
    /// Explicit leading; None means the font size is used.
    pub leading: Option<f64>,
    pub char_spacing: f64,
    pub word_spacing: f64,
    /// Horizontal scaling in percent.
    pub horiz_scaling: f64,
    pub rise: f64,
    /// Start of the current line.
    pub line_start: (f64, f64),
    /// Current point after the last shown string.
    pub cursor: (f64, f64),
}

impl Default for TextState {
    fn default() -> Self {
        TextState {
            font: None,
            size: 0.0,
            leading: None,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horiz_scaling: 100.0,
            rise: 0.0,
            line_start: (0.0, 0.0),
            cursor: (0.0, 0.0),
        }
    }
}

impl TextState {
    /// Distance `continue_text` moves down.
    pub fn effective_leading(&self) -> f64 {
        self.leading.unwrap_or(self.size)
    }

    /// Horizontal advance of already-encoded text under this state.
    fn advance(&self, font: &FontHandle, text: &str) -> f64 {
        let metrics = font.font().metrics();
        let mut total = 0.0;
        for ch in text.chars() {
            total += metrics.char_width(ch) as f64 * self.size / 1000.0 + self.char_spacing;
            if ch == ' ' {
                total += self.word_spacing;
            }
        }
        total * self.horiz_scaling / 100.0
    }
}

/// Tab stops expand to this many spaces in shown text.
const TAB_WIDTH: usize = 4;

/// Accumulates a page's operators in call order.
///
/// Text operators open a text object on demand, so `begin_text` is
/// only needed to force an empty `BT`/`ET` pair.
#[derive(Debug, Clone, Default)]
pub struct ContentStream {
    ops: Vec<Operator>,
    in_text: bool,
    state: TextState,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operators(&self) -> &[Operator] {
        &self.ops
    }

    pub fn text_state(&self) -> &TextState {
        &self.state
    }

    pub fn is_in_text(&self) -> bool {
        self.in_text
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Open a text object. No-op if one is already open.
    pub fn begin_text(&mut self) {
        if !self.in_text {
            self.ops.push(Operator::BeginText);
            self.in_text = true;
            // BT resets the text matrix.
            self.state.line_start = (0.0, 0.0);
            self.state.cursor = (0.0, 0.0);
        }
    }

    /// Close the open text object. No-op outside one.
    pub fn end_text(&mut self) {
        if self.in_text {
            self.ops.push(Operator::EndText);
            self.in_text = false;
        }
    }

    /// Select `font` at `size`. Also sets the leading to `size`
    /// unless an explicit leading is in force.
    pub fn set_font(&mut self, font: &FontHandle, size: f64) -> Result<()> {
        let size = ensure_finite("set_font", size)?;
        if size < 0.0 {
            return Err(Error::invalid("set_font", format!("font size {} is negative", size)));
        }
        self.begin_text();
        self.ops.push(Operator::SetFont {
            resource: font.resource_name(),
            size,
        });
        self.state.font = Some(*font);
        self.state.size = size;
        if self.state.leading.is_none() {
            self.ops.push(Operator::SetLeading(size));
        }
        Ok(())
    }

    pub fn set_leading(&mut self, leading: f64) -> Result<()> {
        let leading = ensure_finite("set_leading", leading)?;
        self.begin_text();
        self.ops.push(Operator::SetLeading(leading));
        self.state.leading = Some(leading);
        Ok(())
    }

    /// Move the line start and current point to absolute (x, y).
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        let x = ensure_finite("move_to", x)?;
        let y = ensure_finite("move_to", y)?;
        self.begin_text();
        self.ops.push(Operator::SetTextPosition { x, y });
        self.state.line_start = (x, y);
        self.state.cursor = (x, y);
        Ok(())
    }

    /// Replace the text matrix with `[a b c d e f]`. The line start
    /// and current point move to (e, f); advances stay in unscaled
    /// text space.
    pub fn set_text_matrix(&mut self, matrix: [f64; 6]) -> Result<()> {
        for v in matrix {
            ensure_finite("set_text_matrix", v)?;
        }
        self.begin_text();
        self.ops.push(Operator::SetTextMatrix(matrix));
        self.state.line_start = (matrix[4], matrix[5]);
        self.state.cursor = (matrix[4], matrix[5]);
        Ok(())
    }

    /// Show `text` at the current point and advance it.
    pub fn show(&mut self, text: &str) -> Result<()> {
        let (font, text, bytes) = self.prepare("show", text)?;
        self.begin_text();
        self.ops.push(Operator::Show(bytes));
        self.state.cursor.0 += self.state.advance(&font, &text);
        Ok(())
    }

    /// Move to the next line (down by the leading) and show `text`.
    pub fn show_next_line(&mut self, text: &str) -> Result<()> {
        let (font, text, bytes) = self.prepare("continue_text", text)?;
        self.begin_text();
        self.ops.push(Operator::NextLineShow(bytes));
        let (x, y) = self.state.line_start;
        let y = y - self.state.effective_leading();
        self.state.line_start = (x, y);
        self.state.cursor = (x + self.state.advance(&font, &text), y);
        Ok(())
    }

    pub fn set_char_spacing(&mut self, spacing: f64) -> Result<()> {
        let spacing = ensure_finite("set_char_spacing", spacing)?;
        self.begin_text();
        self.ops.push(Operator::SetCharSpacing(spacing));
        self.state.char_spacing = spacing;
        Ok(())
    }

    pub fn set_word_spacing(&mut self, spacing: f64) -> Result<()> {
        let spacing = ensure_finite("set_word_spacing", spacing)?;
        self.begin_text();
        self.ops.push(Operator::SetWordSpacing(spacing));
        self.state.word_spacing = spacing;
        Ok(())
    }

    /// Horizontal scaling in percent (100 = normal).
    pub fn set_horiz_scaling(&mut self, scale: f64) -> Result<()> {
        let scale = ensure_finite("set_horiz_scaling", scale)?;
        self.begin_text();
        self.ops.push(Operator::SetHorizScaling(scale));
        self.state.horiz_scaling = scale;
        Ok(())
    }

    pub fn set_text_rise(&mut self, rise: f64) -> Result<()> {
        let rise = ensure_finite("set_text_rise", rise)?;
        self.begin_text();
        self.ops.push(Operator::SetTextRise(rise));
        self.state.rise = rise;
        Ok(())
    }

    /// Text rendering mode 0..=7 (fill, stroke, invisible, clip...).
    pub fn set_text_rendering(&mut self, mode: u8) -> Result<()> {
        if mode > 7 {
            return Err(Error::invalid(
                "set_text_rendering",
                format!("rendering mode {} is outside 0..=7", mode),
            ));
        }
        self.begin_text();
        self.ops.push(Operator::SetTextRendering(mode));
        Ok(())
    }

    /// Serialize the operators; an open text object is closed in the
    /// output without changing the builder.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            op.encode(&mut out);
        }
        if self.in_text {
            Operator::EndText.encode(&mut out);
        }
        out
    }

    fn prepare(
        &self,
        operation: &'static str,
        text: &str,
    ) -> Result<(FontHandle, String, Vec<u8>)> {
        let font = self
            .state
            .font
            .ok_or(Error::NoActiveFont { operation })?;
        let expanded = text.replace('\t', &" ".repeat(TAB_WIDTH));
        let bytes = font.encode(&expanded)?;
        Ok((font, expanded, bytes))
    }
}
