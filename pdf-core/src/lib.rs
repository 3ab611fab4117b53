//! Assemble PDF documents from pages of text set in the standard
//! Type 1 fonts.
//!
//! ```no_run
//! use pdfscribe::Document;
//!
//! # fn main() -> pdfscribe::Result<()> {
//! let mut doc = Document::new();
//! doc.set_metadata("Title", "Hello")?;
//! let font = doc.find_font("Helvetica-Bold", "default")?;
//! doc.add_page(595.0, 842.0)?
//!     .set_text(&font, 18.0, 50.0, 700.0)?
//!     .show("Hello world!")?
//!     .continue_text("(says Rust)")?;
//! doc.save_to_path("hello.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod document;
pub mod encoding;
pub mod error;
pub mod fonts;
pub mod info;
pub mod objects;
pub mod page;
pub mod reader;
pub mod writer;

pub use content::{ContentStream, Operator, TextState};
pub use document::{Document, DocumentOptions};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use fonts::{BuiltinFont, FontHandle, FontMetrics, FontRegistry};
pub use info::{format_pdf_date, Info};
pub use objects::{ObjId, ObjectStore, PdfObject};
pub use page::Page;
pub use reader::{PdfReader, ReadError};
pub use writer::PdfWriter;
