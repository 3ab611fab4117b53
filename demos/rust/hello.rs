/// Hello world: one A4 page with two lines of Helvetica-Bold.
///
/// Run with:
///   cargo run --example hello -p pdfscribe-demos [output.pdf]
///
/// Exit status is 2 when the output file cannot be written and 3 when
/// the font cannot be set up.
use std::process::ExitCode;

use log::info;
use pdfscribe::{Document, DocumentOptions};

const A4_WIDTH: f64 = 595.0;
const A4_HEIGHT: f64 = 842.0;

fn run(path: &str) -> pdfscribe::Result<()> {
    let mut doc = Document::with_options(DocumentOptions::default().with_atomic_save(true));
    doc.set_metadata("Creator", "hello.rs")?;
    doc.set_metadata("Author", "Thomas Merz")?;
    doc.set_metadata("Title", "Hello, world (Rust)!")?;

    let font = doc.find_font("Helvetica-Bold", "default")?;
    doc.add_page(A4_WIDTH, A4_HEIGHT)?
        .set_text(&font, 18.0, 50.0, 700.0)?
        .show("Hello world!")?
        .continue_text("(says Rust)")?;

    doc.save_to_path(path)?;
    info!("wrote {}", path);
    Ok(())
}

fn main() -> ExitCode {
    pdfscribe_demos::init_logging();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hello_rust.pdf".to_string());
    pdfscribe_demos::finish(run(&path))
}
