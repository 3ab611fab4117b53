/// Several pages exercising fonts, encodings and the text state.
///
/// Run with:
///   RUST_LOG=debug cargo run --example multi_page -p pdfscribe-demos
///
/// Opens output at: output/multi_page.pdf
use std::process::ExitCode;

use log::info;
use pdfscribe::{BuiltinFont, Document, DocumentOptions};

const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 72.0;

fn run() -> pdfscribe::Result<()> {
    std::fs::create_dir_all("output")?;
    let path = "output/multi_page.pdf";

    let mut doc = Document::with_options(DocumentOptions::default().with_compression(true));
    doc.set_metadata("Title", "Standard fonts")?;
    doc.set_metadata("Creator", "multi_page.rs")?;
    doc.set_metadata("Subject", "Übersicht der Standardschriften")?;

    // ── Page 1: every text font ──────────────────────────────────────────────
    let heading = doc.find_font("Helvetica-Bold", "default")?;
    let mut page = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT)?;
    page.set_text(&heading, 20.0, MARGIN, PAGE_HEIGHT - MARGIN)?
        .show("The standard Type 1 fonts")?;
    let mut y = PAGE_HEIGHT - MARGIN - 40.0;
    for font in BuiltinFont::ALL.iter().filter(|f| !f.is_symbolic()) {
        let name = font.base_name();
        let handle = page.find_font(name, "winansi")?;
        page.set_text(&handle, 12.0, MARGIN, y)?
            .show(&format!("{}: Grüße, naïve café", name))?;
        y -= 20.0;
    }

    // ── Page 2: text state operators ─────────────────────────────────────────
    let body = doc.find_font("Times-Roman", "macroman")?;
    let mut page = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT)?;
    page.set_text(&body, 14.0, MARGIN, PAGE_HEIGHT - MARGIN)?
        .set_leading(22.0)?
        .show("Normal text, leading 22")?
        .set_char_spacing(2.0)?
        .continue_text("Character spacing 2")?
        .set_char_spacing(0.0)?
        .set_word_spacing(8.0)?
        .continue_text("Word spacing eight points")?
        .set_word_spacing(0.0)?
        .set_horiz_scaling(60.0)?
        .continue_text("Horizontal scaling 60%")?
        .set_horiz_scaling(100.0)?
        .set_text_rendering(1)?
        .continue_text("Outlined glyphs")?
        .set_text_rendering(0)?
        .show_xy("Raised", MARGIN, 500.0)?
        .set_text_rise(6.0)?
        .show(" superscript")?;
    let width = page.string_width("Raised superscript", &body, 14.0);
    info!("page 2 sample line is {:.1}pt wide", width);

    // ── Page 3: a symbolic font in its own encoding ──────────────────────────
    let dingbats = doc.find_font("ZapfDingbats", "builtin")?;
    doc.add_page(PAGE_WIDTH, PAGE_HEIGHT / 2.0)?
        .set_text(&dingbats, 24.0, MARGIN, 300.0)?
        .show("3456789")?;

    doc.save_to_path(path)?;
    info!("wrote {} ({} pages)", path, doc.page_count());
    Ok(())
}

fn main() -> ExitCode {
    pdfscribe_demos::init_logging();
    pdfscribe_demos::finish(run())
}
