use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, Local};
use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::fonts::{FontHandle, FontRegistry};
use crate::info::Info;
use crate::objects::{ObjId, ObjectStore, PdfObject};
use crate::page::{Page, PageData};
use crate::writer::{deflate, PdfWriter};

/// Size of the page added when an empty document is saved.
const PLACEHOLDER_PAGE_SIZE: f64 = 100.0;

/// Settings that shape the produced file.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Write content streams with `/FlateDecode`.
    pub compress: bool,
    /// `/Producer` value unless overridden through metadata.
    pub producer: String,
    /// `save_to_path` writes a temporary file next to the target and
    /// renames it into place on success.
    pub atomic_save: bool,
    /// Fixed `/CreationDate`; the local clock at save time otherwise.
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        DocumentOptions {
            compress: false,
            producer: format!("pdfscribe {}", env!("CARGO_PKG_VERSION")),
            atomic_save: false,
            creation_date: None,
        }
    }
}

impl DocumentOptions {
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    pub fn with_atomic_save(mut self, atomic: bool) -> Self {
        self.atomic_save = atomic;
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.creation_date = Some(date);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentState {
    Open,
    Saved,
}

/// High-level API for building PDF documents.
///
/// Everything stays in memory until one of the `save*` methods runs;
/// that builds the page tree, catalog and info dictionary, writes the
/// file and closes the document for good.
#[derive(Debug)]
pub struct Document {
    options: DocumentOptions,
    store: ObjectStore,
    fonts: FontRegistry,
    pages: Vec<PageData>,
    info: Info,
    state: DocumentState,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_options(DocumentOptions::default())
    }

    pub fn with_options(options: DocumentOptions) -> Self {
        Document {
            options,
            store: ObjectStore::new(),
            fonts: FontRegistry::new(),
            pages: Vec::new(),
            info: Info::new(),
            state: DocumentState::Open,
        }
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn is_saved(&self) -> bool {
        self.state == DocumentState::Saved
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Objects allocated so far (fonts until save, everything after).
    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    /// Append a page of `width` x `height` points and return a handle
    /// to it.
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<Page<'_>> {
        self.ensure_open("add_page")?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidPageSize { width, height });
        }
        self.pages.push(PageData::new(width, height));
        let index = self.pages.len() - 1;
        debug!("page {} added ({} x {})", index + 1, width, height);
        Ok(self.page_handle(index))
    }

    /// Handle to an existing page, for adding more content.
    pub fn page(&mut self, index: usize) -> Result<Page<'_>> {
        self.ensure_open("page")?;
        if index >= self.pages.len() {
            return Err(Error::PageNotFound(index));
        }
        Ok(self.page_handle(index))
    }

    /// Resolve a standard font; see [`FontRegistry::resolve`].
    pub fn find_font(&mut self, name: &str, encoding: &str) -> Result<FontHandle> {
        self.ensure_open("find_font")?;
        self.fonts.resolve(&mut self.store, name, encoding)
    }

    /// Set an Info entry. Any non-empty key is accepted; the last
    /// value set for a key wins.
    pub fn set_metadata(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_open("set_metadata")?;
        if key.is_empty() {
            return Err(Error::invalid("set_metadata", "metadata key is empty"));
        }
        self.info.set(key, value);
        Ok(())
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.info.get(key)
    }

    /// Fix the creation timestamp instead of reading the clock at save.
    pub fn set_creation_date(&mut self, date: DateTime<FixedOffset>) -> Result<()> {
        self.ensure_open("set_creation_date")?;
        self.options.creation_date = Some(date);
        Ok(())
    }

    /// Serialize to an in-memory buffer.
    pub fn save(&mut self) -> Result<Vec<u8>> {
        self.save_to_writer(Vec::new())
    }

    /// Serialize to any writer and hand it back flushed.
    pub fn save_to_writer<W: Write>(&mut self, writer: W) -> Result<W> {
        self.ensure_open("save")?;
        self.state = DocumentState::Saved;
        let (root_id, info_id) = self.assemble()?;
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_document(&self.store, root_id, Some(info_id))?;
        Ok(pdf_writer.into_inner()?)
    }

    /// Serialize to a file. If the file cannot be created the document
    /// stays open; once writing has started it is closed whatever the
    /// outcome.
    pub fn save_to_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.ensure_open("save_to_path")?;
        let path = path.as_ref();
        if self.options.atomic_save {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let tmp = NamedTempFile::new_in(dir)?;
            let mut writer = BufWriter::new(tmp);
            self.save_to_writer(&mut writer)?;
            let tmp = writer.into_inner().map_err(|e| e.into_error())?;
            tmp.persist(path).map_err(|e| e.error)?;
        } else {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            self.save_to_writer(&mut writer)?;
        }
        debug!("saved {}", path.display());
        Ok(())
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        match self.state {
            DocumentState::Open => Ok(()),
            DocumentState::Saved => Err(Error::DocumentClosed { operation }),
        }
    }

    fn page_handle(&mut self, index: usize) -> Page<'_> {
        let Document {
            pages, fonts, store, ..
        } = self;
        Page {
            index,
            data: &mut pages[index],
            fonts,
            store,
        }
    }

    /// Allocate pages, content streams, the pages tree, info and
    /// catalog. Returns (catalog, info).
    fn assemble(&mut self) -> Result<(ObjId, ObjId)> {
        if self.pages.is_empty() {
            warn!("document has no pages; adding a blank page");
            self.pages
                .push(PageData::new(PLACEHOLDER_PAGE_SIZE, PLACEHOLDER_PAGE_SIZE));
        }

        let Document {
            options,
            store,
            fonts,
            pages,
            info,
            ..
        } = self;

        let pages_id = store.reserve();
        let mut kids = Vec::with_capacity(pages.len());
        for page in pages.iter() {
            let data = page.content.to_bytes();
            let stream = if options.compress {
                PdfObject::stream(
                    vec![("Filter", PdfObject::name("FlateDecode"))],
                    deflate(&data)?,
                )
            } else {
                PdfObject::stream(vec![], data)
            };
            let content_id = store.allocate(stream);

            let mut resources = Vec::new();
            if !page.fonts.is_empty() {
                let entries = page
                    .fonts
                    .iter()
                    .map(|(n, id)| (format!("F{}", n), PdfObject::Reference(*id)))
                    .collect();
                resources.push(("Font", PdfObject::Dictionary(entries)));
            }
            resources.push((
                "ProcSet",
                PdfObject::array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
            ));

            let page_dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PdfObject::Reference(pages_id)),
                (
                    "MediaBox",
                    PdfObject::array(vec![
                        PdfObject::Integer(0),
                        PdfObject::Integer(0),
                        PdfObject::Real(page.width),
                        PdfObject::Real(page.height),
                    ]),
                ),
                ("Resources", PdfObject::dict(resources)),
                ("Contents", PdfObject::Reference(content_id)),
            ]);
            kids.push(PdfObject::Reference(store.allocate(page_dict)));
        }

        let first_page = kids[0].clone();
        let page_count = kids.len() as i64;
        store.set(
            pages_id,
            PdfObject::dict(vec![
                ("Type", PdfObject::name("Pages")),
                ("Kids", PdfObject::Array(kids)),
                ("Count", PdfObject::Integer(page_count)),
            ]),
        )?;

        let now: DateTime<FixedOffset> = match options.creation_date {
            Some(date) => date,
            None => Local::now().into(),
        };
        let info_id = store.allocate(info.to_object(&options.producer, &now));

        let catalog_id = store.allocate(PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(pages_id)),
            (
                "OpenAction",
                PdfObject::array(vec![first_page, PdfObject::name("Fit")]),
            ),
        ]));

        debug!(
            "assembled {} pages, {} fonts, {} objects",
            page_count,
            fonts.len(),
            store.len()
        );
        Ok((catalog_id, info_id))
    }
}
