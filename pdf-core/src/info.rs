//! Document information dictionary.

use chrono::{DateTime, Offset, TimeZone};
use indexmap::IndexMap;

use crate::objects::PdfObject;

/// Metadata for the `/Info` dictionary.
///
/// The canonical keys have dedicated slots and are written first in a
/// fixed order; any other key is kept in first-insertion order.
/// Setting a key again replaces its value.
#[derive(Debug, Clone, Default)]
pub struct Info {
    title: Option<String>,
    author: Option<String>,
    subject: Option<String>,
    keywords: Option<String>,
    creator: Option<String>,
    producer: Option<String>,
    creation_date: Option<String>,
    custom: IndexMap<String, String>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        let value = value.to_string();
        match key {
            "Title" => self.title = Some(value),
            "Author" => self.author = Some(value),
            "Subject" => self.subject = Some(value),
            "Keywords" => self.keywords = Some(value),
            "Creator" => self.creator = Some(value),
            "Producer" => self.producer = Some(value),
            "CreationDate" => self.creation_date = Some(value),
            _ => {
                self.custom.insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "Title" => self.title.as_deref(),
            "Author" => self.author.as_deref(),
            "Subject" => self.subject.as_deref(),
            "Keywords" => self.keywords.as_deref(),
            "Creator" => self.creator.as_deref(),
            "Producer" => self.producer.as_deref(),
            "CreationDate" => self.creation_date.as_deref(),
            _ => self.custom.get(key).map(String::as_str),
        }
    }

    /// Build the dictionary. `default_producer` and `now` fill
    /// Producer and CreationDate when they were not set explicitly.
    pub fn to_object<Tz: TimeZone>(
        &self,
        default_producer: &str,
        now: &DateTime<Tz>,
    ) -> PdfObject {
        let mut entries: Vec<(&str, PdfObject)> = Vec::new();
        let canonical = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
        ];
        for (key, value) in canonical {
            if let Some(v) = value {
                entries.push((key, PdfObject::text_string(v)));
            }
        }
        for (key, value) in &self.custom {
            entries.push((key.as_str(), PdfObject::text_string(value)));
        }
        let producer = self.producer.as_deref().unwrap_or(default_producer);
        entries.push(("Producer", PdfObject::text_string(producer)));
        let date = self
            .creation_date
            .clone()
            .unwrap_or_else(|| format_pdf_date(now));
        entries.push(("CreationDate", PdfObject::literal_string(&date)));
        PdfObject::dict(entries)
    }
}

/// Format a timestamp as a PDF date string: `D:YYYYMMDDHHmmSS+HH'mm'`.
pub fn format_pdf_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let offset = dt.offset().fix().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.abs() / 60;
    format!(
        "D:{}{}{:02}'{:02}'",
        dt.naive_local().format("%Y%m%d%H%M%S"),
        sign,
        minutes / 60,
        minutes % 60
    )
}
