use super::delimited::CsvSamples;
use super::types::Sample;
use super::xml::XmlSamples;
use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// On-disk flavours of a JTL log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Xml,
}

impl Format {
    /// An XML log starts with `<` (after an optional BOM and whitespace);
    /// a CSV log never does
    pub fn detect(head: &[u8]) -> Format {
        let head = head.strip_prefix(b"\xef\xbb\xbf").unwrap_or(head);
        match head.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(&b'<') => Format::Xml,
            _ => Format::Csv,
        }
    }
}

pub struct JtlReader;

impl JtlReader {
    /// Open a JTL file and return a lazy iterator over its samples
    pub fn from_path(path: &Path) -> Result<Samples<File>> {
        tracing::debug!("Reading JTL file from: {}", path.display());

        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Decode JTL rows from an in-memory string
    pub fn from_str(content: &str) -> Result<Samples<&[u8]>> {
        tracing::debug!("Parsing JTL from string");

        Self::from_reader(content.as_bytes())
    }

    /// Decode a JTL log from any reader, CSV or XML
    pub fn from_reader<R: Read>(reader: R) -> Result<Samples<R>> {
        let mut reader = BufReader::new(reader);
        let format = Format::detect(reader.fill_buf()?);

        tracing::debug!("Detected {:?} JTL log", format);

        let inner = match format {
            Format::Csv => Inner::Csv(CsvSamples::new(reader)?),
            Format::Xml => Inner::Xml(XmlSamples::new(reader)),
        };

        Ok(Samples { format, inner })
    }
}

/// Forward-only stream of decoded samples.
///
/// Yields one `Result` per sample; decoding errors do not end the stream,
/// callers decide whether to stop.
pub struct Samples<R> {
    format: Format,
    inner: Inner<R>,
}

enum Inner<R> {
    Csv(CsvSamples<BufReader<R>>),
    Xml(XmlSamples<BufReader<R>>),
}

impl<R> Samples<R> {
    pub fn format(&self) -> Format {
        self.format
    }
}

impl<R: Read> Iterator for Samples<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Csv(samples) => samples.next(),
            Inner::Xml(samples) => samples.next(),
        }
    }
}
