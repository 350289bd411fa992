use super::columns::Column;
use super::field;
use super::types::Sample;
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;

/// Samples from a CSV flavoured JTL log
pub(super) struct CsvSamples<R> {
    records: StringRecordsIntoIter<R>,
    layout: Layout,
    pending: Option<StringRecord>,
}

impl<R: Read> CsvSamples<R> {
    /// The first row is consumed eagerly to decide whether the log carries
    /// a header; everything after it is read on demand.
    pub(super) fn new(reader: R) -> Result<Self> {
        let mut records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        let (layout, pending) = match records.next() {
            Some(first) => {
                let first = first?;
                if is_header(&first) {
                    (Layout::from_header(&first)?, None)
                } else {
                    tracing::debug!("JTL has no header row, assuming default column order");
                    (Layout::default_order(), Some(first))
                }
            }
            None => (Layout::default_order(), None),
        };

        Ok(Self {
            records,
            layout,
            pending,
        })
    }
}

impl<R: Read> Iterator for CsvSamples<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.pending.take() {
            Some(record) => record,
            None => match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            },
        };

        Some(self.layout.decode(&record))
    }
}

/// A row naming any standard column is a header. Data rows carry numbers,
/// booleans and free text, never JMeter's column names.
fn is_header(record: &StringRecord) -> bool {
    record
        .iter()
        .any(|cell| Column::from_header(strip_bom(cell)).is_some())
}

fn strip_bom(cell: &str) -> &str {
    cell.trim_start_matches('\u{feff}')
}

#[derive(Debug, Clone)]
enum Slot {
    Column(Column),
    Variable(String),
}

/// Maps cell positions to sample fields
#[derive(Debug, Clone)]
struct Layout {
    slots: Vec<Slot>,
}

impl Layout {
    fn default_order() -> Self {
        Self {
            slots: Column::DEFAULT_ORDER.into_iter().map(Slot::Column).collect(),
        }
    }

    fn from_header(header: &StringRecord) -> Result<Self> {
        let slots: Vec<Slot> = header
            .iter()
            .map(|name| {
                let name = strip_bom(name);
                match Column::from_header(name) {
                    Some(column) => Slot::Column(column),
                    None => Slot::Variable(name.to_string()),
                }
            })
            .collect();

        for required in Column::REQUIRED {
            let present = slots
                .iter()
                .any(|slot| matches!(slot, Slot::Column(column) if *column == required));
            if !present {
                return Err(Error::MissingColumn(required.name().to_string()));
            }
        }

        tracing::debug!("JTL header has {} columns", slots.len());

        Ok(Self { slots })
    }

    fn decode(&self, record: &StringRecord) -> Result<Sample> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut sample = Sample::default();
        let mut seen_elapsed = false;
        let mut seen_success = false;

        for (slot, value) in self.slots.iter().zip(record.iter()) {
            let column = match slot {
                Slot::Variable(name) => {
                    sample.variables.push((name.clone(), value.to_string()));
                    continue;
                }
                Slot::Column(column) => *column,
            };
            let cell = Cell {
                line,
                column,
                value,
            };

            match column {
                Column::TimeStamp => sample.timestamp = value.to_string(),
                Column::Elapsed => {
                    sample.elapsed = cell.decode(field::required_millis)?;
                    seen_elapsed = true;
                }
                Column::Label => sample.label = value.to_string(),
                Column::ResponseCode => sample.response_code = value.to_string(),
                Column::ResponseMessage => sample.response_message = value.to_string(),
                Column::ThreadName => sample.thread_name = value.to_string(),
                Column::DataType => sample.data_type = value.to_string(),
                Column::Success => {
                    sample.success = cell.decode(field::boolean)?;
                    seen_success = true;
                }
                Column::FailureMessage => sample.failure_message = value.to_string(),
                Column::Bytes => sample.bytes = cell.decode(field::number)?,
                Column::SentBytes => sample.sent_bytes = cell.decode(field::number)?,
                Column::GrpThreads => sample.group_threads = cell.decode(field::number)?,
                Column::AllThreads => sample.all_threads = cell.decode(field::number)?,
                Column::Url => sample.url = value.to_string(),
                Column::Filename => sample.filename = value.to_string(),
                Column::Latency => sample.latency = cell.decode(field::millis)?,
                Column::Connect => sample.connect = cell.decode(field::millis)?,
                Column::Encoding => sample.encoding = value.to_string(),
                Column::SampleCount => sample.sample_count = cell.decode(field::sample_count)?,
                Column::ErrorCount => sample.error_count = cell.decode(field::number)?,
                Column::Hostname => sample.hostname = value.to_string(),
                Column::IdleTime => sample.idle_time = cell.decode(field::millis)?,
            }
        }

        // Short rows: a required cell that never showed up
        if !seen_elapsed {
            return Err(invalid(line, Column::Elapsed, ""));
        }
        if !seen_success {
            return Err(invalid(line, Column::Success, ""));
        }

        Ok(sample)
    }
}

struct Cell<'a> {
    line: u64,
    column: Column,
    value: &'a str,
}

impl Cell<'_> {
    fn decode<T>(&self, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        parse(self.value).ok_or_else(|| invalid(self.line, self.column, self.value))
    }
}

fn invalid(line: u64, column: Column, value: &str) -> Error {
    Error::InvalidField {
        line,
        column: column.name().to_string(),
        value: value.to_string(),
    }
}
