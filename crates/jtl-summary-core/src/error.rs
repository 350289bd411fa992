use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read JTL file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JTL file: {0}")]
    Csv(#[from] csv::Error),

    #[error("JTL header is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid value {value:?} for column '{column}' on line {line}")]
    InvalidField {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Failed to parse XML JTL file: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid value {value:?} for attribute '{attribute}' near byte {position}")]
    InvalidAttribute {
        position: u64,
        attribute: String,
        value: String,
    },

    #[error("JTL file contains no samples")]
    EmptyInput,
}

impl Error {
    /// True for failures raised while opening or decoding the log
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Error::EmptyInput)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
