mod columns;
mod delimited;
mod field;
mod reader;
mod types;
mod xml;

pub use columns::Column;
pub use reader::{Format, JtlReader, Samples};
pub use types::Sample;
