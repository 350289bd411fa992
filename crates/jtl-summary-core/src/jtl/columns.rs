/// Standard JTL columns written by JMeter's CSV result saver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TimeStamp,
    Elapsed,
    Label,
    ResponseCode,
    ResponseMessage,
    ThreadName,
    DataType,
    Success,
    FailureMessage,
    Bytes,
    SentBytes,
    GrpThreads,
    AllThreads,
    Url,
    Filename,
    Latency,
    Connect,
    Encoding,
    SampleCount,
    ErrorCount,
    Hostname,
    IdleTime,
}

impl Column {
    /// Column order JMeter uses when `jmeter.save.saveservice.print_field_names`
    /// is off and the default field selection is in effect
    pub const DEFAULT_ORDER: [Column; 17] = [
        Column::TimeStamp,
        Column::Elapsed,
        Column::Label,
        Column::ResponseCode,
        Column::ResponseMessage,
        Column::ThreadName,
        Column::DataType,
        Column::Success,
        Column::FailureMessage,
        Column::Bytes,
        Column::SentBytes,
        Column::GrpThreads,
        Column::AllThreads,
        Column::Url,
        Column::Latency,
        Column::IdleTime,
        Column::Connect,
    ];

    /// Columns a row cannot be summarized without
    pub const REQUIRED: [Column; 2] = [Column::Elapsed, Column::Success];

    pub fn name(&self) -> &'static str {
        match self {
            Column::TimeStamp => "timeStamp",
            Column::Elapsed => "elapsed",
            Column::Label => "label",
            Column::ResponseCode => "responseCode",
            Column::ResponseMessage => "responseMessage",
            Column::ThreadName => "threadName",
            Column::DataType => "dataType",
            Column::Success => "success",
            Column::FailureMessage => "failureMessage",
            Column::Bytes => "bytes",
            Column::SentBytes => "sentBytes",
            Column::GrpThreads => "grpThreads",
            Column::AllThreads => "allThreads",
            Column::Url => "URL",
            Column::Filename => "Filename",
            Column::Latency => "Latency",
            Column::Connect => "Connect",
            Column::Encoding => "Encoding",
            Column::SampleCount => "SampleCount",
            Column::ErrorCount => "ErrorCount",
            Column::Hostname => "Hostname",
            Column::IdleTime => "IdleTime",
        }
    }

    /// Resolve a header cell to a standard column. Anything else is a
    /// sample variable.
    pub fn from_header(name: &str) -> Option<Column> {
        let column = match name {
            "timeStamp" => Column::TimeStamp,
            "elapsed" => Column::Elapsed,
            "label" => Column::Label,
            "responseCode" => Column::ResponseCode,
            "responseMessage" => Column::ResponseMessage,
            "threadName" => Column::ThreadName,
            "dataType" => Column::DataType,
            "success" => Column::Success,
            "failureMessage" => Column::FailureMessage,
            "bytes" => Column::Bytes,
            "sentBytes" => Column::SentBytes,
            "grpThreads" => Column::GrpThreads,
            "allThreads" => Column::AllThreads,
            "URL" => Column::Url,
            "Filename" => Column::Filename,
            "Latency" => Column::Latency,
            "Connect" => Column::Connect,
            "Encoding" => Column::Encoding,
            "SampleCount" => Column::SampleCount,
            "ErrorCount" => Column::ErrorCount,
            "Hostname" => Column::Hostname,
            "IdleTime" => Column::IdleTime,
            _ => return None,
        };
        Some(column)
    }
}
