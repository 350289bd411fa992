use super::field;
use super::types::Sample;
use crate::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

/// Samples from an XML flavoured JTL log
/// (`jmeter.save.saveservice.output_format=xml`).
///
/// Only top-level `<httpSample>` / `<sample>` elements are yielded; the
/// sub-samples a transaction controller nests inside them are skipped.
pub(super) struct XmlSamples<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    done: bool,
}

impl<R: BufRead> XmlSamples<R> {
    pub(super) fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        Self {
            reader,
            buf: Vec::new(),
            depth: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for XmlSamples<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            let position = self.reader.buffer_position() as u64;

            match event {
                Event::Start(start) if is_sample(start.name().as_ref()) => {
                    self.depth += 1;
                    if self.depth == 1 {
                        return Some(decode(&start, position));
                    }
                }
                Event::Empty(start) if is_sample(start.name().as_ref()) => {
                    if self.depth == 0 {
                        return Some(decode(&start, position));
                    }
                }
                Event::End(end) if is_sample(end.name().as_ref()) => {
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Eof => {
                    self.done = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

fn is_sample(name: &[u8]) -> bool {
    matches!(name, b"httpSample" | b"sample")
}

fn decode(start: &BytesStart, position: u64) -> Result<Sample> {
    let mut sample = Sample::default();
    let mut seen_elapsed = false;
    let mut seen_success = false;

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?;
        let value = value.as_ref();
        let attribute = Attribute {
            position,
            name: attr.key.as_ref(),
            value,
        };

        match attr.key.as_ref() {
            b"t" => {
                sample.elapsed = attribute.decode(field::required_millis)?;
                seen_elapsed = true;
            }
            b"s" => {
                sample.success = attribute.decode(field::boolean)?;
                seen_success = true;
            }
            b"ts" => sample.timestamp = value.to_string(),
            b"lb" => sample.label = value.to_string(),
            b"rc" => sample.response_code = value.to_string(),
            b"rm" => sample.response_message = value.to_string(),
            b"tn" => sample.thread_name = value.to_string(),
            b"dt" => sample.data_type = value.to_string(),
            b"de" => sample.encoding = value.to_string(),
            b"hn" => sample.hostname = value.to_string(),
            b"by" => sample.bytes = attribute.decode(field::number)?,
            b"sby" => sample.sent_bytes = attribute.decode(field::number)?,
            b"ng" => sample.group_threads = attribute.decode(field::number)?,
            b"na" => sample.all_threads = attribute.decode(field::number)?,
            b"lt" => sample.latency = attribute.decode(field::millis)?,
            b"ct" => sample.connect = attribute.decode(field::millis)?,
            b"it" => sample.idle_time = attribute.decode(field::millis)?,
            b"sc" => sample.sample_count = attribute.decode(field::sample_count)?,
            b"ec" => sample.error_count = attribute.decode(field::number)?,
            _ => {}
        }
    }

    if !seen_elapsed {
        return Err(invalid(position, b"t", ""));
    }
    if !seen_success {
        return Err(invalid(position, b"s", ""));
    }

    Ok(sample)
}

struct Attribute<'a> {
    position: u64,
    name: &'a [u8],
    value: &'a str,
}

impl Attribute<'_> {
    fn decode<T>(&self, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        parse(self.value).ok_or_else(|| invalid(self.position, self.name, self.value))
    }
}

fn invalid(position: u64, name: &[u8], value: &str) -> Error {
    Error::InvalidAttribute {
        position,
        attribute: String::from_utf8_lossy(name).into_owned(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn collect(content: &str) -> Result<Vec<Sample>> {
        XmlSamples::new(content.as_bytes()).collect()
    }

    #[test]
    fn test_parse_samples() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<testResults version="1.2">
<httpSample t="120" it="0" lt="110" ct="15" ts="1700000000000" s="true" lb="Home" rc="200" rm="OK" tn="Users 1-1" dt="text" by="1024" sby="256" sc="1" ec="0" ng="1" na="1" hn="loadgen-01">
  <java.net.URL>http://example.com/</java.net.URL>
</httpSample>
<httpSample t="340" ts="1700000000500" s="false" lb="Login &amp; Redirect" rc="500" rm="Server Error" sc="2" ec="2"/>
</testResults>
"#;

        let samples = collect(content).unwrap();
        assert_eq!(samples.len(), 2);

        let first = &samples[0];
        assert_eq!(first.elapsed, Duration::from_millis(120));
        assert_eq!(first.latency, Duration::from_millis(110));
        assert_eq!(first.connect, Duration::from_millis(15));
        assert_eq!(first.timestamp, "1700000000000");
        assert!(first.success);
        assert_eq!(first.label, "Home");
        assert_eq!(first.response_code, "200");
        assert_eq!(first.thread_name, "Users 1-1");
        assert_eq!(first.bytes, 1024);
        assert_eq!(first.sent_bytes, 256);
        assert_eq!(first.hostname, "loadgen-01");

        let second = &samples[1];
        assert!(!second.success);
        assert_eq!(second.label, "Login & Redirect");
        assert_eq!(second.sample_count, 2);
        assert_eq!(second.error_count, 2);
    }

    #[test]
    fn test_nested_sub_samples_are_skipped() {
        let content = r#"<?xml version="1.0"?>
<testResults version="1.2">
<sample t="300" s="true" lb="Checkout" rc="200" sc="1">
  <httpSample t="100" s="true" lb="Cart" rc="200"/>
  <httpSample t="200" s="true" lb="Pay" rc="200">
    <responseData class="java.lang.String">ok</responseData>
  </httpSample>
</sample>
<httpSample t="50" s="true" lb="Home" rc="200"/>
</testResults>
"#;

        let samples = collect(content).unwrap();
        let labels: Vec<_> = samples.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Checkout", "Home"]);
    }

    #[test]
    fn test_missing_sample_count_defaults_to_one() {
        let samples = collect(r#"<testResults><httpSample t="5" s="true"/></testResults>"#).unwrap();
        assert_eq!(samples[0].sample_count, 1);
    }

    #[test]
    fn test_invalid_attribute() {
        let result = collect(r#"<testResults><httpSample t="slow" s="true"/></testResults>"#);
        match result {
            Err(Error::InvalidAttribute {
                attribute, value, ..
            }) => {
                assert_eq!(attribute, "t");
                assert_eq!(value, "slow");
            }
            other => panic!("expected InvalidAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_success_attribute() {
        let result = collect(r#"<testResults><httpSample t="5" rc="200"/></testResults>"#);
        assert!(
            matches!(result, Err(Error::InvalidAttribute { ref attribute, .. }) if attribute == "s")
        );
    }

    #[test]
    fn test_malformed_xml() {
        let result = collect("<testResults><httpSample t=\"5\" s=\"true\"></sample></testResults>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_no_samples() {
        let content = "<?xml version=\"1.0\"?>\n<testResults version=\"1.2\">\n</testResults>\n";
        assert!(collect(content).unwrap().is_empty());
    }
}
