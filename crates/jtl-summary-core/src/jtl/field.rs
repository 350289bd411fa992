use std::str::FromStr;
use std::time::Duration;

// Cell/attribute decoding shared by the CSV and XML formats. `None` means
// the text is not a valid value; empty text decodes to the default.

pub(super) fn number<T: FromStr + Default>(value: &str) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(T::default());
    }
    trimmed.parse().ok()
}

pub(super) fn millis(value: &str) -> Option<Duration> {
    number::<u64>(value).map(Duration::from_millis)
}

/// Elapsed time may not be left blank
pub(super) fn required_millis(value: &str) -> Option<Duration> {
    if value.trim().is_empty() {
        return None;
    }
    millis(value)
}

pub(super) fn boolean(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// `SampleCount` / `sc` left blank means a single sample
pub(super) fn sample_count(value: &str) -> Option<u64> {
    if value.trim().is_empty() {
        return Some(1);
    }
    number(value)
}
