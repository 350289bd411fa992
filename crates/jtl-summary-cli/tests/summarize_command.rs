use jtl_summary_core::TestSummary;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Test that summarize_file reads a JTL file and returns the summary document
#[test]
fn test_summarize_file_returns_summary() {
    // Arrange
    let fixture_path = fixture("sample.jtl");

    // Act
    let result =
        jtl_summary_cli::commands::publish::summarize_file(&fixture_path, "release-1.4.0", true);

    // Assert
    assert!(result.is_ok(), "Should successfully summarize JTL file");

    let summary: TestSummary = result.unwrap();
    assert_eq!(summary.samples, 3);
    assert_eq!(summary.successes, 2);
    assert_eq!(summary.invalid_resp_code, 2);
    assert_eq!(summary.sample_count_sum, 4);
    assert_eq!(summary.avg_resp_time, 150.0);
    assert_eq!(summary.min_resp_time, 100.0);
    assert_eq!(summary.max_resp_time, 200.0);
    assert!(summary.passed);
    assert_eq!(summary.build_name, "release-1.4.0");
}

/// Test that files written without a header row use JMeter's default columns
#[test]
fn test_summarize_headerless_file() {
    let summary = jtl_summary_cli::commands::publish::summarize_file(
        &fixture("headerless.jtl"),
        "smoke",
        false,
    )
    .unwrap();

    assert_eq!(summary.samples, 2);
    assert_eq!(summary.successes, 2);
    assert_eq!(summary.invalid_resp_code, 0);
    assert_eq!(summary.sample_count_sum, 2);
    assert_eq!(summary.avg_resp_time, 50.0);
    assert!(!summary.passed);
}

/// Test that a log with a header but no rows is an error, not a zeroed summary
#[test]
fn test_summarize_empty_file_fails() {
    let result =
        jtl_summary_cli::commands::publish::summarize_file(&fixture("empty.jtl"), "b", true);

    let err = result.unwrap_err();
    let core_err = err
        .downcast_ref::<jtl_summary_core::Error>()
        .expect("core error should be preserved");
    assert!(matches!(core_err, jtl_summary_core::Error::EmptyInput));
    assert!(!core_err.is_parse_error());
}

/// Test that decoding errors abort the summary
#[test]
fn test_summarize_malformed_file_fails() {
    let result =
        jtl_summary_cli::commands::publish::summarize_file(&fixture("malformed.jtl"), "b", true);

    let err = result.unwrap_err();
    let core_err = err.downcast_ref::<jtl_summary_core::Error>().unwrap();
    assert!(core_err.is_parse_error());
    assert!(core_err.to_string().contains("line 3"));
}

/// Test that XML flavoured logs summarize the same as their CSV counterpart
#[test]
fn test_summarize_xml_file_matches_csv() {
    let xml = jtl_summary_cli::commands::publish::summarize_file(
        &fixture("sample-xml.jtl"),
        "release-1.4.0",
        true,
    )
    .unwrap();
    let csv = jtl_summary_cli::commands::publish::summarize_file(
        &fixture("sample.jtl"),
        "release-1.4.0",
        true,
    )
    .unwrap();

    // Sub-samples nested under the transaction are not counted again
    assert_eq!(xml.samples, 3);
    assert_eq!(xml, csv);
}

/// Test that a header without timeStamp (save.timestamp=false) is still a header
#[test]
fn test_summarize_file_without_timestamp_column() {
    // Arrange
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "elapsed,label,responseCode,success,SampleCount\n\
         40,GET /,200,true,10\n\
         80,GET /,503,false,10"
    )
    .unwrap();

    // Act
    let summary =
        jtl_summary_cli::commands::publish::summarize_file(file.path(), "no-ts", true).unwrap();

    // Assert
    assert_eq!(summary.samples, 2);
    assert_eq!(summary.sample_count_sum, 20);
    assert_eq!(summary.successes, 1);
    assert_eq!(summary.invalid_resp_code, 1);
    assert_eq!(summary.avg_resp_time, 60.0);
}
