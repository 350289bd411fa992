use crate::OutputFormat;
use anyhow::{Context, Result, anyhow};
use jtl_summary_core::TestSummary;
use jtl_summary_elastic::{DEFAULT_INDEX, ElasticClient, Endpoint};
use std::path::{Path, PathBuf};

/// Everything one invocation needs, as resolved from the command line
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub build_name: String,
    pub passed: bool,
    pub file: PathBuf,
    pub host: Option<String>,
    pub port: u16,
    pub doc_type: String,
    pub dry_run: bool,
    pub format: OutputFormat,
}

/// Summarize a JTL file. The file is scanned exactly once.
pub fn summarize_file(file: &Path, build_name: &str, passed: bool) -> Result<TestSummary> {
    tracing::debug!("Summarizing JTL file: {}", file.display());

    let summary = jtl_summary_core::summarize(build_name, passed, file)
        .with_context(|| format!("Failed to summarize {}", file.display()))?;

    Ok(summary)
}

pub fn execute(options: &PublishOptions) -> Result<()> {
    tracing::info!(
        "Summarizing {} for build {}",
        options.file.display(),
        options.build_name
    );

    // Nothing is written unless the whole file summarized cleanly
    let summary = summarize_file(&options.file, &options.build_name, options.passed)?;

    tracing::debug!("Rendering summary as {}", options.format.as_str());
    match options.format {
        OutputFormat::Json => output_json(&summary)?,
        OutputFormat::Pretty => output_pretty(&summary),
    }

    if options.dry_run {
        tracing::info!("Dry run, not publishing to Elasticsearch");
        return Ok(());
    }

    let host = options
        .host
        .as_deref()
        .ok_or_else(|| anyhow!("--elasticsearchHost is required unless --dry-run is set"))?;
    let endpoint = Endpoint::new(host, options.port)?;
    let client = ElasticClient::new(endpoint);

    let runtime = tokio::runtime::Runtime::new()?;
    let response = runtime
        .block_on(async { client.index(DEFAULT_INDEX, &options.doc_type, &summary).await })
        .with_context(|| {
            format!(
                "Failed to publish summary to {}",
                client.endpoint().base_url()
            )
        })?;

    tracing::info!(
        "Published summary for build {} ({})",
        summary.build_name,
        response.result.as_deref().unwrap_or("indexed")
    );

    Ok(())
}

fn output_json(summary: &TestSummary) -> Result<()> {
    let json = serde_json::to_string(summary)?;
    println!("{}", json);
    Ok(())
}

fn output_pretty(summary: &TestSummary) {
    use console::style;

    let verdict = if summary.passed {
        style("PASSED").green().bold()
    } else {
        style("FAILED").red().bold()
    };

    println!("\n{}", style("JTL Test Summary").bold().cyan());
    println!("{}", style("================").cyan());
    println!("  Build:              {} ({})", summary.build_name, verdict);
    println!("  Samples:            {}", summary.samples);
    println!("  Sample Count Sum:   {}", summary.sample_count_sum);
    println!("  Successes:          {}", summary.successes);
    println!("  Invalid Resp Codes: {}", summary.invalid_resp_code);

    println!("\n{}", style("Response Times:").bold());
    println!("  Average:  {:.2} ms", summary.avg_resp_time);
    println!("  Min:      {:.2} ms", summary.min_resp_time);
    println!("  Max:      {:.2} ms", summary.max_resp_time);

    println!(); // trailing newline
}
