use anyhow::Result;
use clap::{ArgAction, Parser};
use jtl_summary_cli::OutputFormat;
use jtl_summary_cli::commands::publish::{self, PublishOptions};
use jtl_summary_elastic::{DEFAULT_DOC_TYPE, DEFAULT_PORT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jtl-summary")]
#[command(author, version)]
#[command(
    about = "Summarize a JMeter JTL log and index the summary into Elasticsearch",
    long_about = "jtl-summary scans a JMeter result log once, computes sample, success, \
                  response code and response time totals, prints the summary document \
                  and writes it to the 'jmeter' index of an Elasticsearch cluster."
)]
struct Cli {
    /// Build identifier stored with the summary
    #[arg(long = "buildName", value_name = "NAME")]
    build_name: String,

    /// Whether the test run passed (true or false)
    #[arg(long, value_name = "BOOL", required = true, action = ArgAction::Set)]
    passed: bool,

    /// Path to the JTL file
    #[arg(long, value_name = "FILE")]
    file: PathBuf,

    /// Elasticsearch host, optionally with http:// scheme and port
    #[arg(
        long = "elasticsearchHost",
        value_name = "HOST",
        required_unless_present = "dry_run"
    )]
    elasticsearch_host: Option<String>,

    /// Elasticsearch port, used when the host does not carry one
    #[arg(long = "elasticsearchPort", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    elasticsearch_port: u16,

    /// Document type path segment (use 'jmeter' for pre-7.x clusters)
    #[arg(long = "docType", value_name = "TYPE", default_value = DEFAULT_DOC_TYPE)]
    doc_type: String,

    /// Compute and print the summary without publishing it
    #[arg(long)]
    dry_run: bool,

    /// Output format for the printed summary
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let options = PublishOptions {
        build_name: cli.build_name,
        passed: cli.passed,
        file: cli.file,
        host: cli.elasticsearch_host,
        port: cli.elasticsearch_port,
        doc_type: cli.doc_type,
        dry_run: cli.dry_run,
        format: cli.format,
    };

    publish::execute(&options)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("jtl_summary=debug,jtl_summary_cli=debug,jtl_summary_core=debug,jtl_summary_elastic=debug")
    } else {
        EnvFilter::new("jtl_summary=info,jtl_summary_cli=info,jtl_summary_core=info,jtl_summary_elastic=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
