//! xmlbind command line renderer.
//!
//! Reads a JSON record document (see [`xmlbind_model::dynamic`]) and writes
//! its XML rendering.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XMLBIND_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//!
//! The serializer options (`XMLBIND_XML_DECLARATION`, `XMLBIND_ENCODING`,
//! `XMLBIND_PRETTY_PRINT`, `XMLBIND_MAX_DEPTH`) are read as well.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use xmlbind_model::DynamicRecord;
use xmlbind_serde::{SerializerConfig, XmlSerializer};

/// Render a JSON-described record as XML.
#[derive(Debug, Parser)]
#[command(name = "xmlbind", version, about)]
struct Cli {
    /// Input JSON document, or `-` for standard input.
    input: PathBuf,

    /// Output file. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Namespace for the root element, replacing the record's own.
    #[arg(long)]
    namespace: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "XMLBIND_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(flatten)]
    serializer: SerializerConfig,
}

/// Initializes the tracing subscriber. Logs go to standard error so they never
/// mix with XML written to standard output.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("xmlbind={},xmlbind_serde={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read standard input")?;
        Ok(buffer)
    } else {
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
    }
}

/// Decodes a record document and renders it.
fn render_document(
    json: &[u8],
    namespace: Option<&str>,
    config: SerializerConfig,
) -> anyhow::Result<String> {
    let record = DynamicRecord::from_json_slice(json).context("Invalid record document")?;
    let serializer = XmlSerializer::new(config);
    let tree = serializer.render_tree(&record, namespace)?;
    debug!(root = %tree.tag(), declarations = tree.nsmap().len(), "Built element tree");
    Ok(serializer.tree_to_string(&tree)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(errors) = cli.serializer.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        input = %cli.input.display(),
        pretty_print = cli.serializer.pretty_print,
        "Rendering record"
    );

    let json = read_input(&cli.input)?;
    let xml = render_document(&json, cli.namespace.as_deref(), cli.serializer)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &xml).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), bytes = xml.len(), "Wrote XML");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
