//! CLI for the precondition list parser.
//!
//! Pipeline: read header values -> parse each -> summarize -> print or stream rows.

use clap::{Parser, Subcommand};
use precon_core::{PreconError, PreconResult};
use precon_report::sink::json_stream::JsonStreamSink;
use precon_report::{parse_batch, parse_byte_batch, Report};
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "precon",
    version,
    about = "If-Match / If-None-Match precondition list parser"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse header field values (without the header name).
    Parse {
        /// Values to parse. Read one per line from stdin when omitted.
        values: Vec<String>,

        #[arg(long, default_value_t = false, conflicts_with = "sink")]
        json: bool,

        /// Sink output: "ndjson" writes NDJSON to stdout,
        /// "ndjson:/path/to/file" writes to file.
        #[arg(long)]
        sink: Option<String>,

        /// Exit with an error if any value is rejected.
        #[arg(long, env = "PRECON_STRICT", default_value_t = false)]
        strict: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            values,
            json,
            sink,
            strict,
        } => {
            let t0 = Instant::now();
            let outcomes = if values.is_empty() {
                tracing::info!("reading header values from stdin");
                parse_byte_batch(read_lines(io::stdin().lock())?)
            } else {
                parse_batch(values)
            };
            let report = Report::build(&outcomes, t0.elapsed());
            tracing::info!(
                values = report.total_values,
                rejected = report.rejected,
                elapsed_us = report.elapsed.as_micros(),
                "parse complete"
            );

            if let Some(ref sink_spec) = sink {
                let mut s = open_sink(sink_spec)?;
                s.write_summary(&report.to_summary_row())?;
                s.write_outcomes(&precon_report::sink::to_rows(&outcomes))?;
                let n = s.finish()?;
                tracing::info!(rows = n, sink = %sink_spec, "ndjson sink: done");

                // Still print report to stderr so it's visible.
                eprint!("{}", report.render());
            } else if json {
                let rows = precon_report::sink::to_rows(&outcomes);
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", report.render());
            }

            if strict && report.rejected > 0 {
                return Err(PreconError::Rejected {
                    rejected: report.rejected,
                    total: report.total_values,
                }
                .into());
            }
        }
    }

    Ok(())
}

/// One raw header value per line; a trailing `\r` is dropped.
///
/// Lines stay bytes so `obs-text` (0x80-0xFF) reaches the parser as-is.
fn read_lines<R: BufRead>(reader: R) -> PreconResult<Vec<Vec<u8>>> {
    reader
        .split(b'\n')
        .map(|line| -> PreconResult<Vec<u8>> {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(line)
        })
        .collect()
}

fn open_sink(spec: &str) -> PreconResult<JsonStreamSink<Box<dyn Write>>> {
    let writer: Box<dyn Write> = if spec == "ndjson" {
        Box::new(io::stdout())
    } else if let Some(path) = spec.strip_prefix("ndjson:") {
        Box::new(std::fs::File::create(path)?)
    } else {
        return Err(PreconError::InvalidInput(format!(
            "unknown sink: {spec}. Use 'ndjson' or 'ndjson:/path'"
        )));
    };
    Ok(JsonStreamSink::new(writer))
}
