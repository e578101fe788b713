//! eventlog-prep entrypoint: reads an ndjson event log, runs the configured
//! pipeline and writes either the transformed log or the sequence tensor.
//!
//! Usage: `eventlog-prep <input.ndjson> [output]` (stdout when no output is given).

use chrono::Utc;
use eventlog_prep::{
    config::PrepConfig,
    eventlog::{read_ndjson, write_ndjson},
    logging::RunSummary,
    pipeline::LogPipeline,
    tensor::to_sequence_tensor_bounded,
    transform::trace_count,
    StructuredLogger,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use tracing::info;

fn open_output(path: Option<&str>) -> std::io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("LOGPREP_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = PrepConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(input) = args.first() else {
        return Err("usage: eventlog-prep <input.ndjson> [output]".into());
    };
    let output = args.get(1).map(String::as_str);

    info!(input = %input, config = ?config_path, "eventlog-prep starting");
    let log = read_ndjson(BufReader::new(File::open(input)?), &config.columns)?;
    let rows_in = log.height();
    let traces = trace_count(&log, &config.columns)?;
    info!(rows = rows_in, traces, columns = log.width(), "event log loaded");

    let pipeline = LogPipeline::from_config(&config);
    let log = pipeline.run(log)?;
    let mut out = open_output(output)?;

    let shape = if config.tensor.enabled {
        let tensor =
            to_sequence_tensor_bounded(&log, &config.columns.case_id, config.tensor.max_elements)?;
        serde_json::to_writer(&mut out, &tensor)?;
        writeln!(out)?;
        Some(tensor.shape())
    } else {
        write_ndjson(&log, &mut out)?;
        None
    };
    out.flush()?;

    let summary = RunSummary {
        ts: Utc::now().to_rfc3339(),
        input,
        rows_in,
        rows_out: log.height(),
        traces,
        stages: pipeline.steps().len(),
        output: output.unwrap_or("-"),
        shape,
    };
    StructuredLogger::emit_json(&summary, &mut std::io::stderr());
    Ok(())
}
