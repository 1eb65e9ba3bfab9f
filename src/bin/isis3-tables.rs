//! isis3-tables: decode the tables described by an ISIS3 label.
//!
//! Input: the label tree as JSON (`{"class": "...", "keywords": [...], "children": [...]}`,
//! as written by the label parser) and the file holding the table bytes.
//! Output: a JSON summary of every table on stdout. Set `RUST_LOG=debug` for details.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use isis3_tables::{
    process_document, CollectAscii, ExtractMode, LabelNode, ProcessOptions, TableData, TableStatus,
    TypedBuffer,
};

#[derive(Debug, Parser)]
#[command(version, about = "Decode the binary tables described by an ISIS3 label")]
struct Args {
    /// Label tree as JSON.
    #[arg(long)]
    label: PathBuf,
    /// File holding the table bytes (usually the cube the label came from).
    #[arg(long)]
    data: PathBuf,
    /// TOML file with processing options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Extraction mode: auto, whole or fields. Overrides the config file.
    #[arg(long, value_parser = parse_mode)]
    extract: Option<ExtractMode>,
}

fn parse_mode(s: &str) -> Result<ExtractMode, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(ExtractMode::Auto),
        "whole" => Ok(ExtractMode::Whole),
        "fields" => Ok(ExtractMode::Fields),
        _ => Err(format!("extract must be auto|whole|fields, got: {s}")),
    }
}

fn shape(buffer: &TypedBuffer) -> serde_json::Value {
    let (rows, cols) = buffer.shape();
    json!([rows, cols])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut options = match &args.config {
        Some(path) => ProcessOptions::load(path)?,
        None => ProcessOptions::default(),
    };
    if let Some(mode) = args.extract {
        options.extract = mode;
    }

    let mut root: LabelNode = serde_json::from_reader(BufReader::new(File::open(&args.label)?))?;
    let mut ascii = CollectAscii::default();
    let report = process_document(&mut root, &args.data, &options, &mut ascii)?;

    let tables: Vec<serde_json::Value> = report
        .tables
        .iter()
        .map(|t| match &t.status {
            TableStatus::Decoded(desc) => {
                let data = match root.children[t.index].data() {
                    Some(TableData::Whole(buffer)) => json!({ "whole": shape(buffer) }),
                    Some(TableData::Fields(fields)) => json!({
                        "fields": fields
                            .iter()
                            .map(|f| json!({ "name": f.name, "shape": shape(&f.buffer) }))
                            .collect::<Vec<_>>()
                    }),
                    None => serde_json::Value::Null,
                };
                json!({
                    "name": t.name,
                    "status": "decoded",
                    "element_type": desc.element_type(),
                    "type_declared": desc.declaration.is_declared(),
                    "byte_order": desc.byte_order,
                    "records": desc.records,
                    "bytes_per_row": desc.bytes_per_row,
                    "data": data,
                })
            }
            TableStatus::Ascii(request) => json!({
                "name": t.name,
                "status": "ascii",
                "request": request,
            }),
            TableStatus::Failed(e) => json!({
                "name": t.name,
                "status": "failed",
                "error": e.to_string(),
            }),
        })
        .collect();

    let renames: Vec<serde_json::Value> = report
        .resolution
        .renames
        .iter()
        .map(|r| json!({ "from": r.from, "to": r.to }))
        .collect();

    let summary = json!({
        "format_match": report.format_match,
        "renames": renames,
        "tables": tables,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    eprintln!(
        "decoded {} of {} tables ({} ascii)",
        report.decoded(),
        report.tables.len(),
        ascii.requests.len()
    );
    Ok(())
}
