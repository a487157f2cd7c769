use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use assessment_schemas::{
    config::{get_config, init_config},
    validate_named, Error, ValidationReport, SCHEMA_NAMES,
};
use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((schema, files)) = args.split_first().filter(|(_, files)| !files.is_empty()) else {
        eprintln!("usage: schema-check <schema> <file>...");
        eprintln!("schemas: {}", SCHEMA_NAMES.join(", "));
        return Ok(ExitCode::from(2));
    };

    let stdout = std::io::stdout();
    match run(schema, files, config.max_payload_bytes, &mut stdout.lock()) {
        Ok(0) => Ok(ExitCode::SUCCESS),
        Ok(_) => Ok(ExitCode::FAILURE),
        Err(Error::UnknownSchema(name)) => {
            eprintln!("unknown schema '{}'; expected one of: {}", name, SCHEMA_NAMES.join(", "));
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks every file against `schema`, writing one JSON line per file to `out`.
/// A file that cannot be read is reported like an invalid one and the run
/// moves on. Returns how many files were rejected.
fn run<W: Write>(
    schema: &str,
    files: &[String],
    max_bytes: usize,
    out: &mut W,
) -> Result<usize, Error> {
    if !SCHEMA_NAMES.contains(&schema) {
        return Err(Error::UnknownSchema(schema.to_string()));
    }

    let mut invalid = 0usize;
    for file in files {
        let line = match check_file(schema, Path::new(file), max_bytes) {
            Ok(normalised) => {
                info!(file = %file, schema = %schema, "valid");
                json!({ "file": file, "valid": true, "value": normalised })
            }
            Err(Error::Validation(report)) => {
                invalid += 1;
                warn!(file = %file, schema = %schema, errors = report.len(), "invalid");
                json!({ "file": file, "valid": false, "report": report })
            }
            Err(Error::UnknownSchema(name)) => return Err(Error::UnknownSchema(name)),
            Err(e) => {
                invalid += 1;
                warn!(file = %file, error = %e, "unreadable");
                json!({ "file": file, "valid": false, "error": e.to_string() })
            }
        };
        writeln!(out, "{}", line)?;
    }

    info!(checked = files.len(), invalid, "schema check finished");
    Ok(invalid)
}

fn check_file(schema: &str, path: &Path, max_bytes: usize) -> Result<JsonValue, Error> {
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes as u64 {
        return Err(Error::PayloadTooLarge {
            size,
            limit: max_bytes,
        });
    }

    let text = std::fs::read_to_string(path)?;
    let value: JsonValue =
        serde_json::from_str(&text).map_err(|e| ValidationReport::from_serde(&e))?;
    validate_named(schema, value)
}
