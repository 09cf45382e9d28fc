//! # Invoice Editor Entry Point
//!
//! Runs one draft document through the editor from the command line.
//!
//! ```text
//! invoice-editor draft.json        # read the draft from a file
//! cat draft.json | invoice-editor  # or from stdin
//! ```
//!
//! On success the validated `DocumentPayload` is printed to stdout as JSON.
//! On failure the `ApiError` JSON is printed instead and the exit code is 1.
//! Configuration comes from `SUITE_*` environment variables.

use std::io::Read;
use std::process::ExitCode;

use invoice_editor::error::ApiError;
use invoice_editor::state::EditorConfig;
use tracing::{error, info};

fn main() -> ExitCode {
    invoice_editor::init_tracing();

    let config = EditorConfig::from_env();
    match run(&config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            match serde_json::to_string_pretty(&err) {
                Ok(json) => println!("{}", json),
                Err(_) => println!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: &EditorConfig) -> Result<String, ApiError> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let payload = invoice_editor::run_draft(&input, config)?;
    info!(
        tenant_id = %payload.tenant_id,
        subtotal = %config.format_currency(payload.subtotal),
        vat = %config.format_currency(payload.vat_amount),
        total = %config.format_currency(payload.total),
        "Draft accepted"
    );
    Ok(serde_json::to_string_pretty(&payload)?)
}
