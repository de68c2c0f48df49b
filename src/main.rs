// Minilang: parse a source file and print its syntax tree as JSON

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use minilang::{parse_source, render, FrontendConfig};

fn main() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minilang");

    let Some(path) = args.get(1) else {
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file>", program_name);
        return Ok(ExitCode::FAILURE);
    };

    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        return Ok(ExitCode::FAILURE);
    }

    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;

    let output = match parse_source(&source, &FrontendConfig::default()) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    for diagnostic in &output.diagnostics {
        eprintln!("{}", render(diagnostic, &source));
    }

    println!("{}", serde_json::to_string_pretty(&output.program)?);

    Ok(if output.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
