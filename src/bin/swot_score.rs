//! One-shot scorer: `swot-score '<json>'` prints the analysis as JSON on stdout.
//!
//! Failures print `{"error": "..."}` on stderr and exit with status 1.

use clap::Parser;
use serde_json::Value;
use std::process::ExitCode;
use swot_engine::core::{ForestParams, SwotEngine, TrainingParams};
use swot_engine::logging;
use swot_engine::models::StartupInput;

#[derive(Debug, Parser)]
#[command(name = "swot-score", version, about = "Score a startup description as a SWOT analysis")]
struct Args {
    /// Startup description as a JSON object with optional
    /// industry, location, audience and description fields
    json: String,

    /// Number of trees in the success predictor
    #[arg(long, default_value_t = 100)]
    trees: usize,

    /// Log level for diagnostics written to stderr
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level, "compact");

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", serde_json::json!({ "error": message }));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, String> {
    let input = parse_input(&args.json)?;

    let params = TrainingParams {
        forest: ForestParams {
            n_trees: args.trees,
            ..ForestParams::default()
        },
        ..TrainingParams::default()
    };
    let engine = SwotEngine::new(&params).map_err(|e| e.to_string())?;

    let result = engine.analyze(&input);
    serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
}

/// Input must be a JSON object; arrays and scalars are rejected
fn parse_input(json: &str) -> Result<StartupInput, String> {
    match serde_json::from_str::<Value>(json).map_err(|e| e.to_string())? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(|e| e.to_string()),
        other => Err(format!("expected a JSON object, got {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
