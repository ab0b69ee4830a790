use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::process::ExitCode;

use ballistics_contracts::config::Config;
use ballistics_contracts::rpc::Operation;
use ballistics_contracts::web::ApiDoc;
use ballistics_contracts::Engine;
use utoipa::OpenApi;

#[derive(Parser)]
#[command(name = "ballistics-contracts")]
#[command(about = "Validate and normalize ballistics service documents")]
struct Cli {
    /// YAML configuration with precision and frame policy
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON document against an operation's contract
    Validate {
        file: String,
        /// Operation id, e.g. compute_stretch
        #[arg(long)]
        operation: Operation,
        /// Check against the result contract instead of the request
        #[arg(long)]
        result: bool,
    },
    /// List RPC operations and their endpoints
    Operations,
    /// Print the OpenAPI document for all contracts
    Openapi,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            file,
            operation,
            result,
        } => match load_engine(cli.config.as_deref()) {
            Some(engine) => validate(&engine, &file, operation, result),
            None => ExitCode::FAILURE,
        },
        Commands::Operations => operations(),
        Commands::Openapi => openapi(),
    }
}

fn load_engine(path: Option<&str>) -> Option<Engine> {
    let Some(path) = path else {
        return Some(Engine::default());
    };

    let policy = match Config::from_file(path).and_then(|config| config.policy()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return None;
        }
    };
    log::info!(
        "Loaded {}: length digits {}, angle digits {}, frame codes enforced: {}",
        path,
        policy.precision.length_digits(),
        policy.precision.angle_digits(),
        policy.enforce_frame_codes
    );
    Some(Engine::new(policy))
}

fn validate(engine: &Engine, path: &str, operation: Operation, result: bool) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let raw: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (kind, outcome) = if result {
        ("result", operation.canonical_result(engine, &raw))
    } else {
        ("request", operation.canonical_request(engine, &raw))
    };

    match outcome {
        Ok(canonical) => {
            log::debug!("{} {} is valid", operation, kind);
            print_json(&canonical)
        }
        Err(failure) => {
            eprintln!(
                "Invalid {} {} ({} field(s)):",
                operation,
                kind,
                failure.errors.len()
            );
            for error in &failure.errors {
                eprintln!("  {}", error);
            }
            ExitCode::FAILURE
        }
    }
}

fn operations() -> ExitCode {
    for op in Operation::ALL {
        println!(
            "{:<22} {:<32} {} -> {}",
            op.as_ref(),
            op.endpoint(),
            op.request_schema().name,
            op.result_schema().name
        );
    }
    ExitCode::SUCCESS
}

fn openapi() -> ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(doc) => {
            println!("{}", doc);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering OpenAPI document: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json(value: &Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            ExitCode::FAILURE
        }
    }
}
