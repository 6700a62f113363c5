//! mdexec CLI - compile bucket descriptions and run executions
//!
//! Usage:
//!   mdexec compile <file.json>
//!   mdexec execute <project> <file.json>
//!   mdexec data <project> <id>...
//!   mdexec chord <project> <attr1> <attr2> <metric>
//!
//! Examples:
//!   mdexec compile report.json
//!   mdexec --config mdexec.toml execute qamfsd9cw85e53mcqs74k8a0mwbf5gc2 report.json
//!   mdexec -v data qamfsd9cw85e53mcqs74k8a0mwbf5gc2 label.city metric.revenue

use clap::{Parser, Subcommand};
use mdexec::config::Settings;
use mdexec::execution::{DataResult, ExecutionClient, ExecutionOptions, HttpTransport};
use mdexec::reshape::chord_matrix;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mdexec")]
#[command(about = "mdexec - compile bucket descriptions into executions and fetch their results")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to MDEXEC_CONFIG, ./mdexec.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a bucket description and print the execution configuration
    Compile {
        /// Path to the metadata object JSON
        file: PathBuf,
    },

    /// Compile a bucket description and execute it
    Execute {
        /// Project id
        project: String,

        /// Path to the metadata object JSON
        file: PathBuf,
    },

    /// Execute a plain list of display form / metric identifiers
    Data {
        /// Project id
        project: String,

        /// Column identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Execute two attributes and a metric and print the chord matrix
    Chord {
        project: String,
        attr1: String,
        attr2: String,
        metric: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
    if let Err(e) = mdexec::logging::init(&settings.logging) {
        eprintln!("Logging setup failed: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Commands::Compile { file } => cmd_compile(&file),
        Commands::Execute { project, file } => run_async(cmd_execute(&settings, &project, &file)),
        Commands::Data { project, ids } => run_async(cmd_data(&settings, &project, ids)),
        Commands::Chord {
            project,
            attr1,
            attr2,
            metric,
        } => run_async(cmd_chord(&settings, &project, vec![attr1, attr2, metric])),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, mdexec::config::SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn run_async<F: std::future::Future<Output = ExitCode>>(future: F) -> ExitCode {
    match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime.block_on(future),
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_file(file: &Path) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file.display(), e);
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn client(settings: &Settings) -> Option<ExecutionClient<HttpTransport>> {
    match ExecutionClient::from_settings(settings) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            None
        }
    }
}

fn cmd_compile(file: &Path) -> ExitCode {
    let Some(source) = read_file(file) else {
        return ExitCode::FAILURE;
    };

    match mdexec::compile_json(&source) {
        Ok(config) => print_json(&config),
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_execute(settings: &Settings, project: &str, file: &Path) -> ExitCode {
    let Some(source) = read_file(file) else {
        return ExitCode::FAILURE;
    };
    let config = match mdexec::compile_json(&source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let Some(client) = client(settings) else {
        return ExitCode::FAILURE;
    };

    match client.execute(project, &config).await {
        Ok(result) => print_json(&result),
        Err(e) => {
            eprintln!("Execution error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_data(settings: &Settings, project: &str, ids: Vec<String>) -> ExitCode {
    match fetch(settings, project, ids).await {
        Some(result) => print_json(&result),
        None => ExitCode::FAILURE,
    }
}

async fn cmd_chord(settings: &Settings, project: &str, ids: Vec<String>) -> ExitCode {
    let Some(result) = fetch(settings, project, ids).await else {
        return ExitCode::FAILURE;
    };

    match chord_matrix(&result) {
        Ok(matrix) => print_json(&matrix),
        Err(e) => {
            eprintln!("Cannot build chord matrix: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn fetch(settings: &Settings, project: &str, ids: Vec<String>) -> Option<DataResult> {
    let client = client(settings)?;
    match client
        .get_data(project, &ids, ExecutionOptions::default())
        .await
    {
        Ok(result) => Some(result),
        Err(e) => {
            eprintln!("Execution error: {}", e);
            None
        }
    }
}
