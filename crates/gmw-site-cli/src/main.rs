// crates/gmw-site-cli/src/main.rs
// ============================================================================
// Module: GMW Site CLI Entry Point
// Description: Command dispatcher for the GMW site backend.
// Purpose: Run the RPC server, seed sample data, and check configuration.
// Dependencies: clap, gmw-site-config, gmw-site-core, gmw-site-rpc, tokio
// ============================================================================

//! ## Overview
//! The `gmw-site` binary serves the JSON-RPC facade, seeds the configured
//! store with the fixed sample content, and validates or prints
//! configuration. Status lines go to stderr; command results go to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use gmw_site_config::SiteConfig;
use gmw_site_config::StoreType;
use gmw_site_config::config_toml_example;
use gmw_site_core::SeedSummary;
use gmw_site_core::Timestamp;
use gmw_site_core::seed_sample_data;
use gmw_site_rpc::SiteServer;
use gmw_site_rpc::build_site_store;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "gmw-site", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the JSON-RPC server.
    Serve(ConfigArgs),
    /// Insert the sample blog posts and company stats into the configured store.
    Seed(ConfigArgs),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate(ConfigArgs),
    /// Print the canonical example configuration.
    Example,
}

/// Shared config file selection.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Optional config file path (defaults to gmw-site.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("gmw-site {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(args) => command_serve(args).await,
        Commands::Seed(args) => command_seed(args).await,
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Loads configuration for a command.
fn load_config(args: &ConfigArgs) -> CliResult<SiteConfig> {
    SiteConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(args: ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(&args)?;
    let bind = config.server.bind.clone();
    if config.store.store_type == StoreType::Memory {
        write_stderr_line("gmw-site: WARNING: memory store selected; data is lost on shutdown")
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    let server = tokio::task::spawn_blocking(move || SiteServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    write_stderr_line(&format!("gmw-site: serving JSON-RPC on http://{bind}/rpc"))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    write_stderr_line("gmw-site: shutdown complete")
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Seed Command
// ============================================================================

/// Executes the `seed` command.
async fn command_seed(args: ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(&args)?;
    if config.store.store_type == StoreType::Memory {
        write_stderr_line("gmw-site: WARNING: memory store selected; seeded rows are discarded")
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    let summary = tokio::task::spawn_blocking(move || seed_configured_store(&config))
        .await
        .map_err(|err| CliError::new(format!("seed failed: seed join failed: {err}")))??;
    let output = json!({
        "success": true,
        "message": summary.message(),
    });
    write_stdout_line(&output.to_string())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Opens the configured store and inserts the sample content.
fn seed_configured_store(config: &SiteConfig) -> CliResult<SeedSummary> {
    let store = build_site_store(&config.store)
        .map_err(|err| CliError::new(format!("seed failed: {err}")))?;
    seed_sample_data(&store, Timestamp::now())
        .map_err(|err| CliError::new(format!("seed failed: {err}")))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(args) => command_config_validate(&args),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let _config = load_config(args)?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the canonical example configuration.
fn command_config_example() -> CliResult<ExitCode> {
    let example = config_toml_example();
    write_stdout_line(example.trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
