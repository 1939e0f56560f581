//! `portfolio` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration and start logging before anything else runs.
//! - Run the HTTP server, or compose a static-mode `mailto:` link offline.

use clap::{Args, Parser, Subcommand};
use log::error;
use portfolio_core::{compose_mailto, validate_contact_form, ContactFormInput};
use portfolio_server::{load_config, serve, AppState, ConfigOverrides, PortfolioConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "portfolio", version, about = "Portfolio site server")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve(ServeArgs),
    /// Validate a contact form and print the static-mode mailto link.
    Mailto(MailtoArgs),
    /// Print the core version.
    Version,
}

#[derive(Debug, Default, Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Directory holding the built site.
    #[arg(long)]
    static_dir: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rotating log files.
    #[arg(long)]
    log_dir: Option<String>,
}

impl From<ServeArgs> for ConfigOverrides {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
            log_level: args.log_level,
            log_dir: args.log_dir,
        }
    }
}

#[derive(Debug, Args)]
struct MailtoArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    message: String,
    /// Overrides `contact.recipient` from config.
    #[arg(long)]
    to: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => run_serve(cli.config, args.into()),
        Command::Mailto(args) => run_mailto(cli.config, args),
        Command::Version => {
            println!("portfolio_core version={}", portfolio_core::core_version());
            ExitCode::SUCCESS
        }
    }
}

fn resolve_config(path: Option<PathBuf>, overrides: &ConfigOverrides) -> Option<PortfolioConfig> {
    match load_config(path.as_deref(), overrides) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("portfolio: {err}");
            None
        }
    }
}

fn run_serve(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> ExitCode {
    let Some(config) = resolve_config(config_path, &overrides) else {
        return ExitCode::FAILURE;
    };

    if let Err(err) = portfolio_core::init_logging(&config.logging.level, config.logging.dir.as_deref())
    {
        eprintln!("portfolio: {err}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("event=runtime_start module=cli status=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(serve(&config.server, AppState::in_memory())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run_mailto(config_path: Option<PathBuf>, args: MailtoArgs) -> ExitCode {
    let recipient = match args.to {
        Some(to) => to,
        None => match resolve_config(config_path, &ConfigOverrides::default()) {
            Some(config) => config.contact.recipient,
            None => return ExitCode::FAILURE,
        },
    };

    let input = ContactFormInput::from_fields(
        args.name,
        args.email,
        args.subject.as_deref(),
        args.message,
    );
    match validate_contact_form(&input) {
        Ok(form) => {
            println!("{}", compose_mailto(&recipient, &form));
            ExitCode::SUCCESS
        }
        Err(errors) => {
            for error in errors.errors() {
                eprintln!("{}: {}", error.field.as_str(), error.message);
            }
            ExitCode::from(2)
        }
    }
}
