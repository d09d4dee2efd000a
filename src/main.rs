use clap::Parser;
use issue_board::cli::commands;
use issue_board::cli::{Cli, Commands};
use issue_board::config;
use issue_board::logging::init_logging;
use issue_board::{BoardError, StructuredError};
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_format) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let overrides = build_cli_overrides(&cli);

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(&args, &overrides),
        Commands::Config => commands::config::execute(cli.json, &overrides),
        Commands::Schema => commands::schema::execute(),
        Commands::Completions(args) => commands::completions::execute(&args),
        Commands::Version => commands::version::execute(cli.json),
    };

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Print the error (JSON with `--json` or when stdout is not a TTY) and exit.
fn handle_error(err: &BoardError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        eprintln!("{}", structured.to_human(io::stderr().is_terminal()));
    }

    std::process::exit(err.exit_code());
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    config::CliOverrides {
        config_path: cli.config.clone(),
        bind: None,
        cors: None,
    }
}
