//! Line-based driver for the quote commands.
//!
//! # Responsibility
//! - Stand in for the chat gateway: read `<caller> <prefix><command> [text]`
//!   lines from stdin and print replies.
//! - Decide caller privilege from the configured admin list.

use clap::Parser;
use log::{error, warn};
use quotedb_core::{
    default_log_level, init_logging, CommandProcessor, Invocation, IrcTermFormatter, QuoteCommand,
    QuoteDbConfig, QuoteService, SqliteQuoteRepository, TermFormatter,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP_COMMAND: &str = "help";

#[derive(Debug, Parser)]
#[command(name = "quotedb", version, about = "Log and look up chat quotes")]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database path, overriding `storage_dir`/`filename` from the config.
    #[arg(long)]
    db: Option<PathBuf>,
}

/// One routed line of input.
#[derive(Debug, PartialEq, Eq)]
struct RoutedLine<'a> {
    caller: &'a str,
    command: &'a str,
    text: &'a str,
}

fn route_line<'a>(line: &'a str, prefix: &str) -> Option<RoutedLine<'a>> {
    let (caller, rest) = line.trim().split_once(char::is_whitespace)?;
    let rest = rest.trim_start().strip_prefix(prefix)?;
    let (command, text) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    if command.is_empty() {
        return None;
    }
    Some(RoutedLine {
        caller,
        command,
        text,
    })
}

fn help_text(prefix: &str) -> String {
    QuoteCommand::ALL
        .into_iter()
        .map(|command| command.help(prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

fn run<F: TermFormatter>(
    config: &QuoteDbConfig,
    processor: &CommandProcessor<SqliteQuoteRepository, F>,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(routed) = route_line(&line, &config.command_prefix) else {
            continue;
        };

        if routed.command.eq_ignore_ascii_case(HELP_COMMAND) {
            writeln!(stdout, "{}", help_text(&config.command_prefix))?;
            continue;
        }
        let Some(command) = QuoteCommand::from_name(routed.command) else {
            continue;
        };

        let invocation = Invocation {
            caller: routed.caller,
            privileged: config.is_admin(routed.caller),
            text: routed.text,
        };
        match processor.handle(command, &invocation) {
            Ok(Some(reply)) => writeln!(stdout, "{reply}")?,
            Ok(None) => {}
            Err(err) => {
                error!(
                    "event=command module=cli status=error command={} error={}",
                    command.name(),
                    err
                );
                eprintln!("quote store error: {err}");
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match QuoteDbConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => QuoteDbConfig::default(),
    };

    if let Some(log_dir) = &config.log_dir {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = cli.db.unwrap_or_else(|| config.db_path());
    let repo = match SqliteQuoteRepository::open(&db_path) {
        Ok(repo) => repo,
        Err(err) => {
            error!(
                "event=startup module=cli status=error db_path={} error={}",
                db_path.display(),
                err
            );
            eprintln!("cannot open quote store `{}`: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let style = match config.term_style() {
        Ok(style) => style,
        Err(err) => {
            warn!("event=startup module=cli status=degraded error={err}");
            Default::default()
        }
    };
    let processor = CommandProcessor::new(QuoteService::new(repo), IrcTermFormatter::new(style));

    match run(&config, &processor) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("input error: {err}");
            ExitCode::FAILURE
        }
    }
}
