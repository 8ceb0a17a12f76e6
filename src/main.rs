use anyhow::Result;
use clap::Parser;
use mediatidy::cli::{Cli, run_cli, validate_directory};
use mediatidy::output::OutputFormatter;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let base_path = match &cli.directory {
        Some(dir) => match validate_directory(dir) {
            Ok(path) => path,
            Err(e) => {
                OutputFormatter::error(&e.to_string());
                std::process::exit(2);
            }
        },
        None => {
            println!("Sort photos and videos into folders by type and date.\n");
            match prompt_for_directory()? {
                Some(path) => path,
                None => return Ok(()),
            }
        }
    };

    match run_cli(&cli, &base_path) {
        Ok(report) if report.has_failures() => std::process::exit(1),
        Ok(_) => Ok(()),
        Err(e) => {
            error!(error = %e, "Organization failed");
            OutputFormatter::error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}

/// Asks for a directory until a valid one is entered. Empty input or EOF gives up.
fn prompt_for_directory() -> Result<Option<PathBuf>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Full path of the folder to organize: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let input = line?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        match validate_directory(Path::new(input)) {
            Ok(path) => return Ok(Some(path)),
            Err(e) => OutputFormatter::error(&format!("{}\n", e)),
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
