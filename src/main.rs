// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and env fallbacks) using clap
// 2. Build a validated Config and the GitHub client
// 3. Resolve the branch's commit, then write the raw links file
// 4. Exit with proper code (0 = success, 1 = the run failed)
//
// Every failure is a RawLinksError. main() matches on it once, prints a
// single message plus a hint, and picks the exit code.
// =============================================================================

mod cli;
mod config;
mod error;
mod github;
mod links;

use std::time::Instant;

use clap::Parser;
use log::debug;

use cli::Cli;
use config::Config;
use error::Result;
use github::HttpClient;
use links::Outcome;

// Requests run one after another, so a single-threaded runtime is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let started = Instant::now();

    let result = run(&cli).await;
    let exit_code = report(&result);

    if exit_code == 0 {
        println!("\n⏱️  Total time: {:.2} seconds", started.elapsed().as_secs_f64());
    }

    std::process::exit(exit_code);
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("raw_links")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

// The whole run: config -> client -> resolve commit -> write links
async fn run(cli: &Cli) -> Result<Outcome> {
    initialize_logger(cli.debug)?;

    let config = Config::from_cli(cli)?;
    debug!("{:?}", config);

    let api = HttpClient::new(&config)?;
    links::generate(&api, &config).await
}

// Prints the final message for a run and returns the process exit code
fn report(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(Outcome::Written(summary)) => {
            debug!(
                "{} links ({} bytes, {}) in {}",
                summary.file_count,
                summary.bytes,
                summary.anchor,
                summary.path.display()
            );
            0
        }
        Ok(Outcome::NoFiles) => 0,
        Err(e) => {
            eprintln!("\n💥 Error: {}", e);
            eprintln!("🔧 Fix: {}", e.remediation());
            1
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does run() return Result instead of exiting itself?
//    - Exiting in one place (main) keeps the exit codes easy to find
//    - report() is a plain function, so the tests can call it directly
//
// 2. What does flavor = "current_thread" change?
//    - tokio runs everything on the main thread, no worker pool
//    - We only ever await one request at a time, so that's all we need
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RawLinksError;
    use crate::links::{Anchor, OutputSummary};

    #[test]
    fn test_success_exit_codes() {
        let written = Ok(Outcome::Written(OutputSummary {
            path: "raw_links_20240501_090507.txt".into(),
            file_count: 2,
            bytes: 120,
            anchor: Anchor::Commit("abc123".to_string()),
        }));
        assert_eq!(report(&written), 0);
        assert_eq!(report(&Ok(Outcome::NoFiles)), 0);
    }

    #[test]
    fn test_failure_exit_code() {
        let failed: Result<Outcome> = Err(RawLinksError::NetworkError("refused".to_string()));
        assert_eq!(report(&failed), 1);

        let not_found: Result<Outcome> = Err(RawLinksError::RepositoryOrBranchNotFound {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            branch: "main".to_string(),
        });
        assert_eq!(report(&not_found), 1);
    }
}
