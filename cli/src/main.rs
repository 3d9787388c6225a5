//! CLI for gitmeta.
//!
//! Exports a GitHub repository's issues, pull requests, reviews and releases
//! into a text digest and a zip archive, and manages the token cache.

use clap::{Parser, Subcommand};
use gitmeta::config::DEFAULT_CONFIG_FILE;
use gitmeta::runner::mask;
use gitmeta::{ExportSummary, FileConfig, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// gitmeta - Export GitHub repository metadata for language models.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the token cache file.
    #[arg(long, global = true)]
    token_cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a repository to a text digest and zip archive.
    Export {
        /// Repository as `owner/name` or a GitHub URL.
        repo: String,

        /// GitHub token to try. May be repeated or comma separated.
        #[arg(long = "token", env = "GITHUB_TOKEN")]
        tokens: Vec<String>,

        /// Directory for the output files.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Also write the archive contents as a `.gitmeta/` directory.
        #[arg(long)]
        unpacked: bool,

        /// Fail when no working token is available.
        #[arg(long)]
        require_token: bool,

        /// GitHub REST API base URL.
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Check whether GitHub accepts a token.
    ValidateToken {
        /// Token to check.
        token: String,
    },

    /// Inspect or edit the token cache.
    Tokens {
        #[command(subcommand)]
        action: TokensAction,
    },
}

#[derive(Subcommand, Debug)]
enum TokensAction {
    /// List cached tokens.
    List,

    /// Remove tokens from the cache.
    Forget {
        /// Tokens to remove.
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) if e.is_rate_limit() => {
            error!(error = %e, "Rate limited by GitHub");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ExitCode, RunnerError> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let file = FileConfig::load(&config_path)?;
    let mut config = RunnerConfig::from_file(&file);
    if let Some(path) = args.token_cache {
        config = config.with_token_cache(path);
    }

    match args.command {
        Command::Export {
            repo,
            tokens,
            out_dir,
            unpacked,
            require_token,
            api_url,
        } => {
            if let Some(dir) = out_dir {
                config = config.with_output_dir(dir);
            }
            if let Some(url) = api_url {
                config = config.with_api_url(url);
            }
            let unpacked = unpacked || config.unpacked();
            let require_token = require_token || config.require_token();
            config = config
                .with_unpacked(unpacked)
                .with_require_token(require_token);

            let runner = Runner::new(config)?;
            let summary = runner.export(&repo, &tokens).await?;
            print_summary(&summary);
            Ok(ExitCode::SUCCESS)
        }
        Command::ValidateToken { token } => {
            let runner = Runner::new(config)?;
            let valid = runner.validate_token(&token).await?;
            println!("{}: {}", mask(&token), if valid { "valid" } else { "invalid" });
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Command::Tokens { action } => {
            let runner = Runner::new(config)?;
            if runner.config().token_cache().is_none() {
                println!(
                    "No token cache configured; use --token-cache or set token-cache in {}.",
                    config_path.display()
                );
                return Ok(ExitCode::from(2));
            }

            let entries = match action {
                TokensAction::List => runner.cached_tokens(),
                TokensAction::Forget { tokens } => runner.forget_tokens(&tokens)?,
            };
            if entries.is_empty() {
                println!("(no cached tokens)");
            }
            for entry in &entries {
                println!("{}  added {}", mask(&entry.value), entry.added_at);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints the final export summary.
fn print_summary(summary: &ExportSummary) {
    let counts = &summary.counts;
    println!("\nSummary:");
    println!("  Repository: {}", summary.repository);
    println!(
        "  Mode: {}",
        if summary.authenticated {
            "Authenticated"
        } else {
            "Anonymous"
        }
    );
    println!("  Issues: {}", counts.issues);
    println!("  Pull requests: {}", counts.pulls);
    println!("  Issue comments: {}", counts.issue_comments);
    println!("  Reviews: {}", counts.reviews);
    println!("  Review comments: {}", counts.review_comments);
    println!("  Releases: {}", counts.releases);
    println!("  Digest: {}", summary.digest_path.display());
    println!(
        "  Archive: {} ({} bytes)",
        summary.archive_path.display(),
        summary.archive_bytes
    );
    if let Some(dir) = &summary.unpacked_dir {
        println!("  Unpacked: {}", dir.display());
    }
}
