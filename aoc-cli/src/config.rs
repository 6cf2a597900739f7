//! Runtime configuration resolved from the command line and environment

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

pub const SESSION_ENV: &str = "AOC_SESSION";

/// Which solvers and parts to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<u16>,
    pub day: Option<u8>,
    pub part: Option<u8>,
    pub tags: Vec<String>,
}

impl Selection {
    pub fn matches_tags(&self, tags: &[&str]) -> bool {
        self.tags.iter().all(|wanted| tags.contains(&wanted.as_str()))
    }
}

pub struct Config {
    pub selection: Selection,
    pub cache_dir: PathBuf,
    pub input_file: Option<PathBuf>,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    /// Cookie for adventofcode.com, zeroized on drop
    pub session: Option<Zeroizing<String>>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let env_session = std::env::var(SESSION_ENV).ok();
        Self::resolve(args, env_session)
    }

    fn resolve(args: Args, env_session: Option<String>) -> Result<Self, CliError> {
        if args.input.is_some() && args.day.is_none() {
            return Err(CliError::Config("--input needs --day to pick the puzzle it belongs to".to_string()));
        }
        if args.threads == Some(0) {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }

        Ok(Config {
            selection: Selection {
                year: args.year,
                day: args.day,
                part: args.part,
                tags: args.tags,
            },
            cache_dir: expand_tilde(&args.cache_dir),
            input_file: args.input,
            thread_count: args.threads.unwrap_or_else(available_threads),
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            session: env_session
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(Zeroizing::new),
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Ask for the session cookie without echoing it
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    eprintln!("{reason}");
    let session = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {e}")))?,
    );
    if session.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(session.trim().to_string()))
}

/// Check `session` against the site before using it for downloads
pub fn verify_session(client: &aoc_http_client::AocClient, session: &str) -> Result<(), CliError> {
    if client.verify_session(session)? {
        tracing::debug!("session accepted");
        Ok(())
    } else {
        Err(CliError::InvalidSession)
    }
}
